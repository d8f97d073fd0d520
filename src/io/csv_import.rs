use std::path::Path;

use tracing::{debug, warn};

use crate::error::{HangarError, HangarResult};
use crate::model::{ActiveProject, Task, TaskKind};

/// Start hour given to imported tasks when the sheet has no hour column.
pub const DEFAULT_START_HOUR: i32 = 8;
const TITLE_MAX_CHARS: usize = 40;

/// Task fields a spreadsheet column can feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Item,
    Title,
    Description,
    Skill,
    StartDay,
    StartHour,
    DurationDays,
    /// Recognized so it is not mistaken for another column; not imported.
    PlannedHours,
    AddHours,
    Progress,
    DependsOn,
}

/// Header aliases per column, normalized (lowercase, alphanumerics only).
pub const COLUMN_ALIASES: &[(Column, &[&str])] = &[
    (Column::Item, &["item", "itemno", "itemnumber", "id"]),
    (Column::Title, &["discrepancy", "title", "task", "name", "tasklabel"]),
    (Column::Description, &["description", "descriptionlarga", "details", "notes"]),
    (Column::Skill, &["skill", "type", "discipline"]),
    (Column::StartDay, &["diaini", "startday", "start", "day"]),
    (Column::StartHour, &["starthour", "hour"]),
    (Column::DurationDays, &["diaduracion", "duration", "durationdays", "days"]),
    (Column::PlannedHours, &["plannedhours", "planned"]),
    (Column::AddHours, &["addhours", "durationhours", "extrahours"]),
    (Column::Progress, &["avance", "progress", "percent", "complete"]),
    (Column::DependsOn, &["dependson", "dependencies", "after"]),
];

/// Separator between item numbers inside the depends-on cell.
pub const DEPENDENCY_SEPARATOR: char = '|';

/// Result of a CSV import.
#[derive(Debug, Clone)]
pub struct CsvImport {
    pub tasks: Vec<Task>,
    /// Data rows dropped for a missing item number or title.
    pub skipped: usize,
}

/// Normalize a header cell to its lookup key.
fn normalize_header(h: &str) -> String {
    h.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn header_to_column(normalized: &str) -> Option<Column> {
    COLUMN_ALIASES
        .iter()
        .find(|(_, aliases)| aliases.contains(&normalized))
        .map(|(column, _)| *column)
}

/// Separators tried on each line while looking for the header, in order.
const DELIMITERS: [u8; 3] = [b',', b';', b'\t'];

/// Detect delimiter by checking a line for common separators.
fn detect_delimiter(line: &str) -> u8 {
    let semicolons = line.matches(';').count();
    let commas = line.matches(',').count();
    let tabs = line.matches('\t').count();

    if commas >= semicolons && commas >= tabs {
        b','
    } else if semicolons >= tabs {
        b';'
    } else {
        b'\t'
    }
}

/// Cells of a single line split on `delimiter`.
fn split_line(line: &str, delimiter: u8) -> Vec<String> {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(line.as_bytes())
        .records()
        .next()
        .and_then(Result::ok)
        .map(|record| record.iter().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Column mapping of `line` if it names both an item and a title column.
fn header_columns(line: &str, delimiter: u8) -> Option<Vec<Option<Column>>> {
    let columns: Vec<Option<Column>> = split_line(line, delimiter)
        .iter()
        .map(|h| header_to_column(&normalize_header(h)))
        .collect();
    (columns.contains(&Some(Column::Item)) && columns.contains(&Some(Column::Title)))
        .then_some(columns)
}

/// The header row: its 1-based line number, delimiter, column mapping and
/// the byte offset where data rows begin.
struct Header {
    line: usize,
    delimiter: u8,
    columns: Vec<Option<Column>>,
    body_start: usize,
}

fn find_header(content: &str) -> Option<Header> {
    let mut offset = 0;
    for (i, raw) in content.split_inclusive('\n').enumerate() {
        offset += raw.len();
        let line = raw.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            continue;
        }
        let found = DELIMITERS
            .iter()
            .find_map(|&d| header_columns(line, d).map(|columns| (d, columns)));
        if let Some((delimiter, columns)) = found {
            return Some(Header {
                line: i + 1,
                delimiter,
                columns,
                body_start: offset,
            });
        }
    }
    None
}

/// Leading numeric value of a cell; blanks and junk read as `None`.
fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Id under which an item number is stored for `project`.
pub fn task_id(project: &str, item: &str) -> String {
    format!("{project}-{item}")
}

/// Import tasks for the active project from a CSV file.
pub fn import_csv(path: &Path, active: &ActiveProject) -> HangarResult<CsvImport> {
    let project = active.name().ok_or(HangarError::NoActiveProject)?;
    let content = std::fs::read_to_string(path)?;
    parse_csv(&content, project)
}

/// Parse CSV text into tasks of `project`.
///
/// Rows before the header (the first row naming both an item and a title
/// column, under any supported delimiter) are ignored, so sheets with a
/// title block import as-is.
pub fn parse_csv(content: &str, project: &str) -> HangarResult<CsvImport> {
    let Some(header) = find_header(content) else {
        let first_line = content.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
        return Err(HangarError::MissingColumns {
            found: split_line(first_line, detect_delimiter(first_line)),
        });
    };
    debug!(
        row = header.line,
        delimiter = %char::from(header.delimiter).escape_default(),
        "csv header found"
    );

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(header.delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content[header.body_start..].as_bytes());

    let mut tasks = Vec::new();
    let mut skipped = 0usize;

    for (i, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(row = header.line + i + 1, error = %e, "skipping unreadable csv row");
                skipped += 1;
                continue;
            }
        };

        if record.iter().all(str::is_empty) {
            continue;
        }

        let row = Row {
            map: &header.columns,
            record: &record,
        };
        if row.get(Column::Item).is_empty() || row.get(Column::Title).is_empty() {
            skipped += 1;
            continue;
        }
        tasks.push(row.to_task(project));
    }

    if tasks.is_empty() {
        return Err(HangarError::NoTasks { skipped });
    }

    debug!(count = tasks.len(), skipped, "csv parsed");
    Ok(CsvImport { tasks, skipped })
}

/// One data row seen through the header mapping.
struct Row<'a> {
    map: &'a [Option<Column>],
    record: &'a csv::StringRecord,
}

impl<'a> Row<'a> {
    fn get(&self, column: Column) -> &'a str {
        self.map
            .iter()
            .position(|c| *c == Some(column))
            .and_then(|idx| self.record.get(idx))
            .map(|s| s.trim_matches('"'))
            .unwrap_or("")
    }

    fn whole(&self, column: Column) -> Option<i32> {
        parse_number(self.get(column)).map(|v| v.trunc() as i32)
    }

    fn to_task(&self, project: &str) -> Task {
        let raw_title = self.get(Column::Title);
        let title = raw_title
            .chars()
            .take(TITLE_MAX_CHARS)
            .collect::<String>()
            .to_uppercase();
        let description = match self.get(Column::Description) {
            "" => raw_title.to_string(),
            d => d.to_string(),
        };
        let kind = match self.get(Column::Skill) {
            "" => TaskKind::Airframe,
            tag => TaskKind::from_tag(tag),
        };

        let dependencies = self
            .get(Column::DependsOn)
            .split(DEPENDENCY_SEPARATOR)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|dep| task_id(project, dep))
            .collect();

        Task {
            id: task_id(project, self.get(Column::Item)),
            title,
            description,
            kind,
            start: self.whole(Column::StartDay).unwrap_or(0).max(0),
            start_hour: self
                .whole(Column::StartHour)
                .unwrap_or(DEFAULT_START_HOUR)
                .clamp(0, 23),
            duration: self
                .whole(Column::DurationDays)
                .filter(|d| *d != 0)
                .unwrap_or(1)
                .max(1),
            duration_hours: self.whole(Column::AddHours).unwrap_or(0).max(0),
            progress: self.whole(Column::Progress).unwrap_or(0).clamp(0, 100) as u8,
            project: project.to_string(),
            dependencies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "\
WORK PACKAGE,B737-800,,,,,,,
ITEM#,DISCREPANCY,DESCRIPTION LARGA,SKILL,DIA INI,DIA DURACION,PLANNED HOURS,ADD HOURS,AVANCE
1,fuselage structural inspection of all access panels,,A&P,0,5,40,0,100
2,Seat removal,Remove seats and carpets,INT,-3,0,12,4.5,250
,orphan row without item,,,,,,,
3,G1000,,AVI,abc,,,,
";

    #[test]
    fn header_aliases_are_normalized() {
        assert_eq!(header_to_column(&normalize_header("ITEM#")), Some(Column::Item));
        assert_eq!(header_to_column(&normalize_header("Dia Ini")), Some(Column::StartDay));
        assert_eq!(header_to_column(&normalize_header("PLANNED HOURS")), Some(Column::PlannedHours));
        assert_eq!(header_to_column(&normalize_header("colour")), None);
    }

    #[test]
    fn rows_follow_fallback_rules() {
        let import = parse_csv(SHEET, "A22").unwrap();
        assert_eq!(import.tasks.len(), 3);
        assert_eq!(import.skipped, 1);

        let first = &import.tasks[0];
        assert_eq!(first.id, "A22-1");
        assert_eq!(first.title, "FUSELAGE STRUCTURAL INSPECTION OF ALL AC");
        assert_eq!(first.description, "fuselage structural inspection of all access panels");
        assert_eq!(first.kind, TaskKind::Airframe);
        assert_eq!((first.start, first.start_hour), (0, DEFAULT_START_HOUR));
        assert_eq!(first.progress, 100);

        let second = &import.tasks[1];
        assert_eq!(second.kind, TaskKind::Interior);
        assert_eq!(second.start, 0);
        assert_eq!(second.duration, 1);
        assert_eq!(second.duration_hours, 4);
        assert_eq!(second.progress, 100);

        let third = &import.tasks[2];
        assert_eq!(third.start, 0);
        assert_eq!(third.duration, 1);
        assert_eq!(third.project, "A22");
    }

    #[test]
    fn semicolon_sheet_with_dependencies() {
        let sheet = "item;title;skill;start;hour;days;depends on\n\
                     10;Remove panels;SM;1;6;2;\n\
                     11;Repair skin;paint;0;0;1;10\n";
        let import = parse_csv(sheet, "B7").unwrap();
        assert_eq!(import.tasks[0].start_hour, 6);
        assert_eq!(import.tasks[1].kind, TaskKind::Unknown);
        assert_eq!(import.tasks[1].dependencies, vec!["B7-10".to_string()]);
    }

    #[test]
    fn title_block_before_semicolon_header() {
        let sheet = "WORK PACKAGE B737\n\
                     \n\
                     ITEM#;DISCREPANCY;SKILL\n\
                     1;Panel repair;SM\n";
        let import = parse_csv(sheet, "A22").unwrap();
        assert_eq!(import.tasks.len(), 1);
        assert_eq!(import.tasks[0].id, "A22-1");
        assert_eq!(import.tasks[0].title, "PANEL REPAIR");
        assert_eq!(import.tasks[0].kind, TaskKind::SheetMetal);
    }

    #[test]
    fn tab_header_after_comma_title_row() {
        let sheet = "Customer, X-TREME\r\nitem\ttitle\tdays\r\n7\tCabin clean\t2\r\n";
        let import = parse_csv(sheet, "B7").unwrap();
        assert_eq!(import.tasks.len(), 1);
        assert_eq!(import.tasks[0].duration, 2);
    }

    #[test]
    fn sheet_without_header_is_rejected() {
        let err = parse_csv("a,b,c\n1,2,3\n", "A22").unwrap_err();
        match err {
            HangarError::MissingColumns { found } => assert_eq!(found, vec!["a", "b", "c"]),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn header_only_sheet_has_no_tasks() {
        let err = parse_csv("ITEM#,DISCREPANCY\n,\n", "A22").unwrap_err();
        assert!(matches!(err, HangarError::NoTasks { skipped: 0 }));
    }

    #[test]
    fn import_needs_a_concrete_project() {
        let err = import_csv(Path::new("unused.csv"), &ActiveProject::All).unwrap_err();
        assert!(matches!(err, HangarError::NoActiveProject));
    }
}
