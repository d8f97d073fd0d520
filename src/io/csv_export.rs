use std::path::Path;

use crate::error::HangarResult;
use crate::model::Task;

use super::csv_import::DEPENDENCY_SEPARATOR;

const HEADER: [&str; 10] = [
    "ITEM#",
    "DISCREPANCY",
    "DESCRIPTION",
    "SKILL",
    "DIA INI",
    "START HOUR",
    "DIA DURACION",
    "ADD HOURS",
    "AVANCE",
    "DEPENDS ON",
];

/// Item number of `id` inside `project` (the id without its project prefix).
fn item_number<'a>(project: &str, id: &'a str) -> &'a str {
    id.strip_prefix(project)
        .and_then(|rest| rest.strip_prefix('-'))
        .unwrap_or(id)
}

/// Export tasks to a comma-delimited CSV the importer reads back.
///
/// Returns the number of tasks written.
pub fn export_csv(tasks: &[Task], path: &Path) -> HangarResult<usize> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    write_tasks(&mut wtr, tasks)?;
    Ok(tasks.len())
}

fn write_tasks<W: std::io::Write>(wtr: &mut csv::Writer<W>, tasks: &[Task]) -> HangarResult<()> {
    wtr.write_record(HEADER)?;
    for task in tasks {
        let dependencies = task
            .dependencies
            .iter()
            .map(|dep| item_number(&task.project, dep))
            .collect::<Vec<_>>()
            .join(&DEPENDENCY_SEPARATOR.to_string());
        let start = task.start.to_string();
        let start_hour = task.start_hour.to_string();
        let duration = task.duration.to_string();
        let duration_hours = task.duration_hours.to_string();
        let progress = task.progress.to_string();
        wtr.write_record([
            item_number(&task.project, &task.id),
            task.title.as_str(),
            task.description.as_str(),
            task.kind.tag(),
            start.as_str(),
            start_hour.as_str(),
            duration.as_str(),
            duration_hours.as_str(),
            progress.as_str(),
            dependencies.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
