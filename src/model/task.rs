use serde::{Deserialize, Serialize};

use super::store::ScheduleIndex;

pub type TaskId = String;

pub const HOURS_PER_DAY: i64 = 24;

/// Maintenance discipline a task belongs to.
///
/// Serialized with the short shop tags used by the persistence and import
/// collaborators; the long names are accepted on input. Anything else loads
/// as `Unknown` and renders with the neutral color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskKind {
    #[default]
    #[serde(rename = "AP", alias = "AIRFRAME", alias = "A&P")]
    Airframe,
    #[serde(rename = "INT", alias = "INTERIOR")]
    Interior,
    #[serde(rename = "AVI", alias = "AVIONICS")]
    Avionics,
    #[serde(rename = "SM", alias = "SHEET-METAL")]
    SheetMetal,
    #[serde(other)]
    Unknown,
}

impl TaskKind {
    pub const ALL: [TaskKind; 4] = [
        TaskKind::Airframe,
        TaskKind::Interior,
        TaskKind::Avionics,
        TaskKind::SheetMetal,
    ];

    /// Parse a free-form tag as typed in a spreadsheet or form.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_uppercase().as_str() {
            "AP" | "A&P" | "AIRFRAME" => TaskKind::Airframe,
            "INT" | "INTERIOR" => TaskKind::Interior,
            "AVI" | "AVIONICS" => TaskKind::Avionics,
            "SM" | "SHEET-METAL" | "SHEET METAL" => TaskKind::SheetMetal,
            _ => TaskKind::Unknown,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            TaskKind::Airframe => "AP",
            TaskKind::Interior => "INT",
            TaskKind::Avionics => "AVI",
            TaskKind::SheetMetal => "SM",
            TaskKind::Unknown => "?",
        }
    }
}

/// A single maintenance task on a project timeline.
///
/// `start` and `duration` are whole days relative to the owning project's
/// start date; `start_hour` and `duration_hours` refine them to the hour.
/// Range checks are the job of whoever builds the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: TaskKind,
    pub start: i32,
    #[serde(default)]
    pub start_hour: i32,
    pub duration: i32,
    #[serde(default)]
    pub duration_hours: i32,
    /// Percent complete, 0..=100.
    #[serde(default)]
    pub progress: u8,
    pub project: String,
    /// Ids of tasks that must end before this one may start.
    #[serde(default)]
    pub dependencies: Vec<TaskId>,
}

impl Task {
    /// Create a one-day task starting at day 0, hour 0.
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            kind: TaskKind::default(),
            start: 0,
            start_hour: 0,
            duration: 1,
            duration_hours: 0,
            progress: 0,
            project: project.into(),
            dependencies: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: TaskKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn starting_at(mut self, day: i32, hour: i32) -> Self {
        self.start = day;
        self.start_hour = hour;
        self
    }

    pub fn lasting(mut self, days: i32, hours: i32) -> Self {
        self.duration = days;
        self.duration_hours = hours;
        self
    }

    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = progress;
        self
    }

    pub fn depends_on<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<TaskId>,
    {
        self.dependencies.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Hours since project start at which the task begins.
    pub fn start_instant(&self) -> i64 {
        i64::from(self.start) * HOURS_PER_DAY + i64::from(self.start_hour)
    }

    /// Length of the task in hours.
    pub fn span_hours(&self) -> i64 {
        i64::from(self.duration) * HOURS_PER_DAY + i64::from(self.duration_hours)
    }

    /// Hours since project start at which the task ends.
    pub fn end_instant(&self) -> i64 {
        self.start_instant() + self.span_hours()
    }

    /// Move the task so it begins at `instant` hours since project start.
    ///
    /// The day saturates at the `i32` range instead of wrapping.
    pub fn set_start_instant(&mut self, instant: i64) {
        let day = instant.div_euclid(HOURS_PER_DAY);
        self.start = i32::try_from(day).unwrap_or(if day < 0 { i32::MIN } else { i32::MAX });
        self.start_hour = instant.rem_euclid(HOURS_PER_DAY) as i32;
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 100
    }

    /// Dependencies that resolve to a task of another project.
    ///
    /// The engine does not restrict links by project; this lets the caller
    /// decide whether such links are intended.
    pub fn cross_project_dependencies<'a>(&'a self, index: &'a ScheduleIndex) -> Vec<&'a str> {
        self.dependencies
            .iter()
            .filter_map(|id| index.get(id))
            .filter(|dep| dep.project != self.project)
            .map(|dep| dep.id.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instants_combine_days_and_hours() {
        let task = Task::new("A", "Fuselage", "UNIT").starting_at(0, 7).lasting(5, 0);
        assert_eq!(task.start_instant(), 7);
        assert_eq!(task.end_instant(), 127);

        let b = Task::new("B", "Interior", "UNIT").starting_at(5, 8).lasting(3, 4);
        assert_eq!(b.start_instant(), 128);
        assert_eq!(b.end_instant(), 128 + 76);
    }

    #[test]
    fn set_start_instant_splits_into_day_and_hour() {
        let mut task = Task::new("A", "x", "UNIT");
        task.set_start_instant(127);
        assert_eq!((task.start, task.start_hour), (5, 7));
    }

    #[test]
    fn set_start_instant_saturates_out_of_range_days() {
        let mut task = Task::new("A", "x", "UNIT");
        task.set_start_instant(i64::from(i32::MAX) * HOURS_PER_DAY + 30);
        assert_eq!(task.start, i32::MAX);
        task.set_start_instant(i64::from(i32::MIN) * HOURS_PER_DAY - 1);
        assert_eq!(task.start, i32::MIN);
    }

    #[test]
    fn kind_tags_parse_short_and_long_forms() {
        assert_eq!(TaskKind::from_tag("a&p"), TaskKind::Airframe);
        assert_eq!(TaskKind::from_tag("AVIONICS"), TaskKind::Avionics);
        assert_eq!(TaskKind::from_tag(" sm "), TaskKind::SheetMetal);
        assert_eq!(TaskKind::from_tag("paint"), TaskKind::Unknown);
    }

    #[test]
    fn unknown_kind_deserializes_without_error() {
        let json = r#"{"id":"1","title":"t","type":"PAINT","start":0,"duration":1,"project":"P"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.kind, TaskKind::Unknown);
        assert!(task.dependencies.is_empty());
        assert_eq!(task.description, "");
    }

    #[test]
    fn kind_serializes_as_shop_tag() {
        let task = Task::new("1", "t", "P").with_kind(TaskKind::Interior);
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["type"], "INT");
        assert_eq!(json["startHour"], 0);
        assert_eq!(json["durationHours"], 0);
    }

    #[test]
    fn cross_project_links_are_reported() {
        let index = ScheduleIndex::from_tasks(vec![
            Task::new("a", "a", "P1"),
            Task::new("b", "b", "P2"),
            Task::new("c", "c", "P1").depends_on(["a", "b", "missing"]),
        ]);
        let c = index.get("c").unwrap();
        assert_eq!(c.cross_project_dependencies(&index), vec!["b"]);
    }
}
