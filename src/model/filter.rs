use serde::{Deserialize, Serialize};

use super::task::Task;

/// Which project's tasks the chart shows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActiveProject {
    #[default]
    All,
    Named(String),
}

impl ActiveProject {
    pub fn name(&self) -> Option<&str> {
        match self {
            ActiveProject::All => None,
            ActiveProject::Named(name) => Some(name),
        }
    }

    pub fn includes(&self, task: &Task) -> bool {
        match self {
            ActiveProject::All => true,
            ActiveProject::Named(name) => task.project == *name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewFilter {
    #[default]
    All,
    /// Progress below 100.
    Pending,
    /// Tasks whose day span covers the current day.
    Today,
}

/// Narrowing applied to the task list before it reaches the windower.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub query: String,
    pub view: ViewFilter,
}

impl TaskFilter {
    /// Tasks of `active` that match the search and view filter, in order.
    ///
    /// `today_offset_days` is the fractional day offset of "now" from the
    /// active project's start; only `ViewFilter::Today` reads it.
    pub fn apply<'a>(
        &self,
        tasks: &'a [Task],
        active: &ActiveProject,
        today_offset_days: f64,
    ) -> Vec<&'a Task> {
        let query = self.query.trim().to_lowercase();
        let today = today_offset_days.floor() as i64;
        tasks
            .iter()
            .filter(|task| active.includes(task))
            .filter(|task| query.is_empty() || matches_query(task, &query))
            .filter(|task| match self.view {
                ViewFilter::All => true,
                ViewFilter::Pending => !task.is_complete(),
                ViewFilter::Today => {
                    let start = i64::from(task.start);
                    start <= today && start + i64::from(task.duration) >= today
                }
            })
            .collect()
    }
}

fn matches_query(task: &Task, query: &str) -> bool {
    [&task.title, &task.description, &task.id, &task.project]
        .iter()
        .any(|field| field.to_lowercase().contains(query))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tasks() -> Vec<Task> {
        vec![
            Task::new("1", "FUSELAGE INSPECTION", "A22").with_progress(100),
            Task::new("2", "Seat removal", "A22")
                .with_description("carpets and side panels")
                .starting_at(5, 8)
                .lasting(3, 4),
            Task::new("3", "G1000 upgrade", "B7").starting_at(8, 9).lasting(10, 0),
        ]
    }

    fn ids(tasks: Vec<&Task>) -> Vec<&str> {
        tasks.into_iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn project_selection_narrows_tasks() {
        let tasks = tasks();
        let filter = TaskFilter::default();
        let active = ActiveProject::Named("A22".into());
        assert_eq!(ids(filter.apply(&tasks, &active, 0.0)), vec!["1", "2"]);
        assert_eq!(filter.apply(&tasks, &ActiveProject::All, 0.0).len(), 3);
    }

    #[test]
    fn search_covers_description_and_project() {
        let tasks = tasks();
        let filter = TaskFilter { query: "CARPETS".into(), view: ViewFilter::All };
        assert_eq!(ids(filter.apply(&tasks, &ActiveProject::All, 0.0)), vec!["2"]);
        let filter = TaskFilter { query: "b7".into(), view: ViewFilter::All };
        assert_eq!(ids(filter.apply(&tasks, &ActiveProject::All, 0.0)), vec!["3"]);
    }

    #[test]
    fn pending_hides_completed_tasks() {
        let tasks = tasks();
        let filter = TaskFilter { query: String::new(), view: ViewFilter::Pending };
        assert_eq!(ids(filter.apply(&tasks, &ActiveProject::All, 0.0)), vec!["2", "3"]);
    }

    #[test]
    fn today_matches_inclusive_day_span() {
        let tasks = tasks();
        let filter = TaskFilter { query: String::new(), view: ViewFilter::Today };
        assert_eq!(ids(filter.apply(&tasks, &ActiveProject::All, 8.7)), vec!["2", "3"]);
        assert_eq!(ids(filter.apply(&tasks, &ActiveProject::All, 1.0)), vec!["1"]);
    }
}
