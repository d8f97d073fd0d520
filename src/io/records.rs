//! Row shapes used by the external record store.
//!
//! Columns are snake_cased analogues of the model fields. Optional project
//! metadata and missing task lists default to empty instead of failing.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::{ActiveProject, Project, Task, TaskKind};
use crate::snapshot::ScheduleState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub start: i32,
    #[serde(default)]
    pub start_hour: i32,
    pub duration: i32,
    #[serde(default)]
    pub duration_hours: i32,
    #[serde(default)]
    pub progress: i32,
    pub project: String,
    #[serde(default)]
    pub dependencies: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub name: String,
    #[serde(default)]
    pub customer: String,
    #[serde(default)]
    pub ac: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub msn: Option<String>,
    #[serde(default)]
    pub wo: String,
    #[serde(default)]
    pub lp: Option<String>,
    #[serde(default)]
    pub pm: Option<String>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub interval_days: u32,
}

impl From<TaskRecord> for Task {
    fn from(row: TaskRecord) -> Self {
        Task {
            id: row.id,
            title: row.title,
            description: row.description.unwrap_or_default(),
            kind: TaskKind::from_tag(&row.kind),
            start: row.start,
            start_hour: row.start_hour,
            duration: row.duration,
            duration_hours: row.duration_hours,
            progress: row.progress.clamp(0, 100) as u8,
            project: row.project,
            dependencies: row.dependencies.unwrap_or_default(),
        }
    }
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        TaskRecord {
            id: task.id.clone(),
            title: task.title.clone(),
            description: Some(task.description.clone()),
            kind: task.kind.tag().to_string(),
            start: task.start,
            start_hour: task.start_hour,
            duration: task.duration,
            duration_hours: task.duration_hours,
            progress: i32::from(task.progress),
            project: task.project.clone(),
            dependencies: Some(task.dependencies.clone()),
        }
    }
}

impl From<ProjectRecord> for Project {
    fn from(row: ProjectRecord) -> Self {
        Project {
            name: row.name,
            customer: row.customer,
            ac: row.ac,
            model: row.model.unwrap_or_default(),
            msn: row.msn.unwrap_or_default(),
            wo: row.wo,
            lp: row.lp.unwrap_or_default(),
            pm: row.pm.unwrap_or_default(),
            start_date: row.start_date,
            interval_days: row.interval_days,
        }
    }
}

impl From<&Project> for ProjectRecord {
    fn from(project: &Project) -> Self {
        let optional = |s: &str| (!s.is_empty()).then(|| s.to_string());
        ProjectRecord {
            name: project.name.clone(),
            customer: project.customer.clone(),
            ac: project.ac.clone(),
            model: optional(&project.model),
            msn: optional(&project.msn),
            wo: project.wo.clone(),
            lp: optional(&project.lp),
            pm: optional(&project.pm),
            start_date: project.start_date,
            interval_days: project.interval_days,
        }
    }
}

/// Assemble a state from store rows. The first project becomes active;
/// without projects everything is shown.
pub fn state_from_records(projects: Vec<ProjectRecord>, tasks: Vec<TaskRecord>) -> ScheduleState {
    let projects: IndexMap<String, Project> = projects
        .into_iter()
        .map(|row| (row.name.clone(), Project::from(row)))
        .collect();
    let active_project = projects
        .keys()
        .next()
        .map(|name| ActiveProject::Named(name.clone()))
        .unwrap_or_default();
    ScheduleState {
        projects,
        tasks: tasks.into_iter().map(Task::from).collect(),
        active_project,
    }
}

/// Flatten a state back into store rows.
pub fn records_from_state(state: &ScheduleState) -> (Vec<ProjectRecord>, Vec<TaskRecord>) {
    (
        state.projects.values().map(ProjectRecord::from).collect(),
        state.tasks.iter().map(TaskRecord::from).collect(),
    )
}
