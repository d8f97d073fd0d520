//! Single owner of the schedule state.
//!
//! Every edit produces a complete new [`ScheduleState`], runs propagation
//! over it when tasks changed, and swaps in a new `Arc<Snapshot>`. Readers
//! (the chart, the windower) hold the `Arc` they were given and never observe
//! a half-applied edit.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::engine::{self, demo, PropagationStatus};
use crate::error::{HangarError, HangarResult};
use crate::model::{ActiveProject, Project, ScheduleIndex, Task, TaskId};

/// Projects, tasks and the active selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleState {
    /// Projects keyed by name.
    pub projects: IndexMap<String, Project>,
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub active_project: ActiveProject,
}

impl ScheduleState {
    /// Demo state with the sample project selected.
    pub fn sample(today: NaiveDate) -> Self {
        let (project, tasks) = demo::sample_project(today);
        let name = project.name.clone();
        let mut projects = IndexMap::new();
        projects.insert(name.clone(), project);
        Self {
            projects,
            tasks,
            active_project: ActiveProject::Named(name),
        }
    }

    pub fn active(&self) -> Option<&Project> {
        self.active_project
            .name()
            .and_then(|name| self.projects.get(name))
    }

    /// Origin date of the visible timeline.
    ///
    /// The active project's start date, or the earliest project start when
    /// all projects are shown, or `today` when there is nothing to go on.
    pub fn timeline_start(&self, today: NaiveDate) -> NaiveDate {
        match &self.active_project {
            ActiveProject::Named(_) => self.active().map(|p| p.start_date).unwrap_or(today),
            ActiveProject::All => self
                .projects
                .values()
                .map(|p| p.start_date)
                .min()
                .unwrap_or(today),
        }
    }

    /// Visible timeline width in days.
    pub fn timeline_days(&self) -> u32 {
        self.active()
            .map(Project::timeline_days)
            .unwrap_or(crate::model::project::FALLBACK_INTERVAL_DAYS)
    }
}

/// An immutable, versioned view of the schedule.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub version: u64,
    pub state: ScheduleState,
    /// Outcome of the propagation run that produced `state.tasks`.
    pub status: PropagationStatus,
}

impl Snapshot {
    /// Dependencies of task `id` that belong to another project.
    pub fn cross_project_links(&self, id: &str) -> Vec<TaskId> {
        let index = ScheduleIndex::from_tasks(self.state.tasks.iter().cloned());
        index
            .get(id)
            .map(|task| {
                task.cross_project_dependencies(&index)
                    .into_iter()
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Owns the current snapshot and serializes all writes to it.
#[derive(Debug)]
pub struct SnapshotOwner {
    current: Arc<Snapshot>,
}

impl SnapshotOwner {
    pub fn new(state: ScheduleState) -> Self {
        let (state, status) = recompute(state);
        Self {
            current: Arc::new(Snapshot {
                version: 0,
                state,
                status,
            }),
        }
    }

    /// The latest completed snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current)
    }

    pub fn version(&self) -> u64 {
        self.current.version
    }

    /// Insert a task, or replace the one with the same id in place.
    pub fn upsert_task(&mut self, task: Task) -> Arc<Snapshot> {
        let mut state = self.current.state.clone();
        match state.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(existing) => *existing = task,
            None => state.tasks.push(task),
        }
        self.publish(state, true)
    }

    /// Remove a task. Dependencies pointing at it are left dangling and are
    /// ignored by propagation.
    pub fn remove_task(&mut self, id: &str) -> Arc<Snapshot> {
        let mut state = self.current.state.clone();
        state.tasks.retain(|t| t.id != id);
        self.publish(state, true)
    }

    /// Append a batch (for example a CSV import) and propagate once.
    pub fn import_tasks(&mut self, tasks: Vec<Task>) -> Arc<Snapshot> {
        let mut state = self.current.state.clone();
        info!(count = tasks.len(), "importing tasks");
        state.tasks.extend(tasks);
        self.publish(state, true)
    }

    pub fn upsert_project(&mut self, project: Project) -> Arc<Snapshot> {
        let mut state = self.current.state.clone();
        state.projects.insert(project.name.clone(), project);
        self.publish(state, false)
    }

    /// Delete a project together with all of its tasks.
    pub fn remove_project(&mut self, name: &str) -> Arc<Snapshot> {
        let mut state = self.current.state.clone();
        state.projects.shift_remove(name);
        state.tasks.retain(|t| t.project != name);
        if state.active_project.name() == Some(name) {
            state.active_project = ActiveProject::All;
        }
        self.publish(state, true)
    }

    pub fn set_active_project(&mut self, active: ActiveProject) -> HangarResult<Arc<Snapshot>> {
        if let Some(name) = active.name() {
            if !self.current.state.projects.contains_key(name) {
                return Err(HangarError::UnknownProject(name.to_string()));
            }
        }
        let mut state = self.current.state.clone();
        state.active_project = active;
        Ok(self.publish(state, false))
    }

    /// Replace the stress project with a fresh 1,000-task chain and select it.
    pub fn load_stress_unit(&mut self, today: NaiveDate) -> Arc<Snapshot> {
        let mut state = self.current.state.clone();
        state.tasks.retain(|t| t.project != demo::STRESS_PROJECT);
        state
            .tasks
            .extend(demo::stress_tasks(demo::STRESS_TASK_COUNT));
        state.projects.insert(
            demo::STRESS_PROJECT.to_string(),
            demo::stress_project(today),
        );
        state.active_project = ActiveProject::Named(demo::STRESS_PROJECT.to_string());
        self.publish(state, true)
    }

    /// Swap in a state received from outside (remote change, file load).
    pub fn replace_from_remote(&mut self, state: ScheduleState) -> Arc<Snapshot> {
        self.publish(state, true)
    }

    /// Task ids referenced as dependencies but absent from the snapshot.
    pub fn dangling_dependencies(&self) -> Vec<(TaskId, TaskId)> {
        let tasks = &self.current.state.tasks;
        let known: HashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        let known = &known;
        tasks
            .iter()
            .flat_map(move |task| {
                task.dependencies
                    .iter()
                    .filter(move |dep| !known.contains(dep.as_str()))
                    .map(move |dep| (task.id.clone(), dep.clone()))
            })
            .collect()
    }

    fn publish(&mut self, state: ScheduleState, tasks_changed: bool) -> Arc<Snapshot> {
        let (state, status) = if tasks_changed {
            recompute(state)
        } else {
            (state, self.current.status.clone())
        };
        let version = self.current.version + 1;
        debug!(version, tasks = state.tasks.len(), "publishing snapshot");
        self.current = Arc::new(Snapshot {
            version,
            state,
            status,
        });
        self.snapshot()
    }
}

fn recompute(mut state: ScheduleState) -> (ScheduleState, PropagationStatus) {
    let result = engine::propagate(&state.tasks);
    state.tasks = result.tasks;
    (state, result.status)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn edits_bump_version_and_keep_old_snapshots_intact() {
        let mut owner = SnapshotOwner::new(ScheduleState::sample(today()));
        let before = owner.snapshot();

        let moved = before.state.tasks[0].clone().lasting(7, 0);
        let after = owner.upsert_task(moved);

        assert_eq!(after.version, before.version + 1);
        assert_eq!(before.state.tasks[0].duration, 5);
        assert_eq!(after.state.tasks[0].duration, 7);
        // task 2 was pushed behind the longer task 1
        assert_eq!(after.state.tasks[1].start_instant(), 7 + 7 * 24);
    }

    #[test]
    fn removing_a_project_drops_its_tasks_and_selection() {
        let mut owner = SnapshotOwner::new(ScheduleState::sample(today()));
        let snap = owner.remove_project(demo::SAMPLE_PROJECT);
        assert!(snap.state.tasks.is_empty());
        assert!(snap.state.projects.is_empty());
        assert_eq!(snap.state.active_project, ActiveProject::All);
    }

    #[test]
    fn unknown_project_cannot_be_selected() {
        let mut owner = SnapshotOwner::new(ScheduleState::default());
        let err = owner
            .set_active_project(ActiveProject::Named("NOPE".into()))
            .unwrap_err();
        assert!(matches!(err, HangarError::UnknownProject(name) if name == "NOPE"));
        assert_eq!(owner.version(), 0);
    }

    #[test]
    fn stress_unit_replaces_previous_run() {
        let mut owner = SnapshotOwner::new(ScheduleState::sample(today()));
        owner.load_stress_unit(today());
        let snap = owner.load_stress_unit(today());
        assert_eq!(snap.state.tasks.len(), 3 + demo::STRESS_TASK_COUNT);
        assert_eq!(snap.status, PropagationStatus::Settled);
        assert_eq!(
            snap.state.active_project,
            ActiveProject::Named(demo::STRESS_PROJECT.into())
        );
    }

    #[test]
    fn timeline_start_for_all_projects_is_the_earliest() {
        let mut state = ScheduleState::sample(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        let early = Project::new("EARLY", NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        state.projects.insert(early.name.clone(), early);
        state.active_project = ActiveProject::All;
        assert_eq!(
            state.timeline_start(today()),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        );
        assert_eq!(state.timeline_days(), crate::model::project::FALLBACK_INTERVAL_DAYS);
    }

    #[test]
    fn cross_project_links_follow_the_hovered_task() {
        let mut owner = SnapshotOwner::new(ScheduleState::sample(today()));
        let paint = Task::new("B7-1", "PAINT", "B7").depends_on(["3", "missing"]);
        let snap = owner.upsert_task(paint);

        assert_eq!(snap.cross_project_links("B7-1"), vec!["3".to_string()]);
        assert!(snap.cross_project_links("2").is_empty());
        assert!(snap.cross_project_links("nope").is_empty());
    }

    #[test]
    fn dangling_dependencies_after_removal() {
        let mut owner = SnapshotOwner::new(ScheduleState::sample(today()));
        owner.remove_task("1");
        assert_eq!(
            owner.dangling_dependencies(),
            vec![("2".to_string(), "1".to_string())]
        );
    }
}
