//! Dependency-driven schedule propagation.
//!
//! A task may not start before every dependency has ended. The engine
//! deduplicates the input by id, resolves dependency ids once, then relaxes
//! start instants pass by pass until nothing moves or the pass cap is hit.
//!
//! The input slice is never touched; the result owns fresh task records.

use tracing::{debug, warn};

use crate::model::{ScheduleIndex, Task, TaskId};

use super::cycles;

/// Upper bound on relaxation passes.
pub const MAX_PASSES: usize = 100;

/// How a propagation run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropagationStatus {
    /// Every resolvable dependency constraint holds.
    Settled,
    /// The pass cap was reached with constraints still violated.
    Partial { pending: Vec<TaskId> },
    /// Some tasks sit on (or behind) a dependency cycle. `pending` lists the
    /// tasks still violating a constraint when the run stopped.
    Cyclic {
        unresolved: Vec<TaskId>,
        pending: Vec<TaskId>,
    },
}

/// Outcome of [`propagate`]: the corrected task set plus diagnostics.
#[derive(Debug, Clone)]
pub struct Propagation {
    /// Deduplicated tasks, in first-occurrence order.
    pub tasks: Vec<Task>,
    /// Relaxation passes executed, including the final quiet pass.
    pub passes: usize,
    pub status: PropagationStatus,
}

impl Propagation {
    pub fn is_settled(&self) -> bool {
        self.status == PropagationStatus::Settled
    }

    /// Ids of tasks that still start before one of their dependencies ends.
    pub fn violations(&self) -> &[TaskId] {
        match &self.status {
            PropagationStatus::Settled => &[],
            PropagationStatus::Partial { pending } => pending,
            PropagationStatus::Cyclic { pending, .. } => pending,
        }
    }
}

/// Push dependent tasks forward so none starts before its dependencies end.
pub fn propagate(tasks: &[Task]) -> Propagation {
    propagate_with_cap(tasks, MAX_PASSES)
}

/// [`propagate`] with an explicit pass cap.
pub fn propagate_with_cap(tasks: &[Task], max_passes: usize) -> Propagation {
    let index = ScheduleIndex::from_tasks(tasks.iter().cloned());
    let dependencies = index.dependency_positions();
    let unresolved = cycles::unresolved_positions(&dependencies);
    let mut working = index.into_tasks();

    let mut passes = 0;
    let mut changed = true;
    while changed && passes < max_passes {
        changed = false;
        passes += 1;
        for i in 0..working.len() {
            if working[i].dependencies.is_empty() {
                continue;
            }
            let gate = dependency_gate(&working, &dependencies[i]);
            if working[i].start_instant() < gate {
                working[i].set_start_instant(gate);
                changed = true;
            }
        }
    }

    let pending: Vec<TaskId> = working
        .iter()
        .zip(&dependencies)
        .filter(|(task, deps)| {
            !task.dependencies.is_empty() && task.start_instant() < dependency_gate(&working, deps)
        })
        .map(|(task, _)| task.id.clone())
        .collect();

    let status = if !unresolved.is_empty() {
        let unresolved: Vec<TaskId> = unresolved.iter().map(|&i| working[i].id.clone()).collect();
        warn!(
            unresolved = unresolved.len(),
            pending = pending.len(),
            passes,
            "dependency cycle left part of the schedule unresolved"
        );
        PropagationStatus::Cyclic { unresolved, pending }
    } else if !pending.is_empty() {
        warn!(
            pending = pending.len(),
            passes, "pass cap reached before the schedule settled"
        );
        PropagationStatus::Partial { pending }
    } else {
        PropagationStatus::Settled
    };

    debug!(input = tasks.len(), tasks = working.len(), passes, "schedule propagated");

    Propagation {
        tasks: working,
        passes,
        status,
    }
}

/// Latest end instant among the resolved dependencies, never below zero.
fn dependency_gate(tasks: &[Task], dependencies: &[usize]) -> i64 {
    dependencies
        .iter()
        .map(|&j| tasks[j].end_instant())
        .fold(0, i64::max)
}
