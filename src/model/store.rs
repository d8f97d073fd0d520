use indexmap::IndexMap;

use super::task::{Task, TaskId};

/// Deduplicated, id-indexed view of a task list.
///
/// Tasks are inserted in input order. A later task with an id already seen
/// replaces the stored value but keeps the position of the first occurrence.
#[derive(Debug, Clone, Default)]
pub struct ScheduleIndex {
    tasks: IndexMap<TaskId, Task>,
}

impl ScheduleIndex {
    pub fn from_tasks<I>(tasks: I) -> Self
    where
        I: IntoIterator<Item = Task>,
    {
        let mut map = IndexMap::new();
        for task in tasks {
            map.insert(task.id.clone(), task);
        }
        Self { tasks: map }
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Position of `id` in iteration order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.tasks.get_index_of(id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    /// For every task, the positions of the dependencies that resolve.
    /// Unknown ids are dropped.
    pub fn dependency_positions(&self) -> Vec<Vec<usize>> {
        self.tasks
            .values()
            .map(|task| {
                task.dependencies
                    .iter()
                    .filter_map(|id| self.position(id))
                    .collect()
            })
            .collect()
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks.into_values().collect()
    }
}
