//! Built-in sample and stress-test schedules.

use chrono::NaiveDate;

use crate::model::{Project, Task, TaskKind};

pub const SAMPLE_PROJECT: &str = "UNIT-A22";
pub const STRESS_PROJECT: &str = "STRESS-UNIT";
/// Documented stress-test size for the timeline.
pub const STRESS_TASK_COUNT: usize = 1_000;

/// A small three-task inspection chain on a B737.
pub fn sample_project(start_date: NaiveDate) -> (Project, Vec<Task>) {
    let project = Project {
        customer: "X-TREME AVIATION".to_string(),
        ac: "B737-800".to_string(),
        wo: "WO-9988".to_string(),
        interval_days: 30,
        ..Project::new(SAMPLE_PROJECT, start_date)
    };

    let tasks = vec![
        Task::new("1", "FUSELAGE STRUCTURAL INSPECTION", SAMPLE_PROJECT)
            .with_description("Full rivet and access panel review per maintenance manual.")
            .with_kind(TaskKind::Airframe)
            .starting_at(0, 7)
            .lasting(5, 0)
            .with_progress(100),
        Task::new("2", "INTERIOR REMOVAL", SAMPLE_PROJECT)
            .with_description("Remove seats, carpets and side panels for wiring access.")
            .with_kind(TaskKind::Interior)
            .starting_at(5, 8)
            .lasting(3, 4)
            .with_progress(60)
            .depends_on(["1"]),
        Task::new("3", "G1000 AVIONICS UPGRADE", SAMPLE_PROJECT)
            .with_description("Install new displays and configure the navigation suite.")
            .with_kind(TaskKind::Avionics)
            .starting_at(8, 9)
            .lasting(10, 0)
            .with_progress(10)
            .depends_on(["2"]),
    ];

    (project, tasks)
}

/// `count` chained tasks for exercising the windower and the engine.
///
/// Each task depends on the previous one; progress is deterministic.
pub fn stress_tasks(count: usize) -> Vec<Task> {
    (0..count)
        .map(|i| {
            let task = Task::new(
                format!("stress-{i}"),
                format!("AUTOMATED TASK #{i}"),
                STRESS_PROJECT,
            )
            .with_description(format!("Standard verification procedure for task #{i}."))
            .with_kind(TaskKind::ALL[i % TaskKind::ALL.len()])
            .starting_at((i / 10) as i32, 8)
            .lasting(2 + (i % 5) as i32, 0)
            .with_progress(((i * 37) % 101) as u8);
            if i > 0 {
                task.depends_on([format!("stress-{}", i - 1)])
            } else {
                task
            }
        })
        .collect()
}

pub fn stress_project(start_date: NaiveDate) -> Project {
    Project {
        customer: "INTERNAL".to_string(),
        ac: "BENCHMARK".to_string(),
        wo: "WO-STRESS".to_string(),
        interval_days: 100,
        ..Project::new(STRESS_PROJECT, start_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stress_tasks_form_a_single_chain() {
        let tasks = stress_tasks(4);
        assert_eq!(tasks[0].dependencies, Vec::<String>::new());
        assert_eq!(tasks[3].dependencies, vec!["stress-2".to_string()]);
        assert_eq!(tasks[3].kind, TaskKind::SheetMetal);
        assert!(tasks.iter().all(|t| t.progress <= 100));
    }

    #[test]
    fn sample_avionics_upgrade_waits_for_interior() {
        let (_, tasks) = sample_project(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let result = crate::engine::propagate(&tasks);
        assert!(result.is_settled());
        assert_eq!(result.tasks[1], tasks[1]);
        // interior ends at 128 + 76 = 204 hours
        assert_eq!((result.tasks[2].start, result.tasks[2].start_hour), (8, 12));
    }
}
