use hangar_gantt::engine::demo::{stress_tasks, STRESS_TASK_COUNT};
use hangar_gantt::engine::propagate;
use hangar_gantt::model::{ActiveProject, TaskFilter};
use hangar_gantt::viewport::{compute_visible_window, RowLayout, ScrollState};

#[test]
fn stress_schedule_renders_a_small_window() {
    let tasks = propagate(&stress_tasks(STRESS_TASK_COUNT)).tasks;
    let visible = TaskFilter::default().apply(&tasks, &ActiveProject::All, 0.0);

    let window = compute_visible_window(
        &visible,
        ScrollState {
            scroll_top: 0.0,
            viewport_height: 800.0,
        },
        RowLayout::default(),
    );
    assert_eq!((window.first_index, window.last_index), (0, 22));
    assert_eq!(window.len(), 22);
}

#[test]
fn rows_keep_their_index_in_the_full_list() {
    let tasks = stress_tasks(STRESS_TASK_COUNT);
    let window = compute_visible_window(
        &tasks,
        ScrollState {
            scroll_top: 24_000.0,
            viewport_height: 800.0,
        },
        RowLayout::default(),
    );

    let rows: Vec<_> = window.rows().collect();
    assert_eq!(rows.first().map(|r| r.index), Some(493));
    assert_eq!(rows.last().map(|r| r.index), Some(521));
    for row in rows {
        assert_eq!(row.item.id, format!("stress-{}", row.index));
    }
}
