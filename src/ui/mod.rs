pub mod gantt_chart;
pub mod sidebar;
pub mod theme;
pub mod toolbar;
