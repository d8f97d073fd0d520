use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc, Weekday};

use super::task::{Task, HOURS_PER_DAY};

const MS_PER_DAY: f64 = 86_400_000.0;

/// Narrowest bar drawn for very short tasks, in pixels.
pub const MIN_BAR_WIDTH: f32 = 10.0;

/// Convert a day + hour offset to a horizontal pixel offset.
pub fn to_pixels(days: i64, hours: i64, day_width: f32) -> f32 {
    ((days * HOURS_PER_DAY + hours) as f32 / HOURS_PER_DAY as f32) * day_width
}

/// Fractional days elapsed between the project start (midnight UTC) and `now`.
///
/// Not rounded, so the today marker lands on the current hour.
pub fn today_offset_days(project_start: NaiveDate, now: DateTime<Utc>) -> f64 {
    let origin = project_start.and_time(NaiveTime::MIN).and_utc();
    (now - origin).num_milliseconds() as f64 / MS_PER_DAY
}

/// Calendar date shown above timeline column `column`.
///
/// The offset is applied to a noon timestamp so day arithmetic never lands on
/// a midnight boundary.
pub fn day_label(project_start: NaiveDate, column: u32) -> NaiveDate {
    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN);
    (project_start.and_time(noon) + chrono::Duration::days(i64::from(column))).date()
}

/// One-letter weekday initial for a header column.
pub fn weekday_initial(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "M",
        Weekday::Tue => "T",
        Weekday::Wed => "W",
        Weekday::Thu => "T",
        Weekday::Fri => "F",
        Weekday::Sat => "S",
        Weekday::Sun => "S",
    }
}

pub fn is_today_column(today_offset_days: f64, column: u32) -> bool {
    today_offset_days.floor() == f64::from(column)
}

/// Horizontal scroll offset that puts the today marker in the middle of the
/// visible width. Never negative.
pub fn centered_scroll_x(today_offset_days: f64, day_width: f32, visible_width: f32) -> f32 {
    (today_offset_days as f32 * day_width - visible_width / 2.0).max(0.0)
}

/// Pixel layout of the timeline grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineGeometry {
    /// Pixels per day column.
    pub day_width: f32,
    pub row_height: f32,
    pub header_height: f32,
}

impl Default for TimelineGeometry {
    fn default() -> Self {
        Self {
            day_width: 60.0,
            row_height: 48.0,
            header_height: 56.0,
        }
    }
}

impl TimelineGeometry {
    /// Left edge of a task bar relative to the grid origin.
    pub fn bar_x(&self, task: &Task) -> f32 {
        to_pixels(i64::from(task.start), i64::from(task.start_hour), self.day_width)
    }

    pub fn bar_width(&self, task: &Task) -> f32 {
        to_pixels(i64::from(task.duration), i64::from(task.duration_hours), self.day_width)
            .max(MIN_BAR_WIDTH)
    }

    /// Top edge of the row at absolute `index` within the task area.
    pub fn row_top(&self, index: usize) -> f32 {
        index as f32 * self.row_height
    }

    /// Full scrollable height for `count` rows plus the header.
    pub fn content_height(&self, count: usize) -> f32 {
        count as f32 * self.row_height + self.header_height
    }

    pub fn grid_width(&self, interval_days: u32) -> f32 {
        interval_days as f32 * self.day_width
    }

    pub fn today_x(&self, today_offset_days: f64) -> f32 {
        today_offset_days as f32 * self.day_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    #[test]
    fn today_offset_keeps_fractional_days() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 3, 12, 0, 0).unwrap();
        assert_relative_eq!(today_offset_days(start, now), 2.5);
    }

    #[test]
    fn today_offset_is_negative_before_start() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 9, 18, 0, 0).unwrap();
        assert_relative_eq!(today_offset_days(start, now), -0.25);
    }

    #[test]
    fn pixels_follow_hours() {
        assert_relative_eq!(to_pixels(2, 12, 60.0), 150.0);
        assert_relative_eq!(to_pixels(0, 0, 60.0), 0.0);
    }

    #[test]
    fn short_bars_get_minimum_width() {
        let geometry = TimelineGeometry::default();
        let task = Task::new("a", "a", "P").lasting(0, 1);
        assert_relative_eq!(geometry.bar_width(&task), MIN_BAR_WIDTH);
        let long = Task::new("b", "b", "P").starting_at(1, 6).lasting(2, 0);
        assert_relative_eq!(geometry.bar_x(&long), 75.0);
        assert_relative_eq!(geometry.bar_width(&long), 120.0);
    }

    #[test]
    fn day_labels_cross_month_and_year() {
        let start = NaiveDate::from_ymd_opt(2023, 12, 30).unwrap();
        assert_eq!(day_label(start, 0), start);
        assert_eq!(day_label(start, 2), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(weekday_initial(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()), "M");
    }

    #[test]
    fn centering_clamps_at_zero() {
        assert_relative_eq!(centered_scroll_x(10.0, 60.0, 800.0), 200.0);
        assert_relative_eq!(centered_scroll_x(2.0, 60.0, 800.0), 0.0);
        assert_relative_eq!(centered_scroll_x(-3.0, 60.0, 800.0), 0.0);
    }

    #[test]
    fn today_column_uses_floor() {
        assert!(is_today_column(2.5, 2));
        assert!(!is_today_column(2.5, 3));
        assert!(!is_today_column(-0.5, 0));
    }

    #[test]
    fn content_height_includes_header() {
        let geometry = TimelineGeometry::default();
        assert_relative_eq!(geometry.content_height(10), 536.0);
        assert_relative_eq!(geometry.row_top(3), 144.0);
        assert_relative_eq!(geometry.grid_width(30), 1800.0);
    }
}
