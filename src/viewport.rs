//! Virtualized row windowing for the timeline.
//!
//! Only the rows intersecting the scrolled viewport (plus a buffer) are
//! handed to the renderer. Each row keeps its absolute index so it can be
//! placed at the same y offset no matter where the slice starts.

use chrono::NaiveDate;
use tracing::trace;

use crate::model::timeline::centered_scroll_x;

/// Row metrics the windower needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowLayout {
    pub row_height: f32,
    pub header_height: f32,
    /// Extra rows kept above and below the viewport.
    pub buffer: usize,
}

impl Default for RowLayout {
    fn default() -> Self {
        Self {
            row_height: 48.0,
            header_height: 56.0,
            buffer: 5,
        }
    }
}

/// Vertical scroll position and measured container height, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    pub scroll_top: f32,
    pub viewport_height: f32,
}

/// A row to draw, with its index in the full list.
#[derive(Debug, Clone, Copy)]
pub struct VisibleRow<'a, T> {
    pub index: usize,
    pub item: &'a T,
}

/// Borrowed slice `[first_index, last_index)` of the full list.
#[derive(Debug, Clone, Copy)]
pub struct VisibleWindow<'a, T> {
    pub first_index: usize,
    pub last_index: usize,
    slice: &'a [T],
}

impl<'a, T> VisibleWindow<'a, T> {
    pub fn slice(&self) -> &'a [T] {
        self.slice
    }

    pub fn len(&self) -> usize {
        self.slice.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slice.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = VisibleRow<'a, T>> + 'a {
        let first = self.first_index;
        self.slice
            .iter()
            .enumerate()
            .map(move |(offset, item)| VisibleRow {
                index: first + offset,
                item,
            })
    }
}

/// Rows to render for the current scroll position.
///
/// Runs in time proportional to the window, not the list, and allocates
/// nothing.
pub fn compute_visible_window<T>(
    items: &[T],
    scroll: ScrollState,
    layout: RowLayout,
) -> VisibleWindow<'_, T> {
    let len = items.len();
    if len == 0 || layout.row_height <= 0.0 {
        return VisibleWindow {
            first_index: 0,
            last_index: 0,
            slice: &items[..0],
        };
    }

    let buffer = layout.buffer as i64;
    let first = ((scroll.scroll_top - layout.header_height) / layout.row_height).floor() as i64 - buffer;
    let last = ((scroll.scroll_top + scroll.viewport_height) / layout.row_height).ceil() as i64 + buffer;

    let last_index = last.clamp(0, len as i64) as usize;
    let first_index = (first.max(0) as usize).min(last_index);

    VisibleWindow {
        first_index,
        last_index,
        slice: &items[first_index..last_index],
    }
}

/// Centers the timeline on "now" once per project / start-date change.
#[derive(Debug, Default)]
pub struct AutoCenter {
    last: Option<(Option<String>, NaiveDate)>,
}

impl AutoCenter {
    /// Returns the horizontal offset to apply when `project` or `start_date`
    /// differs from the previous call, `None` otherwise.
    pub fn update(
        &mut self,
        project: Option<&str>,
        start_date: NaiveDate,
        today_offset_days: f64,
        day_width: f32,
        visible_width: f32,
    ) -> Option<f32> {
        let key = (project.map(str::to_owned), start_date);
        if self.last.as_ref() == Some(&key) {
            return None;
        }
        self.last = Some(key);
        let offset = centered_scroll_x(today_offset_days, day_width, visible_width);
        trace!(?project, %start_date, offset, "recentering timeline");
        Some(offset)
    }

    /// Forget the last key so the next update recenters.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn top_of_list_window() {
        let items = rows(1_000);
        let window = compute_visible_window(
            &items,
            ScrollState { scroll_top: 0.0, viewport_height: 800.0 },
            RowLayout::default(),
        );
        assert_eq!(window.first_index, 0);
        assert_eq!(window.last_index, 22);
        assert_eq!(window.len(), 22);
    }

    #[test]
    fn rows_carry_absolute_indices() {
        let items = rows(1_000);
        let window = compute_visible_window(
            &items,
            ScrollState { scroll_top: 24_000.0, viewport_height: 800.0 },
            RowLayout::default(),
        );
        assert_eq!(window.first_index, 493);
        assert_eq!(window.last_index, 522);
        let indices: Vec<usize> = window.rows().map(|r| r.index).collect();
        assert_eq!(indices.first(), Some(&493));
        assert!(window.rows().all(|r| *r.item == r.index));
    }

    #[test]
    fn window_clamps_to_list_end() {
        let items = rows(30);
        let window = compute_visible_window(
            &items,
            ScrollState { scroll_top: 1_000.0, viewport_height: 800.0 },
            RowLayout::default(),
        );
        assert_eq!(window.last_index, 30);
        assert_eq!(window.first_index, 14);
    }

    #[test]
    fn scrolled_past_the_end_yields_empty_window() {
        let items = rows(10);
        let window = compute_visible_window(
            &items,
            ScrollState { scroll_top: 10_000.0, viewport_height: 500.0 },
            RowLayout::default(),
        );
        assert!(window.is_empty());
        assert_eq!(window.first_index, window.last_index);
    }

    #[test]
    fn degenerate_inputs_are_empty() {
        let empty: Vec<usize> = Vec::new();
        let window = compute_visible_window(&empty, ScrollState::default(), RowLayout::default());
        assert!(window.is_empty());

        let items = rows(10);
        let layout = RowLayout { row_height: 0.0, ..RowLayout::default() };
        assert!(compute_visible_window(&items, ScrollState::default(), layout).is_empty());
    }

    #[test]
    fn auto_center_fires_once_per_change() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut center = AutoCenter::default();
        assert_eq!(center.update(Some("A22"), start, 10.0, 60.0, 800.0), Some(200.0));
        assert_eq!(center.update(Some("A22"), start, 11.0, 60.0, 800.0), None);
        assert_eq!(center.update(Some("B7"), start, 1.0, 60.0, 800.0), Some(0.0));

        let later = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert!(center.update(Some("B7"), later, 1.0, 60.0, 800.0).is_some());

        center.reset();
        assert!(center.update(Some("B7"), later, 1.0, 60.0, 800.0).is_some());
    }
}
