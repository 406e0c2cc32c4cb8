//! Board layout in logical pixels, shared by the scene builder and
//! hit-testing so the two can never disagree about where a bar is.

use egui::{pos2, vec2, Pos2, Rect};

use super::mapper::CoordinateMapper;
use crate::model::Task;

pub const HEADER_HEIGHT: f32 = 80.0;
/// Gap between the header band and row 0.
pub const PADDING: f32 = 20.0;
pub const TASK_HEIGHT: f32 = 32.0;
pub const SPACING: f32 = 8.0;
pub const ROW_PITCH: f32 = TASK_HEIGHT + SPACING;
/// Bars never shrink below this, so short tasks stay clickable.
pub const MIN_TASK_WIDTH: f32 = 120.0;

pub const BAR_ROUNDING: f32 = 8.0;
pub const MARKER_RADIUS: f32 = 3.0;
/// Critical marker center, measured from the bar's top-right corner.
const MARKER_INSET_X: f32 = 15.0;
const MARKER_INSET_Y: f32 = 10.0;

/// Top edge of a bar on `row`.
pub fn row_top(row: u32) -> f32 {
    HEADER_HEIGHT + PADDING + row as f32 * ROW_PITCH
}

/// Row under a pointer at `y`; anything above row 0 resolves to row 0.
pub fn row_at(y: f32) -> u32 {
    let row = ((y - HEADER_HEIGHT - PADDING) / ROW_PITCH).floor();
    if row.is_finite() && row > 0.0 {
        row as u32
    } else {
        0
    }
}

/// Screen rectangle of `task` under the current mapping.
pub fn resolve_task_rect(task: &Task, mapper: &CoordinateMapper<'_>) -> Rect {
    let start_x = mapper.date_to_x(task.start);
    let end_x = mapper.date_to_x(task.end);
    let width = (end_x - start_x).max(MIN_TASK_WIDTH as f64);
    Rect::from_min_size(
        pos2(start_x as f32, row_top(task.row_index())),
        vec2(width as f32, TASK_HEIGHT),
    )
}

pub fn critical_marker_center(bar: Rect) -> Pos2 {
    pos2(bar.right() - MARKER_INSET_X, bar.top() + MARKER_INSET_Y)
}

/// First task in store order whose rectangle contains `pos`.
pub fn hit_test<'t>(tasks: &'t [Task], mapper: &CoordinateMapper<'_>, pos: Pos2) -> Option<&'t Task> {
    tasks
        .iter()
        .find(|task| resolve_task_rect(task, mapper).contains(pos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TimelineConfig;
    use chrono::{NaiveDate, NaiveDateTime};

    fn jan(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap()
    }

    fn config() -> TimelineConfig {
        TimelineConfig::starting(jan(1).date())
    }

    #[test]
    fn bar_rect_matches_layout() {
        let config = config();
        let mapper = CoordinateMapper::new(&config, 1.0, 0.0);
        let mut task = Task::new("Build", jan(2), jan(6));
        task.row = Some(2);
        let rect = resolve_task_rect(&task, &mapper);
        assert_eq!(rect.left(), 100.0);
        assert_eq!(rect.width(), 400.0);
        assert_eq!(rect.top(), 80.0 + 20.0 + 2.0 * 40.0);
        assert_eq!(rect.height(), TASK_HEIGHT);
    }

    #[test]
    fn short_and_inverted_tasks_get_minimum_width() {
        let config = config();
        let mapper = CoordinateMapper::new(&config, 1.0, 0.0);
        let short = Task::new("Blip", jan(2), jan(2) + chrono::Duration::hours(1));
        assert_eq!(resolve_task_rect(&short, &mapper).width(), MIN_TASK_WIDTH);
        let inverted = Task::new("Backwards", jan(5), jan(2));
        assert_eq!(resolve_task_rect(&inverted, &mapper).width(), MIN_TASK_WIDTH);
    }

    #[test]
    fn row_at_floors_and_clamps() {
        assert_eq!(row_at(90.0), 0);
        assert_eq!(row_at(0.0), 0);
        assert_eq!(row_at(f32::NAN), 0);
        assert_eq!(row_at(row_top(0)), 0);
        assert_eq!(row_at(row_top(3) + 1.0), 3);
        assert_eq!(row_at(row_top(3) - 1.0), 2);
    }

    #[test]
    fn hit_test_first_match_in_store_order() {
        let config = config();
        let mapper = CoordinateMapper::new(&config, 1.0, 0.0);
        let first = Task::new("First", jan(2), jan(6));
        let second = Task::new("Second", jan(3), jan(8));
        let tasks = vec![first.clone(), second];
        let hit = hit_test(&tasks, &mapper, pos2(250.0, row_top(0) + 5.0));
        assert_eq!(hit.map(|t| t.id), Some(first.id));
        assert!(hit_test(&tasks, &mapper, pos2(250.0, row_top(1) + 5.0)).is_none());
        assert!(hit_test(&[], &mapper, pos2(250.0, row_top(0) + 5.0)).is_none());
    }
}
