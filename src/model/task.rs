use std::fmt;

use chrono::NaiveDateTime;
use uuid::Uuid;

use super::member::MemberId;

/// Stable task identity.
///
/// The nil UUID is reserved for the uncommitted drag preview and prints as
/// `preview`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Sentinel id carried by the drag preview.
    pub const PREVIEW: TaskId = TaskId(Uuid::nil());

    /// A fresh, never-before-seen id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn is_preview(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_preview() {
            f.write_str("preview")
        } else {
            self.0.fmt(f)
        }
    }
}

/// Task priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl TaskPriority {
    pub fn all() -> &'static [TaskPriority] {
        &[
            TaskPriority::Low,
            TaskPriority::Medium,
            TaskPriority::High,
            TaskPriority::Critical,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
            TaskPriority::Critical => "Critical",
        }
    }
}

/// A single bar on the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Weak reference into the roster; dangling ids render as unassigned.
    pub assignee: Option<MemberId>,
    pub description: Option<String>,
    /// Percent complete, 0..=100.
    pub progress: Option<u8>,
    pub priority: Option<TaskPriority>,
    /// Row on the board; absent means row 0.
    pub row: Option<u32>,
}

impl Task {
    pub fn new(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            id: TaskId::new(),
            title: title.into(),
            start,
            end,
            assignee: None,
            description: None,
            progress: None,
            priority: None,
            row: None,
        }
    }

    /// The uncommitted bar shown while the user drags out a new task.
    pub fn preview(start: NaiveDateTime, end: NaiveDateTime, row: u32) -> Self {
        Self {
            id: TaskId::PREVIEW,
            row: Some(row),
            ..Self::new("New Task", start, end)
        }
    }

    pub fn is_preview(&self) -> bool {
        self.id.is_preview()
    }

    pub fn row_index(&self) -> u32 {
        self.row.unwrap_or(0)
    }

    pub fn progress_percent(&self) -> u8 {
        self.progress.unwrap_or(0).min(100)
    }

    pub fn set_progress(&mut self, percent: u8) {
        self.progress = Some(percent.min(100));
    }

    pub fn is_critical(&self) -> bool {
        self.priority == Some(TaskPriority::Critical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap()
    }

    #[test]
    fn preview_carries_sentinel_id() {
        let task = Task::preview(at(1), at(2), 3);
        assert!(task.is_preview());
        assert_eq!(task.id.to_string(), "preview");
        assert_eq!(task.row_index(), 3);
        assert_eq!(task.title, "New Task");
    }

    #[test]
    fn fresh_ids_are_never_the_sentinel() {
        let a = TaskId::new();
        let b = TaskId::new();
        assert!(!a.is_preview());
        assert_ne!(a, b);
    }

    #[test]
    fn missing_row_defaults_to_zero() {
        let task = Task::new("Plan", at(1), at(3));
        assert_eq!(task.row_index(), 0);
    }

    #[test]
    fn progress_is_clamped_to_one_hundred() {
        let mut task = Task::new("Plan", at(1), at(3));
        assert_eq!(task.progress_percent(), 0);
        task.set_progress(140);
        assert_eq!(task.progress, Some(100));
    }
}
