//! Error types surfaced by the store, the timeline config and the exporter.
//!
//! Geometry never errors: degenerate arithmetic is clamped inside the
//! timeline core. These are the only fallible edges of the app.

use crate::model::TaskId;

/// Rejected timeline configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// `units_to_show` must be positive.
    #[error("timeline must show at least one unit")]
    NoUnits,

    /// `unit_width` must be a positive, finite pixel width.
    #[error("unit width must be positive and finite, got {0}")]
    InvalidUnitWidth(f64),
}

/// Rejected mutation intent.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BoardError {
    /// Update or delete addressed a task the board does not hold.
    #[error("no task with id {0}")]
    UnknownTask(TaskId),

    /// The preview sentinel can never be committed.
    #[error("the preview task cannot be stored")]
    PreviewNotStorable,

    /// A member needs a non-blank display name.
    #[error("member name must not be empty")]
    EmptyMemberName,
}

/// Failure while writing a frame to disk.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The frame has no pixels (zero-sized viewport).
    #[error("nothing to export: frame is {width}x{height}")]
    EmptyFrame { width: u32, height: u32 },

    /// File could not be created or written.
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),

    /// PNG encoder rejected the frame.
    #[error("failed to encode PNG: {0}")]
    Encoding(#[from] png::EncodingError),

    /// PDF document could not be assembled.
    #[error("failed to build PDF: {0}")]
    Pdf(String),
}
