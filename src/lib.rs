//! GanttIt: a team timeline board.
//!
//! Drag on empty rows to create a task, click a bar to edit it, scroll to
//! pan and Ctrl+scroll to zoom.

pub mod app;
pub mod error;
pub mod io;
pub mod model;
pub mod timeline;
pub mod ui;
