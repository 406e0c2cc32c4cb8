pub mod dialogs;
pub mod gantt_chart;
pub mod roster_panel;
pub mod task_editor;
pub mod theme;
pub mod toolbar;
