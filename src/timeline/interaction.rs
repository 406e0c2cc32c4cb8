//! Pointer and wheel handling for the timeline canvas.
//!
//! The controller is a reducer: `(ViewState, InputEvent) -> Transition`. It
//! never touches the committed task collection; anything that should change
//! the board comes back as an [`Intent`].

use chrono::NaiveDateTime;
use egui::Pos2;
use log::debug;

use super::geometry::{self, HEADER_HEIGHT};
use super::mapper::CoordinateMapper;
use crate::model::{Intent, Task, TaskId, TimelineConfig};

pub const ZOOM_MIN: f64 = 0.5;
pub const ZOOM_MAX: f64 = 3.0;
pub const ZOOM_IN_FACTOR: f64 = 1.1;
pub const ZOOM_OUT_FACTOR: f64 = 0.9;

/// Whether a create-drag is in progress.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging {
        /// Pointer position where the drag began.
        origin: Pos2,
        preview: Task,
    },
}

/// Transient view state owned by the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Always within `ZOOM_MIN..=ZOOM_MAX`.
    pub zoom: f64,
    /// Horizontal pan in pixels, unbounded.
    pub pan: f64,
    pub phase: DragPhase,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: 0.0,
            phase: DragPhase::Idle,
        }
    }
}

impl ViewState {
    pub fn mapper<'a>(&self, config: &'a TimelineConfig) -> CoordinateMapper<'a> {
        CoordinateMapper::new(config, self.zoom, self.pan)
    }

    pub fn preview(&self) -> Option<&Task> {
        match &self.phase {
            DragPhase::Dragging { preview, .. } => Some(preview),
            DragPhase::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }
}

/// Wheel deltas in DOM orientation: positive `delta_y` means wheel-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelInput {
    pub delta_x: f64,
    pub delta_y: f64,
    /// Ctrl or Cmd held: zoom instead of pan.
    pub zoom_modifier: bool,
}

/// Input in canvas-local logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(Pos2),
    PointerMove(Pos2),
    PointerUp,
    /// Pointer left the canvas; treated as a release.
    PointerLeave,
    Wheel(WheelInput),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: ViewState,
    /// In the order the store must apply them.
    pub intents: Vec<Intent>,
}

impl Transition {
    fn stay(state: ViewState) -> Self {
        Self {
            state,
            intents: Vec::new(),
        }
    }
}

pub fn reduce(
    state: ViewState,
    event: InputEvent,
    tasks: &[Task],
    config: &TimelineConfig,
) -> Transition {
    match event {
        InputEvent::PointerDown(pos) => pointer_down(state, pos, tasks, config),
        InputEvent::PointerMove(pos) => pointer_move(state, pos, config),
        InputEvent::PointerUp | InputEvent::PointerLeave => commit(state),
        InputEvent::Wheel(wheel) => Transition::stay(apply_wheel(state, wheel)),
    }
}

fn pointer_down(state: ViewState, pos: Pos2, tasks: &[Task], config: &TimelineConfig) -> Transition {
    if state.is_dragging() {
        return Transition::stay(state);
    }

    let mapper = state.mapper(config);
    if let Some(task) = geometry::hit_test(tasks, &mapper, pos) {
        debug!("pointer down on task {} at ({:.1}, {:.1})", task.id, pos.x, pos.y);
        return Transition {
            intents: vec![Intent::RequestEditor(task.id)],
            state,
        };
    }

    if pos.y <= HEADER_HEIGHT {
        return Transition::stay(state);
    }

    let start = mapper.x_to_date(pos.x as f64);
    let row = geometry::row_at(pos.y);
    let preview = Task::preview(start, one_unit_after(start, config), row);
    debug!("drag started at ({:.1}, {:.1}) row={row} start={start}", pos.x, pos.y);
    Transition::stay(ViewState {
        phase: DragPhase::Dragging {
            origin: pos,
            preview,
        },
        ..state
    })
}

fn pointer_move(state: ViewState, pos: Pos2, config: &TimelineConfig) -> Transition {
    let ViewState { zoom, pan, phase } = state;
    let (origin, mut preview) = match phase {
        DragPhase::Dragging { origin, preview } => (origin, preview),
        DragPhase::Idle => {
            return Transition::stay(ViewState {
                zoom,
                pan,
                phase: DragPhase::Idle,
            })
        }
    };

    let mapper = CoordinateMapper::new(config, zoom, pan);
    let anchor = mapper.x_to_date(origin.x as f64);
    let current = mapper.x_to_date(pos.x as f64);
    preview.start = anchor.min(current);
    preview.end = one_unit_after(anchor.max(current), config);

    Transition::stay(ViewState {
        zoom,
        pan,
        phase: DragPhase::Dragging { origin, preview },
    })
}

fn commit(state: ViewState) -> Transition {
    let ViewState { zoom, pan, phase } = state;
    let idle = ViewState {
        zoom,
        pan,
        phase: DragPhase::Idle,
    };
    let preview = match phase {
        DragPhase::Dragging { preview, .. } => preview,
        DragPhase::Idle => return Transition::stay(idle),
    };

    let task = Task {
        id: TaskId::new(),
        ..preview
    };
    let id = task.id;
    debug!("drag committed as task {id} [{} .. {}]", task.start, task.end);
    Transition {
        state: idle,
        intents: vec![Intent::CreateTask(task), Intent::RequestEditor(id)],
    }
}

fn apply_wheel(state: ViewState, wheel: WheelInput) -> ViewState {
    if wheel.zoom_modifier {
        // Anything but a downward wheel zooms in, sideways tilts included.
        let factor = if wheel.delta_y > 0.0 {
            ZOOM_OUT_FACTOR
        } else {
            ZOOM_IN_FACTOR
        };
        ViewState {
            zoom: (state.zoom * factor).clamp(ZOOM_MIN, ZOOM_MAX),
            ..state
        }
    } else {
        let delta = wheel.delta_x + wheel.delta_y;
        if !delta.is_finite() {
            return state;
        }
        ViewState {
            pan: state.pan - delta,
            ..state
        }
    }
}

fn one_unit_after(date: NaiveDateTime, config: &TimelineConfig) -> NaiveDateTime {
    date.checked_add_signed(config.unit.duration())
        .unwrap_or(date)
}
