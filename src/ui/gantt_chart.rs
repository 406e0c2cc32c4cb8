use chrono::NaiveDateTime;
use egui::{
    Align2, Color32, CursorIcon, Event, FontId, MouseWheelUnit, Painter, PointerButton, Pos2, Rect, Sense, Stroke, Ui,
    Vec2,
};

use crate::model::{Board, Intent, TaskId, TimelineConfig};
use crate::timeline::geometry;
use crate::timeline::{reduce, InputEvent, RenderLoop, Snapshot, Surface, ViewState, WheelInput};

/// What the canvas produced this frame.
#[derive(Debug, Clone, Default)]
pub struct ChartOutput {
    /// Intents in emission order.
    pub intents: Vec<Intent>,
    /// Logical size of the canvas, for exports at the same framing.
    pub size: Vec2,
}

/// Render the timeline canvas and run its input through the controller.
///
/// With `interactive` off (a modal is open) the board still paints but
/// ignores the pointer.
#[allow(clippy::too_many_arguments)]
pub fn show_timeline(
    ui: &mut Ui,
    board: &Board,
    config: &TimelineConfig,
    view: &mut ViewState,
    selected: Option<TaskId>,
    now: NaiveDateTime,
    render_loop: &mut RenderLoop,
    interactive: bool,
) -> ChartOutput {
    let size = ui.available_size();
    let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
    let canvas = response.rect;
    let mut intents = Vec::new();

    if interactive {
        for event in collect_input(ui, canvas) {
            let transition = reduce(std::mem::take(view), event, board.tasks(), config);
            *view = transition.state;
            intents.extend(transition.intents);
        }

        if response.hovered() {
            let over_bar = ui
                .input(|i| i.pointer.hover_pos())
                .map(|p| to_local(canvas, p))
                .and_then(|p| geometry::hit_test(board.tasks(), &view.mapper(config), p));
            match over_bar {
                Some(task) if !view.is_dragging() => {
                    ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
                    egui::show_tooltip_at_pointer(
                        ui.ctx(),
                        ui.layer_id(),
                        egui::Id::new(("task-tip", task.id)),
                        |ui| {
                            ui.strong(&task.title);
                            ui.label(format!(
                                "{} → {}",
                                task.start.format("%b %-d %H:%M"),
                                task.end.format("%b %-d %H:%M")
                            ));
                            if let Some(progress) = task.progress {
                                ui.label(format!("Progress: {progress}%"));
                            }
                        },
                    );
                }
                _ => ui.ctx().set_cursor_icon(CursorIcon::Crosshair),
            }
        }
    }

    let snapshot = Snapshot {
        tasks: board.tasks(),
        members: board.members(),
        config,
        view,
        selected,
        now,
    };
    let mut surface = EguiSurface {
        painter: &painter,
        canvas,
    };
    let pixels_per_point = ui.ctx().pixels_per_point();
    render_loop.frame(Some(&mut surface), &snapshot, canvas.size(), pixels_per_point, ui.ctx());

    ChartOutput {
        intents,
        size: canvas.size(),
    }
}

fn to_local(canvas: Rect, pos: Pos2) -> Pos2 {
    (pos - canvas.min).to_pos2()
}

/// Points one wheel line scrolls, matching egui's default line speed.
const WHEEL_LINE: f32 = 40.0;

/// Translate this frame's raw input events into controller events, in the
/// order they arrived. Each wheel event becomes exactly one `Wheel`; egui's
/// smoothed scroll and zoom deltas are never read, since they replay the
/// same notch over several frames.
fn collect_input(ui: &Ui, canvas: Rect) -> Vec<InputEvent> {
    let hovered = ui.rect_contains_pointer(canvas);
    let (events, frame_modifiers) = ui.input(|i| (i.events.clone(), i.modifiers));
    let ctx = ui.ctx();
    let layer = ui.layer_id();
    let on_canvas = |pos: Pos2| {
        canvas.contains(pos) && ctx.layer_id_at(pos).map_or(true, |top| top == layer)
    };

    let mut out = Vec::new();
    for event in events {
        match event {
            Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed: true,
                ..
            } => {
                if on_canvas(pos) {
                    out.push(InputEvent::PointerDown(to_local(canvas, pos)));
                }
            }
            Event::PointerButton {
                button: PointerButton::Primary,
                pressed: false,
                ..
            } => out.push(InputEvent::PointerUp),
            Event::PointerMoved(pos) if canvas.contains(pos) => {
                out.push(InputEvent::PointerMove(to_local(canvas, pos)));
            }
            Event::PointerMoved(_) | Event::PointerGone => out.push(InputEvent::PointerLeave),
            Event::MouseWheel { unit, delta, modifiers } if hovered => {
                let step = match unit {
                    MouseWheelUnit::Point => 1.0,
                    MouseWheelUnit::Line => WHEEL_LINE,
                    MouseWheelUnit::Page => canvas.height(),
                };
                let zoom = [modifiers, frame_modifiers]
                    .iter()
                    .any(|m| m.ctrl || m.command);
                // egui's wheel delta moves content; wheel-down is positive
                // for the controller.
                out.push(InputEvent::Wheel(WheelInput {
                    delta_x: -f64::from(delta.x * step),
                    delta_y: -f64::from(delta.y * step),
                    zoom_modifier: zoom,
                }));
            }
            _ => {}
        }
    }
    out
}

/// Paints through an egui [`Painter`], offset to the canvas origin.
struct EguiSurface<'p> {
    painter: &'p Painter,
    canvas: Rect,
}

impl EguiSurface<'_> {
    fn offset(&self) -> Vec2 {
        self.canvas.min.to_vec2()
    }
}

impl Surface for EguiSurface<'_> {
    // egui owns the backing store and its scaling.
    fn resize(&mut self, _size: Vec2, _pixels_per_point: f32) {}

    fn clear(&mut self, color: Color32) {
        self.painter.rect_filled(self.canvas, 0.0, color);
    }

    fn fill_rect(&mut self, rect: Rect, rounding: f32, color: Color32) {
        self.painter.rect_filled(rect.translate(self.offset()), rounding, color);
    }

    fn stroke_rect(&mut self, rect: Rect, rounding: f32, stroke: Stroke) {
        self.painter.rect_stroke(rect.translate(self.offset()), rounding, stroke);
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.painter.circle_filled(center + self.offset(), radius, color);
    }

    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        let offset = self.offset();
        self.painter.line_segment([from + offset, to + offset], stroke);
    }

    fn text(&mut self, pos: Pos2, anchor: Align2, text: &str, font: FontId, color: Color32, clip: Option<Rect>) {
        let pos = pos + self.offset();
        match clip {
            Some(clip) => {
                let clip = clip.translate(self.offset()).intersect(self.painter.clip_rect());
                self.painter.with_clip_rect(clip).text(pos, anchor, text, font, color);
            }
            None => {
                self.painter.text(pos, anchor, text, font, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use egui::{pos2, vec2, Modifiers, RawInput};

    /// A headless egui context driving the canvas on an 800x600 screen.
    struct Harness {
        ctx: egui::Context,
        board: Board,
        config: TimelineConfig,
        view: ViewState,
        render_loop: RenderLoop,
    }

    impl Harness {
        fn new() -> Self {
            let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            let mut render_loop = RenderLoop::new();
            render_loop.start();
            Self {
                ctx: egui::Context::default(),
                board: Board::new("Canvas"),
                config: TimelineConfig::starting(day),
                view: ViewState::default(),
                render_loop,
            }
        }

        fn frame(&mut self, events: Vec<Event>, modifiers: Modifiers) -> Vec<Intent> {
            let input = RawInput {
                screen_rect: Some(Rect::from_min_size(Pos2::ZERO, vec2(800.0, 600.0))),
                modifiers,
                events,
                ..RawInput::default()
            };
            let now = self.config.origin;
            let Self {
                ctx,
                board,
                config,
                view,
                render_loop,
            } = self;
            let mut intents = Vec::new();
            let _output = ctx.run(input, |ctx| {
                egui::CentralPanel::default()
                    .frame(egui::Frame::none())
                    .show(ctx, |ui| {
                        let out = show_timeline(ui, board, config, view, None, now, render_loop, true);
                        intents.extend(out.intents);
                    });
            });
            intents
        }

        fn hover(&mut self, pos: Pos2) {
            self.frame(vec![Event::PointerMoved(pos)], Modifiers::NONE);
        }
    }

    fn button(pos: Pos2, pressed: bool) -> Event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::NONE,
        }
    }

    fn wheel(unit: MouseWheelUnit, delta: Vec2, modifiers: Modifiers) -> Event {
        Event::MouseWheel { unit, delta, modifiers }
    }

    #[test]
    fn one_ctrl_wheel_notch_is_one_zoom_step() {
        let mut h = Harness::new();
        h.hover(pos2(400.0, 300.0));
        h.frame(
            vec![wheel(MouseWheelUnit::Line, vec2(0.0, -1.0), Modifiers::CTRL)],
            Modifiers::CTRL,
        );
        for _ in 0..60 {
            h.frame(Vec::new(), Modifiers::CTRL);
        }
        assert_eq!(h.view.zoom, 0.9);
        assert_eq!(h.view.pan, 0.0);
    }

    #[test]
    fn wheel_up_with_command_zooms_in() {
        let mut h = Harness::new();
        h.hover(pos2(400.0, 300.0));
        h.frame(
            vec![wheel(MouseWheelUnit::Point, vec2(0.0, 12.0), Modifiers::COMMAND)],
            Modifiers::COMMAND,
        );
        assert_eq!(h.view.zoom, 1.1);
    }

    #[test]
    fn wheel_down_pans_toward_later_dates() {
        let mut h = Harness::new();
        h.hover(pos2(400.0, 300.0));
        h.frame(
            vec![wheel(MouseWheelUnit::Point, vec2(0.0, -30.0), Modifiers::NONE)],
            Modifiers::NONE,
        );
        assert_eq!(h.view.pan, -30.0);

        h.frame(
            vec![wheel(MouseWheelUnit::Line, vec2(-1.0, 0.0), Modifiers::NONE)],
            Modifiers::NONE,
        );
        assert_eq!(h.view.pan, -30.0 - f64::from(WHEEL_LINE));
        assert_eq!(h.view.zoom, 1.0);
    }

    #[test]
    fn wheel_off_canvas_is_ignored() {
        let mut h = Harness::new();
        h.frame(vec![Event::PointerGone], Modifiers::NONE);
        h.frame(
            vec![wheel(MouseWheelUnit::Line, vec2(0.0, -3.0), Modifiers::NONE)],
            Modifiers::NONE,
        );
        assert_eq!(h.view, ViewState::default());
    }

    #[test]
    fn press_move_release_in_one_frame_keeps_order() {
        let mut h = Harness::new();
        h.hover(pos2(210.0, 150.0));
        let intents = h.frame(
            vec![
                button(pos2(210.0, 150.0), true),
                Event::PointerMoved(pos2(420.0, 155.0)),
                button(pos2(420.0, 155.0), false),
            ],
            Modifiers::NONE,
        );

        let mapper = ViewState::default().mapper(&h.config);
        match intents.as_slice() {
            [Intent::CreateTask(task), Intent::RequestEditor(id)] if task.id == *id => {
                assert_eq!(task.start, mapper.x_to_date(210.0));
                assert_eq!(task.end, mapper.x_to_date(420.0) + h.config.unit.duration());
                assert_eq!(task.row_index(), geometry::row_at(150.0));
            }
            other => panic!("unexpected intents: {other:?}"),
        }
        assert!(!h.view.is_dragging());
    }

    #[test]
    fn pointer_leaving_mid_drag_commits() {
        let mut h = Harness::new();
        h.hover(pos2(300.0, 200.0));
        assert!(h.frame(vec![button(pos2(300.0, 200.0), true)], Modifiers::NONE).is_empty());
        assert!(h.view.is_dragging());

        let intents = h.frame(vec![Event::PointerGone], Modifiers::NONE);
        assert_eq!(intents.len(), 2);
        assert!(matches!(intents[0], Intent::CreateTask(_)));
        assert!(!h.view.is_dragging());
    }
}
