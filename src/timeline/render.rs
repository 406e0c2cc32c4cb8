//! Paints a [`Scene`] onto any [`Surface`], and the frame loop that drives it.

use chrono::NaiveDateTime;
use egui::{pos2, vec2, Align2, Color32, FontId, Pos2, Rect, Stroke, Vec2};
use log::debug;

use super::geometry::{BAR_ROUNDING, HEADER_HEIGHT, MARKER_RADIUS, TASK_HEIGHT};
use super::interaction::ViewState;
use super::scene::{build_scene, DrawCommand, HeaderCell, Scene, Snapshot, TaskBar};
use crate::model::{Task, TaskId, TeamMember, TimelineConfig};
use crate::ui::theme;

/// Horizontal inset of bar labels.
const LABEL_INSET: f32 = 12.0;

/// A drawing target in logical pixels.
pub trait Surface {
    /// Size the backing store to `size * pixels_per_point` and scale drawing
    /// so that logical coordinates land on device pixels.
    fn resize(&mut self, size: Vec2, pixels_per_point: f32);
    fn clear(&mut self, color: Color32);
    fn fill_rect(&mut self, rect: Rect, rounding: f32, color: Color32);
    fn stroke_rect(&mut self, rect: Rect, rounding: f32, stroke: Stroke);
    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32);
    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke);
    fn text(&mut self, pos: Pos2, anchor: Align2, text: &str, font: FontId, color: Color32, clip: Option<Rect>);
}

/// Something that can be asked for another frame.
pub trait FrameScheduler {
    fn request_frame(&self);
}

impl FrameScheduler for egui::Context {
    fn request_frame(&self) {
        self.request_repaint();
    }
}

/// Full repaint of `scene`: clear, header band, then commands in order.
pub fn paint<S: Surface + ?Sized>(surface: &mut S, scene: &Scene, pixels_per_point: f32) {
    let size = scene.size;
    surface.resize(size, pixels_per_point);
    surface.clear(theme::BG_CANVAS);
    surface.fill_rect(
        Rect::from_min_size(Pos2::ZERO, vec2(size.x, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );

    for command in &scene.commands {
        match command {
            DrawCommand::HeaderCell(cell) => paint_header_cell(surface, cell, size.y),
            DrawCommand::Bar(bar) => paint_bar(surface, bar),
            DrawCommand::NowLine { x } => surface.line(
                pos2(*x, HEADER_HEIGHT),
                pos2(*x, size.y),
                Stroke::new(2.0, theme::NOW_LINE.gamma_multiply(0.8)),
            ),
        }
    }

    surface.line(
        pos2(0.0, HEADER_HEIGHT),
        pos2(size.x, HEADER_HEIGHT),
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );
}

fn paint_header_cell<S: Surface + ?Sized>(surface: &mut S, cell: &HeaderCell, height: f32) {
    let rect = cell.rect;
    if cell.is_current {
        surface.fill_rect(rect, 0.0, theme::ACCENT);
    }
    surface.line(
        pos2(rect.left(), 0.0),
        pos2(rect.left(), height),
        Stroke::new(1.0, theme::GRID_LINE),
    );

    let (main_color, sub_color) = if cell.is_current {
        (theme::TEXT_ON_BAR, theme::TEXT_ON_BAR.gamma_multiply(0.7))
    } else {
        (theme::TEXT_PRIMARY, theme::TEXT_PRIMARY.gamma_multiply(0.7))
    };
    let center_x = rect.center().x;
    surface.text(
        pos2(center_x, 35.0),
        Align2::CENTER_CENTER,
        &cell.label.main,
        theme::font_header(),
        main_color,
        Some(rect),
    );
    surface.text(
        pos2(center_x, 55.0),
        Align2::CENTER_CENTER,
        &cell.label.sub,
        theme::font_sub(),
        sub_color,
        Some(rect),
    );
}

fn paint_bar<S: Surface + ?Sized>(surface: &mut S, bar: &TaskBar) {
    let rect = bar.rect;
    surface.fill_rect(rect, BAR_ROUNDING, bar.color);

    if let Some(progress) = bar.progress {
        surface.fill_rect(progress, BAR_ROUNDING, theme::PROGRESS_OVERLAY);
    }

    if bar.selected {
        surface.stroke_rect(
            rect.expand(1.5),
            BAR_ROUNDING + 1.5,
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    let clip = Rect::from_min_max(
        pos2(rect.left() + LABEL_INSET, rect.top()),
        pos2(rect.right() - LABEL_INSET, rect.bottom()),
    );
    let title_y = if bar.assignee.is_some() {
        rect.top() + TASK_HEIGHT * 0.35
    } else {
        rect.center().y
    };
    surface.text(
        pos2(clip.left(), title_y),
        Align2::LEFT_CENTER,
        &bar.title,
        theme::font_bar(),
        theme::TEXT_ON_BAR,
        Some(clip),
    );
    if let Some(name) = &bar.assignee {
        surface.text(
            pos2(clip.left(), rect.top() + TASK_HEIGHT * 0.75),
            Align2::LEFT_CENTER,
            name,
            theme::font_small(),
            theme::TEXT_ON_BAR.gamma_multiply(0.9),
            Some(clip),
        );
    }

    if let Some(center) = bar.critical_marker {
        surface.fill_circle(center, MARKER_RADIUS, theme::TEXT_ON_BAR);
    }
}

/// The continuous redraw loop.
///
/// While running, every frame asks the scheduler for the next one. Scenes
/// are cached against an owned copy of the snapshot they were built from, so
/// an unchanged board repaints the same draw list without rebuilding it.
#[derive(Debug, Default)]
pub struct RenderLoop {
    running: bool,
    cached: Option<(SceneKey, Scene)>,
    scenes_built: u64,
    frames_painted: u64,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        if !self.running {
            debug!("render loop started");
        }
        self.running = true;
    }

    /// Stop scheduling frames. Frames requested afterwards paint nothing.
    pub fn stop(&mut self) {
        if self.running {
            debug!(
                "render loop stopped after {} frames ({} scenes built)",
                self.frames_painted, self.scenes_built
            );
        }
        self.running = false;
        self.cached = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn scenes_built(&self) -> u64 {
        self.scenes_built
    }

    pub fn frames_painted(&self) -> u64 {
        self.frames_painted
    }

    /// Paint one frame. A missing surface skips the frame but keeps the
    /// loop alive so the next frame retries.
    pub fn frame<S: Surface + ?Sized>(
        &mut self,
        surface: Option<&mut S>,
        snapshot: &Snapshot<'_>,
        size: Vec2,
        pixels_per_point: f32,
        scheduler: &dyn FrameScheduler,
    ) -> Option<&Scene> {
        if !self.running {
            return None;
        }
        scheduler.request_frame();
        let surface = surface?;

        let stale = self
            .cached
            .as_ref()
            .map_or(true, |(key, _)| !key.matches(snapshot, size));
        if stale {
            self.cached = Some((SceneKey::of(snapshot, size), build_scene(snapshot, size)));
            self.scenes_built += 1;
        }

        let (_, scene) = self.cached.as_ref()?;
        paint(surface, scene, pixels_per_point);
        self.frames_painted += 1;
        Some(scene)
    }
}

/// Everything a cached scene was built from.
#[derive(Debug, Clone, PartialEq)]
struct SceneKey {
    tasks: Vec<Task>,
    members: Vec<TeamMember>,
    config: TimelineConfig,
    view: ViewState,
    selected: Option<TaskId>,
    now: NaiveDateTime,
    size: Vec2,
}

impl SceneKey {
    fn of(snapshot: &Snapshot<'_>, size: Vec2) -> Self {
        Self {
            tasks: snapshot.tasks.to_vec(),
            members: snapshot.members.to_vec(),
            config: snapshot.config.clone(),
            view: snapshot.view.clone(),
            selected: snapshot.selected,
            now: snapshot.now,
            size,
        }
    }

    fn matches(&self, snapshot: &Snapshot<'_>, size: Vec2) -> bool {
        self.size == size
            && self.now == snapshot.now
            && self.selected == snapshot.selected
            && self.view == *snapshot.view
            && self.config == *snapshot.config
            && self.tasks == snapshot.tasks
            && self.members == snapshot.members
    }
}
