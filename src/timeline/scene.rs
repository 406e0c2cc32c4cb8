//! Turns a board snapshot into positioned draw commands.
//!
//! The builder is deterministic: the clock comes in through
//! [`Snapshot::now`], and nothing is drawn for units outside the viewport.

use chrono::NaiveDateTime;
use egui::{pos2, vec2, Color32, Pos2, Rect, Vec2};

use super::geometry::{self, HEADER_HEIGHT};
use super::interaction::ViewState;
use super::mapper::CoordinateMapper;
use super::units::{self, UnitLabel};
use crate::model::{Task, TaskId, TeamMember, TimeUnit, TimelineConfig};
use crate::ui::theme;

/// Everything a frame depends on.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub tasks: &'a [Task],
    pub members: &'a [TeamMember],
    pub config: &'a TimelineConfig,
    pub view: &'a ViewState,
    pub selected: Option<TaskId>,
    pub now: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub index: u32,
    /// Column slice of the header band.
    pub rect: Rect,
    pub label: UnitLabel,
    pub is_current: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskBar {
    pub id: TaskId,
    pub title: String,
    pub assignee: Option<String>,
    pub rect: Rect,
    /// Fill color with opacity already applied.
    pub color: Color32,
    pub progress: Option<Rect>,
    pub critical_marker: Option<Pos2>,
    pub selected: bool,
    pub is_preview: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    HeaderCell(HeaderCell),
    Bar(TaskBar),
    NowLine { x: f32 },
}

/// Ordered draw list for one frame, in logical pixels.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub size: Vec2,
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn header_cells(&self) -> impl Iterator<Item = &HeaderCell> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::HeaderCell(cell) => Some(cell),
            _ => None,
        })
    }

    pub fn bars(&self) -> impl Iterator<Item = &TaskBar> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Bar(bar) => Some(bar),
            _ => None,
        })
    }

    pub fn now_line(&self) -> Option<f32> {
        self.commands.iter().find_map(|c| match c {
            DrawCommand::NowLine { x } => Some(*x),
            _ => None,
        })
    }
}

pub fn build_scene(snapshot: &Snapshot<'_>, size: Vec2) -> Scene {
    let mapper = snapshot.view.mapper(snapshot.config);
    let mut commands = Vec::new();

    push_header_cells(&mut commands, snapshot, &mapper, size.x);

    // Preview last so it draws over committed bars while dragging.
    for task in snapshot.tasks.iter().chain(snapshot.view.preview()) {
        commands.push(DrawCommand::Bar(task_bar(task, snapshot, &mapper)));
    }

    if snapshot.config.unit == TimeUnit::Days {
        let x = mapper.date_to_x(snapshot.now);
        if (0.0..=size.x as f64).contains(&x) {
            commands.push(DrawCommand::NowLine { x: x as f32 });
        }
    }

    Scene { size, commands }
}

fn push_header_cells(
    commands: &mut Vec<DrawCommand>,
    snapshot: &Snapshot<'_>,
    mapper: &CoordinateMapper<'_>,
    width: f32,
) {
    let cell_width = mapper.unit_px();
    let today = snapshot.now.date();
    for index in 0..snapshot.config.units_to_show {
        let x = mapper.unit_x(index as i64);
        if x > width as f64 {
            break;
        }
        if x < -cell_width {
            continue;
        }
        commands.push(DrawCommand::HeaderCell(HeaderCell {
            index,
            rect: Rect::from_min_size(pos2(x as f32, 0.0), vec2(cell_width as f32, HEADER_HEIGHT)),
            label: units::format_unit(snapshot.config, index as i64),
            is_current: units::is_current_unit(snapshot.config, index as i64, today),
        }));
    }
}

/// Fill color of a bar: preview color, else the assignee's roster color,
/// else the priority color.
pub fn task_color(task: &Task, members: &[TeamMember]) -> Color32 {
    if task.is_preview() {
        return theme::PREVIEW_COLOR.gamma_multiply(theme::PREVIEW_OPACITY);
    }
    task.assignee
        .and_then(|id| members.iter().find(|m| m.id == id))
        .map(|member| member.color)
        .unwrap_or_else(|| theme::priority_color(task.priority.unwrap_or_default()))
}

fn task_bar(task: &Task, snapshot: &Snapshot<'_>, mapper: &CoordinateMapper<'_>) -> TaskBar {
    let rect = geometry::resolve_task_rect(task, mapper);
    let is_preview = task.is_preview();
    let assignee = task
        .assignee
        .and_then(|id| snapshot.members.iter().find(|m| m.id == id));

    let color = task_color(task, snapshot.members);

    let progress = match task.progress_percent() {
        0 => None,
        _ if is_preview => None,
        percent => Some(Rect::from_min_size(
            rect.min,
            vec2(rect.width() * f32::from(percent) / 100.0, rect.height()),
        )),
    };

    TaskBar {
        id: task.id,
        title: task.title.clone(),
        assignee: assignee.filter(|_| !is_preview).map(|m| m.name.clone()),
        rect,
        color,
        progress,
        critical_marker: (task.is_critical() && !is_preview)
            .then(|| geometry::critical_marker_center(rect)),
        selected: !is_preview && snapshot.selected == Some(task.id),
        is_preview,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskPriority;
    use crate::timeline::interaction::DragPhase;
    use chrono::NaiveDate;

    fn jan(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap()
    }

    struct Fixture {
        tasks: Vec<Task>,
        members: Vec<TeamMember>,
        config: TimelineConfig,
        view: ViewState,
        now: NaiveDateTime,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                tasks: Vec::new(),
                members: Vec::new(),
                config: TimelineConfig::starting(jan(1).date()),
                view: ViewState::default(),
                now: jan(3) + chrono::Duration::hours(12),
            }
        }

        fn build(&self, width: f32) -> Scene {
            let snapshot = Snapshot {
                tasks: &self.tasks,
                members: &self.members,
                config: &self.config,
                view: &self.view,
                selected: None,
                now: self.now,
            };
            build_scene(&snapshot, vec2(width, 600.0))
        }
    }

    #[test]
    fn header_cells_are_culled_to_viewport() {
        let mut fx = Fixture::new();
        fx.view.pan = -250.0;
        let scene = fx.build(500.0);
        let indices: Vec<u32> = scene.header_cells().map(|c| c.index).collect();
        // Cell 1 spans [-150, -50] and is skipped; cell 8 starts at 550.
        assert_eq!(indices, vec![2, 3, 4, 5, 6, 7]);
        for cell in scene.header_cells() {
            assert!(cell.rect.left() <= 500.0);
            assert!(cell.rect.right() >= 0.0);
        }
    }

    #[test]
    fn no_geometry_when_everything_is_off_screen() {
        let mut fx = Fixture::new();
        fx.view.pan = -10_000.0;
        assert_eq!(fx.build(800.0).header_cells().count(), 0);
        fx.view.pan = 10_000.0;
        assert_eq!(fx.build(800.0).header_cells().count(), 0);
    }

    #[test]
    fn today_cell_is_highlighted() {
        let fx = Fixture::new();
        let scene = fx.build(1000.0);
        let current: Vec<u32> = scene
            .header_cells()
            .filter(|c| c.is_current)
            .map(|c| c.index)
            .collect();
        assert_eq!(current, vec![2]);
    }

    #[test]
    fn bar_geometry_scenario() {
        let mut fx = Fixture::new();
        fx.tasks.push(Task::new("Build", jan(2), jan(6)));
        let scene = fx.build(1000.0);
        let bar = scene.bars().next().expect("one bar");
        assert_eq!(bar.rect.left(), 100.0);
        assert_eq!(bar.rect.width(), 400.0);
        assert_eq!(bar.rect.top(), 100.0);
    }

    #[test]
    fn color_resolution_order() {
        let mut fx = Fixture::new();
        let member = TeamMember::new("Sarah Chen", None, 2);
        let mut assigned = Task::new("Assigned", jan(2), jan(4));
        assigned.assignee = Some(member.id);
        assigned.priority = Some(TaskPriority::Low);
        let mut low = Task::new("Low", jan(2), jan(4));
        low.priority = Some(TaskPriority::Low);
        let plain = Task::new("Plain", jan(2), jan(4));
        let mut dangling = Task::new("Dangling", jan(2), jan(4));
        dangling.assignee = Some(crate::model::MemberId::new());

        fx.members.push(member.clone());
        fx.tasks = vec![assigned, low, plain, dangling];
        let scene = fx.build(1000.0);
        let colors: Vec<Color32> = scene.bars().map(|b| b.color).collect();
        assert_eq!(colors[0], member.color);
        assert_eq!(colors[1], theme::priority_color(TaskPriority::Low));
        assert_eq!(colors[2], theme::priority_color(TaskPriority::Medium));
        assert_eq!(colors[3], theme::priority_color(TaskPriority::Medium));
        let names: Vec<Option<String>> = scene.bars().map(|b| b.assignee.clone()).collect();
        assert_eq!(names[0].as_deref(), Some("Sarah Chen"));
        assert_eq!(names[3], None);
    }

    #[test]
    fn progress_and_marker_rules() {
        let mut fx = Fixture::new();
        let mut half = Task::new("Half", jan(2), jan(6));
        half.set_progress(50);
        half.priority = Some(TaskPriority::Critical);
        let mut none = Task::new("None", jan(2), jan(6));
        none.set_progress(0);
        fx.tasks = vec![half, none];

        let mut preview = Task::preview(jan(2), jan(3), 1);
        preview.progress = Some(60);
        preview.priority = Some(TaskPriority::Critical);
        fx.view.phase = DragPhase::Dragging {
            origin: pos2(100.0, 150.0),
            preview,
        };

        let scene = fx.build(1000.0);
        let bars: Vec<&TaskBar> = scene.bars().collect();
        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].progress.map(|r| r.width()), Some(200.0));
        assert_eq!(bars[0].critical_marker, Some(pos2(485.0, 110.0)));
        assert_eq!(bars[1].progress, None);
        assert_eq!(bars[1].critical_marker, None);

        let preview = bars[2];
        assert!(preview.is_preview);
        assert_eq!(preview.progress, None);
        assert_eq!(preview.critical_marker, None);
        assert_eq!(
            preview.color,
            theme::PREVIEW_COLOR.gamma_multiply(theme::PREVIEW_OPACITY)
        );
    }

    #[test]
    fn preview_is_drawn_after_committed_bars() {
        let mut fx = Fixture::new();
        fx.tasks.push(Task::new("Committed", jan(2), jan(6)));
        fx.view.phase = DragPhase::Dragging {
            origin: pos2(150.0, 110.0),
            preview: Task::preview(jan(2), jan(3), 0),
        };
        let scene = fx.build(1000.0);
        let last_bar = scene
            .commands
            .iter()
            .rev()
            .find_map(|c| match c {
                DrawCommand::Bar(bar) => Some(bar),
                _ => None,
            })
            .expect("bars present");
        assert!(last_bar.is_preview);
    }

    #[test]
    fn now_line_only_for_visible_days() {
        let mut fx = Fixture::new();
        assert_eq!(fx.build(1000.0).now_line(), Some(250.0));
        assert_eq!(fx.build(200.0).now_line(), None);

        fx.config.unit = TimeUnit::Weeks;
        assert_eq!(fx.build(1000.0).now_line(), None);
    }

    #[test]
    fn identical_snapshots_build_identical_scenes() {
        let mut fx = Fixture::new();
        fx.tasks.push(Task::new("Build", jan(2), jan(6)));
        assert_eq!(fx.build(900.0), fx.build(900.0));
    }
}
