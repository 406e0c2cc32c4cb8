use chrono::{NaiveDate, NaiveDateTime};
use egui::{pos2, vec2};
use proptest::prelude::*;

use ganttit::io::{self, pdf_export, png_export};
use ganttit::model::{Board, Intent, Task, TaskPriority, TimeUnit, TimelineConfig};
use ganttit::timeline::geometry::{self, MIN_TASK_WIDTH};
use ganttit::timeline::{
    build_scene, reduce, FrameScheduler, InputEvent, RasterSurface, RenderLoop, Snapshot, ViewState, WheelInput,
};
use ganttit::ui::theme;

struct NoopScheduler;

impl FrameScheduler for NoopScheduler {
    fn request_frame(&self) {}
}

fn jan(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap()
}

fn config() -> TimelineConfig {
    TimelineConfig::starting(jan(1).date())
}

fn snapshot<'a>(tasks: &'a [Task], config: &'a TimelineConfig, view: &'a ViewState) -> Snapshot<'a> {
    Snapshot {
        tasks,
        members: &[],
        config,
        view,
        selected: None,
        now: jan(1),
    }
}

#[test]
fn bar_lands_where_the_dates_say() {
    let config = config();
    let view = ViewState::default();
    let tasks = vec![Task::new("Build", jan(2), jan(6))];
    let scene = build_scene(&snapshot(&tasks, &config, &view), vec2(1200.0, 600.0));
    let bar = scene.bars().next().expect("one bar");
    assert_eq!(bar.rect.left(), 100.0);
    assert_eq!(bar.rect.width(), 400.0);
}

#[test]
fn pointer_down_on_empty_board_previews_row_zero() {
    let config = config();
    let t = reduce(ViewState::default(), InputEvent::PointerDown(pos2(150.0, 90.0)), &[], &config);
    let preview = t.state.preview().expect("dragging");
    assert_eq!(preview.row_index(), 0);
    assert_eq!(preview.start, t.state.mapper(&config).x_to_date(150.0));
}

#[test]
fn ctrl_wheel_down_zooms_out_by_ten_percent() {
    let config = config();
    let wheel = InputEvent::Wheel(WheelInput {
        delta_x: 0.0,
        delta_y: 100.0,
        zoom_modifier: true,
    });
    let t = reduce(ViewState::default(), wheel, &[], &config);
    assert_eq!(t.state.zoom, 0.9);
}

#[test]
fn drag_gesture_lands_on_the_board_and_is_clickable() {
    let config = config();
    let mut board = Board::new("Scenario");

    let mut view = ViewState::default();
    let mut emitted = Vec::new();
    for event in [
        InputEvent::PointerDown(pos2(210.0, 150.0)),
        InputEvent::PointerMove(pos2(420.0, 155.0)),
        InputEvent::PointerUp,
    ] {
        let t = reduce(view, event, board.tasks(), &config);
        view = t.state;
        emitted.extend(t.intents);
    }
    assert!(!view.is_dragging());

    let new_id = match emitted.as_slice() {
        [Intent::CreateTask(task), Intent::RequestEditor(id)] if task.id == *id => *id,
        other => panic!("unexpected intents: {other:?}"),
    };
    for intent in emitted {
        board.apply(intent).expect("intent accepted");
    }
    let stored = board.task(new_id).expect("stored");
    assert_eq!(stored.row_index(), geometry::row_at(150.0));

    // Clicking the bar's center opens the editor instead of starting a drag.
    let scene = build_scene(&snapshot(board.tasks(), &config, &view), vec2(1200.0, 600.0));
    let center = scene.bars().next().expect("bar").rect.center();
    let click = reduce(view, InputEvent::PointerDown(center), board.tasks(), &config);
    assert_eq!(click.intents, vec![Intent::RequestEditor(new_id)]);
    assert!(!click.state.is_dragging());
}

#[test]
fn render_loop_repaints_identical_pixels() {
    let config = config();
    let view = ViewState::default();
    let tasks = vec![Task::new("Build", jan(2), jan(6))];
    let snap = snapshot(&tasks, &config, &view);

    let mut render_loop = RenderLoop::new();
    render_loop.start();
    let mut first = RasterSurface::new();
    let mut second = RasterSurface::new();
    render_loop.frame(Some(&mut first), &snap, vec2(640.0, 240.0), 2.0, &NoopScheduler);
    render_loop.frame(Some(&mut second), &snap, vec2(640.0, 240.0), 2.0, &NoopScheduler);

    assert_eq!(render_loop.scenes_built(), 1);
    assert_eq!((first.width(), first.height()), (1280, 480));
    assert_eq!(first.to_rgba8(), second.to_rgba8());

    // Unassigned medium-priority bar, sampled away from grid lines and text.
    let expected = theme::priority_color(TaskPriority::Medium);
    assert_eq!(first.pixel(310 * 2, 116 * 2), Some(expected));
    assert_eq!(first.pixel(300, 20), Some(theme::BG_HEADER));

    render_loop.stop();
    let mut third = RasterSurface::new();
    assert!(render_loop
        .frame(Some(&mut third), &snap, vec2(640.0, 240.0), 2.0, &NoopScheduler)
        .is_none());
    assert_eq!(third.width(), 0);
}

#[test]
fn exported_frame_is_a_png() {
    let config = config();
    let view = ViewState::default();
    let tasks = vec![Task::new("Build", jan(2), jan(6))];
    let scene = build_scene(&snapshot(&tasks, &config, &view), vec2(320.0, 200.0));
    let frame = io::rasterize(&scene, 1.0);

    let mut bytes = Vec::new();
    png_export::encode_png(&frame, &mut bytes).expect("encodes");
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    let pdf = pdf_export::encode_pdf(&frame).expect("encodes");
    assert!(pdf.starts_with(b"%PDF-"));
}

#[test]
fn exported_frame_carries_bar_and_header_text() {
    let config = config();
    let view = ViewState::default();
    let tasks = vec![Task::new("Build", jan(2), jan(6))];
    let scene = build_scene(&snapshot(&tasks, &config, &view), vec2(640.0, 240.0));
    let frame = io::rasterize(&scene, 1.0);

    // Title label sits at the bar's left inset; the bar body is a flat color.
    let bar = theme::priority_color(TaskPriority::Medium);
    let label_ink = (112..160)
        .flat_map(|x| (100..130).map(move |y| (x, y)))
        .filter(|&(x, y)| frame.pixel(x, y).is_some_and(|c| c != bar))
        .count();
    assert!(label_ink > 10, "no title glyphs in the bar");

    // Day number "2" in the header cell of Jan 2.
    let header_ink = (130..170)
        .flat_map(|x| (25..45).map(move |y| (x, y)))
        .filter(|&(x, y)| frame.pixel(x, y).is_some_and(|c| c != theme::BG_HEADER))
        .count();
    assert!(header_ink > 5, "no header glyphs");
}

proptest! {
    #[test]
    fn short_tasks_render_at_minimum_width(
        start_min in 0i64..100_000,
        length_min in -3_000i64..1_700,
        unit_idx in 0usize..3,
    ) {
        let config = TimelineConfig {
            unit: TimeUnit::all()[unit_idx],
            ..config()
        };
        let start = jan(1) + chrono::Duration::minutes(start_min);
        let task = Task::new("Short", start, start + chrono::Duration::minutes(length_min));
        let view = ViewState::default();
        let rect = geometry::resolve_task_rect(&task, &view.mapper(&config));
        // 1700 minutes is under 120 px even at day granularity.
        prop_assert_eq!(rect.width(), MIN_TASK_WIDTH);
    }
}
