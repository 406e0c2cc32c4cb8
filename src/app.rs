use chrono::{NaiveDateTime, NaiveTime, Timelike};
use log::{error, info, warn};

use crate::io::{self, ExportFormat};
use crate::model::{Board, Intent, TaskId, TimelineConfig};
use crate::timeline::{build_scene, RenderLoop, Snapshot, ViewState};
use crate::ui;
use crate::ui::dialogs::ConfigDraft;
use crate::ui::task_editor::{EditorAction, TaskDraft};

/// Main application state.
pub struct GanttItApp {
    pub board: Board,
    pub config: TimelineConfig,
    pub view: ViewState,
    /// Task currently open in the editor.
    pub selected: Option<TaskId>,
    pub editor: Option<TaskDraft>,

    // Dialog state
    pub show_add_member: bool,
    pub show_config: bool,
    pub show_about: bool,
    pub new_member_name: String,
    pub new_member_role: String,
    pub config_draft: ConfigDraft,
    pub config_error: Option<String>,

    // Status message
    pub status_message: String,

    render_loop: RenderLoop,
    /// Logical size of the canvas on the last frame; exports reuse it.
    chart_size: egui::Vec2,
}

impl GanttItApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);
        ui::theme::apply_theme(&cc.egui_ctx);

        let today = chrono::Local::now().date_naive();
        Self::with_board(Board::sample(today.and_time(NaiveTime::MIN)), TimelineConfig::starting(today))
    }

    /// App state around an existing board, with the render loop running.
    pub fn with_board(board: Board, config: TimelineConfig) -> Self {
        let mut render_loop = RenderLoop::new();
        render_loop.start();
        info!(
            "event=app_started tasks={} members={}",
            board.tasks().len(),
            board.members().len()
        );
        Self {
            config_draft: ConfigDraft::from_config(&config),
            board,
            config,
            view: ViewState::default(),
            selected: None,
            editor: None,
            show_add_member: false,
            show_config: false,
            show_about: false,
            new_member_name: String::new(),
            new_member_role: String::new(),
            config_error: None,
            status_message: "Ready".to_string(),
            render_loop,
            chart_size: egui::Vec2::ZERO,
        }
    }

    /// Wall clock at second precision so the scene cache holds within a second.
    fn now() -> NaiveDateTime {
        let now = chrono::Local::now().naive_local();
        now.with_nanosecond(0).unwrap_or(now)
    }

    fn modal_open(&self) -> bool {
        self.editor.is_some() || self.show_add_member || self.show_config || self.show_about
    }

    // --- Intents ---

    /// Apply intents in emission order.
    pub fn apply_intents(&mut self, intents: Vec<Intent>) {
        for intent in intents {
            match intent {
                Intent::RequestEditor(id) => self.open_editor(id),
                intent => {
                    let done = match &intent {
                        Intent::CreateTask(task) => format!("Created '{}'", task.title),
                        Intent::UpdateTask(task) => format!("Updated '{}'", task.title),
                        Intent::DeleteTask(_) => "Task deleted".to_string(),
                        Intent::AddMember { name, .. } => format!("Added {}", name.trim()),
                        Intent::RequestEditor(_) => String::new(),
                    };
                    self.status_message = match self.board.apply(intent) {
                        Ok(()) => done,
                        Err(e) => e.to_string(),
                    };
                }
            }
        }
    }

    pub fn open_editor(&mut self, id: TaskId) {
        match self.board.task(id) {
            Some(task) => {
                self.editor = Some(TaskDraft::from_task(task));
                self.selected = Some(id);
            }
            None => warn!("event=editor_unknown_task id={id}"),
        }
    }

    fn close_editor(&mut self) {
        self.editor = None;
        self.selected = None;
    }

    // --- View & config ---

    pub fn reset_view(&mut self) {
        self.view = ViewState::default();
        self.status_message = "View reset".to_string();
    }

    pub fn open_config_dialog(&mut self) {
        self.config_draft = ConfigDraft::from_config(&self.config);
        self.config_error = None;
        self.show_config = true;
    }

    /// Validate and commit the config draft. Returns whether it was accepted.
    pub fn commit_config(&mut self) -> bool {
        let config = self.config_draft.to_config();
        match config.validate() {
            Ok(()) => {
                info!(
                    "event=config_changed unit={:?} units={} width={}",
                    config.unit, config.units_to_show, config.unit_width
                );
                self.config = config;
                self.config_error = None;
                self.status_message = "Timeline updated".to_string();
                true
            }
            Err(e) => {
                self.config_error = Some(e.to_string());
                false
            }
        }
    }

    // --- Export ---

    /// Ask for a destination and save the current frame there as `format`.
    pub fn export(&mut self, ctx: &egui::Context, format: ExportFormat) {
        let now = Self::now();
        let Some(path) = rfd::FileDialog::new()
            .add_filter(format.label(), &[format.extension()])
            .set_file_name(format.default_file_name(now.date()))
            .save_file()
        else {
            return;
        };

        let snapshot = Snapshot {
            tasks: self.board.tasks(),
            members: self.board.members(),
            config: &self.config,
            view: &self.view,
            selected: self.selected,
            now,
        };
        let scene = build_scene(&snapshot, self.chart_size);
        let frame = io::rasterize(&scene, ctx.pixels_per_point());
        self.status_message = match format.write(&frame, &path) {
            Ok(()) => format!("Exported {}", path.display()),
            Err(e) => {
                error!(
                    "event=export_failed format={} path={} error={e}",
                    format.extension(),
                    path.display()
                );
                format!("Export failed: {e}")
            }
        };
    }
}

impl Drop for GanttItApp {
    fn drop(&mut self) {
        self.render_loop.stop();
    }
}

impl eframe::App for GanttItApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "Tasks: {} · Members: {}",
                                self.board.tasks().len(),
                                self.board.members().len()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_SECONDARY),
                        );
                    });
                });
            });

        // Left panel: roster and task list
        let mut roster_action = ui::roster_panel::RosterAction::None;
        egui::SidePanel::left("roster_panel")
            .default_width(260.0)
            .min_width(200.0)
            .max_width(420.0)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(10.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                roster_action = ui::roster_panel::show_roster_panel(&self.board, self.selected, ui);
            });

        match roster_action {
            ui::roster_panel::RosterAction::Edit(id) => self.apply_intents(vec![Intent::RequestEditor(id)]),
            ui::roster_panel::RosterAction::Delete(id) => {
                if self.selected == Some(id) {
                    self.close_editor();
                }
                self.apply_intents(vec![Intent::DeleteTask(id)]);
            }
            ui::roster_panel::RosterAction::AddMember => self.show_add_member = true,
            ui::roster_panel::RosterAction::None => {}
        }

        // Central panel: timeline canvas
        let interactive = !self.modal_open();
        let now = Self::now();
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_CANVAS)
            .inner_margin(egui::Margin::ZERO);
        let output = egui::CentralPanel::default()
            .frame(chart_frame)
            .show(ctx, |ui| {
                ui::gantt_chart::show_timeline(
                    ui,
                    &self.board,
                    &self.config,
                    &mut self.view,
                    self.selected,
                    now,
                    &mut self.render_loop,
                    interactive,
                )
            })
            .inner;
        self.chart_size = output.size;
        self.apply_intents(output.intents);

        // Task editor
        if let Some(draft) = self.editor.as_mut() {
            let mut action = ui::task_editor::show_task_editor(ctx, draft, self.board.members());
            if action == EditorAction::None && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
                action = EditorAction::Close;
            }
            match action {
                EditorAction::Save(task) => {
                    self.apply_intents(vec![Intent::UpdateTask(task)]);
                    self.close_editor();
                }
                EditorAction::Delete(id) => {
                    self.apply_intents(vec![Intent::DeleteTask(id)]);
                    self.close_editor();
                }
                EditorAction::Close => self.close_editor(),
                EditorAction::None => {}
            }
        }

        // Dialogs
        if self.show_add_member {
            ui::dialogs::show_add_member_dialog(self, ctx);
        }
        if self.show_config {
            ui::dialogs::show_config_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}
