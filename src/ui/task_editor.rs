use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use egui::{Color32, RichText, Ui};

use crate::model::{MemberId, Task, TaskId, TaskPriority, TeamMember};
use crate::ui::theme;

/// Actions the editor can request.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    None,
    Save(Task),
    Delete(TaskId),
    Close,
}

/// Editable copy of a task. Nothing reaches the board until Save.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub assignee: Option<MemberId>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    // Time of day survives the date pickers untouched.
    start_time: NaiveTime,
    end_time: NaiveTime,
    pub progress: u8,
    pub priority: TaskPriority,
    pub row: u32,
}

impl TaskDraft {
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            assignee: task.assignee,
            start_date: task.start.date(),
            end_date: task.end.date(),
            start_time: task.start.time(),
            end_time: task.end.time(),
            progress: task.progress_percent(),
            priority: task.priority.unwrap_or_default(),
            row: task.row_index(),
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start_date.and_time(self.start_time)
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end_date.and_time(self.end_time)
    }

    /// Pull the other edge along when one date picker crosses it.
    pub fn keep_order(&mut self, start_moved: bool) {
        if self.start() <= self.end() {
            return;
        }
        if start_moved {
            self.end_date = self.start_date;
            self.end_time = self.start_time;
        } else {
            self.start_date = self.end_date;
            self.start_time = self.end_time;
        }
    }

    pub fn to_task(&self) -> Task {
        let title = self.title.trim();
        let description = self.description.trim();
        Task {
            id: self.id,
            title: if title.is_empty() { "Untitled".to_string() } else { title.to_string() },
            start: self.start(),
            end: self.end(),
            assignee: self.assignee,
            description: (!description.is_empty()).then(|| description.to_string()),
            progress: Some(self.progress.min(100)),
            priority: Some(self.priority),
            row: Some(self.row),
        }
    }
}

fn field_label(ui: &mut Ui, text: &str) {
    ui.label(
        RichText::new(text)
            .size(10.0)
            .color(theme::TEXT_SECONDARY)
            .strong(),
    );
}

/// Render the task editor window for `draft`.
pub fn show_task_editor(ctx: &egui::Context, draft: &mut TaskDraft, members: &[TeamMember]) -> EditorAction {
    let mut action = EditorAction::None;
    let mut open = true;

    egui::Window::new("Edit Task")
        .id(egui::Id::new("task-editor"))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(340.0)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.spacing_mut().item_spacing.y = 6.0;

            // ── Title ─────────────────────────────────────────────────────
            field_label(ui, "Title");
            ui.add_sized(
                [ui.available_width(), 24.0],
                egui::TextEdit::singleline(&mut draft.title).font(egui::FontId::proportional(13.0)),
            );

            // ── Description ───────────────────────────────────────────────
            field_label(ui, "Description");
            ui.add_sized(
                [ui.available_width(), 60.0],
                egui::TextEdit::multiline(&mut draft.description).hint_text("What needs doing..."),
            );

            // ── Assignee ──────────────────────────────────────────────────
            field_label(ui, "Assignee");
            let assignee_label = draft
                .assignee
                .and_then(|id| members.iter().find(|m| m.id == id))
                .map(|m| m.name.clone())
                .unwrap_or_else(|| "Unassigned".to_string());
            egui::ComboBox::from_id_salt("assignee_combo")
                .selected_text(assignee_label)
                .width(ui.available_width())
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut draft.assignee, None, "Unassigned");
                    for member in members {
                        let label = RichText::new(format!("● {}", member.name)).color(member.color);
                        ui.selectable_value(&mut draft.assignee, Some(member.id), label);
                    }
                });

            // ── Dates ─────────────────────────────────────────────────────
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    field_label(ui, "Start");
                    let resp = ui.add(egui_extras::DatePickerButton::new(&mut draft.start_date).id_salt("dp_start"));
                    if resp.changed() {
                        draft.keep_order(true);
                    }
                });
                ui.add_space(8.0);
                ui.vertical(|ui| {
                    field_label(ui, "End");
                    let resp = ui.add(egui_extras::DatePickerButton::new(&mut draft.end_date).id_salt("dp_end"));
                    if resp.changed() {
                        draft.keep_order(false);
                    }
                });
            });

            // ── Progress ──────────────────────────────────────────────────
            field_label(ui, "Progress");
            ui.add(egui::Slider::new(&mut draft.progress, 0..=100).suffix("%"));

            // ── Priority & row ────────────────────────────────────────────
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    field_label(ui, "Priority");
                    egui::ComboBox::from_id_salt("priority_combo")
                        .selected_text(draft.priority.label())
                        .show_ui(ui, |ui| {
                            for p in TaskPriority::all() {
                                let label = RichText::new(p.label()).color(theme::priority_color(*p));
                                ui.selectable_value(&mut draft.priority, *p, label);
                            }
                        });
                });
                ui.add_space(8.0);
                ui.vertical(|ui| {
                    field_label(ui, "Row");
                    ui.add(egui::DragValue::new(&mut draft.row).range(0..=99));
                });
            });

            ui.add_space(4.0);
            ui.separator();

            ui.horizontal(|ui| {
                let save = egui::Button::new(
                    RichText::new(format!("{}  Save", egui_phosphor::regular::CHECK)).color(Color32::WHITE),
                )
                .fill(theme::ACCENT);
                if ui.add(save).clicked() {
                    action = EditorAction::Save(draft.to_task());
                }
                if ui.button("Cancel").clicked() {
                    action = EditorAction::Close;
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let delete = ui.button(
                        RichText::new(format!("{}  Delete", egui_phosphor::regular::TRASH)).color(theme::ACCENT),
                    );
                    if delete.clicked() {
                        action = EditorAction::Delete(draft.id);
                    }
                });
            });
        });

    if !open && action == EditorAction::None {
        action = EditorAction::Close;
    }
    action
}
