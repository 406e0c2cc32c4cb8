use egui::{Color32, RichText, Ui};

use crate::model::{Board, TaskId};
use crate::timeline::scene::task_color;
use crate::ui::theme;

/// Actions that the roster panel can request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RosterAction {
    None,
    Edit(TaskId),
    Delete(TaskId),
    AddMember,
}

fn section_header(ui: &mut Ui, title: &str, count: usize) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(title).strong().size(15.0).color(theme::TEXT_PRIMARY));
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("({count})"))
                .size(11.0)
                .color(theme::TEXT_SECONDARY),
        );
    });
    ui.add_space(4.0);
}

/// Render the left-side panel: team roster on top, task list below.
pub fn show_roster_panel(board: &Board, selected: Option<TaskId>, ui: &mut Ui) -> RosterAction {
    let mut action = RosterAction::None;

    ui.add_space(2.0);
    section_header(ui, "Team", board.members().len());

    for member in board.members() {
        ui.horizontal(|ui| {
            // Initials avatar
            let (rect, _) = ui.allocate_exact_size(egui::vec2(26.0, 26.0), egui::Sense::hover());
            ui.painter().circle_filled(rect.center(), 13.0, member.color);
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                member.initials(),
                egui::FontId::proportional(11.0),
                Color32::WHITE,
            );

            ui.vertical(|ui| {
                ui.label(RichText::new(&member.name).size(12.0).color(theme::TEXT_PRIMARY));
                if let Some(role) = &member.role {
                    ui.label(RichText::new(role).size(10.0).color(theme::TEXT_SECONDARY));
                }
            });
        });
        ui.add_space(2.0);
    }

    ui.add_space(4.0);
    let btn = egui::Button::new(
        RichText::new(format!("{}  Add Member", egui_phosphor::regular::USER_PLUS))
            .color(Color32::WHITE)
            .size(12.0),
    )
    .fill(theme::ACCENT)
    .rounding(egui::Rounding::same(5.0));
    if ui.add_sized([ui.available_width(), 30.0], btn).clicked() {
        action = RosterAction::AddMember;
    }

    ui.add_space(6.0);
    ui.separator();
    ui.add_space(2.0);

    section_header(ui, "Tasks", board.tasks().len());

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            if board.tasks().is_empty() {
                ui.label(
                    RichText::new("Drag on the timeline to create a task")
                        .size(10.5)
                        .color(theme::TEXT_SECONDARY),
                );
            }

            for task in board.tasks() {
                let is_selected = selected == Some(task.id);
                let frame = egui::Frame {
                    fill: if is_selected { theme::BG_SELECTED } else { Color32::TRANSPARENT },
                    rounding: egui::Rounding::same(4.0),
                    inner_margin: egui::Margin::symmetric(6.0, 4.0),
                    outer_margin: egui::Margin::ZERO,
                    stroke: egui::Stroke::NONE,
                    shadow: egui::epaint::Shadow::NONE,
                };

                let frame_resp = frame.show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = 6.0;

                        let (dot_rect, _) = ui.allocate_exact_size(egui::vec2(8.0, 8.0), egui::Sense::hover());
                        ui.painter()
                            .circle_filled(dot_rect.center(), 4.0, task_color(task, board.members()));

                        ui.vertical(|ui| {
                            ui.add(egui::Label::new(RichText::new(&task.title).size(12.0)).truncate());
                            ui.label(
                                RichText::new(format!(
                                    "{} → {}",
                                    task.start.format("%m/%d"),
                                    task.end.format("%m/%d")
                                ))
                                .size(10.0)
                                .color(theme::TEXT_SECONDARY),
                            );
                        });

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            let del_btn = ui.add(
                                egui::Button::new(RichText::new("✕").size(10.0).color(theme::TEXT_SECONDARY))
                                    .frame(false),
                            );
                            if del_btn.on_hover_text("Delete task").clicked() {
                                action = RosterAction::Delete(task.id);
                            }

                            if let Some(progress) = task.progress {
                                let pbar = egui::ProgressBar::new(f32::from(progress.min(100)) / 100.0)
                                    .desired_width(44.0)
                                    .fill(theme::ACCENT)
                                    .rounding(egui::Rounding::same(3.0));
                                ui.add(pbar);
                            }
                        });
                    });
                });

                let row_click = ui.interact(
                    frame_resp.response.rect,
                    egui::Id::new(("task-row", task.id)),
                    egui::Sense::click(),
                );
                if row_click.clicked() && action == RosterAction::None {
                    action = RosterAction::Edit(task.id);
                }

                ui.add_space(1.0);
            }
        });

    action
}
