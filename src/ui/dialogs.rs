use chrono::NaiveDate;
use egui::{Color32, Context, RichText, Window};

use crate::app::GanttItApp;
use crate::model::{Intent, TimeUnit, TimelineConfig};
use crate::ui::theme;

/// Working copy behind the timeline config dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDraft {
    pub origin: NaiveDate,
    pub unit: TimeUnit,
    pub units_to_show: u32,
    pub unit_width: f64,
}

impl ConfigDraft {
    pub fn from_config(config: &TimelineConfig) -> Self {
        Self {
            origin: config.origin.date(),
            unit: config.unit,
            units_to_show: config.units_to_show,
            unit_width: config.unit_width,
        }
    }

    pub fn to_config(&self) -> TimelineConfig {
        TimelineConfig {
            unit: self.unit,
            units_to_show: self.units_to_show,
            unit_width: self.unit_width,
            ..TimelineConfig::starting(self.origin)
        }
    }
}

fn primary_button(ui: &mut egui::Ui, text: &str) -> bool {
    let btn = egui::Button::new(RichText::new(text).color(Color32::WHITE))
        .fill(theme::ACCENT)
        .rounding(egui::Rounding::same(4.0));
    ui.add_sized([90.0, 28.0], btn).clicked()
}

/// Render the "Add Member" dialog.
pub fn show_add_member_dialog(app: &mut GanttItApp, ctx: &Context) {
    let mut should_close = false;
    let mut submit = false;
    Window::new(RichText::new("Add Member").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([320.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);
            egui::Grid::new("add_member_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Name").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [200.0, 24.0],
                        egui::TextEdit::singleline(&mut app.new_member_name).hint_text("Full name..."),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Role").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [200.0, 24.0],
                        egui::TextEdit::singleline(&mut app.new_member_role).hint_text("Optional"),
                    );
                    ui.end_row();
                });

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let can_add = !app.new_member_name.trim().is_empty();
                ui.add_enabled_ui(can_add, |ui| {
                    if primary_button(ui, "Add") {
                        submit = true;
                    }
                });
                if ui.add_sized([90.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    should_close = true;
                }
            });
        });

    if submit {
        let role = Some(app.new_member_role.clone());
        let name = std::mem::take(&mut app.new_member_name);
        app.new_member_role.clear();
        app.apply_intents(vec![Intent::AddMember { name, role }]);
        should_close = true;
    }
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_add_member = false;
    }
}

/// Render the timeline configuration dialog. Only a validated config is
/// committed.
pub fn show_config_dialog(app: &mut GanttItApp, ctx: &Context) {
    let mut should_close = false;
    let mut apply = false;
    Window::new(RichText::new("Timeline Settings").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([360.0, 0.0])
        .show(ctx, |ui| {
            let draft = &mut app.config_draft;
            ui.add_space(4.0);
            egui::Grid::new("config_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Start date").color(theme::TEXT_SECONDARY));
                    ui.add(egui_extras::DatePickerButton::new(&mut draft.origin).id_salt("cfg_origin"));
                    ui.end_row();

                    ui.label(RichText::new("Unit").color(theme::TEXT_SECONDARY));
                    egui::ComboBox::from_id_salt("cfg_unit")
                        .selected_text(draft.unit.label())
                        .show_ui(ui, |ui| {
                            for unit in TimeUnit::all() {
                                ui.selectable_value(&mut draft.unit, *unit, unit.label());
                            }
                        });
                    ui.end_row();

                    ui.label(RichText::new("Units shown").color(theme::TEXT_SECONDARY));
                    ui.add(egui::Slider::new(&mut draft.units_to_show, 10..=100));
                    ui.end_row();

                    ui.label(RichText::new("Unit width").color(theme::TEXT_SECONDARY));
                    ui.add(egui::Slider::new(&mut draft.unit_width, 40.0..=240.0).suffix(" px"));
                    ui.end_row();
                });

            if let Some(err) = &app.config_error {
                ui.add_space(4.0);
                ui.label(RichText::new(err).color(theme::ACCENT).size(11.0));
            }

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if primary_button(ui, "Apply") {
                    apply = true;
                }
                if ui.add_sized([90.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    should_close = true;
                }
            });
        });

    if apply {
        should_close = app.commit_config();
    }
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_config = false;
        app.config_error = None;
    }
}

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut GanttItApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([280.0, 180.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("GanttIt").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION"))).color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("Drag to create, click to edit.");
                ui.label("Scroll to pan, Ctrl+scroll to zoom.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}
