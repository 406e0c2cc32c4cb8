use egui::{menu, RichText, Ui};
use egui_phosphor::regular as icons;

use crate::app::GanttItApp;
use crate::io::ExportFormat;
use crate::ui::theme;

/// Render the top toolbar.
pub fn show_toolbar(app: &mut GanttItApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.label(RichText::new("GanttIt").strong().size(16.0).color(theme::ACCENT));
        ui.add_space(12.0);

        if ui.button(format!("{}  Configure", icons::GEAR)).clicked() {
            app.open_config_dialog();
        }
        if ui.button(format!("{}  Add Member", icons::USER_PLUS)).clicked() {
            app.show_add_member = true;
        }
        for &format in ExportFormat::all() {
            let icon = match format {
                ExportFormat::Png => icons::IMAGE,
                ExportFormat::Pdf => icons::FILE_PDF,
            };
            let label = format!("{icon}  Export {}", format.extension().to_uppercase());
            if ui.button(label).clicked() {
                app.export(ui.ctx(), format);
            }
        }
        if ui
            .button(format!("{}  Reset View", icons::ARROW_COUNTER_CLOCKWISE))
            .clicked()
        {
            app.reset_view();
        }
        if ui.button(icons::INFO).on_hover_text("About").clicked() {
            app.show_about = true;
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                RichText::new(format!("Zoom: {:.0}%", app.view.zoom * 100.0))
                    .size(11.0)
                    .color(theme::TEXT_SECONDARY),
            );
            ui.add_space(12.0);
            ui.label(
                RichText::new("Drag to create · Click to edit · Scroll to pan · Ctrl+Scroll to zoom")
                    .size(10.5)
                    .weak(),
            );
        });
    });
}
