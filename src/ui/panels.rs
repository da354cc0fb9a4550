use eframe::egui::{self, Color32, RichText, Ui};

use ipu_predictor::state::{Action, Session};

use super::Command;

// ---------------------------------------------------------------------------
// Left side panel – query form
// ---------------------------------------------------------------------------

/// Render the name / rank / category / quota form.
pub fn query_panel(ui: &mut Ui, session: &Session, commands: &mut Vec<Command>) {
    ui.heading("Your details");
    ui.separator();

    let dataset = session.dataset();
    let mut form = session.form().clone();
    let mut changed = false;

    ui.label("Name");
    changed |= ui
        .add(egui::TextEdit::singleline(&mut form.name).hint_text("Your Name"))
        .changed();

    ui.label("Rank");
    changed |= ui
        .add(egui::TextEdit::singleline(&mut form.rank).hint_text("Your JEE Rank"))
        .changed();

    ui.label("Category");
    changed |= choice(
        ui,
        "category",
        "Select Category",
        &mut form.category,
        dataset.categories(),
    );

    ui.label("Quota");
    changed |= choice(ui, "quota", "Select Quota", &mut form.quota, dataset.quotas());

    if changed {
        commands.push(Command::Apply(Action::EditForm(form)));
    }

    ui.add_space(8.0);
    ui.horizontal(|ui: &mut Ui| {
        let predict = egui::Button::new("Predict Colleges");
        if ui.add_enabled(session.can_submit(), predict).clicked() {
            commands.push(Command::Apply(Action::Submit));
        }
        if ui.button("Reset").clicked() {
            commands.push(Command::Apply(Action::Reset));
        }
    });
}

/// Required single choice; returns whether the value changed.
fn choice(ui: &mut Ui, id: &str, placeholder: &str, value: &mut String, options: &[String]) -> bool {
    let before = value.clone();
    let shown = if value.is_empty() {
        placeholder.to_string()
    } else {
        value.clone()
    };
    egui::ComboBox::from_id_salt(id)
        .selected_text(shown)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in options {
                ui.selectable_value(value, option.clone(), option.as_str());
            }
        });
    *value != before
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / status bar.
pub fn top_bar(ui: &mut Ui, session: &Session, loading: bool, commands: &mut Vec<Command>) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                commands.push(Command::OpenDataset);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.strong("IPU College Predictor 2025");
        ui.separator();

        let dataset = session.dataset();
        if loading {
            ui.spinner();
            ui.label("Loading IPU data…");
        } else if !dataset.is_empty() {
            ui.label(format!(
                "{} records, {} categories, {} quotas",
                dataset.len(),
                dataset.categories().len(),
                dataset.quotas().len()
            ));
        }

        if let Some(notice) = session.notice() {
            ui.separator();
            let mut text = RichText::new(notice.text.as_str());
            if notice.is_error {
                text = text.color(Color32::RED);
            }
            ui.label(text);
        }
    });
}
