use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use ipu_predictor::data::model::Record;
use ipu_predictor::export::{COLUMNS, ExportFormat};
use ipu_predictor::state::{Action, Phase, Session};

use super::Command;

// ---------------------------------------------------------------------------
// Results (central panel)
// ---------------------------------------------------------------------------

/// Render the prediction results, or the placeholder for the current phase.
pub fn results_view(
    ui: &mut Ui,
    session: &Session,
    loading: bool,
    export_format: ExportFormat,
    commands: &mut Vec<Command>,
) {
    match session.phase() {
        Phase::Empty => {
            let message = if loading {
                "Loading IPU data…"
            } else {
                "No admissions data loaded  (File → Open…)"
            };
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading(message);
            });
        }
        Phase::Loaded => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Enter your details and press Predict Colleges");
            });
        }
        Phase::NoResult => {
            ui.add_space(16.0);
            ui.vertical_centered(|ui: &mut Ui| {
                ui.label(
                    RichText::new("No result found")
                        .size(18.0)
                        .color(Color32::LIGHT_RED),
                );
            });
        }
        Phase::Submitted => submitted(ui, session, export_format, commands),
    }
}

fn submitted(
    ui: &mut Ui,
    session: &Session,
    export_format: ExportFormat,
    commands: &mut Vec<Command>,
) {
    let name = session.query().map(|q| q.name.as_str()).unwrap_or_default();
    ui.heading(format!("Predicted Colleges for {name}"));
    ui.add_space(4.0);

    ui.horizontal(|ui: &mut Ui| {
        for format in [export_format, export_format.other()] {
            if ui.button(format!("Download {}", format.label())).clicked() {
                commands.push(Command::Export(format));
            }
        }
        let sort = format!(
            "Sort by Closing Rank {}",
            session.sort_direction().arrow()
        );
        if ui.button(sort).clicked() {
            commands.push(Command::Apply(Action::ToggleSort));
        }
    });

    ui.horizontal(|ui: &mut Ui| {
        let refinement = session.refinement();
        ui.label("Filter by Program:");
        if let Some(program) = optional_choice(
            ui,
            "program_filter",
            "All Programs",
            refinement.program.as_deref(),
            &session.program_options(),
        ) {
            commands.push(Command::Apply(Action::FilterProgram(program)));
        }
        ui.label("Filter by College:");
        if let Some(institute) = optional_choice(
            ui,
            "college_filter",
            "All Colleges",
            refinement.institute.as_deref(),
            &session.institute_options(),
        ) {
            commands.push(Command::Apply(Action::FilterCollege(institute)));
        }
    });

    let displayed = session.displayed();
    ui.label(format!(
        "{} of {} results shown",
        displayed.len(),
        session.results().len()
    ));
    ui.separator();
    results_table(ui, &displayed);
}

/// Optional single choice with an "all" entry; returns the new selection
/// when it changed.
fn optional_choice(
    ui: &mut Ui,
    id: &str,
    all_label: &str,
    current: Option<&str>,
    options: &[String],
) -> Option<Option<String>> {
    let mut selected = current.map(str::to_string);
    let shown = selected.clone().unwrap_or_else(|| all_label.to_string());
    egui::ComboBox::from_id_salt(id)
        .selected_text(shown)
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut selected, None, all_label);
            for option in options {
                ui.selectable_value(&mut selected, Some(option.clone()), option.as_str());
            }
        });
    let changed = selected.as_deref() != current;
    changed.then_some(selected)
}

fn results_table(ui: &mut Ui, rows: &[&Record]) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::initial(320.0).at_least(120.0).clip(true))
        .column(Column::initial(260.0).at_least(100.0).clip(true))
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in COLUMNS {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let record = rows[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label(record.institute.as_str());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(record.program.as_str());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(record.quota.as_str());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(record.category.as_str());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(record.closing_rank.to_string());
                });
            });
        });
}
