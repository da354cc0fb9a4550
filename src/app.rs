use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui;

use ipu_predictor::config::AppConfig;
use ipu_predictor::data::loader;
use ipu_predictor::export::{self, ExportFormat};
use ipu_predictor::state::{Action, Notice, Session};

use crate::ui::{Command, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PredictorApp {
    pub session: Session,
    config: AppConfig,
    /// Pending background load, if any.
    loading: Option<Receiver<Action>>,
}

impl PredictorApp {
    /// Create the app and start loading the configured dataset.
    pub fn new(config: AppConfig, ctx: &egui::Context) -> Self {
        let mut app = Self {
            session: Session::new(),
            config,
            loading: None,
        };
        app.start_loading(app.config.data_path.clone(), ctx.clone());
        app
    }

    /// Load `path` on a worker thread; the result arrives in `poll_loader`.
    fn start_loading(&mut self, path: PathBuf, ctx: egui::Context) {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let action = match loader::load_file(&path) {
                Ok(dataset) => Action::Loaded(dataset),
                Err(e) => {
                    log::error!("Error loading IPU data: {e:#}");
                    Action::LoadFailed(format!("Failed to load IPU data: {e:#}"))
                }
            };
            // The receiver is gone only if the app already shut down.
            let _ = tx.send(action);
            ctx.request_repaint();
        });
        self.loading = Some(rx);
    }

    fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    fn poll_loader(&mut self) {
        let received = match &self.loading {
            Some(rx) => rx.try_recv(),
            None => return,
        };
        match received {
            Ok(action) => {
                self.loading = None;
                self.dispatch(action);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.loading = None;
                self.dispatch(Action::LoadFailed("Failed to load IPU data.".into()));
            }
        }
    }

    fn dispatch(&mut self, action: Action) {
        let session = std::mem::take(&mut self.session);
        self.session = session.apply(action);
    }

    fn run(&mut self, command: Command, ctx: &egui::Context) {
        match command {
            Command::Apply(action) => self.dispatch(action),
            Command::Export(format) => self.export(format),
            Command::OpenDataset => {
                if let Some(path) = open_file_dialog() {
                    self.start_loading(path, ctx.clone());
                }
            }
        }
    }

    fn export(&mut self, format: ExportFormat) {
        let report = self.session.report();
        let mut dialog = rfd::FileDialog::new()
            .set_title("Save predictions")
            .set_file_name(report.file_name(format))
            .add_filter(format.label(), &[format.extension()]);
        if let Some(dir) = &self.config.export_dir {
            dialog = dialog.set_directory(dir);
        }
        let Some(path) = dialog.save_file() else {
            return;
        };

        let notice = match export::write_report(&report, format, &path) {
            Ok(()) => Notice::info(format!("Saved {}", path.display())),
            Err(e) => {
                log::error!("Failed to export predictions: {e}");
                Notice::error(format!("Error: {e}"))
            }
        };
        self.dispatch(Action::Notify(notice));
    }
}

impl eframe::App for PredictorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loader();
        let mut commands = Vec::new();

        // ---- Top panel: title and status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.session, self.is_loading(), &mut commands);
        });

        // ---- Left side panel: query form ----
        egui::SidePanel::left("query_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::query_panel(ui, &self.session, &mut commands);
            });

        // ---- Central panel: results ----
        egui::CentralPanel::default().show(ctx, |ui| {
            table::results_view(
                ui,
                &self.session,
                self.is_loading(),
                self.config.export_format,
                &mut commands,
            );
        });

        for command in commands {
            self.run(command, ctx);
        }
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

fn open_file_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open admissions data")
        .add_filter("Supported files", &["json", "csv"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file()
}
