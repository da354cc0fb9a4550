use ipu_predictor::export::ExportFormat;
use ipu_predictor::state::Action;

pub mod panels;
pub mod table;

/// What a widget asks the app to do after the frame is drawn.
pub enum Command {
    Apply(Action),
    Export(ExportFormat),
    OpenDataset,
}
