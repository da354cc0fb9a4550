//! Printable export of the displayed predictions.
//!
//! A [`Report`] is the format-independent document (titles plus table rows
//! in display order). [`render`] turns it into bytes for one
//! [`ExportFormat`]; [`write_report`] also puts those bytes on disk.

pub mod layout;
pub mod pdf;
pub mod spreadsheet;

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::data::filter::Query;
use crate::data::model::Record;

/// Table header, in column order.
pub const COLUMNS: [&str; 5] = ["Institute", "Program", "Quota", "Category", "Closing Rank"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("writing {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("encoding CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("buffering export: {0}")]
    Io(#[from] std::io::Error),
    #[error("rendering PDF: {0}")]
    Pdf(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Pdf,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Csv => "csv",
        }
    }

    /// The format offered next to this one.
    pub fn other(self) -> Self {
        match self {
            ExportFormat::Pdf => ExportFormat::Csv,
            ExportFormat::Csv => ExportFormat::Pdf,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "PDF",
            ExportFormat::Csv => "CSV",
        }
    }
}

/// One table row, cells in [`COLUMNS`] order.
pub type Row = [String; 5];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub name: String,
    pub title: String,
    pub subtitle: String,
    pub rows: Vec<Row>,
}

impl Report {
    pub fn new<'a>(query: &Query, records: impl IntoIterator<Item = &'a Record>) -> Self {
        let rows = records
            .into_iter()
            .map(|r| {
                [
                    r.institute.clone(),
                    r.program.clone(),
                    r.quota.clone(),
                    r.category.clone(),
                    r.closing_rank.to_string(),
                ]
            })
            .collect();
        Report {
            name: query.name.clone(),
            title: format!("IPU Predicted Colleges for {}", query.name),
            subtitle: format!(
                "Rank: {} | Category: {} | Quota: {}",
                query.rank_text, query.category, query.quota
            ),
            rows,
        }
    }

    /// `IPU_<name>_Predictions.<ext>`, whitespace runs in the name collapsed
    /// to one underscore.
    pub fn file_name(&self, format: ExportFormat) -> String {
        format!(
            "IPU_{}_Predictions.{}",
            underscore_whitespace(&self.name),
            format.extension()
        )
    }
}

/// Replace every run of whitespace with a single `_`.
pub fn underscore_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;
    for c in s.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push('_');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// Encode the report in the given format.
pub fn render(report: &Report, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Pdf => pdf::render(report, &layout::PageLayout::default()),
        ExportFormat::Csv => spreadsheet::render(report),
    }
}

/// Render the report and write it to `path`.
pub fn write_report(report: &Report, format: ExportFormat, path: &Path) -> Result<(), ExportError> {
    let bytes = render(report, format)?;
    std::fs::write(path, bytes).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!(
        "Exported {} rows as {} to {}",
        report.rows.len(),
        format.label(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_runs_become_one_underscore() {
        assert_eq!(underscore_whitespace("Jane Doe"), "Jane_Doe");
        assert_eq!(underscore_whitespace("Jane \t Q\nDoe"), "Jane_Q_Doe");
        assert_eq!(underscore_whitespace(" Jane "), "_Jane_");
    }

    #[test]
    fn file_name_uses_format_extension() {
        let report = Report::new(&Query::new("Ravi Kumar", "10", "GEN", "HR"), []);
        assert_eq!(report.file_name(ExportFormat::Pdf), "IPU_Ravi_Kumar_Predictions.pdf");
        assert_eq!(report.file_name(ExportFormat::Csv), "IPU_Ravi_Kumar_Predictions.csv");
    }
}
