use super::{COLUMNS, ExportError, Report};

/// Render the table as CSV: the column header, then one line per row.
pub fn render(report: &Report) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(COLUMNS)?;
    for row in &report.rows {
        writer.write_record(row)?;
    }
    writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}
