use printpdf::{BuiltinFont, Mm, PdfDocument};

use super::layout::{PageLayout, paginate};
use super::{ExportError, Report};

fn pdf_error(e: impl std::fmt::Debug) -> ExportError {
    ExportError::Pdf(format!("{e:?}"))
}

/// Render the report as an A4 PDF: title and query echo on the first page,
/// then the table, with the column header repeated on every page.
pub fn render(report: &Report, layout: &PageLayout) -> Result<Vec<u8>, ExportError> {
    let width = Mm(layout.page_width);
    let height = Mm(layout.page_height);
    // PDF coordinates grow upwards from the bottom edge.
    let y = |from_top: f32| Mm(layout.page_height - from_top);

    let (doc, first_page, first_layer) = PdfDocument::new(&report.title, width, height, "Layer 1");
    let mut first = Some((first_page, first_layer));
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_error)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_error)?;

    let column_x = layout.column_x();
    let pages = paginate(report, layout);

    for (page_no, page) in pages.iter().enumerate() {
        let (page_idx, layer_idx) = match first.take() {
            Some(indices) => indices,
            None => doc.add_page(width, height, "Layer 1"),
        };
        let layer = doc.get_page(page_idx).get_layer(layer_idx);

        if page_no == 0 {
            layer.use_text(
                report.title.as_str(),
                layout.title_pt,
                Mm(layout.margin),
                y(layout.title_y),
                &bold,
            );
            layer.use_text(
                report.subtitle.as_str(),
                layout.title_pt - 3.0,
                Mm(layout.margin),
                y(layout.subtitle_y),
                &regular,
            );
        }

        for (line_no, line) in page.lines.iter().enumerate() {
            // Baseline sits one line below the row's top edge.
            let top = page.table_y + layout.line_height * (line_no + 1) as f32;
            let font = if line_no == 0 { &bold } else { &regular };
            for (cell, x) in line.iter().zip(column_x) {
                if !cell.is_empty() {
                    layer.use_text(cell.as_str(), layout.body_pt, Mm(x), y(top), font);
                }
            }
        }
    }

    log::debug!("Rendered {} PDF page(s) for {:?}", pages.len(), report.name);
    doc.save_to_bytes().map_err(pdf_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::Query;

    #[test]
    fn empty_report_renders_a_document() {
        let report = Report::new(&Query::new("Jane Doe", "60", "GEN", "HR"), []);
        let bytes = render(&report, &PageLayout::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
