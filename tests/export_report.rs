use ipu_predictor::data::filter::Query;
use ipu_predictor::data::model::{ClosingRank, Record};
use ipu_predictor::export::layout::{PageLayout, paginate};
use ipu_predictor::export::{COLUMNS, ExportFormat, Report, render, write_report};
use tempfile::tempdir;

fn institute_a() -> Record {
    Record::new("A", "CS", "HR", "GEN", ClosingRank::new(100))
}

fn jane() -> Query {
    Query::new("Jane Doe", "60", "GEN", "HR")
}

#[test]
fn single_row_report_matches_record_fields() {
    let a = institute_a();
    let report = Report::new(&jane(), [&a]);

    assert_eq!(report.file_name(ExportFormat::Pdf), "IPU_Jane_Doe_Predictions.pdf");
    assert_eq!(report.title, "IPU Predicted Colleges for Jane Doe");
    assert_eq!(report.subtitle, "Rank: 60 | Category: GEN | Quota: HR");
    assert_eq!(report.rows, [["A", "CS", "HR", "GEN", "100"].map(String::from)]);
}

#[test]
fn csv_export_has_header_then_rows_in_order() {
    let a = institute_a();
    let b = Record::new("B, Delhi", "IT", "HR", "GEN", ClosingRank::new(80));
    let report = Report::new(&jane(), [&b, &a]);

    let text = String::from_utf8(render(&report, ExportFormat::Csv).unwrap()).unwrap();

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], COLUMNS.join(","));
    assert_eq!(lines[1], "\"B, Delhi\",IT,HR,GEN,80");
    assert_eq!(lines[2], "A,CS,HR,GEN,100");
    assert_eq!(lines.len(), 3);
}

#[test]
fn empty_results_still_export() {
    let report = Report::new(&jane(), []);

    let pages = paginate(&report, &PageLayout::default());
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].lines.len(), 1, "header row only");

    let dir = tempdir().unwrap();
    for format in [ExportFormat::Pdf, ExportFormat::Csv] {
        let path = dir.path().join(report.file_name(format));
        write_report(&report, format, &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}

#[test]
fn long_tables_continue_on_new_pages_with_header() {
    let records: Vec<Record> = (0..200)
        .map(|i| Record::new(&format!("Institute {i}"), "CS", "HR", "GEN", ClosingRank::new(i)))
        .collect();
    let report = Report::new(&jane(), &records);
    let layout = PageLayout::default();

    let pages = paginate(&report, &layout);

    assert!(pages.len() > 1);
    assert_eq!(pages[0].table_y, layout.table_y);
    for page in &pages {
        assert_eq!(page.lines[0][0], COLUMNS[0]);
        let bottom = page.table_y + layout.line_height * page.lines.len() as f32;
        assert!(bottom <= layout.page_height - layout.margin + 0.001);
    }
    let body: Vec<&str> = pages
        .iter()
        .flat_map(|p| p.lines[1..].iter().map(|l| l[4].as_str()))
        .collect();
    let expected: Vec<String> = (0..200).map(|i| i.to_string()).collect();
    assert_eq!(body, expected);
}

#[test]
fn long_cells_wrap_inside_their_column() {
    let long = Record::new(
        "University School of Information, Communication & Technology, Guru Gobind Singh Indraprastha University, Sector 16C Dwarka",
        "Computer Science and Engineering",
        "HR",
        "GEN",
        ClosingRank::new(16890),
    );
    let report = Report::new(&jane(), [&long]);
    let layout = PageLayout::default();
    let chars = layout.column_chars();

    let pages = paginate(&report, &layout);
    let body = &pages[0].lines[1..];

    assert!(body.len() > 1);
    for line in body {
        for (cell, width) in line.iter().zip(chars) {
            assert!(cell.chars().count() <= width, "{cell:?} wider than {width}");
        }
    }
    assert_eq!(body[0][4], "16890");
    assert_eq!(body[1][4], "");
}

#[test]
fn pdf_export_is_a_pdf() {
    let a = institute_a();
    let report = Report::new(&jane(), [&a]);
    let dir = tempdir().unwrap();
    let path = dir.path().join(report.file_name(ExportFormat::Pdf));

    write_report(&report, ExportFormat::Pdf, &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}
