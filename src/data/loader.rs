use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value as JsonValue};

use super::model::{ClosingRank, Dataset, Record};

/// Source column labels, compared after whitespace normalisation.
pub const INSTITUTE: &str = "Institute";
pub const PROGRAM: &str = "Program";
pub const QUOTA: &str = "Quota";
pub const CATEGORY: &str = "Category";
pub const CLOSING_RANK: &str = "Closing Rank";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an admissions dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – `[{ "Institute": "...", "Closing\r\nRank": 1234, ... }, ...]`
/// * `.csv`  – header row with the same labels
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} records ({} categories, {} quotas) from {}",
        dataset.len(),
        dataset.categories().len(),
        dataset.quotas().len(),
        path.display()
    );
    Ok(dataset)
}

/// Collapse every whitespace run (including `\r\n`) to a single space, so
/// `"Closing\r\nRank"` and `"Closing Rank"` name the same column.
pub fn normalize_label(label: &str) -> String {
    label.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

/// Parse the records-oriented JSON export of the admissions table.
pub fn parse_json(text: &str) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let rows = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let record = Record::new(
            &json_text(obj, INSTITUTE),
            &json_text(obj, PROGRAM),
            &json_text(obj, QUOTA),
            &json_text(obj, CATEGORY),
            json_rank(obj),
        );
        if !record.closing_rank.is_valid() {
            log::debug!("Row {i}: closing rank is not a number");
        }
        records.push(record);
    }

    Ok(Dataset::from_records(records))
}

fn json_field<'a>(obj: &'a Map<String, JsonValue>, label: &str) -> Option<&'a JsonValue> {
    obj.get(label).or_else(|| {
        obj.iter()
            .find(|(key, _)| normalize_label(key) == label)
            .map(|(_, v)| v)
    })
}

fn json_text(obj: &Map<String, JsonValue>, label: &str) -> String {
    match json_field(obj, label) {
        Some(JsonValue::String(s)) => s.clone(),
        Some(JsonValue::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn json_rank(obj: &Map<String, JsonValue>) -> ClosingRank {
    match json_field(obj, CLOSING_RANK) {
        Some(JsonValue::Number(n)) => {
            if let Some(i) = n.as_i64() {
                ClosingRank::new(i)
            } else {
                n.as_f64()
                    .filter(|f| f.is_finite())
                    .map(|f| ClosingRank::new(f.trunc() as i64))
                    .unwrap_or(ClosingRank::INVALID)
            }
        }
        Some(JsonValue::String(s)) => ClosingRank::parse(s),
        _ => ClosingRank::INVALID,
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with the source labels, one seat bucket per row.
fn load_csv(path: &Path) -> Result<Dataset> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

/// Parse CSV text with the same labels as the JSON source.
pub fn parse_csv(text: &str) -> Result<Dataset> {
    read_csv(csv::Reader::from_reader(text.as_bytes()))
}

fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Dataset> {
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(normalize_label)
        .collect();

    let column = |label: &str| headers.iter().position(|h| h == label);
    let institute_idx = column(INSTITUTE);
    let program_idx = column(PROGRAM);
    let quota_idx = column(QUOTA);
    let category_idx = column(CATEGORY);
    let rank_idx = column(CLOSING_RANK).context("CSV missing 'Closing Rank' column")?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).unwrap_or("");

        let record = Record::new(
            cell(institute_idx),
            cell(program_idx),
            cell(quota_idx),
            cell(category_idx),
            ClosingRank::parse(cell(Some(rank_idx))),
        );
        if !record.closing_rank.is_valid() {
            log::debug!("CSV row {row_no}: closing rank is not a number");
        }
        records.push(record);
    }

    Ok(Dataset::from_records(records))
}
