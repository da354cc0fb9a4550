use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// ClosingRank – the last rank admitted for one seat bucket
// ---------------------------------------------------------------------------

/// Closing rank of a seat bucket. `None` marks a source value that did not
/// contain an integer; such a record can never satisfy a rank test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ClosingRank(Option<i64>);

impl ClosingRank {
    pub const INVALID: ClosingRank = ClosingRank(None);

    pub fn new(rank: i64) -> Self {
        ClosingRank(Some(rank))
    }

    pub fn value(&self) -> Option<i64> {
        self.0
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    /// Parse the leading integer of a raw text cell (`"  1234\r\n"`, `"87 (R)"`).
    pub fn parse(raw: &str) -> Self {
        ClosingRank(parse_leading_int(raw))
    }
}

impl From<Option<i64>> for ClosingRank {
    fn from(value: Option<i64>) -> Self {
        ClosingRank(value)
    }
}

impl fmt::Display for ClosingRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(rank) => write!(f, "{rank}"),
            None => write!(f, "NaN"),
        }
    }
}

/// Extract the leading integer of `s`: optional whitespace, an optional sign,
/// then at least one ASCII digit. Everything after the digits is ignored.
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

// ---------------------------------------------------------------------------
// Record – one row of the admissions table
// ---------------------------------------------------------------------------

/// One institute/program seat bucket with its historical closing rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub institute: String,
    pub program: String,
    pub quota: String,
    pub category: String,
    pub closing_rank: ClosingRank,
}

impl Record {
    /// Build a record, trimming the four text fields.
    pub fn new(
        institute: &str,
        program: &str,
        quota: &str,
        category: &str,
        closing_rank: ClosingRank,
    ) -> Self {
        Record {
            institute: institute.trim().to_string(),
            program: program.trim().to_string(),
            quota: quota.trim().to_string(),
            category: category.trim().to_string(),
            closing_rank,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full loaded table. Read-only once built; the category and quota
/// choices are derived at construction and can never drift from `records`.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
    categories: Vec<String>,
    quotas: Vec<String>,
}

impl Dataset {
    /// Build the choice lists from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let categories = sorted_unique(records.iter().map(|r| r.category.as_str()));
        let quotas = sorted_unique(records.iter().map(|r| r.quota.as_str()));
        Dataset {
            records,
            categories,
            quotas,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Sorted unique categories across every record.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Sorted unique quotas across every record.
    pub fn quotas(&self) -> &[String] {
        &self.quotas
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Lexicographically sorted, de-duplicated copy of `values`.
pub fn sorted_unique<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    values
        .into_iter()
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_int_ignores_trailing_residue() {
        assert_eq!(parse_leading_int("1234\r\n"), Some(1234));
        assert_eq!(parse_leading_int("  87 (R)"), Some(87));
        assert_eq!(parse_leading_int("-5x"), Some(-5));
        assert_eq!(parse_leading_int("+42"), Some(42));
    }

    #[test]
    fn leading_int_rejects_text_without_digits() {
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("--"), None);
        assert_eq!(parse_leading_int("NA"), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("x12"), None);
    }

    #[test]
    fn invalid_rank_displays_as_nan() {
        assert_eq!(ClosingRank::INVALID.to_string(), "NaN");
        assert_eq!(ClosingRank::new(310).to_string(), "310");
    }

    #[test]
    fn rank_parse_is_idempotent_over_display() {
        for raw in ["  1500\n", "77abc", "nope", "0"] {
            let once = ClosingRank::parse(raw);
            let twice = ClosingRank::parse(&once.to_string());
            assert_eq!(once, twice, "re-parsing {raw:?}");
        }
    }

    #[test]
    fn dataset_choices_are_sorted_and_unique() {
        let ds = Dataset::from_records(vec![
            Record::new("B", "IT", " HR ", "SC", ClosingRank::new(5)),
            Record::new("A", "CS", "AI", " GEN", ClosingRank::INVALID),
            Record::new("C", "ME", "HR", "GEN", ClosingRank::new(9)),
        ]);
        assert_eq!(ds.categories(), ["GEN", "SC"]);
        assert_eq!(ds.quotas(), ["AI", "HR"]);
    }
}
