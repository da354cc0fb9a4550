use std::cmp::Ordering;

use super::model::{Dataset, Record, parse_leading_int, sorted_unique};

// ---------------------------------------------------------------------------
// Query: what the student entered
// ---------------------------------------------------------------------------

/// A submitted prediction request.
///
/// `rank_text` is kept verbatim for echoing in exports; `rank` is its
/// leading integer, or `None` when the text holds no number (which then
/// matches no record).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    pub name: String,
    pub rank_text: String,
    pub rank: Option<i64>,
    pub category: String,
    pub quota: String,
}

impl Query {
    pub fn new(name: &str, rank_text: &str, category: &str, quota: &str) -> Self {
        Query {
            name: name.to_string(),
            rank_text: rank_text.to_string(),
            rank: parse_leading_int(rank_text),
            category: category.to_string(),
            quota: quota.to_string(),
        }
    }

    /// Whether `record` admits this query.
    ///
    /// A record is eligible when its closing rank is a number, the query
    /// rank is no larger than it, and category and quota match exactly.
    pub fn admits(&self, record: &Record) -> bool {
        let rank_ok = match (self.rank, record.closing_rank.value()) {
            (Some(rank), Some(closing)) => rank <= closing,
            _ => false,
        };
        rank_ok && record.category == self.category && record.quota == self.quota
    }
}

/// Indices of every eligible record, in dataset order.
pub fn eligible_indices(dataset: &Dataset, query: &Query) -> Vec<usize> {
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| query.admits(record))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Refinement: secondary filters and closing-rank ordering
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Arrow shown on the sort toggle.
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

/// Stable sort of result indices by closing rank. Records without a rank
/// (never present in a result set) sort last in either direction.
pub fn sort_by_rank(dataset: &Dataset, indices: &mut [usize], direction: SortDirection) {
    let rank = |i: usize| dataset.get(i).and_then(|r| r.closing_rank.value());
    indices.sort_by(|&a, &b| match (rank(a), rank(b)) {
        (Some(x), Some(y)) => match direction {
            SortDirection::Ascending => x.cmp(&y),
            SortDirection::Descending => y.cmp(&x),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Exact-match program/institute filters; `None` means "all".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Refinement {
    pub program: Option<String>,
    pub institute: Option<String>,
}

impl Refinement {
    pub fn matches(&self, record: &Record) -> bool {
        let program_ok = self.program.as_deref().map_or(true, |p| record.program == p);
        let institute_ok = self
            .institute
            .as_deref()
            .map_or(true, |c| record.institute == c);
        program_ok && institute_ok
    }

    pub fn is_active(&self) -> bool {
        self.program.is_some() || self.institute.is_some()
    }
}

/// Records of `indices` passing `refinement`, keeping the given order.
pub fn refine<'a>(
    dataset: &'a Dataset,
    indices: &[usize],
    refinement: &Refinement,
) -> Vec<&'a Record> {
    indices
        .iter()
        .filter_map(|&i| dataset.get(i))
        .filter(|record| refinement.matches(record))
        .collect()
}

/// Sorted unique programs among the given results.
pub fn program_options(dataset: &Dataset, indices: &[usize]) -> Vec<String> {
    sorted_unique(
        indices
            .iter()
            .filter_map(|&i| dataset.get(i))
            .map(|r| r.program.as_str()),
    )
}

/// Sorted unique institutes among the given results.
pub fn institute_options(dataset: &Dataset, indices: &[usize]) -> Vec<String> {
    sorted_unique(
        indices
            .iter()
            .filter_map(|&i| dataset.get(i))
            .map(|r| r.institute.as_str()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ClosingRank;

    fn rec(institute: &str, rank: Option<i64>) -> Record {
        Record::new(institute, "CS", "HR", "GEN", ClosingRank::from(rank))
    }

    #[test]
    fn equal_rank_is_admitted() {
        let q = Query::new("x", "100", "GEN", "HR");
        assert!(q.admits(&rec("A", Some(100))));
        assert!(!q.admits(&rec("A", Some(99))));
    }

    #[test]
    fn invalid_closing_rank_never_admits() {
        let q = Query::new("x", "1", "GEN", "HR");
        assert!(!q.admits(&rec("A", None)));
    }

    #[test]
    fn non_numeric_query_rank_admits_nothing() {
        let q = Query::new("x", "abc", "GEN", "HR");
        assert_eq!(q.rank, None);
        assert!(!q.admits(&rec("A", Some(i64::MAX))));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let q = Query::new("x", "1", "gen", "HR");
        assert!(!q.admits(&rec("A", Some(10))));
    }

    #[test]
    fn rank_sort_is_stable_and_puts_invalid_last() {
        let ds = Dataset::from_records(vec![
            rec("A", Some(5)),
            rec("B", None),
            rec("C", Some(1)),
            rec("D", Some(5)),
        ]);
        let mut idx = vec![0, 1, 2, 3];
        sort_by_rank(&ds, &mut idx, SortDirection::Ascending);
        assert_eq!(idx, [2, 0, 3, 1]);
        sort_by_rank(&ds, &mut idx, SortDirection::Descending);
        assert_eq!(idx, [0, 3, 2, 1]);
    }
}
