use std::sync::Arc;

use crate::data::filter::{
    Query, Refinement, SortDirection, eligible_indices, institute_options, program_options,
    refine, sort_by_rank,
};
use crate::data::model::{Dataset, Record};
use crate::export::Report;

// ---------------------------------------------------------------------------
// Form: the editable inputs
// ---------------------------------------------------------------------------

/// Raw text of the four prediction inputs as the user is typing them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryForm {
    pub name: String,
    pub rank: String,
    pub category: String,
    pub quota: String,
}

impl QueryForm {
    /// All four inputs are required.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.rank.trim().is_empty()
            && !self.category.is_empty()
            && !self.quota.is_empty()
    }

    pub fn to_query(&self) -> Query {
        Query::new(&self.name, &self.rank, &self.category, &self.quota)
    }
}

// ---------------------------------------------------------------------------
// Phase and actions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No dataset (not loaded yet, or loading failed).
    #[default]
    Empty,
    /// Dataset available, nothing submitted.
    Loaded,
    /// Last submit matched at least one record.
    Submitted,
    /// Last submit matched nothing.
    NoResult,
}

/// A status line for the top bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Notice {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Notice {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Everything that can change a [`Session`].
#[derive(Debug, Clone)]
pub enum Action {
    Loaded(Dataset),
    LoadFailed(String),
    EditForm(QueryForm),
    Submit,
    Reset,
    ToggleSort,
    FilterProgram(Option<String>),
    FilterCollege(Option<String>),
    Notify(Notice),
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The full prediction session, independent of rendering.
///
/// Only [`Session::apply`] produces a new session; the dataset behind the
/// `Arc` is never mutated.
#[derive(Debug, Clone, Default)]
pub struct Session {
    dataset: Arc<Dataset>,
    form: QueryForm,
    query: Option<Query>,
    /// Result set as dataset indices, in the current sort order.
    results: Vec<usize>,
    sort: SortDirection,
    refinement: Refinement,
    phase: Phase,
    /// Status / error message shown in the UI.
    notice: Option<Notice>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one user or loader action and return the resulting session.
    pub fn apply(self, action: Action) -> Session {
        match action {
            Action::Loaded(dataset) => Session {
                dataset: Arc::new(dataset),
                phase: Phase::Loaded,
                ..Session::default()
            },
            Action::LoadFailed(message) => Session {
                notice: Some(Notice::error(message)),
                ..Session::default()
            },
            Action::EditForm(form) => Session { form, ..self },
            Action::Submit => self.submit(),
            Action::Reset => {
                let phase = if self.dataset.is_empty() {
                    Phase::Empty
                } else {
                    Phase::Loaded
                };
                Session {
                    dataset: self.dataset,
                    phase,
                    ..Session::default()
                }
            }
            Action::ToggleSort => {
                let sort = self.sort.flipped();
                let mut results = self.results;
                sort_by_rank(&self.dataset, &mut results, sort);
                Session {
                    results,
                    sort,
                    ..self
                }
            }
            Action::FilterProgram(program) => Session {
                refinement: Refinement {
                    program,
                    ..self.refinement
                },
                ..self
            },
            Action::FilterCollege(institute) => Session {
                refinement: Refinement {
                    institute,
                    ..self.refinement
                },
                ..self
            },
            Action::Notify(notice) => Session {
                notice: Some(notice),
                ..self
            },
        }
    }

    fn submit(self) -> Session {
        let query = self.form.to_query();
        let results = eligible_indices(&self.dataset, &query);
        let phase = if results.is_empty() {
            Phase::NoResult
        } else {
            Phase::Submitted
        };
        log::info!(
            "Query rank={:?} category={:?} quota={:?} matched {} of {} records",
            query.rank,
            query.category,
            query.quota,
            results.len(),
            self.dataset.len()
        );
        Session {
            query: Some(query),
            results,
            sort: SortDirection::Ascending,
            refinement: Refinement::default(),
            phase,
            ..self
        }
    }

    // -- read access --

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn form(&self) -> &QueryForm {
        &self.form
    }

    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort
    }

    pub fn refinement(&self) -> &Refinement {
        &self.refinement
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// The full result set in the current sort order.
    pub fn results(&self) -> Vec<&Record> {
        self.results
            .iter()
            .filter_map(|&i| self.dataset.get(i))
            .collect()
    }

    /// The result set with the secondary filters applied.
    pub fn displayed(&self) -> Vec<&Record> {
        refine(&self.dataset, &self.results, &self.refinement)
    }

    /// Choices for the program filter, drawn from the current results.
    pub fn program_options(&self) -> Vec<String> {
        program_options(&self.dataset, &self.results)
    }

    /// Choices for the college filter, drawn from the current results.
    pub fn institute_options(&self) -> Vec<String> {
        institute_options(&self.dataset, &self.results)
    }

    /// Whether the form can be submitted.
    pub fn can_submit(&self) -> bool {
        self.phase != Phase::Empty && self.form.is_complete()
    }

    /// Printable report of what is currently displayed.
    pub fn report(&self) -> Report {
        let query = self.query.clone().unwrap_or_default();
        Report::new(&query, self.displayed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ClosingRank;

    fn loaded() -> Session {
        let ds = Dataset::from_records(vec![
            Record::new("A", "CS", "HR", "GEN", ClosingRank::new(100)),
            Record::new("B", "IT", "HR", "GEN", ClosingRank::new(50)),
        ]);
        Session::new().apply(Action::Loaded(ds))
    }

    fn form(rank: &str) -> QueryForm {
        QueryForm {
            name: "Jane Doe".into(),
            rank: rank.into(),
            category: "GEN".into(),
            quota: "HR".into(),
        }
    }

    #[test]
    fn load_failure_keeps_session_empty() {
        let s = Session::new().apply(Action::LoadFailed("Failed to load IPU data.".into()));
        assert_eq!(s.phase(), Phase::Empty);
        assert!(s.dataset().categories().is_empty());
        assert_eq!(s.notice(), Some(&Notice::error("Failed to load IPU data.")));
        assert!(!s.can_submit());
    }

    #[test]
    fn submit_distinguishes_no_result_from_unsubmitted() {
        let s = loaded().apply(Action::EditForm(form("500")));
        assert_eq!(s.phase(), Phase::Loaded);
        let s = s.apply(Action::Submit);
        assert_eq!(s.phase(), Phase::NoResult);
        assert!(s.displayed().is_empty());
    }

    #[test]
    fn notify_keeps_results() {
        let s = loaded()
            .apply(Action::EditForm(form("10")))
            .apply(Action::Submit)
            .apply(Action::Notify(Notice::info("saved")));
        assert_eq!(s.results().len(), 2);
        assert_eq!(s.notice().map(|n| n.text.as_str()), Some("saved"));
    }
}
