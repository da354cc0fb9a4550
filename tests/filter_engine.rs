use ipu_predictor::data::filter::{Query, eligible_indices};
use ipu_predictor::data::model::{ClosingRank, Dataset, Record};

fn rec(institute: &str, program: &str, quota: &str, category: &str, rank: Option<i64>) -> Record {
    Record::new(institute, program, quota, category, ClosingRank::from(rank))
}

fn mixed_dataset() -> Dataset {
    Dataset::from_records(vec![
        rec("A", "CS", "HR", "GEN", Some(100)),
        rec("B", "IT", "HR", "GEN", Some(50)),
        rec("C", "CS", "AI", "GEN", Some(500)),
        rec("D", "ME", "HR", "SC", Some(900)),
        rec("E", "CS", "HR", "GEN", None),
        rec("F", "EE", "HR", "GEN", Some(60)),
        rec("G", "CS", "HR", "GEN", Some(2000)),
    ])
}

#[test]
fn worked_example_keeps_only_institute_a() {
    let ds = Dataset::from_records(vec![
        rec("A", "CS", "HR", "GEN", Some(100)),
        rec("B", "IT", "HR", "GEN", Some(50)),
    ]);
    let query = Query::new("Jane Doe", "60", "GEN", "HR");

    let result = eligible_indices(&ds, &query);

    assert_eq!(result, [0]);
    assert_eq!(ds.records()[result[0]].institute, "A");
}

#[test]
fn results_are_exactly_the_eligible_records() {
    let ds = mixed_dataset();
    for rank in ["1", "60", "61", "100", "2000", "2001"] {
        for category in ["GEN", "SC", "OBC"] {
            for quota in ["HR", "AI"] {
                let query = Query::new("x", rank, category, quota);
                let result = eligible_indices(&ds, &query);

                for (i, record) in ds.records().iter().enumerate() {
                    let eligible = record
                        .closing_rank
                        .value()
                        .is_some_and(|closing| query.rank.unwrap() <= closing)
                        && record.category == category
                        && record.quota == quota;
                    assert_eq!(
                        result.contains(&i),
                        eligible,
                        "record {i} with rank={rank} category={category} quota={quota}"
                    );
                }
            }
        }
    }
}

#[test]
fn results_keep_dataset_order() {
    let ds = mixed_dataset();
    let result = eligible_indices(&ds, &Query::new("x", "10", "GEN", "HR"));
    assert_eq!(result, [0, 1, 5, 6]);
    assert!(result.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn boundary_rank_is_eligible() {
    let ds = mixed_dataset();
    let result = eligible_indices(&ds, &Query::new("x", "60", "GEN", "HR"));
    assert_eq!(result, [0, 5, 6]);
}

#[test]
fn unparseable_query_rank_matches_nothing() {
    let ds = mixed_dataset();
    for rank in ["", "abc", "--", " "] {
        let result = eligible_indices(&ds, &Query::new("x", rank, "GEN", "HR"));
        assert!(result.is_empty(), "rank text {rank:?}");
    }
}

#[test]
fn query_rank_uses_leading_integer() {
    let query = Query::new("x", " 75th", "GEN", "HR");
    assert_eq!(query.rank, Some(75));
    assert_eq!(query.rank_text, " 75th");
}

#[test]
fn empty_dataset_is_safe() {
    let ds = Dataset::default();
    assert!(ds.categories().is_empty());
    assert!(ds.quotas().is_empty());
    assert!(eligible_indices(&ds, &Query::new("x", "1", "GEN", "HR")).is_empty());
}
