//! Filtering, ordering, and paging in SQL.

use super::helpers::{PreparedStore, draft, prepare_store};
use crate::test_helpers::StepClock;
use chrono::{DateTime, TimeZone, Utc};
use docket::record::{
    domain::{
        Pagination, Record, RecordDetails, RecordPredicate, RecordQuery, SortDirection, SortField,
    },
    ports::RecordRepository,
};
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;

fn day(month: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, month, 1, 0, 0, 0)
        .single()
        .expect("valid date")
}

fn seeded(cluster: &'static TestCluster) -> PreparedStore {
    let store = prepare_store(cluster).expect("store setup");
    let clock = StepClock::default();
    let rows = [
        draft("pear", &clock).with_done(true).with_record_date(day(3)),
        draft("apple", &clock).with_record_date(day(1)),
        draft("fig", &clock)
            .with_done(true)
            .with_details(RecordDetails::new("100% organic_fruit").expect("valid details")),
        draft("banana", &clock).with_record_date(day(2)),
    ];
    for row in &rows {
        store
            .block_on(store.repository.insert(row))
            .expect("seed insert");
    }
    store
}

fn titles(store: &PreparedStore, query: &RecordQuery) -> Vec<String> {
    store
        .block_on(store.repository.query(query))
        .expect("query")
        .iter()
        .map(|record: &Record| record.title().as_str().to_owned())
        .collect()
}

fn by_title() -> RecordQuery {
    RecordQuery::new().sorted_by(SortField::Title, SortDirection::Asc)
}

#[rstest]
fn default_order_is_newest_first(shared_test_cluster: &'static TestCluster) {
    let store = seeded(shared_test_cluster);

    assert_eq!(
        titles(&store, &RecordQuery::new()),
        vec!["banana", "fig", "apple", "pear"]
    );
}

#[rstest]
#[case(RecordPredicate::IsDone(true), vec!["fig", "pear"])]
#[case(RecordPredicate::TextContains("AN".to_owned()), vec!["banana", "fig"])]
#[case(RecordPredicate::TextContains("ORGANIC".to_owned()), vec!["fig"])]
#[case(RecordPredicate::TextContains("0%".to_owned()), vec!["fig"])]
#[case(RecordPredicate::TextContains("c_f".to_owned()), vec!["fig"])]
#[case(RecordPredicate::TextContains("a_p".to_owned()), Vec::<&str>::new())]
#[case(RecordPredicate::RecordDateOnOrAfter(day(2)), vec!["banana", "pear"])]
#[case(RecordPredicate::RecordDateOnOrBefore(day(2)), vec!["apple", "banana"])]
fn predicates_filter_in_sql(
    shared_test_cluster: &'static TestCluster,
    #[case] predicate: RecordPredicate,
    #[case] expected: Vec<&str>,
) {
    let store = seeded(shared_test_cluster);

    assert_eq!(titles(&store, &by_title().with_predicate(predicate)), expected);
}

#[rstest]
fn combined_predicates_require_every_condition(shared_test_cluster: &'static TestCluster) {
    let store = seeded(shared_test_cluster);
    let query = by_title()
        .with_predicate(RecordPredicate::TextContains("a".to_owned()))
        .with_predicate(RecordPredicate::IsDone(true));

    assert_eq!(titles(&store, &query), vec!["fig", "pear"]);
}

#[rstest]
#[case(SortDirection::Asc, vec!["apple", "banana", "pear", "fig"])]
#[case(SortDirection::Desc, vec!["fig", "pear", "banana", "apple"])]
fn undated_records_sort_last_ascending_first_descending(
    shared_test_cluster: &'static TestCluster,
    #[case] direction: SortDirection,
    #[case] expected: Vec<&str>,
) {
    let store = seeded(shared_test_cluster);

    let query = RecordQuery::new().sorted_by(SortField::RecordDate, direction);
    assert_eq!(titles(&store, &query), expected);
}

#[rstest]
fn equal_sort_keys_break_ties_by_identifier(shared_test_cluster: &'static TestCluster) {
    let store = seeded(shared_test_cluster);

    let query = RecordQuery::new().sorted_by(SortField::IsDone, SortDirection::Desc);
    assert_eq!(titles(&store, &query), vec!["pear", "fig", "apple", "banana"]);
}

#[rstest]
fn titles_order_by_code_point_regardless_of_server_locale(
    shared_test_cluster: &'static TestCluster,
) {
    let store = prepare_store(shared_test_cluster).expect("store setup");
    let clock = StepClock::default();
    for title in ["apple", "Banana", "cherry", "Apple"] {
        store
            .block_on(store.repository.insert(&draft(title, &clock)))
            .expect("insert");
    }

    assert_eq!(
        titles(&store, &by_title()),
        vec!["Apple", "Banana", "apple", "cherry"]
    );
}

#[rstest]
#[case(0, 2, vec!["apple", "banana"])]
#[case(1, 2, vec!["banana", "fig"])]
#[case(3, 5, vec!["pear"])]
#[case(4, 5, Vec::<&str>::new())]
#[case(u64::MAX, 10, Vec::<&str>::new())]
fn pagination_windows_the_ordering(
    shared_test_cluster: &'static TestCluster,
    #[case] offset: u64,
    #[case] limit: u64,
    #[case] expected: Vec<&str>,
) {
    let store = seeded(shared_test_cluster);

    let query = by_title().paginated(Pagination::new(offset, limit).expect("valid window"));
    assert_eq!(titles(&store, &query), expected);
}
