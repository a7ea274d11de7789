//! Filtering, sorting, and pagination properties of record listings.

use super::helpers::{TestService, list_request, seed, service, titles};
use docket::record::services::RecordServiceError;
use rstest::rstest;

const MIXED: [(&str, bool); 6] = [
    ("pear", true),
    ("apple", false),
    ("fig", true),
    ("banana", false),
    ("cherry", true),
    ("date", false),
];

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn done_filter_returns_only_done_records(service: TestService) {
    seed(&service, &MIXED).await;

    let listed = service
        .list(&list_request(&[("is_done", "true")]))
        .await
        .expect("list");

    assert_eq!(listed.len(), 3);
    assert!(listed.iter().all(|record| record.is_done()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn title_ascending_is_non_decreasing(service: TestService) {
    seed(&service, &MIXED).await;

    let listed = service
        .list(&list_request(&[("sort", "title"), ("order", "asc")]))
        .await
        .expect("list");
    let names = titles(&listed);

    assert!(names.windows(2).all(|pair| pair.first() <= pair.last()));
    assert_eq!(names.len(), MIXED.len());
}

#[rstest]
#[case(0, 2)]
#[case(2, 3)]
#[case(5, 10)]
#[case(6, 1)]
#[case(50, 5)]
#[tokio::test(flavor = "multi_thread")]
async fn pages_are_windows_of_the_full_ordering(
    service: TestService,
    #[case] offset: usize,
    #[case] limit: usize,
) {
    seed(&service, &MIXED).await;
    let full = titles(
        &service
            .list(&list_request(&[("sort", "title"), ("order", "asc")]))
            .await
            .expect("full listing"),
    );

    let offset_text = offset.to_string();
    let limit_text = limit.to_string();
    let page = titles(
        &service
            .list(&list_request(&[
                ("sort", "title"),
                ("order", "asc"),
                ("offset", &offset_text),
                ("limit", &limit_text),
            ]))
            .await
            .expect("page"),
    );

    let expected: Vec<String> = full.into_iter().skip(offset).take(limit).collect();
    assert_eq!(page, expected);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_matches_title_or_details_case_insensitively(service: TestService) {
    seed(&service, &MIXED).await;

    let listed = service
        .list(&list_request(&[("q", "AN"), ("sort", "title"), ("order", "asc")]))
        .await
        .expect("list");

    assert_eq!(titles(&listed), vec!["banana"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_treats_wildcards_literally(service: TestService) {
    seed(&service, &[("100% done", true), ("plain", true)]).await;

    let listed = service
        .list(&list_request(&[("q", "%")]))
        .await
        .expect("list");

    assert_eq!(titles(&listed), vec!["100% done"]);
}

#[rstest]
#[case("sort", "bogus")]
#[case("order", "bogus")]
#[case("limit", "1000")]
#[tokio::test(flavor = "multi_thread")]
async fn bad_parameters_are_rejected(
    service: TestService,
    #[case] name: &str,
    #[case] value: &str,
) {
    let result = service.list(&list_request(&[(name, value)])).await;
    let Err(RecordServiceError::InvalidQuery(invalid)) = result else {
        panic!("expected InvalidQuery, got {result:?}");
    };
    assert!(invalid.has_violation(name));
}
