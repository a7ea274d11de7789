//! Shared fixtures for in-memory record service tests.

use crate::test_helpers::StepClock;
use docket::record::{
    adapters::memory::InMemoryRecordRepository,
    domain::Record,
    ports::RecordRepository,
    services::{CreateRecordRequest, ListRecordsRequest, RecordService},
};
use rstest::fixture;
use std::sync::Arc;

/// Service type used by in-memory integration tests.
pub type TestService = RecordService<dyn RecordRepository, StepClock>;

/// Creates a service over an empty in-memory repository.
#[fixture]
pub fn service() -> TestService {
    let repository: Arc<dyn RecordRepository> = Arc::new(InMemoryRecordRepository::new());
    RecordService::new(repository, Arc::new(StepClock::default()))
}

/// Builds a create request for `title` with the given completion flag.
pub fn create_request(title: &str, is_done: bool) -> CreateRecordRequest {
    CreateRecordRequest {
        title: Some(title.to_owned()),
        details: None,
        is_done: Some(is_done),
        record_date: None,
    }
}

/// Builds a list request from `(parameter, value)` pairs.
pub fn list_request(params: &[(&str, &str)]) -> ListRecordsRequest {
    let mut request = ListRecordsRequest::default();
    for &(name, value) in params {
        let slot = match name {
            "q" => &mut request.q,
            "is_done" => &mut request.is_done,
            "record_date_before" => &mut request.record_date_before,
            "record_date_after" => &mut request.record_date_after,
            "sort" => &mut request.sort,
            "order" => &mut request.order,
            "offset" => &mut request.offset,
            "limit" => &mut request.limit,
            other => panic!("unknown list parameter {other}"),
        };
        *slot = Some(value.to_owned());
    }
    request
}

/// Creates one record per `(title, is_done)` pair, in order.
pub async fn seed(service: &TestService, rows: &[(&str, bool)]) -> Vec<Record> {
    let mut created = Vec::with_capacity(rows.len());
    for &(title, is_done) in rows {
        created.push(
            service
                .create(&create_request(title, is_done))
                .await
                .expect("seed record"),
        );
    }
    created
}

/// Returns the titles of `records` in order.
pub fn titles(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.title().as_str().to_owned())
        .collect()
}
