//! Shared world state for record lifecycle BDD scenarios.

use std::sync::Arc;

use crate::test_helpers::StepClock;
use docket::record::{
    adapters::memory::InMemoryRecordRepository,
    domain::Record,
    services::{RecordService, RecordServiceError},
};
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestRecordService = RecordService<InMemoryRecordRepository, StepClock>;

/// Scenario world for record lifecycle behaviour tests.
pub struct RecordLifecycleWorld {
    pub service: TestRecordService,
    pub current: Option<Record>,
    pub last_result: Option<Result<Record, RecordServiceError>>,
}

impl RecordLifecycleWorld {
    /// Creates a world over an empty store.
    #[must_use]
    pub fn new() -> Self {
        let service = RecordService::new(
            Arc::new(InMemoryRecordRepository::new()),
            Arc::new(StepClock::default()),
        );

        Self {
            service,
            current: None,
            last_result: None,
        }
    }

    /// Returns the record the scenario is working with.
    ///
    /// # Errors
    ///
    /// Returns an error when no record has been created yet.
    pub fn current(&self) -> Result<&Record, eyre::Report> {
        self.current
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing current record in scenario world"))
    }
}

impl Default for RecordLifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> RecordLifecycleWorld {
    RecordLifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
