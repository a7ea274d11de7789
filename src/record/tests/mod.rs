//! Unit tests for the record bounded context.


use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::Mutex;

/// Clock that returns a fixed start time and advances one second per read.
pub(super) struct StepClock {
    next: Mutex<DateTime<Utc>>,
}

impl StepClock {
    pub(super) fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            next: Mutex::new(start),
        }
    }
}

impl Default for StepClock {
    fn default() -> Self {
        Self::starting_at(epoch())
    }
}

impl Clock for StepClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let mut next = self.next.lock().expect("clock lock poisoned");
        let now = *next;
        *next = now + Duration::seconds(1);
        now
    }
}

/// 2026-01-01T00:00:00Z.
pub(super) fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
        .single()
        .expect("valid epoch")
}

pub(super) fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .expect("valid date")
}

/// Builds a stored record with the given title and no optional fields.
pub(super) fn stored(id: i64, title: &str) -> crate::record::domain::Record {
    use crate::record::domain::{PersistedRecordData, Record, RecordId, RecordTitle};

    Record::from_persisted(PersistedRecordData {
        id: RecordId::new(id),
        title: RecordTitle::new(title).expect("valid test title"),
        details: None,
        is_done: false,
        record_date: None,
        created_at: epoch() + Duration::seconds(id),
        updated_at: None,
    })
}
