//! `PostgreSQL` repository implementation for record storage.

use super::{
    models::{NewRecordRow, RecordChangeset, RecordRow},
    schema::records,
};
use crate::record::{
    domain::{
        PersistedRecordData, Record, RecordChanges, RecordDetails, RecordDraft, RecordId,
        RecordPredicate, RecordQuery, RecordTitle, SortDirection, SortField,
    },
    ports::{RecordRepository, RecordRepositoryError, RecordRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by record adapters.
pub type RecordPgPool = Pool<ConnectionManager<PgConnection>>;

/// Idempotent DDL for the `records` table.
pub const CREATE_RECORDS_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_records/up.sql");

/// `PostgreSQL`-backed record repository.
///
/// Diesel calls are synchronous, so every operation runs on the blocking
/// thread pool via [`tokio::task::spawn_blocking`].
#[derive(Debug, Clone)]
pub struct PostgresRecordRepository {
    pool: RecordPgPool,
}

impl PostgresRecordRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: RecordPgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool for `database_url` and ensures the `records`
    /// table exists.
    ///
    /// # Errors
    ///
    /// Returns [`RecordRepositoryError::Persistence`] when the pool cannot
    /// be built or the schema cannot be applied.
    pub async fn connect(database_url: &str, max_size: u32) -> RecordRepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool =
            tokio::task::spawn_blocking(move || Pool::builder().max_size(max_size).build(manager))
                .await
                .map_err(RecordRepositoryError::persistence)?
                .map_err(RecordRepositoryError::persistence)?;
        let repository = Self::new(pool);
        repository.ensure_schema().await?;
        tracing::info!(max_size, "connected record store to PostgreSQL");
        Ok(repository)
    }

    /// Creates the `records` table when it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`RecordRepositoryError::Persistence`] when the DDL fails.
    pub async fn ensure_schema(&self) -> RecordRepositoryResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(CREATE_RECORDS_SQL)
                .map_err(RecordRepositoryError::from)
        })
        .await
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub const fn pool(&self) -> &RecordPgPool {
        &self.pool
    }

    async fn run_blocking<F, T>(&self, f: F) -> RecordRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> RecordRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(RecordRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(RecordRepositoryError::persistence)?
    }
}

#[async_trait]
impl RecordRepository for PostgresRecordRepository {
    async fn insert(&self, draft: &RecordDraft) -> RecordRepositoryResult<Record> {
        let new_row = to_new_row(draft);
        self.run_blocking(move |connection| {
            let row = diesel::insert_into(records::table)
                .values(&new_row)
                .returning(RecordRow::as_returning())
                .get_result::<RecordRow>(connection)?;
            row_to_record(row)
        })
        .await
    }

    async fn find_by_id(&self, id: RecordId) -> RecordRepositoryResult<Option<Record>> {
        self.run_blocking(move |connection| {
            let row = records::table
                .find(id.value())
                .select(RecordRow::as_select())
                .first::<RecordRow>(connection)
                .optional()?;
            row.map(row_to_record).transpose()
        })
        .await
    }

    async fn query(&self, query: &RecordQuery) -> RecordRepositoryResult<Vec<Record>> {
        let lookup = query.clone();
        self.run_blocking(move |connection| {
            load_matching_rows(connection, &lookup)?
                .into_iter()
                .map(row_to_record)
                .collect()
        })
        .await
    }

    async fn update(
        &self,
        id: RecordId,
        changes: &RecordChanges,
        updated_at: DateTime<Utc>,
    ) -> RecordRepositoryResult<Record> {
        let pending = changes.clone();
        self.run_blocking(move |connection| {
            connection.transaction::<_, RecordRepositoryError, _>(|tx_connection| {
                let current = records::table
                    .find(id.value())
                    .select(RecordRow::as_select())
                    .for_update()
                    .get_result::<RecordRow>(tx_connection)
                    .optional()?
                    .ok_or(RecordRepositoryError::NotFound(id))?;

                let mut record = row_to_record(current)?;
                record.apply_changes(&pending, updated_at);

                let row = diesel::update(records::table.find(id.value()))
                    .set(&to_changeset(&record))
                    .returning(RecordRow::as_returning())
                    .get_result::<RecordRow>(tx_connection)?;
                row_to_record(row)
            })
        })
        .await
    }

    async fn delete(&self, id: RecordId) -> RecordRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(records::table.find(id.value())).execute(connection)?;
            if deleted == 0 {
                return Err(RecordRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

/// Orders a boxed statement by a column in the given direction.
macro_rules! order_by {
    ($statement:expr, $column:expr, $direction:expr) => {
        match $direction {
            SortDirection::Asc => $statement.order($column.asc()),
            SortDirection::Desc => $statement.order($column.desc()),
        }
    };
}

fn load_matching_rows(
    connection: &mut PgConnection,
    query: &RecordQuery,
) -> RecordRepositoryResult<Vec<RecordRow>> {
    let mut statement = records::table.select(RecordRow::as_select()).into_boxed();

    for predicate in query.predicates() {
        statement = match predicate {
            RecordPredicate::TextContains(text) => {
                let pattern = contains_pattern(text);
                // NULL details leave the OR unknown, which the WHERE clause
                // treats as false unless the title matched.
                statement.filter(
                    records::title
                        .ilike(pattern.clone())
                        .or(records::details.ilike(pattern).assume_not_null()),
                )
            }
            RecordPredicate::IsDone(expected) => statement.filter(records::is_done.eq(*expected)),
            RecordPredicate::RecordDateOnOrBefore(bound) => {
                statement.filter(records::record_date.le(*bound))
            }
            RecordPredicate::RecordDateOnOrAfter(bound) => {
                statement.filter(records::record_date.ge(*bound))
            }
        };
    }

    let direction = query.direction();
    statement = match query.sort_field() {
        SortField::Id => order_by!(statement, records::id, direction),
        SortField::Title => order_by!(statement, records::title, direction),
        SortField::IsDone => order_by!(statement, records::is_done, direction),
        SortField::RecordDate => order_by!(statement, records::record_date, direction),
        SortField::CreatedAt => order_by!(statement, records::created_at, direction),
        SortField::UpdatedAt => order_by!(statement, records::updated_at, direction),
    };

    let pagination = query.pagination();
    let Ok(offset) = i64::try_from(pagination.offset()) else {
        // No table holds more rows than `i64::MAX`, so the window is empty.
        return Ok(Vec::new());
    };
    statement
        .then_order_by(records::id.asc())
        .offset(offset)
        .limit(i64::from(pagination.limit()))
        .load::<RecordRow>(connection)
        .map_err(RecordRepositoryError::from)
}

/// Builds an `ILIKE` pattern matching `text` as a literal substring.
fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn to_new_row(draft: &RecordDraft) -> NewRecordRow {
    NewRecordRow {
        title: draft.title().as_str().to_owned(),
        details: draft.details().map(|details| details.as_str().to_owned()),
        is_done: draft.is_done(),
        record_date: draft.record_date(),
        created_at: draft.created_at(),
    }
}

fn to_changeset(record: &Record) -> RecordChangeset {
    RecordChangeset {
        title: record.title().as_str().to_owned(),
        details: record.details().map(|details| details.as_str().to_owned()),
        is_done: record.is_done(),
        record_date: record.record_date(),
        updated_at: record.updated_at(),
    }
}

fn row_to_record(row: RecordRow) -> RecordRepositoryResult<Record> {
    let RecordRow {
        id,
        title,
        details,
        is_done,
        record_date,
        created_at,
        updated_at,
    } = row;

    let title = RecordTitle::new(title).map_err(RecordRepositoryError::persistence)?;
    let details = details
        .map(RecordDetails::new)
        .transpose()
        .map_err(RecordRepositoryError::persistence)?;

    Ok(Record::from_persisted(PersistedRecordData {
        id: RecordId::new(id),
        title,
        details,
        is_done,
        record_date,
        created_at,
        updated_at,
    }))
}
