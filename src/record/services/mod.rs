//! Application services for record lifecycle orchestration.

mod lifecycle;
pub mod query_builder;
pub mod validation;

pub use lifecycle::{RecordService, RecordServiceError, RecordServiceResult};
pub use query_builder::{ListCriteria, build_query};
pub use validation::{
    CreateRecordRequest, FieldViolation, ListRecordsRequest, RequestValidationError,
    UpdateRecordRequest,
};
