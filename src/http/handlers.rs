//! Request handlers for the record API.

use super::{
    dto::{HealthResponse, RecordResponse, WelcomeResponse},
    error::ApiErrorResponse,
};
use crate::record::{
    domain::RecordId,
    ports::RecordRepository,
    services::{CreateRecordRequest, ListRecordsRequest, RecordService, UpdateRecordRequest},
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use mockable::Clock;

/// Service state shared by every record handler.
pub type RecordApiState<C> = RecordService<dyn RecordRepository, C>;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// `POST /records`
pub async fn create_record<C>(
    State(service): State<RecordApiState<C>>,
    payload: Result<Json<CreateRecordRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RecordResponse>)>
where
    C: Clock + Send + Sync + 'static,
{
    let Json(request) = payload?;
    let record = service.create(&request).await?;
    Ok((StatusCode::CREATED, Json(RecordResponse::from(record))))
}

/// `GET /records`
pub async fn list_records<C>(
    State(service): State<RecordApiState<C>>,
    params: Result<Query<ListRecordsRequest>, QueryRejection>,
) -> ApiResult<Json<Vec<RecordResponse>>>
where
    C: Clock + Send + Sync + 'static,
{
    let Query(request) = params?;
    let records = service.list(&request).await?;
    Ok(Json(records.iter().map(RecordResponse::from).collect()))
}

/// `GET /records/{id}`
pub async fn get_record<C>(
    State(service): State<RecordApiState<C>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<RecordResponse>>
where
    C: Clock + Send + Sync + 'static,
{
    let Path(raw_id) = id?;
    let record = service.get(RecordId::new(raw_id)).await?;
    Ok(Json(RecordResponse::from(record)))
}

/// `PUT /records/{id}`
pub async fn update_record<C>(
    State(service): State<RecordApiState<C>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateRecordRequest>, JsonRejection>,
) -> ApiResult<Json<RecordResponse>>
where
    C: Clock + Send + Sync + 'static,
{
    let Path(raw_id) = id?;
    let Json(request) = payload?;
    let record = service.update(RecordId::new(raw_id), &request).await?;
    Ok(Json(RecordResponse::from(record)))
}

/// `DELETE /records/{id}`
pub async fn delete_record<C>(
    State(service): State<RecordApiState<C>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode>
where
    C: Clock + Send + Sync + 'static,
{
    let Path(raw_id) = id?;
    service.delete(RecordId::new(raw_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /health`
pub async fn health<C>(State(service): State<RecordApiState<C>>) -> Json<HealthResponse>
where
    C: Clock + Send + Sync + 'static,
{
    Json(HealthResponse {
        status: "ok".to_owned(),
        timestamp: service.now(),
    })
}

/// `GET /` when no `index.html` is present.
pub async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to Record API".to_owned(),
    })
}
