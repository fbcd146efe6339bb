//! Drawing scheduling and result declaration handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::dto::{
    DeclareCommonRequest, DeclareReventadoRequest, DeclareTripleRequest, DrawingResponse,
    OkResponse, ScheduleDrawingRequest,
};
use crate::error::{db_error, ApiError, ApiResult, ErrorCode};
use crate::extractors::ClientLocale;
use crate::state::AppState;

/// `POST /api/v1/drawings`
pub async fn schedule_drawing(
    State(state): State<Arc<AppState>>,
    ClientLocale(locale): ClientLocale,
    Json(request): Json<ScheduleDrawingRequest>,
) -> ApiResult<(StatusCode, Json<DrawingResponse>)> {
    let drawing = state
        .db
        .drawing_repo()
        .schedule(request.lottery_id, request.date)
        .await
        .map_err(|e| db_error(e, &state.catalog, locale))?;

    Ok((StatusCode::CREATED, Json(DrawingResponse::from(drawing))))
}

/// `GET /api/v1/drawings/{id}`
pub async fn get_drawing(
    State(state): State<Arc<AppState>>,
    ClientLocale(locale): ClientLocale,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DrawingResponse>> {
    let drawing = state
        .db
        .drawing_repo()
        .find(id)
        .await
        .map_err(|e| db_error(e, &state.catalog, locale))?
        .ok_or_else(|| {
            ApiError::new(
                ErrorCode::NotFound,
                &state.catalog,
                locale,
                format!("drawing {id} not found"),
            )
        })?;

    Ok(Json(DrawingResponse::from(drawing)))
}

/// `POST /api/v1/drawings/{id}/results/common`
pub async fn declare_common(
    State(state): State<Arc<AppState>>,
    ClientLocale(locale): ClientLocale,
    Path(id): Path<Uuid>,
    Json(request): Json<DeclareCommonRequest>,
) -> ApiResult<(StatusCode, Json<OkResponse>)> {
    let rows: Vec<(i16, Uuid)> = request
        .numbers
        .iter()
        .map(|n| (n.number, n.prize_id))
        .collect();

    state
        .db
        .result_repo()
        .declare_common(id, &rows)
        .await
        .map_err(|e| db_error(e, &state.catalog, locale))?;

    Ok((StatusCode::CREATED, Json(OkResponse::new())))
}

/// `POST /api/v1/drawings/{id}/results/reventado`
pub async fn declare_reventado(
    State(state): State<Arc<AppState>>,
    ClientLocale(locale): ClientLocale,
    Path(id): Path<Uuid>,
    Json(request): Json<DeclareReventadoRequest>,
) -> ApiResult<(StatusCode, Json<OkResponse>)> {
    state
        .db
        .result_repo()
        .declare_reventado(id, request.number, request.ball_type_id)
        .await
        .map_err(|e| db_error(e, &state.catalog, locale))?;

    Ok((StatusCode::CREATED, Json(OkResponse::new())))
}

/// `POST /api/v1/drawings/{id}/results/monazo`
pub async fn declare_monazo(
    State(state): State<Arc<AppState>>,
    ClientLocale(locale): ClientLocale,
    Path(id): Path<Uuid>,
    Json(request): Json<DeclareTripleRequest>,
) -> ApiResult<(StatusCode, Json<OkResponse>)> {
    state
        .db
        .result_repo()
        .declare_monazo(id, request.first, request.second, request.third)
        .await
        .map_err(|e| db_error(e, &state.catalog, locale))?;

    Ok((StatusCode::CREATED, Json(OkResponse::new())))
}

/// `POST /api/v1/drawings/{id}/results/parley`
pub async fn declare_parley(
    State(state): State<Arc<AppState>>,
    ClientLocale(locale): ClientLocale,
    Path(id): Path<Uuid>,
    Json(request): Json<DeclareTripleRequest>,
) -> ApiResult<(StatusCode, Json<OkResponse>)> {
    state
        .db
        .result_repo()
        .declare_parley(id, request.first, request.second, request.third)
        .await
        .map_err(|e| db_error(e, &state.catalog, locale))?;

    Ok((StatusCode::CREATED, Json(OkResponse::new())))
}
