//! Ticket handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::dto::{IssueTicketRequest, OkResponse, TicketResponse};
use crate::error::{db_error, ApiError, ApiResult, ErrorCode};
use crate::extractors::ClientLocale;
use crate::state::AppState;

/// `POST /api/v1/tickets`
pub async fn issue_ticket(
    State(state): State<Arc<AppState>>,
    ClientLocale(locale): ClientLocale,
    Json(request): Json<IssueTicketRequest>,
) -> ApiResult<(StatusCode, Json<TicketResponse>)> {
    let ticket = state
        .db
        .ticket_repo()
        .issue(
            request.drawing_id,
            request.seller_id,
            &request.buyer_name,
            &request.lines,
        )
        .await
        .map_err(|e| db_error(e, &state.catalog, locale))?;

    Ok((StatusCode::CREATED, Json(TicketResponse::from(ticket))))
}

/// `GET /api/v1/tickets/{id}`
pub async fn get_ticket(
    State(state): State<Arc<AppState>>,
    ClientLocale(locale): ClientLocale,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<TicketResponse>> {
    let ticket = state
        .db
        .ticket_repo()
        .find(id)
        .await
        .map_err(|e| db_error(e, &state.catalog, locale))?
        .ok_or_else(|| {
            ApiError::new(
                ErrorCode::NotFound,
                &state.catalog,
                locale,
                format!("ticket {id} not found"),
            )
        })?;

    Ok(Json(TicketResponse::from(ticket)))
}

/// `POST /api/v1/tickets/{id}/cancel`
pub async fn cancel_ticket(
    State(state): State<Arc<AppState>>,
    ClientLocale(locale): ClientLocale,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<OkResponse>> {
    state
        .db
        .ticket_repo()
        .cancel(id)
        .await
        .map_err(|e| db_error(e, &state.catalog, locale))?;

    Ok(Json(OkResponse::new()))
}
