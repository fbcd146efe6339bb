//! Seller balance handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::dto::{BalanceResponse, CashOperationResponse};
use crate::error::{db_error, ApiResult};
use crate::extractors::ClientLocale;
use crate::state::AppState;

/// `GET /api/v1/sellers/{id}/balance`
pub async fn get_balance(
    State(state): State<Arc<AppState>>,
    ClientLocale(locale): ClientLocale,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<BalanceResponse>> {
    let balance = state
        .db
        .balance_repo()
        .find(id)
        .await
        .map_err(|e| db_error(e, &state.catalog, locale))?;

    Ok(Json(BalanceResponse::from(balance)))
}

/// `POST /api/v1/sellers/{id}/payments`
///
/// Clears the seller's balance to zero in either direction, recording the
/// transferred amount as a cash operation.
pub async fn clear_balance(
    State(state): State<Arc<AppState>>,
    ClientLocale(locale): ClientLocale,
    Path(id): Path<Uuid>,
) -> ApiResult<(StatusCode, Json<CashOperationResponse>)> {
    let operation = state
        .db
        .balance_repo()
        .clear(id)
        .await
        .map_err(|e| db_error(e, &state.catalog, locale))?;

    Ok((StatusCode::CREATED, Json(CashOperationResponse::from(operation))))
}

/// `GET /api/v1/sellers/{id}/payments`
pub async fn payment_history(
    State(state): State<Arc<AppState>>,
    ClientLocale(locale): ClientLocale,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<CashOperationResponse>>> {
    let operations = state
        .db
        .balance_repo()
        .history(id, 100)
        .await
        .map_err(|e| db_error(e, &state.catalog, locale))?;

    Ok(Json(
        operations
            .into_iter()
            .map(CashOperationResponse::from)
            .collect(),
    ))
}
