//! Settlement handlers
//!
//! Four endpoints, one per variant. Each delegates to the billing engine
//! with the endpoint's variant tag; a drawing of another variant is refused
//! before anything is written.

use axum::{extract::State, Json};
use std::sync::Arc;

use sorteo_billing::{OwnerOrAdminAccess, SettlementEngine};
use sorteo_types::{DrawingId, LotteryVariant};

use crate::dto::{SettleRequest, SettleResponse};
use crate::error::{settlement_error, ApiResult};
use crate::extractors::{CallerActor, ClientLocale};
use crate::state::AppState;

/// `POST /api/v1/billing/common`
pub async fn settle_common(
    state: State<Arc<AppState>>,
    actor: CallerActor,
    locale: ClientLocale,
    request: Json<SettleRequest>,
) -> ApiResult<Json<SettleResponse>> {
    settle(state, actor, locale, request, LotteryVariant::Common).await
}

/// `POST /api/v1/billing/reventado`
pub async fn settle_reventado(
    state: State<Arc<AppState>>,
    actor: CallerActor,
    locale: ClientLocale,
    request: Json<SettleRequest>,
) -> ApiResult<Json<SettleResponse>> {
    settle(state, actor, locale, request, LotteryVariant::Reventado).await
}

/// `POST /api/v1/billing/monazo`
pub async fn settle_monazo(
    state: State<Arc<AppState>>,
    actor: CallerActor,
    locale: ClientLocale,
    request: Json<SettleRequest>,
) -> ApiResult<Json<SettleResponse>> {
    settle(state, actor, locale, request, LotteryVariant::Monazo).await
}

/// `POST /api/v1/billing/parley`
pub async fn settle_parley(
    state: State<Arc<AppState>>,
    actor: CallerActor,
    locale: ClientLocale,
    request: Json<SettleRequest>,
) -> ApiResult<Json<SettleResponse>> {
    settle(state, actor, locale, request, LotteryVariant::Parley).await
}

async fn settle(
    State(state): State<Arc<AppState>>,
    CallerActor(actor): CallerActor,
    ClientLocale(locale): ClientLocale,
    Json(request): Json<SettleRequest>,
    variant: LotteryVariant,
) -> ApiResult<Json<SettleResponse>> {
    let engine = SettlementEngine::new(state.db.settlement_store(), OwnerOrAdminAccess);
    let statement = engine
        .settle(DrawingId(request.lottery_programming_id), variant, actor)
        .await
        .map_err(|e| settlement_error(e, &state.catalog, locale))?;

    Ok(Json(SettleResponse::from(statement)))
}
