//! Sorteo API - REST surface for the lottery billing platform
//!
//! # Endpoints
//!
//! ## Settlement
//! - `POST /api/v1/billing/common` - Bill a common drawing
//! - `POST /api/v1/billing/reventado` - Bill a reventado drawing
//! - `POST /api/v1/billing/monazo` - Bill a monazo drawing
//! - `POST /api/v1/billing/parley` - Bill a parley drawing
//!
//! ## Drawings
//! - `POST /api/v1/drawings` - Schedule a drawing
//! - `GET /api/v1/drawings/:id` - Get drawing state
//! - `POST /api/v1/drawings/:id/results/{variant}` - Declare winning numbers
//!
//! ## Tickets
//! - `POST /api/v1/tickets` - Issue a ticket
//! - `GET /api/v1/tickets/:id` - Get a ticket
//! - `POST /api/v1/tickets/:id/cancel` - Cancel a ticket
//!
//! ## Sellers
//! - `GET /api/v1/sellers/:id/balance` - Running balance
//! - `POST /api/v1/sellers/:id/payments` - Clear the balance to zero
//! - `GET /api/v1/sellers/:id/payments` - Cash operation history
//!
//! Caller identity arrives from the trusted edge as `X-Actor-Id` and
//! `X-Actor-Role` headers; client messages are localized per request from
//! `Accept-Language`.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod i18n;
pub mod routes;
pub mod state;

use axum::Router;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use error::{ApiError, ApiResult, ErrorCode, ErrorResponse};
pub use i18n::{Locale, MessageCatalog};
pub use state::AppState;

/// API configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Enable permissive CORS
    pub enable_cors: bool,
    /// Enable request tracing
    pub enable_tracing: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enable_cors: true,
            enable_tracing: true,
        }
    }
}

/// Build the application router
pub fn create_router(state: Arc<AppState>, config: ApiConfig) -> Router {
    let mut router = Router::new().nest("/api/v1", routes::api_v1_routes());

    if config.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if config.enable_tracing {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}
