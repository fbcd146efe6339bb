//! API Routes
//!
//! Route definitions for all API endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handlers;
use crate::state::AppState;

/// Create API v1 routes
pub fn api_v1_routes() -> Router<Arc<AppState>> {
    Router::new()
        // General endpoints
        .route("/ping", get(handlers::health::ping))
        .route("/time", get(handlers::health::server_time))
        .route("/health", get(handlers::health::health))
        // Settlement, one endpoint per variant
        .nest("/billing", billing_routes())
        // Drawings and their results
        .nest("/drawings", drawing_routes())
        // Tickets
        .nest("/tickets", ticket_routes())
        // Seller balances
        .nest("/sellers", seller_routes())
}

/// Settlement routes
fn billing_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/common", post(handlers::billing::settle_common))
        .route("/reventado", post(handlers::billing::settle_reventado))
        .route("/monazo", post(handlers::billing::settle_monazo))
        .route("/parley", post(handlers::billing::settle_parley))
}

/// Drawing routes
fn drawing_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(handlers::drawing::schedule_drawing))
        .route("/:id", get(handlers::drawing::get_drawing))
        .route("/:id/results/common", post(handlers::drawing::declare_common))
        .route(
            "/:id/results/reventado",
            post(handlers::drawing::declare_reventado),
        )
        .route("/:id/results/monazo", post(handlers::drawing::declare_monazo))
        .route("/:id/results/parley", post(handlers::drawing::declare_parley))
}

/// Ticket routes
fn ticket_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(handlers::ticket::issue_ticket))
        .route("/:id", get(handlers::ticket::get_ticket))
        .route("/:id/cancel", post(handlers::ticket::cancel_ticket))
}

/// Seller balance routes
fn seller_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/:id/balance", get(handlers::balance::get_balance))
        .route("/:id/payments", post(handlers::balance::clear_balance))
        .route("/:id/payments", get(handlers::balance::payment_history))
}
