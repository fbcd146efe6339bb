//! Request extractors
//!
//! Identity is resolved by the surrounding platform; the trusted edge
//! forwards the caller as `X-Actor-Id` and `X-Actor-Role` headers. The
//! client locale rides on `Accept-Language`.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::sync::Arc;

use sorteo_types::{Actor, Role, UserId};

use crate::error::{ApiError, ErrorCode};
use crate::i18n::Locale;
use crate::state::AppState;

/// The authenticated caller, from the trusted edge headers.
#[derive(Debug, Clone, Copy)]
pub struct CallerActor(pub Actor);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for CallerActor {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let locale = locale_of(parts);
        let reject = |debug: &str| {
            ApiError::new(
                ErrorCode::Validation,
                &state.catalog,
                locale,
                debug.to_string(),
            )
        };

        let id = parts
            .headers
            .get("x-actor-id")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| reject("missing X-Actor-Id header"))?;
        let id = UserId::parse(id).map_err(|_| reject("malformed X-Actor-Id header"))?;

        let role = parts
            .headers
            .get("x-actor-role")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| reject("missing X-Actor-Role header"))?;
        let role: Role = role
            .parse()
            .map_err(|_| reject("unknown X-Actor-Role value"))?;

        Ok(CallerActor(Actor::new(id, role)))
    }
}

/// The client locale, from `Accept-Language`. Infallible; defaults to English.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientLocale(pub Locale);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for ClientLocale {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ClientLocale(locale_of(parts)))
    }
}

fn locale_of(parts: &Parts) -> Locale {
    Locale::from_accept_language(
        parts
            .headers
            .get("accept-language")
            .and_then(|v| v.to_str().ok()),
    )
}
