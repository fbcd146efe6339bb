//! API error handling
//!
//! Every failure reaches the client as a structured body with a stable error
//! code, a locale-resolved message, and a separate debug string. Mapping from
//! the core error taxonomies happens here, with the message catalog injected
//! by the caller rather than looked up from global state.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use sorteo_billing::{ErrorKind, SettlementError};
use sorteo_db::DbError;

use crate::i18n::{Locale, MessageCatalog};

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

/// Stable machine-readable error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    NotAuthorized,
    AlreadySettled,
    Unresolved,
    DataIntegrity,
    NumberRestricted,
    DrawingClosed,
    Duplicate,
    Validation,
    Internal,
}

impl ErrorCode {
    /// HTTP status for this code
    pub fn status(self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::NotAuthorized => StatusCode::FORBIDDEN,
            Self::AlreadySettled | Self::Unresolved | Self::Duplicate | Self::DrawingClosed => {
                StatusCode::CONFLICT
            }
            Self::DataIntegrity | Self::NumberRestricted => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// An API error ready for transport
#[derive(Debug)]
pub struct ApiError {
    pub code: ErrorCode,
    /// Locale-resolved client-facing message
    pub message: String,
    /// Operator-facing detail, never localized
    pub debug: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, catalog: &MessageCatalog, locale: Locale, debug: String) -> Self {
        Self {
            code,
            message: catalog.resolve(locale, code).to_string(),
            debug,
        }
    }
}

/// API error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
    pub debug: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.code == ErrorCode::Internal {
            tracing::error!(debug = %self.debug, "internal error");
        }
        let body = ErrorResponse {
            code: self.code,
            message: self.message,
            debug: self.debug,
        };
        (self.code.status(), Json(body)).into_response()
    }
}

/// Map a settlement failure onto the transport taxonomy.
pub fn settlement_error(err: SettlementError, catalog: &MessageCatalog, locale: Locale) -> ApiError {
    let code = match err.kind() {
        ErrorKind::NotFound => ErrorCode::NotFound,
        ErrorKind::NotAuthorized => ErrorCode::NotAuthorized,
        ErrorKind::AlreadySettled => ErrorCode::AlreadySettled,
        ErrorKind::Unresolved => ErrorCode::Unresolved,
        ErrorKind::DataIntegrity => ErrorCode::DataIntegrity,
        ErrorKind::Internal => ErrorCode::Internal,
    };
    ApiError::new(code, catalog, locale, err.to_string())
}

/// Map a persistence failure onto the transport taxonomy.
pub fn db_error(err: DbError, catalog: &MessageCatalog, locale: Locale) -> ApiError {
    let code = match &err {
        DbError::NotFound(_) => ErrorCode::NotFound,
        DbError::Duplicate(_) => ErrorCode::Duplicate,
        DbError::DrawingClosed(_) => ErrorCode::DrawingClosed,
        DbError::NumberRestricted { .. } => ErrorCode::NumberRestricted,
        DbError::InvalidInput(_) => ErrorCode::Validation,
        DbError::Constraint(_) => ErrorCode::DataIntegrity,
        DbError::Connection(_) | DbError::Migration(_) | DbError::Query(_) => ErrorCode::Internal,
    };
    ApiError::new(code, catalog, locale, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ErrorCode::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::NotAuthorized.status(), StatusCode::FORBIDDEN);
        assert_eq!(ErrorCode::AlreadySettled.status(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorCode::DataIntegrity.status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(ErrorCode::Validation.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn settlement_errors_map_to_codes() {
        let catalog = MessageCatalog::new();
        let err = SettlementError::NotAuthorized;
        let api = settlement_error(err, &catalog, Locale::En);
        assert_eq!(api.code, ErrorCode::NotAuthorized);
        assert!(!api.message.is_empty());
    }
}
