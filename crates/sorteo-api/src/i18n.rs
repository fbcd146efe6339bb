//! Client-facing message catalog
//!
//! Error messages shown to sellers and managers are resolved per request
//! from the `Accept-Language` header. The catalog is plain state owned by the
//! application and passed where needed; nothing reads it through a global.

use crate::error::ErrorCode;

/// Supported client locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    /// Pick the locale from an `Accept-Language` header value.
    pub fn from_accept_language(header: Option<&str>) -> Self {
        match header {
            Some(value) if value.trim_start().to_ascii_lowercase().starts_with("es") => Self::Es,
            _ => Self::En,
        }
    }
}

/// Locale-keyed client message catalog
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog;

impl MessageCatalog {
    pub fn new() -> Self {
        Self
    }

    /// Client-facing message for an error code.
    pub fn resolve(&self, locale: Locale, code: ErrorCode) -> &'static str {
        match locale {
            Locale::En => match code {
                ErrorCode::NotFound => "The requested resource was not found",
                ErrorCode::NotAuthorized => "You are not allowed to manage this bank",
                ErrorCode::AlreadySettled => "This drawing has already been billed",
                ErrorCode::Unresolved => "The winning numbers of this drawing have not been declared",
                ErrorCode::DataIntegrity => "Billing configuration is incomplete for this drawing",
                ErrorCode::NumberRestricted => "This number has reached its sale limit",
                ErrorCode::DrawingClosed => "This drawing is closed",
                ErrorCode::Duplicate => "This record already exists",
                ErrorCode::Validation => "The request is invalid",
                ErrorCode::Internal => "An internal error occurred",
            },
            Locale::Es => match code {
                ErrorCode::NotFound => "El recurso solicitado no existe",
                ErrorCode::NotAuthorized => "No tiene permiso para administrar esta banca",
                ErrorCode::AlreadySettled => "Este sorteo ya fue facturado",
                ErrorCode::Unresolved => "Los numeros ganadores de este sorteo no han sido declarados",
                ErrorCode::DataIntegrity => "La configuracion de facturacion de este sorteo esta incompleta",
                ErrorCode::NumberRestricted => "Este numero alcanzo su limite de venta",
                ErrorCode::DrawingClosed => "Este sorteo esta cerrado",
                ErrorCode::Duplicate => "Este registro ya existe",
                ErrorCode::Validation => "La solicitud es invalida",
                ErrorCode::Internal => "Ocurrio un error interno",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_language_selects_spanish() {
        assert_eq!(
            Locale::from_accept_language(Some("es-CR,es;q=0.9")),
            Locale::Es
        );
        assert_eq!(
            Locale::from_accept_language(Some("en-US,en;q=0.9")),
            Locale::En
        );
        assert_eq!(Locale::from_accept_language(None), Locale::En);
    }

    #[test]
    fn catalog_resolves_both_locales() {
        let catalog = MessageCatalog::new();
        let en = catalog.resolve(Locale::En, ErrorCode::AlreadySettled);
        let es = catalog.resolve(Locale::Es, ErrorCode::AlreadySettled);
        assert_ne!(en, es);
    }
}
