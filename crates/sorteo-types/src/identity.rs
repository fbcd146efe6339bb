//! Identity types for Sorteo
//!
//! All identity types are strongly typed wrappers around UUIDs to prevent
//! accidental mixing of different ID types.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Macro to generate ID types with common implementations
macro_rules! define_id_type {
    ($name:ident, $prefix:literal, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Parse from a string (with or without prefix)
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                let s = s.strip_prefix(concat!($prefix, "_")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }

            /// Get the inner UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}_{}", $prefix, self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl AsRef<Uuid> for $name {
            fn as_ref(&self) -> &Uuid {
                &self.0
            }
        }
    };
}

// Tenant identity types
define_id_type!(BankId, "bank", "Unique identifier for a bank (tenant)");
define_id_type!(UserId, "user", "Unique identifier for a platform user");
define_id_type!(SellerId, "seller", "Unique identifier for a ticket seller");

// Game identity types
define_id_type!(LotteryId, "lottery", "Unique identifier for a lottery game template");
define_id_type!(DrawingId, "drawing", "Unique identifier for a scheduled lottery drawing");
define_id_type!(PrizeId, "prize", "Unique identifier for a lottery prize tier");
define_id_type!(BallTypeId, "ball", "Unique identifier for a reventado ball type");

// Sale identity types
define_id_type!(TicketId, "ticket", "Unique identifier for a sold ticket");

// Settlement identity types
define_id_type!(StatementId, "stmt", "Unique identifier for a billing statement");
define_id_type!(CashOperationId, "cashop", "Unique identifier for a cash operation");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_prefixed_and_raw() {
        let id = DrawingId::new();
        let raw = id.as_uuid().to_string();
        let prefixed = id.to_string();

        assert_eq!(DrawingId::parse(&raw).unwrap(), id);
        assert_eq!(DrawingId::parse(&prefixed).unwrap(), id);
    }

    #[test]
    fn display_carries_prefix() {
        let id = SellerId::new();
        assert!(id.to_string().starts_with("seller_"));
    }
}
