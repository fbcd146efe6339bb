//! Caller identity, as supplied by the external auth collaborator
//!
//! Sorteo does not authenticate anyone. The surrounding platform resolves the
//! caller and hands the settlement core these facts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::UserId;

/// Platform role of a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform administrator; may edit any bank.
    Admin,
    /// Owner of one bank.
    BankOwner,
    /// Manager under a bank owner.
    Manager,
    /// Ticket seller.
    Seller,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Admin => "admin",
            Self::BankOwner => "bank_owner",
            Self::Manager => "manager",
            Self::Seller => "seller",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "bank_owner" => Ok(Self::BankOwner),
            "manager" => Ok(Self::Manager),
            "seller" => Ok(Self::Seller),
            _ => Err(()),
        }
    }
}

/// An authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: UserId,
    pub role: Role,
}

impl Actor {
    pub fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }
}
