//! Bank-edit authorization interface
//!
//! Identity and permissions live outside this system; settlement only needs
//! one question answered. Implementations are injected, never looked up from
//! process-wide state.

use async_trait::async_trait;

use sorteo_types::{Actor, Role, UserId};

use crate::StoreResult;

/// Answers whether a caller may edit (and therefore bill) a bank.
#[async_trait]
pub trait BankAccess: Send + Sync {
    async fn can_edit_bank(&self, bank_owner: UserId, actor: Actor) -> StoreResult<bool>;
}

/// Default policy: platform admins may edit any bank, a bank owner may edit
/// their own. Richer hierarchies (managers under an owner) are resolved by
/// the persistence-backed implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnerOrAdminAccess;

#[async_trait]
impl BankAccess for OwnerOrAdminAccess {
    async fn can_edit_bank(&self, bank_owner: UserId, actor: Actor) -> StoreResult<bool> {
        Ok(match actor.role {
            Role::Admin => true,
            Role::BankOwner | Role::Manager => actor.id == bank_owner,
            Role::Seller => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn admin_edits_any_bank() {
        let access = OwnerOrAdminAccess;
        let owner = UserId::new();
        let admin = Actor::new(UserId::new(), Role::Admin);
        assert!(access.can_edit_bank(owner, admin).await.unwrap());
    }

    #[tokio::test]
    async fn owner_edits_only_their_bank() {
        let access = OwnerOrAdminAccess;
        let owner = UserId::new();
        let themselves = Actor::new(owner, Role::BankOwner);
        let stranger = Actor::new(UserId::new(), Role::BankOwner);
        assert!(access.can_edit_bank(owner, themselves).await.unwrap());
        assert!(!access.can_edit_bank(owner, stranger).await.unwrap());
    }

    #[tokio::test]
    async fn sellers_never_edit_banks() {
        let access = OwnerOrAdminAccess;
        let owner = UserId::new();
        let seller = Actor::new(owner, Role::Seller);
        assert!(!access.can_edit_bank(owner, seller).await.unwrap());
    }
}
