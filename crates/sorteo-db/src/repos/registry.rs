//! Bank and seller registry repository
//!
//! Tenant CRUD proper lives outside this system; these rows exist so the
//! billing tables have owners to reference.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{DbBank, DbResult, DbSeller};

/// Repository for banks and their sellers
pub struct RegistryRepo {
    pool: PgPool,
}

impl RegistryRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a bank
    pub async fn create_bank(&self, name: &str, owner_user_id: Uuid) -> DbResult<DbBank> {
        let bank = sqlx::query_as::<_, DbBank>(
            r#"
            INSERT INTO banks (id, name, owner_user_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, owner_user_id, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(owner_user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(bank)
    }

    /// Find bank by ID
    pub async fn find_bank(&self, id: Uuid) -> DbResult<Option<DbBank>> {
        let bank = sqlx::query_as::<_, DbBank>(
            "SELECT id, name, owner_user_id, created_at FROM banks WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(bank)
    }

    /// Create a seller under a bank
    pub async fn create_seller(&self, bank_id: Uuid, name: &str) -> DbResult<DbSeller> {
        let seller = sqlx::query_as::<_, DbSeller>(
            r#"
            INSERT INTO sellers (id, bank_id, name)
            VALUES ($1, $2, $3)
            RETURNING id, bank_id, name, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(bank_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(seller)
    }

    /// Find seller by ID
    pub async fn find_seller(&self, id: Uuid) -> DbResult<Option<DbSeller>> {
        let seller = sqlx::query_as::<_, DbSeller>(
            "SELECT id, bank_id, name, created_at FROM sellers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(seller)
    }

    /// List all sellers of a bank
    pub async fn list_sellers(&self, bank_id: Uuid) -> DbResult<Vec<DbSeller>> {
        let sellers = sqlx::query_as::<_, DbSeller>(
            "SELECT id, bank_id, name, created_at FROM sellers WHERE bank_id = $1 ORDER BY name",
        )
        .bind(bank_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sellers)
    }
}
