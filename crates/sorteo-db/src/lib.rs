//! Sorteo Database Layer
//!
//! PostgreSQL persistence for the lottery billing platform.
//!
//! # Repository Pattern
//!
//! Each domain aggregate has its own repository with CRUD and the
//! domain-specific queries settlement depends on. The settlement write set
//! itself lives in [`PgSettlementStore`], which implements the billing
//! engine's transactional storage interface.

pub mod config;
pub mod error;
pub mod models;
pub mod repos;
pub mod settlement;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

pub use config::DatabaseConfig;
pub use error::{DbError, DbResult};
pub use models::*;
pub use repos::*;
pub use settlement::PgSettlementStore;

/// Database connection pool
pub struct Database {
    /// PostgreSQL connection pool
    pub pg: PgPool,
}

impl Database {
    /// Connect to PostgreSQL
    pub async fn connect(config: &DatabaseConfig) -> DbResult<Self> {
        info!("Connecting to PostgreSQL: {}", config.postgres_url_masked());

        let pg = PgPoolOptions::new()
            .max_connections(config.pg_max_connections)
            .min_connections(config.pg_min_connections)
            .acquire_timeout(std::time::Duration::from_secs(
                config.pg_acquire_timeout_secs,
            ))
            .connect(&config.postgres_url)
            .await
            .map_err(|e| DbError::Connection(format!("PostgreSQL: {}", e)))?;

        info!("Connected to PostgreSQL");

        Ok(Self { pg })
    }

    /// Run database migrations
    pub async fn migrate(&self) -> DbResult<()> {
        info!("Running database migrations...");
        sqlx::migrate!("./migrations")
            .run(&self.pg)
            .await
            .map_err(|e| DbError::Migration(e.to_string()))?;
        info!("Migrations complete");
        Ok(())
    }

    /// Health check
    pub async fn health_check(&self) -> DbResult<bool> {
        let ok = sqlx::query("SELECT 1").fetch_one(&self.pg).await.is_ok();
        Ok(ok)
    }

    /// Create repository instances
    pub fn registry_repo(&self) -> RegistryRepo {
        RegistryRepo::new(self.pg.clone())
    }

    pub fn lottery_repo(&self) -> LotteryRepo {
        LotteryRepo::new(self.pg.clone())
    }

    pub fn drawing_repo(&self) -> DrawingRepo {
        DrawingRepo::new(self.pg.clone())
    }

    pub fn ticket_repo(&self) -> TicketRepo {
        TicketRepo::new(self.pg.clone())
    }

    pub fn result_repo(&self) -> ResultRepo {
        ResultRepo::new(self.pg.clone())
    }

    pub fn commission_repo(&self) -> CommissionRepo {
        CommissionRepo::new(self.pg.clone())
    }

    pub fn billing_repo(&self) -> BillingRepo {
        BillingRepo::new(self.pg.clone())
    }

    pub fn balance_repo(&self) -> BalanceRepo {
        BalanceRepo::new(self.pg.clone())
    }

    /// Settlement store for the billing engine
    pub fn settlement_store(&self) -> PgSettlementStore {
        PgSettlementStore::new(self.pg.clone())
    }
}
