// src/db.rs

use std::{str::FromStr, time::Duration};

use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
    SqlitePool,
};

pub mod user_repo;
pub use user_repo::UserRepository;
pub mod supplier_repo;
pub use supplier_repo::SupplierRepository;
pub mod requisition_repo;
pub use requisition_repo::RequisitionRepository;
pub mod negotiation_repo;
pub use negotiation_repo::NegotiationRepository;
pub mod budget_repo;
pub use budget_repo::BudgetRepository;
pub mod order_repo;
pub use order_repo::OrderRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
pub mod report_repo;
pub use report_repo::{ReportRepository, ReportSource};
pub mod seed;

pub const IN_MEMORY: &str = ":memory:";

/// Abre o pool do SQLite. `:memory:` gera um banco volátil de conexão única
/// (cada conexão em memória seria um banco diferente).
pub async fn connect(db_path: &str) -> anyhow::Result<SqlitePool> {
    if db_path == IN_MEMORY {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        return Ok(pool);
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(30))
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .connect_with(options)
        .await?;

    Ok(pool)
}

pub async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    sqlx::migrate!().run(pool).await?;
    Ok(())
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = connect(IN_MEMORY).await.unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}
