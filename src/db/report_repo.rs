// src/db/report_repo.rs
//
// Fonte de dados dos relatórios: as seis coleções lidas de uma vez.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    models::{
        dashboard::{CategoryExpense, MonthlyExpense},
        negotiation::Negotiation,
        order::Order,
        report::ReportSnapshot,
        requisition::Requisition,
        supplier::Supplier,
    },
};

/// Porta de leitura usada pelo serviço de relatórios.
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Lê todas as coleções. Qualquer falha derruba a leitura inteira.
    async fn snapshot(&self) -> Result<ReportSnapshot, AppError>;
}

#[derive(Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportSource for ReportRepository {
    async fn snapshot(&self) -> Result<ReportSnapshot, AppError> {
        let (monthly_expenses, category_expenses, suppliers, orders, negotiations, requisitions) = tokio::try_join!(
            sqlx::query_as::<_, MonthlyExpense>("SELECT * FROM monthly_expenses ORDER BY id")
                .fetch_all(&self.pool),
            sqlx::query_as::<_, CategoryExpense>("SELECT * FROM category_expenses ORDER BY id")
                .fetch_all(&self.pool),
            sqlx::query_as::<_, Supplier>("SELECT * FROM fornecedores ORDER BY id")
                .fetch_all(&self.pool),
            sqlx::query_as::<_, Order>("SELECT * FROM pedidos ORDER BY id")
                .fetch_all(&self.pool),
            sqlx::query_as::<_, Negotiation>("SELECT * FROM negociacoes ORDER BY id")
                .fetch_all(&self.pool),
            sqlx::query_as::<_, Requisition>("SELECT * FROM requisicoes ORDER BY id")
                .fetch_all(&self.pool),
        )?;

        Ok(ReportSnapshot {
            monthly_expenses,
            category_expenses,
            suppliers,
            orders,
            negotiations,
            requisitions,
        })
    }
}

/// Fonte fixa para testes que não precisam de banco.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub(crate) struct FixtureReportSource(pub ReportSnapshot);

#[cfg(test)]
#[async_trait]
impl ReportSource for FixtureReportSource {
    async fn snapshot(&self) -> Result<ReportSnapshot, AppError> {
        Ok(self.0.clone())
    }
}
