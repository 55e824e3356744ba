// src/services/budget_service.rs

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    db::{budget_repo::DUPLICATE_CODE, BudgetRepository},
    models::budget::{AddQuotePayload, Budget, CreateBudgetPayload, UpdateBudgetPayload},
};

const NOT_FOUND: &str = "Orçamento não encontrado";

#[derive(Clone)]
pub struct BudgetService {
    repo: BudgetRepository,
    pool: SqlitePool,
}

impl BudgetService {
    pub fn new(repo: BudgetRepository, pool: SqlitePool) -> Self {
        Self { repo, pool }
    }

    pub async fn list_all(&self) -> Result<Vec<Budget>, AppError> {
        let mut conn = self.pool.acquire().await?;
        self.repo.list_all(&mut conn).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Budget, AppError> {
        let mut conn = self.pool.acquire().await?;
        self.repo
            .find_by_id(&mut conn, id)
            .await?
            .ok_or(AppError::NotFound(NOT_FOUND))
    }

    pub async fn get_by_code(&self, codigo: &str) -> Result<Budget, AppError> {
        let mut conn = self.pool.acquire().await?;
        self.repo
            .find_by_code(&mut conn, codigo)
            .await?
            .ok_or(AppError::NotFound(NOT_FOUND))
    }

    pub async fn list_by_status(&self, status: &str) -> Result<Vec<Budget>, AppError> {
        let mut conn = self.pool.acquire().await?;
        self.repo.list_by_status(&mut conn, status).await
    }

    pub async fn create(&self, payload: CreateBudgetPayload, today: NaiveDate) -> Result<Budget, AppError> {
        let budget = payload.into_budget(today);
        let mut conn = self.pool.acquire().await?;

        if self.repo.find_by_code(&mut conn, &budget.codigo).await?.is_some() {
            return Err(AppError::Duplicate(DUPLICATE_CODE.to_string()));
        }

        let created = self.repo.create(&mut conn, &budget).await?;
        tracing::info!("Orçamento {} criado", created.codigo);
        Ok(created)
    }

    pub async fn update(&self, id: i64, changes: UpdateBudgetPayload) -> Result<Budget, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut budget = self
            .repo
            .find_by_id(&mut tx, id)
            .await?
            .ok_or(AppError::NotFound(NOT_FOUND))?;

        if let Some(codigo) = changes.codigo.as_deref() {
            if codigo != budget.codigo && self.repo.find_by_code(&mut tx, codigo).await?.is_some() {
                return Err(AppError::Duplicate(DUPLICATE_CODE.to_string()));
            }
        }

        budget.apply(changes);
        self.repo.update(&mut tx, &budget).await?;
        tx.commit().await?;

        Ok(budget)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut conn = self.pool.acquire().await?;
        if !self.repo.delete(&mut conn, id).await? {
            return Err(AppError::NotFound(NOT_FOUND));
        }
        Ok(())
    }

    /// Registra uma cotação. Sem valor total, usa unitário x quantidade do orçamento.
    pub async fn add_quote(&self, id: i64, payload: AddQuotePayload) -> Result<Budget, AppError> {
        let mut tx = self.pool.begin().await?;

        let budget = self
            .repo
            .find_by_id(&mut tx, id)
            .await?
            .ok_or(AppError::NotFound(NOT_FOUND))?;

        self.repo.add_quote(&mut tx, &payload.into_quote(&budget)).await?;

        let reloaded = self
            .repo
            .find_by_id(&mut tx, id)
            .await?
            .ok_or(AppError::NotFound(NOT_FOUND))?;
        tx.commit().await?;

        Ok(reloaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 28).unwrap()
    }

    async fn service() -> BudgetService {
        BudgetService::new(BudgetRepository::new(), test_pool().await)
    }

    fn payload(codigo: &str, quantidade: i64) -> CreateBudgetPayload {
        serde_json::from_value(serde_json::json!({
            "codigo": codigo,
            "item": "Notebooks",
            "quantidade": quantidade
        }))
        .unwrap()
    }

    fn quote(valor_unitario: f64) -> AddQuotePayload {
        serde_json::from_value(serde_json::json!({
            "fornecedor": "TechSupply Ltda",
            "valorUnitario": valor_unitario
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn quote_total_follows_the_budget_quantity() {
        let service = service().await;
        let created = service.create(payload("ORC-1", 10), today()).await.unwrap();

        let reloaded = service.add_quote(created.id, quote(4500.0)).await.unwrap();

        assert_eq!(reloaded.cotacoes.len(), 1);
        assert_eq!(reloaded.cotacoes[0].valor_total, 45000.0);
    }

    #[tokio::test]
    async fn repeated_code_creates_nothing() {
        let service = service().await;
        service.create(payload("ORC-1", 1), today()).await.unwrap();

        let err = service.create(payload("ORC-1", 2), today()).await.unwrap_err();

        assert!(matches!(err, AppError::Duplicate(_)));
        assert_eq!(service.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn quote_on_missing_budget_leaves_no_row() {
        let service = service().await;

        let err = service.add_quote(5, quote(10.0)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let quotes: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cotacoes")
            .fetch_one(&service.pool)
            .await
            .unwrap();
        assert_eq!(quotes, 0);
    }
}
