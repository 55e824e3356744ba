// src/db/budget_repo.rs

use std::collections::HashMap;

use sqlx::SqliteConnection;

use crate::{
    common::{
        db_utils::{affected_any, fetch_children, unique_violation_or},
        error::AppError,
    },
    models::budget::{Budget, Quote},
};

pub(crate) const DUPLICATE_CODE: &str = "Já existe um orçamento com este código";

#[derive(Clone, Default)]
pub struct BudgetRepository;

impl BudgetRepository {
    pub fn new() -> Self {
        Self
    }

    async fn with_quotes(
        &self,
        conn: &mut SqliteConnection,
        mut budgets: Vec<Budget>,
    ) -> Result<Vec<Budget>, AppError> {
        let ids: Vec<i64> = budgets.iter().map(|b| b.id).collect();
        let rows: Vec<Quote> = fetch_children(conn, "cotacoes", "orcamento_id", &ids).await?;

        let mut by_parent: HashMap<i64, Vec<Quote>> = HashMap::new();
        for row in rows {
            by_parent.entry(row.orcamento_id).or_default().push(row);
        }
        for budget in &mut budgets {
            budget.cotacoes = by_parent.remove(&budget.id).unwrap_or_default();
        }
        Ok(budgets)
    }

    async fn one_with_quotes(
        &self,
        conn: &mut SqliteConnection,
        budget: Option<Budget>,
    ) -> Result<Option<Budget>, AppError> {
        match budget {
            Some(b) => Ok(self.with_quotes(conn, vec![b]).await?.pop()),
            None => Ok(None),
        }
    }

    pub async fn list_all(&self, conn: &mut SqliteConnection) -> Result<Vec<Budget>, AppError> {
        let budgets = sqlx::query_as::<_, Budget>("SELECT * FROM orcamentos ORDER BY id")
            .fetch_all(&mut *conn)
            .await?;
        self.with_quotes(conn, budgets).await
    }

    pub async fn find_by_id(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
    ) -> Result<Option<Budget>, AppError> {
        let budget = sqlx::query_as::<_, Budget>("SELECT * FROM orcamentos WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        self.one_with_quotes(conn, budget).await
    }

    pub async fn find_by_code(
        &self,
        conn: &mut SqliteConnection,
        codigo: &str,
    ) -> Result<Option<Budget>, AppError> {
        let budget = sqlx::query_as::<_, Budget>("SELECT * FROM orcamentos WHERE codigo = ?")
            .bind(codigo)
            .fetch_optional(&mut *conn)
            .await?;
        self.one_with_quotes(conn, budget).await
    }

    pub async fn list_by_status(
        &self,
        conn: &mut SqliteConnection,
        status: &str,
    ) -> Result<Vec<Budget>, AppError> {
        let budgets =
            sqlx::query_as::<_, Budget>("SELECT * FROM orcamentos WHERE status = ? ORDER BY id")
                .bind(status)
                .fetch_all(&mut *conn)
                .await?;
        self.with_quotes(conn, budgets).await
    }

    pub async fn create(
        &self,
        conn: &mut SqliteConnection,
        budget: &Budget,
    ) -> Result<Budget, AppError> {
        sqlx::query_as::<_, Budget>(
            r#"
            INSERT INTO orcamentos (codigo, item, requisicao_codigo, quantidade, data_limite, status)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&budget.codigo)
        .bind(&budget.item)
        .bind(&budget.requisicao_codigo)
        .bind(budget.quantidade)
        .bind(budget.data_limite)
        .bind(&budget.status)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| unique_violation_or(e, DUPLICATE_CODE))
    }

    pub async fn update(
        &self,
        conn: &mut SqliteConnection,
        budget: &Budget,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE orcamentos SET
                codigo = ?, item = ?, requisicao_codigo = ?, quantidade = ?,
                data_limite = ?, status = ?
            WHERE id = ?
            "#,
        )
        .bind(&budget.codigo)
        .bind(&budget.item)
        .bind(&budget.requisicao_codigo)
        .bind(budget.quantidade)
        .bind(budget.data_limite)
        .bind(&budget.status)
        .bind(budget.id)
        .execute(&mut *conn)
        .await
        .map_err(|e| unique_violation_or(e, DUPLICATE_CODE))?;
        Ok(affected_any(result))
    }

    pub async fn delete(&self, conn: &mut SqliteConnection, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM orcamentos WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(affected_any(result))
    }

    pub async fn add_quote(
        &self,
        conn: &mut SqliteConnection,
        quote: &Quote,
    ) -> Result<Quote, AppError> {
        let row = sqlx::query_as::<_, Quote>(
            r#"
            INSERT INTO cotacoes (
                orcamento_id, fornecedor, valor_unitario, valor_total,
                prazo_entrega, condicoes, avaliacao, status
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(quote.orcamento_id)
        .bind(&quote.fornecedor)
        .bind(quote.valor_unitario)
        .bind(quote.valor_total)
        .bind(&quote.prazo_entrega)
        .bind(&quote.condicoes)
        .bind(quote.avaliacao)
        .bind(&quote.status)
        .fetch_one(&mut *conn)
        .await?;
        Ok(row)
    }
}
