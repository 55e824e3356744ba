// src/db/negotiation_repo.rs
//
// Negociação é um agregado: toda leitura devolve o histórico junto.
// Os métodos recebem a conexão para poderem rodar dentro de uma transação.

use std::collections::HashMap;

use sqlx::SqliteConnection;

use crate::{
    common::{
        db_utils::{affected_any, fetch_children, unique_violation_or},
        error::AppError,
    },
    models::negotiation::{Negotiation, NegotiationHistory},
};

pub(crate) const DUPLICATE_CODE: &str = "Já existe uma negociação com este código";

#[derive(Clone, Default)]
pub struct NegotiationRepository;

impl NegotiationRepository {
    pub fn new() -> Self {
        Self
    }

    async fn with_history(
        &self,
        conn: &mut SqliteConnection,
        mut negotiations: Vec<Negotiation>,
    ) -> Result<Vec<Negotiation>, AppError> {
        let ids: Vec<i64> = negotiations.iter().map(|n| n.id).collect();
        let rows: Vec<NegotiationHistory> =
            fetch_children(conn, "historico_negociacao", "negociacao_id", &ids).await?;

        let mut by_parent: HashMap<i64, Vec<NegotiationHistory>> = HashMap::new();
        for row in rows {
            by_parent.entry(row.negociacao_id).or_default().push(row);
        }
        for negotiation in &mut negotiations {
            negotiation.historico = by_parent.remove(&negotiation.id).unwrap_or_default();
        }
        Ok(negotiations)
    }

    async fn one_with_history(
        &self,
        conn: &mut SqliteConnection,
        negotiation: Option<Negotiation>,
    ) -> Result<Option<Negotiation>, AppError> {
        match negotiation {
            Some(n) => Ok(self.with_history(conn, vec![n]).await?.pop()),
            None => Ok(None),
        }
    }

    pub async fn list_all(&self, conn: &mut SqliteConnection) -> Result<Vec<Negotiation>, AppError> {
        let negotiations =
            sqlx::query_as::<_, Negotiation>("SELECT * FROM negociacoes ORDER BY id")
                .fetch_all(&mut *conn)
                .await?;
        self.with_history(conn, negotiations).await
    }

    pub async fn find_by_id(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
    ) -> Result<Option<Negotiation>, AppError> {
        let negotiation =
            sqlx::query_as::<_, Negotiation>("SELECT * FROM negociacoes WHERE id = ?")
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?;
        self.one_with_history(conn, negotiation).await
    }

    pub async fn find_by_code(
        &self,
        conn: &mut SqliteConnection,
        codigo: &str,
    ) -> Result<Option<Negotiation>, AppError> {
        let negotiation =
            sqlx::query_as::<_, Negotiation>("SELECT * FROM negociacoes WHERE codigo = ?")
                .bind(codigo)
                .fetch_optional(&mut *conn)
                .await?;
        self.one_with_history(conn, negotiation).await
    }

    pub async fn list_by_status(
        &self,
        conn: &mut SqliteConnection,
        status: &str,
    ) -> Result<Vec<Negotiation>, AppError> {
        let negotiations = sqlx::query_as::<_, Negotiation>(
            "SELECT * FROM negociacoes WHERE status = ? ORDER BY id",
        )
        .bind(status)
        .fetch_all(&mut *conn)
        .await?;
        self.with_history(conn, negotiations).await
    }

    pub async fn create(
        &self,
        conn: &mut SqliteConnection,
        negotiation: &Negotiation,
    ) -> Result<Negotiation, AppError> {
        sqlx::query_as::<_, Negotiation>(
            r#"
            INSERT INTO negociacoes (
                codigo, item, fornecedor, valor_inicial, valor_negociado,
                desconto, responsavel, data_inicio, data_fim, status
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&negotiation.codigo)
        .bind(&negotiation.item)
        .bind(&negotiation.fornecedor)
        .bind(negotiation.valor_inicial)
        .bind(negotiation.valor_negociado)
        .bind(&negotiation.desconto)
        .bind(&negotiation.responsavel)
        .bind(negotiation.data_inicio)
        .bind(negotiation.data_fim)
        .bind(negotiation.status)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| unique_violation_or(e, DUPLICATE_CODE))
    }

    pub async fn update(
        &self,
        conn: &mut SqliteConnection,
        negotiation: &Negotiation,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE negociacoes SET
                codigo = ?, item = ?, fornecedor = ?, valor_inicial = ?, valor_negociado = ?,
                desconto = ?, responsavel = ?, data_inicio = ?, data_fim = ?, status = ?
            WHERE id = ?
            "#,
        )
        .bind(&negotiation.codigo)
        .bind(&negotiation.item)
        .bind(&negotiation.fornecedor)
        .bind(negotiation.valor_inicial)
        .bind(negotiation.valor_negociado)
        .bind(&negotiation.desconto)
        .bind(&negotiation.responsavel)
        .bind(negotiation.data_inicio)
        .bind(negotiation.data_fim)
        .bind(negotiation.status)
        .bind(negotiation.id)
        .execute(&mut *conn)
        .await
        .map_err(|e| unique_violation_or(e, DUPLICATE_CODE))?;
        Ok(affected_any(result))
    }

    // O histórico vai junto pelo ON DELETE CASCADE
    pub async fn delete(&self, conn: &mut SqliteConnection, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM negociacoes WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(affected_any(result))
    }

    pub async fn add_history(
        &self,
        conn: &mut SqliteConnection,
        entry: &NegotiationHistory,
    ) -> Result<NegotiationHistory, AppError> {
        let row = sqlx::query_as::<_, NegotiationHistory>(
            r#"
            INSERT INTO historico_negociacao (negociacao_id, data, autor, mensagem, valor)
            VALUES (?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(entry.negociacao_id)
        .bind(entry.data)
        .bind(&entry.autor)
        .bind(&entry.mensagem)
        .bind(entry.valor)
        .fetch_one(&mut *conn)
        .await?;
        Ok(row)
    }
}
