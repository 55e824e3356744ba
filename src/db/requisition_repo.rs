// src/db/requisition_repo.rs

use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::{
        db_utils::{affected_any, unique_violation_or},
        error::AppError,
    },
    models::requisition::{Requisition, RequisitionStatus},
};

pub(crate) const DUPLICATE_CODE: &str = "Já existe uma requisição com este código";

#[derive(Clone)]
pub struct RequisitionRepository {
    pool: SqlitePool,
}

impl RequisitionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn list_all(&self) -> Result<Vec<Requisition>, AppError> {
        let requisitions =
            sqlx::query_as::<_, Requisition>("SELECT * FROM requisicoes ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(requisitions)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Requisition>, AppError> {
        let requisition = sqlx::query_as::<_, Requisition>("SELECT * FROM requisicoes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(requisition)
    }

    pub async fn find_by_code(&self, codigo: &str) -> Result<Option<Requisition>, AppError> {
        let requisition =
            sqlx::query_as::<_, Requisition>("SELECT * FROM requisicoes WHERE codigo = ?")
                .bind(codigo)
                .fetch_optional(&self.pool)
                .await?;
        Ok(requisition)
    }

    pub async fn list_by_status(&self, status: &str) -> Result<Vec<Requisition>, AppError> {
        let requisitions = sqlx::query_as::<_, Requisition>(
            "SELECT * FROM requisicoes WHERE status = ? ORDER BY id",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(requisitions)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        requisition: &Requisition,
    ) -> Result<Requisition, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, Requisition>(
            r#"
            INSERT INTO requisicoes (
                codigo, titulo, descricao, solicitante, departamento,
                categoria, valor, data, status, prioridade
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&requisition.codigo)
        .bind(&requisition.titulo)
        .bind(&requisition.descricao)
        .bind(&requisition.solicitante)
        .bind(&requisition.departamento)
        .bind(&requisition.categoria)
        .bind(requisition.valor)
        .bind(requisition.data)
        .bind(requisition.status)
        .bind(requisition.prioridade)
        .fetch_one(executor)
        .await
        .map_err(|e| unique_violation_or(e, DUPLICATE_CODE))
    }

    pub async fn update(&self, requisition: &Requisition) -> Result<Option<Requisition>, AppError> {
        sqlx::query_as::<_, Requisition>(
            r#"
            UPDATE requisicoes SET
                codigo = ?, titulo = ?, descricao = ?, solicitante = ?, departamento = ?,
                categoria = ?, valor = ?, data = ?, status = ?, prioridade = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&requisition.codigo)
        .bind(&requisition.titulo)
        .bind(&requisition.descricao)
        .bind(&requisition.solicitante)
        .bind(&requisition.departamento)
        .bind(&requisition.categoria)
        .bind(requisition.valor)
        .bind(requisition.data)
        .bind(requisition.status)
        .bind(requisition.prioridade)
        .bind(requisition.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| unique_violation_or(e, DUPLICATE_CODE))
    }

    // Escrita direta do status, sem checar o estado anterior
    pub async fn set_status(
        &self,
        id: i64,
        status: RequisitionStatus,
    ) -> Result<Option<Requisition>, AppError> {
        let requisition = sqlx::query_as::<_, Requisition>(
            "UPDATE requisicoes SET status = ? WHERE id = ? RETURNING *",
        )
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(requisition)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM requisicoes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(affected_any(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::test_pool, models::requisition::Priority};
    use chrono::NaiveDate;

    fn requisition(codigo: &str) -> Requisition {
        Requisition {
            id: 0,
            codigo: codigo.into(),
            titulo: "Notebooks".into(),
            descricao: String::new(),
            solicitante: "João".into(),
            departamento: "TI".into(),
            categoria: "Tecnologia".into(),
            valor: 45000.0,
            data: NaiveDate::from_ymd_opt(2025, 10, 15).unwrap(),
            status: RequisitionStatus::Pendente,
            prioridade: Priority::Alta,
        }
    }

    #[tokio::test]
    async fn dates_and_enums_round_trip_through_sqlite() {
        let pool = test_pool().await;
        let repo = RequisitionRepository::new(pool.clone());

        let created = repo.create(&pool, &requisition("REQ-1")).await.unwrap();
        let loaded = repo.find_by_code("REQ-1").await.unwrap().unwrap();

        assert_eq!(loaded.id, created.id);
        assert_eq!(loaded.data, NaiveDate::from_ymd_opt(2025, 10, 15).unwrap());
        assert_eq!(loaded.prioridade, Priority::Alta);
        assert_eq!(repo.list_by_status("pendente").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn set_status_is_a_plain_write() {
        let pool = test_pool().await;
        let repo = RequisitionRepository::new(pool.clone());
        let created = repo.create(&pool, &requisition("REQ-1")).await.unwrap();

        repo.set_status(created.id, RequisitionStatus::Rejeitada).await.unwrap();
        let approved = repo
            .set_status(created.id, RequisitionStatus::Aprovada)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(approved.status, RequisitionStatus::Aprovada);
        assert!(repo.set_status(999, RequisitionStatus::Aprovada).await.unwrap().is_none());
    }
}
