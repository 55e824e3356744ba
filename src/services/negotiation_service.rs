// src/services/negotiation_service.rs

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    db::{negotiation_repo::DUPLICATE_CODE, NegotiationRepository},
    models::negotiation::{
        AddNegotiationHistoryPayload, CreateNegotiationPayload, Negotiation, NegotiationHistory,
        UpdateNegotiationPayload,
    },
};

const NOT_FOUND: &str = "Negociação não encontrada";

#[derive(Clone)]
pub struct NegotiationService {
    repo: NegotiationRepository,
    pool: SqlitePool,
}

impl NegotiationService {
    pub fn new(repo: NegotiationRepository, pool: SqlitePool) -> Self {
        Self { repo, pool }
    }

    pub async fn list_all(&self) -> Result<Vec<Negotiation>, AppError> {
        let mut conn = self.pool.acquire().await?;
        self.repo.list_all(&mut conn).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Negotiation, AppError> {
        let mut conn = self.pool.acquire().await?;
        self.repo
            .find_by_id(&mut conn, id)
            .await?
            .ok_or(AppError::NotFound(NOT_FOUND))
    }

    pub async fn get_by_code(&self, codigo: &str) -> Result<Negotiation, AppError> {
        let mut conn = self.pool.acquire().await?;
        self.repo
            .find_by_code(&mut conn, codigo)
            .await?
            .ok_or(AppError::NotFound(NOT_FOUND))
    }

    pub async fn list_by_status(&self, status: &str) -> Result<Vec<Negotiation>, AppError> {
        let mut conn = self.pool.acquire().await?;
        self.repo.list_by_status(&mut conn, status).await
    }

    pub async fn create(
        &self,
        payload: CreateNegotiationPayload,
        today: NaiveDate,
    ) -> Result<Negotiation, AppError> {
        let negotiation = payload.into_negotiation(today);
        let mut conn = self.pool.acquire().await?;

        if self.repo.find_by_code(&mut conn, &negotiation.codigo).await?.is_some() {
            return Err(AppError::Duplicate(DUPLICATE_CODE.to_string()));
        }

        let created = self.repo.create(&mut conn, &negotiation).await?;
        tracing::info!("Negociação {} criada", created.codigo);
        Ok(created)
    }

    pub async fn update(
        &self,
        id: i64,
        changes: UpdateNegotiationPayload,
    ) -> Result<Negotiation, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut negotiation = self
            .repo
            .find_by_id(&mut tx, id)
            .await?
            .ok_or(AppError::NotFound(NOT_FOUND))?;

        if let Some(codigo) = changes.codigo.as_deref() {
            if codigo != negotiation.codigo
                && self.repo.find_by_code(&mut tx, codigo).await?.is_some()
            {
                return Err(AppError::Duplicate(DUPLICATE_CODE.to_string()));
            }
        }

        negotiation.apply(changes);
        self.repo.update(&mut tx, &negotiation).await?;
        tx.commit().await?;

        Ok(negotiation)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut conn = self.pool.acquire().await?;
        if !self.repo.delete(&mut conn, id).await? {
            return Err(AppError::NotFound(NOT_FOUND));
        }
        Ok(())
    }

    /// Acrescenta uma entrada ao histórico e devolve a negociação recarregada.
    /// Checagem, inserção e releitura acontecem na mesma transação.
    pub async fn add_history(
        &self,
        id: i64,
        payload: AddNegotiationHistoryPayload,
        today: NaiveDate,
    ) -> Result<Negotiation, AppError> {
        let mut tx = self.pool.begin().await?;

        if self.repo.find_by_id(&mut tx, id).await?.is_none() {
            return Err(AppError::NotFound(NOT_FOUND));
        }

        let entry = NegotiationHistory {
            id: 0,
            negociacao_id: id,
            data: payload.data.unwrap_or(today),
            autor: payload.autor.unwrap_or_default(),
            mensagem: payload.mensagem.unwrap_or_default(),
            valor: payload.valor.unwrap_or(0.0),
        };
        self.repo.add_history(&mut tx, &entry).await?;

        let reloaded = self
            .repo
            .find_by_id(&mut tx, id)
            .await?
            .ok_or(AppError::NotFound(NOT_FOUND))?;
        tx.commit().await?;

        Ok(reloaded)
    }
}
