// src/services/requisition_service.rs

use chrono::NaiveDate;

use crate::{
    common::error::AppError,
    db::{requisition_repo::DUPLICATE_CODE, RequisitionRepository},
    models::requisition::{
        CreateRequisitionPayload, Requisition, RequisitionStatus, UpdateRequisitionPayload,
    },
};

const NOT_FOUND: &str = "Requisição não encontrada";

#[derive(Clone)]
pub struct RequisitionService {
    repo: RequisitionRepository,
}

impl RequisitionService {
    pub fn new(repo: RequisitionRepository) -> Self {
        Self { repo }
    }

    pub async fn list_all(&self) -> Result<Vec<Requisition>, AppError> {
        self.repo.list_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Requisition, AppError> {
        self.repo.find_by_id(id).await?.ok_or(AppError::NotFound(NOT_FOUND))
    }

    pub async fn get_by_code(&self, codigo: &str) -> Result<Requisition, AppError> {
        self.repo.find_by_code(codigo).await?.ok_or(AppError::NotFound(NOT_FOUND))
    }

    pub async fn list_by_status(&self, status: &str) -> Result<Vec<Requisition>, AppError> {
        self.repo.list_by_status(status).await
    }

    pub async fn create(
        &self,
        payload: CreateRequisitionPayload,
        today: NaiveDate,
    ) -> Result<Requisition, AppError> {
        let requisition = payload.into_requisition(today);

        if self.repo.find_by_code(&requisition.codigo).await?.is_some() {
            return Err(AppError::Duplicate(DUPLICATE_CODE.to_string()));
        }

        let created = self.repo.create(self.repo.pool(), &requisition).await?;
        tracing::info!("Requisição {} criada", created.codigo);
        Ok(created)
    }

    pub async fn update(
        &self,
        id: i64,
        changes: UpdateRequisitionPayload,
    ) -> Result<Requisition, AppError> {
        let mut requisition = self.get_by_id(id).await?;

        if let Some(codigo) = changes.codigo.as_deref() {
            if codigo != requisition.codigo && self.repo.find_by_code(codigo).await?.is_some() {
                return Err(AppError::Duplicate(DUPLICATE_CODE.to_string()));
            }
        }

        requisition.apply(changes);
        self.repo.update(&requisition).await?.ok_or(AppError::NotFound(NOT_FOUND))
    }

    pub async fn approve(&self, id: i64) -> Result<Requisition, AppError> {
        self.set_status(id, RequisitionStatus::Aprovada).await
    }

    pub async fn reject(&self, id: i64) -> Result<Requisition, AppError> {
        self.set_status(id, RequisitionStatus::Rejeitada).await
    }

    // Sem máquina de estados: reaprovar ou aprovar uma rejeitada é permitido
    async fn set_status(&self, id: i64, status: RequisitionStatus) -> Result<Requisition, AppError> {
        let requisition = self
            .repo
            .set_status(id, status)
            .await?
            .ok_or(AppError::NotFound(NOT_FOUND))?;
        tracing::info!("Requisição {} agora está {:?}", requisition.codigo, status);
        Ok(requisition)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound(NOT_FOUND));
        }
        Ok(())
    }
}
