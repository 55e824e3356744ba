// src/services/supplier_service.rs

use crate::{
    common::error::AppError,
    db::SupplierRepository,
    models::supplier::{CreateSupplierPayload, Supplier, UpdateSupplierPayload},
};

const NOT_FOUND: &str = "Fornecedor não encontrado";
const DUPLICATE_CNPJ: &str = "CNPJ já cadastrado";

#[derive(Clone)]
pub struct SupplierService {
    repo: SupplierRepository,
}

impl SupplierService {
    pub fn new(repo: SupplierRepository) -> Self {
        Self { repo }
    }

    pub async fn list_all(&self) -> Result<Vec<Supplier>, AppError> {
        self.repo.list_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Supplier, AppError> {
        self.repo.find_by_id(id).await?.ok_or(AppError::NotFound(NOT_FOUND))
    }

    pub async fn list_by_status(&self, status: &str) -> Result<Vec<Supplier>, AppError> {
        self.repo.list_by_status(status).await
    }

    pub async fn list_by_category(&self, categoria: &str) -> Result<Vec<Supplier>, AppError> {
        self.repo.list_by_category(categoria).await
    }

    // Sem termo de busca devolve todos
    pub async fn search(&self, nome: Option<&str>) -> Result<Vec<Supplier>, AppError> {
        match nome.map(str::trim).filter(|n| !n.is_empty()) {
            Some(nome) => self.repo.search_by_name(nome).await,
            None => self.repo.list_all().await,
        }
    }

    pub async fn create(&self, payload: CreateSupplierPayload) -> Result<Supplier, AppError> {
        let supplier = payload.into_supplier();

        if self.repo.find_by_cnpj(&supplier.cnpj).await?.is_some() {
            return Err(AppError::Duplicate(DUPLICATE_CNPJ.to_string()));
        }

        let created = self.repo.create(self.repo.pool(), &supplier).await?;
        tracing::info!("Fornecedor {} criado", created.id);
        Ok(created)
    }

    pub async fn update(&self, id: i64, changes: UpdateSupplierPayload) -> Result<Supplier, AppError> {
        let mut supplier = self.get_by_id(id).await?;

        if let Some(cnpj) = changes.cnpj.as_deref() {
            if let Some(other) = self.repo.find_by_cnpj(cnpj).await? {
                if other.id != id {
                    return Err(AppError::Duplicate(DUPLICATE_CNPJ.to_string()));
                }
            }
        }

        supplier.apply(changes);
        self.repo.update(&supplier).await?.ok_or(AppError::NotFound(NOT_FOUND))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound(NOT_FOUND));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    async fn service() -> SupplierService {
        SupplierService::new(SupplierRepository::new(test_pool().await))
    }

    fn payload(nome: &str, cnpj: &str) -> CreateSupplierPayload {
        serde_json::from_value(serde_json::json!({ "nome": nome, "cnpj": cnpj })).unwrap()
    }

    #[tokio::test]
    async fn create_applies_defaults_and_rejects_repeated_cnpj() {
        let service = service().await;

        let created = service.create(payload("TechSupply", "1")).await.unwrap();
        assert_eq!(created.avaliacao, 0.0);
        assert_eq!(created.total_pedidos, 0);

        let err = service.create(payload("Outro", "1")).await.unwrap_err();
        assert!(matches!(err, AppError::Duplicate(_)));
    }

    #[tokio::test]
    async fn update_keeps_untouched_fields() {
        let service = service().await;
        let created = service.create(payload("TechSupply", "1")).await.unwrap();

        let updated = service
            .update(
                created.id,
                UpdateSupplierPayload { avaliacao: Some(4.5), ..Default::default() },
            )
            .await
            .unwrap();

        assert_eq!(updated.avaliacao, 4.5);
        assert_eq!(updated.nome, "TechSupply");
    }

    #[tokio::test]
    async fn update_to_another_suppliers_cnpj_fails() {
        let service = service().await;
        service.create(payload("A", "1")).await.unwrap();
        let b = service.create(payload("B", "2")).await.unwrap();

        let err = service
            .update(b.id, UpdateSupplierPayload { cnpj: Some("1".into()), ..Default::default() })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Duplicate(_)));
    }

    #[tokio::test]
    async fn missing_supplier_is_not_found() {
        let service = service().await;

        assert!(matches!(service.get_by_id(42).await, Err(AppError::NotFound(_))));
        assert!(matches!(service.delete(42).await, Err(AppError::NotFound(_))));
    }
}
