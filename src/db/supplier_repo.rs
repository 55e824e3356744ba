// src/db/supplier_repo.rs

use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::{
        db_utils::{affected_any, unique_violation_or},
        error::AppError,
    },
    models::supplier::Supplier,
};

const DUPLICATE_CNPJ: &str = "CNPJ já cadastrado";

#[derive(Clone)]
pub struct SupplierRepository {
    pool: SqlitePool,
}

impl SupplierRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn list_all(&self) -> Result<Vec<Supplier>, AppError> {
        let suppliers = sqlx::query_as::<_, Supplier>("SELECT * FROM fornecedores ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(suppliers)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Supplier>, AppError> {
        let supplier = sqlx::query_as::<_, Supplier>("SELECT * FROM fornecedores WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(supplier)
    }

    pub async fn find_by_cnpj(&self, cnpj: &str) -> Result<Option<Supplier>, AppError> {
        let supplier = sqlx::query_as::<_, Supplier>("SELECT * FROM fornecedores WHERE cnpj = ?")
            .bind(cnpj)
            .fetch_optional(&self.pool)
            .await?;
        Ok(supplier)
    }

    // Status desconhecido simplesmente não encontra nada
    pub async fn list_by_status(&self, status: &str) -> Result<Vec<Supplier>, AppError> {
        let suppliers =
            sqlx::query_as::<_, Supplier>("SELECT * FROM fornecedores WHERE status = ? ORDER BY id")
                .bind(status)
                .fetch_all(&self.pool)
                .await?;
        Ok(suppliers)
    }

    pub async fn list_by_category(&self, categoria: &str) -> Result<Vec<Supplier>, AppError> {
        let suppliers = sqlx::query_as::<_, Supplier>(
            "SELECT * FROM fornecedores WHERE categoria = ? ORDER BY id",
        )
        .bind(categoria)
        .fetch_all(&self.pool)
        .await?;
        Ok(suppliers)
    }

    /// Busca por trecho do nome (LIKE do SQLite ignora caixa em ASCII).
    pub async fn search_by_name(&self, nome: &str) -> Result<Vec<Supplier>, AppError> {
        let suppliers = sqlx::query_as::<_, Supplier>(
            "SELECT * FROM fornecedores WHERE nome LIKE '%' || ? || '%' ORDER BY id",
        )
        .bind(nome)
        .fetch_all(&self.pool)
        .await?;
        Ok(suppliers)
    }

    pub async fn create<'e, E>(&self, executor: E, supplier: &Supplier) -> Result<Supplier, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, Supplier>(
            r#"
            INSERT INTO fornecedores (
                nome, cnpj, email, telefone, endereco, categoria, avaliacao, status, total_pedidos
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&supplier.nome)
        .bind(&supplier.cnpj)
        .bind(&supplier.email)
        .bind(&supplier.telefone)
        .bind(&supplier.endereco)
        .bind(&supplier.categoria)
        .bind(supplier.avaliacao)
        .bind(supplier.status)
        .bind(supplier.total_pedidos)
        .fetch_one(executor)
        .await
        .map_err(|e| unique_violation_or(e, DUPLICATE_CNPJ))
    }

    pub async fn update(&self, supplier: &Supplier) -> Result<Option<Supplier>, AppError> {
        sqlx::query_as::<_, Supplier>(
            r#"
            UPDATE fornecedores SET
                nome = ?, cnpj = ?, email = ?, telefone = ?, endereco = ?,
                categoria = ?, avaliacao = ?, status = ?, total_pedidos = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&supplier.nome)
        .bind(&supplier.cnpj)
        .bind(&supplier.email)
        .bind(&supplier.telefone)
        .bind(&supplier.endereco)
        .bind(&supplier.categoria)
        .bind(supplier.avaliacao)
        .bind(supplier.status)
        .bind(supplier.total_pedidos)
        .bind(supplier.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| unique_violation_or(e, DUPLICATE_CNPJ))
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM fornecedores WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(affected_any(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::test_pool, models::supplier::SupplierStatus};

    fn supplier(nome: &str, cnpj: &str, categoria: &str) -> Supplier {
        Supplier {
            id: 0,
            nome: nome.into(),
            cnpj: cnpj.into(),
            email: String::new(),
            telefone: String::new(),
            endereco: String::new(),
            categoria: categoria.into(),
            avaliacao: 4.0,
            status: SupplierStatus::Ativo,
            total_pedidos: 0,
        }
    }

    #[tokio::test]
    async fn filters_by_category_status_and_name() {
        let pool = test_pool().await;
        let repo = SupplierRepository::new(pool.clone());

        repo.create(&pool, &supplier("TechSupply Ltda", "1", "Tecnologia")).await.unwrap();
        let mut inactive = supplier("Papelaria Central", "2", "Escritório");
        inactive.status = SupplierStatus::Inativo;
        repo.create(&pool, &inactive).await.unwrap();

        assert_eq!(repo.list_by_category("Tecnologia").await.unwrap().len(), 1);
        assert_eq!(repo.list_by_status("Inativo").await.unwrap()[0].nome, "Papelaria Central");
        assert!(repo.list_by_status("Suspenso").await.unwrap().is_empty());
        assert_eq!(repo.search_by_name("supply").await.unwrap()[0].cnpj, "1");
    }

    #[tokio::test]
    async fn duplicate_cnpj_is_rejected_by_the_store() {
        let pool = test_pool().await;
        let repo = SupplierRepository::new(pool.clone());

        repo.create(&pool, &supplier("A", "11.111.111/0001-11", "")).await.unwrap();
        let err = repo
            .create(&pool, &supplier("B", "11.111.111/0001-11", ""))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Duplicate(_)));
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_was_removed() {
        let pool = test_pool().await;
        let repo = SupplierRepository::new(pool.clone());
        let created = repo.create(&pool, &supplier("A", "1", "")).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
    }
}
