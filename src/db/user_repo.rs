// src/db/user_repo.rs

use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::{db_utils::unique_violation_or, error::AppError},
    models::auth::{User, UserRole},
};

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    // Cria um novo usuário; também usado pela carga inicial dentro da transação
    pub async fn create_user<'e, E>(
        &self,
        executor: E,
        username: &str,
        password_hash: &str,
        email: &str,
        role: UserRole,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, email, role, active)
            VALUES (?, ?, ?, ?, 1)
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(email)
        .bind(role)
        .fetch_one(executor)
        .await
        .map_err(|e| unique_violation_or(e, "Nome de usuário já está em uso"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn duplicate_username_is_a_client_error() {
        let pool = test_pool().await;
        let repo = UserRepository::new(pool.clone());

        repo.create_user(&pool, "ana", "hash", "ana@supplyflow.com", UserRole::User)
            .await
            .unwrap();
        let err = repo
            .create_user(&pool, "ana", "hash", "outra@supplyflow.com", UserRole::User)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Duplicate(_)));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn finds_user_by_username_and_id() {
        let pool = test_pool().await;
        let repo = UserRepository::new(pool.clone());

        let created = repo
            .create_user(&pool, "admin", "hash", "admin@supplyflow.com", UserRole::Admin)
            .await
            .unwrap();

        let by_name = repo.find_by_username("admin").await.unwrap().unwrap();
        let by_id = repo.find_by_id(created.id).await.unwrap().unwrap();

        assert_eq!(by_name.id, created.id);
        assert_eq!(by_id.role, UserRole::Admin);
        assert!(by_id.active);
        assert!(repo.find_by_username("ninguem").await.unwrap().is_none());
    }
}
