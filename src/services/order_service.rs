// src/services/order_service.rs

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    db::{order_repo::DUPLICATE_CODE, OrderRepository},
    models::order::{
        AddOrderHistoryPayload, CreateOrderPayload, Order, OrderHistory, UpdateOrderPayload,
    },
};

const NOT_FOUND: &str = "Pedido não encontrado";

#[derive(Clone)]
pub struct OrderService {
    repo: OrderRepository,
    pool: SqlitePool,
}

impl OrderService {
    pub fn new(repo: OrderRepository, pool: SqlitePool) -> Self {
        Self { repo, pool }
    }

    pub async fn list_all(&self) -> Result<Vec<Order>, AppError> {
        let mut conn = self.pool.acquire().await?;
        self.repo.list_all(&mut conn).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Order, AppError> {
        let mut conn = self.pool.acquire().await?;
        self.repo
            .find_by_id(&mut conn, id)
            .await?
            .ok_or(AppError::NotFound(NOT_FOUND))
    }

    pub async fn get_by_code(&self, codigo: &str) -> Result<Order, AppError> {
        let mut conn = self.pool.acquire().await?;
        self.repo
            .find_by_code(&mut conn, codigo)
            .await?
            .ok_or(AppError::NotFound(NOT_FOUND))
    }

    pub async fn list_by_status(&self, status: &str) -> Result<Vec<Order>, AppError> {
        let mut conn = self.pool.acquire().await?;
        self.repo.list_by_status(&mut conn, status).await
    }

    pub async fn create(&self, payload: CreateOrderPayload, today: NaiveDate) -> Result<Order, AppError> {
        let order = payload.into_order(today);
        let mut conn = self.pool.acquire().await?;

        if self.repo.find_by_code(&mut conn, &order.codigo).await?.is_some() {
            return Err(AppError::Duplicate(DUPLICATE_CODE.to_string()));
        }

        let created = self.repo.create(&mut conn, &order).await?;
        tracing::info!("Pedido {} criado", created.codigo);
        Ok(created)
    }

    pub async fn update(&self, id: i64, changes: UpdateOrderPayload) -> Result<Order, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut order = self
            .repo
            .find_by_id(&mut tx, id)
            .await?
            .ok_or(AppError::NotFound(NOT_FOUND))?;

        if let Some(codigo) = changes.codigo.as_deref() {
            if codigo != order.codigo && self.repo.find_by_code(&mut tx, codigo).await?.is_some() {
                return Err(AppError::Duplicate(DUPLICATE_CODE.to_string()));
            }
        }

        order.apply(changes);
        self.repo.update(&mut tx, &order).await?;
        tx.commit().await?;

        Ok(order)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut conn = self.pool.acquire().await?;
        if !self.repo.delete(&mut conn, id).await? {
            return Err(AppError::NotFound(NOT_FOUND));
        }
        Ok(())
    }

    pub async fn add_history(
        &self,
        id: i64,
        payload: AddOrderHistoryPayload,
        today: NaiveDate,
    ) -> Result<Order, AppError> {
        let mut tx = self.pool.begin().await?;

        if self.repo.find_by_id(&mut tx, id).await?.is_none() {
            return Err(AppError::NotFound(NOT_FOUND));
        }

        let entry = OrderHistory {
            id: 0,
            pedido_id: id,
            data: payload.data.unwrap_or(today),
            status: payload.status.unwrap_or_default(),
            descricao: payload.descricao.unwrap_or_default(),
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
