// src/db/order_repo.rs

use std::collections::HashMap;

use sqlx::SqliteConnection;

use crate::{
    common::{
        db_utils::{affected_any, fetch_children, unique_violation_or},
        error::AppError,
    },
    models::order::{Order, OrderHistory},
};

pub(crate) const DUPLICATE_CODE: &str = "Já existe um pedido com este código";

#[derive(Clone, Default)]
pub struct OrderRepository;

impl OrderRepository {
    pub fn new() -> Self {
        Self
    }

    async fn with_history(
        &self,
        conn: &mut SqliteConnection,
        mut orders: Vec<Order>,
    ) -> Result<Vec<Order>, AppError> {
        let ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
        let rows: Vec<OrderHistory> =
            fetch_children(conn, "historico_pedido", "pedido_id", &ids).await?;

        let mut by_parent: HashMap<i64, Vec<OrderHistory>> = HashMap::new();
        for row in rows {
            by_parent.entry(row.pedido_id).or_default().push(row);
        }
        for order in &mut orders {
            order.historico = by_parent.remove(&order.id).unwrap_or_default();
        }
        Ok(orders)
    }

    async fn one_with_history(
        &self,
        conn: &mut SqliteConnection,
        order: Option<Order>,
    ) -> Result<Option<Order>, AppError> {
        match order {
            Some(o) => Ok(self.with_history(conn, vec![o]).await?.pop()),
            None => Ok(None),
        }
    }

    pub async fn list_all(&self, conn: &mut SqliteConnection) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<_, Order>("SELECT * FROM pedidos ORDER BY id")
            .fetch_all(&mut *conn)
            .await?;
        self.with_history(conn, orders).await
    }

    pub async fn find_by_id(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
    ) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM pedidos WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        self.one_with_history(conn, order).await
    }

    pub async fn find_by_code(
        &self,
        conn: &mut SqliteConnection,
        codigo: &str,
    ) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM pedidos WHERE codigo = ?")
            .bind(codigo)
            .fetch_optional(&mut *conn)
            .await?;
        self.one_with_history(conn, order).await
    }

    pub async fn list_by_status(
        &self,
        conn: &mut SqliteConnection,
        status: &str,
    ) -> Result<Vec<Order>, AppError> {
        let orders =
            sqlx::query_as::<_, Order>("SELECT * FROM pedidos WHERE status = ? ORDER BY id")
                .bind(status)
                .fetch_all(&mut *conn)
                .await?;
        self.with_history(conn, orders).await
    }

    pub async fn create(&self, conn: &mut SqliteConnection, order: &Order) -> Result<Order, AppError> {
        sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO pedidos (
                codigo, item, fornecedor, quantidade, valor, data_pedido, data_entrega,
                endereco, rastreio, requisicao_codigo, status
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&order.codigo)
        .bind(&order.item)
        .bind(&order.fornecedor)
        .bind(order.quantidade)
        .bind(order.valor)
        .bind(order.data_pedido)
        .bind(order.data_entrega)
        .bind(&order.endereco)
        .bind(&order.rastreio)
        .bind(&order.requisicao_codigo)
        .bind(order.status)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| unique_violation_or(e, DUPLICATE_CODE))
    }

    pub async fn update(&self, conn: &mut SqliteConnection, order: &Order) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE pedidos SET
                codigo = ?, item = ?, fornecedor = ?, quantidade = ?, valor = ?,
                data_pedido = ?, data_entrega = ?, endereco = ?, rastreio = ?,
                requisicao_codigo = ?, status = ?
            WHERE id = ?
            "#,
        )
        .bind(&order.codigo)
        .bind(&order.item)
        .bind(&order.fornecedor)
        .bind(order.quantidade)
        .bind(order.valor)
        .bind(order.data_pedido)
        .bind(order.data_entrega)
        .bind(&order.endereco)
        .bind(&order.rastreio)
        .bind(&order.requisicao_codigo)
        .bind(order.status)
        .bind(order.id)
        .execute(&mut *conn)
        .await
        .map_err(|e| unique_violation_or(e, DUPLICATE_CODE))?;
        Ok(affected_any(result))
    }

    pub async fn delete(&self, conn: &mut SqliteConnection, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM pedidos WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(affected_any(result))
    }

    pub async fn add_history(
        &self,
        conn: &mut SqliteConnection,
        entry: &OrderHistory,
    ) -> Result<OrderHistory, AppError> {
        let row = sqlx::query_as::<_, OrderHistory>(
            r#"
            INSERT INTO historico_pedido (pedido_id, data, status, descricao)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(entry.pedido_id)
        .bind(entry.data)
        .bind(&entry.status)
        .bind(&entry.descricao)
        .fetch_one(&mut *conn)
        .await?;
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::test_pool, models::order::OrderStatus};
    use chrono::NaiveDate;

    fn order(codigo: &str) -> Order {
        let placed = NaiveDate::from_ymd_opt(2025, 10, 10).unwrap();
        Order {
            id: 0,
            codigo: codigo.into(),
            item: "Notebooks".into(),
            fornecedor: "TechSupply Ltda".into(),
            quantidade: 10,
            valor: 45000.0,
            data_pedido: placed,
            data_entrega: placed,
            endereco: String::new(),
            rastreio: String::new(),
            requisicao_codigo: String::new(),
            status: OrderStatus::Processando,
            historico: Vec::new(),
        }
    }

    #[tokio::test]
    async fn status_filter_uses_wire_names() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let repo = OrderRepository::new();

        let mut shipped = order("PED-1");
        shipped.status = OrderStatus::EmTransito;
        repo.create(&mut conn, &shipped).await.unwrap();
        repo.create(&mut conn, &order("PED-2")).await.unwrap();

        let in_transit = repo.list_by_status(&mut conn, "em_transito").await.unwrap();
        assert_eq!(in_transit.len(), 1);
        assert_eq!(in_transit[0].codigo, "PED-1");
        assert!(repo.list_by_status(&mut conn, "perdido").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn history_is_attached_to_the_right_order() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let repo = OrderRepository::new();

        let first = repo.create(&mut conn, &order("PED-1")).await.unwrap();
        let second = repo.create(&mut conn, &order("PED-2")).await.unwrap();
        let entry = OrderHistory {
            id: 0,
            pedido_id: second.id,
            data: NaiveDate::from_ymd_opt(2025, 10, 11).unwrap(),
            status: "Enviado".into(),
            descricao: "Saiu do centro de distribuição".into(),
        };
        repo.add_history(&mut conn, &entry).await.unwrap();

        let first = repo.find_by_id(&mut conn, first.id).await.unwrap().unwrap();
        let second = repo.find_by_code(&mut conn, "PED-2").await.unwrap().unwrap();

        assert!(first.historico.is_empty());
        assert_eq!(second.historico[0].status, "Enviado");
    }
}
