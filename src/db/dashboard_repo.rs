// src/db/dashboard_repo.rs

use sqlx::{SqliteConnection, SqlitePool};

use crate::{
    common::error::AppError,
    models::dashboard::{
        CategoryExpense, DashboardStat, MonthlyExpense, RecentActivity, RequisitionStatusCount,
    },
};

const RECENT_LIMIT: i64 = 10;

#[derive(Clone)]
pub struct DashboardRepository {
    pool: SqlitePool,
}

impl DashboardRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // 1. Cards
    pub async fn get_stats(&self) -> Result<Vec<DashboardStat>, AppError> {
        let rows = sqlx::query_as::<_, DashboardStat>("SELECT * FROM dashboard_stats ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    // 2. Gastos mensais
    pub async fn get_monthly_expenses(&self) -> Result<Vec<MonthlyExpense>, AppError> {
        let rows =
            sqlx::query_as::<_, MonthlyExpense>("SELECT * FROM monthly_expenses ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    // 3. Gastos por categoria
    pub async fn get_category_expenses(&self) -> Result<Vec<CategoryExpense>, AppError> {
        let rows =
            sqlx::query_as::<_, CategoryExpense>("SELECT * FROM category_expenses ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    // 4. Requisições por status
    pub async fn get_requisition_status(&self) -> Result<Vec<RequisitionStatusCount>, AppError> {
        let rows = sqlx::query_as::<_, RequisitionStatusCount>(
            "SELECT * FROM requisition_status ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // 5. As dez atividades mais novas
    pub async fn get_recent_activities(&self) -> Result<Vec<RecentActivity>, AppError> {
        let rows = sqlx::query_as::<_, RecentActivity>(
            "SELECT * FROM recent_activities ORDER BY id DESC LIMIT ?",
        )
        .bind(RECENT_LIMIT)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // --- Escrita: usada só pela carga inicial ---

    pub async fn insert_stat(
        &self,
        conn: &mut SqliteConnection,
        stat: &DashboardStat,
    ) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO dashboard_stats (title, value, change, trend, icon, color) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&stat.title)
        .bind(&stat.value)
        .bind(&stat.change)
        .bind(&stat.trend)
        .bind(&stat.icon)
        .bind(&stat.color)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    pub async fn insert_monthly_expense(
        &self,
        conn: &mut SqliteConnection,
        name: &str,
        valor: f64,
        meta: Option<f64>,
    ) -> Result<(), AppError> {
        sqlx::query("INSERT INTO monthly_expenses (name, valor, meta) VALUES (?, ?, ?)")
            .bind(name)
            .bind(valor)
            .bind(meta)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    pub async fn insert_category_expense(
        &self,
        conn: &mut SqliteConnection,
        name: &str,
        valor: f64,
    ) -> Result<(), AppError> {
        sqlx::query("INSERT INTO category_expenses (name, valor) VALUES (?, ?)")
            .bind(name)
            .bind(valor)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    pub async fn insert_requisition_status(
        &self,
        conn: &mut SqliteConnection,
        name: &str,
        value: i64,
    ) -> Result<(), AppError> {
        sqlx::query("INSERT INTO requisition_status (name, value) VALUES (?, ?)")
            .bind(name)
            .bind(value)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    pub async fn insert_activity(
        &self,
        conn: &mut SqliteConnection,
        activity: &RecentActivity,
    ) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO recent_activities (title, description, type, time, icon, color) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&activity.title)
        .bind(&activity.description)
        .bind(&activity.kind)
        .bind(&activity.time)
        .bind(&activity.icon)
        .bind(&activity.color)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn recent_activities_are_capped_and_newest_first() {
        let pool = test_pool().await;
        let repo = DashboardRepository::new(pool.clone());
        let mut conn = pool.acquire().await.unwrap();

        for i in 1..=12 {
            let activity = RecentActivity {
                id: 0,
                title: format!("Atividade {i}"),
                description: String::new(),
                kind: "order".into(),
                time: "agora".into(),
                icon: "Package".into(),
                color: "blue".into(),
            };
            repo.insert_activity(&mut conn, &activity).await.unwrap();
        }
        drop(conn);

        let recent = repo.get_recent_activities().await.unwrap();

        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].title, "Atividade 12");
        assert_eq!(recent[9].title, "Atividade 3");
    }

    #[tokio::test]
    async fn monthly_meta_is_optional() {
        let pool = test_pool().await;
        let repo = DashboardRepository::new(pool.clone());
        let mut conn = pool.acquire().await.unwrap();

        repo.insert_monthly_expense(&mut conn, "Jan", 100.0, Some(120.0)).await.unwrap();
        repo.insert_monthly_expense(&mut conn, "Fev", 90.0, None).await.unwrap();
        drop(conn);

        let rows = repo.get_monthly_expenses().await.unwrap();
        assert_eq!(rows[0].meta, Some(120.0));
        assert_eq!(rows[1].meta, None);
    }
}
