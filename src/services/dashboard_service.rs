// src/services/dashboard_service.rs

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::dashboard::{
        CategoryExpense, DashboardOverview, DashboardStat, MonthlyExpense, RecentActivity,
        RequisitionStatusCount,
    },
};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository) -> Self {
        Self { repo }
    }

    pub async fn get_stats(&self) -> Result<Vec<DashboardStat>, AppError> {
        self.repo.get_stats().await
    }

    pub async fn get_monthly_expenses(&self) -> Result<Vec<MonthlyExpense>, AppError> {
        self.repo.get_monthly_expenses().await
    }

    pub async fn get_category_expenses(&self) -> Result<Vec<CategoryExpense>, AppError> {
        self.repo.get_category_expenses().await
    }

    pub async fn get_requisition_status(&self) -> Result<Vec<RequisitionStatusCount>, AppError> {
        self.repo.get_requisition_status().await
    }

    pub async fn get_recent_activities(&self) -> Result<Vec<RecentActivity>, AppError> {
        self.repo.get_recent_activities().await
    }

    /// Todas as seções do painel, lidas em paralelo.
    pub async fn get_all(&self) -> Result<DashboardOverview, AppError> {
        let (stats, monthly_expenses, category_expenses, requisition_status, recent_activities) = tokio::try_join!(
            self.repo.get_stats(),
            self.repo.get_monthly_expenses(),
            self.repo.get_category_expenses(),
            self.repo.get_requisition_status(),
            self.repo.get_recent_activities(),
        )?;

        Ok(DashboardOverview {
            stats,
            monthly_expenses,
            category_expenses,
            requisition_status,
            recent_activities,
        })
    }
}
