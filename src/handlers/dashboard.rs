// src/handlers/dashboard.rs

use axum::{extract::State, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    models::dashboard::{
        CategoryExpense, DashboardOverview, DashboardStat, MonthlyExpense, RecentActivity,
        RequisitionStatusCount,
    },
};

// GET /api/dashboard/stats
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    tag = "Dashboard",
    responses((status = 200, description = "Cards do topo do painel", body = [DashboardStat]))
)]
pub async fn get_stats(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<DashboardStat>>, AppError> {
    Ok(Json(app_state.dashboard_service.get_stats().await?))
}

// GET /api/dashboard/monthly-expenses
#[utoipa::path(
    get,
    path = "/api/dashboard/monthly-expenses",
    tag = "Dashboard",
    responses((status = 200, description = "Gastos mensais com meta", body = [MonthlyExpense]))
)]
pub async fn get_monthly_expenses(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<MonthlyExpense>>, AppError> {
    Ok(Json(app_state.dashboard_service.get_monthly_expenses().await?))
}

// GET /api/dashboard/category-expenses
#[utoipa::path(
    get,
    path = "/api/dashboard/category-expenses",
    tag = "Dashboard",
    responses((status = 200, description = "Gastos por categoria", body = [CategoryExpense]))
)]
pub async fn get_category_expenses(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<CategoryExpense>>, AppError> {
    Ok(Json(app_state.dashboard_service.get_category_expenses().await?))
}

// GET /api/dashboard/requisition-status
#[utoipa::path(
    get,
    path = "/api/dashboard/requisition-status",
    tag = "Dashboard",
    responses((status = 200, description = "Requisições por status", body = [RequisitionStatusCount]))
)]
pub async fn get_requisition_status(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<RequisitionStatusCount>>, AppError> {
    Ok(Json(app_state.dashboard_service.get_requisition_status().await?))
}

// GET /api/dashboard/recent-activities
#[utoipa::path(
    get,
    path = "/api/dashboard/recent-activities",
    tag = "Dashboard",
    responses((status = 200, description = "As dez atividades mais recentes", body = [RecentActivity]))
)]
pub async fn get_recent_activities(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<RecentActivity>>, AppError> {
    Ok(Json(app_state.dashboard_service.get_recent_activities().await?))
}

// GET /api/dashboard/all
#[utoipa::path(
    get,
    path = "/api/dashboard/all",
    tag = "Dashboard",
    responses((status = 200, description = "Todas as seções do painel", body = DashboardOverview))
)]
pub async fn get_all(
    State(app_state): State<AppState>,
) -> Result<Json<DashboardOverview>, AppError> {
    Ok(Json(app_state.dashboard_service.get_all().await?))
}
