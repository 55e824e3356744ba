// src/handlers/reports.rs

use axum::{extract::State, Json};

use crate::{
    common::{error::AppError, extract::AppQuery},
    config::AppState,
    handlers::today,
    models::{
        dashboard::CategoryExpense,
        report::{Indicators, MonthlySeries, ReportOverview, ReportQuery, TopSupplier},
    },
};

// GET /api/relatorios/all?year=
#[utoipa::path(
    get,
    path = "/api/relatorios/all",
    tag = "Relatórios",
    params(ReportQuery),
    responses(
        (status = 200, description = "Relatório completo", body = ReportOverview),
        (status = 400, description = "Ano inválido")
    )
)]
pub async fn get_all(
    State(app_state): State<AppState>,
    AppQuery(query): AppQuery<ReportQuery>,
) -> Result<Json<ReportOverview>, AppError> {
    Ok(Json(app_state.report_service.all(query.year, today()).await?))
}

// GET /api/relatorios/gastos-mensais?year=
#[utoipa::path(
    get,
    path = "/api/relatorios/gastos-mensais",
    tag = "Relatórios",
    params(ReportQuery),
    responses(
        (status = 200, description = "Série mensal do ano", body = MonthlySeries),
        (status = 400, description = "Ano inválido")
    )
)]
pub async fn get_monthly_expenses(
    State(app_state): State<AppState>,
    AppQuery(query): AppQuery<ReportQuery>,
) -> Result<Json<MonthlySeries>, AppError> {
    Ok(Json(app_state.report_service.gastos_mensais(query.year, today()).await?))
}

// GET /api/relatorios/gastos-categoria
#[utoipa::path(
    get,
    path = "/api/relatorios/gastos-categoria",
    tag = "Relatórios",
    responses((status = 200, description = "Gastos por categoria", body = [CategoryExpense]))
)]
pub async fn get_category_expenses(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<CategoryExpense>>, AppError> {
    Ok(Json(app_state.report_service.gastos_categoria().await?))
}

// GET /api/relatorios/indicadores
#[utoipa::path(
    get,
    path = "/api/relatorios/indicadores",
    tag = "Relatórios",
    responses((status = 200, description = "Indicadores de compras", body = Indicators))
)]
pub async fn get_indicators(
    State(app_state): State<AppState>,
) -> Result<Json<Indicators>, AppError> {
    Ok(Json(app_state.report_service.indicadores(today()).await?))
}

// GET /api/relatorios/top-fornecedores
#[utoipa::path(
    get,
    path = "/api/relatorios/top-fornecedores",
    tag = "Relatórios",
    responses((status = 200, description = "Os cinco fornecedores melhor avaliados", body = [TopSupplier]))
)]
pub async fn get_top_suppliers(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<TopSupplier>>, AppError> {
    Ok(Json(app_state.report_service.top_fornecedores().await?))
}
