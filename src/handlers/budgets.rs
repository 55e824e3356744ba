// src/handlers/budgets.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        extract::{AppJson, AppPath},
    },
    config::AppState,
    handlers::{today, MessageResponse},
    middleware::auth::AuthenticatedUser,
    models::budget::{AddQuotePayload, Budget, CreateBudgetPayload, UpdateBudgetPayload},
};

// GET /api/orcamentos
#[utoipa::path(
    get,
    path = "/api/orcamentos",
    tag = "Orçamentos",
    responses((status = 200, description = "Todos os orçamentos, com cotações", body = [Budget]))
)]
pub async fn list_budgets(State(app_state): State<AppState>) -> Result<Json<Vec<Budget>>, AppError> {
    Ok(Json(app_state.budget_service.list_all().await?))
}

// GET /api/orcamentos/{id}
#[utoipa::path(
    get,
    path = "/api/orcamentos/{id}",
    tag = "Orçamentos",
    params(("id" = i64, Path, description = "ID do orçamento")),
    responses(
        (status = 200, description = "Orçamento encontrado", body = Budget),
        (status = 404, description = "Orçamento não encontrado")
    )
)]
pub async fn get_budget(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Budget>, AppError> {
    Ok(Json(app_state.budget_service.get_by_id(id).await?))
}

// GET /api/orcamentos/codigo/{codigo}
#[utoipa::path(
    get,
    path = "/api/orcamentos/codigo/{codigo}",
    tag = "Orçamentos",
    params(("codigo" = String, Path, description = "Código do orçamento, ex. ORC-2001")),
    responses(
        (status = 200, description = "Orçamento encontrado", body = Budget),
        (status = 404, description = "Orçamento não encontrado")
    )
)]
pub async fn get_budget_by_code(
    State(app_state): State<AppState>,
    AppPath(codigo): AppPath<String>,
) -> Result<Json<Budget>, AppError> {
    Ok(Json(app_state.budget_service.get_by_code(&codigo).await?))
}

// GET /api/orcamentos/status/{status}
#[utoipa::path(
    get,
    path = "/api/orcamentos/status/{status}",
    tag = "Orçamentos",
    params(("status" = String, Path, description = "Status livre, ex. pendente")),
    responses((status = 200, description = "Orçamentos no status", body = [Budget]))
)]
pub async fn list_budgets_by_status(
    State(app_state): State<AppState>,
    AppPath(status): AppPath<String>,
) -> Result<Json<Vec<Budget>>, AppError> {
    Ok(Json(app_state.budget_service.list_by_status(&status).await?))
}

// POST /api/orcamentos
#[utoipa::path(
    post,
    path = "/api/orcamentos",
    tag = "Orçamentos",
    request_body = CreateBudgetPayload,
    responses(
        (status = 201, description = "Orçamento criado", body = Budget),
        (status = 400, description = "Campos ausentes ou código já cadastrado"),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_budget(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    AppJson(payload): AppJson<CreateBudgetPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let budget = app_state.budget_service.create(payload, today()).await?;

    Ok((StatusCode::CREATED, Json(budget)))
}

// PUT /api/orcamentos/{id}
#[utoipa::path(
    put,
    path = "/api/orcamentos/{id}",
    tag = "Orçamentos",
    params(("id" = i64, Path, description = "ID do orçamento")),
    request_body = UpdateBudgetPayload,
    responses(
        (status = 200, description = "Orçamento atualizado", body = Budget),
        (status = 400, description = "Código já cadastrado"),
        (status = 401, description = "Não autenticado"),
        (status = 404, description = "Orçamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_budget(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateBudgetPayload>,
) -> Result<Json<Budget>, AppError> {
    payload.validate()?;

    Ok(Json(app_state.budget_service.update(id, payload).await?))
}

// DELETE /api/orcamentos/{id}
#[utoipa::path(
    delete,
    path = "/api/orcamentos/{id}",
    tag = "Orçamentos",
    params(("id" = i64, Path, description = "ID do orçamento")),
    responses(
        (status = 200, description = "Orçamento excluído", body = MessageResponse),
        (status = 401, description = "Não autenticado"),
        (status = 404, description = "Orçamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_budget(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    AppPath(id): AppPath<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    app_state.budget_service.delete(id).await?;

    Ok(Json(MessageResponse::new("Orçamento excluído com sucesso")))
}

// POST /api/orcamentos/{id}/cotacoes
#[utoipa::path(
    post,
    path = "/api/orcamentos/{id}/cotacoes",
    tag = "Orçamentos",
    params(("id" = i64, Path, description = "ID do orçamento")),
    request_body = AddQuotePayload,
    responses(
        (status = 200, description = "Orçamento com a nova cotação", body = Budget),
        (status = 400, description = "Campos ausentes"),
        (status = 401, description = "Não autenticado"),
        (status = 404, description = "Orçamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_quote(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<AddQuotePayload>,
) -> Result<Json<Budget>, AppError> {
    payload.validate()?;

    Ok(Json(app_state.budget_service.add_quote(id, payload).await?))
}
