// src/handlers/requisitions.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        extract::{AppJson, AppPath},
    },
    config::AppState,
    handlers::{today, MessageResponse},
    middleware::auth::{AuthenticatedUser, RequireAdmin},
    models::requisition::{CreateRequisitionPayload, Requisition, UpdateRequisitionPayload},
};

// GET /api/requisicoes
#[utoipa::path(
    get,
    path = "/api/requisicoes",
    tag = "Requisições",
    responses((status = 200, description = "Todas as requisições", body = [Requisition]))
)]
pub async fn list_requisitions(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Requisition>>, AppError> {
    Ok(Json(app_state.requisition_service.list_all().await?))
}

// GET /api/requisicoes/{id}
#[utoipa::path(
    get,
    path = "/api/requisicoes/{id}",
    tag = "Requisições",
    params(("id" = i64, Path, description = "ID da requisição")),
    responses(
        (status = 200, description = "Requisição encontrada", body = Requisition),
        (status = 404, description = "Requisição não encontrada")
    )
)]
pub async fn get_requisition(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Requisition>, AppError> {
    Ok(Json(app_state.requisition_service.get_by_id(id).await?))
}

// GET /api/requisicoes/codigo/{codigo}
#[utoipa::path(
    get,
    path = "/api/requisicoes/codigo/{codigo}",
    tag = "Requisições",
    params(("codigo" = String, Path, description = "Código da requisição, ex. REQ-1234")),
    responses(
        (status = 200, description = "Requisição encontrada", body = Requisition),
        (status = 404, description = "Requisição não encontrada")
    )
)]
pub async fn get_requisition_by_code(
    State(app_state): State<AppState>,
    AppPath(codigo): AppPath<String>,
) -> Result<Json<Requisition>, AppError> {
    Ok(Json(app_state.requisition_service.get_by_code(&codigo).await?))
}

// GET /api/requisicoes/status/{status}
#[utoipa::path(
    get,
    path = "/api/requisicoes/status/{status}",
    tag = "Requisições",
    params(("status" = String, Path, description = "pendente, aprovada, rejeitada ou em_analise")),
    responses((status = 200, description = "Requisições no status", body = [Requisition]))
)]
pub async fn list_requisitions_by_status(
    State(app_state): State<AppState>,
    AppPath(status): AppPath<String>,
) -> Result<Json<Vec<Requisition>>, AppError> {
    Ok(Json(app_state.requisition_service.list_by_status(&status).await?))
}

// POST /api/requisicoes
#[utoipa::path(
    post,
    path = "/api/requisicoes",
    tag = "Requisições",
    request_body = CreateRequisitionPayload,
    responses(
        (status = 201, description = "Requisição criada", body = Requisition),
        (status = 400, description = "Campos ausentes ou código já cadastrado"),
        (status = 401, description = "Não autenticado ou não é administrador")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_requisition(
    State(app_state): State<AppState>,
    _admin: RequireAdmin,
    AppJson(payload): AppJson<CreateRequisitionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let requisition = app_state.requisition_service.create(payload, today()).await?;

    Ok((StatusCode::CREATED, Json(requisition)))
}

// PUT /api/requisicoes/{id}
#[utoipa::path(
    put,
    path = "/api/requisicoes/{id}",
    tag = "Requisições",
    params(("id" = i64, Path, description = "ID da requisição")),
    request_body = UpdateRequisitionPayload,
    responses(
        (status = 200, description = "Requisição atualizada", body = Requisition),
        (status = 400, description = "Código já cadastrado"),
        (status = 401, description = "Não autenticado"),
        (status = 404, description = "Requisição não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_requisition(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateRequisitionPayload>,
) -> Result<Json<Requisition>, AppError> {
    payload.validate()?;

    Ok(Json(app_state.requisition_service.update(id, payload).await?))
}

// PUT /api/requisicoes/{id}/aprovar
#[utoipa::path(
    put,
    path = "/api/requisicoes/{id}/aprovar",
    tag = "Requisições",
    params(("id" = i64, Path, description = "ID da requisição")),
    responses(
        (status = 200, description = "Requisição aprovada", body = Requisition),
        (status = 401, description = "Não autenticado ou não é administrador"),
        (status = 404, description = "Requisição não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn approve_requisition(
    State(app_state): State<AppState>,
    _admin: RequireAdmin,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Requisition>, AppError> {
    Ok(Json(app_state.requisition_service.approve(id).await?))
}

// PUT /api/requisicoes/{id}/rejeitar
#[utoipa::path(
    put,
    path = "/api/requisicoes/{id}/rejeitar",
    tag = "Requisições",
    params(("id" = i64, Path, description = "ID da requisição")),
    responses(
        (status = 200, description = "Requisição rejeitada", body = Requisition),
        (status = 401, description = "Não autenticado ou não é administrador"),
        (status = 404, description = "Requisição não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn reject_requisition(
    State(app_state): State<AppState>,
    _admin: RequireAdmin,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Requisition>, AppError> {
    Ok(Json(app_state.requisition_service.reject(id).await?))
}

// DELETE /api/requisicoes/{id}
#[utoipa::path(
    delete,
    path = "/api/requisicoes/{id}",
    tag = "Requisições",
    params(("id" = i64, Path, description = "ID da requisição")),
    responses(
        (status = 200, description = "Requisição excluída", body = MessageResponse),
        (status = 401, description = "Não autenticado ou não é administrador"),
        (status = 404, description = "Requisição não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_requisition(
    State(app_state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    app_state.requisition_service.delete(id).await?;
    tracing::info!("Requisição {} excluída por '{}'", id, admin.username);

    Ok(Json(MessageResponse::new("Requisição excluída com sucesso")))
}
