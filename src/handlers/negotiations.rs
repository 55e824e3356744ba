// src/handlers/negotiations.rs

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
    models::negotiation::{
        AddNegotiationHistoryPayload, CreateNegotiationPayload, Negotiation,
        UpdateNegotiationPayload,
    },
};

// GET /api/negociacoes
#[utoipa::path(
    get,
    path = "/api/negociacoes",
    tag = "Negociações",
    responses((status = 200, description = "Todas as negociações, com histórico", body = [Negotiation]))
)]
pub async fn list_negotiations(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Negotiation>>, AppError> {
    Ok(Json(app_state.negotiation_service.list_all().await?))
}

// GET /api/negociacoes/{id}
#[utoipa::path(
    get,
    path = "/api/negociacoes/{id}",
    tag = "Negociações",
    params(("id" = i64, Path, description = "ID da negociação")),
    responses(
        (status = 200, description = "Negociação encontrada", body = Negotiation),
        (status = 404, description = "Negociação não encontrada")
    )
)]
pub async fn get_negotiation(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Negotiation>, AppError> {
    Ok(Json(app_state.negotiation_service.get_by_id(id).await?))
}

// GET /api/negociacoes/codigo/{codigo}
#[utoipa::path(
    get,
    path = "/api/negociacoes/codigo/{codigo}",
    tag = "Negociações",
    params(("codigo" = String, Path, description = "Código da negociação, ex. NEG-1001")),
    responses(
        (status = 200, description = "Negociação encontrada", body = Negotiation),
        (status = 404, description = "Negociação não encontrada")
    )
)]
pub async fn get_negotiation_by_code(
    State(app_state): State<AppState>,
    AppPath(codigo): AppPath<String>,
) -> Result<Json<Negotiation>, AppError> {
    Ok(Json(app_state.negotiation_service.get_by_code(&codigo).await?))
}

// GET /api/negociacoes/status/{status}
#[utoipa::path(
    get,
    path = "/api/negociacoes/status/{status}",
    tag = "Negociações",
    params(("status" = String, Path, description = "em_andamento ou concluida")),
    responses((status = 200, description = "Negociações no status", body = [Negotiation]))
)]
pub async fn list_negotiations_by_status(
    State(app_state): State<AppState>,
    AppPath(status): AppPath<String>,
) -> Result<Json<Vec<Negotiation>>, AppError> {
    Ok(Json(app_state.negotiation_service.list_by_status(&status).await?))
}

// POST /api/negociacoes
#[utoipa::path(
    post,
    path = "/api/negociacoes",
    tag = "Negociações",
    request_body = CreateNegotiationPayload,
    responses(
        (status = 201, description = "Negociação criada", body = Negotiation),
        (status = 400, description = "Campos ausentes ou código já cadastrado"),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_negotiation(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    AppJson(payload): AppJson<CreateNegotiationPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let negotiation = app_state.negotiation_service.create(payload, today()).await?;

    Ok((StatusCode::CREATED, Json(negotiation)))
}

// PUT /api/negociacoes/{id}
#[utoipa::path(
    put,
    path = "/api/negociacoes/{id}",
    tag = "Negociações",
    params(("id" = i64, Path, description = "ID da negociação")),
    request_body = UpdateNegotiationPayload,
    responses(
        (status = 200, description = "Negociação atualizada", body = Negotiation),
        (status = 400, description = "Código já cadastrado"),
        (status = 401, description = "Não autenticado"),
        (status = 404, description = "Negociação não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_negotiation(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateNegotiationPayload>,
) -> Result<Json<Negotiation>, AppError> {
    payload.validate()?;

    Ok(Json(app_state.negotiation_service.update(id, payload).await?))
}

// DELETE /api/negociacoes/{id}
#[utoipa::path(
    delete,
    path = "/api/negociacoes/{id}",
    tag = "Negociações",
    params(("id" = i64, Path, description = "ID da negociação")),
    responses(
        (status = 200, description = "Negociação excluída", body = MessageResponse),
        (status = 401, description = "Não autenticado"),
        (status = 404, description = "Negociação não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_negotiation(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    AppPath(id): AppPath<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    app_state.negotiation_service.delete(id).await?;

    Ok(Json(MessageResponse::new("Negociação excluída com sucesso")))
}

// POST /api/negociacoes/{id}/historico
#[utoipa::path(
    post,
    path = "/api/negociacoes/{id}/historico",
    tag = "Negociações",
    params(("id" = i64, Path, description = "ID da negociação")),
    request_body = AddNegotiationHistoryPayload,
    responses(
        (status = 200, description = "Negociação com o histórico atualizado", body = Negotiation),
        (status = 400, description = "Campos ausentes"),
        (status = 401, description = "Não autenticado"),
        (status = 404, description = "Negociação não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_negotiation_history(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<AddNegotiationHistoryPayload>,
) -> Result<Json<Negotiation>, AppError> {
    payload.validate()?;

    Ok(Json(app_state.negotiation_service.add_history(id, payload, today()).await?))
}
