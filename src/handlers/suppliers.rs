// src/handlers/suppliers.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        extract::{AppJson, AppPath, AppQuery},
    },
    config::AppState,
    handlers::MessageResponse,
    middleware::auth::{AuthenticatedUser, RequireAdmin},
    models::supplier::{
        CreateSupplierPayload, Supplier, SupplierSearchQuery, UpdateSupplierPayload,
    },
};

// GET /api/fornecedores
#[utoipa::path(
    get,
    path = "/api/fornecedores",
    tag = "Fornecedores",
    responses((status = 200, description = "Todos os fornecedores", body = [Supplier]))
)]
pub async fn list_suppliers(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Supplier>>, AppError> {
    Ok(Json(app_state.supplier_service.list_all().await?))
}

// GET /api/fornecedores/{id}
#[utoipa::path(
    get,
    path = "/api/fornecedores/{id}",
    tag = "Fornecedores",
    params(("id" = i64, Path, description = "ID do fornecedor")),
    responses(
        (status = 200, description = "Fornecedor encontrado", body = Supplier),
        (status = 404, description = "Fornecedor não encontrado")
    )
)]
pub async fn get_supplier(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Supplier>, AppError> {
    Ok(Json(app_state.supplier_service.get_by_id(id).await?))
}

// GET /api/fornecedores/status/{status}
#[utoipa::path(
    get,
    path = "/api/fornecedores/status/{status}",
    tag = "Fornecedores",
    params(("status" = String, Path, description = "Ativo ou Inativo")),
    responses((status = 200, description = "Fornecedores no status", body = [Supplier]))
)]
pub async fn list_suppliers_by_status(
    State(app_state): State<AppState>,
    AppPath(status): AppPath<String>,
) -> Result<Json<Vec<Supplier>>, AppError> {
    Ok(Json(app_state.supplier_service.list_by_status(&status).await?))
}

// GET /api/fornecedores/categoria/{categoria}
#[utoipa::path(
    get,
    path = "/api/fornecedores/categoria/{categoria}",
    tag = "Fornecedores",
    params(("categoria" = String, Path, description = "Categoria do fornecedor")),
    responses((status = 200, description = "Fornecedores da categoria", body = [Supplier]))
)]
pub async fn list_suppliers_by_category(
    State(app_state): State<AppState>,
    AppPath(categoria): AppPath<String>,
) -> Result<Json<Vec<Supplier>>, AppError> {
    Ok(Json(app_state.supplier_service.list_by_category(&categoria).await?))
}

// GET /api/fornecedores/search?nome=
#[utoipa::path(
    get,
    path = "/api/fornecedores/search",
    tag = "Fornecedores",
    params(SupplierSearchQuery),
    responses((status = 200, description = "Fornecedores cujo nome contém o termo", body = [Supplier]))
)]
pub async fn search_suppliers(
    State(app_state): State<AppState>,
    AppQuery(query): AppQuery<SupplierSearchQuery>,
) -> Result<Json<Vec<Supplier>>, AppError> {
    Ok(Json(app_state.supplier_service.search(query.nome.as_deref()).await?))
}

// POST /api/fornecedores
#[utoipa::path(
    post,
    path = "/api/fornecedores",
    tag = "Fornecedores",
    request_body = CreateSupplierPayload,
    responses(
        (status = 201, description = "Fornecedor criado", body = Supplier),
        (status = 400, description = "Campos ausentes ou CNPJ já cadastrado"),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_supplier(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    AppJson(payload): AppJson<CreateSupplierPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let supplier = app_state.supplier_service.create(payload).await?;

    Ok((StatusCode::CREATED, Json(supplier)))
}

// PUT /api/fornecedores/{id}
#[utoipa::path(
    put,
    path = "/api/fornecedores/{id}",
    tag = "Fornecedores",
    params(("id" = i64, Path, description = "ID do fornecedor")),
    request_body = UpdateSupplierPayload,
    responses(
        (status = 200, description = "Fornecedor atualizado", body = Supplier),
        (status = 400, description = "CNPJ já cadastrado"),
        (status = 401, description = "Não autenticado"),
        (status = 404, description = "Fornecedor não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_supplier(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateSupplierPayload>,
) -> Result<Json<Supplier>, AppError> {
    payload.validate()?;

    Ok(Json(app_state.supplier_service.update(id, payload).await?))
}

// DELETE /api/fornecedores/{id}
#[utoipa::path(
    delete,
    path = "/api/fornecedores/{id}",
    tag = "Fornecedores",
    params(("id" = i64, Path, description = "ID do fornecedor")),
    responses(
        (status = 200, description = "Fornecedor excluído", body = MessageResponse),
        (status = 401, description = "Não autenticado ou não é administrador"),
        (status = 404, description = "Fornecedor não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_supplier(
    State(app_state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    app_state.supplier_service.delete(id).await?;
    tracing::info!("Fornecedor {} excluído por '{}'", id, admin.username);

    Ok(Json(MessageResponse::new("Fornecedor excluído com sucesso")))
}
