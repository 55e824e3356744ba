// src/handlers/orders.rs

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
    models::order::{AddOrderHistoryPayload, CreateOrderPayload, Order, UpdateOrderPayload},
};

// GET /api/pedidos
#[utoipa::path(
    get,
    path = "/api/pedidos",
    tag = "Pedidos",
    responses((status = 200, description = "Todos os pedidos, com rastreio", body = [Order]))
)]
pub async fn list_orders(State(app_state): State<AppState>) -> Result<Json<Vec<Order>>, AppError> {
    Ok(Json(app_state.order_service.list_all().await?))
}

// GET /api/pedidos/{id}
#[utoipa::path(
    get,
    path = "/api/pedidos/{id}",
    tag = "Pedidos",
    params(("id" = i64, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Pedido encontrado", body = Order),
        (status = 404, description = "Pedido não encontrado")
    )
)]
pub async fn get_order(
    State(app_state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Order>, AppError> {
    Ok(Json(app_state.order_service.get_by_id(id).await?))
}

// GET /api/pedidos/codigo/{codigo}
#[utoipa::path(
    get,
    path = "/api/pedidos/codigo/{codigo}",
    tag = "Pedidos",
    params(("codigo" = String, Path, description = "Código do pedido, ex. PED-5001")),
    responses(
        (status = 200, description = "Pedido encontrado", body = Order),
        (status = 404, description = "Pedido não encontrado")
    )
)]
pub async fn get_order_by_code(
    State(app_state): State<AppState>,
    AppPath(codigo): AppPath<String>,
) -> Result<Json<Order>, AppError> {
    Ok(Json(app_state.order_service.get_by_code(&codigo).await?))
}

// GET /api/pedidos/status/{status}
#[utoipa::path(
    get,
    path = "/api/pedidos/status/{status}",
    tag = "Pedidos",
    params(("status" = String, Path, description = "processando, em_transito, entregue ou cancelado")),
    responses((status = 200, description = "Pedidos no status", body = [Order]))
)]
pub async fn list_orders_by_status(
    State(app_state): State<AppState>,
    AppPath(status): AppPath<String>,
) -> Result<Json<Vec<Order>>, AppError> {
    Ok(Json(app_state.order_service.list_by_status(&status).await?))
}

// POST /api/pedidos
#[utoipa::path(
    post,
    path = "/api/pedidos",
    tag = "Pedidos",
    request_body = CreateOrderPayload,
    responses(
        (status = 201, description = "Pedido criado", body = Order),
        (status = 400, description = "Campos ausentes ou código já cadastrado"),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    AppJson(payload): AppJson<CreateOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let order = app_state.order_service.create(payload, today()).await?;

    Ok((StatusCode::CREATED, Json(order)))
}

// PUT /api/pedidos/{id}
#[utoipa::path(
    put,
    path = "/api/pedidos/{id}",
    tag = "Pedidos",
    params(("id" = i64, Path, description = "ID do pedido")),
    request_body = UpdateOrderPayload,
    responses(
        (status = 200, description = "Pedido atualizado", body = Order),
        (status = 400, description = "Código já cadastrado"),
        (status = 401, description = "Não autenticado"),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_order(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateOrderPayload>,
) -> Result<Json<Order>, AppError> {
    payload.validate()?;

    Ok(Json(app_state.order_service.update(id, payload).await?))
}

// DELETE /api/pedidos/{id}
#[utoipa::path(
    delete,
    path = "/api/pedidos/{id}",
    tag = "Pedidos",
    params(("id" = i64, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Pedido excluído", body = MessageResponse),
        (status = 401, description = "Não autenticado"),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_order(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    AppPath(id): AppPath<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    app_state.order_service.delete(id).await?;

    Ok(Json(MessageResponse::new("Pedido excluído com sucesso")))
}

// POST /api/pedidos/{id}/historico
#[utoipa::path(
    post,
    path = "/api/pedidos/{id}/historico",
    tag = "Pedidos",
    params(("id" = i64, Path, description = "ID do pedido")),
    request_body = AddOrderHistoryPayload,
    responses(
        (status = 200, description = "Pedido com o rastreio atualizado", body = Order),
        (status = 400, description = "Campos ausentes"),
        (status = 401, description = "Não autenticado"),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_order_history(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<AddOrderHistoryPayload>,
) -> Result<Json<Order>, AppError> {
    payload.validate()?;

    Ok(Json(app_state.order_service.add_history(id, payload, today()).await?))
}
