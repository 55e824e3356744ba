// src/models/order.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Processando,
    EmTransito,
    Entregue,
    Cancelado,
}

// Linha do histórico de rastreio (somente inclusão)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderHistory {
    pub id: i64,
    #[serde(skip)]
    pub pedido_id: i64,
    pub data: NaiveDate,
    #[schema(example = "Em trânsito")]
    pub status: String,
    #[schema(example = "Pedido saiu para entrega")]
    pub descricao: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    #[schema(example = "PED-3001")]
    pub codigo: String,
    pub item: String,
    pub fornecedor: String,
    pub quantidade: i64,
    #[schema(example = 45000.0)]
    pub valor: f64,
    pub data_pedido: NaiveDate,
    pub data_entrega: NaiveDate,
    pub endereco: String,
    pub rastreio: String,
    pub requisicao_codigo: String,
    pub status: OrderStatus,

    #[sqlx(skip)]
    #[serde(default)]
    pub historico: Vec<OrderHistory>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderPayload {
    #[validate(required, length(min = 1, message = "O código não pode ser vazio."))]
    #[schema(example = "PED-3004")]
    pub codigo: Option<String>,

    #[validate(required, length(min = 1, message = "O item não pode ser vazio."))]
    pub item: Option<String>,

    #[validate(required, length(min = 1, message = "O fornecedor não pode ser vazio."))]
    pub fornecedor: Option<String>,

    #[validate(range(min = 1, message = "A quantidade deve ser ao menos 1."))]
    pub quantidade: Option<i64>,

    #[validate(required, range(min = 0.0, message = "O valor não pode ser negativo."))]
    pub valor: Option<f64>,

    pub data_pedido: Option<NaiveDate>,
    pub data_entrega: Option<NaiveDate>,
    pub endereco: Option<String>,
    pub rastreio: Option<String>,
    pub requisicao_codigo: Option<String>,
    pub status: Option<OrderStatus>,
}

impl CreateOrderPayload {
    /// Monta o registro a ser inserido. Chamar somente após `validate()`.
    pub fn into_order(self, today: NaiveDate) -> Order {
        let data_pedido = self.data_pedido.unwrap_or(today);
        Order {
            id: 0,
            codigo: self.codigo.unwrap_or_default(),
            item: self.item.unwrap_or_default(),
            fornecedor: self.fornecedor.unwrap_or_default(),
            quantidade: self.quantidade.unwrap_or(1),
            valor: self.valor.unwrap_or(0.0),
            data_pedido,
            data_entrega: self.data_entrega.unwrap_or(data_pedido),
            endereco: self.endereco.unwrap_or_default(),
            rastreio: self.rastreio.unwrap_or_default(),
            requisicao_codigo: self.requisicao_codigo.unwrap_or_default(),
            status: self.status.unwrap_or(OrderStatus::Processando),
            historico: Vec::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderPayload {
    #[validate(length(min = 1, message = "O código não pode ser vazio."))]
    pub codigo: Option<String>,
    pub item: Option<String>,
    pub fornecedor: Option<String>,
    #[validate(range(min = 1, message = "A quantidade deve ser ao menos 1."))]
    pub quantidade: Option<i64>,
    #[validate(range(min = 0.0, message = "O valor não pode ser negativo."))]
    pub valor: Option<f64>,
    pub data_pedido: Option<NaiveDate>,
    pub data_entrega: Option<NaiveDate>,
    pub endereco: Option<String>,
    pub rastreio: Option<String>,
    pub requisicao_codigo: Option<String>,
    pub status: Option<OrderStatus>,
}

impl Order {
    pub fn apply(&mut self, changes: UpdateOrderPayload) {
        if let Some(codigo) = changes.codigo { self.codigo = codigo; }
        if let Some(item) = changes.item { self.item = item; }
        if let Some(fornecedor) = changes.fornecedor { self.fornecedor = fornecedor; }
        if let Some(quantidade) = changes.quantidade { self.quantidade = quantidade; }
        if let Some(valor) = changes.valor { self.valor = valor; }
        if let Some(data) = changes.data_pedido { self.data_pedido = data; }
        if let Some(data) = changes.data_entrega { self.data_entrega = data; }
        if let Some(endereco) = changes.endereco { self.endereco = endereco; }
        if let Some(rastreio) = changes.rastreio { self.rastreio = rastreio; }
        if let Some(codigo) = changes.requisicao_codigo { self.requisicao_codigo = codigo; }
        if let Some(status) = changes.status { self.status = status; }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddOrderHistoryPayload {
    #[validate(required, length(min = 1, message = "O status não pode ser vazio."))]
    pub status: Option<String>,

    #[validate(required, length(min = 1, message = "A descrição não pode ser vazia."))]
    pub descricao: Option<String>,

    pub data: Option<NaiveDate>,
}
