// src/models/negotiation.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NegotiationStatus {
    EmAndamento,
    Concluida,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NegotiationHistory {
    pub id: i64,
    #[serde(skip)]
    pub negociacao_id: i64,
    pub data: NaiveDate,
    #[schema(example = "Carlos Silva")]
    pub autor: String,
    #[schema(example = "Proposta inicial recebida")]
    pub mensagem: String,
    pub valor: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Negotiation {
    pub id: i64,
    #[schema(example = "NEG-1001")]
    pub codigo: String,
    pub item: String,
    pub fornecedor: String,
    #[schema(example = 50000.0)]
    pub valor_inicial: f64,
    #[schema(example = 45000.0)]
    pub valor_negociado: f64,
    #[schema(example = "10%")]
    pub desconto: String,
    pub responsavel: String,
    pub data_inicio: NaiveDate,
    pub data_fim: Option<NaiveDate>,
    pub status: NegotiationStatus,

    // Carregado à parte, ordenado por id
    #[sqlx(skip)]
    #[serde(default)]
    pub historico: Vec<NegotiationHistory>,
}

impl Negotiation {
    pub fn savings(&self) -> f64 {
        self.valor_inicial - self.valor_negociado
    }
}

/// Desconto em texto inteiro ("10%") a partir dos dois valores.
pub fn discount_label(valor_inicial: f64, valor_negociado: f64) -> String {
    if valor_inicial == 0.0 {
        return "0%".to_string();
    }
    let percent = ((valor_inicial - valor_negociado) / valor_inicial * 100.0).round();
    format!("{}%", percent as i64)
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNegotiationPayload {
    #[validate(required, length(min = 1, message = "O código não pode ser vazio."))]
    #[schema(example = "NEG-1004")]
    pub codigo: Option<String>,

    #[validate(required, length(min = 1, message = "O item não pode ser vazio."))]
    pub item: Option<String>,

    #[validate(required, length(min = 1, message = "O fornecedor não pode ser vazio."))]
    pub fornecedor: Option<String>,

    #[validate(required, range(min = 0.0, message = "O valor inicial não pode ser negativo."))]
    pub valor_inicial: Option<f64>,

    #[validate(required, range(min = 0.0, message = "O valor negociado não pode ser negativo."))]
    pub valor_negociado: Option<f64>,

    pub desconto: Option<String>,
    pub responsavel: Option<String>,
    pub data_inicio: Option<NaiveDate>,
    pub data_fim: Option<NaiveDate>,
    pub status: Option<NegotiationStatus>,
}

impl CreateNegotiationPayload {
    /// Monta o registro a ser inserido. Chamar somente após `validate()`.
    pub fn into_negotiation(self, today: NaiveDate) -> Negotiation {
        let valor_inicial = self.valor_inicial.unwrap_or(0.0);
        let valor_negociado = self.valor_negociado.unwrap_or(0.0);

        Negotiation {
            id: 0,
            codigo: self.codigo.unwrap_or_default(),
            item: self.item.unwrap_or_default(),
            fornecedor: self.fornecedor.unwrap_or_default(),
            valor_inicial,
            valor_negociado,
            desconto: self
                .desconto
                .unwrap_or_else(|| discount_label(valor_inicial, valor_negociado)),
            responsavel: self.responsavel.unwrap_or_default(),
            data_inicio: self.data_inicio.unwrap_or(today),
            data_fim: self.data_fim,
            status: self.status.unwrap_or(NegotiationStatus::EmAndamento),
            historico: Vec::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNegotiationPayload {
    #[validate(length(min = 1, message = "O código não pode ser vazio."))]
    pub codigo: Option<String>,
    pub item: Option<String>,
    pub fornecedor: Option<String>,
    #[validate(range(min = 0.0, message = "O valor inicial não pode ser negativo."))]
    pub valor_inicial: Option<f64>,
    #[validate(range(min = 0.0, message = "O valor negociado não pode ser negativo."))]
    pub valor_negociado: Option<f64>,
    pub desconto: Option<String>,
    pub responsavel: Option<String>,
    pub data_inicio: Option<NaiveDate>,
    pub data_fim: Option<NaiveDate>,
    pub status: Option<NegotiationStatus>,
}

impl Negotiation {
    pub fn apply(&mut self, changes: UpdateNegotiationPayload) {
        if let Some(codigo) = changes.codigo { self.codigo = codigo; }
        if let Some(item) = changes.item { self.item = item; }
        if let Some(fornecedor) = changes.fornecedor { self.fornecedor = fornecedor; }
        if let Some(valor) = changes.valor_inicial { self.valor_inicial = valor; }
        if let Some(valor) = changes.valor_negociado { self.valor_negociado = valor; }
        if let Some(desconto) = changes.desconto { self.desconto = desconto; }
        if let Some(responsavel) = changes.responsavel { self.responsavel = responsavel; }
        if let Some(data) = changes.data_inicio { self.data_inicio = data; }
        if let Some(data) = changes.data_fim { self.data_fim = Some(data); }
        if let Some(status) = changes.status { self.status = status; }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddNegotiationHistoryPayload {
    #[validate(required, length(min = 1, message = "O autor não pode ser vazio."))]
    pub autor: Option<String>,

    #[validate(required, length(min = 1, message = "A mensagem não pode ser vazia."))]
    pub mensagem: Option<String>,

    #[validate(required, range(min = 0.0, message = "O valor não pode ser negativo."))]
    pub valor: Option<f64>,

    pub data: Option<NaiveDate>,
}
