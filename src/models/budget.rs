// src/models/budget.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

pub const DEFAULT_STATUS: &str = "pendente";

// Cotação enviada por um fornecedor para um orçamento
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: i64,
    #[serde(skip)]
    pub orcamento_id: i64,
    #[schema(example = "TechSupply Ltda")]
    pub fornecedor: String,
    #[schema(example = 4500.0)]
    pub valor_unitario: f64,
    #[schema(example = 45000.0)]
    pub valor_total: f64,
    #[schema(example = "15 dias")]
    pub prazo_entrega: String,
    pub condicoes: String,
    pub avaliacao: f64,
    #[schema(example = "pendente")]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: i64,
    #[schema(example = "ORC-2001")]
    pub codigo: String,
    pub item: String,
    #[schema(example = "REQ-1234")]
    pub requisicao_codigo: String,
    pub quantidade: i64,
    pub data_limite: NaiveDate,
    #[schema(example = "pendente")]
    pub status: String,

    #[sqlx(skip)]
    #[serde(default)]
    pub cotacoes: Vec<Quote>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBudgetPayload {
    #[validate(required, length(min = 1, message = "O código não pode ser vazio."))]
    #[schema(example = "ORC-2004")]
    pub codigo: Option<String>,

    #[validate(required, length(min = 1, message = "O item não pode ser vazio."))]
    pub item: Option<String>,

    pub requisicao_codigo: Option<String>,

    #[validate(range(min = 1, message = "A quantidade deve ser ao menos 1."))]
    pub quantidade: Option<i64>,

    pub data_limite: Option<NaiveDate>,
    pub status: Option<String>,
}

impl CreateBudgetPayload {
    /// Monta o registro a ser inserido. Chamar somente após `validate()`.
    pub fn into_budget(self, today: NaiveDate) -> Budget {
        Budget {
            id: 0,
            codigo: self.codigo.unwrap_or_default(),
            item: self.item.unwrap_or_default(),
            requisicao_codigo: self.requisicao_codigo.unwrap_or_default(),
            quantidade: self.quantidade.unwrap_or(1),
            data_limite: self.data_limite.unwrap_or(today),
            status: self.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            cotacoes: Vec::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBudgetPayload {
    #[validate(length(min = 1, message = "O código não pode ser vazio."))]
    pub codigo: Option<String>,
    pub item: Option<String>,
    pub requisicao_codigo: Option<String>,
    #[validate(range(min = 1, message = "A quantidade deve ser ao menos 1."))]
    pub quantidade: Option<i64>,
    pub data_limite: Option<NaiveDate>,
    pub status: Option<String>,
}

impl Budget {
    pub fn apply(&mut self, changes: UpdateBudgetPayload) {
        if let Some(codigo) = changes.codigo { self.codigo = codigo; }
        if let Some(item) = changes.item { self.item = item; }
        if let Some(codigo) = changes.requisicao_codigo { self.requisicao_codigo = codigo; }
        if let Some(quantidade) = changes.quantidade { self.quantidade = quantidade; }
        if let Some(data) = changes.data_limite { self.data_limite = data; }
        if let Some(status) = changes.status { self.status = status; }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddQuotePayload {
    #[validate(required, length(min = 1, message = "O fornecedor não pode ser vazio."))]
    pub fornecedor: Option<String>,

    #[validate(required, range(min = 0.0, message = "O valor unitário não pode ser negativo."))]
    pub valor_unitario: Option<f64>,

    // Ausente = valor unitário x quantidade do orçamento
    #[validate(range(min = 0.0, message = "O valor total não pode ser negativo."))]
    pub valor_total: Option<f64>,

    pub prazo_entrega: Option<String>,
    pub condicoes: Option<String>,

    #[validate(range(min = 0.0, max = 5.0, message = "A avaliação deve estar entre 0 e 5."))]
    pub avaliacao: Option<f64>,

    pub status: Option<String>,
}

impl AddQuotePayload {
    pub fn into_quote(self, budget: &Budget) -> Quote {
        let valor_unitario = self.valor_unitario.unwrap_or(0.0);
        Quote {
            id: 0,
            orcamento_id: budget.id,
            fornecedor: self.fornecedor.unwrap_or_default(),
            valor_unitario,
            valor_total: self
                .valor_total
                .unwrap_or(valor_unitario * budget.quantidade as f64),
            prazo_entrega: self.prazo_entrega.unwrap_or_default(),
            condicoes: self.condicoes.unwrap_or_default(),
            avaliacao: self.avaliacao.unwrap_or(0.0),
            status: self.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn budget(quantidade: i64) -> Budget {
        Budget {
            id: 7,
            codigo: "ORC-1".into(),
            item: "Notebooks".into(),
            requisicao_codigo: "REQ-1".into(),
            quantidade,
            data_limite: NaiveDate::from_ymd_opt(2025, 11, 5).unwrap(),
            status: DEFAULT_STATUS.into(),
            cotacoes: Vec::new(),
        }
    }

    #[test]
    fn quote_total_defaults_to_unit_price_times_quantity() {
        let payload: AddQuotePayload = serde_json::from_value(serde_json::json!({
            "fornecedor": "TechSupply Ltda",
            "valorUnitario": 4500.0
        }))
        .unwrap();

        let quote = payload.into_quote(&budget(10));

        assert_eq!(quote.valor_total, 45000.0);
        assert_eq!(quote.orcamento_id, 7);
        assert_eq!(quote.status, "pendente");
    }

    #[test]
    fn budget_defaults_to_one_unit_due_today() {
        let today = NaiveDate::from_ymd_opt(2025, 10, 28).unwrap();
        let payload: CreateBudgetPayload = serde_json::from_value(serde_json::json!({
            "codigo": "ORC-9",
            "item": "Monitores"
        }))
        .unwrap();
        payload.validate().unwrap();

        let budget = payload.into_budget(today);

        assert_eq!(budget.quantidade, 1);
        assert_eq!(budget.data_limite, today);
        assert_eq!(budget.requisicao_codigo, "");
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let payload: CreateBudgetPayload = serde_json::from_value(serde_json::json!({
            "codigo": "ORC-9",
            "item": "Monitores",
            "quantidade": 0
        }))
        .unwrap();

        assert!(payload.validate().is_err());
    }
}
