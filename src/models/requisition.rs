// src/models/requisition.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

// --- Enums ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RequisitionStatus {
    Pendente,
    Aprovada,
    Rejeitada,
    EmAnalise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Alta,
    Media,
    Baixa,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Requisition {
    pub id: i64,
    #[schema(example = "REQ-1234")]
    pub codigo: String,
    #[schema(example = "Notebooks Dell i7")]
    pub titulo: String,
    pub descricao: String,
    pub solicitante: String,
    pub departamento: String,
    pub categoria: String,
    #[schema(example = 45000.0)]
    pub valor: f64,
    pub data: NaiveDate,
    pub status: RequisitionStatus,
    pub prioridade: Priority,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequisitionPayload {
    #[validate(required, length(min = 1, message = "O código não pode ser vazio."))]
    #[schema(example = "REQ-1239")]
    pub codigo: Option<String>,

    #[validate(required, length(min = 1, message = "O título não pode ser vazio."))]
    pub titulo: Option<String>,

    pub descricao: Option<String>,

    #[validate(required, length(min = 1, message = "O solicitante não pode ser vazio."))]
    pub solicitante: Option<String>,

    #[validate(required, length(min = 1, message = "O departamento não pode ser vazio."))]
    pub departamento: Option<String>,

    pub categoria: Option<String>,

    #[validate(required, range(min = 0.0, message = "O valor não pode ser negativo."))]
    pub valor: Option<f64>,

    pub data: Option<NaiveDate>,
    pub status: Option<RequisitionStatus>,
    pub prioridade: Option<Priority>,
}

impl CreateRequisitionPayload {
    /// Monta o registro a ser inserido. Chamar somente após `validate()`.
    pub fn into_requisition(self, today: NaiveDate) -> Requisition {
        Requisition {
            id: 0,
            codigo: self.codigo.unwrap_or_default(),
            titulo: self.titulo.unwrap_or_default(),
            descricao: self.descricao.unwrap_or_default(),
            solicitante: self.solicitante.unwrap_or_default(),
            departamento: self.departamento.unwrap_or_default(),
            categoria: self.categoria.unwrap_or_default(),
            valor: self.valor.unwrap_or(0.0),
            data: self.data.unwrap_or(today),
            status: self.status.unwrap_or(RequisitionStatus::Pendente),
            prioridade: self.prioridade.unwrap_or(Priority::Media),
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequisitionPayload {
    #[validate(length(min = 1, message = "O código não pode ser vazio."))]
    pub codigo: Option<String>,
    pub titulo: Option<String>,
    pub descricao: Option<String>,
    pub solicitante: Option<String>,
    pub departamento: Option<String>,
    pub categoria: Option<String>,
    #[validate(range(min = 0.0, message = "O valor não pode ser negativo."))]
    pub valor: Option<f64>,
    pub data: Option<NaiveDate>,
    pub status: Option<RequisitionStatus>,
    pub prioridade: Option<Priority>,
}

impl Requisition {
    pub fn apply(&mut self, changes: UpdateRequisitionPayload) {
        if let Some(codigo) = changes.codigo { self.codigo = codigo; }
        if let Some(titulo) = changes.titulo { self.titulo = titulo; }
        if let Some(descricao) = changes.descricao { self.descricao = descricao; }
        if let Some(solicitante) = changes.solicitante { self.solicitante = solicitante; }
        if let Some(departamento) = changes.departamento { self.departamento = departamento; }
        if let Some(categoria) = changes.categoria { self.categoria = categoria; }
        if let Some(valor) = changes.valor { self.valor = valor; }
        if let Some(data) = changes.data { self.data = data; }
        if let Some(status) = changes.status { self.status = status; }
        if let Some(prioridade) = changes.prioridade { self.prioridade = prioridade; }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_payload_reports_every_missing_field() {
        let payload: CreateRequisitionPayload = serde_json::from_value(serde_json::json!({
            "codigo": "REQ-1",
            "titulo": "Cadeiras"
        }))
        .unwrap();

        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("valor"));
        assert!(fields.contains_key("solicitante"));
        assert!(fields.contains_key("departamento"));
        assert!(!fields.contains_key("codigo"));
    }

    #[test]
    fn create_payload_fills_defaults() {
        let today = NaiveDate::from_ymd_opt(2025, 10, 28).unwrap();
        let payload: CreateRequisitionPayload = serde_json::from_value(serde_json::json!({
            "codigo": "REQ-1",
            "titulo": "Cadeiras",
            "solicitante": "Maria",
            "departamento": "RH",
            "valor": 1200.0
        }))
        .unwrap();
        payload.validate().unwrap();

        let requisition = payload.into_requisition(today);

        assert_eq!(requisition.status, RequisitionStatus::Pendente);
        assert_eq!(requisition.prioridade, Priority::Media);
        assert_eq!(requisition.data, today);
        assert_eq!(requisition.descricao, "");
    }

    #[test]
    fn update_only_touches_provided_fields() {
        let today = NaiveDate::from_ymd_opt(2025, 10, 28).unwrap();
        let mut requisition = Requisition {
            id: 1,
            codigo: "REQ-1".into(),
            titulo: "Cadeiras".into(),
            descricao: "10 cadeiras".into(),
            solicitante: "Maria".into(),
            departamento: "RH".into(),
            categoria: "Móveis".into(),
            valor: 1200.0,
            data: today,
            status: RequisitionStatus::Pendente,
            prioridade: Priority::Alta,
        };

        requisition.apply(UpdateRequisitionPayload {
            valor: Some(1500.0),
            ..Default::default()
        });

        assert_eq!(requisition.valor, 1500.0);
        assert_eq!(requisition.titulo, "Cadeiras");
        assert_eq!(requisition.prioridade, Priority::Alta);
    }
}
