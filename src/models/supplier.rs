// src/models/supplier.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "PascalCase")]
pub enum SupplierStatus {
    Ativo,
    Inativo,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: i64,
    #[schema(example = "TechSupply Ltda")]
    pub nome: String,
    #[schema(example = "12.345.678/0001-90")]
    pub cnpj: String,
    pub email: String,
    pub telefone: String,
    pub endereco: String,
    #[schema(example = "Tecnologia")]
    pub categoria: String,
    #[schema(example = 4.8)]
    pub avaliacao: f64,
    pub status: SupplierStatus,
    pub total_pedidos: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSupplierPayload {
    #[validate(required, length(min = 1, message = "O nome não pode ser vazio."))]
    pub nome: Option<String>,

    #[validate(required, length(min = 1, message = "O CNPJ não pode ser vazio."))]
    pub cnpj: Option<String>,

    pub email: Option<String>,
    pub telefone: Option<String>,
    pub endereco: Option<String>,
    pub categoria: Option<String>,

    #[validate(range(min = 0.0, max = 5.0, message = "A avaliação deve estar entre 0 e 5."))]
    pub avaliacao: Option<f64>,

    pub status: Option<SupplierStatus>,

    #[validate(range(min = 0, message = "O total de pedidos não pode ser negativo."))]
    pub total_pedidos: Option<i64>,
}

impl CreateSupplierPayload {
    /// Monta o registro a ser inserido. Chamar somente após `validate()`.
    pub fn into_supplier(self) -> Supplier {
        Supplier {
            id: 0,
            nome: self.nome.unwrap_or_default(),
            cnpj: self.cnpj.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            telefone: self.telefone.unwrap_or_default(),
            endereco: self.endereco.unwrap_or_default(),
            categoria: self.categoria.unwrap_or_default(),
            avaliacao: self.avaliacao.unwrap_or(0.0),
            status: self.status.unwrap_or(SupplierStatus::Ativo),
            total_pedidos: self.total_pedidos.unwrap_or(0),
        }
    }
}

// Atualização parcial: só o que vier preenchido é alterado
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSupplierPayload {
    #[validate(length(min = 1, message = "O nome não pode ser vazio."))]
    pub nome: Option<String>,
    #[validate(length(min = 1, message = "O CNPJ não pode ser vazio."))]
    pub cnpj: Option<String>,
    pub email: Option<String>,
    pub telefone: Option<String>,
    pub endereco: Option<String>,
    pub categoria: Option<String>,
    #[validate(range(min = 0.0, max = 5.0, message = "A avaliação deve estar entre 0 e 5."))]
    pub avaliacao: Option<f64>,
    pub status: Option<SupplierStatus>,
    #[validate(range(min = 0, message = "O total de pedidos não pode ser negativo."))]
    pub total_pedidos: Option<i64>,
}

impl Supplier {
    pub fn apply(&mut self, changes: UpdateSupplierPayload) {
        if let Some(nome) = changes.nome { self.nome = nome; }
        if let Some(cnpj) = changes.cnpj { self.cnpj = cnpj; }
        if let Some(email) = changes.email { self.email = email; }
        if let Some(telefone) = changes.telefone { self.telefone = telefone; }
        if let Some(endereco) = changes.endereco { self.endereco = endereco; }
        if let Some(categoria) = changes.categoria { self.categoria = categoria; }
        if let Some(avaliacao) = changes.avaliacao { self.avaliacao = avaliacao; }
        if let Some(status) = changes.status { self.status = status; }
        if let Some(total) = changes.total_pedidos { self.total_pedidos = total; }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SupplierSearchQuery {
    pub nome: Option<String>,
}
