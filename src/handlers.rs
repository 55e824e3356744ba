// src/handlers.rs

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod auth;
pub mod budgets;
pub mod dashboard;
pub mod health;
pub mod negotiations;
pub mod orders;
pub mod reports;
pub mod requisitions;
pub mod suppliers;

/// Corpo das respostas que só carregam uma mensagem (exclusões, health).
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Pedido excluído com sucesso")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

// Data local do servidor, usada como padrão nos cadastros
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}
