use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Todo corpo de erro segue o formato `{ "message": "..." }`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] ValidationErrors),

    #[error("{0}")]
    BadRequest(String),

    // Código (ou CNPJ) já cadastrado
    #[error("{0}")]
    Duplicate(String),

    #[error("Corpo da requisição inválido: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("Parâmetro de rota inválido: {0}")]
    InvalidPath(#[from] PathRejection),

    #[error("Parâmetro de consulta inválido: {0}")]
    InvalidQuery(#[from] QueryRejection),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Acesso restrito a administradores")]
    AdminRequired,

    #[error("{0}")]
    NotFound(&'static str),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::BadRequest(_)
            | AppError::Duplicate(_)
            | AppError::InvalidBody(_)
            | AppError::InvalidPath(_)
            | AppError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InvalidToken | AppError::AdminRequired => {
                StatusCode::UNAUTHORIZED
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Mensagem exposta ao cliente. Erros internos nunca vazam detalhes.
    pub fn client_message(&self) -> String {
        match self {
            AppError::ValidationError(errors) => validation_message(errors),
            AppError::InvalidCredentials => "Credenciais inválidas".to_string(),
            AppError::InvalidToken => "Token de autenticação inválido ou ausente".to_string(),
            AppError::AdminRequired => {
                "Acesso negado: esta operação requer um administrador".to_string()
            }
            e if e.status().is_server_error() => "Erro interno do servidor".to_string(),
            e => e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // O `tracing` registra a mensagem detalhada que `thiserror` nos deu.
        if status.is_server_error() {
            tracing::error!("Erro Interno do Servidor: {}", self);
        }

        let body = Json(json!({ "message": self.client_message() }));
        (status, body).into_response()
    }
}

// Campos ausentes aparecem juntos ("Campos obrigatórios: codigo, valor");
// as demais falhas usam a mensagem declarada no payload.
fn validation_message(errors: &ValidationErrors) -> String {
    let mut missing: Vec<String> = Vec::new();
    let mut invalid: Vec<String> = Vec::new();

    for (field, field_errors) in errors.field_errors() {
        let field = camel_case(&field);
        for error in field_errors {
            if error.code == "required" {
                missing.push(field.clone());
            } else {
                invalid.push(
                    error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Campo inválido: {field}")),
                );
            }
        }
    }

    missing.sort();
    missing.dedup();
    invalid.sort();

    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("Campos obrigatórios: {}", missing.join(", ")));
    }
    parts.extend(invalid);

    if parts.is_empty() {
        "Um ou mais campos são inválidos.".to_string()
    } else {
        parts.join("; ")
    }
}

// valor_inicial -> valorInicial, para bater com os nomes do JSON
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for ch in field.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}
