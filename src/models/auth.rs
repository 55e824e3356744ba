// src/models/auth.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Admin,
    User,
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,

    pub email: String,
    pub role: UserRole,
    pub active: bool,
}

// Dados para registro de um novo usuário
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUserPayload {
    #[validate(required, length(min = 1, message = "O username não pode ser vazio."))]
    #[schema(example = "comprador")]
    pub username: Option<String>,

    #[validate(required, length(min = 1, message = "A senha não pode ser vazia."))]
    #[schema(example = "segredo123")]
    pub password: Option<String>,

    #[validate(required, email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "comprador@supplyflow.com")]
    pub email: Option<String>,

    // Ausente = USER
    pub role: Option<UserRole>,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(required)]
    #[schema(example = "admin")]
    pub username: Option<String>,

    #[validate(required)]
    #[schema(example = "admin123")]
    pub password: Option<String>,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub username: String,
    pub email: String,
    pub role: UserRole,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,         // Subject (ID do usuário)
    pub username: String,
    pub role: UserRole,
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}
