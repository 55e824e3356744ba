// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{AuthResponse, Claims, User, UserRole},
};

pub const BCRYPT_COST: u32 = 10;

/// Gera o hash fora do runtime assíncrono.
pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password = password.to_owned();
    let hashed = tokio::task::spawn_blocking(move || hash(&password, BCRYPT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
    Ok(hashed)
}

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
    // Validade do token em milissegundos
    jwt_expiration_ms: i64,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String, jwt_expiration_ms: i64) -> Self {
        Self { user_repo, jwt_secret, jwt_expiration_ms }
    }

    pub async fn register_user(
        &self,
        username: &str,
        password: &str,
        email: &str,
        role: Option<UserRole>,
    ) -> Result<AuthResponse, AppError> {
        if self.user_repo.find_by_username(username).await?.is_some() {
            return Err(AppError::Duplicate("Nome de usuário já está em uso".to_string()));
        }

        let hashed_password = hash_password(password).await?;

        let user = self
            .user_repo
            .create_user(
                self.user_repo.pool(),
                username,
                &hashed_password,
                email,
                role.unwrap_or(UserRole::User),
            )
            .await?;

        tracing::info!("Usuário '{}' registrado", user.username);
        self.respond_with_token(user)
    }

    pub async fn login_user(&self, username: &str, password: &str) -> Result<AuthResponse, AppError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .filter(|u| u.active)
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))?
                .unwrap_or(false);

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.respond_with_token(user)
    }

    /// Decodifica o token e confere que o usuário ainda existe e está ativo.
    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        self.user_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .filter(|u| u.active)
            .ok_or(AppError::InvalidToken)
    }

    fn respond_with_token(&self, user: User) -> Result<AuthResponse, AppError> {
        let token = self.create_token(&user)?;
        Ok(AuthResponse {
            token,
            username: user.username,
            email: user.email,
            role: user.role,
        })
    }

    pub fn create_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::milliseconds(self.jwt_expiration_ms);

        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            role: user.role,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
