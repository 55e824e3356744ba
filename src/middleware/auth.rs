// src/middleware/auth.rs
//
// Extratores de autenticação. Rotas de leitura são públicas; os handlers
// que alteram dados pedem `AuthenticatedUser` ou `RequireAdmin`.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{User, UserRole},
};

// Extrator para obter o usuário autenticado diretamente nos handlers
pub struct AuthenticatedUser(pub User);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::InvalidToken)?;

        let app_state = AppState::from_ref(state);
        let user = app_state.auth_service.validate_token(bearer.token()).await?;

        Ok(AuthenticatedUser(user))
    }
}

/// Como `AuthenticatedUser`, mas exige o papel ADMIN.
pub struct RequireAdmin(pub User);

impl<S> FromRequestParts<S> for RequireAdmin
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser(user) = AuthenticatedUser::from_request_parts(parts, state).await?;

        if user.role != UserRole::Admin {
            tracing::warn!("Usuário '{}' tentou uma operação de administrador", user.username);
            return Err(AppError::AdminRequired);
        }

        Ok(RequireAdmin(user))
    }
}
