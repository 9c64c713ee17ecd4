use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use sea_orm::*;

use crate::entity::user::Role;
use crate::entity::{company, freelancer};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt;

/// Authenticated caller extracted from the `Authorization: Bearer <token>` header.
///
/// Add this as a handler parameter to require authentication. The role is
/// resolved once here and passed into the handler; ownership checks load the
/// matching profile row via [`AuthUser::freelancer`] / [`AuthUser::company`].
pub struct AuthUser {
    pub user_id: i32,
    pub username: String,
    pub role: Role,
}

impl AuthUser {
    /// Load the caller's freelancer profile, or `PermissionDenied` if the
    /// caller is not a freelancer.
    pub async fn freelancer<C: ConnectionTrait>(
        &self,
        db: &C,
    ) -> Result<freelancer::Model, AppError> {
        if self.role != Role::Freelancer {
            return Err(AppError::PermissionDenied);
        }
        freelancer::Entity::find()
            .filter(freelancer::Column::UserId.eq(self.user_id))
            .one(db)
            .await?
            .ok_or(AppError::PermissionDenied)
    }

    /// Load the caller's company profile, or `PermissionDenied` if the caller
    /// is not a company.
    pub async fn company<C: ConnectionTrait>(&self, db: &C) -> Result<company::Model, AppError> {
        if self.role != Role::Company {
            return Err(AppError::PermissionDenied);
        }
        company::Entity::find()
            .filter(company::Column::UserId.eq(self.user_id))
            .one(db)
            .await?
            .ok_or(AppError::PermissionDenied)
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::TokenMissing)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AppError::TokenInvalid)?;

        let claims = jwt::verify(token, &state.config.auth.jwt_secret)
            .map_err(|_| AppError::TokenInvalid)?;

        Ok(AuthUser {
            user_id: claims.uid,
            username: claims.sub,
            role: claims.role,
        })
    }
}
