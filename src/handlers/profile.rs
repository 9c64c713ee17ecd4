use axum::{Json, extract::State};
use sea_orm::*;
use tracing::instrument;

use crate::entity::user::Role;
use crate::entity::{company, freelancer, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::profile::{
    MeResponse, UpdateCompanyProfileRequest, UpdateFreelancerProfileRequest,
    validate_update_company_profile, validate_update_freelancer_profile,
};
use crate::state::AppState;

async fn find_user<C: ConnectionTrait>(db: &C, id: i32) -> Result<user::Model, AppError> {
    user::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))
}

/// Apply username/email changes to the base user row, if any were supplied.
///
/// The unique constraint on `username` is the real duplicate guard; a
/// violation here maps to `UsernameTaken`.
async fn update_user_fields(
    txn: &DatabaseTransaction,
    user: user::Model,
    username: Option<&str>,
    email: Option<&str>,
) -> Result<user::Model, AppError> {
    if username.is_none() && email.is_none() {
        return Ok(user);
    }

    let mut active: user::ActiveModel = user.into();
    if let Some(username) = username {
        active.username = Set(username.trim().to_string());
    }
    if let Some(email) = email {
        active.email = Set(email.trim().to_string());
    }

    active.update(txn).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::UsernameTaken,
        _ => AppError::from(e),
    })
}

/// Return the current caller's role + profile snapshot.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    tag = "Profile",
    operation_id = "me",
    summary = "Get the current user's profile",
    responses(
        (status = 200, description = "Profile snapshot", body = MeResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "User no longer exists (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn me(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<MeResponse>, AppError> {
    let user = find_user(&state.db, auth_user.user_id).await?;

    let mut res = MeResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        role: auth_user.role,
        skills: None,
        bio: None,
        company_name: None,
        website: None,
    };

    match auth_user.role {
        Role::Freelancer => {
            if let Some(profile) = freelancer::Entity::find()
                .filter(freelancer::Column::UserId.eq(user.id))
                .one(&state.db)
                .await?
            {
                res.skills = Some(profile.skills);
                res.bio = Some(profile.bio);
            }
        }
        Role::Company => {
            if let Some(profile) = company::Entity::find()
                .filter(company::Column::UserId.eq(user.id))
                .one(&state.db)
                .await?
            {
                res.company_name = Some(profile.name);
                res.website = Some(profile.website);
            }
        }
    }

    Ok(Json(res))
}

/// Partially update the caller's freelancer profile.
#[utoipa::path(
    put,
    path = "/api/v1/me/update",
    tag = "Profile",
    operation_id = "updateFreelancerProfile",
    summary = "Update the current freelancer's profile",
    request_body = UpdateFreelancerProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = MeResponse),
        (status = 400, description = "Validation error or username taken (VALIDATION_ERROR, USERNAME_TAKEN)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Caller is not a freelancer (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id))]
pub async fn update_freelancer_profile(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateFreelancerProfileRequest>,
) -> Result<Json<MeResponse>, AppError> {
    let profile = auth_user.freelancer(&state.db).await?;
    validate_update_freelancer_profile(&payload)?;

    let txn = state.db.begin().await?;

    let user = find_user(&txn, auth_user.user_id).await?;
    let user = update_user_fields(
        &txn,
        user,
        payload.username.as_deref(),
        payload.email.as_deref(),
    )
    .await?;

    let profile = if payload.skills.is_some() || payload.bio.is_some() {
        let mut active: freelancer::ActiveModel = profile.into();
        if let Some(skills) = payload.skills {
            active.skills = Set(skills.trim().to_string());
        }
        if let Some(bio) = payload.bio {
            active.bio = Set(bio);
        }
        active.update(&txn).await?
    } else {
        profile
    };

    txn.commit().await?;

    Ok(Json(MeResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        role: Role::Freelancer,
        skills: Some(profile.skills),
        bio: Some(profile.bio),
        company_name: None,
        website: None,
    }))
}

/// Partially update the caller's company profile.
#[utoipa::path(
    put,
    path = "/api/v1/me/company/update",
    tag = "Profile",
    operation_id = "updateCompanyProfile",
    summary = "Update the current company's profile",
    request_body = UpdateCompanyProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = MeResponse),
        (status = 400, description = "Validation error or username taken (VALIDATION_ERROR, USERNAME_TAKEN)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Caller is not a company (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id))]
pub async fn update_company_profile(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateCompanyProfileRequest>,
) -> Result<Json<MeResponse>, AppError> {
    let profile = auth_user.company(&state.db).await?;
    validate_update_company_profile(&payload)?;

    let txn = state.db.begin().await?;

    let user = find_user(&txn, auth_user.user_id).await?;
    let user = update_user_fields(
        &txn,
        user,
        payload.username.as_deref(),
        payload.email.as_deref(),
    )
    .await?;

    let profile = if payload.company_name.is_some() || payload.website.is_some() {
        let mut active: company::ActiveModel = profile.into();
        if let Some(name) = payload.company_name {
            active.name = Set(name.trim().to_string());
        }
        if let Some(website) = payload.website {
            active.website = Set(website);
        }
        active.update(&txn).await?
    } else {
        profile
    };

    txn.commit().await?;

    Ok(Json(MeResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        role: Role::Company,
        skills: None,
        bio: None,
        company_name: Some(profile.name),
        website: Some(profile.website),
    }))
}
