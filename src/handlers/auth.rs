use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::*;
use tracing::instrument;

use crate::entity::user::Role;
use crate::entity::{company, freelancer, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::auth::{
    CompanySignupRequest, FreelancerSignupRequest, LoginRequest, LoginResponse, SignupResponse,
    validate_company_signup, validate_freelancer_signup, validate_login_request,
};
use crate::state::AppState;
use crate::utils::{hash, jwt};

/// Create the base user row inside the signup transaction.
///
/// The unique constraint on `username` is the authoritative duplicate-handle
/// guard; a violation on insert maps to `UsernameTaken` even when two signups
/// race past any earlier check.
async fn insert_user(
    txn: &DatabaseTransaction,
    username: &str,
    email: &str,
    password: &str,
    role: Role,
) -> Result<user::Model, AppError> {
    let hash = hash::hash_password(password)
        .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;

    let new_user = user::ActiveModel {
        username: Set(username.trim().to_string()),
        email: Set(email.trim().to_string()),
        password: Set(hash),
        role: Set(role.as_str().to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    new_user.insert(txn).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            tracing::debug!("Signup race condition: unique constraint caught on insert");
            AppError::UsernameTaken
        }
        _ => AppError::from(e),
    })
}

/// Handle freelancer signup: user + freelancer profile in one transaction.
#[utoipa::path(
    post,
    path = "/api/v1/signup/freelancer",
    tag = "Auth",
    operation_id = "signupFreelancer",
    summary = "Create a freelancer account",
    request_body = FreelancerSignupRequest,
    responses(
        (status = 201, description = "Account created", body = SignupResponse),
        (status = 400, description = "Validation error or username taken (VALIDATION_ERROR, USERNAME_TAKEN)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn signup_freelancer(
    State(state): State<AppState>,
    AppJson(payload): AppJson<FreelancerSignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_freelancer_signup(&payload)?;

    let txn = state.db.begin().await?;

    let user = insert_user(
        &txn,
        &payload.username,
        &payload.email,
        &payload.password,
        Role::Freelancer,
    )
    .await?;

    let profile = freelancer::ActiveModel {
        user_id: Set(user.id),
        skills: Set(payload.skills.trim().to_string()),
        bio: Set(payload.bio),
        ..Default::default()
    };
    profile.insert(&txn).await?;

    txn.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            id: user.id,
            username: user.username,
            role: Role::Freelancer,
        }),
    ))
}

/// Handle company signup: user + company profile in one transaction.
#[utoipa::path(
    post,
    path = "/api/v1/signup/company",
    tag = "Auth",
    operation_id = "signupCompany",
    summary = "Create a company account",
    request_body = CompanySignupRequest,
    responses(
        (status = 201, description = "Account created", body = SignupResponse),
        (status = 400, description = "Validation error or username taken (VALIDATION_ERROR, USERNAME_TAKEN)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn signup_company(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CompanySignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_company_signup(&payload)?;

    let txn = state.db.begin().await?;

    let user = insert_user(
        &txn,
        &payload.username,
        &payload.email,
        &payload.password,
        Role::Company,
    )
    .await?;

    let profile = company::ActiveModel {
        user_id: Set(user.id),
        name: Set(payload.company_name.trim().to_string()),
        website: Set(payload.website),
        ..Default::default()
    };
    profile.insert(&txn).await?;

    txn.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            id: user.id,
            username: user.username,
            role: Role::Company,
        }),
    ))
}

/// Handle login.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Auth",
    operation_id = "login",
    summary = "Log in and receive a bearer token",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Wrong credentials (INVALID_CREDENTIALS)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    validate_login_request(&payload)?;

    let username = payload.username.trim();

    let user = user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(&state.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let is_valid = hash::verify_password(&payload.password, &user.password)
        .map_err(|e| AppError::Internal(format!("Password verify error: {}", e)))?;

    if !is_valid {
        return Err(AppError::InvalidCredentials);
    }

    let role: Role = user
        .role
        .parse()
        .map_err(|_| AppError::Internal(format!("Unknown role '{}' for user {}", user.role, user.id)))?;

    let token = jwt::sign(user.id, &user.username, role, &state.config.auth.jwt_secret)
        .map_err(|e| AppError::Internal(format!("JWT sign error: {}", e)))?;

    Ok(Json(LoginResponse {
        token,
        username: user.username,
        role,
    }))
}
