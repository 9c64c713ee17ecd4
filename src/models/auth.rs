use serde::{Deserialize, Serialize};

use crate::entity::user::Role;
use crate::error::AppError;
use crate::models::shared::{validate_email, validate_password, validate_username};

/// Request body for freelancer signup.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct FreelancerSignupRequest {
    /// Unique username (1-32 chars, alphanumeric and underscores).
    #[schema(example = "alice_wonder")]
    pub username: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// Password (8-128 characters).
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
    /// Free-text skills.
    #[schema(example = "Go, SQL")]
    pub skills: String,
    #[serde(default)]
    pub bio: String,
}

pub fn validate_freelancer_signup(payload: &FreelancerSignupRequest) -> Result<(), AppError> {
    validate_username(&payload.username)?;
    validate_email(&payload.email)?;
    validate_password(&payload.password)?;
    if payload.skills.trim().is_empty() || payload.skills.chars().count() > 300 {
        return Err(AppError::Validation(
            "Skills must be 1-300 characters".into(),
        ));
    }
    Ok(())
}

/// Request body for company signup.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CompanySignupRequest {
    #[schema(example = "acme_hr")]
    pub username: String,
    #[schema(example = "jobs@acme.example")]
    pub email: String,
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
    /// Company display name.
    #[schema(example = "Acme GmbH")]
    pub company_name: String,
    #[serde(default)]
    pub website: String,
}

pub fn validate_company_signup(payload: &CompanySignupRequest) -> Result<(), AppError> {
    validate_username(&payload.username)?;
    validate_email(&payload.email)?;
    validate_password(&payload.password)?;
    let name = payload.company_name.trim();
    if name.is_empty() || name.chars().count() > 100 {
        return Err(AppError::Validation(
            "Company name must be 1-100 characters".into(),
        ));
    }
    Ok(())
}

/// Successful signup response. Signup does not issue a token; log in
/// separately.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SignupResponse {
    /// ID of the newly created user.
    #[schema(example = 42)]
    pub id: i32,
    #[schema(example = "alice_wonder")]
    pub username: String,
    pub role: Role,
}

/// Request body for login.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "alice_wonder")]
    pub username: String,
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
}

pub fn validate_login_request(payload: &LoginRequest) -> Result<(), AppError> {
    if payload.username.trim().is_empty() {
        return Err(AppError::Validation("Username must not be empty".into()));
    }
    if payload.password.is_empty() {
        return Err(AppError::Validation("Password must not be empty".into()));
    }
    Ok(())
}

/// Successful login response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    /// JWT bearer token valid for 7 days.
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    #[schema(example = "alice_wonder")]
    pub username: String,
    pub role: Role,
}
