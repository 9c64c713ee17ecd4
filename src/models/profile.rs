use serde::{Deserialize, Serialize};

use crate::entity::user::Role;
use crate::error::AppError;
use crate::models::shared::{validate_email, validate_username};

/// Role + profile snapshot for the authenticated caller.
///
/// Role-specific fields are present only for the matching role.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MeResponse {
    #[schema(example = 42)]
    pub id: i32,
    #[schema(example = "alice_wonder")]
    pub username: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// Partial update of a freelancer's identity and profile fields.
#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateFreelancerProfileRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub skills: Option<String>,
    pub bio: Option<String>,
}

pub fn validate_update_freelancer_profile(
    req: &UpdateFreelancerProfileRequest,
) -> Result<(), AppError> {
    if let Some(ref username) = req.username {
        validate_username(username)?;
    }
    if let Some(ref email) = req.email {
        validate_email(email)?;
    }
    if let Some(ref skills) = req.skills
        && (skills.trim().is_empty() || skills.chars().count() > 300)
    {
        return Err(AppError::Validation(
            "Skills must be 1-300 characters".into(),
        ));
    }
    Ok(())
}

/// Partial update of a company's identity and profile fields.
#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateCompanyProfileRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub company_name: Option<String>,
    pub website: Option<String>,
}

pub fn validate_update_company_profile(req: &UpdateCompanyProfileRequest) -> Result<(), AppError> {
    if let Some(ref username) = req.username {
        validate_username(username)?;
    }
    if let Some(ref email) = req.email {
        validate_email(email)?;
    }
    if let Some(ref name) = req.company_name
        && (name.trim().is_empty() || name.chars().count() > 100)
    {
        return Err(AppError::Validation(
            "Company name must be 1-100 characters".into(),
        ));
    }
    Ok(())
}
