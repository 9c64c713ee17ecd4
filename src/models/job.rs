use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use crate::error::AppError;
use crate::models::shared::validate_title;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateJobRequest {
    #[schema(example = "Backend Engineer")]
    pub title: String,
    pub description: String,
    #[schema(example = "Berlin")]
    pub location: String,
    /// Free-text required skills.
    #[schema(example = "Go,SQL")]
    pub skills_required: String,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateJobRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub skills_required: Option<String>,
}

/// Optional case-insensitive substring filters for job search.
#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct JobListQuery {
    pub location: Option<String>,
    pub skills: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct JobResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    /// Display name of the owning company, resolved from the owning record.
    pub company_name: String,
    pub location: String,
    pub skills_required: String,
    pub posted_at: DateTime<Utc>,
}

impl JobResponse {
    pub fn from_model(m: crate::entity::job::Model, company_name: String) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            company_name,
            location: m.location,
            skills_required: m.skills_required,
            posted_at: m.posted_at,
        }
    }
}

pub fn validate_create_job(req: &CreateJobRequest) -> Result<(), AppError> {
    validate_title(&req.title)?;
    if req.description.trim().is_empty() {
        return Err(AppError::Validation("Description must not be empty".into()));
    }
    validate_location(&req.location)?;
    validate_skills_required(&req.skills_required)?;
    Ok(())
}

pub fn validate_update_job(req: &UpdateJobRequest) -> Result<(), AppError> {
    if let Some(ref title) = req.title {
        validate_title(title)?;
    }
    if let Some(ref description) = req.description
        && description.trim().is_empty()
    {
        return Err(AppError::Validation("Description must not be empty".into()));
    }
    if let Some(ref location) = req.location {
        validate_location(location)?;
    }
    if let Some(ref skills) = req.skills_required {
        validate_skills_required(skills)?;
    }
    Ok(())
}

fn validate_location(location: &str) -> Result<(), AppError> {
    let location = location.trim();
    if location.is_empty() || location.chars().count() > 100 {
        return Err(AppError::Validation(
            "Location must be 1-100 characters".into(),
        ));
    }
    Ok(())
}

fn validate_skills_required(skills: &str) -> Result<(), AppError> {
    let skills = skills.trim();
    if skills.is_empty() || skills.chars().count() > 300 {
        return Err(AppError::Validation(
            "Required skills must be 1-300 characters".into(),
        ));
    }
    Ok(())
}
