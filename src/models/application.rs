use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Request body for applying to a job.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct ApplyRequest {
    /// ID of the job to apply to.
    #[schema(example = 7)]
    pub job: i32,
    #[serde(default)]
    pub cover_letter: String,
}

pub fn validate_apply(req: &ApplyRequest) -> Result<(), AppError> {
    if req.cover_letter.chars().count() > 10_000 {
        return Err(AppError::Validation(
            "Cover letter must be at most 10000 characters".into(),
        ));
    }
    Ok(())
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ApplicationResponse {
    pub id: i32,
    /// ID of the job applied to.
    pub job: i32,
    pub job_title: String,
    pub cover_letter: String,
    pub applied_at: DateTime<Utc>,
    /// Handle of the applying freelancer.
    #[schema(example = "alice_wonder")]
    pub freelancer_username: String,
}

impl ApplicationResponse {
    pub fn from_model(
        m: crate::entity::application::Model,
        job_title: String,
        freelancer_username: String,
    ) -> Self {
        Self {
            id: m.id,
            job: m.job_id,
            job_title,
            cover_letter: m.cover_letter,
            applied_at: m.applied_at,
            freelancer_username,
        }
    }
}
