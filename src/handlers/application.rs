use std::collections::HashMap;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{application, freelancer, job, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::application::{ApplicationResponse, ApplyRequest, validate_apply};
use crate::state::AppState;

/// Submit an application to a job.
///
/// The existence pre-check gives a friendly error in the common case; the
/// unique (job_id, freelancer_id) index is what actually rejects a race
/// between two concurrent submissions.
#[utoipa::path(
    post,
    path = "/api/v1/apply",
    tag = "Applications",
    operation_id = "applyToJob",
    summary = "Apply to a job",
    request_body = ApplyRequest,
    responses(
        (status = 201, description = "Application created", body = ApplicationResponse),
        (status = 400, description = "Validation error or duplicate application (VALIDATION_ERROR, ALREADY_APPLIED)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Caller is not a freelancer (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Job not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(job_id = payload.job))]
pub async fn apply(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<ApplyRequest>,
) -> Result<impl IntoResponse, AppError> {
    let freelancer = auth_user.freelancer(&state.db).await?;
    validate_apply(&payload)?;

    let job = job::Entity::find_by_id(payload.job)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".into()))?;

    let existing = application::Entity::find()
        .filter(application::Column::JobId.eq(job.id))
        .filter(application::Column::FreelancerId.eq(freelancer.id))
        .count(&state.db)
        .await?;
    if existing > 0 {
        return Err(AppError::AlreadyApplied);
    }

    let new_application = application::ActiveModel {
        job_id: Set(job.id),
        freelancer_id: Set(freelancer.id),
        cover_letter: Set(payload.cover_letter),
        applied_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let model = new_application
        .insert(&state.db)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                tracing::debug!("Duplicate application race: unique constraint caught on insert");
                AppError::AlreadyApplied
            }
            _ => AppError::from(e),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(ApplicationResponse::from_model(
            model,
            job.title,
            auth_user.username,
        )),
    ))
}

/// List all applications to the caller's jobs, annotated with the applying
/// freelancer's username.
#[utoipa::path(
    get,
    path = "/api/v1/my-job-applications",
    tag = "Applications",
    operation_id = "myJobApplications",
    summary = "List applications to the current company's jobs",
    responses(
        (status = 200, description = "Applications to own jobs", body = Vec<ApplicationResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Caller is not a company (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn my_job_applications(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<ApplicationResponse>>, AppError> {
    let company = auth_user.company(&state.db).await?;

    let job_titles: HashMap<i32, String> = job::Entity::find()
        .filter(job::Column::CompanyId.eq(company.id))
        .select_only()
        .column(job::Column::Id)
        .column(job::Column::Title)
        .into_tuple::<(i32, String)>()
        .all(&state.db)
        .await?
        .into_iter()
        .collect();

    if job_titles.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let job_ids: Vec<i32> = job_titles.keys().copied().collect();
    let rows = application::Entity::find()
        .filter(application::Column::JobId.is_in(job_ids))
        .find_also_related(freelancer::Entity)
        .all(&state.db)
        .await?;

    let user_ids: Vec<i32> = rows
        .iter()
        .filter_map(|(_, f)| f.as_ref().map(|f| f.user_id))
        .collect();
    let usernames: HashMap<i32, String> = user::Entity::find()
        .filter(user::Column::Id.is_in(user_ids))
        .all(&state.db)
        .await?
        .into_iter()
        .map(|u| (u.id, u.username))
        .collect();

    let items = rows
        .into_iter()
        .map(|(app, applicant)| {
            let username = applicant
                .and_then(|f| usernames.get(&f.user_id).cloned())
                .unwrap_or_default();
            let title = job_titles.get(&app.job_id).cloned().unwrap_or_default();
            ApplicationResponse::from_model(app, title, username)
        })
        .collect();

    Ok(Json(items))
}
