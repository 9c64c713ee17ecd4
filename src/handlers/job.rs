use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, LikeExpr, SimpleExpr};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{application, company, job};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::job::{
    CreateJobRequest, JobListQuery, JobResponse, UpdateJobRequest, validate_create_job,
    validate_update_job,
};
use crate::models::shared::escape_like;
use crate::state::AppState;

async fn find_job<C: ConnectionTrait>(db: &C, id: i32) -> Result<job::Model, AppError> {
    job::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".into()))
}

/// Case-insensitive substring filter on a job column.
fn contains_filter(column: job::Column, term: &str) -> Option<SimpleExpr> {
    let term = escape_like(term.trim());
    if term.is_empty() {
        return None;
    }
    Some(
        Expr::expr(Func::lower(Expr::col(column)))
            .like(LikeExpr::new(format!("%{}%", term.to_lowercase())).escape('\\')),
    )
}

/// List jobs, optionally filtered by location and required skills.
///
/// Public: anonymous callers may browse postings.
#[utoipa::path(
    get,
    path = "/api/v1/jobs",
    tag = "Jobs",
    operation_id = "listJobs",
    summary = "List and filter job postings",
    params(JobListQuery),
    responses(
        (status = 200, description = "Matching jobs", body = Vec<JobResponse>),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> Result<Json<Vec<JobResponse>>, AppError> {
    let mut select = job::Entity::find();

    if let Some(ref location) = query.location
        && let Some(filter) = contains_filter(job::Column::Location, location)
    {
        select = select.filter(filter);
    }
    if let Some(ref skills) = query.skills
        && let Some(filter) = contains_filter(job::Column::SkillsRequired, skills)
    {
        select = select.filter(filter);
    }

    let rows = select
        .find_also_related(company::Entity)
        .all(&state.db)
        .await?;

    let items = rows
        .into_iter()
        .map(|(job, comp)| JobResponse::from_model(job, comp.map(|c| c.name).unwrap_or_default()))
        .collect();

    Ok(Json(items))
}

/// Create a job owned by the caller's company.
///
/// The owning company is always the caller; any client-supplied company
/// identity is ignored.
#[utoipa::path(
    post,
    path = "/api/v1/jobs/create",
    tag = "Jobs",
    operation_id = "createJob",
    summary = "Create a job posting",
    request_body = CreateJobRequest,
    responses(
        (status = 201, description = "Job created", body = JobResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Caller is not a company (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(title = %payload.title))]
pub async fn create_job(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateJobRequest>,
) -> Result<impl IntoResponse, AppError> {
    let company = auth_user.company(&state.db).await?;
    validate_create_job(&payload)?;

    let new_job = job::ActiveModel {
        title: Set(payload.title.trim().to_string()),
        description: Set(payload.description),
        location: Set(payload.location.trim().to_string()),
        skills_required: Set(payload.skills_required.trim().to_string()),
        company_id: Set(company.id),
        posted_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let model = new_job.insert(&state.db).await?;

    Ok((
        StatusCode::CREATED,
        Json(JobResponse::from_model(model, company.name)),
    ))
}

/// List the caller's own job postings.
#[utoipa::path(
    get,
    path = "/api/v1/my-jobs",
    tag = "Jobs",
    operation_id = "myJobs",
    summary = "List the current company's job postings",
    responses(
        (status = 200, description = "Own jobs", body = Vec<JobResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Caller is not a company (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn my_jobs(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<JobResponse>>, AppError> {
    let company = auth_user.company(&state.db).await?;

    let rows = job::Entity::find()
        .filter(job::Column::CompanyId.eq(company.id))
        .all(&state.db)
        .await?;

    let items = rows
        .into_iter()
        .map(|job| JobResponse::from_model(job, company.name.clone()))
        .collect();

    Ok(Json(items))
}

/// Partially update one of the caller's jobs.
#[utoipa::path(
    put,
    path = "/api/v1/my-jobs/{id}",
    tag = "Jobs",
    operation_id = "updateJob",
    summary = "Update an owned job posting",
    params(("id" = i32, Path, description = "Job ID")),
    request_body = UpdateJobRequest,
    responses(
        (status = 200, description = "Job updated", body = JobResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the owning company (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Job not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn update_job(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateJobRequest>,
) -> Result<Json<JobResponse>, AppError> {
    let job = find_job(&state.db, id).await?;
    let company = auth_user.company(&state.db).await?;
    if job.company_id != company.id {
        return Err(AppError::PermissionDenied);
    }

    validate_update_job(&payload)?;

    if payload == UpdateJobRequest::default() {
        return Ok(Json(JobResponse::from_model(job, company.name)));
    }

    let txn = state.db.begin().await?;

    let mut active: job::ActiveModel = job.into();
    if let Some(ref title) = payload.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(ref location) = payload.location {
        active.location = Set(location.trim().to_string());
    }
    if let Some(ref skills) = payload.skills_required {
        active.skills_required = Set(skills.trim().to_string());
    }

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(JobResponse::from_model(model, company.name)))
}

/// Delete one of the caller's jobs, cascading its applications.
#[utoipa::path(
    delete,
    path = "/api/v1/my-jobs/{id}",
    tag = "Jobs",
    operation_id = "deleteJob",
    summary = "Delete an owned job posting",
    params(("id" = i32, Path, description = "Job ID")),
    responses(
        (status = 204, description = "Job deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the owning company (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Job not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_job(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let job = find_job(&state.db, id).await?;
    let company = auth_user.company(&state.db).await?;
    if job.company_id != company.id {
        return Err(AppError::PermissionDenied);
    }

    let txn = state.db.begin().await?;

    application::Entity::delete_many()
        .filter(application::Column::JobId.eq(job.id))
        .exec(&txn)
        .await?;
    job::Entity::delete_by_id(job.id).exec(&txn).await?;

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}
