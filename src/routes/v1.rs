use axum::{
    Router,
    routing::{get, post, put},
};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/signup/freelancer", post(handlers::auth::signup_freelancer))
        .route("/signup/company", post(handlers::auth::signup_company))
        .route("/auth/login", post(handlers::auth::login))
        .route("/me", get(handlers::profile::me))
        .route("/me/update", put(handlers::profile::update_freelancer_profile))
        .route(
            "/me/company/update",
            put(handlers::profile::update_company_profile),
        )
        .route("/jobs", get(handlers::job::list_jobs))
        .route("/jobs/create", post(handlers::job::create_job))
        .route("/my-jobs", get(handlers::job::my_jobs))
        .route(
            "/my-jobs/{id}",
            put(handlers::job::update_job).delete(handlers::job::delete_job),
        )
        .route("/apply", post(handlers::application::apply))
        .route(
            "/my-job-applications",
            get(handlers::application::my_job_applications),
        )
}
