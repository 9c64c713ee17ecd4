pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod seed;
pub mod state;
pub mod utils;

use std::time::Duration;

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_scalar::{Scalar, Servable as ScalarServable};

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Jobboard API",
        version = "1.0.0",
        description = "API for the job-board backend: freelancer/company accounts, job postings, and applications"
    ),
    paths(
        handlers::auth::signup_freelancer,
        handlers::auth::signup_company,
        handlers::auth::login,
        handlers::profile::me,
        handlers::profile::update_freelancer_profile,
        handlers::profile::update_company_profile,
        handlers::job::list_jobs,
        handlers::job::create_job,
        handlers::job::my_jobs,
        handlers::job::update_job,
        handlers::job::delete_job,
        handlers::application::apply,
        handlers::application::my_job_applications,
    ),
    tags(
        (name = "Auth", description = "Signup and login"),
        (name = "Profile", description = "Role + profile snapshot and updates"),
        (name = "Jobs", description = "Job posting CRUD and search"),
        (name = "Applications", description = "Job applications"),
    ),
    modifiers(&SecurityAddon),
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let origins: Vec<HeaderValue> = state
        .config
        .server
        .cors
        .allow_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(state.config.server.cors.max_age))
}

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let cors = cors_layer(&state);

    axum::Router::new()
        .nest("/api", routes::api_routes())
        .layer(cors)
        .with_state(state)
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
}
