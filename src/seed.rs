use sea_orm::sea_query::{Index, PostgresQueryBuilder, SqliteQueryBuilder};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, DbErr};
use tracing::info;

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync doesn't support composite unique indexes, so the
/// (job_id, freelancer_id) uniqueness guard on `application` is created
/// manually on startup. This index is the authoritative duplicate-application
/// check; the handler-level existence lookup is only advisory.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    let index = Index::create()
        .if_not_exists()
        .unique()
        .name("uq_application_job_freelancer")
        .table(crate::entity::application::Entity)
        .col(crate::entity::application::Column::JobId)
        .col(crate::entity::application::Column::FreelancerId)
        .to_owned();

    let stmt = match db.get_database_backend() {
        DbBackend::Sqlite => index.to_string(SqliteQueryBuilder),
        _ => index.to_string(PostgresQueryBuilder),
    };

    db.execute_unprepared(&stmt).await?;
    info!("Ensured unique index uq_application_job_freelancer exists");

    Ok(())
}
