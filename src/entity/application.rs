use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A freelancer's application to a job. At most one row may exist per
/// (job_id, freelancer_id) pair; the unique index created by
/// `seed::ensure_indexes` is the authoritative guard.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "application")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub job_id: i32,
    #[sea_orm(belongs_to, from = "job_id", to = "id")]
    pub job: HasOne<super::job::Entity>,

    pub freelancer_id: i32,
    #[sea_orm(belongs_to, from = "freelancer_id", to = "id")]
    pub freelancer: HasOne<super::freelancer::Entity>,

    pub cover_letter: String,

    pub applied_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
