use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "job")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    pub description: String,
    pub location: String,
    /// Free-text required skills, matched by substring in job search.
    pub skills_required: String,

    pub company_id: i32,
    #[sea_orm(belongs_to, from = "company_id", to = "id")]
    pub company: HasOne<super::company::Entity>,

    #[sea_orm(has_many)]
    pub applications: HasMany<super::application::Entity>,

    pub posted_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
