use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "company")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub user_id: i32,
    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub user: HasOne<super::user::Entity>,

    /// Display name. Jobs reference the company by id, so renaming never
    /// detaches existing postings.
    pub name: String,
    pub website: String,

    #[sea_orm(has_many)]
    pub jobs: HasMany<super::job::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
