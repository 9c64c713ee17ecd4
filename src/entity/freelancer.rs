use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "freelancer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub user_id: i32,
    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub user: HasOne<super::user::Entity>,

    /// Free-text skills, e.g. "Go, SQL, Kubernetes".
    pub skills: String,
    pub bio: String,

    #[sea_orm(has_many)]
    pub applications: HasMany<super::application::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
