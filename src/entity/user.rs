use std::fmt;
use std::str::FromStr;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub username: String,
    pub email: String,
    pub password: String,

    /// Stored role tag. Always one of the [`Role`] string forms; the profile
    /// row matching this tag is created in the same signup transaction.
    pub role: String,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

/// Account role, fixed at signup. An account is a freelancer XOR a company;
/// the tag plus the atomically created profile row make that structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Freelancer,
    Company,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Freelancer => "freelancer",
            Role::Company => "company",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "freelancer" => Ok(Role::Freelancer),
            "company" => Ok(Role::Company),
            _ => Err(()),
        }
    }
}
