//! Setting entity - the site-wide settings row (single row in practice,
//! accessed through the explicit settings repository in `core::settings`).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Settings database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "settings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// School name shown across the site
    pub school_name: String,
    /// Contact email, if any
    pub email: Option<String>,
    /// Contact phone, if any
    pub phone: Option<String>,
    /// Postal address, if any
    pub address: Option<String>,
    /// Relative path to the stored logo, if any
    pub logo: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
