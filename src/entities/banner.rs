//! Banner entity - homepage hero banners.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Banner database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "banners")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    /// Relative path to the stored banner image, if any
    pub image: Option<String>,
    /// Optional click-through URL
    pub link: Option<String>,
    /// Whether the banner is currently shown
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
