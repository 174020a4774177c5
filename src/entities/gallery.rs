//! Gallery entity - a titled photo album owning many image rows.
//!
//! Galleries are the one place the core uses a multi-row database
//! transaction: the parent row and its image rows are written atomically.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Gallery database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "galleries")]
pub struct Model {
    /// Unique identifier for the gallery
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Album title
    pub title: String,
    /// URL-safe identifier derived from the title
    #[sea_orm(unique)]
    pub slug: String,
    /// Optional album description
    pub description: Option<String>,
    /// Creation timestamp
    pub created_at: DateTimeUtc,
    /// Last update timestamp
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Gallery and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One gallery owns many images; deleting the gallery deletes them
    #[sea_orm(has_many = "super::gallery_image::Entity")]
    Images,
}

impl Related<super::gallery_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
