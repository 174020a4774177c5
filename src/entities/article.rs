//! Article entity - news/blog posts shown on the public site.
//!
//! Articles belong to an author (user) and a category, carry an optional
//! cover image stored in the blob store, and are addressed by a unique slug
//! derived from the title.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Article database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "articles")]
pub struct Model {
    /// Unique identifier for the article
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Headline
    pub title: String,
    /// URL-safe identifier derived from the title
    #[sea_orm(unique)]
    pub slug: String,
    /// Short teaser shown in listings, if any
    pub excerpt: Option<String>,
    /// Full article body
    pub body: String,
    /// Relative path to the stored cover image, if any
    pub image: Option<String>,
    /// Authoring user
    pub user_id: i64,
    /// Category the article is filed under
    pub category_id: i64,
    /// Whether the article is visible on the public site
    pub is_published: bool,
    /// Creation timestamp
    pub created_at: DateTimeUtc,
    /// Last update timestamp
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Article and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each article has one author
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    Author,
    /// Each article is filed under one category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
