//! SchoolProfile entity - long-form profile sections (history, vision,
//! headmaster greeting), one row per section type, upserted by that key.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// School profile database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "school_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Type discriminator ("history", "vision_mission", "headmaster", …);
    /// at most one row exists per value
    #[sea_orm(unique)]
    pub profile_type: String,
    /// Section heading
    pub title: String,
    /// Section body
    pub content: String,
    /// Relative path to the stored illustration, if any
    pub image: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
