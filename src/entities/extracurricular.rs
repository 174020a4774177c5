//! Extracurricular entity - student clubs and activities.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Extracurricular database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "extracurriculars")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Relative path to the stored photo, if any
    pub image: Option<String>,
    /// Whether the activity is currently offered
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
