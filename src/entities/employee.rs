//! Employee entity - staff listed on the site, ordered by role rank.
//!
//! `category` is one of a closed set of role names (PRINCIPAL, HEAD_OF_ADMIN,
//! VICE_PRINCIPAL, TEACHER, ADMINISTRATIVE, STAFF); `display_order` is
//! derived from it at write time, never taken from the caller.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Employee database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    /// Unique identifier for the employee
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Full name
    pub name: String,
    /// Role category from the closed set; unrecognized values rank last
    pub category: String,
    /// Free-form position label shown under the name, if any
    pub position: Option<String>,
    /// Relative path to the stored portrait photo, if any
    pub photo: Option<String>,
    /// Numeric rank derived from `category` (0 = principal … 5 = staff)
    pub display_order: i32,
    /// Creation timestamp
    pub created_at: DateTimeUtc,
    /// Last update timestamp
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
