//! Employee business logic - staff records with derived display ordering.
//!
//! The display order is never taken from the caller: it is a fixed mapping
//! from the role category, recomputed on every create and update so listings
//! always rank principal first and general staff last.

use crate::{
    core::pager::{self, Page},
    entities::{Employee, employee},
    errors::{Error, Result},
    storage::{FileStore, Upload},
    validate::{self, ValidationErrors},
};
use sea_orm::{QueryOrder, Set, prelude::*};

const PHOTO_NAMESPACE: &str = "employees";

/// Maps a role category to its numeric display rank. Unrecognized values
/// rank with general staff.
pub fn display_order_for(category: &str) -> i32 {
    match category {
        "PRINCIPAL" => 0,
        "HEAD_OF_ADMIN" => 1,
        "VICE_PRINCIPAL" => 2,
        "TEACHER" => 3,
        "ADMINISTRATIVE" => 4,
        _ => 5, // STAFF and anything unrecognized
    }
}

/// Optional listing filters; absent filters are simply not applied.
#[derive(Debug, Clone, Default)]
pub struct EmployeeFilter {
    /// Free-text search against the name
    pub search: Option<String>,
    /// Exact role category match
    pub category: Option<String>,
}

/// Validated fields for creating an employee. Any caller-supplied display
/// order is deliberately absent: the rank is derived from `category`.
#[derive(Debug, Clone)]
pub struct EmployeeInput {
    pub name: String,
    pub category: String,
    pub position: Option<String>,
}

impl EmployeeInput {
    /// Checks business rules before any write happens.
    ///
    /// # Errors
    /// Returns the collected per-field messages when any rule fails.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate::require(&mut errors, "name", &self.name);
        validate::max_len(&mut errors, "name", &self.name, 150);
        validate::require(&mut errors, "category", &self.category);
        errors.into_result()
    }
}

/// Partial update for an employee; `None` retains the stored value.
#[derive(Debug, Clone, Default)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub position: Option<String>,
}

/// Lists employees ranked by display order, then name, with optional
/// search/category filters.
pub async fn list_employees(
    db: &DatabaseConnection,
    filter: &EmployeeFilter,
    page: u64,
) -> Result<Page<employee::Model>> {
    let mut select = Employee::find()
        .order_by_asc(employee::Column::DisplayOrder)
        .order_by_asc(employee::Column::Name);

    if let Some(term) = filter.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        select = select.filter(employee::Column::Name.contains(term));
    }
    if let Some(category) = filter.category.as_deref().filter(|c| !c.is_empty()) {
        select = select.filter(employee::Column::Category.eq(category));
    }

    pager::paginate(db, select, page).await
}

/// Finds an employee by its primary key.
pub async fn get_employee_by_id(
    db: &DatabaseConnection,
    employee_id: i64,
) -> Result<Option<employee::Model>> {
    Employee::find_by_id(employee_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates an employee; the display order comes from the category mapping,
/// and an optional photo upload is stored under the employees namespace.
///
/// # Errors
/// Returns [`Error::Validation`] on bad input.
pub async fn create_employee(
    db: &DatabaseConnection,
    store: &FileStore,
    input: EmployeeInput,
    photo: Option<Upload>,
) -> Result<employee::Model> {
    input.validate().map_err(Error::Validation)?;

    let photo_path = match photo {
        Some(upload) => Some(store.store(PHOTO_NAMESPACE, &upload).await?),
        None => None,
    };

    let now = chrono::Utc::now();
    let model = employee::ActiveModel {
        name: Set(input.name.trim().to_string()),
        display_order: Set(display_order_for(&input.category)),
        category: Set(input.category),
        position: Set(input.position),
        photo: Set(photo_path),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    Ok(model.insert(db).await?)
}

/// Applies a partial update. Changing the category recomputes the display
/// order; the photo follows the file-replacement rules.
///
/// # Errors
/// Returns [`Error::NotFound`] when the employee does not exist.
pub async fn update_employee(
    db: &DatabaseConnection,
    store: &FileStore,
    employee_id: i64,
    update: EmployeeUpdate,
    photo: Option<Upload>,
) -> Result<employee::Model> {
    let existing = get_employee_by_id(db, employee_id)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Employee",
            id: employee_id.to_string(),
        })?;

    let mut active: employee::ActiveModel = existing.clone().into();

    if let Some(name) = update.name {
        let mut errors = ValidationErrors::new();
        validate::require(&mut errors, "name", &name);
        validate::max_len(&mut errors, "name", &name, 150);
        errors.into_result().map_err(Error::Validation)?;
        active.name = Set(name.trim().to_string());
    }
    if let Some(category) = update.category {
        active.display_order = Set(display_order_for(&category));
        active.category = Set(category);
    }
    if let Some(position) = update.position {
        active.position = Set(Some(position));
    }

    if let Some(upload) = photo {
        let path = store
            .replace(PHOTO_NAMESPACE, existing.photo.as_deref(), &upload)
            .await?;
        active.photo = Set(Some(path));
    }

    active.updated_at = Set(chrono::Utc::now());
    Ok(active.update(db).await?)
}

/// Deletes an employee and the stored photo (best-effort).
///
/// # Errors
/// Returns [`Error::NotFound`] when the employee does not exist.
pub async fn delete_employee(
    db: &DatabaseConnection,
    store: &FileStore,
    employee_id: i64,
) -> Result<()> {
    let existing = get_employee_by_id(db, employee_id)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Employee",
            id: employee_id.to_string(),
        })?;

    if let Some(path) = &existing.photo {
        store.remove_quiet(path).await;
    }
    existing.delete(db).await?;
    Ok(())
}
