//! Extracurricular business logic - clubs and activities with an active flag.

use crate::{
    core::pager::{self, Page},
    entities::{Extracurricular, extracurricular},
    errors::{Error, Result},
    storage::{FileStore, Upload},
    validate::{self, ValidationErrors},
};
use sea_orm::{QueryOrder, Set, prelude::*};

const IMAGE_NAMESPACE: &str = "extracurriculars";

/// Validated fields for creating an extracurricular activity.
#[derive(Debug, Clone)]
pub struct ExtracurricularInput {
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}

impl ExtracurricularInput {
    /// Checks business rules before any write happens.
    ///
    /// # Errors
    /// Returns the collected per-field messages when any rule fails.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate::require(&mut errors, "name", &self.name);
        validate::max_len(&mut errors, "name", &self.name, 150);
        errors.into_result()
    }
}

/// Partial update; `None` retains the stored value.
#[derive(Debug, Clone, Default)]
pub struct ExtracurricularUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// Lists activities newest-first; optional name search and active filter.
pub async fn list_extracurriculars(
    db: &DatabaseConnection,
    search: Option<&str>,
    is_active: Option<bool>,
    page: u64,
) -> Result<Page<extracurricular::Model>> {
    let mut select = Extracurricular::find().order_by_desc(extracurricular::Column::CreatedAt);
    if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
        select = select.filter(extracurricular::Column::Name.contains(term));
    }
    if let Some(active) = is_active {
        select = select.filter(extracurricular::Column::IsActive.eq(active));
    }
    pager::paginate(db, select, page).await
}

/// Finds an activity by its primary key.
pub async fn get_extracurricular_by_id(
    db: &DatabaseConnection,
    extracurricular_id: i64,
) -> Result<Option<extracurricular::Model>> {
    Extracurricular::find_by_id(extracurricular_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates an activity with an optional stored photo.
///
/// # Errors
/// Returns [`Error::Validation`] on bad input.
pub async fn create_extracurricular(
    db: &DatabaseConnection,
    store: &FileStore,
    input: ExtracurricularInput,
    image: Option<Upload>,
) -> Result<extracurricular::Model> {
    input.validate().map_err(Error::Validation)?;

    let image_path = match image {
        Some(upload) => Some(store.store(IMAGE_NAMESPACE, &upload).await?),
        None => None,
    };

    let now = chrono::Utc::now();
    let model = extracurricular::ActiveModel {
        name: Set(input.name.trim().to_string()),
        description: Set(input.description),
        image: Set(image_path),
        is_active: Set(input.is_active),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    Ok(model.insert(db).await?)
}

/// Applies a partial update with the usual file-replacement rules.
///
/// # Errors
/// Returns [`Error::NotFound`] when the activity does not exist.
pub async fn update_extracurricular(
    db: &DatabaseConnection,
    store: &FileStore,
    extracurricular_id: i64,
    update: ExtracurricularUpdate,
    image: Option<Upload>,
) -> Result<extracurricular::Model> {
    let existing = get_extracurricular_by_id(db, extracurricular_id)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Extracurricular",
            id: extracurricular_id.to_string(),
        })?;

    let mut active: extracurricular::ActiveModel = existing.clone().into();

    if let Some(name) = update.name {
        let mut errors = ValidationErrors::new();
        validate::require(&mut errors, "name", &name);
        errors.into_result().map_err(Error::Validation)?;
        active.name = Set(name.trim().to_string());
    }
    if let Some(description) = update.description {
        active.description = Set(Some(description));
    }
    if let Some(is_active) = update.is_active {
        active.is_active = Set(is_active);
    }

    if let Some(upload) = image {
        let path = store
            .replace(IMAGE_NAMESPACE, existing.image.as_deref(), &upload)
            .await?;
        active.image = Set(Some(path));
    }

    active.updated_at = Set(chrono::Utc::now());
    Ok(active.update(db).await?)
}

/// Deletes an activity and its stored photo (best-effort).
///
/// # Errors
/// Returns [`Error::NotFound`] when the activity does not exist.
pub async fn delete_extracurricular(
    db: &DatabaseConnection,
    store: &FileStore,
    extracurricular_id: i64,
) -> Result<()> {
    let existing = get_extracurricular_by_id(db, extracurricular_id)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Extracurricular",
            id: extracurricular_id.to_string(),
        })?;

    if let Some(path) = &existing.image {
        store.remove_quiet(path).await;
    }
    existing.delete(db).await?;
    Ok(())
}
