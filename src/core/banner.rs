//! Banner business logic - homepage banners with an active flag.

use crate::{
    core::pager::{self, Page},
    entities::{Banner, banner},
    errors::{Error, Result},
    storage::{FileStore, Upload},
    validate::{self, ValidationErrors},
};
use sea_orm::{QueryOrder, Set, prelude::*};

const IMAGE_NAMESPACE: &str = "banners";

/// Validated fields for creating a banner.
#[derive(Debug, Clone)]
pub struct BannerInput {
    pub title: String,
    pub link: Option<String>,
    pub is_active: bool,
}

impl BannerInput {
    /// Checks business rules before any write happens.
    ///
    /// # Errors
    /// Returns the collected per-field messages when any rule fails.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate::require(&mut errors, "title", &self.title);
        validate::max_len(&mut errors, "title", &self.title, 200);
        errors.into_result()
    }
}

/// Partial update for a banner; `None` retains the stored value.
#[derive(Debug, Clone, Default)]
pub struct BannerUpdate {
    pub title: Option<String>,
    pub link: Option<String>,
    pub is_active: Option<bool>,
}

/// Lists banners newest-first, optionally filtered by the active flag.
pub async fn list_banners(
    db: &DatabaseConnection,
    is_active: Option<bool>,
    page: u64,
) -> Result<Page<banner::Model>> {
    let mut select = Banner::find().order_by_desc(banner::Column::CreatedAt);
    if let Some(active) = is_active {
        select = select.filter(banner::Column::IsActive.eq(active));
    }
    pager::paginate(db, select, page).await
}

/// Finds a banner by its primary key.
pub async fn get_banner_by_id(
    db: &DatabaseConnection,
    banner_id: i64,
) -> Result<Option<banner::Model>> {
    Banner::find_by_id(banner_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a banner with an optional stored image.
///
/// # Errors
/// Returns [`Error::Validation`] on bad input.
pub async fn create_banner(
    db: &DatabaseConnection,
    store: &FileStore,
    input: BannerInput,
    image: Option<Upload>,
) -> Result<banner::Model> {
    input.validate().map_err(Error::Validation)?;

    let image_path = match image {
        Some(upload) => Some(store.store(IMAGE_NAMESPACE, &upload).await?),
        None => None,
    };

    let now = chrono::Utc::now();
    let model = banner::ActiveModel {
        title: Set(input.title.trim().to_string()),
        image: Set(image_path),
        link: Set(input.link),
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
/// Returns [`Error::NotFound`] when the banner does not exist.
pub async fn update_banner(
    db: &DatabaseConnection,
    store: &FileStore,
    banner_id: i64,
    update: BannerUpdate,
    image: Option<Upload>,
) -> Result<banner::Model> {
    let existing = get_banner_by_id(db, banner_id)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Banner",
            id: banner_id.to_string(),
        })?;

    let mut active: banner::ActiveModel = existing.clone().into();

    if let Some(title) = update.title {
        let mut errors = ValidationErrors::new();
        validate::require(&mut errors, "title", &title);
        errors.into_result().map_err(Error::Validation)?;
        active.title = Set(title.trim().to_string());
    }
    if let Some(link) = update.link {
        active.link = Set(Some(link));
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

/// Deletes a banner and its stored image (best-effort).
///
/// # Errors
/// Returns [`Error::NotFound`] when the banner does not exist.
pub async fn delete_banner(
    db: &DatabaseConnection,
    store: &FileStore,
    banner_id: i64,
) -> Result<()> {
    let existing = get_banner_by_id(db, banner_id)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Banner",
            id: banner_id.to_string(),
        })?;

    if let Some(path) = &existing.image {
        store.remove_quiet(path).await;
    }
    existing.delete(db).await?;
    Ok(())
}
