//! Facility business logic - slugged records with an optional photo.

use crate::{
    core::{
        pager::{self, Page},
        slug,
    },
    entities::{Facility, facility},
    errors::{Error, Result},
    storage::{FileStore, Upload},
    validate::{self, ValidationErrors},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};

const IMAGE_NAMESPACE: &str = "facilities";

/// Validated fields for creating a facility.
#[derive(Debug, Clone)]
pub struct FacilityInput {
    pub name: String,
    pub description: Option<String>,
}

impl FacilityInput {
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

/// Partial update for a facility; `None` retains the stored value.
#[derive(Debug, Clone, Default)]
pub struct FacilityUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}

async fn slug_taken(
    db: &DatabaseConnection,
    candidate: String,
    exclude_id: Option<i64>,
) -> Result<bool> {
    let mut query = Facility::find().filter(facility::Column::Slug.eq(candidate));
    if let Some(id) = exclude_id {
        query = query.filter(facility::Column::Id.ne(id));
    }
    Ok(query.count(db).await? > 0)
}

/// Lists facilities newest-first, optionally filtered by a name search term.
pub async fn list_facilities(
    db: &DatabaseConnection,
    search: Option<&str>,
    page: u64,
) -> Result<Page<facility::Model>> {
    let mut select = Facility::find().order_by_desc(facility::Column::CreatedAt);
    if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
        select = select.filter(facility::Column::Name.contains(term));
    }
    pager::paginate(db, select, page).await
}

/// Finds a facility by its primary key.
pub async fn get_facility_by_id(
    db: &DatabaseConnection,
    facility_id: i64,
) -> Result<Option<facility::Model>> {
    Facility::find_by_id(facility_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a facility by its slug.
pub async fn get_facility_by_slug(
    db: &DatabaseConnection,
    slug: &str,
) -> Result<Option<facility::Model>> {
    Facility::find()
        .filter(facility::Column::Slug.eq(slug))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a facility with a derived slug and an optional stored photo.
///
/// # Errors
/// Returns [`Error::Validation`] on bad input.
pub async fn create_facility(
    db: &DatabaseConnection,
    store: &FileStore,
    input: FacilityInput,
    image: Option<Upload>,
) -> Result<facility::Model> {
    input.validate().map_err(Error::Validation)?;

    let base = slug::slugify(&input.name);
    let slug = slug::unique_slug(&base, |candidate| slug_taken(db, candidate, None)).await?;

    let image_path = match image {
        Some(upload) => Some(store.store(IMAGE_NAMESPACE, &upload).await?),
        None => None,
    };

    let now = chrono::Utc::now();
    let model = facility::ActiveModel {
        name: Set(input.name.trim().to_string()),
        slug: Set(slug),
        description: Set(input.description),
        image: Set(image_path),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    Ok(model.insert(db).await?)
}

/// Applies a partial update with the usual slug and file-replacement rules.
///
/// # Errors
/// Returns [`Error::NotFound`] when the facility does not exist.
pub async fn update_facility(
    db: &DatabaseConnection,
    store: &FileStore,
    facility_id: i64,
    update: FacilityUpdate,
    image: Option<Upload>,
) -> Result<facility::Model> {
    let existing = get_facility_by_id(db, facility_id)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Facility",
            id: facility_id.to_string(),
        })?;

    let mut active: facility::ActiveModel = existing.clone().into();

    if let Some(name) = update.name {
        let mut errors = ValidationErrors::new();
        validate::require(&mut errors, "name", &name);
        validate::max_len(&mut errors, "name", &name, 150);
        errors.into_result().map_err(Error::Validation)?;

        let name = name.trim().to_string();
        if name != existing.name {
            let base = slug::slugify(&name);
            let slug =
                slug::unique_slug(&base, |candidate| slug_taken(db, candidate, Some(facility_id)))
                    .await?;
            active.slug = Set(slug);
        }
        active.name = Set(name);
    }
    if let Some(description) = update.description {
        active.description = Set(Some(description));
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

/// Deletes a facility and its stored photo (best-effort).
///
/// # Errors
/// Returns [`Error::NotFound`] when the facility does not exist.
pub async fn delete_facility(
    db: &DatabaseConnection,
    store: &FileStore,
    facility_id: i64,
) -> Result<()> {
    let existing = get_facility_by_id(db, facility_id)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Facility",
            id: facility_id.to_string(),
        })?;

    if let Some(path) = &existing.image {
        store.remove_quiet(path).await;
    }
    existing.delete(db).await?;
    Ok(())
}
