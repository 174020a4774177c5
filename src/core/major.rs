//! Major business logic - study programs, same shape as facilities.

use crate::{
    core::{
        pager::{self, Page},
        slug,
    },
    entities::{Major, major},
    errors::{Error, Result},
    storage::{FileStore, Upload},
    validate::{self, ValidationErrors},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};

const IMAGE_NAMESPACE: &str = "majors";

/// Validated fields for creating a major.
#[derive(Debug, Clone)]
pub struct MajorInput {
    pub name: String,
    pub description: Option<String>,
}

impl MajorInput {
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

/// Partial update for a major; `None` retains the stored value.
#[derive(Debug, Clone, Default)]
pub struct MajorUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}

async fn slug_taken(
    db: &DatabaseConnection,
    candidate: String,
    exclude_id: Option<i64>,
) -> Result<bool> {
    let mut query = Major::find().filter(major::Column::Slug.eq(candidate));
    if let Some(id) = exclude_id {
        query = query.filter(major::Column::Id.ne(id));
    }
    Ok(query.count(db).await? > 0)
}

/// Lists majors newest-first, optionally filtered by a name search term.
pub async fn list_majors(
    db: &DatabaseConnection,
    search: Option<&str>,
    page: u64,
) -> Result<Page<major::Model>> {
    let mut select = Major::find().order_by_desc(major::Column::CreatedAt);
    if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
        select = select.filter(major::Column::Name.contains(term));
    }
    pager::paginate(db, select, page).await
}

/// Finds a major by its primary key.
pub async fn get_major_by_id(
    db: &DatabaseConnection,
    major_id: i64,
) -> Result<Option<major::Model>> {
    Major::find_by_id(major_id).one(db).await.map_err(Into::into)
}

/// Finds a major by its slug.
pub async fn get_major_by_slug(
    db: &DatabaseConnection,
    slug: &str,
) -> Result<Option<major::Model>> {
    Major::find()
        .filter(major::Column::Slug.eq(slug))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a major with a derived slug and an optional stored photo.
///
/// # Errors
/// Returns [`Error::Validation`] on bad input.
pub async fn create_major(
    db: &DatabaseConnection,
    store: &FileStore,
    input: MajorInput,
    image: Option<Upload>,
) -> Result<major::Model> {
    input.validate().map_err(Error::Validation)?;

    let base = slug::slugify(&input.name);
    let slug = slug::unique_slug(&base, |candidate| slug_taken(db, candidate, None)).await?;

    let image_path = match image {
        Some(upload) => Some(store.store(IMAGE_NAMESPACE, &upload).await?),
        None => None,
    };

    let now = chrono::Utc::now();
    let model = major::ActiveModel {
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
/// Returns [`Error::NotFound`] when the major does not exist.
pub async fn update_major(
    db: &DatabaseConnection,
    store: &FileStore,
    major_id: i64,
    update: MajorUpdate,
    image: Option<Upload>,
) -> Result<major::Model> {
    let existing = get_major_by_id(db, major_id)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Major",
            id: major_id.to_string(),
        })?;

    let mut active: major::ActiveModel = existing.clone().into();

    if let Some(name) = update.name {
        let mut errors = ValidationErrors::new();
        validate::require(&mut errors, "name", &name);
        validate::max_len(&mut errors, "name", &name, 150);
        errors.into_result().map_err(Error::Validation)?;

        let name = name.trim().to_string();
        if name != existing.name {
            let base = slug::slugify(&name);
            let slug = slug::unique_slug(&base, |candidate| {
                slug_taken(db, candidate, Some(major_id))
            })
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

/// Deletes a major and its stored photo (best-effort).
///
/// # Errors
/// Returns [`Error::NotFound`] when the major does not exist.
pub async fn delete_major(
    db: &DatabaseConnection,
    store: &FileStore,
    major_id: i64,
) -> Result<()> {
    let existing = get_major_by_id(db, major_id)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Major",
            id: major_id.to_string(),
        })?;

    if let Some(path) = &existing.image {
        store.remove_quiet(path).await;
    }
    existing.delete(db).await?;
    Ok(())
}
