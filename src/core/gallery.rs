//! Gallery business logic - the transactional multi-row writer.
//!
//! A gallery write touches the parent row plus one row per uploaded image,
//! so create/update/delete all run inside a single database transaction:
//! either every row lands or none do. The transaction is committed
//! explicitly; any error before the commit drops it and SeaORM rolls back.
//!
//! Files written to the blob store before a failure are not cleaned up by
//! the rollback; that gap is accepted and covered in the tests.

use crate::{
    core::{
        pager::{self, Page},
        slug,
    },
    entities::{Gallery, GalleryImage, gallery, gallery_image},
    errors::{Error, Result},
    storage::{FileStore, Upload},
    validate::{self, ValidationErrors},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, TransactionTrait, prelude::*};

const IMAGE_NAMESPACE: &str = "galleries";

/// Validated fields for creating a gallery.
#[derive(Debug, Clone)]
pub struct GalleryInput {
    pub title: String,
    pub description: Option<String>,
}

impl GalleryInput {
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

/// Partial update for a gallery; `None` retains the stored value.
#[derive(Debug, Clone, Default)]
pub struct GalleryUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
}

async fn slug_taken(
    db: &DatabaseConnection,
    candidate: String,
    exclude_id: Option<i64>,
) -> Result<bool> {
    let mut query = Gallery::find().filter(gallery::Column::Slug.eq(candidate));
    if let Some(id) = exclude_id {
        query = query.filter(gallery::Column::Id.ne(id));
    }
    Ok(query.count(db).await? > 0)
}

/// Lists galleries newest-first, optionally filtered by a title search term.
pub async fn list_galleries(
    db: &DatabaseConnection,
    search: Option<&str>,
    page: u64,
) -> Result<Page<gallery::Model>> {
    let mut select = Gallery::find().order_by_desc(gallery::Column::CreatedAt);
    if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
        select = select.filter(gallery::Column::Title.contains(term));
    }
    pager::paginate(db, select, page).await
}

/// Finds a gallery by its primary key.
pub async fn get_gallery_by_id(
    db: &DatabaseConnection,
    gallery_id: i64,
) -> Result<Option<gallery::Model>> {
    Gallery::find_by_id(gallery_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a gallery by slug together with its images, oldest image first.
pub async fn get_gallery_with_images(
    db: &DatabaseConnection,
    slug: &str,
) -> Result<Option<(gallery::Model, Vec<gallery_image::Model>)>> {
    let Some(found) = Gallery::find()
        .filter(gallery::Column::Slug.eq(slug))
        .one(db)
        .await?
    else {
        return Ok(None);
    };

    let images = found
        .find_related(GalleryImage)
        .order_by_asc(gallery_image::Column::Id)
        .all(db)
        .await?;

    Ok(Some((found, images)))
}

/// Creates a gallery and its image rows atomically. Each upload is written
/// to the blob store and then recorded as a child row inside the same
/// transaction as the parent; on any failure the transaction rolls back and
/// no rows persist (already-stored files are left behind).
///
/// # Errors
/// Returns [`Error::Validation`] on bad input; storage and database errors
/// abort the whole write and surface their message to the caller.
pub async fn create_gallery(
    db: &DatabaseConnection,
    store: &FileStore,
    input: GalleryInput,
    images: Vec<Upload>,
) -> Result<gallery::Model> {
    input.validate().map_err(Error::Validation)?;

    let base = slug::slugify(&input.title);
    let slug = slug::unique_slug(&base, |candidate| slug_taken(db, candidate, None)).await?;

    let now = chrono::Utc::now();
    let txn = db.begin().await?;

    let parent = gallery::ActiveModel {
        title: Set(input.title.trim().to_string()),
        slug: Set(slug),
        description: Set(input.description),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    for upload in &images {
        let path = store.store(IMAGE_NAMESPACE, upload).await?;
        gallery_image::ActiveModel {
            gallery_id: Set(parent.id),
            image: Set(path),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;
    Ok(parent)
}

/// Updates a gallery and appends any newly uploaded images, atomically.
/// The slug regenerates only when the title changed.
///
/// # Errors
/// Returns [`Error::NotFound`] when the gallery does not exist; any error
/// mid-sequence rolls back the parent update and the appended rows.
pub async fn update_gallery(
    db: &DatabaseConnection,
    store: &FileStore,
    gallery_id: i64,
    update: GalleryUpdate,
    new_images: Vec<Upload>,
) -> Result<gallery::Model> {
    let existing = get_gallery_by_id(db, gallery_id)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Gallery",
            id: gallery_id.to_string(),
        })?;

    let mut active: gallery::ActiveModel = existing.clone().into();

    if let Some(title) = update.title {
        let mut errors = ValidationErrors::new();
        validate::require(&mut errors, "title", &title);
        validate::max_len(&mut errors, "title", &title, 200);
        errors.into_result().map_err(Error::Validation)?;

        let title = title.trim().to_string();
        if title != existing.title {
            let base = slug::slugify(&title);
            let slug =
                slug::unique_slug(&base, |candidate| slug_taken(db, candidate, Some(gallery_id)))
                    .await?;
            active.slug = Set(slug);
        }
        active.title = Set(title);
    }
    if let Some(description) = update.description {
        active.description = Set(Some(description));
    }

    let now = chrono::Utc::now();
    active.updated_at = Set(now);

    let txn = db.begin().await?;

    let parent = active.update(&txn).await?;

    for upload in &new_images {
        let path = store.store(IMAGE_NAMESPACE, upload).await?;
        gallery_image::ActiveModel {
            gallery_id: Set(parent.id),
            image: Set(path),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;
    Ok(parent)
}

/// Deletes a gallery, its image rows and their backing files. File removal
/// is best-effort; the row deletions share one transaction.
///
/// # Errors
/// Returns [`Error::NotFound`] when the gallery does not exist.
pub async fn delete_gallery(
    db: &DatabaseConnection,
    store: &FileStore,
    gallery_id: i64,
) -> Result<()> {
    let existing = get_gallery_by_id(db, gallery_id)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Gallery",
            id: gallery_id.to_string(),
        })?;

    let images = existing.find_related(GalleryImage).all(db).await?;

    let txn = db.begin().await?;
    for image in images {
        store.remove_quiet(&image.image).await;
        image.delete(&txn).await?;
    }
    existing.delete(&txn).await?;
    txn.commit().await?;

    Ok(())
}

/// Removes a single image row and its backing file (best-effort).
///
/// # Errors
/// Returns [`Error::NotFound`] when the image row does not exist.
pub async fn delete_gallery_image(
    db: &DatabaseConnection,
    store: &FileStore,
    image_id: i64,
) -> Result<()> {
    let image = GalleryImage::find_by_id(image_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "GalleryImage",
            id: image_id.to_string(),
        })?;

    store.remove_quiet(&image.image).await;
    image.delete(db).await?;
    Ok(())
}
