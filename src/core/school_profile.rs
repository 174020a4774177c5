//! School profile business logic - upsert-by-type sections.
//!
//! Profile sections (history, vision/mission, headmaster greeting) are
//! singletons per `profile_type`: writing a section updates the existing row
//! when one exists for that type and inserts it otherwise, with the usual
//! file-replacement semantics for the illustration.

use crate::{
    entities::{SchoolProfile, school_profile},
    errors::{Error, Result},
    storage::{FileStore, Upload},
    validate::{self, ValidationErrors},
};
use sea_orm::{QueryOrder, Set, prelude::*};

const IMAGE_NAMESPACE: &str = "profiles";

/// Validated fields for writing a profile section.
#[derive(Debug, Clone)]
pub struct ProfileInput {
    pub title: String,
    pub content: String,
}

impl ProfileInput {
    /// Checks business rules before any write happens.
    ///
    /// # Errors
    /// Returns the collected per-field messages when any rule fails.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate::require(&mut errors, "title", &self.title);
        validate::require(&mut errors, "content", &self.content);
        errors.into_result()
    }
}

/// Lists all profile sections, ordered by type for stable display.
pub async fn list_profiles(db: &DatabaseConnection) -> Result<Vec<school_profile::Model>> {
    SchoolProfile::find()
        .order_by_asc(school_profile::Column::ProfileType)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a profile section by its type discriminator.
pub async fn get_profile(
    db: &DatabaseConnection,
    profile_type: &str,
) -> Result<Option<school_profile::Model>> {
    SchoolProfile::find()
        .filter(school_profile::Column::ProfileType.eq(profile_type))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Writes a profile section keyed by `profile_type`: updates the existing
/// row or inserts a new one. A supplied upload replaces the stored
/// illustration (old file removed best-effort); no upload keeps it.
///
/// # Errors
/// Returns [`Error::Validation`] on bad input.
pub async fn upsert_profile(
    db: &DatabaseConnection,
    store: &FileStore,
    profile_type: &str,
    input: ProfileInput,
    image: Option<Upload>,
) -> Result<school_profile::Model> {
    input.validate().map_err(Error::Validation)?;

    let now = chrono::Utc::now();
    let existing = get_profile(db, profile_type).await?;

    match existing {
        Some(found) => {
            let mut active: school_profile::ActiveModel = found.clone().into();
            active.title = Set(input.title.trim().to_string());
            active.content = Set(input.content);
            if let Some(upload) = image {
                let path = store
                    .replace(IMAGE_NAMESPACE, found.image.as_deref(), &upload)
                    .await?;
                active.image = Set(Some(path));
            }
            active.updated_at = Set(now);
            Ok(active.update(db).await?)
        }
        None => {
            let image_path = match image {
                Some(upload) => Some(store.store(IMAGE_NAMESPACE, &upload).await?),
                None => None,
            };
            let model = school_profile::ActiveModel {
                profile_type: Set(profile_type.to_string()),
                title: Set(input.title.trim().to_string()),
                content: Set(input.content),
                image: Set(image_path),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };
            Ok(model.insert(db).await?)
        }
    }
}

/// Deletes a profile section and its stored illustration (best-effort).
///
/// # Errors
/// Returns [`Error::NotFound`] when no row exists for the type.
pub async fn delete_profile(
    db: &DatabaseConnection,
    store: &FileStore,
    profile_type: &str,
) -> Result<()> {
    let existing = get_profile(db, profile_type)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "SchoolProfile",
            id: profile_type.to_string(),
        })?;

    if let Some(path) = &existing.image {
        store.remove_quiet(path).await;
    }
    existing.delete(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{setup_test_db, setup_test_store};

    fn input(title: &str) -> ProfileInput {
        ProfileInput {
            title: title.to_string(),
            content: "Body text".to_string(),
        }
    }

    #[tokio::test]
    async fn test_upsert_inserts_then_updates_same_row() {
        let db = setup_test_db().await.unwrap();
        let (_dir, store) = setup_test_store();

        let first = upsert_profile(&db, &store, "headmaster", input("Welcome"), None)
            .await
            .unwrap();
        let second = upsert_profile(&db, &store, "headmaster", input("Greetings"), None)
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.title, "Greetings");
        assert_eq!(SchoolProfile::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_upsert_distinct_types_coexist() {
        let db = setup_test_db().await.unwrap();
        let (_dir, store) = setup_test_store();

        upsert_profile(&db, &store, "history", input("Our History"), None)
            .await
            .unwrap();
        upsert_profile(&db, &store, "vision_mission", input("Vision"), None)
            .await
            .unwrap();

        assert_eq!(list_profiles(&db).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_upsert_replaces_image_per_file_rules() {
        let db = setup_test_db().await.unwrap();
        let (_dir, store) = setup_test_store();

        let first = upsert_profile(
            &db,
            &store,
            "headmaster",
            input("Welcome"),
            Some(Upload::new("head.jpg", vec![1])),
        )
        .await
        .unwrap();
        let old = first.image.clone().unwrap();

        // No upload: image untouched.
        let kept = upsert_profile(&db, &store, "headmaster", input("Welcome"), None)
            .await
            .unwrap();
        assert_eq!(kept.image.as_deref(), Some(old.as_str()));

        // New upload: old file gone, new recorded.
        let replaced = upsert_profile(
            &db,
            &store,
            "headmaster",
            input("Welcome"),
            Some(Upload::new("head2.jpg", vec![2])),
        )
        .await
        .unwrap();
        assert!(!store.exists(&old).await);
        assert!(store.exists(replaced.image.as_deref().unwrap()).await);
    }

    #[tokio::test]
    async fn test_delete_profile() {
        let db = setup_test_db().await.unwrap();
        let (_dir, store) = setup_test_store();

        upsert_profile(
            &db,
            &store,
            "history",
            input("Our History"),
            Some(Upload::new("building.jpg", vec![1])),
        )
        .await
        .unwrap();
        let path = get_profile(&db, "history")
            .await
            .unwrap()
            .unwrap()
            .image
            .unwrap();

        delete_profile(&db, &store, "history").await.unwrap();
        assert!(get_profile(&db, "history").await.unwrap().is_none());
        assert!(!store.exists(&path).await);

        let result = delete_profile(&db, &store, "history").await;
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }
}
