//! Achievement business logic - awards listed on the public site.

use crate::{
    core::pager::{self, Page},
    entities::{Achievement, achievement},
    errors::{Error, Result},
    storage::{FileStore, Upload},
    validate::{self, ValidationErrors},
};
use sea_orm::{QueryOrder, Set, prelude::*};

const IMAGE_NAMESPACE: &str = "achievements";

/// Validated fields for creating an achievement.
#[derive(Debug, Clone)]
pub struct AchievementInput {
    pub title: String,
    pub description: Option<String>,
}

impl AchievementInput {
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

/// Partial update for an achievement; `None` retains the stored value.
#[derive(Debug, Clone, Default)]
pub struct AchievementUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Lists achievements newest-first, optionally filtered by a title search.
pub async fn list_achievements(
    db: &DatabaseConnection,
    search: Option<&str>,
    page: u64,
) -> Result<Page<achievement::Model>> {
    let mut select = Achievement::find().order_by_desc(achievement::Column::CreatedAt);
    if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
        select = select.filter(achievement::Column::Title.contains(term));
    }
    pager::paginate(db, select, page).await
}

/// Finds an achievement by its primary key.
pub async fn get_achievement_by_id(
    db: &DatabaseConnection,
    achievement_id: i64,
) -> Result<Option<achievement::Model>> {
    Achievement::find_by_id(achievement_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates an achievement with an optional stored photo.
///
/// # Errors
/// Returns [`Error::Validation`] on bad input.
pub async fn create_achievement(
    db: &DatabaseConnection,
    store: &FileStore,
    input: AchievementInput,
    image: Option<Upload>,
) -> Result<achievement::Model> {
    input.validate().map_err(Error::Validation)?;

    let image_path = match image {
        Some(upload) => Some(store.store(IMAGE_NAMESPACE, &upload).await?),
        None => None,
    };

    let now = chrono::Utc::now();
    let model = achievement::ActiveModel {
        title: Set(input.title.trim().to_string()),
        description: Set(input.description),
        image: Set(image_path),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    Ok(model.insert(db).await?)
}

/// Applies a partial update with the usual file-replacement rules.
///
/// # Errors
/// Returns [`Error::NotFound`] when the achievement does not exist.
pub async fn update_achievement(
    db: &DatabaseConnection,
    store: &FileStore,
    achievement_id: i64,
    update: AchievementUpdate,
    image: Option<Upload>,
) -> Result<achievement::Model> {
    let existing = get_achievement_by_id(db, achievement_id)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Achievement",
            id: achievement_id.to_string(),
        })?;

    let mut active: achievement::ActiveModel = existing.clone().into();

    if let Some(title) = update.title {
        let mut errors = ValidationErrors::new();
        validate::require(&mut errors, "title", &title);
        errors.into_result().map_err(Error::Validation)?;
        active.title = Set(title.trim().to_string());
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

/// Deletes an achievement and its stored photo (best-effort).
///
/// # Errors
/// Returns [`Error::NotFound`] when the achievement does not exist.
pub async fn delete_achievement(
    db: &DatabaseConnection,
    store: &FileStore,
    achievement_id: i64,
) -> Result<()> {
    let existing = get_achievement_by_id(db, achievement_id)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Achievement",
            id: achievement_id.to_string(),
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

    #[tokio::test]
    async fn test_create_update_delete_cycle() {
        let db = setup_test_db().await.unwrap();
        let (_dir, store) = setup_test_store();

        let created = create_achievement(
            &db,
            &store,
            AchievementInput {
                title: "National Math Olympiad".to_string(),
                description: None,
            },
            Some(Upload::new("trophy.jpg", vec![1])),
        )
        .await
        .unwrap();
        let path = created.image.clone().unwrap();

        let updated = update_achievement(
            &db,
            &store,
            created.id,
            AchievementUpdate {
                description: Some("First place, 2026".to_string()),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();
        assert_eq!(updated.image.as_deref(), Some(path.as_str()));

        delete_achievement(&db, &store, created.id).await.unwrap();
        assert!(!store.exists(&path).await);
        assert!(
            get_achievement_by_id(&db, created.id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_search_misses_return_empty_page() {
        let db = setup_test_db().await.unwrap();
        let (_dir, store) = setup_test_store();

        create_achievement(
            &db,
            &store,
            AchievementInput {
                title: "Debate champion".to_string(),
                description: None,
            },
            None,
        )
        .await
        .unwrap();

        let page = list_achievements(&db, Some("chess"), 1).await.unwrap();
        assert_eq!(page.total_items, 0);
        assert!(page.items.is_empty());
    }
}
