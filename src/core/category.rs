//! Category business logic - article categories addressed by slug.
//!
//! Categories are the simplest slugged entity: name in, unique slug out.
//! The slug is derived at creation and regenerated on update only when the
//! name actually changed, so resubmitting the same name never churns it.

use crate::{
    core::{
        pager::{self, Page},
        slug,
    },
    entities::{Category, category},
    errors::{Error, Result},
    validate::{self, ValidationErrors},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};

/// Validated fields for creating a category.
#[derive(Debug, Clone)]
pub struct CategoryInput {
    /// Display name, required
    pub name: String,
}

impl CategoryInput {
    /// Checks business rules before any write happens.
    ///
    /// # Errors
    /// Returns the collected per-field messages when any rule fails.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate::require(&mut errors, "name", &self.name);
        validate::max_len(&mut errors, "name", &self.name, 100);
        errors.into_result()
    }
}

/// Partial update for a category; `None` retains the stored value.
#[derive(Debug, Clone, Default)]
pub struct CategoryUpdate {
    /// New display name, if changing
    pub name: Option<String>,
}

async fn slug_taken(
    db: &DatabaseConnection,
    candidate: String,
    exclude_id: Option<i64>,
) -> Result<bool> {
    let mut query = Category::find().filter(category::Column::Slug.eq(candidate));
    if let Some(id) = exclude_id {
        query = query.filter(category::Column::Id.ne(id));
    }
    Ok(query.count(db).await? > 0)
}

/// Lists categories newest-first, optionally filtered by a name search term.
/// An absent or empty search term applies no filter.
pub async fn list_categories(
    db: &DatabaseConnection,
    search: Option<&str>,
    page: u64,
) -> Result<Page<category::Model>> {
    let mut select = Category::find().order_by_desc(category::Column::CreatedAt);
    if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
        select = select.filter(category::Column::Name.contains(term));
    }
    pager::paginate(db, select, page).await
}

/// Finds a category by its primary key.
pub async fn get_category_by_id(
    db: &DatabaseConnection,
    category_id: i64,
) -> Result<Option<category::Model>> {
    Category::find_by_id(category_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a category by its slug.
pub async fn get_category_by_slug(
    db: &DatabaseConnection,
    slug: &str,
) -> Result<Option<category::Model>> {
    Category::find()
        .filter(category::Column::Slug.eq(slug))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a category with a slug derived from the name.
///
/// # Errors
/// Returns [`Error::Validation`] on bad input, or a database error.
pub async fn create_category(
    db: &DatabaseConnection,
    input: CategoryInput,
) -> Result<category::Model> {
    input.validate().map_err(Error::Validation)?;

    let base = slug::slugify(&input.name);
    let slug = slug::unique_slug(&base, |candidate| slug_taken(db, candidate, None)).await?;

    let now = chrono::Utc::now();
    let model = category::ActiveModel {
        name: Set(input.name.trim().to_string()),
        slug: Set(slug),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    Ok(model.insert(db).await?)
}

/// Applies a partial update; the slug is regenerated only when the incoming
/// name differs from the stored one (excluding this row from the probe).
///
/// # Errors
/// Returns [`Error::NotFound`] when the category does not exist.
pub async fn update_category(
    db: &DatabaseConnection,
    category_id: i64,
    update: CategoryUpdate,
) -> Result<category::Model> {
    let existing = get_category_by_id(db, category_id)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Category",
            id: category_id.to_string(),
        })?;

    let mut active: category::ActiveModel = existing.clone().into();

    if let Some(name) = update.name {
        let input = CategoryInput { name };
        input.validate().map_err(Error::Validation)?;
        let name = input.name.trim().to_string();

        if name != existing.name {
            let base = slug::slugify(&name);
            let slug =
                slug::unique_slug(&base, |candidate| slug_taken(db, candidate, Some(category_id)))
                    .await?;
            active.slug = Set(slug);
        }
        active.name = Set(name);
    }

    active.updated_at = Set(chrono::Utc::now());
    Ok(active.update(db).await?)
}

/// Deletes a category row.
///
/// # Errors
/// Returns [`Error::NotFound`] when the category does not exist.
pub async fn delete_category(db: &DatabaseConnection, category_id: i64) -> Result<()> {
    let existing = get_category_by_id(db, category_id)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Category",
            id: category_id.to_string(),
        })?;

    existing.delete(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};

    #[tokio::test]
    async fn test_get_category_surfaces_database_errors() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_errors(vec![DbErr::Custom("connection reset".to_string())])
            .into_connection();

        let result = get_category_by_id(&db, 1).await;
        assert!(matches!(result, Err(Error::Database(_))));
    }

    #[tokio::test]
    async fn test_create_category_derives_slug() {
        let db = setup_test_db().await.unwrap();

        let created = create_category(
            &db,
            CategoryInput {
                name: "School News & Events".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(created.slug, "school-news-events");
    }

    #[tokio::test]
    async fn test_create_category_validation() {
        let db = setup_test_db().await.unwrap();

        let result = create_category(
            &db,
            CategoryInput {
                name: "   ".to_string(),
            },
        )
        .await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_same_title_sequence_gets_suffixes() {
        let db = setup_test_db().await.unwrap();

        let mut slugs = Vec::new();
        for _ in 0..3 {
            let created = create_category(
                &db,
                CategoryInput {
                    name: "Sports".to_string(),
                },
            )
            .await
            .unwrap();
            slugs.push(created.slug);
        }

        assert_eq!(slugs, vec!["sports", "sports-1", "sports-2"]);
    }

    #[tokio::test]
    async fn test_update_with_same_name_keeps_slug() {
        let db = setup_test_db().await.unwrap();

        let created = create_category(
            &db,
            CategoryInput {
                name: "Announcements".to_string(),
            },
        )
        .await
        .unwrap();

        let updated = update_category(
            &db,
            created.id,
            CategoryUpdate {
                name: Some("Announcements".to_string()),
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.slug, created.slug);
    }

    #[tokio::test]
    async fn test_update_colliding_name_gets_suffix() {
        let db = setup_test_db().await.unwrap();

        create_category(
            &db,
            CategoryInput {
                name: "Sports".to_string(),
            },
        )
        .await
        .unwrap();
        let other = create_category(
            &db,
            CategoryInput {
                name: "Academics".to_string(),
            },
        )
        .await
        .unwrap();

        let updated = update_category(
            &db,
            other.id,
            CategoryUpdate {
                name: Some("Sports".to_string()),
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.slug, "sports-1");
    }

    #[tokio::test]
    async fn test_update_none_retains_name() {
        let db = setup_test_db().await.unwrap();

        let created = create_category(
            &db,
            CategoryInput {
                name: "Alumni".to_string(),
            },
        )
        .await
        .unwrap();

        let updated = update_category(&db, created.id, CategoryUpdate::default())
            .await
            .unwrap();
        assert_eq!(updated.name, "Alumni");
        assert_eq!(updated.slug, "alumni");
    }

    #[tokio::test]
    async fn test_update_missing_category() {
        let db = setup_test_db().await.unwrap();

        let result = update_category(&db, 999, CategoryUpdate::default()).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_category() {
        let db = setup_test_db().await.unwrap();

        let created = create_category(
            &db,
            CategoryInput {
                name: "Temporary".to_string(),
            },
        )
        .await
        .unwrap();

        delete_category(&db, created.id).await.unwrap();
        assert!(get_category_by_id(&db, created.id).await.unwrap().is_none());

        let result = delete_category(&db, created.id).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_categories_search() {
        let db = setup_test_db().await.unwrap();
        create_category(
            &db,
            CategoryInput {
                name: "Sports".to_string(),
            },
        )
        .await
        .unwrap();
        create_category(
            &db,
            CategoryInput {
                name: "Academics".to_string(),
            },
        )
        .await
        .unwrap();

        let hits = list_categories(&db, Some("spo"), 1).await.unwrap();
        assert_eq!(hits.total_items, 1);
        assert_eq!(hits.items[0].name, "Sports");

        let none = list_categories(&db, Some("zzz"), 1).await.unwrap();
        assert_eq!(none.total_items, 0);
        assert!(none.items.is_empty());

        // Blank search applies no filter.
        let all = list_categories(&db, Some("   "), 1).await.unwrap();
        assert_eq!(all.total_items, 2);
    }
}
