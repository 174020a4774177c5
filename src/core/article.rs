//! Article business logic - listing, lookup and persistence of posts.
//!
//! Articles carry the full recurring pattern: filtered paging (search plus
//! category and published filters), slug uniqueness against the articles
//! table, and a file-backed cover image replaced per the blob-store rules.

use crate::{
    core::{
        pager::{self, Page},
        slug,
    },
    entities::{Article, Category, User, article},
    errors::{Error, Result},
    storage::{FileStore, Upload},
    validate::{self, ValidationErrors},
};
use sea_orm::{Condition, PaginatorTrait, QueryOrder, Set, prelude::*};

/// Namespace the blob store files article covers under.
const IMAGE_NAMESPACE: &str = "articles";

/// Optional listing filters; absent filters are simply not applied.
#[derive(Debug, Clone, Default)]
pub struct ArticleFilter {
    /// Free-text search against title and body
    pub search: Option<String>,
    /// Exact category match
    pub category_id: Option<i64>,
    /// Published/draft filter
    pub is_published: Option<bool>,
}

/// Validated fields for creating an article.
#[derive(Debug, Clone)]
pub struct ArticleInput {
    pub title: String,
    pub body: String,
    pub excerpt: Option<String>,
    /// Authoring user id, must exist
    pub user_id: i64,
    /// Category id, must exist
    pub category_id: i64,
    pub is_published: bool,
}

impl ArticleInput {
    /// Checks business rules before any write happens.
    ///
    /// # Errors
    /// Returns the collected per-field messages when any rule fails.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate::require(&mut errors, "title", &self.title);
        validate::max_len(&mut errors, "title", &self.title, 200);
        validate::require(&mut errors, "body", &self.body);
        if let Some(excerpt) = &self.excerpt {
            validate::max_len(&mut errors, "excerpt", excerpt, 300);
        }
        errors.into_result()
    }
}

/// Partial update for an article; `None` retains the stored value.
/// The cover image is handled separately through the `Upload` parameter.
#[derive(Debug, Clone, Default)]
pub struct ArticleUpdate {
    pub title: Option<String>,
    pub body: Option<String>,
    pub excerpt: Option<String>,
    pub category_id: Option<i64>,
    pub is_published: Option<bool>,
}

async fn slug_taken(
    db: &DatabaseConnection,
    candidate: String,
    exclude_id: Option<i64>,
) -> Result<bool> {
    let mut query = Article::find().filter(article::Column::Slug.eq(candidate));
    if let Some(id) = exclude_id {
        query = query.filter(article::Column::Id.ne(id));
    }
    Ok(query.count(db).await? > 0)
}

async fn ensure_category_exists(db: &DatabaseConnection, category_id: i64) -> Result<()> {
    Category::find_by_id(category_id)
        .one(db)
        .await?
        .map(|_| ())
        .ok_or_else(|| Error::NotFound {
            entity: "Category",
            id: category_id.to_string(),
        })
}

/// Lists articles newest-first with the optional filters applied.
pub async fn list_articles(
    db: &DatabaseConnection,
    filter: &ArticleFilter,
    page: u64,
) -> Result<Page<article::Model>> {
    let mut select = Article::find().order_by_desc(article::Column::CreatedAt);

    if let Some(term) = filter.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        select = select.filter(
            Condition::any()
                .add(article::Column::Title.contains(term))
                .add(article::Column::Body.contains(term)),
        );
    }
    if let Some(category_id) = filter.category_id {
        select = select.filter(article::Column::CategoryId.eq(category_id));
    }
    if let Some(is_published) = filter.is_published {
        select = select.filter(article::Column::IsPublished.eq(is_published));
    }

    pager::paginate(db, select, page).await
}

/// Finds an article by its primary key.
pub async fn get_article_by_id(
    db: &DatabaseConnection,
    article_id: i64,
) -> Result<Option<article::Model>> {
    Article::find_by_id(article_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds an article by its slug, used by the public site routes.
pub async fn get_article_by_slug(
    db: &DatabaseConnection,
    slug: &str,
) -> Result<Option<article::Model>> {
    Article::find()
        .filter(article::Column::Slug.eq(slug))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates an article; when an upload is supplied the stored path becomes
/// the cover image, otherwise the field stays null.
///
/// # Errors
/// Returns [`Error::Validation`] on bad input and [`Error::NotFound`] when
/// the author or category is missing.
pub async fn create_article(
    db: &DatabaseConnection,
    store: &FileStore,
    input: ArticleInput,
    image: Option<Upload>,
) -> Result<article::Model> {
    input.validate().map_err(Error::Validation)?;

    User::find_by_id(input.user_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "User",
            id: input.user_id.to_string(),
        })?;
    ensure_category_exists(db, input.category_id).await?;

    let base = slug::slugify(&input.title);
    let slug = slug::unique_slug(&base, |candidate| slug_taken(db, candidate, None)).await?;

    let image_path = match image {
        Some(upload) => Some(store.store(IMAGE_NAMESPACE, &upload).await?),
        None => None,
    };

    let now = chrono::Utc::now();
    let model = article::ActiveModel {
        title: Set(input.title.trim().to_string()),
        slug: Set(slug),
        excerpt: Set(input.excerpt),
        body: Set(input.body),
        image: Set(image_path),
        user_id: Set(input.user_id),
        category_id: Set(input.category_id),
        is_published: Set(input.is_published),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    Ok(model.insert(db).await?)
}

/// Applies a partial update. The slug regenerates only when the title
/// changed; a new upload replaces the stored cover (old file removed
/// best-effort), no upload leaves the stored path untouched.
///
/// # Errors
/// Returns [`Error::NotFound`] when the article (or a newly supplied
/// category) does not exist.
pub async fn update_article(
    db: &DatabaseConnection,
    store: &FileStore,
    article_id: i64,
    update: ArticleUpdate,
    image: Option<Upload>,
) -> Result<article::Model> {
    let existing = get_article_by_id(db, article_id)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Article",
            id: article_id.to_string(),
        })?;

    let mut active: article::ActiveModel = existing.clone().into();

    if let Some(title) = update.title {
        let mut errors = ValidationErrors::new();
        validate::require(&mut errors, "title", &title);
        validate::max_len(&mut errors, "title", &title, 200);
        errors.into_result().map_err(Error::Validation)?;

        let title = title.trim().to_string();
        if title != existing.title {
            let base = slug::slugify(&title);
            let slug =
                slug::unique_slug(&base, |candidate| slug_taken(db, candidate, Some(article_id)))
                    .await?;
            active.slug = Set(slug);
        }
        active.title = Set(title);
    }
    if let Some(body) = update.body {
        active.body = Set(body);
    }
    if let Some(excerpt) = update.excerpt {
        active.excerpt = Set(Some(excerpt));
    }
    if let Some(category_id) = update.category_id {
        ensure_category_exists(db, category_id).await?;
        active.category_id = Set(category_id);
    }
    if let Some(is_published) = update.is_published {
        active.is_published = Set(is_published);
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

/// Deletes an article and its stored cover image (best-effort).
///
/// # Errors
/// Returns [`Error::NotFound`] when the article does not exist.
pub async fn delete_article(
    db: &DatabaseConnection,
    store: &FileStore,
    article_id: i64,
) -> Result<()> {
    let existing = get_article_by_id(db, article_id)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Article",
            id: article_id.to_string(),
        })?;

    if let Some(path) = &existing.image {
        store.remove_quiet(path).await;
    }
    existing.delete(db).await?;
    Ok(())
}
