//! Shared test utilities for the CMS core.
//!
//! This module provides common helper functions for setting up test
//! databases, temporary blob stores, and entities with sensible defaults.

use crate::{
    core::{article, category, user},
    entities,
    errors::Result,
    storage::FileStore,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a blob store rooted in a fresh temp directory. The directory
/// guard must be kept alive for the duration of the test.
///
/// # Panics
/// Panics if the temp directory cannot be created.
#[allow(clippy::unwrap_used)]
pub fn setup_test_store() -> (tempfile::TempDir, FileStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    (dir, store)
}

/// Creates a test category with the given name.
pub async fn create_test_category(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::category::Model> {
    category::create_category(
        db,
        category::CategoryInput {
            name: name.to_string(),
        },
    )
    .await
}

/// Creates an admin test user with the given email and no avatar.
pub async fn create_test_user(
    db: &DatabaseConnection,
    email: &str,
) -> Result<entities::user::Model> {
    let (_dir, store) = setup_test_store();
    user::create_user(
        db,
        &store,
        user::UserInput {
            name: "Test User".to_string(),
            email: email.to_string(),
            password: "hashed-password".to_string(),
            is_admin: true,
        },
        None,
    )
    .await
}

/// Builds a published article input with default title and body.
pub fn test_article_input(user_id: i64, category_id: i64) -> article::ArticleInput {
    article::ArticleInput {
        title: "School Wins Regional Cup".to_string(),
        body: "Full match report.".to_string(),
        excerpt: None,
        user_id,
        category_id,
        is_published: true,
    }
}
