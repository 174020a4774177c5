//! User business logic - admin accounts behind the panel.
//!
//! Password hashing happens upstream; the core stores whatever hash it is
//! handed. Email addresses must stay unique, checked here before the insert
//! so the caller gets a field-level validation message instead of a raw
//! constraint error.

use crate::{
    core::pager::{self, Page},
    entities::{User, user},
    errors::{Error, Result},
    storage::{FileStore, Upload},
    validate::{self, ValidationErrors},
};
use sea_orm::{Condition, PaginatorTrait, QueryOrder, Set, prelude::*};

const AVATAR_NAMESPACE: &str = "avatars";

/// Optional listing filters; absent filters are simply not applied.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Free-text search against name and email
    pub search: Option<String>,
    /// Admin/non-admin filter
    pub is_admin: Option<bool>,
}

/// Validated fields for creating a user.
#[derive(Debug, Clone)]
pub struct UserInput {
    pub name: String,
    pub email: String,
    /// Pre-hashed password from the auth layer
    pub password: String,
    pub is_admin: bool,
}

impl UserInput {
    /// Checks business rules before any write happens.
    ///
    /// # Errors
    /// Returns the collected per-field messages when any rule fails.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate::require(&mut errors, "name", &self.name);
        validate::max_len(&mut errors, "name", &self.name, 150);
        validate::require(&mut errors, "email", &self.email);
        validate::email_format(&mut errors, "email", &self.email);
        validate::require(&mut errors, "password", &self.password);
        errors.into_result()
    }
}

/// Partial update for a user; `None` retains the stored value.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_admin: Option<bool>,
}

async fn email_taken(
    db: &DatabaseConnection,
    email: &str,
    exclude_id: Option<i64>,
) -> Result<bool> {
    let mut query = User::find().filter(user::Column::Email.eq(email));
    if let Some(id) = exclude_id {
        query = query.filter(user::Column::Id.ne(id));
    }
    Ok(query.count(db).await? > 0)
}

/// Lists users newest-first with the optional filters applied.
pub async fn list_users(
    db: &DatabaseConnection,
    filter: &UserFilter,
    page: u64,
) -> Result<Page<user::Model>> {
    let mut select = User::find().order_by_desc(user::Column::CreatedAt);

    if let Some(term) = filter.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        select = select.filter(
            Condition::any()
                .add(user::Column::Name.contains(term))
                .add(user::Column::Email.contains(term)),
        );
    }
    if let Some(is_admin) = filter.is_admin {
        select = select.filter(user::Column::IsAdmin.eq(is_admin));
    }

    pager::paginate(db, select, page).await
}

/// Finds a user by its primary key.
pub async fn get_user_by_id(db: &DatabaseConnection, user_id: i64) -> Result<Option<user::Model>> {
    User::find_by_id(user_id).one(db).await.map_err(Into::into)
}

/// Finds a user by email, used by the auth layer.
pub async fn get_user_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a user after checking email uniqueness.
///
/// # Errors
/// Returns [`Error::Validation`] on bad input or a taken email.
pub async fn create_user(
    db: &DatabaseConnection,
    store: &FileStore,
    input: UserInput,
    avatar: Option<Upload>,
) -> Result<user::Model> {
    input.validate().map_err(Error::Validation)?;

    // Trim once so the uniqueness probe sees the same value that is stored.
    let email = input.email.trim().to_string();
    if email_taken(db, &email, None).await? {
        let mut errors = ValidationErrors::new();
        errors.add("email", "is already in use");
        return Err(Error::Validation(errors));
    }

    let avatar_path = match avatar {
        Some(upload) => Some(store.store(AVATAR_NAMESPACE, &upload).await?),
        None => None,
    };

    let now = chrono::Utc::now();
    let model = user::ActiveModel {
        name: Set(input.name.trim().to_string()),
        email: Set(email),
        password: Set(input.password),
        avatar: Set(avatar_path),
        is_admin: Set(input.is_admin),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    Ok(model.insert(db).await?)
}

/// Applies a partial update; a changed email is re-checked for uniqueness
/// excluding this row, and the avatar follows the file-replacement rules.
///
/// # Errors
/// Returns [`Error::NotFound`] when the user does not exist.
pub async fn update_user(
    db: &DatabaseConnection,
    store: &FileStore,
    user_id: i64,
    update: UserUpdate,
    avatar: Option<Upload>,
) -> Result<user::Model> {
    let existing = get_user_by_id(db, user_id)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "User",
            id: user_id.to_string(),
        })?;

    let mut active: user::ActiveModel = existing.clone().into();

    if let Some(name) = update.name {
        let mut errors = ValidationErrors::new();
        validate::require(&mut errors, "name", &name);
        validate::max_len(&mut errors, "name", &name, 150);
        errors.into_result().map_err(Error::Validation)?;
        active.name = Set(name.trim().to_string());
    }
    if let Some(email) = update.email {
        let mut errors = ValidationErrors::new();
        validate::require(&mut errors, "email", &email);
        validate::email_format(&mut errors, "email", &email);
        errors.into_result().map_err(Error::Validation)?;

        let email = email.trim().to_string();
        if email_taken(db, &email, Some(user_id)).await? {
            let mut errors = ValidationErrors::new();
            errors.add("email", "is already in use");
            return Err(Error::Validation(errors));
        }
        active.email = Set(email);
    }
    if let Some(password) = update.password {
        active.password = Set(password);
    }
    if let Some(is_admin) = update.is_admin {
        active.is_admin = Set(is_admin);
    }

    if let Some(upload) = avatar {
        let path = store
            .replace(AVATAR_NAMESPACE, existing.avatar.as_deref(), &upload)
            .await?;
        active.avatar = Set(Some(path));
    }

    active.updated_at = Set(chrono::Utc::now());
    Ok(active.update(db).await?)
}

/// Deletes a user and the stored avatar (best-effort).
///
/// # Errors
/// Returns [`Error::NotFound`] when the user does not exist.
pub async fn delete_user(db: &DatabaseConnection, store: &FileStore, user_id: i64) -> Result<()> {
    let existing = get_user_by_id(db, user_id)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "User",
            id: user_id.to_string(),
        })?;

    if let Some(path) = &existing.avatar {
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

    fn input(email: &str) -> UserInput {
        UserInput {
            name: "Admin".to_string(),
            email: email.to_string(),
            password: "hashed".to_string(),
            is_admin: true,
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = setup_test_db().await.unwrap();
        let (_dir, store) = setup_test_store();

        create_user(&db, &store, input("admin@school.example"), None)
            .await
            .unwrap();
        let result = create_user(&db, &store, input("admin@school.example"), None).await;

        match result {
            Err(Error::Validation(errors)) => assert!(errors.field("email").is_some()),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_own_email_is_not_a_collision() {
        let db = setup_test_db().await.unwrap();
        let (_dir, store) = setup_test_store();

        let created = create_user(&db, &store, input("admin@school.example"), None)
            .await
            .unwrap();

        let updated = update_user(
            &db,
            &store,
            created.id,
            UserUpdate {
                email: Some("admin@school.example".to_string()),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();
        assert_eq!(updated.email, "admin@school.example");
    }

    #[tokio::test]
    async fn test_padded_duplicate_email_rejected() {
        let db = setup_test_db().await.unwrap();
        let (_dir, store) = setup_test_store();

        create_user(&db, &store, input("admin@school.example"), None)
            .await
            .unwrap();
        let result = create_user(&db, &store, input("  admin@school.example  "), None).await;

        match result {
            Err(Error::Validation(errors)) => assert!(errors.field("email").is_some()),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_rejects_overlong_name() {
        let db = setup_test_db().await.unwrap();
        let (_dir, store) = setup_test_store();

        let created = create_user(&db, &store, input("admin@school.example"), None)
            .await
            .unwrap();

        let result = update_user(
            &db,
            &store,
            created.id,
            UserUpdate {
                name: Some("x".repeat(151)),
                ..Default::default()
            },
            None,
        )
        .await;
        match result {
            Err(Error::Validation(errors)) => assert!(errors.field("name").is_some()),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_email_rejected() {
        let db = setup_test_db().await.unwrap();
        let (_dir, store) = setup_test_store();

        let result = create_user(&db, &store, input("not-an-email"), None).await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_users_admin_filter_and_search() {
        let db = setup_test_db().await.unwrap();
        let (_dir, store) = setup_test_store();

        create_user(&db, &store, input("admin@school.example"), None)
            .await
            .unwrap();
        let mut editor = input("editor@school.example");
        editor.name = "Editor".to_string();
        editor.is_admin = false;
        create_user(&db, &store, editor, None).await.unwrap();

        let admins = list_users(
            &db,
            &UserFilter {
                is_admin: Some(true),
                ..Default::default()
            },
            1,
        )
        .await
        .unwrap();
        assert_eq!(admins.total_items, 1);

        let by_email = list_users(
            &db,
            &UserFilter {
                search: Some("editor@".to_string()),
                ..Default::default()
            },
            1,
        )
        .await
        .unwrap();
        assert_eq!(by_email.total_items, 1);
        assert_eq!(by_email.items[0].name, "Editor");
    }

    #[tokio::test]
    async fn test_avatar_lifecycle() {
        let db = setup_test_db().await.unwrap();
        let (_dir, store) = setup_test_store();

        let created = create_user(
            &db,
            &store,
            input("admin@school.example"),
            Some(Upload::new("me.png", vec![1])),
        )
        .await
        .unwrap();
        let path = created.avatar.clone().unwrap();
        assert!(store.exists(&path).await);

        delete_user(&db, &store, created.id).await.unwrap();
        assert!(!store.exists(&path).await);
    }
}
