//! Settings repository - the explicit replacement for a global
//! "current settings" accessor.
//!
//! Handlers that need site settings receive the connection and call
//! `get_or_create_settings`, which inserts a default row the first time the
//! table is touched. There is exactly one row in practice; the functions
//! always operate on the oldest row.

use crate::{
    entities::{Setting, setting},
    errors::{Error, Result},
    storage::{FileStore, Upload},
    validate::{self, ValidationErrors},
};
use sea_orm::{QueryOrder, Set, prelude::*};

const LOGO_NAMESPACE: &str = "settings";

/// School name used when the settings row is first created.
const DEFAULT_SCHOOL_NAME: &str = "Unnamed School";

/// Partial update for the settings row; `None` retains the stored value.
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    pub school_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl SettingsUpdate {
    /// Checks business rules for the provided fields.
    ///
    /// # Errors
    /// Returns the collected per-field messages when any rule fails.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(school_name) = &self.school_name {
            validate::require(&mut errors, "school_name", school_name);
            validate::max_len(&mut errors, "school_name", school_name, 200);
        }
        if let Some(email) = &self.email {
            validate::email_format(&mut errors, "email", email);
        }
        errors.into_result()
    }
}

/// Returns the settings row, inserting a default one when none exists yet.
pub async fn get_or_create_settings(db: &DatabaseConnection) -> Result<setting::Model> {
    if let Some(existing) = Setting::find()
        .order_by_asc(setting::Column::Id)
        .one(db)
        .await?
    {
        return Ok(existing);
    }

    let now = chrono::Utc::now();
    let model = setting::ActiveModel {
        school_name: Set(DEFAULT_SCHOOL_NAME.to_string()),
        email: Set(None),
        phone: Set(None),
        address: Set(None),
        logo: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    Ok(model.insert(db).await?)
}

/// Applies a partial update to the settings row (created on first use).
/// A supplied logo upload replaces the stored file per the usual rules.
///
/// # Errors
/// Returns [`Error::Validation`] on bad input.
pub async fn update_settings(
    db: &DatabaseConnection,
    store: &FileStore,
    update: SettingsUpdate,
    logo: Option<Upload>,
) -> Result<setting::Model> {
    update.validate().map_err(Error::Validation)?;

    let existing = get_or_create_settings(db).await?;
    let mut active: setting::ActiveModel = existing.clone().into();

    if let Some(school_name) = update.school_name {
        active.school_name = Set(school_name.trim().to_string());
    }
    if let Some(email) = update.email {
        active.email = Set(Some(email));
    }
    if let Some(phone) = update.phone {
        active.phone = Set(Some(phone));
    }
    if let Some(address) = update.address {
        active.address = Set(Some(address));
    }

    if let Some(upload) = logo {
        let path = store
            .replace(LOGO_NAMESPACE, existing.logo.as_deref(), &upload)
            .await?;
        active.logo = Set(Some(path));
    }

    active.updated_at = Set(chrono::Utc::now());
    Ok(active.update(db).await?)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{setup_test_db, setup_test_store};

    #[tokio::test]
    async fn test_get_or_create_is_idempotent() {
        let db = setup_test_db().await.unwrap();

        let first = get_or_create_settings(&db).await.unwrap();
        assert_eq!(first.school_name, DEFAULT_SCHOOL_NAME);

        let second = get_or_create_settings(&db).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(Setting::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_creates_row_when_missing() {
        let db = setup_test_db().await.unwrap();
        let (_dir, store) = setup_test_store();

        let updated = update_settings(
            &db,
            &store,
            SettingsUpdate {
                school_name: Some("Hillside High".to_string()),
                email: Some("office@hillside.example".to_string()),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();

        assert_eq!(updated.school_name, "Hillside High");
        assert_eq!(updated.email.as_deref(), Some("office@hillside.example"));
        assert_eq!(Setting::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_partial_update_retains_other_fields() {
        let db = setup_test_db().await.unwrap();
        let (_dir, store) = setup_test_store();

        update_settings(
            &db,
            &store,
            SettingsUpdate {
                school_name: Some("Hillside High".to_string()),
                phone: Some("555-0100".to_string()),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();

        let updated = update_settings(
            &db,
            &store,
            SettingsUpdate {
                address: Some("1 School Lane".to_string()),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();

        assert_eq!(updated.school_name, "Hillside High");
        assert_eq!(updated.phone.as_deref(), Some("555-0100"));
        assert_eq!(updated.address.as_deref(), Some("1 School Lane"));
    }

    #[tokio::test]
    async fn test_logo_replacement() {
        let db = setup_test_db().await.unwrap();
        let (_dir, store) = setup_test_store();

        let first = update_settings(
            &db,
            &store,
            SettingsUpdate::default(),
            Some(Upload::new("logo.png", vec![1])),
        )
        .await
        .unwrap();
        let old = first.logo.clone().unwrap();

        let second = update_settings(
            &db,
            &store,
            SettingsUpdate::default(),
            Some(Upload::new("logo2.png", vec![2])),
        )
        .await
        .unwrap();

        assert!(!store.exists(&old).await);
        assert!(store.exists(second.logo.as_deref().unwrap()).await);
    }

    #[tokio::test]
    async fn test_invalid_email_rejected() {
        let db = setup_test_db().await.unwrap();
        let (_dir, store) = setup_test_store();

        let result = update_settings(
            &db,
            &store,
            SettingsUpdate {
                email: Some("bad-email".to_string()),
                ..Default::default()
            },
            None,
        )
        .await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }
}
