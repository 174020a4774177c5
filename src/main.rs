//! Bootstrap binary: prepares the database and storage for the admin panel.

use dotenvy::dotenv;
use school_cms::{config, core::settings, errors::Result, storage::FileStore};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let app_config = config::app::load_default_config()?;
    info!(database_url = %app_config.database_url, "Loaded application configuration.");

    // 4. Connect and ensure the schema exists
    let db = config::database::create_connection(&app_config.database_url)
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    config::database::create_tables(&db)
        .await
        .inspect(|_| info!("Database tables ensured."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Ensure the settings row and the upload root exist
    let store = FileStore::new(&app_config.upload_root);
    tokio::fs::create_dir_all(store.root()).await?;
    let site = settings::get_or_create_settings(&db).await?;
    info!(school = %site.school_name, "CMS core ready.");

    Ok(())
}
