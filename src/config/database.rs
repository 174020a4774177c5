//! Database connection and table creation using SeaORM.
//!
//! Tables are generated straight from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! structs without hand-written SQL.

use crate::entities::{
    Achievement, Article, Banner, Category, Employee, Extracurricular, Facility, Gallery,
    GalleryImage, Major, SchoolProfile, Setting, User,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Establishes a connection to the database at `database_url`.
///
/// # Errors
/// Returns an error if the connection cannot be established.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all tables from the entity definitions. Intended for first-run
/// bootstrap and test databases.
///
/// # Errors
/// Returns an error if any create-table statement fails.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    db.execute(builder.build(&schema.create_table_from_entity(User)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Category)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Article)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Banner)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Achievement)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Extracurricular)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Facility)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Major)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Employee)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Gallery)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(GalleryImage)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(SchoolProfile)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Setting)))
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables_in_memory() {
        let db = create_connection("sqlite::memory:").await.unwrap();
        create_tables(&db).await.unwrap();

        // Every table answers a trivial query once created.
        let _ = User::find().limit(1).all(&db).await.unwrap();
        let _ = Category::find().limit(1).all(&db).await.unwrap();
        let _ = Article::find().limit(1).all(&db).await.unwrap();
        let _ = Gallery::find().limit(1).all(&db).await.unwrap();
        let _ = GalleryImage::find().limit(1).all(&db).await.unwrap();
        let _ = Setting::find().limit(1).all(&db).await.unwrap();
    }
}
