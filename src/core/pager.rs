//! Page-at-a-time listing support shared by every admin index screen.
//!
//! Filters are applied by the caller on the `Select` before handing it over;
//! this module only runs the count + fetch and packages the navigation
//! metadata. Page numbers are 1-based and the page size is fixed at 10.

use crate::errors::Result;
use sea_orm::{ConnectionTrait, EntityTrait, FromQueryResult, PaginatorTrait, Select};
use serde::Serialize;

/// Fixed page size used by every listing.
pub const PAGE_SIZE: u64 = 10;

/// One page of results plus the metadata a paginator component needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// Records on this page (possibly empty)
    pub items: Vec<T>,
    /// 1-based page number this page represents
    pub page: u64,
    /// Fixed page size
    pub per_page: u64,
    /// Total records matching the filtered query
    pub total_items: u64,
    /// Total pages for that count (0 when nothing matches)
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// True when no records matched the query at all.
    pub fn is_empty(&self) -> bool {
        self.total_items == 0
    }
}

/// Runs a filtered, ordered `Select` through the fixed-size paginator.
/// Page numbers below 1 are clamped to 1; a page past the end simply yields
/// an empty `items` list with the correct totals.
///
/// # Errors
/// Returns an error if the count or fetch query fails.
pub async fn paginate<C, E>(db: &C, select: Select<E>, page: u64) -> Result<Page<E::Model>>
where
    C: ConnectionTrait,
    E: EntityTrait,
    E::Model: FromQueryResult + Send + Sync + 'static,
{
    let page = page.max(1);
    let paginator = select.paginate(db, PAGE_SIZE);
    let totals = paginator.num_items_and_pages().await?;
    let items = paginator.fetch_page(page - 1).await?;

    Ok(Page {
        items,
        page,
        per_page: PAGE_SIZE,
        total_items: totals.number_of_items,
        total_pages: totals.number_of_pages,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::{Category, category};
    use crate::test_utils::{create_test_category, setup_test_db};
    use sea_orm::{ColumnTrait, QueryFilter, QueryOrder};

    #[tokio::test]
    async fn test_paginate_empty_table() {
        let db = setup_test_db().await.unwrap();

        let page = paginate(&db, Category::find(), 1).await.unwrap();
        assert!(page.items.is_empty());
        assert!(page.is_empty());
        assert_eq!(page.total_items, 0);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.per_page, PAGE_SIZE);
    }

    #[tokio::test]
    async fn test_paginate_splits_at_page_size() {
        let db = setup_test_db().await.unwrap();
        for i in 0..13 {
            create_test_category(&db, &format!("Category {i:02}"))
                .await
                .unwrap();
        }

        let select = Category::find().order_by_asc(category::Column::Name);
        let first = paginate(&db, select.clone(), 1).await.unwrap();
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.total_items, 13);
        assert_eq!(first.total_pages, 2);

        let second = paginate(&db, select.clone(), 2).await.unwrap();
        assert_eq!(second.items.len(), 3);
        assert_eq!(second.page, 2);

        // Past-the-end page keeps the totals, just no items.
        let third = paginate(&db, select, 3).await.unwrap();
        assert!(third.items.is_empty());
        assert_eq!(third.total_items, 13);
    }

    #[tokio::test]
    async fn test_paginate_clamps_page_zero() {
        let db = setup_test_db().await.unwrap();
        create_test_category(&db, "Only One").await.unwrap();

        let page = paginate(&db, Category::find(), 0).await.unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.items.len(), 1);
    }

    #[tokio::test]
    async fn test_paginate_with_filter_matching_nothing() {
        let db = setup_test_db().await.unwrap();
        create_test_category(&db, "Sports").await.unwrap();

        let select = Category::find().filter(category::Column::Name.contains("nope"));
        let page = paginate(&db, select, 1).await.unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_items, 0);
    }
}
