use std::future::Future;

use crate::error::Result;

/// Walks numbered pages until one comes back short.
pub struct Paginator {
    per_page: u32,
}

impl Paginator {
    pub fn new(per_page: u32) -> Self {
        Self {
            per_page: per_page.max(1),
        }
    }

    /// Calls `fetch_page(page, per_page)` starting at page 1. Any page error aborts the walk.
    pub async fn fetch_all<T, F, Fut>(&self, mut fetch_page: F) -> Result<Vec<T>>
    where
        F: FnMut(u32, u32) -> Fut,
        Fut: Future<Output = Result<Vec<T>>>,
    {
        let mut all_items = Vec::new();
        let mut page = 1;

        loop {
            tracing::debug!("Fetching page {} ({} per page)", page, self.per_page);
            let items = fetch_page(page, self.per_page).await?;
            let items_count = items.len();
            all_items.extend(items);

            if items_count < self.per_page as usize {
                break;
            }

            page += 1;
        }

        Ok(all_items)
    }
}
