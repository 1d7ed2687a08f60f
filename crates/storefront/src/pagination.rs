//! Page-by-page and infinite-scroll browsing over a [`ProductRepository`].
//!
//! The API reports no total count, so "is there a next page" is inferred: a
//! page that comes back with fewer than `limit` products is the last one.

use tracing::debug;

use mini_store_core::Product;

use crate::catalog::{CatalogError, ProductRepository};

/// Position in a paged product listing (prev/next buttons).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: u32,
    limit: u32,
}

impl Pager {
    /// Start at page 1. A zero `limit` is raised to 1.
    #[must_use]
    pub fn new(limit: u32) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
        }
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Whether a next page may exist, given how many products the current
    /// page returned.
    #[must_use]
    pub fn has_next(&self, current_page_len: usize) -> bool {
        current_page_len >= self.limit as usize
    }

    /// Move forward; returns `false` without moving when on the last page.
    pub fn next_page(&mut self, current_page_len: usize) -> bool {
        if !self.has_next(current_page_len) {
            return false;
        }
        self.page = self.page.saturating_add(1);
        true
    }

    /// Move back; returns `false` without moving when on page 1.
    pub const fn previous_page(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.page -= 1;
        true
    }

    /// Fetch the current page.
    ///
    /// # Errors
    ///
    /// Propagates repository failures.
    pub async fn fetch<R: ProductRepository>(&self, repo: &R) -> Result<Vec<Product>, CatalogError> {
        repo.list_page(self.page, self.limit).await
    }
}

/// Infinite-scroll accumulation of product pages.
#[derive(Debug, Clone)]
pub struct ProductFeed {
    products: Vec<Product>,
    pages_loaded: u32,
    limit: u32,
    exhausted: bool,
}

impl ProductFeed {
    /// Create an empty feed loading `limit` products per page (at least 1).
    #[must_use]
    pub fn new(limit: u32) -> Self {
        Self {
            products: Vec::new(),
            pages_loaded: 0,
            limit: limit.max(1),
            exhausted: false,
        }
    }

    /// Every product loaded so far, in page order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub const fn pages_loaded(&self) -> u32 {
        self.pages_loaded
    }

    #[must_use]
    pub const fn has_more(&self) -> bool {
        !self.exhausted
    }

    /// Load the next page and append it.
    ///
    /// Returns how many products were appended; zero once the feed is
    /// exhausted (no request is made then). A failed load leaves the feed
    /// unchanged so it can be attempted again.
    ///
    /// # Errors
    ///
    /// Propagates repository failures.
    pub async fn load_next<R: ProductRepository>(&mut self, repo: &R) -> Result<usize, CatalogError> {
        if self.exhausted {
            return Ok(0);
        }

        let next = self.pages_loaded + 1;
        let page = repo.list_page(next, self.limit).await?;
        let loaded = page.len();

        self.pages_loaded = next;
        self.exhausted = loaded < self.limit as usize;
        self.products.extend(page);

        debug!(
            page = next,
            loaded,
            total = self.products.len(),
            exhausted = self.exhausted,
            "Loaded feed page"
        );

        Ok(loaded)
    }
}
