//! The current search query.

/// Holds the query string typed into the search box.
///
/// Plain scalar state: last write wins, no validation or normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    query: String,
}

impl SearchState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            query: String::new(),
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }
}
