//! Query engine over loaded documents.
//!
//! Everything here is pure: it takes a slice of [`Document`]s and returns new
//! vectors, never touching the file system.
//!
//! | Operation | Function |
//! |-----------|----------|
//! | Filter | [`filter()`] with a [`Filter`] |
//! | Sort | [`sort()`] with a [`Sort`] |
//! | Paginate | [`paginate()`] with a [`PageRequest`] |
//! | Search | [`search()`] |
//! | Related | [`related()`] |
//!
//! [`SearchOptions`] chains them as search → filter → sort → paginate.

mod filter;
mod paginate;
mod related;
mod search;
mod sort;

pub use filter::{Filter, filter};
pub use paginate::{PageRequest, Paginated, Pagination, paginate};
pub use related::{DEFAULT_RELATED_LIMIT, related};
pub use search::{DEFAULT_SEARCH_FIELDS, search};
pub use sort::{Sort, SortOrder, locale_cmp, sort};

use crate::data::Document;
use serde::Serialize;

/// A combined query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
    /// Empty matches everything.
    pub query: String,
    /// Empty means [`DEFAULT_SEARCH_FIELDS`].
    pub fields: Vec<String>,
    pub filter: Filter,
    pub sort: Option<Sort>,
    pub page: Option<PageRequest>,
}

impl SearchOptions {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn page(mut self, page: PageRequest) -> Self {
        self.page = Some(page);
        self
    }

    /// Apply the query to `items`.
    pub fn run<D: Document + Clone>(&self, items: &[D]) -> QueryResult<D> {
        let found = search(items, &self.query, self.fields.as_slice());
        let filtered = filter(&found, &self.filter);
        let sorted = match &self.sort {
            Some(order) => sort(&filtered, order),
            None => filtered,
        };

        match self.page {
            Some(request) => {
                let page = paginate(&sorted, request);
                QueryResult {
                    items: page.items,
                    pagination: Some(page.pagination),
                }
            }
            None => QueryResult {
                items: sorted,
                pagination: None,
            },
        }
    }
}

/// Result of [`SearchOptions::run`]. `pagination` is present exactly when a
/// page was requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult<T> {
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}
