//! Page slicing. Never fails: out-of-range pages come back empty with valid
//! metadata.

use serde::Serialize;

/// 1-indexed page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

impl PageRequest {
    pub const DEFAULT_LIMIT: usize = 10;

    /// A limit of zero is treated as one.
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            page,
            limit: limit.max(1),
        }
    }

    pub fn first(limit: usize) -> Self {
        Self::new(1, limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(Self::DEFAULT_LIMIT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub limit: usize,
}

/// One page of items plus navigation metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Paginated<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

pub fn paginate<T: Clone>(items: &[T], request: PageRequest) -> Paginated<T> {
    let PageRequest { page, limit } = request;
    let limit = limit.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(limit);

    let page_items = match page.checked_sub(1).and_then(|p| p.checked_mul(limit)) {
        Some(start) if start < total_items => {
            let end = start.saturating_add(limit).min(total_items);
            items[start..end].to_vec()
        }
        _ => Vec::new(),
    };

    Paginated {
        items: page_items,
        pagination: Pagination {
            current_page: page,
            total_pages,
            total_items,
            has_next_page: page < total_pages,
            has_previous_page: page > 1,
            limit,
        },
    }
}
