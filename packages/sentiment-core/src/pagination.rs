//! Page slicing for list views.

use serde::Serialize;

/// One page of a longer list.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Slice `items` into the requested page.
///
/// Out-of-range page numbers are clamped into `[1, total_pages]`; an empty
/// list still has one (empty) page. A `per_page` of zero is treated as one.
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> Page<&T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * per_page;
    let end = (start + per_page).min(total_items);

    Page {
        items: items[start..end].iter().collect(),
        page,
        per_page,
        total_pages,
        total_items,
    }
}
