//! List queries, pages and pagination.

use super::product::{CategoryId, Product, SubcategoryId};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Page size used when the caller does not choose one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Category/subcategory restriction of a list query. Both absent means "all products".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<SubcategoryId>,
}

impl CatalogFilter {
    pub fn category(id: impl Into<CategoryId>) -> Self {
        Self {
            category: Some(id.into()),
            subcategory: None,
        }
    }

    pub fn subcategory(id: impl Into<SubcategoryId>) -> Self {
        Self {
            category: None,
            subcategory: Some(id.into()),
        }
    }

    pub fn is_all(&self) -> bool {
        self.category.is_none() && self.subcategory.is_none()
    }
}

/// Parameters of one list fetch. Identifies a cached page.
///
/// `page` and `page_size` are at least 1, also when decoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawListParams")]
pub struct ListParams {
    pub page: u32,
    pub page_size: u32,
    pub filter: CatalogFilter,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawListParams {
    #[serde(default = "first_page")]
    page: u32,
    #[serde(default = "default_page_size")]
    page_size: u32,
    #[serde(default)]
    filter: CatalogFilter,
}

impl From<RawListParams> for ListParams {
    fn from(raw: RawListParams) -> Self {
        ListParams::page(raw.page)
            .with_page_size(raw.page_size)
            .with_filter(raw.filter)
    }
}

fn first_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            filter: CatalogFilter::default(),
        }
    }
}

impl ListParams {
    /// Page `page` of the unfiltered catalog. Page numbers below 1 become 1.
    pub fn page(page: u32) -> Self {
        Self {
            page: page.max(1),
            ..Self::default()
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_filter(mut self, filter: CatalogFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn in_category(mut self, id: impl Into<CategoryId>) -> Self {
        self.filter.category = Some(id.into());
        self
    }

    pub fn in_subcategory(mut self, id: impl Into<SubcategoryId>) -> Self {
        self.filter.subcategory = Some(id.into());
        self
    }
}

/// One page of products as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total: u64,
    pub pages: u32,
    pub current_page: u32,
}

impl ProductPage {
    pub fn new(products: Vec<Product>, total: u64, pages: u32, current_page: u32) -> Self {
        Self {
            products,
            total,
            pages,
            current_page,
        }
    }
}

/// Pagination cursor of the list stream.
///
/// `current_page` is always within `1..=max(pages, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: u64,
    pub pages: u32,
    pub current_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            total: 0,
            pages: 0,
            current_page: 1,
        }
    }
}

impl Pagination {
    /// Builds a pagination cursor, clamping `current_page` into range.
    pub fn new(total: u64, pages: u32, current_page: u32) -> Self {
        Self {
            total,
            pages,
            current_page: current_page.clamp(1, pages.max(1)),
        }
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// The "showing X to Y of Z" range for a page of `page_size` items.
    pub fn showing(&self, page_size: u32) -> ShowingRange {
        if self.total == 0 || page_size == 0 {
            return ShowingRange {
                from: 0,
                to: 0,
                total: self.total,
            };
        }
        let size = u64::from(page_size);
        let start = u64::from(self.current_page.saturating_sub(1)) * size;
        let from = (start + 1).min(self.total);
        let to = (start + size).min(self.total);
        ShowingRange {
            from,
            to,
            total: self.total,
        }
    }
}

/// Range of items displayed on the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowingRange {
    pub from: u64,
    pub to: u64,
    pub total: u64,
}

impl Display for ShowingRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Showing {} to {} of {}", self.from, self.to, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_showing_middle_page() {
        let pagination = Pagination::new(25, 3, 2);
        let range = pagination.showing(10);
        assert_eq!((range.from, range.to, range.total), (11, 20, 25));
        assert_eq!(range.to_string(), "Showing 11 to 20 of 25");
    }

    #[test]
    fn test_showing_last_partial_page() {
        let range = Pagination::new(25, 3, 3).showing(10);
        assert_eq!((range.from, range.to), (21, 25));
    }

    #[test]
    fn test_showing_empty_catalog() {
        let range = Pagination::default().showing(10);
        assert_eq!(range.to_string(), "Showing 0 to 0 of 0");
    }

    #[test]
    fn test_showing_with_zero_current_page() {
        let pagination = Pagination {
            total: 25,
            pages: 3,
            current_page: 0,
        };
        let range = pagination.showing(10);
        assert_eq!((range.from, range.to), (1, 10));
    }

    #[test]
    fn test_new_clamps_current_page() {
        assert_eq!(Pagination::new(25, 3, 9).current_page, 3);
        assert_eq!(Pagination::new(25, 3, 0).current_page, 1);
        assert_eq!(Pagination::new(0, 0, 4).current_page, 1);
    }

    #[test]
    fn test_navigation_flags() {
        let first = Pagination::new(25, 3, 1);
        assert!(first.has_next());
        assert!(!first.has_previous());

        let last = Pagination::new(25, 3, 3);
        assert!(!last.has_next());
        assert!(last.has_previous());
    }

    #[test]
    fn test_list_params_builders() {
        let params = ListParams::page(0)
            .with_page_size(20)
            .in_category("makeup")
            .in_subcategory("lips");
        assert_eq!(params.page, 1);
        assert_eq!(params.page_size, 20);
        assert_eq!(params.filter.category, Some(CategoryId::from("makeup")));
        assert!(!params.filter.is_all());
        assert!(ListParams::default().filter.is_all());
    }

    #[test]
    fn test_decoded_list_params_are_clamped() {
        let params: ListParams =
            serde_json::from_str(r#"{ "page": 0, "pageSize": 0, "filter": { "category": "makeup" } }"#)
                .unwrap();
        assert_eq!(params.page, 1);
        assert_eq!(params.page_size, 1);
        assert_eq!(params.filter, CatalogFilter::category("makeup"));

        let params: ListParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, ListParams::default());
    }

    #[test]
    fn test_list_params_with_filter_replaces_filter() {
        let params = ListParams::page(2)
            .in_category("makeup")
            .with_filter(CatalogFilter::subcategory("lips"));
        assert_eq!(params.filter.category, None);
        assert_eq!(params.filter.subcategory, Some(SubcategoryId::from("lips")));
    }
}
