use serde::{Deserialize, Serialize};

use crate::models::review::ReviewStatus;

/// Columns the review list can be ordered by.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    CreatedAt,
    Rate,
    Status,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::Rate => "rate",
            SortField::Status => "status",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortField::CreatedAt => "Date",
            SortField::Rate => "Rating",
            SortField::Status => "Status",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortOrder::Asc => "▲",
            SortOrder::Desc => "▼",
        }
    }
}

/// The fixed page sizes the list offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    #[default]
    Ten,
    TwentyFive,
    Fifty,
    Hundred,
}

impl PageSize {
    pub const ALL: [PageSize; 4] = [
        PageSize::Ten,
        PageSize::TwentyFive,
        PageSize::Fifty,
        PageSize::Hundred,
    ];

    pub fn get(self) -> u32 {
        match self {
            PageSize::Ten => 10,
            PageSize::TwentyFive => 25,
            PageSize::Fifty => 50,
            PageSize::Hundred => 100,
        }
    }

    pub fn from_u32(value: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.get() == value)
    }
}

/// Filter inputs as the user typed them, before they are applied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReviewFilters {
    pub search: String,
    pub product: String,
    pub rating: Option<u8>,
}

impl ReviewFilters {
    /// Trims text and drops ratings outside 1..=5.
    pub fn cleaned(self) -> Self {
        Self {
            search: self.search.trim().to_string(),
            product: self.product.trim().to_string(),
            rating: self.rating.filter(|r| (1..=5).contains(r)),
        }
    }
}

/// Filter, sort and pagination state of one review list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewQuery {
    filters: ReviewFilters,
    sort_by: SortField,
    sort_order: SortOrder,
    page: u32,
    limit: PageSize,
}

impl Default for ReviewQuery {
    fn default() -> Self {
        Self::with_page_size(PageSize::default())
    }
}

impl ReviewQuery {
    pub fn with_page_size(limit: PageSize) -> Self {
        Self {
            filters: ReviewFilters::default(),
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
            page: 1,
            limit,
        }
    }

    pub fn filters(&self) -> &ReviewFilters {
        &self.filters
    }

    pub fn sort_by(&self) -> SortField {
        self.sort_by
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> PageSize {
        self.limit
    }

    pub fn apply_filters(&mut self, filters: ReviewFilters) {
        self.filters = filters.cleaned();
        self.page = 1;
    }

    pub fn reset_filters(&mut self) {
        self.filters = ReviewFilters::default();
        self.page = 1;
    }

    /// Picking the active column again flips direction; a new column starts
    /// descending. The page is kept.
    pub fn set_sort(&mut self, field: SortField) {
        if self.sort_by == field {
            self.sort_order = self.sort_order.flipped();
        } else {
            self.sort_by = field;
            self.sort_order = SortOrder::Desc;
        }
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn set_page_size(&mut self, limit: PageSize) {
        self.limit = limit;
        self.page = 1;
    }

    /// Query-string pairs for one status partition. Empty filters are left out.
    pub fn to_params(&self, status: ReviewStatus) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.get().to_string()),
            ("sort_by", self.sort_by.as_str().to_string()),
            ("sort_order", self.sort_order.as_str().to_string()),
            ("status", status.as_str().to_string()),
        ];
        if !self.filters.search.is_empty() {
            params.push(("search", self.filters.search.clone()));
        }
        if !self.filters.product.is_empty() {
            params.push(("product", self.filters.product.clone()));
        }
        if let Some(rating) = self.filters.rating {
            params.push(("rating", rating.to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_page(page: u32) -> ReviewQuery {
        let mut query = ReviewQuery::default();
        query.set_page(page);
        query
    }

    #[test]
    fn applying_any_filter_returns_to_page_one() {
        let combos = [
            ReviewFilters::default(),
            ReviewFilters { search: "late".into(), ..Default::default() },
            ReviewFilters { product: "mug".into(), ..Default::default() },
            ReviewFilters { rating: Some(3), ..Default::default() },
            ReviewFilters { search: "x".into(), product: "y".into(), rating: Some(5) },
        ];
        for filters in combos {
            let mut query = on_page(7);
            query.apply_filters(filters.clone());
            assert_eq!(query.page(), 1, "filters {filters:?}");
        }

        let mut query = on_page(4);
        query.reset_filters();
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn sort_keeps_the_page_and_toggles_on_repeat() {
        let mut query = on_page(3);
        query.set_sort(SortField::CreatedAt);
        assert_eq!(query.sort_order(), SortOrder::Asc);
        assert_eq!(query.page(), 3);

        query.set_sort(SortField::Rate);
        assert_eq!(query.sort_by(), SortField::Rate);
        assert_eq!(query.sort_order(), SortOrder::Desc);
        assert_eq!(query.page(), 3);
    }

    #[test]
    fn page_size_change_resets_page_and_page_is_never_zero() {
        let mut query = on_page(5);
        query.set_page_size(PageSize::Hundred);
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit().get(), 100);

        query.set_page(0);
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn params_skip_blank_filters() {
        let mut query = ReviewQuery::default();
        query.apply_filters(ReviewFilters {
            search: "  ".into(),
            product: " lamp ".into(),
            rating: Some(9),
        });
        let params = query.to_params(ReviewStatus::Rejected);
        assert!(params.contains(&("status", "rejected".to_string())));
        assert!(params.contains(&("product", "lamp".to_string())));
        assert!(params.contains(&("sort_order", "DESC".to_string())));
        assert!(params.iter().all(|(key, _)| *key != "search" && *key != "rating"));
    }

    #[test]
    fn only_fixed_page_sizes_exist() {
        assert_eq!(PageSize::from_u32(25), Some(PageSize::TwentyFive));
        assert_eq!(PageSize::from_u32(20), None);
    }
}
