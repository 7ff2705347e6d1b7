//! State behind one review list tab.
//!
//! Fetches are tagged with a sequence number. Only the response to the most
//! recently issued fetch is applied, so a slow answer to an old filter can
//! never overwrite a newer page.

use crate::api::ReviewBackend;
use crate::errors::AppError;
use crate::models::query::{PageSize, ReviewFilters, ReviewQuery, SortField};
use crate::models::review::{Review, ReviewId, ReviewPage, ReviewStatus};
use crate::session::Credentials;
use std::collections::HashSet;

/// Most page buttons shown at once.
pub const PAGE_WINDOW: u32 = 5;

/// One issued fetch: what to ask for and which sequence number it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    status: ReviewStatus,
    query: ReviewQuery,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn status(&self) -> ReviewStatus {
        self.status
    }

    pub fn query(&self) -> &ReviewQuery {
        &self.query
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewListState {
    status: ReviewStatus,
    query: ReviewQuery,
    rows: Vec<Review>,
    total: u64,
    pages: u32,
    error: Option<String>,
    loading: bool,
    issued: u64,
    last_requested: Option<(ReviewStatus, ReviewQuery)>,
    refresh_seen: u64,
}

impl ReviewListState {
    pub fn new(status: ReviewStatus, page_size: PageSize) -> Self {
        Self {
            status,
            query: ReviewQuery::with_page_size(page_size),
            rows: Vec::new(),
            total: 0,
            pages: 0,
            error: None,
            loading: false,
            issued: 0,
            last_requested: None,
            refresh_seen: 0,
        }
    }

    pub fn status(&self) -> ReviewStatus {
        self.status
    }

    pub fn query(&self) -> &ReviewQuery {
        &self.query
    }

    pub fn rows(&self) -> &[Review] {
        &self.rows
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn pages(&self) -> u32 {
        self.pages
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_status(&mut self, status: ReviewStatus) {
        self.status = status;
    }

    pub fn apply_filters(&mut self, filters: ReviewFilters) {
        self.query.apply_filters(filters);
    }

    pub fn reset_filters(&mut self) {
        self.query.reset_filters();
    }

    pub fn set_sort(&mut self, field: SortField) {
        self.query.set_sort(field);
    }

    pub fn set_page(&mut self, page: u32) {
        self.query.set_page(page);
    }

    pub fn set_page_size(&mut self, size: PageSize) {
        self.query.set_page_size(size);
    }

    /// Decides whether the view needs a new page.
    ///
    /// A fetch is issued the first time, whenever partition or query differ
    /// from the last request, and once for every increase of the external
    /// refresh counter.
    pub fn sync(&mut self, refresh: u64) -> Option<FetchTicket> {
        let refreshed = refresh > self.refresh_seen;
        if refreshed {
            self.refresh_seen = refresh;
        }
        let changed = self.last_requested.as_ref() != Some(&(self.status, self.query.clone()));
        if refreshed || changed {
            Some(self.begin_fetch())
        } else {
            None
        }
    }

    /// Issues a fetch unconditionally, e.g. for a manual refresh.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        self.loading = true;
        self.last_requested = Some((self.status, self.query.clone()));
        FetchTicket {
            seq: self.issued,
            status: self.status,
            query: self.query.clone(),
        }
    }

    /// Applies a response. Returns `false` when the ticket has been superseded
    /// and the response was dropped.
    pub fn finish_fetch(&mut self, ticket: &FetchTicket, result: Result<ReviewPage, AppError>) -> bool {
        if ticket.seq != self.issued {
            return false;
        }
        self.loading = false;
        match result {
            Ok(page) => {
                self.rows = page
                    .reviews
                    .into_iter()
                    .filter(|review| review.status == ticket.status)
                    .collect();
                self.total = page.total;
                self.pages = page.pages;
                self.error = None;
                // The list shrank under us; step back to its last page, which
                // changes the query and so triggers the next sync.
                let last = self.pages.max(1);
                if self.query.page() > last {
                    self.query.set_page(last);
                }
            }
            Err(err) => {
                self.rows.clear();
                self.total = 0;
                self.pages = 0;
                self.error = Some(err.to_string());
            }
        }
        true
    }

    pub fn page_window(&self) -> Vec<u32> {
        page_window(self.query.page(), self.pages)
    }
}

/// Page numbers to show: at most [`PAGE_WINDOW`], centred on `current` and
/// clamped to `1..=total_pages`.
pub fn page_window(current: u32, total_pages: u32) -> Vec<u32> {
    if total_pages == 0 {
        return Vec::new();
    }
    let width = PAGE_WINDOW.min(total_pages);
    let current = current.clamp(1, total_pages);
    let mut start = current.saturating_sub(PAGE_WINDOW / 2).max(1);
    let mut end = start + width - 1;
    if end > total_pages {
        end = total_pages;
        start = end + 1 - width;
    }
    (start..=end).collect()
}

/// Approve/Reject on a row are live only for pending reviews with no update
/// already in flight.
pub fn row_actions_enabled(review: &Review, busy: &HashSet<ReviewId>) -> bool {
    review.is_pending() && !busy.contains(&review.review_id)
}

/// Runs the request described by a ticket.
pub async fn fetch_page<B: ReviewBackend>(
    backend: &B,
    credentials: &Credentials,
    ticket: &FetchTicket,
) -> Result<ReviewPage, AppError> {
    backend
        .query_reviews(credentials, ticket.status(), ticket.query())
        .await
}
