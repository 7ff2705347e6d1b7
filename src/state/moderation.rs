use leptos::logging::error;

use crate::api::ReviewBackend;
use crate::errors::AppError;
use crate::models::review::{Review, ReviewId, ReviewStatus};
use crate::session::Credentials;

/// Page-level moderation state shared by the three status tabs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModerationState {
    active_tab: ReviewStatus,
    selected: Option<Review>,
    detail_open: bool,
    refresh: u64,
}

impl ModerationState {
    pub fn active_tab(&self) -> ReviewStatus {
        self.active_tab
    }

    pub fn selected(&self) -> Option<&Review> {
        self.selected.as_ref()
    }

    pub fn is_detail_open(&self) -> bool {
        self.detail_open && self.selected.is_some()
    }

    /// Lists reload whenever this grows.
    pub fn refresh(&self) -> u64 {
        self.refresh
    }

    pub fn select_tab(&mut self, tab: ReviewStatus) {
        self.active_tab = tab;
    }

    pub fn open(&mut self, review: Review) {
        self.selected = Some(review);
        self.detail_open = true;
    }

    pub fn close(&mut self) {
        self.detail_open = false;
    }

    /// Called after any successful status change. Bumps the refresh counter
    /// and keeps the selection in step with the new record.
    pub fn record_update(&mut self, review: Review) -> u64 {
        if self
            .selected
            .as_ref()
            .is_some_and(|selected| selected.review_id == review.review_id)
        {
            self.selected = Some(review);
        }
        self.refresh += 1;
        self.refresh
    }
}

/// Loads the full record behind a list row. The list summary may omit
/// detail fields, so this always goes back to the backend.
pub async fn open_details<B: ReviewBackend>(
    backend: &B,
    credentials: &Credentials,
    id: ReviewId,
) -> Result<Review, AppError> {
    backend.fetch_review(credentials, id).await.inspect_err(|err| {
        error!("[MODERATION] Could not load review #{}: {}", id, err);
    })
}
