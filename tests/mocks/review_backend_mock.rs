use std::cell::RefCell;
use std::collections::VecDeque;

use storefront_admin::api::ReviewBackend;
use storefront_admin::errors::AppError;
use storefront_admin::models::decision::ModerationDecision;
use storefront_admin::models::query::ReviewQuery;
use storefront_admin::models::review::{Review, ReviewId, ReviewPage, ReviewStatus};
use storefront_admin::session::Credentials;

/// A request the mock saw, with the token it was sent with.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Query {
        status: ReviewStatus,
        page: u32,
        token: Option<String>,
    },
    Fetch {
        id: ReviewId,
    },
    Update {
        id: ReviewId,
        status: ReviewStatus,
        reason: Option<String>,
    },
}

/// Backend that replays queued responses and records every call.
/// Empty queues answer with an empty page / an API error.
#[derive(Default)]
pub struct MockBackend {
    pages: RefCell<VecDeque<Result<ReviewPage, AppError>>>,
    details: RefCell<VecDeque<Result<Review, AppError>>>,
    updates: RefCell<VecDeque<Result<Review, AppError>>>,
    calls: RefCell<Vec<Call>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_page(&self, page: Result<ReviewPage, AppError>) -> &Self {
        self.pages.borrow_mut().push_back(page);
        self
    }

    pub fn queue_detail(&self, review: Result<Review, AppError>) -> &Self {
        self.details.borrow_mut().push_back(review);
        self
    }

    pub fn queue_update(&self, review: Result<Review, AppError>) -> &Self {
        self.updates.borrow_mut().push_back(review);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn update_calls(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, Call::Update { .. }))
            .count()
    }

    pub fn query_calls(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, Call::Query { .. }))
            .count()
    }
}

impl ReviewBackend for MockBackend {
    async fn query_reviews(
        &self,
        credentials: &Credentials,
        status: ReviewStatus,
        query: &ReviewQuery,
    ) -> Result<ReviewPage, AppError> {
        self.calls.borrow_mut().push(Call::Query {
            status,
            page: query.page(),
            token: credentials.token().map(str::to_string),
        });
        self.pages
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(ReviewPage::default()))
    }

    async fn fetch_review(&self, _credentials: &Credentials, id: ReviewId) -> Result<Review, AppError> {
        self.calls.borrow_mut().push(Call::Fetch { id });
        self.details
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::Api("Review not found".into())))
    }

    async fn update_status(
        &self,
        _credentials: &Credentials,
        id: ReviewId,
        decision: &ModerationDecision,
    ) -> Result<Review, AppError> {
        self.calls.borrow_mut().push(Call::Update {
            id,
            status: decision.target_status(),
            reason: decision.reason().map(str::to_string),
        });
        self.updates
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::Api("No update queued".into())))
    }
}

/// A review as the list endpoint would send it.
pub fn review(id: ReviewId, status: ReviewStatus, rate: u8) -> Review {
    serde_json::from_value(serde_json::json!({
        "review_id": id,
        "status": status,
        "rate": rate,
        "content": format!("Review body {id}"),
        "product": {"name": "Ceramic Mug", "sku": "MUG-1"},
        "user": {"username": "lee", "email": "lee@example.com"}
    }))
    .expect("valid review json")
}

pub fn page_of(reviews: Vec<Review>) -> ReviewPage {
    ReviewPage {
        total: reviews.len() as u64,
        pages: if reviews.is_empty() { 0 } else { 1 },
        reviews,
    }
}
