use futures::executor::block_on;
use std::collections::HashSet;

use storefront_admin::errors::AppError;
use storefront_admin::models::decision::ModerationDecision;
use storefront_admin::models::query::{PageSize, ReviewFilters};
use storefront_admin::models::review::ReviewStatus;
use storefront_admin::session::Credentials;
use storefront_admin::state::detail::{submit_decision, RejectForm};
use storefront_admin::state::list::{fetch_page, row_actions_enabled, ReviewListState};
use storefront_admin::state::moderation::{open_details, ModerationState};

mod mocks;
use mocks::review_backend_mock::{page_of, review, Call, MockBackend};

fn creds() -> Credentials {
    Credentials::bearer("session-token")
}

// Issues a sync and, if a fetch is due, runs it against the backend.
fn sync_and_load(list: &mut ReviewListState, backend: &MockBackend, refresh: u64) -> bool {
    match list.sync(refresh) {
        Some(ticket) => {
            let result = block_on(fetch_page(backend, &creds(), &ticket));
            list.finish_fetch(&ticket, result)
        }
        None => false,
    }
}

#[test]
fn pending_tab_renders_the_single_row_from_the_backend() {
    let backend = MockBackend::new();
    backend.queue_page(Ok(page_of(vec![review(1, ReviewStatus::Pending, 4)])));

    let mut list = ReviewListState::new(ReviewStatus::Pending, PageSize::Ten);
    assert!(sync_and_load(&mut list, &backend, 0));

    assert_eq!(list.rows().len(), 1);
    let row = &list.rows()[0];
    assert_eq!(row.star_count(), 4);
    assert!(row_actions_enabled(row, &HashSet::new()));
    assert!(!row_actions_enabled(row, &HashSet::from([row.review_id])));
    assert_eq!(list.page_window(), vec![1]);
    assert_eq!(
        backend.calls(),
        vec![Call::Query {
            status: ReviewStatus::Pending,
            page: 1,
            token: Some("session-token".into())
        }]
    );
}

#[test]
fn blank_rejection_reason_never_reaches_the_backend() {
    let backend = MockBackend::new();
    let mut form = RejectForm::default();
    form.open();
    form.set_reason("   ".into());

    assert!(!form.can_submit());
    let err = form.begin_submit().unwrap_err();
    assert!(err.is_validation());
    assert!(ModerationDecision::reject("").is_err());
    assert_eq!(backend.update_calls(), 0);
}

#[test]
fn approval_bumps_refresh_and_each_tab_reloads_once() {
    let backend = MockBackend::new();
    let pending = review(1, ReviewStatus::Pending, 4);
    backend.queue_update(Ok(serde_json::from_str(r#"{"review_id":1,"status":"approved"}"#).unwrap()));

    let mut page = ModerationState::default();
    let mut tabs: Vec<ReviewListState> = ReviewStatus::ALL
        .iter()
        .map(|&status| ReviewListState::new(status, PageSize::Ten))
        .collect();
    for tab in &mut tabs {
        assert!(sync_and_load(tab, &backend, page.refresh()));
    }
    let queries_before = backend.query_calls();

    page.open(pending.clone());
    let updated = block_on(submit_decision(
        &backend,
        &creds(),
        &pending,
        &ModerationDecision::approve(),
    ))
    .expect("approval succeeds");
    assert_eq!(updated.status, ReviewStatus::Approved);
    // Detail fields survive a partial update response.
    assert_eq!(updated.product_name(), "Ceramic Mug");

    let before = page.refresh();
    page.record_update(updated);
    page.close();
    assert_eq!(page.refresh(), before + 1);
    assert!(!page.is_detail_open());
    assert_eq!(page.selected().map(|r| r.status), Some(ReviewStatus::Approved));

    for tab in &mut tabs {
        assert!(sync_and_load(tab, &backend, page.refresh()));
        assert!(!sync_and_load(tab, &backend, page.refresh()));
    }
    assert_eq!(backend.query_calls(), queries_before + tabs.len());
}

#[test]
fn rejection_sends_trimmed_reason() {
    let backend = MockBackend::new();
    let pending = review(7, ReviewStatus::Pending, 1);
    backend.queue_update(Ok(serde_json::from_str(
        r#"{"review_id":7,"status":"rejected","reason":"Hate speech"}"#,
    )
    .unwrap()));

    let mut form = RejectForm::default();
    form.open();
    form.set_reason("  Hate speech ".into());
    let decision = form.begin_submit().unwrap();

    let updated = block_on(submit_decision(&backend, &creds(), &pending, &decision)).unwrap();
    form.succeed();

    assert_eq!(updated.rejection_reason.as_deref(), Some("Hate speech"));
    assert!(!form.is_open());
    assert_eq!(
        backend.calls(),
        vec![Call::Update {
            id: 7,
            status: ReviewStatus::Rejected,
            reason: Some("Hate speech".into())
        }]
    );
}

#[test]
fn failed_rejection_keeps_the_form_for_retry() {
    let backend = MockBackend::new();
    let pending = review(3, ReviewStatus::Pending, 2);
    backend.queue_update(Err(AppError::Network("connection reset".into())));

    let mut form = RejectForm::default();
    form.open();
    form.set_reason("Spam".into());
    let decision = form.begin_submit().unwrap();

    let err = block_on(submit_decision(&backend, &creds(), &pending, &decision)).unwrap_err();
    form.fail(&err);

    assert!(form.is_open());
    assert!(form.can_submit());
    assert_eq!(form.reason(), "Spam");
}

#[test]
fn already_moderated_reviews_are_refused_locally() {
    let backend = MockBackend::new();
    let approved = review(4, ReviewStatus::Approved, 5);

    let err = block_on(submit_decision(
        &backend,
        &creds(),
        &approved,
        &ModerationDecision::reject("too late").unwrap(),
    ))
    .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(backend.update_calls(), 0);
}

#[test]
fn backend_failure_replaces_earlier_rows_with_the_message() {
    let backend = MockBackend::new();
    backend
        .queue_page(Ok(page_of(vec![review(1, ReviewStatus::Pending, 3)])))
        .queue_page(Err(AppError::Api("DB error".into())));

    let mut list = ReviewListState::new(ReviewStatus::Pending, PageSize::Ten);
    sync_and_load(&mut list, &backend, 0);
    assert_eq!(list.rows().len(), 1);

    sync_and_load(&mut list, &backend, 1);
    assert!(list.rows().is_empty());
    assert_eq!(list.error(), Some("DB error"));
}

#[test]
fn filter_on_a_later_page_requests_page_one() {
    let backend = MockBackend::new();
    let mut list = ReviewListState::new(ReviewStatus::Approved, PageSize::TwentyFive);
    list.set_page(4);
    sync_and_load(&mut list, &backend, 0);

    list.apply_filters(ReviewFilters {
        search: "delivery".into(),
        ..Default::default()
    });
    sync_and_load(&mut list, &backend, 0);

    let pages: Vec<u32> = backend
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::Query { page, .. } => Some(page),
            _ => None,
        })
        .collect();
    assert_eq!(pages, vec![4, 1]);
}

#[test]
fn view_details_opens_only_on_success() {
    let backend = MockBackend::new();
    backend
        .queue_detail(Err(AppError::Api("Review not found".into())))
        .queue_detail(Ok(review(9, ReviewStatus::Pending, 5)));

    let mut page = ModerationState::default();

    if let Ok(found) = block_on(open_details(&backend, &creds(), 9)) {
        page.open(found);
    }
    assert!(!page.is_detail_open());

    if let Ok(found) = block_on(open_details(&backend, &creds(), 9)) {
        page.open(found);
    }
    assert!(page.is_detail_open());
    assert_eq!(page.selected().map(|r| r.author_name().to_string()), Some("lee".into()));
    assert_eq!(backend.calls(), vec![Call::Fetch { id: 9 }, Call::Fetch { id: 9 }]);
}
