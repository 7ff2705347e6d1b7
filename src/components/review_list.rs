//! Table of reviews for one status partition.
//! Owns its filter/sort/pagination state and reloads whenever that state,
//! the partition, or the shared refresh counter changes.
use leptos::logging::{error, log};
use leptos::*;
use std::collections::HashSet;

use crate::api::ApiClient;
use crate::components::pagination::Pagination;
use crate::components::review_filters::ReviewFilterBar;
use crate::components::star_rating::StarRating;
use crate::components::status_badge::StatusBadge;
use crate::components::toast::Toaster;
use crate::models::decision::ModerationDecision;
use crate::models::query::{PageSize, ReviewFilters, SortField};
use crate::models::review::{format_timestamp, Review, ReviewId, ReviewStatus};
use crate::session::Credentials;
use crate::state::detail::{submit_decision, RejectForm};
use crate::state::list::{fetch_page, row_actions_enabled, FetchTicket, ReviewListState};

const EXCERPT_CHARS: usize = 80;

/// First `max` characters of a review body, with an ellipsis when cut.
pub fn excerpt(content: Option<&str>, max: usize) -> String {
    let content = content.unwrap_or("").trim();
    if content.chars().count() <= max {
        content.to_string()
    } else {
        let cut: String = content.chars().take(max).collect();
        format!("{}…", cut.trim_end())
    }
}

#[component]
pub fn ReviewList(
    #[prop(into)] status: MaybeSignal<ReviewStatus>,
    #[prop(into)] refresh: Signal<u64>,
    #[prop(into)] on_view: Callback<ReviewId>,
    #[prop(into)] on_updated: Callback<Review>,
) -> impl IntoView {
    let client = store_value(expect_context::<ApiClient>());
    let credentials = store_value(expect_context::<Credentials>());
    let toaster = expect_context::<Toaster>();

    let page_size = client.with_value(|c| c.config().default_page_size);
    let state = create_rw_signal(ReviewListState::new(status.get_untracked(), page_size));
    let query = create_memo(move |_| state.with(|s| s.query().clone()));

    // Row ids with an update in flight.
    let busy = create_rw_signal(HashSet::<ReviewId>::new());
    // Row currently showing the inline rejection form.
    let rejecting = create_rw_signal(None::<(ReviewId, RejectForm)>);

    let load = move |ticket: FetchTicket| {
        let client = client.get_value();
        let credentials = credentials.get_value();
        spawn_local(async move {
            let result = fetch_page(&client, &credentials, &ticket).await;
            if let Err(err) = &result {
                error!("[REVIEWS] Loading {} reviews failed: {}", ticket.status(), err);
            }
            match state.try_update(|s| s.finish_fetch(&ticket, result)) {
                None => log!("[REVIEWS] List gone, dropping response #{}", ticket.seq()),
                Some(false) => log!("[REVIEWS] Dropping stale response #{}", ticket.seq()),
                Some(true) => {}
            }
        });
    };

    create_effect(move |_| {
        let counter = refresh.get();
        let partition = status.get();
        query.with(|_| ());
        let ticket = state
            .try_update(|s| {
                s.set_status(partition);
                s.sync(counter)
            })
            .flatten();
        if let Some(ticket) = ticket {
            load(ticket);
        }
    });

    let reload = move |_| {
        if let Some(ticket) = state.try_update(|s| s.begin_fetch()) {
            load(ticket);
        }
    };

    let decide = move |review: Review, decision: ModerationDecision| {
        let client = client.get_value();
        let credentials = credentials.get_value();
        let id = review.review_id;
        busy.update(|ids| {
            ids.insert(id);
        });
        spawn_local(async move {
            let result = submit_decision(&client, &credentials, &review, &decision).await;
            busy.try_update(|ids| ids.remove(&id));
            match result {
                Ok(updated) => {
                    rejecting.try_update(|r| {
                        if r.as_ref().is_some_and(|(row, _)| *row == id) {
                            *r = None;
                        }
                    });
                    toaster.success(format!("Review #{} {}", id, updated.status));
                    on_updated.call(updated);
                }
                Err(err) => {
                    rejecting.try_update(|r| {
                        if let Some((row, form)) = r.as_mut() {
                            if *row == id {
                                form.fail(&err);
                            }
                        }
                    });
                    toaster.error(format!("Could not update review #{}: {}", id, err));
                }
            }
        });
    };

    let confirm_reject = move |review: Review| {
        let decision = rejecting
            .try_update(|r| match r.as_mut() {
                Some((row, form)) if *row == review.review_id => Some(form.begin_submit()),
                _ => None,
            })
            .flatten();
        match decision {
            Some(Ok(decision)) => decide(review, decision),
            Some(Err(err)) => toaster.error(err.to_string()),
            None => {}
        }
    };

    let sort_header = move |field: SortField| {
        view! {
            <th class="sortable" on:click=move |_| state.update(|s| s.set_sort(field))>
                { field.label() }
                { move || {
                    let q = query.get();
                    if q.sort_by() == field { q.sort_order().arrow() } else { "" }
                }}
            </th>
        }
    };

    let render_row = move |review: Review| {
        let id = review.review_id;
        let row_class = review.status.style().row_class;
        let row = store_value(review.clone());
        let locked = move || !row.with_value(|r| busy.with(|ids| row_actions_enabled(r, ids)));
        let form_open = move || rejecting.with(|r| r.as_ref().is_some_and(|(row, _)| *row == id));
        let approve_review = review.clone();
        let reject_review = review.clone();

        view! {
            <tr class=row_class>
                <td>{ format!("#{id}") }</td>
                <td>{ review.product_name().to_string() }</td>
                <td>{ review.author_name().to_string() }</td>
                <td><StarRating rating=review.rate /></td>
                <td class="excerpt">{ excerpt(review.content.as_deref(), EXCERPT_CHARS) }</td>
                <td>{ review.created_at.as_deref().map(format_timestamp).unwrap_or_default() }</td>
                <td><StatusBadge status=review.status /></td>
                <td class="actions">
                    <button on:click=move |_| on_view.call(id)>{ "View" }</button>
                    <button
                        class="approve"
                        disabled=locked
                        on:click=move |_| decide(approve_review.clone(), ModerationDecision::approve())
                    >
                        { "Approve" }
                    </button>
                    <button
                        class="reject"
                        disabled=move || locked() || form_open()
                        on:click=move |_| {
                            let mut form = RejectForm::default();
                            form.open();
                            rejecting.set(Some((id, form)));
                        }
                    >
                        { "Reject" }
                    </button>
                    <Show when=form_open>
                        {
                            let reject_review = reject_review.clone();
                            view! {
                                <div class="inline-reject">
                                    <input
                                        type="text"
                                        placeholder="Reason for rejection"
                                        prop:value=move || rejecting.with(|r| r.as_ref().map(|(_, f)| f.reason().to_string()).unwrap_or_default())
                                        on:input=move |e| {
                                            let value = event_target_value(&e);
                                            rejecting.update(|r| {
                                                if let Some((_, form)) = r.as_mut() {
                                                    form.set_reason(value);
                                                }
                                            });
                                        }
                                    />
                                    <button
                                        class="reject"
                                        disabled=move || !rejecting.with(|r| r.as_ref().is_some_and(|(_, f)| f.can_submit()))
                                        on:click=move |_| confirm_reject(reject_review.clone())
                                    >
                                        { "Confirm" }
                                    </button>
                                    <button on:click=move |_| rejecting.set(None)>{ "Cancel" }</button>
                                </div>
                            }
                        }
                    </Show>
                </td>
            </tr>
        }
    };

    view! {
        <div class="review-list">
            <div class="review-list-toolbar">
                <ReviewFilterBar
                    on_apply=move |filters: ReviewFilters| state.update(|s| s.apply_filters(filters))
                    on_reset=move |_| state.update(|s| s.reset_filters())
                />
                <button class="refresh" on:click=reload>{ "Refresh" }</button>
            </div>

            <Show when=move || state.with(|s| s.is_loading())>
                <div class="loading">{ "Loading reviews…" }</div>
            </Show>

            { move || state.with(|s| s.error().map(|message| view! {
                <div class="error-message">{ message.to_string() }</div>
            })) }

            <table class="review-table">
                <thead>
                    <tr>
                        <th>{ "ID" }</th>
                        <th>{ "Product" }</th>
                        <th>{ "Customer" }</th>
                        { sort_header(SortField::Rate) }
                        <th>{ "Review" }</th>
                        { sort_header(SortField::CreatedAt) }
                        { sort_header(SortField::Status) }
                        <th>{ "Actions" }</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || state.with(|s| s.rows().to_vec())
                        key=|review| (review.review_id, review.status)
                        children=render_row
                    />
                </tbody>
            </table>

            <Show when=move || state.with(|s| s.rows().is_empty() && s.error().is_none() && !s.is_loading())>
                <div class="empty">{ "No reviews match these filters." }</div>
            </Show>

            <Pagination
                current=Signal::derive(move || query.with(|q| q.page()))
                pages=Signal::derive(move || state.with(|s| s.pages()))
                total=Signal::derive(move || state.with(|s| s.total()))
                page_size=Signal::derive(move || query.with(|q| q.limit()))
                on_page=move |page: u32| state.update(|s| s.set_page(page))
                on_page_size=move |size: PageSize| state.update(|s| s.set_page_size(size))
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::excerpt;

    #[test]
    fn short_content_is_left_alone() {
        assert_eq!(excerpt(Some("  Great mug  "), 80), "Great mug");
        assert_eq!(excerpt(None, 80), "");
    }

    #[test]
    fn long_content_is_cut_on_characters() {
        assert_eq!(excerpt(Some("ééééé ééé"), 6), "ééééé…");
    }
}
