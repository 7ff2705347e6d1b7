use leptos::*;

use crate::api::ApiClient;
use crate::components::star_rating::StarRating;
use crate::components::status_badge::StatusBadge;
use crate::components::toast::Toaster;
use crate::models::decision::ModerationDecision;
use crate::models::review::{format_timestamp, Review};
use crate::session::Credentials;
use crate::state::detail::{submit_decision, RejectForm};

/// Full view of a single review with approve/reject controls.
///
/// Rejection needs a reason: the form has to be opened and filled before the
/// confirm button enables. On success the parent gets the updated record and
/// the panel closes; on failure the form stays as it was.
#[component]
pub fn ReviewDetail(
    #[prop(into)] review: Signal<Option<Review>>,
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_updated: Callback<Review>,
) -> impl IntoView {
    let client = store_value(expect_context::<ApiClient>());
    let credentials = store_value(expect_context::<Credentials>());
    let toaster = expect_context::<Toaster>();

    let form = create_rw_signal(RejectForm::default());
    let approving = create_rw_signal(false);

    // The caller may derive `review` from a larger state; memos keep changes
    // elsewhere in that state from reaching this panel.
    let shown = create_memo(move |_| review.get());
    let shown_id = create_memo(move |_| shown.with(|r| r.as_ref().map(|r| r.review_id)));
    let is_open = create_memo(move |_| open.get());

    // A different review, or closing, discards a half-typed reason.
    create_effect(move |_| {
        shown_id.with(|_| ());
        is_open.with(|_| ());
        form.set(RejectForm::default());
        approving.set(false);
    });

    let send = move |current: Review, decision: ModerationDecision| {
        let client = client.get_value();
        let credentials = credentials.get_value();
        spawn_local(async move {
            let is_reject = matches!(decision, ModerationDecision::Reject { .. });
            match submit_decision(&client, &credentials, &current, &decision).await {
                Ok(updated) => {
                    form.try_update(|f| f.succeed());
                    approving.try_set(false);
                    toaster.success(format!("Review #{} {}", updated.review_id, updated.status));
                    on_updated.call(updated);
                    on_close.call(());
                }
                Err(err) => {
                    if is_reject {
                        form.try_update(|f| f.fail(&err));
                    }
                    approving.try_set(false);
                    toaster.error(format!("Update failed: {}", err));
                }
            }
        });
    };

    let approve = move |_: ev::MouseEvent| {
        if let Some(current) = shown.get_untracked() {
            approving.set(true);
            send(current, ModerationDecision::approve());
        }
    };

    let confirm_reject = move |_: ev::MouseEvent| {
        let Some(current) = shown.get_untracked() else {
            return;
        };
        match form.try_update(|f| f.begin_submit()) {
            Some(Ok(decision)) => send(current, decision),
            Some(Err(err)) => toaster.error(err.to_string()),
            None => {}
        }
    };

    let busy = move || approving.get() || form.with(|f| f.is_submitting());

    view! {
        <Show when=move || is_open.get() && shown.with(|r| r.is_some())>
            {move || shown.get().map(|r| {
                let pending = r.is_pending();
                let product = r.product.clone().unwrap_or_default();
                let author = r.author.clone().unwrap_or_default();
                view! {
                    <div class="modal-backdrop">
                        <div class="review-detail">
                            <header>
                                <h2>{ format!("Review #{}", r.review_id) }</h2>
                                <StatusBadge status=r.status />
                                <button class="close" on:click=move |_| on_close.call(())>{ "×" }</button>
                            </header>

                            <section class="product">
                                { product.image.clone().map(|src| view! { <img src=src alt=product.name.clone() /> }) }
                                <div>
                                    <h3>{ r.product_name().to_string() }</h3>
                                    { product.sku.clone().map(|sku| view! { <p class="sku">{ format!("SKU: {sku}") }</p> }) }
                                    { product.description.clone().map(|d| view! { <p>{ d }</p> }) }
                                </div>
                            </section>

                            <section class="author">
                                <strong>{ r.author_name().to_string() }</strong>
                                { author.email.clone().map(|email| view! { <span class="email">{ email }</span> }) }
                                { r.created_at.as_deref().map(format_timestamp).map(|ts| view! { <time>{ ts }</time> }) }
                            </section>

                            <section class="content">
                                <StarRating rating=r.rate />
                                <p>{ r.content.clone().unwrap_or_else(|| "(no text)".to_string()) }</p>
                            </section>

                            { r.rejection_reason.clone().map(|reason| view! {
                                <section class="rejection-reason">
                                    <h4>{ "Rejection reason" }</h4>
                                    <p>{ reason }</p>
                                </section>
                            }) }

                            <Show when=move || pending>
                                <footer class="detail-actions">
                                    <button class="approve" disabled=busy on:click=approve>{ "Approve" }</button>
                                    <Show
                                        when=move || form.with(|f| f.is_open())
                                        fallback=move || view! {
                                            <button class="reject" disabled=busy on:click=move |_| form.update(|f| f.open())>
                                                { "Reject…" }
                                            </button>
                                        }
                                    >
                                        <div class="reject-form">
                                            <textarea
                                                placeholder="Why is this review rejected?"
                                                prop:value=move || form.with(|f| f.reason().to_string())
                                                on:input=move |e| form.update(|f| f.set_reason(event_target_value(&e)))
                                            />
                                            { move || form.with(|f| f.error().map(|e| view! { <p class="error-message">{ e.to_string() }</p> })) }
                                            <button
                                                class="reject"
                                                disabled=move || !form.with(|f| f.can_submit())
                                                on:click=confirm_reject
                                            >
                                                { "Confirm rejection" }
                                            </button>
                                            <button on:click=move |_| form.update(|f| f.close())>{ "Cancel" }</button>
                                        </div>
                                    </Show>
                                </footer>
                            </Show>
                        </div>
                    </div>
                }
            })}
        </Show>
    }
}
