//! Review moderation screen: one list per status as tabs, plus the detail panel.
use leptos::*;

use crate::api::ApiClient;
use crate::components::review_detail::ReviewDetail;
use crate::components::review_list::ReviewList;
use crate::components::toast::Toaster;
use crate::models::review::{Review, ReviewId, ReviewStatus};
use crate::session::Credentials;
use crate::state::moderation::{open_details, ModerationState};

#[component]
pub fn ModerationPage() -> impl IntoView {
    let client = store_value(expect_context::<ApiClient>());
    let credentials = store_value(expect_context::<Credentials>());
    let toaster = expect_context::<Toaster>();

    let state = create_rw_signal(ModerationState::default());
    let refresh = create_memo(move |_| state.with(|s| s.refresh()));
    let active_tab = create_memo(move |_| state.with(|s| s.active_tab()));
    let selected = Signal::derive(move || state.with(|s| s.selected().cloned()));
    let detail_open = Signal::derive(move || state.with(|s| s.is_detail_open()));

    let view_details = move |id: ReviewId| {
        let client = client.get_value();
        let credentials = credentials.get_value();
        spawn_local(async move {
            match open_details(&client, &credentials, id).await {
                Ok(review) => {
                    state.try_update(|s| s.open(review));
                }
                Err(err) => toaster.error(format!("Could not load review #{}: {}", id, err)),
            }
        });
    };

    let on_updated = move |review: Review| {
        state.update(|s| {
            s.record_update(review);
        });
    };

    view! {
        <div class="moderation-page">
            <h1>{ "Review moderation" }</h1>
            <nav class="tabs">
                { ReviewStatus::ALL
                    .into_iter()
                    .map(|tab| view! {
                        <button
                            class="tab"
                            class:active=move || active_tab.get() == tab
                            on:click=move |_| state.update(|s| s.select_tab(tab))
                        >
                            { tab.style().label }
                        </button>
                    })
                    .collect_view() }
            </nav>

            // All three lists stay mounted so each keeps its own filters and
            // follows the refresh counter while hidden.
            { ReviewStatus::ALL
                .into_iter()
                .map(|tab| view! {
                    <div class="tab-panel" class:hidden=move || active_tab.get() != tab>
                        <ReviewList
                            status=tab
                            refresh=refresh
                            on_view=view_details
                            on_updated=on_updated
                        />
                    </div>
                })
                .collect_view() }

            <ReviewDetail
                review=selected
                open=detail_open
                on_close=move |_: ()| state.update(|s| s.close())
                on_updated=on_updated
            />
        </div>
    }
}
