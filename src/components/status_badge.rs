use leptos::*;
use crate::models::review::ReviewStatus;

#[component]
pub fn StatusBadge(status: ReviewStatus) -> impl IntoView {
    let style = status.style();
    view! {
        <span class=style.badge_class>{ style.label }</span>
    }
}
