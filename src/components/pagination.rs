use leptos::*;

use crate::models::query::PageSize;
use crate::state::list::page_window;

#[component]
pub fn Pagination(
    #[prop(into)] current: Signal<u32>,
    #[prop(into)] pages: Signal<u32>,
    #[prop(into)] total: Signal<u64>,
    #[prop(into)] page_size: Signal<PageSize>,
    #[prop(into)] on_page: Callback<u32>,
    #[prop(into)] on_page_size: Callback<PageSize>,
) -> impl IntoView {
    let at_first = move || current.get() <= 1;
    let at_last = move || current.get() >= pages.get();

    view! {
        <div class="pagination">
            <span class="pagination-summary">
                { move || format!("{} reviews, page {} of {}", total.get(), current.get().min(pages.get().max(1)), pages.get().max(1)) }
            </span>
            <button
                disabled=at_first
                on:click=move |_| on_page.call(current.get_untracked().saturating_sub(1).max(1))
            >
                { "‹ Prev" }
            </button>
            { move || {
                let active = current.get();
                page_window(active, pages.get())
                    .into_iter()
                    .map(|page| view! {
                        <button
                            class="page-button"
                            class:active=move || page == active
                            on:click=move |_| on_page.call(page)
                        >
                            { page }
                        </button>
                    })
                    .collect_view()
            }}
            <button
                disabled=at_last
                on:click=move |_| on_page.call(current.get_untracked() + 1)
            >
                { "Next ›" }
            </button>
            <select
                class="page-size"
                on:change=move |ev| {
                    if let Some(size) = event_target_value(&ev).parse::<u32>().ok().and_then(PageSize::from_u32) {
                        on_page_size.call(size);
                    }
                }
            >
                { PageSize::ALL
                    .into_iter()
                    .map(|size| view! {
                        <option value=size.get().to_string() selected=move || page_size.get() == size>
                            { format!("{} / page", size.get()) }
                        </option>
                    })
                    .collect_view() }
            </select>
        </div>
    }
}
