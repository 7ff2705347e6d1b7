use leptos::*;
use leptos::ev::SubmitEvent;

use crate::models::query::ReviewFilters;

/// Search, product and rating inputs. Nothing is applied until submit.
#[component]
pub fn ReviewFilterBar(
    #[prop(into)] on_apply: Callback<ReviewFilters>,
    #[prop(into)] on_reset: Callback<()>,
) -> impl IntoView {
    let (search, set_search) = create_signal(String::new());
    let (product, set_product) = create_signal(String::new());
    let (rating, set_rating) = create_signal(None::<u8>);

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        on_apply.call(ReviewFilters {
            search: search.get_untracked(),
            product: product.get_untracked(),
            rating: rating.get_untracked(),
        });
    };

    let handle_reset = move |_| {
        set_search.set(String::new());
        set_product.set(String::new());
        set_rating.set(None);
        on_reset.call(());
    };

    view! {
        <form class="review-filters" on:submit=handle_submit>
            <input
                type="search"
                placeholder="Search customer or content"
                prop:value=move || search.get()
                on:input=move |e| set_search.set(event_target_value(&e))
            />
            <input
                type="text"
                placeholder="Product name"
                prop:value=move || product.get()
                on:input=move |e| set_product.set(event_target_value(&e))
            />
            <select
                prop:value=move || rating.get().map(|r| r.to_string()).unwrap_or_default()
                on:change=move |e| set_rating.set(event_target_value(&e).parse::<u8>().ok())
            >
                <option value="">{ "All ratings" }</option>
                { (1..=5u8)
                    .rev()
                    .map(|r| view! { <option value=r.to_string()>{ format!("{r} stars") }</option> })
                    .collect_view() }
            </select>
            <button type="submit">{ "Apply" }</button>
            <button type="button" on:click=handle_reset>{ "Reset" }</button>
        </form>
    }
}
