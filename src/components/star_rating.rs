use leptos::*;

/// Filled and empty stars for a 1-5 rating.
pub fn stars(rating: u8) -> String {
    let filled = rating.min(5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

#[component]
pub fn StarRating(rating: u8) -> impl IntoView {
    view! {
        <span class="star-rating" title=format!("{}/5", rating.min(5))>
            { stars(rating) }
        </span>
    }
}
