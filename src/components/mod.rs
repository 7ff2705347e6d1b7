pub mod dashboard;
pub mod moderation_page;
pub mod pagination;
pub mod review_detail;
pub mod review_filters;
pub mod review_list;
pub mod star_rating;
pub mod status_badge;
pub mod toast;
