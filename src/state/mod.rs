pub mod dashboard;
pub mod detail;
pub mod list;
pub mod moderation;
