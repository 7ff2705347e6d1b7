pub mod dashboard;
pub mod decision;
pub mod query;
pub mod review;
