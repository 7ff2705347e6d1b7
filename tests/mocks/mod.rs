#![allow(dead_code)]

pub mod review_backend_mock;
