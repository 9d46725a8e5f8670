//! Integration test entry point.
//!
//! These tests drive the full router against a real PostgreSQL
//! instance. They skip themselves when `QUIZDECK_TEST_DATABASE_URL`
//! is unset.

mod helpers;

mod auth_test;
mod exam_test;
mod export_test;
