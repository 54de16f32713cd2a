//! HTTP API test suite.
//!
//! Drives the full route table over the in-memory credential store, so no
//! database is needed.
//!
//! Run with: cargo test --test api

mod test_helpers;

mod test_admins;
mod test_customer_auth;
mod test_customers;
