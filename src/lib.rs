//! Storefront server library.
//!
//! Account storage, password hashing, bearer tokens, role checks and the HTTP
//! API for the storefront's customers and back-office admins.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod validation;
