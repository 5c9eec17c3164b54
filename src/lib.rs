//! Catalog core for the storefront service.
//!
//! This crate owns Product and Category records: validation, persistence and
//! the read-side joins that pair a product with its category. Transport,
//! authentication and file uploads live in the consuming application; the
//! services layer here is the contract boundary they call into.

pub mod db;
pub mod domain;
pub mod dto;
mod error_conversions;
pub mod forms;
pub mod models;
pub mod repository;
pub mod schema;
pub mod services;
