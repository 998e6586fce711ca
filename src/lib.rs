//! Consumer-Credit Management API Library
//!
//! This library provides the core functionality for the consumer-credit
//! management service: customer registration and maintenance, credit
//! issuance against a registered customer, and customer-scoped credit
//! lookups, all exposed over HTTP.
//!
//! # Modules
//!
//! - `api_docs`: OpenAPI document served through Swagger UI.
//! - `config`: Configuration management.
//! - `db`: Database connection and pool management.
//! - `errors`: Error handling types and the uniform error body.
//! - `handlers`: HTTP request handlers.
//! - `models`: Entities, request payloads, and response views.
//! - `services`: Customer and credit business services.
//! - `storage`: Row-level access to the relational store.
//! - `validation`: Field validators for request payloads.

pub mod api_docs;
pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod storage;
pub mod validation;
