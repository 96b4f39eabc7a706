//! HTTP gateway for the userdir service.
//!
//! Exposes CRUD endpoints for user records under `/api/v1`, an OpenAPI
//! document, and a Swagger UI to browse it.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod docs;
pub mod error;
pub mod routes;
