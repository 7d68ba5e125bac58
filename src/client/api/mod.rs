//! API trait definitions split by responsibility
//!
//! This module organizes the DefectDojo API surface into focused sub-traits:
//! - [`AuthApi`] - Token exchange
//! - [`CatalogApi`] - Products, engagements and tests
//! - [`ImportApi`] - Scan import and reimport
//! - [`SchemaApi`] - OpenAPI schema probing

mod auth;
mod catalog;
mod import;
mod schema;

pub use auth::AuthApi;
pub use catalog::CatalogApi;
pub use import::ImportApi;
pub use schema::SchemaApi;
