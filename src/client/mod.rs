//! DefectDojo API client

pub mod api;
pub mod defectdojo;
#[cfg(test)]
pub mod mock;
pub mod models;

pub use api::{CatalogApi, ImportApi, SchemaApi};
pub use defectdojo::DefectDojoClient;
#[cfg(test)]
pub use mock::MockDojoClient;
