//! List response envelope

use serde::Deserialize;

/// A list endpoint response: DRF's paged `{ "results": [...] }` or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Paged { results: Vec<T> },
    Bare(Vec<T>),
}

impl<T> Listing<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Listing::Paged { results } => results,
            Listing::Bare(items) => items,
        }
    }
}
