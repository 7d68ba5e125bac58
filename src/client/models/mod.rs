//! DefectDojo API data models
//!
//! Resource types returned by the DefectDojo v2 API and the request types
//! sent to it, organized by resource.

mod auth;
mod engagement;
mod import;
mod listing;
mod product;

pub use auth::{AuthContext, Credentials};
pub use dojo_test::Test;
pub use engagement::{Engagement, NewEngagement};
pub use import::{ImportScanRequest, ImportTarget, ReimportScanRequest, Severity};
pub use listing::Listing;
pub use product::{NewProduct, Product};
