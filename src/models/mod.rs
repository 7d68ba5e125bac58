//! Display models for CLI output
//!
//! Display models turn API responses and scan type catalogs into
//! CLI-friendly rows for table and JSON output.

pub mod scan_type;
pub mod summary;

pub use scan_type::ScanTypeListing;
pub use summary::ImportSummary;
