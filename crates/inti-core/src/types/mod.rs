//! Catalog data model

mod vendor;
mod snippet;

pub use vendor::{VendorRecord, RecordRejection};
pub use snippet::SnippetBody;
