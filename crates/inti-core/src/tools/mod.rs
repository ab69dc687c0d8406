//! Tool surface offered to agent hosts
//!
//! ```text
//! ┌──────────────────────────────┐
//! │  MCP host (agent, IDE, ...)  │
//! └──────────────┬───────────────┘
//!                │ tools/list, tools/call
//!                ▼
//! ┌──────────────────────────────┐
//! │  CatalogTools                │
//! │    listVendors  -> JSON text │
//! │    getSnippet   -> markdown  │
//! └──────────────┬───────────────┘
//!                ▼
//!             Catalog
//! ```

mod catalog_tools;

pub use catalog_tools::{filter_vendors, CatalogTools, ToolOutput, GET_SNIPPET, LIST_VENDORS};
