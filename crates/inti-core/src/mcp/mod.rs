//! MCP (Model Context Protocol) server module
//!
//! Uses the official rmcp SDK to expose the catalog tools over stdio.
//!
//! # Example
//!
//! ```rust,ignore
//! use inti_core::mcp::CatalogServer;
//! use std::sync::Arc;
//!
//! let server = CatalogServer::new(Arc::new(catalog), logger);
//! server.serve_stdio().await?;
//! ```

mod server;

pub use server::{CatalogServer, McpError, McpResult};
