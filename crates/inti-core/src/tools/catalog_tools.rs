//! `listVendors` / `getSnippet` tool definitions and dispatch

use std::sync::Arc;

use rmcp::model::{CallToolResult, Content, ErrorData, JsonObject, Tool};
use serde_json::{json, Value};

use crate::catalog::Catalog;
use crate::types::VendorRecord;

pub const LIST_VENDORS: &str = "listVendors";
pub const GET_SNIPPET: &str = "getSnippet";

/// Textual result of a tool call
///
/// `text` is what the caller reads; `is_error` travels alongside it so
/// hosts that support a tagged result (MCP's `isError`) can tell failures
/// apart without parsing the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub text: String,
    pub is_error: bool,
}

impl ToolOutput {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

impl From<ToolOutput> for CallToolResult {
    fn from(output: ToolOutput) -> Self {
        let content = vec![Content::text(output.text)];
        if output.is_error {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        }
    }
}

/// Keep records whose vendor name or any topic contains `query`, ignoring case
pub fn filter_vendors(vendors: Vec<VendorRecord>, query: &str) -> Vec<VendorRecord> {
    let query = query.trim();
    if query.is_empty() {
        return vendors;
    }
    vendors.into_iter().filter(|v| v.matches_query(query)).collect()
}

/// The catalog's tool surface
pub struct CatalogTools {
    catalog: Arc<Catalog>,
}

impl CatalogTools {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Tool definitions advertised to the host
    pub fn tools(&self) -> Vec<Tool> {
        vec![
            Tool::new(
                LIST_VENDORS,
                "List available snippet vendors",
                schema(json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "Only vendors whose name or topics contain this text"
                        }
                    }
                })),
            ),
            Tool::new(
                GET_SNIPPET,
                "Get snippet markdown for a vendor",
                schema(json!({
                    "type": "object",
                    "properties": {
                        "vendorName": {
                            "type": "string",
                            "description": "Vendor and language slug"
                        }
                    },
                    "required": ["vendorName"]
                })),
            ),
        ]
    }

    pub fn has_tool(&self, name: &str) -> bool {
        name == LIST_VENDORS || name == GET_SNIPPET
    }

    /// Dispatch a tool call by name
    ///
    /// Catalog failures come back as error-flagged results; unknown tools
    /// and bad arguments are protocol errors.
    pub async fn call(&self, name: &str, args: Option<JsonObject>) -> Result<CallToolResult, ErrorData> {
        let args = args.unwrap_or_default();
        let output = match name {
            LIST_VENDORS => {
                let query = optional_str(&args, "query")?;
                self.list_vendors(query).await
            }
            GET_SNIPPET => {
                let slug = optional_str(&args, "vendorName")?.ok_or_else(|| {
                    ErrorData::invalid_params("getSnippet requires a string `vendorName` argument", None)
                })?;
                self.get_snippet(slug).await
            }
            other => {
                return Err(ErrorData::invalid_params(format!("Unknown tool: {}", other), None));
            }
        };
        Ok(output.into())
    }

    /// Pretty JSON array of vendors, or a failure description
    pub async fn list_vendors(&self, query: Option<&str>) -> ToolOutput {
        let vendors = match self.catalog.list_vendors().await {
            Ok(vendors) => vendors,
            Err(e) => return ToolOutput::failure(format!("Failed to list vendors: {}", e)),
        };
        let vendors = match query {
            Some(query) => filter_vendors(vendors, query),
            None => vendors,
        };

        match serde_json::to_string_pretty(&vendors) {
            Ok(text) => ToolOutput::success(text),
            Err(e) => ToolOutput::failure(format!("Failed to list vendors: {}", e)),
        }
    }

    /// Raw markdown for `slug`, or a failure description naming the slug
    pub async fn get_snippet(&self, slug: &str) -> ToolOutput {
        match self.catalog.get_snippet(slug).await {
            Ok(body) => ToolOutput::success(body.into_string()),
            Err(e) => ToolOutput::failure(format!("Failed to read snippet for {}: {}", slug, e)),
        }
    }
}

fn schema(value: Value) -> Arc<JsonObject> {
    match value {
        Value::Object(map) => Arc::new(map),
        _ => Arc::new(JsonObject::new()),
    }
}

fn optional_str<'a>(args: &'a JsonObject, key: &str) -> Result<Option<&'a str>, ErrorData> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(ErrorData::invalid_params(format!("`{}` must be a string", key), None)),
    }
}
