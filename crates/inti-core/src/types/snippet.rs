//! Snippet body type

use std::fmt;

/// Markdown body of a snippet, returned verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetBody(String);

impl SnippetBody {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SnippetBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<SnippetBody> for String {
    fn from(body: SnippetBody) -> Self {
        body.0
    }
}
