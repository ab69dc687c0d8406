//! Resolved catalog configuration
//!
//! Source priority (later sources override earlier):
//! 1. Built-in defaults (local backend, bundled snippet tree)
//! 2. User YAML config (~/.config/inti/config.yaml)
//! 3. Workspace YAML config (.config/inti/config.yaml)
//! 4. Environment (`INTI_BACKEND`, `INTI_SNIPPETS_DIR`, `INTI_REMOTE_URL`)
//! 5. Explicit overrides from the host (CLI flags)

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::storage::DEFAULT_ORIGIN;

use super::file::{ConfigFile, FileConfigSource};
use super::{ConfigError, ConfigResult};

/// Selectable storage backend kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Snippet tree on the local filesystem
    Local,
    /// Static-file HTTP origin
    Remote,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Local => "local",
            BackendKind::Remote => "remote",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" | "fs" | "filesystem" => Ok(BackendKind::Local),
            "remote" | "http" | "https" => Ok(BackendKind::Remote),
            other => Err(ConfigError::InvalidValue {
                field: "backend",
                value: other.to_string(),
            }),
        }
    }
}

/// Transport settings for the chosen backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendConfig {
    Local { root: PathBuf },
    Remote { origin: String },
}

impl BackendConfig {
    pub fn kind(&self) -> BackendKind {
        match self {
            BackendConfig::Local { .. } => BackendKind::Local,
            BackendConfig::Remote { .. } => BackendKind::Remote,
        }
    }

    /// Where the catalog is read from, for display
    pub fn location(&self) -> String {
        match self {
            BackendConfig::Local { root } => root.display().to_string(),
            BackendConfig::Remote { origin } => origin.clone(),
        }
    }
}

/// Immutable catalog configuration, built once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub backend: BackendConfig,
}

impl CatalogConfig {
    /// Local backend rooted at `root`
    pub fn local(root: impl Into<PathBuf>) -> Self {
        Self {
            backend: BackendConfig::Local { root: root.into() },
        }
    }

    /// Remote backend at `origin`
    pub fn remote(origin: impl Into<String>) -> Self {
        Self {
            backend: BackendConfig::Remote {
                origin: origin.into(),
            },
        }
    }

    /// Turn a merged layer into a concrete configuration
    ///
    /// Unset fields fall back to the bundled snippet tree and the default origin.
    pub fn from_layer(layer: ConfigFile) -> ConfigResult<Self> {
        let backend = match layer.backend.unwrap_or(BackendKind::Local) {
            BackendKind::Local => BackendConfig::Local {
                root: layer.root.unwrap_or_else(default_snippets_dir),
            },
            BackendKind::Remote => {
                let origin = layer.origin.unwrap_or_else(|| DEFAULT_ORIGIN.to_string());
                if !(origin.starts_with("http://") || origin.starts_with("https://")) {
                    return Err(ConfigError::InvalidValue {
                        field: "origin",
                        value: origin,
                    });
                }
                BackendConfig::Remote { origin }
            }
        };

        Ok(Self { backend })
    }
}

/// Snippet tree shipped alongside the binary
///
/// Resolves to `<exe_dir>/../snippets` when that directory exists, so the
/// tool works regardless of the current directory; otherwise `./snippets`.
pub fn default_snippets_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().and_then(Path::parent).map(|p| p.join("snippets")))
        .filter(|dir| dir.is_dir())
        .unwrap_or_else(|| PathBuf::from("snippets"))
}

/// Collects configuration layers in priority order
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    user: Option<FileConfigSource>,
    workspace: Option<FileConfigSource>,
    use_env: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Loader reading the user file and the environment
    pub fn new() -> Self {
        Self {
            user: Some(FileConfigSource::user()),
            workspace: None,
            use_env: true,
        }
    }

    /// Loader that only applies explicit overrides (useful for tests)
    pub fn isolated() -> Self {
        Self {
            user: None,
            workspace: None,
            use_env: false,
        }
    }

    /// Also read `<workspace>/.config/inti/config.yaml`
    pub fn with_workspace(mut self, workspace_root: impl AsRef<Path>) -> Self {
        self.workspace = Some(FileConfigSource::workspace(workspace_root));
        self
    }

    /// Use a specific user-level file instead of the platform default
    pub fn with_user_file(mut self, source: FileConfigSource) -> Self {
        self.user = Some(source);
        self
    }

    /// Resolve all layers, then `overrides` on top
    pub fn load(&self, overrides: ConfigFile) -> ConfigResult<CatalogConfig> {
        let mut layer = ConfigFile::default();

        for source in [&self.user, &self.workspace].into_iter().flatten() {
            layer = layer.merge(source.load()?);
        }
        if self.use_env {
            layer = layer.merge(ConfigFile::from_env()?);
        }

        CatalogConfig::from_layer(layer.merge(overrides))
    }
}
