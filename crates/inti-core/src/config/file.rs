//! File-based configuration (YAML)
//!
//! Supports user-level (~/.config/inti/config.yaml) and workspace-level
//! (.config/inti/config.yaml) files. Every field is optional so a file
//! only overrides what it mentions.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::settings::BackendKind;
use super::{ConfigError, ConfigResult};

/// One layer of configuration, as read from a file, the environment or flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Which backend to use
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<BackendKind>,

    /// Snippet tree root for the local backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    /// Origin URL for the remote backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

impl ConfigFile {
    /// Overlay `other` on top of `self`; fields set in `other` win
    pub fn merge(mut self, other: ConfigFile) -> Self {
        if other.backend.is_some() {
            self.backend = other.backend;
        }
        if other.root.is_some() {
            self.root = other.root;
        }
        if other.origin.is_some() {
            self.origin = other.origin;
        }
        self
    }

    /// Parse a YAML document; an empty document is an empty layer
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(ConfigError::Yaml)
    }

    /// Build a layer from `INTI_BACKEND`, `INTI_SNIPPETS_DIR` and `INTI_REMOTE_URL`
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a layer from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let backend = match get(ENV_BACKEND) {
            Some(value) => Some(value.parse()?),
            None => None,
        };

        Ok(Self {
            backend,
            root: get(ENV_SNIPPETS_DIR).map(PathBuf::from),
            origin: get(ENV_REMOTE_URL),
        })
    }
}

pub const ENV_BACKEND: &str = "INTI_BACKEND";
pub const ENV_SNIPPETS_DIR: &str = "INTI_SNIPPETS_DIR";
pub const ENV_REMOTE_URL: &str = "INTI_REMOTE_URL";

/// Config level (user or workspace)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLevel {
    /// User-level config (~/.config/inti/config.yaml)
    User,
    /// Workspace-level config (.config/inti/config.yaml in workspace root)
    Workspace,
}

impl ConfigLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigLevel::User => "user",
            ConfigLevel::Workspace => "workspace",
        }
    }
}

/// A YAML config file at a known location
///
/// # Example
///
/// ```no_run
/// use inti_core::config::FileConfigSource;
///
/// let user = FileConfigSource::user();
/// let workspace = FileConfigSource::workspace("/path/to/workspace");
/// ```
#[derive(Debug, Clone)]
pub struct FileConfigSource {
    path: PathBuf,
    level: ConfigLevel,
}

impl FileConfigSource {
    pub fn new(path: impl Into<PathBuf>, level: ConfigLevel) -> Self {
        Self {
            path: path.into(),
            level,
        }
    }

    /// User-level config (~/.config/inti/config.yaml)
    pub fn user() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        Self::new(config_dir.join("inti").join("config.yaml"), ConfigLevel::User)
    }

    /// Workspace-level config (.config/inti/config.yaml)
    pub fn workspace(workspace_root: impl AsRef<Path>) -> Self {
        let path = workspace_root
            .as_ref()
            .join(".config")
            .join("inti")
            .join("config.yaml");
        Self::new(path, ConfigLevel::Workspace)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn level(&self) -> ConfigLevel {
        self.level
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the file; a missing file is an empty layer
    ///
    /// A relative `root` is resolved against the directory holding the file.
    pub fn load(&self) -> ConfigResult<ConfigFile> {
        if !self.exists() {
            return Ok(ConfigFile::default());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        let mut layer = ConfigFile::from_yaml(&content).map_err(|e| match e {
            ConfigError::Yaml(source) => ConfigError::File {
                path: self.path.clone(),
                source,
            },
            other => other,
        })?;

        if let (Some(root), Some(dir)) = (layer.root.as_ref(), self.path.parent()) {
            if root.is_relative() {
                layer.root = Some(dir.join(root));
            }
        }

        Ok(layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_from_yaml() {
        let layer = ConfigFile::from_yaml("backend: remote\norigin: https://cdn.example.com\n").unwrap();
        assert_eq!(layer.backend, Some(BackendKind::Remote));
        assert_eq!(layer.origin.as_deref(), Some("https://cdn.example.com"));
        assert!(layer.root.is_none());

        assert_eq!(ConfigFile::from_yaml("   \n").unwrap(), ConfigFile::default());
        assert!(ConfigFile::from_yaml("backend: ftp\n").is_err());
        assert!(ConfigFile::from_yaml("colour: blue\n").is_err());
    }

    #[test]
    fn test_merge_later_wins() {
        let base = ConfigFile {
            backend: Some(BackendKind::Local),
            root: Some(PathBuf::from("/a")),
            origin: Some("https://one".to_string()),
        };
        let overlay = ConfigFile {
            backend: Some(BackendKind::Remote),
            root: None,
            origin: Some("https://two".to_string()),
        };

        let merged = base.merge(overlay);
        assert_eq!(merged.backend, Some(BackendKind::Remote));
        assert_eq!(merged.root, Some(PathBuf::from("/a")));
        assert_eq!(merged.origin.as_deref(), Some("https://two"));
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            (ENV_BACKEND, "Remote"),
            (ENV_REMOTE_URL, "https://cdn.example.com"),
            (ENV_SNIPPETS_DIR, ""),
        ]
        .into_iter()
        .collect();

        let layer = ConfigFile::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(layer.backend, Some(BackendKind::Remote));
        assert_eq!(layer.origin.as_deref(), Some("https://cdn.example.com"));
        // Blank values are treated as unset
        assert!(layer.root.is_none());

        let bad = ConfigFile::from_lookup(|k| (k == ENV_BACKEND).then(|| "s3".to_string()));
        assert!(matches!(bad, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_workspace_file_resolves_relative_root() {
        let dir = tempdir().unwrap();
        let source = FileConfigSource::workspace(dir.path());
        assert_eq!(source.level(), ConfigLevel::Workspace);
        assert!(!source.exists());
        assert_eq!(source.load().unwrap(), ConfigFile::default());

        fs::create_dir_all(source.path().parent().unwrap()).unwrap();
        fs::write(source.path(), "backend: local\nroot: snippets\n").unwrap();

        let layer = source.load().unwrap();
        assert_eq!(layer.backend, Some(BackendKind::Local));
        assert_eq!(
            layer.root,
            Some(dir.path().join(".config").join("inti").join("snippets"))
        );
    }

    #[test]
    fn test_invalid_file_names_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "backend: [unclosed").unwrap();

        let err = FileConfigSource::new(&path, ConfigLevel::User).load().unwrap_err();
        assert!(err.to_string().contains("config.yaml"));
    }
}
