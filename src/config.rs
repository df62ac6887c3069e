//! Generation settings of one model set.
//!
//! Stored as JSON with the PascalCase keys of the `.viewmodel` files:
//!
//! ```json
//! {
//!     "Namespace": "Game.Ui",
//!     "LocatorsClassName": "Locators",
//!     "TypeMappings": { "Vector3": "glam.Vec3" },
//!     "RuntimeCrate": "::mdl_runtime",
//!     "LineEnding": "Lf"
//! }
//! ```
//!
//! Every key is optional.
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::scanner::is_identifier;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GenerationConfig {
    /// Shown in the header of the namespace module.
    pub namespace: String,
    /// Name of the umbrella module holding a file's locators, snake-cased.
    pub locators_class_name: String,
    /// Schema type name → external type path, applied while parsing.
    pub type_mappings: IndexMap<String, String>,
    /// Path of the runtime crate as written in generated code.
    pub runtime_crate: String,
    pub line_ending: LineEnding,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}: at JSON path {json_path} → {message}", path.display())]
    Parse {
        path: PathBuf,
        json_path: String,
        message: String,
    },
    #[error("more than one configuration file in {}: {}", root.display(), names.join(", "))]
    Ambiguous { root: PathBuf, names: Vec<String> },
    #[error("{field} must be an identifier, got {value:?}")]
    InvalidName { field: &'static str, value: String },
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

pub const CONFIG_EXTENSION: &str = "viewmodel";

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            namespace: String::new(),
            locators_class_name: "Locators".to_owned(),
            type_mappings: IndexMap::new(),
            runtime_crate: "::mdl_runtime".to_owned(),
            line_ending: LineEnding::Lf,
        }
    }
}

impl GenerationConfig {
    /// Parse and validate; `origin` only labels errors.
    pub fn from_json_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: Self = from_str_with_path(text).map_err(|(json_path, message)| ConfigError::Parse {
            path: origin.to_path_buf(),
            json_path,
            message,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&text, path)
    }

    /// The single `*.viewmodel` file directly inside `root`, or the defaults
    /// when there is none.
    pub fn discover(root: &Path) -> Result<Self, ConfigError> {
        let entries = std::fs::read_dir(root)
            .map_err(|source| ConfigError::Io { path: root.to_path_buf(), source })?;
        let mut found = Vec::new();
        for entry in entries {
            let path = entry.map_err(|source| ConfigError::Io { path: root.to_path_buf(), source })?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == CONFIG_EXTENSION) {
                found.push(path);
            }
        }
        found.sort();
        match found.as_slice() {
            [] => {
                tracing::debug!(root = %root.display(), "no configuration file; using defaults");
                Ok(Self::default())
            }
            [path] => {
                tracing::debug!(path = %path.display(), "loading configuration");
                Self::load(path)
            }
            _ => Err(ConfigError::Ambiguous {
                root: root.to_path_buf(),
                names: found
                    .iter()
                    .filter_map(|path| path.file_name())
                    .map(|name| name.to_string_lossy().into_owned())
                    .collect(),
            }),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_identifier(&self.locators_class_name) {
            return Err(ConfigError::InvalidName {
                field: "LocatorsClassName",
                value: self.locators_class_name.clone(),
            });
        }
        let runtime_ok = self
            .runtime_crate
            .trim_start_matches("::")
            .split("::")
            .all(|segment| is_identifier(segment));
        if !runtime_ok {
            return Err(ConfigError::InvalidName { field: "RuntimeCrate", value: self.runtime_crate.clone() });
        }
        Ok(())
    }
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// Deserialize, keeping the JSON path of a failure.
fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, (String, String)> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| {
        let path = err.path().to_string();
        (path, err.into_inner().to_string())
    })
}
