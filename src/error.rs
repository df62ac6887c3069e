//! Error taxonomy for parsing and generation.
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::config::ConfigError;

// ————————————————————————————————————————————————————————————————————————————
// SCHEMA ERRORS
// ————————————————————————————————————————————————————————————————————————————

/// 1-based position in a schema file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaErrorKind {
    #[error("invalid identifier `{0}`")]
    InvalidIdentifier(String),
    #[error("block is never closed")]
    UnterminatedBlock,
    #[error("property `{0}` declared at file scope; properties must live inside a `define` block")]
    PropertyAtFileScope(String),
    #[error("field is not terminated by `;` or `{{`")]
    InvalidTerminator,
    #[error("cannot use external type `{0}` as an array")]
    ExternalTypeAsArray(String),
    #[error("cannot declare an inline body for external type `{0}`")]
    InlineBodyOnExternalType(String),
    #[error("inline body is not allowed on primitive property `{0}`")]
    InlineBodyOnPrimitive(String),
    #[error("`{0}` cannot be used as a property type on its own")]
    UnsupportedPropertyKind(String),
    #[error("missing body for declaration `{0}`")]
    MissingBody(String),
    #[error("missing `>` in type `{0}`")]
    UnclosedTypeArgument(String),
    #[error("duplicate enum value `{0}`")]
    DuplicateEnumValue(String),
    #[error("attribute `@{0}` is not followed by a declaration")]
    DanglingAttribute(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{location}: {kind}")]
pub struct SchemaError {
    pub kind: SchemaErrorKind,
    pub location: Location,
}

// ————————————————————————————————————————————————————————————————————————————
// GENERATION ERRORS
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("{}:{source}", path.display())]
    Schema {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },
    #[error("failed to find reference to class type {name} (type tree path: {scope})")]
    UnresolvedType { name: String, scope: String },
    #[error("class type {name} contains itself through object properties ({path})")]
    RecursiveType { name: String, path: String },
    #[error("{} and {} would both generate {}", first.display(), second.display(), output.display())]
    OutputCollision {
        output: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl GenerateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

impl From<glob::GlobError> for GenerateError {
    fn from(error: glob::GlobError) -> Self {
        let path = error.path().to_path_buf();
        Self::Io { path, source: std::io::Error::from(error) }
    }
}
