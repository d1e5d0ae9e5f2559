//! Parse options and their TOML loading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::language_version::LanguageVersion;

/// How top-level code is interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Regular compilation unit; statements at the root become top-level statements.
    #[default]
    Regular,
    /// Script: statements and members may be interleaved at the root.
    Script,
}

/// Options threaded through every parse call. Immutable once constructed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParseOptions {
    #[serde(default, alias = "langversion", alias = "language-version")]
    pub language_version: LanguageVersion,
    #[serde(default)]
    pub kind: SourceKind,
}

#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("failed to read options file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml options: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for OptionsError {
    fn from(value: toml::de::Error) -> Self {
        OptionsError::Toml(value.message().to_string())
    }
}

#[derive(Deserialize)]
struct OptionsFile {
    #[serde(default)]
    parse: Option<ParseOptions>,
    #[serde(flatten)]
    inline: ParseOptions,
}

impl ParseOptions {
    pub const fn new(language_version: LanguageVersion, kind: SourceKind) -> Self {
        Self {
            language_version,
            kind,
        }
    }

    pub const fn regular(language_version: LanguageVersion) -> Self {
        Self::new(language_version, SourceKind::Regular)
    }

    pub const fn script(language_version: LanguageVersion) -> Self {
        Self::new(language_version, SourceKind::Script)
    }

    #[must_use]
    pub const fn with_language_version(self, language_version: LanguageVersion) -> Self {
        Self {
            language_version,
            ..self
        }
    }

    #[must_use]
    pub const fn with_kind(self, kind: SourceKind) -> Self {
        Self { kind, ..self }
    }

    pub fn is_script(&self) -> bool {
        self.kind == SourceKind::Script
    }

    /// Load options from TOML text. A `[parse]` table wins over top-level keys.
    pub fn from_toml_str(text: &str) -> Result<Self, OptionsError> {
        let file: OptionsFile = toml::from_str(text)?;
        let options = file.parse.unwrap_or(file.inline);
        tracing::debug!(
            target: "sharp_syntax",
            language_version = %options.language_version,
            kind = ?options.kind,
            "loaded parse options"
        );
        Ok(options)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| OptionsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
