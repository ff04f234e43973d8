//! Parser configuration.

use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::xml::XmlOptions;

/// Options recognized by [`crate::UrdfParser`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ParserOptions {
    /// Directory that relative mesh and texture filenames are resolved against.
    ///
    /// Normalization never reads it; see [`ParserOptions::resolve_path`].
    pub base_path: Option<PathBuf>,
    /// Options passed through to the XML tree builder.
    pub xml: XmlOptions,
}

impl ParserOptions {
    /// Create options with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base path for relative asset references.
    #[must_use]
    pub fn with_base_path(mut self, base_path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    /// Set the XML tree builder options.
    #[must_use]
    pub fn with_xml_options(mut self, xml: XmlOptions) -> Self {
        self.xml = xml;
        self
    }

    /// Set the attribute-key prefix used by the tree builder and accessors.
    #[must_use]
    pub fn with_attribute_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.xml.attribute_prefix = prefix.into();
        self
    }

    /// Set the key under which element text is stored.
    #[must_use]
    pub fn with_text_key(mut self, key: impl Into<String>) -> Self {
        self.xml.text_key = key.into();
        self
    }

    /// Resolve a mesh or texture filename against the base path.
    ///
    /// Absolute paths, URIs (`package://`, `file://`, ...) and filenames
    /// without a configured base path come back unchanged.
    #[must_use]
    pub fn resolve_path(&self, filename: &str) -> PathBuf {
        let path = Path::new(filename);
        match &self.base_path {
            Some(base) if !path.is_absolute() && !filename.contains("://") => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}
