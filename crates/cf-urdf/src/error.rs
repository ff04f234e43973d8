//! Error types for URDF normalization and validation.

use thiserror::Error;

/// Errors that can occur while reading, normalizing or validating URDF.
///
/// Only document-level problems are errors. Incomplete links and joints are
/// dropped from their collection during normalization and never surface here.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UrdfError {
    /// The XML layer could not tokenize or build the document.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// Missing required element.
    #[error("missing required element: {element} in {context}")]
    MissingElement {
        /// The missing element name.
        element: &'static str,
        /// Where the element was expected.
        context: String,
    },

    /// Reference to undefined link.
    #[error("reference to undefined link: {link_name} in joint {joint_name}")]
    UndefinedLink {
        /// The link name that was referenced.
        link_name: String,
        /// The joint that referenced it.
        joint_name: String,
    },

    /// Duplicate link name.
    #[error("duplicate link name: {0}")]
    DuplicateLink(String),

    /// Duplicate joint name.
    #[error("duplicate joint name: {0}")]
    DuplicateJoint(String),

    /// Kinematic loop detected.
    #[error("kinematic loop detected: {0}")]
    KinematicLoop(String),

    /// No root link found.
    #[error("no root link found (all links are children of joints)")]
    NoRootLink,

    /// Multiple root links found.
    #[error("multiple root links found: {0:?}")]
    MultipleRootLinks(Vec<String>),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl UrdfError {
    /// Create a missing element error.
    pub fn missing_element(element: &'static str, context: impl Into<String>) -> Self {
        Self::MissingElement {
            element,
            context: context.into(),
        }
    }

    /// Create an undefined link error.
    pub fn undefined_link(link_name: impl Into<String>, joint_name: impl Into<String>) -> Self {
        Self::UndefinedLink {
            link_name: link_name.into(),
            joint_name: joint_name.into(),
        }
    }
}

impl From<quick_xml::Error> for UrdfError {
    fn from(e: quick_xml::Error) -> Self {
        Self::XmlParse(e.to_string())
    }
}

/// Result type for URDF operations.
pub type Result<T> = std::result::Result<T, UrdfError>;
