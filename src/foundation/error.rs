/// Convenience result type used across adlayout.
pub type AdLayoutResult<T> = Result<T, AdLayoutError>;

/// Element id used in errors that concern the template as a whole.
pub const TEMPLATE_SCOPE: &str = "<template>";

/// Top-level error taxonomy used by layout, compositing and round-trip APIs.
#[derive(thiserror::Error, Debug)]
pub enum AdLayoutError {
    /// Element placement violates canvas bounds or the template schema.
    #[error("invalid geometry for '{element}': {reason}")]
    InvalidGeometry {
        /// Offending element id, or [`TEMPLATE_SCOPE`].
        element: String,
        /// Human-readable cause.
        reason: String,
    },

    /// Unrecoverable failure while drawing one element (e.g. undecodable logo).
    #[error("compositing error for '{element}': {reason}")]
    Compositing {
        /// Offending element id.
        element: String,
        /// Human-readable cause.
        reason: String,
    },

    /// Square round-trip requested with an unusable size.
    #[error("dimension error: {0}")]
    Dimension(String),

    /// Errors when serializing or deserializing template definitions.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from IO or an external collaborator.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AdLayoutError {
    /// Build an [`AdLayoutError::InvalidGeometry`] value.
    pub fn invalid_geometry(element: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            element: element.into(),
            reason: reason.into(),
        }
    }

    /// Build an [`AdLayoutError::Compositing`] value.
    pub fn compositing(element: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Compositing {
            element: element.into(),
            reason: reason.into(),
        }
    }

    /// Build an [`AdLayoutError::Dimension`] value.
    pub fn dimension(msg: impl Into<String>) -> Self {
        Self::Dimension(msg.into())
    }

    /// Build an [`AdLayoutError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Element id carried by the error, when it has one.
    pub fn element(&self) -> Option<&str> {
        match self {
            Self::InvalidGeometry { element, .. } | Self::Compositing { element, .. } => {
                Some(element.as_str())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
