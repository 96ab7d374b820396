/// Convenience result type used across Keystage.
pub type KeystageResult<T> = Result<T, KeystageError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Geometry that cannot be applied, actions without an overlay and empty
/// history stacks are not errors; those report [`crate::Outcome::Ignored`].
#[derive(thiserror::Error, Debug)]
pub enum KeystageError {
    /// Invalid user-provided data (raster buffers, configuration).
    #[error("validation error: {0}")]
    Validation(String),

    /// Encoded image bytes could not be turned into a raster.
    #[error("decode error: {0}")]
    Decode(String),

    /// A raster could not be encoded for export.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KeystageError {
    /// Build a [`KeystageError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`KeystageError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`KeystageError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
