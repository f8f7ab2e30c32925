/// Convenience result type used across glyphseed.
pub type GlyphResult<T> = Result<T, GlyphError>;

/// Top-level error taxonomy used by the generation, rendering, and export APIs.
///
/// Nothing in the core is fatal: every variant describes a local, recoverable failure that the
/// caller can surface as status text.
#[derive(thiserror::Error, Debug)]
pub enum GlyphError {
    /// Invalid caller-provided input (empty text for an explicit build, bad export size, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// The vector document could not be parsed or drawn.
    #[error("render error: {0}")]
    Render(String),

    /// Export requested in a state that cannot produce an artifact.
    #[error("export error: {0}")]
    Export(String),

    /// Errors when serializing or deserializing configuration and dumps.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlyphError {
    /// Build a [`GlyphError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GlyphError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`GlyphError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`GlyphError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for GlyphError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
