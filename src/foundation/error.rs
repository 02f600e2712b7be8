/// Convenience result type used across frameloom.
pub type FrameloomResult<T> = Result<T, FrameloomError>;

/// Top-level error taxonomy used by crate APIs.
///
/// Animation math is total and never returns these; they only surface at configuration,
/// rasterization and encoding boundaries.
#[derive(thiserror::Error, Debug)]
pub enum FrameloomError {
    /// Invalid user-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// Unknown scene id or a scene that could not be sampled.
    #[error("scene error: {0}")]
    Scene(String),

    /// Errors while turning a scene into pixels.
    #[error("render error: {0}")]
    Render(String),

    /// Errors raised by frame sinks (PNG writer, ffmpeg).
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FrameloomError {
    /// Build a [`FrameloomError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FrameloomError::Scene`] value.
    pub fn scene(msg: impl Into<String>) -> Self {
        Self::Scene(msg.into())
    }

    /// Build a [`FrameloomError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`FrameloomError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`FrameloomError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
