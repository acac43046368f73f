/// Convenience result type used across dotwave.
pub type DotwaveResult<T> = Result<T, DotwaveError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Rendering itself never fails: configuration gaps are resolved with defaults when a
/// [`crate::ParameterState`] is built. Errors only surface at IO and export boundaries.
#[derive(thiserror::Error, Debug)]
pub enum DotwaveError {
    /// Invalid user-provided data that could not be defaulted (unreadable files, bad JSON).
    #[error("validation error: {0}")]
    Validation(String),

    /// Internal raster failures (buffer size mismatches, surface allocation).
    #[error("render error: {0}")]
    Render(String),

    /// Failures while streaming frames to an encoder.
    #[error("encode error: {0}")]
    Encode(String),

    /// The requested export format is not available in this build or host.
    #[error("export unavailable: {0}")]
    ExportUnavailable(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DotwaveError {
    /// Build a [`DotwaveError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DotwaveError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`DotwaveError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`DotwaveError::ExportUnavailable`] value.
    pub fn export_unavailable(msg: impl Into<String>) -> Self {
        Self::ExportUnavailable(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
