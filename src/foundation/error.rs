/// Convenience result type used across card-maker.
pub type CardResult<T> = Result<T, CardError>;

/// Top-level error taxonomy used by the public APIs.
///
/// Only [`CardError::Config`] and [`CardError::Serde`] are expected in normal operation; the
/// layout and text engines absorb rendering degradations (missing fonts, empty shapes) instead
/// of surfacing them.
#[derive(thiserror::Error, Debug)]
pub enum CardError {
    /// Invalid user-provided parameters or unresolvable presets.
    #[error("config error: {0}")]
    Config(String),

    /// Raster invariant violations (canvas too large for the rasterizer, buffer mismatches).
    #[error("raster error: {0}")]
    Raster(String),

    /// Errors while encoding the finished card.
    #[error("export error: {0}")]
    Export(String),

    /// Errors when serializing or deserializing params, themes or presets.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardError {
    /// Build a [`CardError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`CardError::Raster`] value.
    pub fn raster(msg: impl Into<String>) -> Self {
        Self::Raster(msg.into())
    }

    /// Build a [`CardError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`CardError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
