//! Error types for tvguide.

use std::io;

use crate::model::CellId;

/// Errors produced by the guide engine and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum GuideError {
    /// The data source could not supply channel or program data. Fatal to
    /// the current guide session.
    #[error("load error: {0}")]
    Load(String),

    /// A cell identity that was not part of the last layout pass.
    #[error("cell {0} not found")]
    NotFound(CellId),

    #[error("host error: {0}")]
    Host(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("listing error: {0}")]
    Listing(String),

    /// An operation was issued after a load error closed the session.
    #[error("guide session is closed")]
    SessionClosed,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GuideError {
    /// Whether this error must terminate the guide session.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Load(_) | Self::SessionClosed)
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, GuideError>;
