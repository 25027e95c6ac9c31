//! Error taxonomy, grouped by "kind" rather than call site.
//!
//! Per the crate's error-handling policy, only [`PhysError::ConfigInvalid`]
//! is ever returned as a hard `Err` from a public entry point. Every other
//! kind is logged and passed through or silently degraded at its call
//! site — the enum exists so those log lines carry a stable, matchable
//! kind rather than a free-text message.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PhysError {
    #[error("map not loaded: {map_id}")]
    MapNotLoaded { map_id: u32 },

    #[error("tile missing for map {map_id} at ({tile_x}, {tile_y})")]
    TileMissing { map_id: u32, tile_x: u32, tile_y: u32 },

    #[error("failed to load model: {path}")]
    ModelLoadFailure { path: String },

    #[error("degenerate geometry encountered: {context}")]
    GeometricDegenerate { context: String },

    #[error("numeric overflow: {context}")]
    NumericOverflow { context: String },

    #[error("invalid configuration: {what}")]
    ConfigInvalid { what: String },
}

impl PhysError {
    /// Short, stable tag for log correlation (MOVE/SURF/CYL/STEP).
    pub fn log_tag(&self) -> &'static str {
        match self {
            PhysError::MapNotLoaded { .. } | PhysError::TileMissing { .. } => "SURF",
            PhysError::ModelLoadFailure { .. } => "SURF",
            PhysError::GeometricDegenerate { .. } => "CYL",
            PhysError::NumericOverflow { .. } => "STEP",
            PhysError::ConfigInvalid { .. } => "MOVE",
        }
    }
}
