use crate::coordinates::{Coordinate2D, Coordinate3D};

/// Problems found while reading a block entity tag. These are logged by the
/// store and never handed back to its callers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TagError {
    #[error("Block entity is not a compound (found {0})")]
    NotCompound(&'static str),
    #[error("Block entity is missing field `{0}`")]
    MissingField(&'static str),
    #[error("Block entity field `{field}` is not an integer (found {found})")]
    NotAnInteger {
        field: &'static str,
        found: &'static str,
    },
    #[error("Block entity id is missing or not a string")]
    UnknownIdentifier,
    #[error("Position {position} lies outside chunk {chunk}")]
    OutsideChunk {
        position: Coordinate3D,
        chunk: Coordinate2D,
    },
    #[error("Local position {0} is not inside a chunk")]
    NotLocal(Coordinate3D),
    #[error("No block at {0} to attach an inventory to")]
    MissingBlock(Coordinate3D),
}

/// Error type for loading capture settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}
