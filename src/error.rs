//! Error types shared by the coordinate math, the tile index and the tile map.

use crate::coord::AxialCoord;

/// Convenience alias used throughout the crate.
pub type Result<T, E = HexError> = std::result::Result<T, E>;

/// Everything that can go wrong while editing or querying a hex tile map.
#[derive(Debug, thiserror::Error)]
pub enum HexError {
    /// Bad geometric parameter: non-positive diameter/width/height, range below 1.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Lookup on a coordinate with no tile.
    #[error("no tile at {0}")]
    NotFound(AxialCoord),
    /// Insertion on an occupied coordinate without removing the old tile first.
    #[error("a tile already exists at {0}")]
    AlreadyExists(AxialCoord),
    /// The map reached a state its own operations should never produce.
    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(String),
    /// The tile renderer failed to spawn or destroy a visual entity.
    #[error(transparent)]
    Renderer(#[from] RendererError),
}

/// Failure reported by a [`crate::renderer::TileRenderer`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("tile renderer failed: {message}")]
pub struct RendererError {
    /// Human-readable cause.
    pub message: String,
}

impl RendererError {
    /// Creates a renderer error from anything printable.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
