//! Error types for the cube cover solver.
//!
//! An unsolvable piece selection is not an error: it comes back as `Ok(None)`.
//! These variants describe malformed requests and interrupted searches.

use thiserror::Error;

/// Result type alias for solver operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur before or during a solve.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// No pieces were selected.
    #[error("Invalid input: the piece list is empty")]
    NoPieces,

    /// The target cube has no cells or is too large to index.
    #[error("Invalid input: cube size must be between 1 and {max}", max = crate::grid::MAX_DIM)]
    InvalidCubeSize,

    /// A piece has no voxels.
    #[error("Invalid input: piece '{0}' has an empty shape")]
    EmptyShape(String),

    /// A piece lists the same voxel more than once.
    #[error("Invalid input: piece '{name}' repeats voxel {voxel:?}")]
    DuplicateVoxel { name: String, voxel: (i32, i32, i32) },

    /// A piece's declared volume disagrees with its shape.
    #[error("Invalid input: piece '{name}' declares volume {declared} but has {actual} voxels")]
    VolumeMismatch {
        name: String,
        declared: usize,
        actual: usize,
    },

    /// A name or selector does not match any catalog piece.
    #[error("Unknown piece: {0}")]
    UnknownPiece(String),

    /// The search was stopped through its cancel flag.
    #[error("Computation cancelled")]
    Cancelled,
}
