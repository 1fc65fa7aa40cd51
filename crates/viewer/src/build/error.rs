//! Load and weld errors

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Optional per-vertex channel of a mesh description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Normals,
    SlopeAngles,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Normals => f.write_str("vertex_normals"),
            Channel::SlopeAngles => f.write_str("slope_angles"),
        }
    }
}

/// The description cannot be welded. Nothing is built when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedInputError {
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    FaceIndexOutOfRange {
        face: usize,
        index: i64,
        vertex_count: usize,
    },
    #[error("{channel} has {len} entries, expected {expected} (one per vertex)")]
    ChannelLengthMismatch {
        channel: Channel,
        len: usize,
        expected: usize,
    },
}

/// Failure to turn a file or JSON string into a welded mesh
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid mesh JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Malformed(#[from] MalformedInputError),
}
