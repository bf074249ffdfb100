use thiserror::Error;

use crate::patch::DeltaKind;

/// Errors raised while comparing two instances property by property.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DiffError {
    /// A property accessor could not read its value from the given instance.
    #[error("cannot read property `{property}`: {message}")]
    PropertyRead { property: String, message: String },
}

impl DiffError {
    pub fn property_read<M: ToString>(property: &str, message: M) -> Self {
        Self::PropertyRead {
            property: property.to_string(),
            message: message.to_string(),
        }
    }
}

/// Errors raised while building or applying chunks, deltas and patches.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatchError {
    #[error("chunk position must be non-negative, got {0}")]
    InvalidPosition(i64),

    #[error("malformed {kind} delta: {reason}")]
    MalformedDelta {
        kind: DeltaKind,
        reason: &'static str,
    },

    #[error("chunk [{position}, {position}+{size}) is out of bounds for sequence of length {len}")]
    OutOfBounds {
        position: usize,
        size: usize,
        len: usize,
    },

    #[error("chunk content does not match the sequence at position {position}")]
    ContentMismatch { position: usize },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Diff(#[from] DiffError),

    #[error(transparent)]
    Patch(#[from] PatchError),

    #[error("{msg}: {source}")]
    Io {
        msg: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn from_msg_io(msg: &str, err: std::io::Error) -> Self {
        Self::Io {
            msg: msg.to_string(),
            source: err,
        }
    }
}
