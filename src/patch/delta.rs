use std::fmt;

use crate::{err::PatchError, patch::Chunk};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeltaKind {
    Insert,
    Delete,
    Change,
}

impl fmt::Display for DeltaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Insert => "insert",
                Self::Delete => "delete",
                Self::Change => "change",
            }
        )
    }
}

/// A single edit of an ordered sequence.
///
/// `original` locates the edit in the source sequence, `revised` in the target
/// sequence. Inserts have an empty `original`, deletes an empty `revised`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Delta<T> {
    Insert {
        original: Chunk<T>,
        revised: Chunk<T>,
    },
    Delete {
        original: Chunk<T>,
        revised: Chunk<T>,
    },
    Change {
        original: Chunk<T>,
        revised: Chunk<T>,
    },
}

impl<T> Delta<T> {
    pub fn insert(original: Chunk<T>, revised: Chunk<T>) -> Result<Self, PatchError> {
        if !original.is_empty() {
            return Err(malformed(DeltaKind::Insert, "original chunk must be empty"));
        }
        if revised.is_empty() {
            return Err(malformed(DeltaKind::Insert, "revised chunk must not be empty"));
        }
        Ok(Self::Insert { original, revised })
    }

    pub fn delete(original: Chunk<T>, revised: Chunk<T>) -> Result<Self, PatchError> {
        if original.is_empty() {
            return Err(malformed(DeltaKind::Delete, "original chunk must not be empty"));
        }
        if !revised.is_empty() {
            return Err(malformed(DeltaKind::Delete, "revised chunk must be empty"));
        }
        Ok(Self::Delete { original, revised })
    }

    pub fn change(original: Chunk<T>, revised: Chunk<T>) -> Result<Self, PatchError> {
        if original.is_empty() || revised.is_empty() {
            return Err(malformed(DeltaKind::Change, "both chunks must not be empty"));
        }
        Ok(Self::Change { original, revised })
    }

    pub fn kind(&self) -> DeltaKind {
        match self {
            Self::Insert { .. } => DeltaKind::Insert,
            Self::Delete { .. } => DeltaKind::Delete,
            Self::Change { .. } => DeltaKind::Change,
        }
    }

    pub fn original(&self) -> &Chunk<T> {
        match self {
            Self::Insert { original, .. }
            | Self::Delete { original, .. }
            | Self::Change { original, .. } => original,
        }
    }

    pub fn revised(&self) -> &Chunk<T> {
        match self {
            Self::Insert { revised, .. }
            | Self::Delete { revised, .. }
            | Self::Change { revised, .. } => revised,
        }
    }

    /// Applies the edit to `target` in place.
    ///
    /// The original chunk must lie within `target`, otherwise
    /// [`PatchError::OutOfBounds`] is returned and `target` is left untouched.
    pub fn apply_to(&self, target: &mut Vec<T>) -> Result<(), PatchError>
    where
        T: Clone,
    {
        let original = self.original();
        original.check_bounds(target.len())?;
        let position = original.position();
        match self {
            Self::Delete { original, .. } => {
                target.drain(position..original.end());
            }
            Self::Insert { revised, .. } => {
                target.splice(position..position, revised.elements().iter().cloned());
            }
            Self::Change { original, revised } => {
                target.splice(position..original.end(), revised.elements().iter().cloned());
            }
        }
        log::trace!("applied {} at {}", self.kind(), position);
        Ok(())
    }

    /// Undoes the edit on a sequence it has been applied to.
    ///
    /// The revised chunk must lie within `target`.
    pub fn restore(&self, target: &mut Vec<T>) -> Result<(), PatchError>
    where
        T: Clone,
    {
        let revised = self.revised();
        revised.check_bounds(target.len())?;
        let position = revised.position();
        match self {
            Self::Insert { revised, .. } => {
                target.drain(position..revised.end());
            }
            Self::Delete { original, .. } => {
                target.splice(position..position, original.elements().iter().cloned());
            }
            Self::Change { original, revised } => {
                target.splice(position..revised.end(), original.elements().iter().cloned());
            }
        }
        log::trace!("restored {} at {}", self.kind(), position);
        Ok(())
    }

    /// Checks that `target` holds the original chunk where this edit expects it.
    pub fn verify(&self, target: &[T]) -> Result<(), PatchError>
    where
        T: PartialEq,
    {
        self.original().verify(target)
    }
}

fn malformed(kind: DeltaKind, reason: &'static str) -> PatchError {
    PatchError::MalformedDelta { kind, reason }
}

impl<T: fmt::Debug> fmt::Display for Delta<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} {} -> {}]",
            self.kind(),
            self.original(),
            self.revised()
        )
    }
}
