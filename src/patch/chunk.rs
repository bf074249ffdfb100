use std::fmt;

use crate::err::PatchError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chunk<T> {
    position: usize,
    elements: Vec<T>,
}

impl<T> Chunk<T> {
    pub fn new(position: i64, elements: Vec<T>) -> Result<Self, PatchError> {
        let position =
            usize::try_from(position).map_err(|_| PatchError::InvalidPosition(position))?;
        Ok(Self::at(position, elements))
    }

    pub fn at(position: usize, elements: Vec<T>) -> Self {
        Self { position, elements }
    }

    pub fn empty(position: usize) -> Self {
        Self::at(position, Vec::new())
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    pub fn size(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    // saturates, a saturated end never passes `check_bounds`
    pub fn end(&self) -> usize {
        self.position.saturating_add(self.elements.len())
    }

    pub fn last(&self) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            self.position.checked_add(self.elements.len() - 1)
        }
    }

    pub(crate) fn check_bounds(&self, len: usize) -> Result<(), PatchError> {
        match self.position.checked_add(self.size()) {
            Some(end) if end <= len => Ok(()),
            _ => Err(PatchError::OutOfBounds {
                position: self.position,
                size: self.size(),
                len,
            }),
        }
    }

    pub fn verify(&self, target: &[T]) -> Result<(), PatchError>
    where
        T: PartialEq,
    {
        self.check_bounds(target.len())?;
        if target[self.position..self.end()] != self.elements[..] {
            return Err(PatchError::ContentMismatch {
                position: self.position,
            });
        }
        Ok(())
    }
}

impl<T: fmt::Debug> fmt::Display for Chunk<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{} {:?}", self.position, self.elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_position_is_rejected() {
        assert_eq!(
            Chunk::new(-1, vec!['a']),
            Err(PatchError::InvalidPosition(-1))
        );
        let chunk = Chunk::new(2, vec!['a', 'b']).unwrap();
        assert_eq!(chunk.position(), 2);
        assert_eq!(chunk.size(), 2);
        assert_eq!(chunk.last(), Some(3));
        assert_eq!(Chunk::<char>::empty(0).last(), None);
    }

    #[test]
    fn test_position_near_usize_max_is_out_of_bounds() {
        let chunk = Chunk::at(usize::MAX, vec![1u8]);
        assert_eq!(chunk.end(), usize::MAX);
        assert_eq!(chunk.last(), Some(usize::MAX));
        assert_eq!(
            chunk.verify(&[1, 2, 3]),
            Err(PatchError::OutOfBounds {
                position: usize::MAX,
                size: 1,
                len: 3
            })
        );
    }

    #[test]
    fn test_verify() {
        let target = ['a', 'b', 'c'];
        assert!(Chunk::at(1, vec!['b', 'c']).verify(&target).is_ok());
        assert!(Chunk::<char>::empty(3).verify(&target).is_ok());
        assert_eq!(
            Chunk::at(1, vec!['b', 'x']).verify(&target),
            Err(PatchError::ContentMismatch { position: 1 })
        );
        assert_eq!(
            Chunk::at(2, vec!['c', 'd']).verify(&target),
            Err(PatchError::OutOfBounds {
                position: 2,
                size: 2,
                len: 3
            })
        );
    }
}
