mod chunk;
mod delta;
mod myers;

pub use chunk::Chunk;
pub use delta::{Delta, DeltaKind};

use std::{cmp::Ordering, fmt, sync::Arc};

use crate::err::PatchError;

pub type DeltaOrdering<T> = Arc<dyn Fn(&Delta<T>, &Delta<T>) -> Ordering + Send + Sync>;

/// An ordered collection of deltas turning one sequence into another.
pub struct Patch<T> {
    deltas: Vec<Delta<T>>,
    ordering: DeltaOrdering<T>,
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Patch<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            deltas: self.deltas.clone(),
            ordering: Arc::clone(&self.ordering),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Patch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Patch")
            .field("deltas", &self.deltas)
            .finish_non_exhaustive()
    }
}

impl<T> Patch<T> {
    /// An empty patch ordering its deltas by original position.
    pub fn new() -> Self {
        Self::with_ordering(|a: &Delta<T>, b: &Delta<T>| {
            a.original().position().cmp(&b.original().position())
        })
    }

    pub fn with_ordering<F>(ordering: F) -> Self
    where
        F: Fn(&Delta<T>, &Delta<T>) -> Ordering + Send + Sync + 'static,
    {
        Self {
            deltas: Vec::new(),
            ordering: Arc::new(ordering),
        }
    }

    /// Appends a delta. Positions are only checked when the patch is applied.
    pub fn add_delta(&mut self, delta: Delta<T>) {
        self.deltas.push(delta);
    }

    pub fn deltas(&self) -> &[Delta<T>] {
        &self.deltas
    }

    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    /// Applies every delta to a copy of `target` and returns the result.
    ///
    /// Deltas are sorted by the patch ordering and applied from the last to
    /// the first, so an applied edit never shifts the position of an edit
    /// still waiting at a lower index. On failure nothing is returned and
    /// `target` is unchanged.
    pub fn apply_to(&self, target: &[T]) -> Result<Vec<T>, PatchError>
    where
        T: Clone,
    {
        let mut working = target.to_vec();
        for delta in self.sorted(|a, b| (self.ordering)(*a, *b)).into_iter().rev() {
            delta.apply_to(&mut working)?;
        }
        log::debug!(
            "applied {} deltas: {} -> {} elements",
            self.deltas.len(),
            target.len(),
            working.len()
        );
        Ok(working)
    }

    /// Turns a sequence produced by [`apply_to`](Self::apply_to) back into
    /// the source sequence.
    pub fn restore(&self, target: &[T]) -> Result<Vec<T>, PatchError>
    where
        T: Clone,
    {
        let mut working = target.to_vec();
        let by_revised = |a: &&Delta<T>, b: &&Delta<T>| {
            a.revised().position().cmp(&b.revised().position())
        };
        for delta in self.sorted(by_revised).into_iter().rev() {
            delta.restore(&mut working)?;
        }
        log::debug!(
            "restored {} deltas: {} -> {} elements",
            self.deltas.len(),
            target.len(),
            working.len()
        );
        Ok(working)
    }

    fn sorted<F>(&self, compare: F) -> Vec<&Delta<T>>
    where
        F: FnMut(&&Delta<T>, &&Delta<T>) -> Ordering,
    {
        let mut snapshot: Vec<&Delta<T>> = self.deltas.iter().collect();
        snapshot.sort_by(compare);
        snapshot
    }
}

impl<T> FromIterator<Delta<T>> for Patch<T> {
    fn from_iter<I: IntoIterator<Item = Delta<T>>>(iter: I) -> Self {
        let mut patch = Self::new();
        for delta in iter {
            patch.add_delta(delta);
        }
        patch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn delete_b() -> Delta<char> {
        Delta::delete(
            Chunk::new(1, seq("B")).unwrap(),
            Chunk::new(1, Vec::new()).unwrap(),
        )
        .unwrap()
    }

    fn change_d() -> Delta<char> {
        Delta::change(
            Chunk::new(3, seq("D")).unwrap(),
            Chunk::new(3, seq("XY")).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_apply_in_descending_order() {
        let mut patch = Patch::new();
        patch.add_delta(delete_b());
        patch.add_delta(change_d());
        assert_eq!(patch.apply_to(&seq("ABCDE")).unwrap(), seq("ACXYE"));

        // insertion order of the deltas does not matter
        let patch: Patch<char> = [change_d(), delete_b()].into_iter().collect();
        assert_eq!(patch.apply_to(&seq("ABCDE")).unwrap(), seq("ACXYE"));
    }

    #[test]
    fn test_ascending_order_is_wrong() {
        let mut ascending = seq("ABCDE");
        delete_b().apply_to(&mut ascending).unwrap();
        change_d().apply_to(&mut ascending).unwrap();
        // position 3 now holds E instead of D
        assert_eq!(ascending, seq("ACDXY"));

        let patch: Patch<char> = [delete_b(), change_d()].into_iter().collect();
        let descending = patch.apply_to(&seq("ABCDE")).unwrap();
        assert_ne!(descending, ascending);
        assert_eq!(descending, seq("ACXYE"));
    }

    #[test]
    fn test_out_of_bounds_fails_without_partial_result() {
        let source = seq("ABCDE");
        let mut patch = Patch::new();
        patch.add_delta(delete_b());
        patch.add_delta(
            Delta::change(Chunk::at(4, seq("EF")), Chunk::at(4, seq("Z"))).unwrap(),
        );
        assert_eq!(
            patch.apply_to(&source),
            Err(PatchError::OutOfBounds {
                position: 4,
                size: 2,
                len: 5
            })
        );
        assert_eq!(source, seq("ABCDE"));
    }

    #[test]
    fn test_huge_position_fails_instead_of_overflowing() {
        let mut patch = Patch::new();
        patch.add_delta(Delta::Delete {
            original: Chunk::at(usize::MAX, vec!['A']),
            revised: Chunk::empty(0),
        });
        assert_eq!(
            patch.apply_to(&seq("ABC")),
            Err(PatchError::OutOfBounds {
                position: usize::MAX,
                size: 1,
                len: 3
            })
        );

        let mut patch = Patch::new();
        patch.add_delta(Delta::Insert {
            original: Chunk::empty(0),
            revised: Chunk::at(usize::MAX, vec!['A']),
        });
        assert!(patch.restore(&seq("ABC")).is_err());
    }

    #[test]
    fn test_error_after_earlier_deltas_applied() {
        // the higher delta applies fine, the lower one then fails
        let source = seq("ABC");
        let mut patch = Patch::new();
        patch.add_delta(Delta::delete(Chunk::at(2, seq("C")), Chunk::empty(2)).unwrap());
        patch.add_delta(Delta::delete(Chunk::at(0, seq("ABCD")), Chunk::empty(0)).unwrap());
        assert!(patch.apply_to(&source).is_err());
        assert_eq!(source, seq("ABC"));
    }

    #[test]
    fn test_custom_ordering() {
        // reversed ordering applies the lowest delta first, like the broken
        // ascending walk
        let mut patch = Patch::with_ordering(|a: &Delta<char>, b: &Delta<char>| {
            b.original().position().cmp(&a.original().position())
        });
        patch.add_delta(delete_b());
        patch.add_delta(change_d());
        assert_eq!(patch.apply_to(&seq("ABCDE")).unwrap(), seq("ACDXY"));
    }

    #[test]
    fn test_restore() {
        let patch: Patch<char> = [
            delete_b(),
            Delta::change(Chunk::at(3, seq("D")), Chunk::at(2, seq("XY"))).unwrap(),
        ]
        .into_iter()
        .collect();
        let patched = patch.apply_to(&seq("ABCDE")).unwrap();
        assert_eq!(patched, seq("ACXYE"));
        assert_eq!(patch.restore(&patched).unwrap(), seq("ABCDE"));
    }

    #[test]
    fn test_empty_patch_is_identity() {
        let patch = Patch::<char>::new();
        assert!(patch.is_empty());
        assert_eq!(patch.apply_to(&seq("ABC")).unwrap(), seq("ABC"));
    }
}
