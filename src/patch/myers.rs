use std::hash::Hash;

use similar::{Algorithm, DiffOp, capture_diff_slices};

use crate::patch::{Chunk, Delta, Patch};

impl<T> Patch<T>
where
    T: Clone + Hash + Ord,
{
    /// Builds the patch turning `original` into `revised` with the Myers
    /// diff algorithm.
    pub fn from_diff(original: &[T], revised: &[T]) -> Self {
        let ops = capture_diff_slices(Algorithm::Myers, original, revised);
        let mut patch = Self::new();
        for op in ops {
            let delta = match op {
                DiffOp::Equal { .. } => continue,
                DiffOp::Insert {
                    old_index,
                    new_index,
                    new_len,
                } => Delta::Insert {
                    original: Chunk::empty(old_index),
                    revised: Chunk::at(new_index, revised[new_index..new_index + new_len].to_vec()),
                },
                DiffOp::Delete {
                    old_index,
                    old_len,
                    new_index,
                } => Delta::Delete {
                    original: Chunk::at(old_index, original[old_index..old_index + old_len].to_vec()),
                    revised: Chunk::empty(new_index),
                },
                DiffOp::Replace {
                    old_index,
                    old_len,
                    new_index,
                    new_len,
                } => Delta::Change {
                    original: Chunk::at(old_index, original[old_index..old_index + old_len].to_vec()),
                    revised: Chunk::at(new_index, revised[new_index..new_index + new_len].to_vec()),
                },
            };
            patch.add_delta(delta);
        }
        log::debug!(
            "diffed {} -> {} elements into {} deltas",
            original.len(),
            revised.len(),
            patch.len()
        );
        patch
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        patch::{DeltaKind, Patch},
        util::test::create_test_bytes,
    };

    #[test]
    fn test_from_diff_kinds() {
        let original: Vec<char> = "ABCDE".chars().collect();
        let revised: Vec<char> = "ACXYE".chars().collect();
        let patch = Patch::from_diff(&original, &revised);
        assert!(!patch.is_empty());
        assert!(
            patch
                .deltas()
                .iter()
                .any(|d| d.kind() == DeltaKind::Delete || d.kind() == DeltaKind::Change)
        );
        assert_eq!(patch.apply_to(&original).unwrap(), revised);
    }

    #[test]
    fn test_identical_sequences_give_empty_patch() {
        let original = vec![1, 2, 3];
        assert!(Patch::from_diff(&original, &original).is_empty());
    }

    #[test]
    fn test_diff_patch_restore() {
        let mut old_iter = create_test_bytes(114514);
        let mut new_iter = create_test_bytes(1919810);
        for _ in 0..10_000 {
            let old = old_iter.next().unwrap();
            let new = new_iter.next().unwrap();
            let patch = Patch::from_diff(&old, &new);
            for delta in patch.deltas() {
                delta.verify(&old).unwrap();
            }
            let patched_old = patch.apply_to(&old).unwrap();
            let restored_new = patch.restore(&new).unwrap();
            assert_eq!(patched_old, new, "old: {:?}; new: {:?}", old, new);
            assert_eq!(restored_new, old, "old: {:?}; new: {:?}", old, new);
        }
    }
}
