//! Mole amounts as an ordered sequence or a species-keyed mapping.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::{BuildHasher, Hash};

use indexmap::IndexMap;
use kf_core::ordered_sum;
use nalgebra::DVector;

/// Anything that can report total moles and whether a species is present.
///
/// Sequences are keyed by position, mappings by their own key type.
pub trait MoleAmounts {
    type Key: Debug;

    /// Sum of all mole amounts [mol].
    fn total(&self) -> f64;

    fn has_species(&self, key: &Self::Key) -> bool;
}

impl MoleAmounts for [f64] {
    type Key = usize;

    fn total(&self) -> f64 {
        ordered_sum(self.iter().copied())
    }

    fn has_species(&self, key: &usize) -> bool {
        *key < self.len()
    }
}

impl MoleAmounts for Vec<f64> {
    type Key = usize;

    fn total(&self) -> f64 {
        self.as_slice().total()
    }

    fn has_species(&self, key: &usize) -> bool {
        *key < self.len()
    }
}

impl<const N: usize> MoleAmounts for [f64; N] {
    type Key = usize;

    fn total(&self) -> f64 {
        self.as_slice().total()
    }

    fn has_species(&self, key: &usize) -> bool {
        *key < N
    }
}

impl MoleAmounts for DVector<f64> {
    type Key = usize;

    fn total(&self) -> f64 {
        self.as_slice().total()
    }

    fn has_species(&self, key: &usize) -> bool {
        *key < self.len()
    }
}

/// Iteration order of a `HashMap` is unspecified, so its total may differ
/// in the last bits between runs; prefer `IndexMap` when that matters.
impl<K, S> MoleAmounts for HashMap<K, f64, S>
where
    K: Hash + Eq + Debug,
    S: BuildHasher,
{
    type Key = K;

    fn total(&self) -> f64 {
        ordered_sum(self.values().copied())
    }

    fn has_species(&self, key: &K) -> bool {
        self.contains_key(key)
    }
}

impl<K, S> MoleAmounts for IndexMap<K, f64, S>
where
    K: Hash + Eq + Debug,
    S: BuildHasher,
{
    type Key = K;

    fn total(&self) -> f64 {
        ordered_sum(self.values().copied())
    }

    fn has_species(&self, key: &K) -> bool {
        self.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequences_and_mappings_agree() {
        let seq = vec![1.0, 2.5, 0.5];
        let map: IndexMap<&str, f64> = [("A", 1.0), ("B", 2.5), ("C", 0.5)].into_iter().collect();
        let hmap: HashMap<&str, f64> = map.iter().map(|(k, v)| (*k, *v)).collect();
        let dv = DVector::from_vec(seq.clone());

        assert_eq!(seq.total(), 4.0);
        assert_eq!(map.total(), 4.0);
        assert_eq!(hmap.total(), 4.0);
        assert_eq!(dv.total(), 4.0);
        assert_eq!([1.0, 3.0].total(), 4.0);

        assert!(seq.has_species(&2));
        assert!(!seq.has_species(&3));
        assert!(map.has_species(&"B"));
        assert!(!hmap.has_species(&"Z"));
    }
}
