//! # Grouping Engine
//!
//! Partitions a locale set into equivalence classes keyed by the fact value
//! each locale produces, then picks the class whose value becomes the
//! implicit default of a compaction record.
//!
//! ## Majority Rule
//!
//! [`Grouping::select_default`] walks the values in ascending order and
//! replaces its current best only when a bucket is *strictly* larger. When
//! two buckets tie for the largest size, the one visited first, i.e. the
//! smaller value, is kept. Tables generated by different runs or platforms
//! depend on this rule to be byte-identical.
//!
//! ## Invariant
//!
//! Every input locale lands in exactly one bucket, and no bucket is empty.

use std::collections::{BTreeMap, BTreeSet};

use crate::identity::LocaleId;

/// A partition of a locale set by fact value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grouping<V> {
    groups: BTreeMap<V, BTreeSet<LocaleId>>,
}

impl<V: Ord> Grouping<V> {
    /// Bucket `locales` by the value `fact` returns for each of them.
    ///
    /// An empty locale set yields an empty grouping.
    pub fn group<'a, I, F>(locales: I, mut fact: F) -> Self
    where
        I: IntoIterator<Item = &'a LocaleId>,
        F: FnMut(&LocaleId) -> V,
    {
        let mut groups: BTreeMap<V, BTreeSet<LocaleId>> = BTreeMap::new();
        for locale in locales {
            groups.entry(fact(locale)).or_default().insert(locale.clone());
        }
        Self { groups }
    }

    /// Like [`Grouping::group`] for a fallible fact function. The first
    /// error aborts grouping and is returned unchanged.
    pub fn try_group<'a, I, F, E>(locales: I, mut fact: F) -> Result<Self, E>
    where
        I: IntoIterator<Item = &'a LocaleId>,
        F: FnMut(&LocaleId) -> Result<V, E>,
    {
        let mut groups: BTreeMap<V, BTreeSet<LocaleId>> = BTreeMap::new();
        for locale in locales {
            groups.entry(fact(locale)?).or_default().insert(locale.clone());
        }
        Ok(Self { groups })
    }

    /// The value shared by the most locales, or `None` for an empty grouping.
    ///
    /// Ties go to the smallest value under `V`'s order.
    pub fn select_default(&self) -> Option<&V> {
        let mut best: Option<(&V, usize)> = None;
        for (value, locales) in &self.groups {
            let size = locales.len();
            if best.map_or(true, |(_, most)| size > most) {
                best = Some((value, size));
            }
        }
        best.map(|(value, _)| value)
    }

    /// The locales that produce `value`.
    pub fn locales_for(&self, value: &V) -> Option<&BTreeSet<LocaleId>> {
        self.groups.get(value)
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if no locale was grouped.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of locales across all buckets.
    pub fn locale_count(&self) -> usize {
        self.groups.values().map(BTreeSet::len).sum()
    }

    /// Iterate buckets in ascending value order.
    pub fn iter(&self) -> impl Iterator<Item = (&V, &BTreeSet<LocaleId>)> {
        self.groups.iter()
    }

    /// Consume the grouping, returning its buckets.
    pub fn into_groups(self) -> BTreeMap<V, BTreeSet<LocaleId>> {
        self.groups
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn locale_set() -> impl Strategy<Value = BTreeSet<LocaleId>> {
        prop::collection::btree_set("[a-z]{2,3}(-[A-Z]{2})?", 0..24).prop_map(|tags| {
            tags.iter()
                .map(|t| LocaleId::parse(t).unwrap())
                .collect()
        })
    }

    proptest! {
        /// Buckets cover the input exactly and never overlap.
        #[test]
        fn partition_invariant(ls in locale_set(), modulus in 1usize..6) {
            let g = Grouping::group(&ls, |l| l.as_str().len() % modulus);
            let mut union = BTreeSet::new();
            let mut total = 0;
            for (_, bucket) in g.iter() {
                prop_assert!(!bucket.is_empty());
                total += bucket.len();
                union.extend(bucket.iter().cloned());
            }
            prop_assert_eq!(total, ls.len(), "a locale appears in two buckets");
            prop_assert_eq!(union, ls);
        }

        /// The default has maximum bucket size and is the smallest value
        /// among the buckets of that size.
        #[test]
        fn default_is_smallest_of_the_largest(ls in locale_set(), modulus in 1usize..6) {
            let g = Grouping::group(&ls, |l| {
                l.as_str().bytes().map(usize::from).sum::<usize>() % modulus
            });
            match g.select_default() {
                None => prop_assert!(ls.is_empty()),
                Some(chosen) => {
                    let max = g.iter().map(|(_, b)| b.len()).max().unwrap();
                    let smallest_max = g
                        .iter()
                        .find(|(_, b)| b.len() == max)
                        .map(|(v, _)| v)
                        .unwrap();
                    prop_assert_eq!(chosen, smallest_max);
                }
            }
        }
    }
}
