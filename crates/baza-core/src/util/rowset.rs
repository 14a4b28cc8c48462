/// A sorted, duplicate-free set of row ids. Kept sorted on every insert so
/// union and intersection fall out as a single sorted merge in O(n+m).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSet {
    ids: Vec<u64>,
}

impl RowSet {
    pub fn new() -> Self {
        RowSet { ids: Vec::new() }
    }

    pub fn from_sorted_unique(ids: Vec<u64>) -> Self {
        debug_assert!(ids.windows(2).all(|w| w[0] < w[1]));
        RowSet { ids }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.ids
    }

    pub fn contains(&self, id: u64) -> bool {
        self.ids.binary_search(&id).is_ok()
    }

    /// Insert `id`, keeping the set sorted and duplicate-free. Returns
    /// `false` if `id` was already present.
    pub fn insert(&mut self, id: u64) -> bool {
        match self.ids.binary_search(&id) {
            Ok(_) => false,
            Err(pos) => {
                self.ids.insert(pos, id);
                true
            }
        }
    }

    /// Remove `id` if present. Returns `true` if it was removed.
    pub fn remove(&mut self, id: u64) -> bool {
        match self.ids.binary_search(&id) {
            Ok(pos) => {
                self.ids.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// The distinct elements of either operand. Unioning a set with itself
    /// (the same reference) is rejected rather than silently cloned.
    pub fn union(&self, other: &RowSet) -> Option<RowSet> {
        if std::ptr::eq(self, other) {
            return None;
        }

        let mut merged = Vec::with_capacity(self.ids.len() + other.ids.len());
        let (mut i, mut j) = (0, 0);
        while i < self.ids.len() && j < other.ids.len() {
            match self.ids[i].cmp(&other.ids[j]) {
                std::cmp::Ordering::Less => {
                    merged.push(self.ids[i]);
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    merged.push(other.ids[j]);
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    merged.push(self.ids[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        merged.extend_from_slice(&self.ids[i..]);
        merged.extend_from_slice(&other.ids[j..]);
        Some(RowSet { ids: merged })
    }

    /// The distinct elements present in both operands, with the same
    /// identity-pointer guard as [`RowSet::union`].
    pub fn intersection(&self, other: &RowSet) -> Option<RowSet> {
        if std::ptr::eq(self, other) {
            return None;
        }

        let mut merged = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < self.ids.len() && j < other.ids.len() {
            match self.ids[i].cmp(&other.ids[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    merged.push(self.ids[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        Some(RowSet { ids: merged })
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.ids.iter().copied()
    }
}

impl FromIterator<u64> for RowSet {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        let mut set = RowSet::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn union_with_self_reference_is_none() {
        let a: RowSet = [1, 2, 3].into_iter().collect();
        assert_eq!(a.union(&a), None);
        assert_eq!(a.intersection(&a), None);
    }

    #[test]
    fn union_of_distinct_copies_is_allowed() {
        let a: RowSet = [1, 2, 3].into_iter().collect();
        let b = a.clone();
        assert_eq!(a.union(&b).unwrap().as_slice(), &[1, 2, 3]);
        assert_eq!(a.intersection(&b).unwrap().as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn union_merges_sorted_and_deduplicates() {
        let a: RowSet = [1, 3, 5].into_iter().collect();
        let b: RowSet = [2, 3, 4].into_iter().collect();
        assert_eq!(a.union(&b).unwrap().as_slice(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn intersection_keeps_only_shared_elements() {
        let a: RowSet = [1, 3, 5].into_iter().collect();
        let b: RowSet = [2, 3, 4].into_iter().collect();
        assert_eq!(a.intersection(&b).unwrap().as_slice(), &[3]);
    }

    #[test]
    fn insert_deduplicates_and_keeps_order() {
        let mut a = RowSet::new();
        assert!(a.insert(5));
        assert!(a.insert(1));
        assert!(!a.insert(5));
        assert_eq!(a.as_slice(), &[1, 5]);
    }

    proptest! {
        #[test]
        fn union_is_commutative(mut xs: Vec<u64>, mut ys: Vec<u64>) {
            xs.truncate(20);
            ys.truncate(20);
            let a: RowSet = xs.iter().copied().collect();
            let b: RowSet = ys.iter().copied().collect();
            prop_assert_eq!(a.union(&b), b.union(&a));
        }

        #[test]
        fn intersection_is_commutative(mut xs: Vec<u64>, mut ys: Vec<u64>) {
            xs.truncate(20);
            ys.truncate(20);
            let a: RowSet = xs.iter().copied().collect();
            let b: RowSet = ys.iter().copied().collect();
            prop_assert_eq!(a.intersection(&b), b.intersection(&a));
        }

        #[test]
        fn union_with_empty_is_identity(mut xs: Vec<u64>) {
            xs.truncate(20);
            let a: RowSet = xs.iter().copied().collect();
            let empty = RowSet::new();
            prop_assert_eq!(a.union(&empty).unwrap(), a.clone());
        }

        #[test]
        fn intersection_with_empty_is_empty(mut xs: Vec<u64>) {
            xs.truncate(20);
            let a: RowSet = xs.iter().copied().collect();
            let empty = RowSet::new();
            prop_assert_eq!(a.intersection(&empty).unwrap(), RowSet::new());
        }

        #[test]
        fn result_sets_never_have_duplicates(mut xs: Vec<u64>, mut ys: Vec<u64>) {
            xs.truncate(20);
            ys.truncate(20);
            let a: RowSet = xs.iter().copied().collect();
            let b: RowSet = ys.iter().copied().collect();
            let u = a.union(&b).unwrap();
            let windows_sorted_unique = u.as_slice().windows(2).all(|w| w[0] < w[1]);
            prop_assert!(windows_sorted_unique);
        }
    }
}
