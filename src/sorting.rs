mod heap;
mod insertion;
mod merge;
mod quick;

pub use heap::{heap_sort, heapify};
pub use insertion::insertion_sort;
pub use merge::{merge, merge_sort};
pub use quick::quick_sort;

pub fn is_sorted<T: PartialOrd>(values: &[T]) -> bool {
    values.windows(2).all(|pair| pair[0] <= pair[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ordering only looks at `key`
    #[derive(Debug, Clone)]
    struct Tagged {
        key: u8,
        pos: usize,
    }

    impl PartialEq for Tagged {
        fn eq(&self, other: &Self) -> bool {
            self.key == other.key
        }
    }
    impl Eq for Tagged {}
    impl PartialOrd for Tagged {
        fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
            Some(self.cmp(other))
        }
    }
    impl Ord for Tagged {
        fn cmp(&self, other: &Self) -> std::cmp::Ordering {
            self.key.cmp(&other.key)
        }
    }

    fn tag(keys: &[u8]) -> Vec<Tagged> {
        keys.iter()
            .enumerate()
            .map(|(pos, &key)| Tagged { key, pos })
            .collect()
    }

    fn is_stable(sorted: &[Tagged]) -> bool {
        sorted
            .windows(2)
            .all(|w| w[0].key != w[1].key || w[0].pos < w[1].pos)
    }

    fn reference(values: &[i64]) -> Vec<i64> {
        let mut expected = values.to_vec();
        expected.sort();
        expected
    }

    #[test]
    fn is_sorted_test() {
        assert!(is_sorted::<i32>(&[]));
        assert!(is_sorted(&[7]));
        assert!(is_sorted(&[1, 1, 2, 9]));
        assert!(!is_sorted(&[1, 3, 2]));
    }

    #[test]
    fn trivial_inputs_unchanged() {
        let empty: Vec<i32> = vec![];
        let mut v = empty.clone();
        insertion_sort(&mut v);
        assert_eq!(v, empty);
        heap_sort(&mut v);
        assert_eq!(v, empty);
        assert_eq!(merge_sort(&empty), empty);
        assert_eq!(quick_sort(&empty), empty);

        let single = vec![42];
        let mut v = single.clone();
        insertion_sort(&mut v);
        assert_eq!(v, single);
        heap_sort(&mut v);
        assert_eq!(v, single);
        assert_eq!(merge_sort(&single), single);
        assert_eq!(quick_sort(&single), single);
    }

    #[test]
    fn stable_sorts_keep_equal_keys_in_order() {
        let input = tag(&[3, 1, 3, 2, 1, 3, 2, 1]);

        let mut by_insertion = input.clone();
        insertion_sort(&mut by_insertion);
        assert!(is_sorted(&by_insertion));
        assert!(is_stable(&by_insertion));

        let by_merge = merge_sort(&input);
        assert!(is_sorted(&by_merge));
        assert!(is_stable(&by_merge));
    }

    proptest! {
        #[test]
        fn insertion_sort_matches_std(values in prop::collection::vec(any::<i64>(), 0..200)) {
            let mut sorted = values.clone();
            insertion_sort(&mut sorted);
            prop_assert_eq!(sorted, reference(&values));
        }

        #[test]
        fn merge_sort_matches_std(values in prop::collection::vec(any::<i64>(), 0..500)) {
            prop_assert_eq!(merge_sort(&values), reference(&values));
        }

        #[test]
        fn heap_sort_matches_std(values in prop::collection::vec(any::<i64>(), 0..500)) {
            let mut sorted = values.clone();
            heap_sort(&mut sorted);
            prop_assert_eq!(sorted, reference(&values));
        }

        #[test]
        fn quick_sort_matches_std(values in prop::collection::vec(any::<i64>(), 0..500)) {
            prop_assert_eq!(quick_sort(&values), reference(&values));
        }

        #[test]
        fn stable_sorts_are_stable(keys in prop::collection::vec(0u8..8, 0..120)) {
            let input = tag(&keys);
            let mut by_insertion = input.clone();
            insertion_sort(&mut by_insertion);
            prop_assert!(is_stable(&by_insertion));
            prop_assert!(is_stable(&merge_sort(&input)));
        }
    }
}
