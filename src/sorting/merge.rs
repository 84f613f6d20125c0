use std::cmp::Ordering;

use crate::SortTraits;

pub fn merge_sort<T: SortTraits>(input: &[T]) -> Vec<T> {
    if input.len() <= 1 {
        return input.to_vec();
    }
    let mid = input.len() / 2;
    let left = merge_sort(&input[..mid]);
    let right = merge_sort(&input[mid..]);
    merge(&left, &right)
}

// Ties are taken from `left` first, which keeps `merge_sort` stable.
pub fn merge<T: SortTraits>(left: &[T], right: &[T]) -> Vec<T> {
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut id1 = 0;
    let mut id2 = 0;
    while id1 < left.len() && id2 < right.len() {
        match left[id1].cmp(&right[id2]) {
            Ordering::Less | Ordering::Equal => {
                merged.push(left[id1].clone());
                id1 += 1;
            }
            Ordering::Greater => {
                merged.push(right[id2].clone());
                id2 += 1;
            }
        }
    }
    merged.extend_from_slice(&left[id1..]);
    merged.extend_from_slice(&right[id2..]);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_test() {
        let vec1 = [4, 5, 6];
        let vec2 = [1, 2, 3];
        assert_eq!(merge(&vec1[..2], &vec2[1..]), vec![2, 3, 4, 5]);
        assert_eq!(merge(&vec1, &[]), vec![4, 5, 6]);
    }

    #[test]
    fn sort_small_vec() {
        let test_vec = vec![15, 53, 1, 24, 3];
        assert_eq!(merge_sort(&test_vec), vec![1, 3, 15, 24, 53]);
        // input is not consumed
        assert_eq!(test_vec, vec![15, 53, 1, 24, 3]);
    }

    #[test]
    fn sort_odd_length_with_duplicates() {
        let test_vec = vec![15, 53, 1, 24, 25, 3, 37, 12, 56, 1, 24];
        assert_eq!(
            merge_sort(&test_vec),
            vec![1, 1, 3, 12, 15, 24, 24, 25, 37, 53, 56]
        );
    }
}
