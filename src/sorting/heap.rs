use crate::SortTraits;

pub fn heap_sort<T: SortTraits>(values: &mut [T]) {
    let n = values.len();
    for i in (0..n / 2).rev() {
        heapify(values, n, i);
    }
    for end in (1..n).rev() {
        values.swap(0, end);
        heapify(values, end, 0);
    }
}

// Sift `values[root]` down; only the first `heap_len` elements are heap.
pub fn heapify<T: SortTraits>(values: &mut [T], heap_len: usize, root: usize) {
    let mut root = root;
    loop {
        let left = 2 * root + 1;
        let right = left + 1;
        let mut largest = root;
        if left < heap_len && values[left] > values[largest] {
            largest = left;
        }
        if right < heap_len && values[right] > values[largest] {
            largest = right;
        }
        if largest == root {
            return;
        }
        values.swap(root, largest);
        root = largest;
    }
}
