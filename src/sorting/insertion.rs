use crate::SortTraits;

pub fn insertion_sort<T: SortTraits>(values: &mut [T]) {
    for i in 1..values.len() {
        let key = values[i].clone();
        let mut j = i;
        while j > 0 && values[j - 1] > key {
            values[j] = values[j - 1].clone();
            j -= 1;
        }
        values[j] = key;
    }
}
