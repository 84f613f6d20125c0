use crate::SortTraits;

// The pivot is positional, so inputs crafted against the middle index
// still hit the quadratic case.
pub fn quick_sort<T: SortTraits>(input: &[T]) -> Vec<T> {
    if input.len() <= 1 {
        return input.to_vec();
    }
    let pivot = &input[input.len() / 2];
    let mut less = Vec::new();
    let mut equal = Vec::new();
    let mut greater = Vec::new();
    for value in input {
        match value.cmp(pivot) {
            std::cmp::Ordering::Less => less.push(value.clone()),
            std::cmp::Ordering::Equal => equal.push(value.clone()),
            std::cmp::Ordering::Greater => greater.push(value.clone()),
        }
    }
    let mut sorted = quick_sort(&less);
    sorted.append(&mut equal);
    sorted.append(&mut quick_sort(&greater));
    sorted
}
