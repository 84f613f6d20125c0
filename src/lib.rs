pub mod error;
pub mod harness;
pub mod report;
pub mod sorting;

pub use error::{Error, Result};
pub use harness::{run_experiments, Algorithm, BenchResults, ExperimentConfig};
pub use sorting::{heap_sort, insertion_sort, is_sorted, merge_sort, quick_sort};

// Trait aliasing for readibility
// https://stackoverflow.com/questions/26070559/is-there-any-way-to-create-a-type-alias-for-multiple-traits
pub trait SortTraits: Clone + Ord {}
impl<T: Clone + Ord> SortTraits for T {}
