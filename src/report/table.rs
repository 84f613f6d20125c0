use std::fmt::Write as _;

use crate::harness::{Algorithm, BenchResults};

const SIZE_COLUMN: usize = 10;
const ALGORITHM_COLUMN: usize = 18;

// Pairs that were never measured print as `-`.
pub fn results_table(results: &BenchResults) -> String {
    let mut table = format!("{:<SIZE_COLUMN$}", "Size");
    for algorithm in Algorithm::ALL {
        let _ = write!(table, "{:<ALGORITHM_COLUMN$}", algorithm.name());
    }
    table.push('\n');
    for size in results.all_sizes() {
        let _ = write!(table, "{:<SIZE_COLUMN$}", size);
        for algorithm in Algorithm::ALL {
            let cell = match results.mean(algorithm, size) {
                Some(secs) => format!("{secs:.6}"),
                None => "-".to_string(),
            };
            let _ = write!(table, "{cell:<ALGORITHM_COLUMN$}");
        }
        table.push('\n');
    }
    table
}

pub fn summary(results: &BenchResults) -> String {
    let mut out = String::new();
    for (algorithm, by_size) in results.iter() {
        let _ = writeln!(out, "\nAlgorithm: {algorithm}");
        for (size, secs) in by_size {
            let _ = writeln!(out, "  n={size}: {secs:.6} sec");
        }
    }
    out
}
