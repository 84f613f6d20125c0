use std::collections::BTreeMap;
use std::fmt;
use std::hint::black_box;
use std::ops::RangeInclusive;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::sorting::{heap_sort, insertion_sort, is_sorted, merge_sort, quick_sort};
use crate::SortTraits;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    #[serde(rename = "Insertion Sort")]
    Insertion,
    #[serde(rename = "Merge Sort")]
    Merge,
    #[serde(rename = "Heap Sort")]
    Heap,
    #[serde(rename = "Quick Sort")]
    Quick,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Insertion,
        Algorithm::Merge,
        Algorithm::Heap,
        Algorithm::Quick,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Insertion => "Insertion Sort",
            Algorithm::Merge => "Merge Sort",
            Algorithm::Heap => "Heap Sort",
            Algorithm::Quick => "Quick Sort",
        }
    }

    pub fn sort<T: SortTraits>(self, mut data: Vec<T>) -> Vec<T> {
        match self {
            Algorithm::Insertion => {
                insertion_sort(&mut data);
                data
            }
            Algorithm::Merge => merge_sort(&data),
            Algorithm::Heap => {
                heap_sort(&mut data);
                data
            }
            Algorithm::Quick => quick_sort(&data),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    pub seed: u64,
    // kept small to bound insertion sort's quadratic runtime
    pub insertion_sizes: Vec<usize>,
    pub sizes: Vec<usize>,
    pub trials: usize,
    pub value_range: RangeInclusive<u32>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        ExperimentConfig {
            seed: 42,
            insertion_sizes: vec![100, 300, 500, 800, 1200],
            sizes: vec![100, 500, 1000, 2000, 5000, 10000],
            trials: 5,
            value_range: 1..=1_000_000,
        }
    }
}

impl ExperimentConfig {
    pub fn sizes_for(&self, algorithm: Algorithm) -> &[usize] {
        match algorithm {
            Algorithm::Insertion => &self.insertion_sizes,
            _ => &self.sizes,
        }
    }
}

// Mean seconds per (algorithm, size), plus the parameters that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchResults {
    pub seed: u64,
    pub trials: usize,
    timings: BTreeMap<Algorithm, BTreeMap<usize, f64>>,
}

impl BenchResults {
    pub fn new(seed: u64, trials: usize) -> Self {
        BenchResults {
            seed,
            trials,
            timings: Algorithm::ALL
                .iter()
                .map(|&algorithm| (algorithm, BTreeMap::new()))
                .collect(),
        }
    }

    pub fn record(&mut self, algorithm: Algorithm, size: usize, mean_secs: f64) {
        self.timings
            .entry(algorithm)
            .or_default()
            .insert(size, mean_secs);
    }

    pub fn mean(&self, algorithm: Algorithm, size: usize) -> Option<f64> {
        self.timings.get(&algorithm)?.get(&size).copied()
    }

    pub fn sizes(&self, algorithm: Algorithm) -> Vec<usize> {
        self.timings
            .get(&algorithm)
            .map(|by_size| by_size.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn all_sizes(&self) -> Vec<usize> {
        let mut sizes: Vec<usize> = self
            .timings
            .values()
            .flat_map(|by_size| by_size.keys().copied())
            .collect();
        sizes.sort_unstable();
        sizes.dedup();
        sizes
    }

    pub fn iter(&self) -> impl Iterator<Item = (Algorithm, &BTreeMap<usize, f64>)> {
        self.timings.iter().map(|(&algorithm, by_size)| (algorithm, by_size))
    }
}

pub fn generate_dataset(rng: &mut impl Rng, size: usize, range: RangeInclusive<u32>) -> Vec<u32> {
    (0..size).map(|_| rng.gen_range(range.clone())).collect()
}

pub fn time_trial(algorithm: Algorithm, data: Vec<u32>) -> (Duration, Vec<u32>) {
    time_with(|data| algorithm.sort(data), data)
}

fn time_with(sort: impl Fn(Vec<u32>) -> Vec<u32>, data: Vec<u32>) -> (Duration, Vec<u32>) {
    let start = Instant::now();
    let sorted = black_box(sort(black_box(data)));
    (start.elapsed(), sorted)
}

fn mean_secs(times: &[Duration]) -> f64 {
    if times.is_empty() {
        return 0.0;
    }
    times.iter().map(Duration::as_secs_f64).sum::<f64>() / times.len() as f64
}

fn measure(
    algorithm: Algorithm,
    size: usize,
    config: &ExperimentConfig,
    rng: &mut StdRng,
) -> Result<f64> {
    measure_with(algorithm, |data| algorithm.sort(data), size, config, rng)
}

// Mean over `config.trials` fresh datasets; the first output that is out of
// order or of the wrong length halts the run.
fn measure_with(
    algorithm: Algorithm,
    sort: impl Fn(Vec<u32>) -> Vec<u32>,
    size: usize,
    config: &ExperimentConfig,
    rng: &mut StdRng,
) -> Result<f64> {
    let mut times = Vec::with_capacity(config.trials);
    for trial in 0..config.trials {
        let dataset = generate_dataset(rng, size, config.value_range.clone());
        let (elapsed, sorted) = time_with(&sort, dataset.clone());
        if sorted.len() != dataset.len() || !is_sorted(&sorted) {
            return Err(Error::NotSorted {
                algorithm,
                size,
                trial,
            });
        }
        times.push(elapsed);
    }
    let mean = mean_secs(&times);
    debug!(%algorithm, size, mean, "measured");
    Ok(mean)
}

// A single generator seeded from `config.seed` feeds all trials. Insertion
// sort goes first over its own sizes, then merge, heap and quick sort take
// turns per size.
#[tracing::instrument(skip_all, fields(seed = config.seed, trials = config.trials))]
pub fn run_experiments(config: &ExperimentConfig) -> Result<BenchResults> {
    info!("running experiments");
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut results = BenchResults::new(config.seed, config.trials);

    for &size in &config.insertion_sizes {
        let mean = measure(Algorithm::Insertion, size, config, &mut rng)?;
        results.record(Algorithm::Insertion, size, mean);
    }
    for &size in &config.sizes {
        for algorithm in [Algorithm::Merge, Algorithm::Heap, Algorithm::Quick] {
            let mean = measure(algorithm, size, config, &mut rng)?;
            results.record(algorithm, size, mean);
        }
    }

    info!("experiments finished");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> ExperimentConfig {
        ExperimentConfig {
            insertion_sizes: vec![10, 50],
            sizes: vec![10, 100, 400],
            trials: 2,
            ..ExperimentConfig::default()
        }
    }

    #[test]
    fn default_config_matches_constants() {
        let config = ExperimentConfig::default();
        assert_eq!(config.seed, 42);
        assert_eq!(config.trials, 5);
        assert_eq!(config.sizes_for(Algorithm::Insertion), &[100, 300, 500, 800, 1200]);
        assert_eq!(config.sizes_for(Algorithm::Quick), &[100, 500, 1000, 2000, 5000, 10000]);
    }

    #[test]
    fn dataset_respects_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let data = generate_dataset(&mut rng, 1000, 1..=1_000_000);
        assert_eq!(data.len(), 1000);
        assert!(data.iter().all(|v| (1..=1_000_000).contains(v)));
    }

    #[test]
    fn same_seed_same_dataset() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(
            generate_dataset(&mut a, 100, 1..=1_000_000),
            generate_dataset(&mut b, 100, 1..=1_000_000)
        );
    }

    #[test]
    fn time_trial_sorts_for_every_algorithm() {
        let data = vec![5, 3, 9, 1, 1, 7];
        for algorithm in Algorithm::ALL {
            let (_, sorted) = time_trial(algorithm, data.clone());
            assert_eq!(sorted, vec![1, 1, 3, 5, 7, 9], "{algorithm}");
        }
    }

    #[test]
    fn every_pair_is_recorded() {
        let config = small_config();
        let results = run_experiments(&config).unwrap();
        for algorithm in Algorithm::ALL {
            assert_eq!(results.sizes(algorithm), config.sizes_for(algorithm));
            for &size in config.sizes_for(algorithm) {
                let mean = results.mean(algorithm, size).unwrap();
                assert!(mean >= 0.0);
            }
        }
        assert_eq!(results.all_sizes(), vec![10, 50, 100, 400]);
        assert_eq!(results.trials, 2);
    }

    #[test]
    fn unsorted_output_halts_the_run() {
        let config = small_config();
        let mut rng = StdRng::seed_from_u64(config.seed);
        let identity = measure_with(Algorithm::Quick, |data| data, 50, &config, &mut rng);
        assert!(matches!(
            identity,
            Err(Error::NotSorted {
                algorithm: Algorithm::Quick,
                size: 50,
                trial: 0,
            })
        ));
    }

    #[test]
    fn truncated_output_halts_the_run() {
        let config = small_config();
        let mut rng = StdRng::seed_from_u64(config.seed);
        let truncate = |data: Vec<u32>| {
            let mut sorted = Algorithm::Merge.sort(data);
            sorted.pop();
            sorted
        };
        let err = measure_with(Algorithm::Merge, truncate, 10, &config, &mut rng).unwrap_err();
        assert!(matches!(err, Error::NotSorted { trial: 0, .. }));
        assert_eq!(
            err.to_string(),
            "Merge Sort returned an unsorted sequence (n=10, trial 0)"
        );
    }

    #[test]
    fn correct_sort_passes_every_trial() {
        let config = small_config();
        let mut rng = StdRng::seed_from_u64(config.seed);
        let heap = |data| Algorithm::Heap.sort(data);
        let mean = measure_with(Algorithm::Heap, heap, 100, &config, &mut rng);
        assert!(mean.is_ok_and(|m| m >= 0.0));
    }

    #[test]
    fn iter_follows_reporting_order() {
        let results = BenchResults::new(1, 1);
        let order: Vec<Algorithm> = results.iter().map(|(algorithm, _)| algorithm).collect();
        assert_eq!(order, Algorithm::ALL.to_vec());
    }

    #[test]
    fn mean_of_no_trials_is_zero() {
        assert_eq!(mean_secs(&[]), 0.0);
        let times = [Duration::from_millis(10), Duration::from_millis(30)];
        assert!((mean_secs(&times) - 0.02).abs() < 1e-12);
    }

    #[test]
    fn results_serialize_with_algorithm_names() {
        let mut results = BenchResults::new(42, 5);
        results.record(Algorithm::Heap, 100, 0.5);
        let json = serde_json::to_string(&results).unwrap();
        assert!(json.contains("\"Heap Sort\":{\"100\":0.5}"));
        let back: BenchResults = serde_json::from_str(&json).unwrap();
        assert_eq!(back, results);
    }
}
