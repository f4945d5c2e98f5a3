/// Tuning knobs for a bulk build or batch merge.
///
/// The thread count itself is not configured here. `rayon`'s global pool
/// reads `RAYON_NUM_THREADS` at its own init time. What `Config` controls is
/// the tower-height generator, so that tests and benchmarks can ask for a
/// reproducible structure.
#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    pub(crate) seed: Option<u64>,
}

impl Config {
    /// Use the thread-local, OS-seeded generator (the default for production use).
    pub fn new() -> Self {
        Self { seed: None }
    }

    /// Use a fixed seed so tower heights, and therefore the resulting
    /// structure, are reproducible across runs and thread counts.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}
