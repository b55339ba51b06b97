use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SamplerSettings {
    ///
    /// Worker pool size multiplier, applied to the available hardware parallelism
    ///
    pub workers_per_core: usize,
    ///
    /// Number of consecutive samples a worker claims from the queue at once
    ///
    pub chunk_size: usize,
    ///
    /// Capacity of the channel between the workers and the collector
    ///
    pub channel_capacity: usize,
    pub max_trials: i64,
    ///
    /// Upper bound on the number of draws summed into one sample
    ///
    pub max_sub_draws: i64,
    ///
    /// Upper bound on `trials × sub_draws`, the total draws of one batch
    ///
    pub max_draws: i64,
    ///
    /// Fixed seed for reproducible runs. `None` seeds from OS entropy
    /// on every batch.
    ///
    pub seed: Option<u64>,
}

impl Default for SamplerSettings {
    fn default() -> Self {
        Self {
            workers_per_core: 2,
            chunk_size: 256,
            channel_capacity: 1024,
            max_trials: 10_000_000,
            max_sub_draws: 10_000,
            max_draws: 1_000_000_000,
            seed: None,
        }
    }
}
