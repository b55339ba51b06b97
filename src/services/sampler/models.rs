use std::ops::Deref;

use super::{
    error::{Result, SamplerError},
    settings::SamplerSettings,
};

///
/// Validated parameters of one sampling batch
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRequest {
    trials: usize,
    sub_draws: usize,
    bin_count: usize,
}

impl SampleRequest {
    ///
    /// Returns `SamplerError::InvalidRequest` if any value is below 1, if
    /// `trials` or `sub_draws` exceed their configured maximum, or if the
    /// batch as a whole would take more than `max_draws` draws
    ///
    pub fn new(trials: i64, sub_draws: i64, bin_count: i64, limits: &SamplerSettings) -> Result<Self> {
        let request = Self {
            trials: positive("trials", trials, limits.max_trials)?,
            sub_draws: positive("dices", sub_draws, limits.max_sub_draws)?,
            bin_count: positive("bin_count", bin_count, i64::from(u32::MAX))?,
        };
        let draws = trials.saturating_mul(sub_draws);
        if draws > limits.max_draws {
            return Err(SamplerError::InvalidRequest { field: "draws", value: draws, max: limits.max_draws });
        }
        Ok(request)
    }

    pub fn trials(&self) -> usize {
        self.trials
    }

    pub fn sub_draws(&self) -> usize {
        self.sub_draws
    }

    pub fn bin_count(&self) -> usize {
        self.bin_count
    }
}

fn positive(field: &'static str, value: i64, max: i64) -> Result<usize> {
    if value < 1 || value > max {
        return Err(SamplerError::InvalidRequest { field, value, max });
    }
    usize::try_from(value).map_err(|_| SamplerError::InvalidRequest { field, value, max })
}

///
/// One worker's report to the collector
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedSample {
    pub index: usize,
    pub value: f64,
}

///
/// Samples in original draw order
///
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampleSeries(Vec<f64>);

impl From<Vec<f64>> for SampleSeries {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl Deref for SampleSeries {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
