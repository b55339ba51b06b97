pub mod error;

use std::time::Instant;

use axum::async_trait;
use derive_more::Constructor;
use log::info;
use tokio_util::sync::CancellationToken;

use super::{
    distributions::{Die, Exponential, Normal, TwoDice, EXPONENTIAL_RATE, NORMAL_MU, NORMAL_SIGMA},
    histogram::{self, models::{HistogramResult, LabelPolicy}},
    sampler::{models::SampleRequest, Sampler},
};

use self::error::{ModelingServiceError, Result};

pub const ONE_DIE_SLOTS: usize = 7;
pub const TWO_DICE_SLOTS: usize = 14;
pub const NORMAL_BINS: i64 = 13;
pub const EXPONENTIAL_BINS: i64 = 20;
pub const DICE_SUM_BINS: i64 = 20;

///
/// Service which runs the fixed simulations and reduces each batch
/// into a histogram.
///
#[async_trait]
pub trait ModelingService: Send + Sync {
    ///
    /// Rolls one die `trials` times. Bins are the labels `0..=6`, with
    /// each face counted at its own index, so index 0 is always empty.
    ///
    async fn roll_one_die(&self, trials: i64) -> Result<HistogramResult>;
    ///
    /// Rolls two dice `trials` times. Bins are the labels `1..=14`, with
    /// each sum counted at index `sum - 1`.
    ///
    async fn roll_two_dice(&self, trials: i64) -> Result<HistogramResult>;
    ///
    /// Draws from N(7.0, 2.2) into 13 equal-width bins
    ///
    async fn sample_normal(&self, trials: i64) -> Result<HistogramResult>;
    ///
    /// Draws from Exp(7.0) into 20 equal-width bins. Only slots
    /// `1..trials` are drawn, and slot 0 is counted as `0.0`.
    ///
    async fn sample_exponential(&self, trials: i64) -> Result<HistogramResult>;
    ///
    /// Sums `dices` die rolls per trial on one thread, 20 bins with
    /// truncated labels
    ///
    async fn sum_dice_sequential(&self, trials: i64, dices: i64) -> Result<HistogramResult>;
    ///
    /// Same as `sum_dice_sequential`, fanned out over the worker pool
    ///
    async fn sum_dice_concurrent(&self, trials: i64, dices: i64) -> Result<HistogramResult>;
}

#[derive(Constructor)]
pub struct CoreModelingService {
    sampler: Sampler,
}

#[async_trait]
impl ModelingService for CoreModelingService {
    async fn roll_one_die(&self, trials: i64) -> Result<HistogramResult> {
        let req = self.request(trials, 1, ONE_DIE_SLOTS as i64)?;
        let sampler = self.sampler.clone();

        blocking(move || {
            let mut rng = sampler.rng();
            let faces = (0..req.trials()).map(|_| Die.roll(&mut rng) as usize);
            histogram::discrete(faces, labels(0, ONE_DIE_SLOTS))
        })
        .await
    }

    async fn roll_two_dice(&self, trials: i64) -> Result<HistogramResult> {
        let req = self.request(trials, 1, TWO_DICE_SLOTS as i64)?;
        let sampler = self.sampler.clone();

        blocking(move || {
            let mut rng = sampler.rng();
            let slots = (0..req.trials()).map(|_| TwoDice.roll(&mut rng) as usize - 1);
            histogram::discrete(slots, labels(1, TWO_DICE_SLOTS))
        })
        .await
    }

    async fn sample_normal(&self, trials: i64) -> Result<HistogramResult> {
        let req = self.request(trials, 1, NORMAL_BINS)?;
        let normal = Normal::new(NORMAL_MU, NORMAL_SIGMA)?;
        let sampler = self.sampler.clone();

        blocking(move || {
            let series = sampler.sample_sequential(&req, &normal);
            histogram::histogram(&series, req.bin_count(), LabelPolicy::RoundHundredths)
        })
        .await
    }

    async fn sample_exponential(&self, trials: i64) -> Result<HistogramResult> {
        let req = self.request(trials, 1, EXPONENTIAL_BINS)?;
        let exponential = Exponential::new(EXPONENTIAL_RATE)?;
        let drawn = match req.trials() - 1 {
            0 => None,
            n => Some(self.request(n as i64, 1, EXPONENTIAL_BINS)?),
        };
        let sampler = self.sampler.clone();

        blocking(move || {
            let mut values = Vec::with_capacity(req.trials());
            values.push(0.0);
            if let Some(drawn) = drawn {
                values.extend_from_slice(&sampler.sample_sequential(&drawn, &exponential));
            }
            histogram::histogram(&values, req.bin_count(), LabelPolicy::RoundHundredths)
        })
        .await
    }

    async fn sum_dice_sequential(&self, trials: i64, dices: i64) -> Result<HistogramResult> {
        let req = self.request(trials, dices, DICE_SUM_BINS)?;
        let sampler = self.sampler.clone();

        blocking(move || {
            let started = Instant::now();
            let series = sampler.sample_sequential(&req, &Die);
            info!("Summed {} x {} dice sequentially in {:?}", req.trials(), req.sub_draws(), started.elapsed());
            histogram::histogram(&series, req.bin_count(), LabelPolicy::Truncate)
        })
        .await
    }

    async fn sum_dice_concurrent(&self, trials: i64, dices: i64) -> Result<HistogramResult> {
        let req = self.request(trials, dices, DICE_SUM_BINS)?;

        let started = Instant::now();
        let series = self.sampler.sample_concurrent(&req, Die, CancellationToken::new()).await?;
        info!("Summed {} x {} dice concurrently in {:?}", req.trials(), req.sub_draws(), started.elapsed());

        Ok(histogram::histogram(&series, req.bin_count(), LabelPolicy::Truncate))
    }
}

impl CoreModelingService {
    fn request(&self, trials: i64, dices: i64, bin_count: i64) -> Result<SampleRequest> {
        Ok(SampleRequest::new(trials, dices, bin_count, self.sampler.settings())?)
    }
}

///
/// Runs CPU-bound sampling on the blocking pool so request handling
/// keeps its executor threads
///
async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ModelingServiceError::TaskFailed(e.to_string()))
}

fn labels(first: usize, count: usize) -> Vec<f64> {
    (first..first + count).map(|label| label as f64).collect()
}
