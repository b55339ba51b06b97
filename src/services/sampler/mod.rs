pub mod error;
pub mod models;
pub mod random;
pub mod settings;

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    thread,
};

use derive_more::Constructor;
use log::debug;
use rand::{rngs::StdRng, Rng};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::distributions::Draw;

use self::{
    error::{Result, SamplerError},
    models::{IndexedSample, SampleRequest, SampleSeries},
    random::RandomSource,
    settings::SamplerSettings,
};

///
/// Draws a batch of samples, each the sum of `sub_draws` draws, either
/// in order on the calling thread or on a bounded worker pool.
///
#[derive(Clone, Debug, Constructor)]
pub struct Sampler {
    settings: SamplerSettings,
    source: RandomSource,
}

impl Sampler {
    pub fn from_settings(settings: SamplerSettings) -> Self {
        let source = RandomSource::from_seed(settings.seed);
        Self::new(settings, source)
    }

    pub fn settings(&self) -> &SamplerSettings {
        &self.settings
    }

    ///
    /// Generator for callers that draw outside a batch, such as the
    /// exact-count dice paths
    ///
    pub fn rng(&self) -> StdRng {
        self.source.rng()
    }

    ///
    /// Draws every sample in index order with a single generator.
    /// Blocks the calling thread for the whole batch.
    ///
    pub fn sample_sequential<D: Draw>(&self, request: &SampleRequest, drawer: &D) -> SampleSeries {
        let mut rng = self.source.rng();
        (0..request.trials())
            .map(|_| sum_draws(drawer, request.sub_draws(), &mut rng))
            .collect::<Vec<_>>()
            .into()
    }

    ///
    /// Fans the batch out over a bounded pool of blocking workers and
    /// collects the `IndexedSample`s they report back into index order.
    ///
    /// Completion is signalled by the result channel closing once every
    /// worker is gone. A batch that ends with unfilled slots returns
    /// `SamplerError::Incomplete` instead of waiting. Cancelling `cancel`,
    /// or dropping the returned future, stops the workers between samples.
    ///
    pub async fn sample_concurrent<D>(
        &self,
        request: &SampleRequest,
        drawer: D,
        cancel: CancellationToken,
    ) -> Result<SampleSeries>
    where
        D: Draw + Clone + 'static,
    {
        let trials = request.trials();
        let chunk_size = self.settings.chunk_size.max(1);
        let chunks = trials.div_ceil(chunk_size);
        let workers = self.pool_size(trials, chunks);
        let base_seed = self.source.base_seed();
        debug!("Sampling {trials} trials over {workers} workers ({chunks} chunks of {chunk_size})");

        let batch = cancel.child_token();
        let _stop_workers = batch.clone().drop_guard();

        let (tx, mut rx) = mpsc::channel(self.settings.channel_capacity.max(1));
        let cursor = Arc::new(AtomicUsize::new(0));
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                let worker = Worker {
                    tx: tx.clone(),
                    cursor: cursor.clone(),
                    cancel: batch.clone(),
                    drawer: drawer.clone(),
                    trials,
                    sub_draws: request.sub_draws(),
                    chunk_size,
                    base_seed,
                };
                tokio::task::spawn_blocking(move || worker.run())
            })
            .collect();
        // Only the workers hold senders now
        drop(tx);

        let mut slots: Vec<Option<f64>> = vec![None; trials];
        let mut received = 0;
        loop {
            tokio::select! {
                biased;
                _ = batch.cancelled() => return Err(SamplerError::Cancelled),
                sample = rx.recv() => match sample {
                    Some(IndexedSample { index, value }) => {
                        if let Some(slot) = slots.get_mut(index) {
                            if slot.replace(value).is_none() {
                                received += 1;
                            }
                        }
                    }
                    None => break,
                },
            }
        }

        for handle in handles {
            handle.await.map_err(|e| SamplerError::WorkerFailed(e.to_string()))?;
        }

        slots
            .into_iter()
            .collect::<Option<Vec<f64>>>()
            .map(SampleSeries::from)
            .ok_or(SamplerError::Incomplete { expected: trials, received })
    }

    fn pool_size(&self, trials: usize, chunks: usize) -> usize {
        let cores = thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
        (cores * self.settings.workers_per_core.max(1))
            .min(trials)
            .min(chunks)
            .max(1)
    }
}

fn sum_draws<D: Draw, R: Rng + ?Sized>(drawer: &D, sub_draws: usize, rng: &mut R) -> f64 {
    (0..sub_draws).map(|_| drawer.draw(rng)).sum()
}

struct Worker<D> {
    tx: mpsc::Sender<IndexedSample>,
    cursor: Arc<AtomicUsize>,
    cancel: CancellationToken,
    drawer: D,
    trials: usize,
    sub_draws: usize,
    chunk_size: usize,
    base_seed: u64,
}

impl<D: Draw> Worker<D> {
    ///
    /// Claims chunks off the shared cursor until the queue is drained,
    /// the batch is cancelled, or the collector hangs up
    ///
    fn run(self) {
        loop {
            let chunk = self.cursor.fetch_add(1, Ordering::Relaxed);
            let start = chunk.saturating_mul(self.chunk_size);
            if start >= self.trials {
                return;
            }
            let end = start.saturating_add(self.chunk_size).min(self.trials);
            let mut rng = random::chunk_rng(self.base_seed, chunk);

            for index in start..end {
                if self.cancel.is_cancelled() {
                    return;
                }
                let value = sum_draws(&self.drawer, self.sub_draws, &mut rng);
                if self.tx.blocking_send(IndexedSample { index, value }).is_err() {
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::services::{distributions::Die, histogram};

    use super::*;

    fn seeded(seed: u64) -> Sampler {
        Sampler::new(
            SamplerSettings { chunk_size: 64, channel_capacity: 16, ..Default::default() },
            RandomSource::Seeded(seed),
        )
    }

    fn request(trials: i64, dices: i64) -> SampleRequest {
        SampleRequest::new(trials, dices, 20, &SamplerSettings::default()).unwrap()
    }

    #[test]
    fn test_sequential_sums_sub_draws() {
        let series = seeded(1).sample_sequential(&request(500, 5), &Die);
        assert_eq!(series.len(), 500);
        assert!(series.iter().all(|v| (5.0..=30.0).contains(v) && v.fract() == 0.0));
    }

    #[test]
    fn test_sequential_seeded_is_reproducible() {
        let a = seeded(9).sample_sequential(&request(100, 3), &Die);
        let b = seeded(9).sample_sequential(&request(100, 3), &Die);
        assert_eq!(a, b);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_fills_every_slot() {
        let series = seeded(2)
            .sample_concurrent(&request(1000, 5), Die, CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(series.len(), 1000);
        assert!(series.iter().all(|v| (5.0..=30.0).contains(v)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_seeded_is_independent_of_scheduling() {
        let sampler = seeded(77);
        let a = sampler.sample_concurrent(&request(5000, 4), Die, CancellationToken::new()).await.unwrap();
        let b = sampler.sample_concurrent(&request(5000, 4), Die, CancellationToken::new()).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_concurrent_single_trial() {
        let series = seeded(4)
            .sample_concurrent(&request(1, 1), Die, CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(series.len(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_batch_returns_cancelled() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let res = seeded(3).sample_concurrent(&request(100_000, 50), Die, cancel).await;
        assert_eq!(res, Err(SamplerError::Cancelled));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_cancel_mid_batch_stops_collection() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            trigger.cancel();
        });
        let res = tokio::time::timeout(
            Duration::from_secs(30),
            seeded(3).sample_concurrent(&request(1_000_000, 200), Die, cancel),
        )
        .await
        .expect("cancelled batch must stop promptly");
        assert_eq!(res, Err(SamplerError::Cancelled));
    }

    #[derive(Clone)]
    struct Faulty;

    impl Draw for Faulty {
        fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
            if rng.gen_ratio(1, 500) {
                panic!("drawer failed");
            }
            1.0
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_panicking_worker_is_reported() {
        let res = tokio::time::timeout(
            Duration::from_secs(30),
            seeded(5).sample_concurrent(&request(20_000, 1), Faulty, CancellationToken::new()),
        )
        .await
        .expect("a failed worker must not hang the batch");
        assert!(matches!(res, Err(SamplerError::WorkerFailed(_))), "got {res:?}");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_oversized_chunk_runs_as_one_chunk() {
        let sampler = Sampler::new(
            SamplerSettings { chunk_size: usize::MAX, ..Default::default() },
            RandomSource::Seeded(8),
        );
        let series = tokio::time::timeout(
            Duration::from_secs(30),
            sampler.sample_concurrent(&request(500, 2), Die, CancellationToken::new()),
        )
        .await
        .expect("batch must complete")
        .unwrap();
        assert_eq!(series.len(), 500);
        assert!(series.iter().all(|v| (2.0..=12.0).contains(v)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_sequential_and_concurrent_agree_in_distribution() {
        let req = request(20_000, 20);
        let sampler = Sampler::from_settings(SamplerSettings::default());
        let sequential = sampler.sample_sequential(&req, &Die);
        let concurrent = sampler.sample_concurrent(&req, Die, CancellationToken::new()).await.unwrap();

        let lo = sequential.iter().chain(concurrent.iter()).cloned().fold(f64::INFINITY, f64::min);
        let hi = sequential.iter().chain(concurrent.iter()).cloned().fold(f64::NEG_INFINITY, f64::max);
        let a = histogram::bin_counts(&sequential, 10, lo, hi);
        let b = histogram::bin_counts(&concurrent, 10, lo, hi);

        let n = req.trials() as f64;
        let tv = a.iter().zip(&b).map(|(x, y)| (x - y).abs() / n).sum::<f64>() / 2.0;
        assert!(tv < 0.05, "total variation distance was {tv}");
    }
}
