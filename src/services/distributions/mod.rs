pub mod error;

use rand::Rng;
use rand_distr::{Distribution, Exp};

use crate::dice::{self, DIE_SIDES};

use self::error::{DistributionError, Result};

pub const NORMAL_MU: f64 = 7.0;
pub const NORMAL_SIGMA: f64 = 2.2;
pub const EXPONENTIAL_RATE: f64 = 7.0;

///
/// Capability shared by every fixed sampler: produce one independent
/// draw from the caller's random source. Implementors hold no RNG
/// state of their own, so one drawer can be shared by many workers.
///
pub trait Draw: Send + Sync {
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64;
}

///
/// A single six-sided die, uniform over `1..=6`
///
#[derive(Debug, Clone, Copy, Default)]
pub struct Die;

impl Die {
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        dice::single(rng, DIE_SIDES)
    }
}

impl Draw for Die {
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.roll(rng) as f64
    }
}

///
/// Sum of two independent die draws, over `2..=12`
///
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoDice;

impl TwoDice {
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        dice::roll(rng, DIE_SIDES, 2)
    }
}

impl Draw for TwoDice {
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.roll(rng) as f64
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Normal {
    inner: rand_distr::Normal<f64>,
}

impl Normal {
    ///
    /// Gaussian with mean `mu` and standard deviation `sigma`.
    /// Returns `DistributionError::InvalidParameters` if `sigma` is
    /// negative or either parameter is not finite.
    ///
    pub fn new(mu: f64, sigma: f64) -> Result<Self> {
        if !mu.is_finite() || !sigma.is_finite() || sigma < 0.0 {
            return Err(DistributionError::InvalidParameters(format!(
                "Normal requires finite parameters and sigma >= 0, got mu={mu}, sigma={sigma}"
            )));
        }
        let inner = rand_distr::Normal::new(mu, sigma)
            .map_err(|e| DistributionError::InvalidParameters(format!("Normal: {e}")))?;
        Ok(Self { inner })
    }
}

impl Draw for Normal {
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.inner.sample(rng)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Exponential {
    inner: Exp<f64>,
}

impl Exponential {
    ///
    /// Exponential with rate `lambda`. `lambda` must be finite and positive.
    ///
    pub fn new(lambda: f64) -> Result<Self> {
        if !lambda.is_finite() || lambda <= 0.0 {
            return Err(DistributionError::InvalidParameters(format!(
                "Exponential requires a positive finite rate, got lambda={lambda}"
            )));
        }
        let inner = Exp::new(lambda)
            .map_err(|e| DistributionError::InvalidParameters(format!("Exponential: {e}")))?;
        Ok(Self { inner })
    }
}

impl Draw for Exponential {
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.inner.sample(rng)
    }
}
