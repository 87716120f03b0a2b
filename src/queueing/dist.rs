//! Interarrival and service-time sampling.
//!
//! Both draws use the same family. A Weibull sampler is scaled so that its
//! mean matches the exponential one it replaces: `scale = mean / Γ(1 + 1/shape)`.

use rand_distr::{Exp, Weibull};
use std::str::FromStr;

use super::{ConfigError, DelayDistribution, QueueConfig};
use crate::sim::SimRng;

#[derive(Debug, Clone, Copy)]
enum Sampler {
    Exp(Exp<f64>),
    Weibull(Weibull<f64>),
}

impl Sampler {
    fn with_mean(
        dist: DelayDistribution,
        mean: f64,
        what: &'static str,
    ) -> Result<Sampler, ConfigError> {
        let err = |reason: String| ConfigError::Distribution { what, reason };
        match dist {
            DelayDistribution::Exponential => Exp::new(1.0 / mean)
                .map(Sampler::Exp)
                .map_err(|e| err(e.to_string())),
            DelayDistribution::Weibull { shape } => {
                let scale = (mean.ln() - ln_gamma(1.0 + 1.0 / shape)).exp();
                Weibull::new(scale, shape)
                    .map(Sampler::Weibull)
                    .map_err(|e| err(e.to_string()))
            }
        }
    }

    fn draw(&self, rng: &mut SimRng) -> f64 {
        match self {
            Sampler::Exp(d) => rng.sample(d),
            Sampler::Weibull(d) => rng.sample(d),
        }
    }
}

/// Delay generators for one run.
#[derive(Debug, Clone, Copy)]
pub struct Workload {
    interarrival: Sampler,
    service: Sampler,
}

impl Workload {
    /// Interarrival mean is `1 / (lambda * n)`, service mean is `1 / mu`.
    pub fn new(cfg: &QueueConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            interarrival: Sampler::with_mean(
                cfg.distribution,
                1.0 / cfg.arrival_rate(),
                "interarrival",
            )?,
            service: Sampler::with_mean(cfg.distribution, 1.0 / cfg.mu, "service")?,
        })
    }

    pub fn interarrival(&self, rng: &mut SimRng) -> f64 {
        self.interarrival.draw(rng)
    }

    pub fn service(&self, rng: &mut SimRng) -> f64 {
        self.service.draw(rng)
    }
}

/// CLI-facing name of a distribution family; the Weibull shape is given separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistributionKind {
    Exponential,
    Weibull,
}

impl FromStr for DistributionKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exp" | "exponential" => Ok(DistributionKind::Exponential),
            "weibull" => Ok(DistributionKind::Weibull),
            _ => Err(ConfigError::UnknownDistribution(s.to_string())),
        }
    }
}

impl DelayDistribution {
    pub fn from_kind(kind: DistributionKind, shape: f64) -> Self {
        match kind {
            DistributionKind::Exponential => DelayDistribution::Exponential,
            DistributionKind::Weibull => DelayDistribution::Weibull { shape },
        }
    }
}

/// ln Γ(x) for x >= 0.5 (Lanczos, g = 7).
pub fn ln_gamma(x: f64) -> f64 {
    const G: f64 = 7.0;
    const COEF: [f64; 9] = [
        0.999_999_999_999_809_9,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_1,
        -176.615_029_162_140_6,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_572e-6,
        1.505_632_735_149_311_6e-7,
    ];
    let x = x - 1.0;
    let t = x + G + 0.5;
    let series = COEF
        .iter()
        .enumerate()
        .skip(1)
        .fold(COEF[0], |acc, (i, c)| acc + c / (x + i as f64));
    0.5 * (2.0 * std::f64::consts::PI).ln() + (x + 0.5) * t.ln() - t + series.ln()
}

/// Γ(x) for x >= 0.5; overflows to infinity only past x ≈ 171.6.
pub fn gamma(x: f64) -> f64 {
    ln_gamma(x).exp()
}
