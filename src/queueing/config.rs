//! Simulation parameters and their validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// How a server picks the next pending job.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Discipline {
    #[default]
    Fifo,
    /// Pending jobs run in arrival order; job sizes are not consulted.
    ShortestJobFirst,
    /// Requires deadline mode; see [`QueueConfig::validate`].
    EarliestDeadlineFirst,
}

/// Distribution family for interarrival and service times.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DelayDistribution {
    #[default]
    Exponential,
    /// `shape < 1` is heavy-tailed, `shape > 1` is more regular, `1` is exponential.
    Weibull { shape: f64 },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueueConfig {
    /// Per-server arrival rate; the system sees `lambda * servers`.
    pub lambda: f64,
    pub mu: f64,
    pub max_time: f64,
    pub servers: usize,
    /// Number of servers sampled per arrival (the `d` of power-of-d).
    pub choices: usize,
    #[serde(default)]
    pub discipline: Discipline,
    #[serde(default)]
    pub deadline_mode: bool,
    #[serde(default = "default_slack_margin")]
    pub slack_margin: f64,
    #[serde(default)]
    pub distribution: DelayDistribution,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_slack_margin() -> f64 {
    1.0
}

fn default_seed() -> u64 {
    42
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            lambda: 0.7,
            mu: 1.0,
            max_time: 1_000_000.0,
            servers: 1,
            choices: 1,
            discipline: Discipline::Fifo,
            deadline_mode: false,
            slack_margin: default_slack_margin(),
            distribution: DelayDistribution::Exponential,
            seed: default_seed(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("server count must be at least 1")]
    NoServers,
    #[error("choice count d must be at least 1")]
    NoChoices,
    #[error("choice count d={choices} exceeds server count n={servers}")]
    TooManyChoices { choices: usize, servers: usize },
    #[error("slack margin must be positive and finite, got {0}")]
    SlackMargin(f64),
    #[error("weibull shape must be positive and finite, got {0}")]
    WeibullShape(f64),
    #[error("cannot build {what} distribution: {reason}")]
    Distribution { what: &'static str, reason: String },
    #[error("unknown scheduling discipline `{0}` (expected fifo, sjf or edf)")]
    UnknownDiscipline(String),
    #[error("unknown distribution `{0}` (expected exp or weibull)")]
    UnknownDistribution(String),
}

/// Non-fatal findings of [`QueueConfig::validate`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigWarning {
    /// `lambda >= mu`: queues grow without bound.
    Unstable { lambda: f64, mu: f64 },
    /// EDF was requested without deadline mode, which has been switched on.
    EdfForcesDeadlines,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::Unstable { lambda, mu } => {
                write!(f, "the system is unstable: lambda={lambda} >= mu={mu}")
            }
            ConfigWarning::EdfForcesDeadlines => {
                write!(f, "EDF scheduling requires deadline mode; switching to deadline mode")
            }
        }
    }
}

/// A configuration that passed validation, with EDF's deadline requirement applied.
#[derive(Debug, Clone)]
pub struct ValidConfig {
    cfg: QueueConfig,
    warnings: Vec<ConfigWarning>,
}

impl ValidConfig {
    pub fn config(&self) -> &QueueConfig {
        &self.cfg
    }

    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

impl QueueConfig {
    /// Rejects invalid parameters before anything runs. Warnings are logged
    /// and returned alongside the accepted configuration.
    pub fn validate(mut self) -> Result<ValidConfig, ConfigError> {
        positive("lambda", self.lambda)?;
        positive("mu", self.mu)?;
        positive("max_time", self.max_time)?;
        if self.servers == 0 {
            return Err(ConfigError::NoServers);
        }
        if self.choices == 0 {
            return Err(ConfigError::NoChoices);
        }
        if self.choices > self.servers {
            return Err(ConfigError::TooManyChoices {
                choices: self.choices,
                servers: self.servers,
            });
        }
        if let DelayDistribution::Weibull { shape } = self.distribution {
            if !(shape > 0.0 && shape.is_finite()) {
                return Err(ConfigError::WeibullShape(shape));
            }
        }

        let mut warnings = Vec::new();
        if self.discipline == Discipline::EarliestDeadlineFirst && !self.deadline_mode {
            self.deadline_mode = true;
            warnings.push(ConfigWarning::EdfForcesDeadlines);
        }
        if self.deadline_mode && !(self.slack_margin > 0.0 && self.slack_margin.is_finite()) {
            return Err(ConfigError::SlackMargin(self.slack_margin));
        }
        if self.lambda >= self.mu {
            warnings.push(ConfigWarning::Unstable {
                lambda: self.lambda,
                mu: self.mu,
            });
        }

        for w in &warnings {
            warn!("{w}");
        }

        Ok(ValidConfig {
            cfg: self,
            warnings,
        })
    }

    /// Aggregate arrival rate seen by the dispatcher.
    pub fn arrival_rate(&self) -> f64 {
        self.lambda * self.servers as f64
    }
}

impl FromStr for Discipline {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fifo" => Ok(Discipline::Fifo),
            "sjf" => Ok(Discipline::ShortestJobFirst),
            "edf" => Ok(Discipline::EarliestDeadlineFirst),
            _ => Err(ConfigError::UnknownDiscipline(s.to_string())),
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Discipline::Fifo => "fifo",
            Discipline::ShortestJobFirst => "sjf",
            Discipline::EarliestDeadlineFirst => "edf",
        };
        f.write_str(name)
    }
}
