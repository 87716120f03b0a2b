//! Wires a validated configuration to the simulator and summarizes the run.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

use super::{ConfigError, ConfigWarning, QueueConfig, QueueEvent, QueueModel, QueueStats};
use crate::sim::{SimTime, Simulator};

/// Summary handed to output collaborators (CLI printing, JSON).
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub config: QueueConfig,
    pub end_time: SimTime,
    pub events: u64,
    pub jobs_arrived: usize,
    pub jobs_completed: usize,
    pub jobs_in_system: usize,
    /// `None` when nothing completed.
    pub mean_time_in_system: Option<f64>,
    pub deadline_misses: Option<u64>,
    pub miss_rate: Option<f64>,
    pub queue_lengths: BTreeMap<usize, u64>,
}

pub struct QueueSim {
    sim: Simulator<QueueEvent>,
    model: QueueModel,
    warnings: Vec<ConfigWarning>,
}

impl QueueSim {
    /// Validates `cfg` and schedules the first arrival.
    pub fn new(cfg: QueueConfig) -> Result<Self, ConfigError> {
        let valid = cfg.validate()?;
        let mut model = QueueModel::new(&valid)?;
        let mut sim = Simulator::default();
        model.start(&mut sim);
        Ok(Self {
            sim,
            model,
            warnings: valid.warnings().to_vec(),
        })
    }

    /// Runs up to the configured `max_time`.
    pub fn run(&mut self) -> &QueueStats {
        let until = SimTime::new(self.model.config().max_time);
        self.run_until(until)
    }

    pub fn run_until(&mut self, until: SimTime) -> &QueueStats {
        let cfg = self.model.config();
        info!(
            lambda = cfg.lambda,
            mu = cfg.mu,
            n = cfg.servers,
            d = cfg.choices,
            discipline = %cfg.discipline,
            deadline_mode = cfg.deadline_mode,
            seed = cfg.seed,
            %until,
            "开始运行队列仿真"
        );
        self.sim.run_until(until, &mut self.model);
        info!(
            completed = self.model.stats().completed(),
            in_system = self.model.in_system(),
            "队列仿真结束"
        );
        self.model.stats()
    }

    pub fn now(&self) -> SimTime {
        self.sim.now()
    }

    pub fn model(&self) -> &QueueModel {
        &self.model
    }

    pub fn stats(&self) -> &QueueStats {
        self.model.stats()
    }

    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }

    pub fn report(&self) -> RunReport {
        let cfg = self.model.config();
        let stats = self.model.stats();
        RunReport {
            config: cfg.clone(),
            end_time: self.sim.now(),
            events: self.sim.processed(),
            jobs_arrived: stats.arrivals.len(),
            jobs_completed: stats.completed(),
            jobs_in_system: self.model.in_system(),
            mean_time_in_system: stats.mean_time_in_system().ok(),
            deadline_misses: cfg.deadline_mode.then_some(stats.deadline_misses),
            miss_rate: if cfg.deadline_mode {
                stats.miss_rate().ok()
            } else {
                None
            },
            queue_lengths: stats.queue_lengths.clone(),
        }
    }
}
