//! 统计信息
//!
//! 作业时间戳、队列长度直方图与截止时间统计；运行结束后只读地交给外部使用。

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

use super::{Job, JobId, Server};
use crate::sim::SimTime;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("no job completed; averages are undefined")]
    NoCompletions,
    #[error("no queue length was observed")]
    NoObservations,
}

/// 队列仿真统计
#[derive(Debug, Default, Clone, Serialize)]
pub struct QueueStats {
    pub arrivals: BTreeMap<JobId, SimTime>,
    pub completions: BTreeMap<JobId, SimTime>,
    pub service_times: BTreeMap<JobId, f64>,
    pub deadlines: BTreeMap<JobId, SimTime>,
    pub deadline_misses: u64,
    /// 队列长度（含运行中作业）-> 出现次数
    pub queue_lengths: BTreeMap<usize, u64>,
    /// 触发直方图更新的状态变化次数（到达 + 完成）
    pub state_changes: u64,
}

impl QueueStats {
    pub fn record_arrival(&mut self, job: &Job) {
        self.arrivals.insert(job.id, job.arrival);
        if let Some(service) = job.service {
            self.service_times.insert(job.id, service);
        }
        if let Some(deadline) = job.deadline {
            self.deadlines.insert(job.id, deadline);
        }
    }

    pub fn record_service(&mut self, job: JobId, service: f64) {
        self.service_times.insert(job, service);
    }

    /// 记录完成时间；返回该作业是否错过截止时间。
    pub fn record_completion(&mut self, job: &Job, at: SimTime) -> bool {
        self.completions.insert(job.id, at);
        let missed = job.misses_deadline(at);
        if missed {
            self.deadline_misses += 1;
        }
        missed
    }

    /// 每次状态变化后对所有服务器各记录一次队列长度。
    pub fn observe(&mut self, servers: &[Server]) {
        self.state_changes += 1;
        for s in servers {
            *self.queue_lengths.entry(s.queue_len()).or_insert(0) += 1;
        }
    }

    pub fn completed(&self) -> usize {
        self.completions.len()
    }

    pub fn observations(&self) -> u64 {
        self.queue_lengths.values().sum()
    }

    /// 已完成作业的平均逗留时间（完成 - 到达）。
    pub fn mean_time_in_system(&self) -> Result<f64, ReportError> {
        if self.completions.is_empty() {
            return Err(ReportError::NoCompletions);
        }
        let total: f64 = self
            .completions
            .iter()
            .filter_map(|(id, done)| self.arrivals.get(id).map(|arr| done.since(*arr)))
            .sum();
        Ok(total / self.completions.len() as f64)
    }

    /// 截止时间错过比例（错过数 / 完成数）。
    pub fn miss_rate(&self) -> Result<f64, ReportError> {
        if self.completions.is_empty() {
            return Err(ReportError::NoCompletions);
        }
        Ok(self.deadline_misses as f64 / self.completions.len() as f64)
    }

    /// 长度 >= i 的观测占比，i = 1..=max_len。
    pub fn tail_fractions(&self, max_len: usize) -> Result<Vec<f64>, ReportError> {
        let total = self.observations();
        if total == 0 {
            return Err(ReportError::NoObservations);
        }
        Ok((1..=max_len)
            .map(|i| {
                let at_least: u64 = self.queue_lengths.range(i..).map(|(_, c)| *c).sum();
                at_least as f64 / total as f64
            })
            .collect())
    }
}
