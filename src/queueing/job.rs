//! 作业
//!
//! 一个作业在到达时创建；服务时长只抽取一次。

use super::JobId;
use crate::sim::SimTime;

#[derive(Debug, Clone)]
pub struct Job {
    pub id: JobId,
    pub arrival: SimTime,
    /// 服务时长；截止时间模式下到达时抽取，否则开始运行时抽取。
    pub service: Option<f64>,
    /// 截止时间 = 到达时间 + 服务时长 × 松弛系数
    pub deadline: Option<SimTime>,
}

impl Job {
    pub fn new(id: JobId, arrival: SimTime) -> Self {
        Self {
            id,
            arrival,
            service: None,
            deadline: None,
        }
    }

    /// 到达时确定服务时长并据此计算截止时间。
    pub fn with_deadline(mut self, service: f64, slack_margin: f64) -> Self {
        self.service = Some(service);
        self.deadline = Some(self.arrival.after(service * slack_margin));
        self
    }

    /// `at` 完成时是否错过截止时间（恰好在截止时间完成不算错过）。
    pub fn misses_deadline(&self, at: SimTime) -> bool {
        self.deadline.is_some_and(|deadline| at > deadline)
    }
}
