//! FIFO 队列
//!
//! 作业按到达顺序排队。

use std::collections::VecDeque;

use crate::queueing::{Job, JobId};

use super::PendingQueue;

#[derive(Debug, Default)]
pub struct FifoQueue {
    q: VecDeque<JobId>,
}

impl FifoQueue {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PendingQueue for FifoQueue {
    fn enqueue(&mut self, job: &Job) {
        self.q.push_back(job.id);
    }

    fn dequeue(&mut self) -> Option<JobId> {
        self.q.pop_front()
    }

    fn peek(&self) -> Option<JobId> {
        self.q.front().copied()
    }

    fn ids(&self) -> Vec<JobId> {
        self.q.iter().copied().collect()
    }

    fn len(&self) -> usize {
        self.q.len()
    }
}
