//! 服务器
//!
//! 每个服务器至多运行一个作业，其余作业在等待队列中。

use super::{Discipline, JobId, ServerId};
use crate::queue::{PendingQueue, pending_for};

#[derive(Debug)]
pub struct Server {
    pub id: ServerId,
    pub running: Option<JobId>,
    pub pending: Box<dyn PendingQueue>,
}

impl Server {
    pub fn new(id: ServerId, discipline: Discipline) -> Self {
        Self {
            id,
            running: None,
            pending: pending_for(discipline),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.running.is_none()
    }

    /// 队列长度：正在运行的作业也计入。
    pub fn queue_len(&self) -> usize {
        usize::from(self.running.is_some()) + self.pending.len()
    }
}
