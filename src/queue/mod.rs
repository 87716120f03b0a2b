//! 等待队列策略（Scheduling disciplines）
//!
//! 每个服务器持有一个等待队列；正在运行的作业不在队列中。

use crate::queueing::{Discipline, Job, JobId};

mod edf;
mod fifo;

pub use edf::EdfQueue;
pub use fifo::FifoQueue;

/// 等待作业队列抽象
pub trait PendingQueue: std::fmt::Debug {
    /// 入队：按队列策略放置作业
    fn enqueue(&mut self, job: &Job);
    /// 出队：按队列策略返回下一个要运行的作业
    fn dequeue(&mut self) -> Option<JobId>;
    /// 查看下一个要出队的作业（不移除）
    fn peek(&self) -> Option<JobId>;

    /// 当前等待中的作业（顺序不保证与出队顺序一致）
    fn ids(&self) -> Vec<JobId>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 按调度策略创建一个空的等待队列。
pub fn pending_for(discipline: Discipline) -> Box<dyn PendingQueue> {
    match discipline {
        // SJF 按到达顺序（作业 id）出队，与 FIFO 同序。
        Discipline::Fifo | Discipline::ShortestJobFirst => Box::new(FifoQueue::new()),
        Discipline::EarliestDeadlineFirst => Box::new(EdfQueue::new()),
    }
}
