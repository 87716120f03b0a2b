//! 队列模型的事件
//!
//! 两种事件共用同一个转移入口 [`QueueModel::process`](super::QueueModel)。

use super::{JobId, ServerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueEvent {
    /// 新作业到达调度器
    Arrival { job: JobId },
    /// 服务器上正在运行的作业完成
    Completion { job: JobId, server: ServerId },
}
