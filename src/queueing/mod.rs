//! 多队列作业分派模型（supermarket model）
//!
//! n 个并行服务器各有一个等待队列；到达的作业随机抽取 d 个服务器并加入最短的队列。

// 子模块声明
mod config;
mod dispatch;
mod dist;
mod event;
mod id;
mod job;
mod model;
mod runner;
mod server;
mod stats;
pub mod theory;

// 重新导出公共接口
pub use config::{
    ConfigError, ConfigWarning, DelayDistribution, Discipline, QueueConfig, ValidConfig,
};
pub use dispatch::pick_server;
pub use dist::{DistributionKind, Workload, gamma, ln_gamma};
pub use event::QueueEvent;
pub use id::{JobId, ServerId};
pub use job::Job;
pub use model::QueueModel;
pub use runner::{QueueSim, RunReport};
pub use server::Server;
pub use stats::{QueueStats, ReportError};
