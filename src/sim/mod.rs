//! 仿真核心模块
//!
//! 此模块包含事件驱动仿真的核心组件，如仿真时间、调度事件、世界、随机源和仿真器。

// 子模块声明
mod rng;
mod scheduled_event;
mod simulator;
mod time;
mod world;

// 重新导出公共接口
pub use rng::SimRng;
pub use scheduled_event::ScheduledEvent;
pub use simulator::Simulator;
pub use time::SimTime;
pub use world::World;
