//! 世界 trait
//!
//! 定义仿真世界接口：事件负载是一个闭合的 sum type，由世界统一分派。

use super::simulator::Simulator;

/// 仿真世界：由业务层实现（例如多队列调度模型）。
pub trait World {
    type Event;

    /// 处理一个已到期的事件；可以通过 `sim` 调度后续事件。
    fn process(&mut self, ev: Self::Event, sim: &mut Simulator<Self::Event>);

    fn on_tick(&mut self, _sim: &mut Simulator<Self::Event>) {}
}
