//! 仿真器
//!
//! 定义事件驱动仿真器，维护当前时间与事件队列。

use super::scheduled_event::ScheduledEvent;
use super::time::SimTime;
use super::world::World;
use std::collections::BinaryHeap;
use tracing::{debug, info, trace};

/// 事件驱动仿真器：维护当前时间与事件队列。
#[derive(Debug)]
pub struct Simulator<E> {
    now: SimTime,
    next_seq: u64,
    processed: u64,
    q: BinaryHeap<ScheduledEvent<E>>,
}

impl<E> Default for Simulator<E> {
    fn default() -> Self {
        Self {
            now: SimTime::ZERO,
            next_seq: 0,
            processed: 0,
            q: BinaryHeap::new(),
        }
    }
}

impl<E> Simulator<E> {
    /// 获取当前仿真时间
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// 尚未执行的事件数
    pub fn pending(&self) -> usize {
        self.q.len()
    }

    /// 已执行的事件数
    pub fn processed(&self) -> u64 {
        self.processed
    }

    /// 在 `now + delay` 调度事件；负延迟会 panic。
    pub fn schedule(&mut self, delay: f64, ev: E) {
        let at = self.now.after(delay);
        self.schedule_at(at, ev);
    }

    /// 调度事件在指定时间执行；不允许早于当前时间。
    #[tracing::instrument(skip(self, ev), fields(event_type = std::any::type_name::<E>(), schedule_at = %at))]
    pub fn schedule_at(&mut self, at: SimTime, ev: E) {
        assert!(
            at >= self.now,
            "cannot schedule into the past: at={at}, now={}",
            self.now
        );
        let seq = self.next_seq;
        trace!(now = %self.now, seq, "调度事件");

        self.next_seq = self.next_seq.wrapping_add(1);
        self.q.push(ScheduledEvent { at, seq, ev });
    }

    /// 运行直到事件队列为空或到达 `until`。
    ///
    /// 晚于 `until` 的事件保留在队列中；时钟最多推进到 `until`。
    pub fn run_until<W>(&mut self, until: SimTime, world: &mut W)
    where
        W: World<Event = E>,
    {
        let start = self.processed;
        while let Some(top) = self.q.peek() {
            if top.at > until {
                break;
            }
            let Some(item) = self.q.pop() else { break };
            self.step(item, world);
        }
        if until.is_finite() {
            self.now = self.now.max(until);
        }
        info!(
            events = self.processed - start,
            final_time = %self.now,
            remaining_queue = self.q.len(),
            "仿真运行到截止时间"
        );
    }

    /// 运行所有事件直到队列为空。
    #[tracing::instrument(skip(self, world))]
    pub fn run<W>(&mut self, world: &mut W)
    where
        W: World<Event = E>,
    {
        info!("▶️  开始运行仿真");
        debug!(now = %self.now, queue_size = self.q.len(), "初始状态");

        let start = self.processed;
        while let Some(item) = self.q.pop() {
            self.step(item, world);
        }

        info!(
            total_events = self.processed - start,
            final_time = %self.now,
            "✅ 仿真完成"
        );
    }

    fn step<W>(&mut self, item: ScheduledEvent<E>, world: &mut W)
    where
        W: World<Event = E>,
    {
        debug_assert!(item.at >= self.now, "clock must not go backwards");
        self.now = item.at;
        self.processed += 1;
        trace!(
            event_num = self.processed,
            now = %self.now,
            seq = item.seq,
            remaining_queue = self.q.len(),
            "执行事件"
        );
        world.process(item.ev, self);
        world.on_tick(self);
    }
}
