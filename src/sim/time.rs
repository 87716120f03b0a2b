//! 仿真时间类型
//!
//! 逻辑时间为非负实数，单位与速率参数一致（μ = 1 时即为平均服务时长）。

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// 仿真时间（逻辑时间，非负 f64）。
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SimTime(f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);
    pub const INFINITY: SimTime = SimTime(f64::INFINITY);

    /// 构造仿真时间；负数或 NaN 属于调用方违约，直接 panic。
    pub fn new(t: f64) -> SimTime {
        assert!(t >= 0.0, "simulation time must be non-negative, got {t}");
        SimTime(t)
    }

    pub fn as_f64(self) -> f64 {
        self.0
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// 当前时间加上一个非负延迟。
    pub fn after(self, delay: f64) -> SimTime {
        assert!(
            delay >= 0.0 && delay.is_finite(),
            "delay must be non-negative and finite, got {delay}"
        );
        SimTime(self.0 + delay)
    }

    /// 两个时刻之差（self 早于 earlier 时为负）。
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
