//! 可复现的随机源
//!
//! 整个仿真只持有一个按种子初始化的 `ChaCha8Rng`，所有抽样都显式地经过它。

use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::Distribution;

#[derive(Debug, Clone)]
pub struct SimRng(ChaCha8Rng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(ChaCha8Rng::seed_from_u64(seed))
    }

    /// 从给定分布抽一个值。
    #[inline]
    pub fn sample<T, D: Distribution<T>>(&mut self, dist: D) -> T {
        self.0.sample(dist)
    }

    /// 从 `0..n` 中不放回地均匀抽取 `amount` 个下标。
    ///
    /// `amount > n` 时 panic（配置校验保证 d <= n）。
    pub fn sample_indices(&mut self, n: usize, amount: usize) -> Vec<usize> {
        index::sample(&mut self.0, n, amount).into_vec()
    }
}
