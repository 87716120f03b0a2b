//! Closed-form reference values used next to measured results.

/// Mean time in system of an M/M/1 queue, `1 / (mu - lambda)`.
///
/// Returns `None` when `lambda >= mu` (no steady state).
pub fn mm1_time_in_system(lambda: f64, mu: f64) -> Option<f64> {
    (lambda < mu).then(|| 1.0 / (mu - lambda))
}

/// Fraction of queues holding at least `len` jobs in the supermarket model
/// with load `lambda` (with `mu = 1`) and `choices` samples per arrival:
/// `lambda^((d^len - 1) / (d - 1))`, which reduces to `lambda^len` for `d = 1`.
pub fn supermarket_tail(lambda: f64, choices: usize, len: u32) -> f64 {
    if choices <= 1 {
        return lambda.powi(len as i32);
    }
    let d = choices as f64;
    let exponent = (d.powi(len as i32) - 1.0) / (d - 1.0);
    lambda.powf(exponent)
}
