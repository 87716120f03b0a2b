//! Power-of-d server selection.

use super::{Server, ServerId};
use crate::sim::SimRng;

/// Samples `choices` distinct servers uniformly and returns the one with the
/// shortest queue; equal lengths go to the lowest index.
pub fn pick_server(servers: &[Server], choices: usize, rng: &mut SimRng) -> ServerId {
    let sampled = rng.sample_indices(servers.len(), choices);
    let best = sampled
        .into_iter()
        .min_by_key(|&i| (servers[i].queue_len(), i))
        .expect("validated config samples at least one server");
    ServerId(best)
}
