use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

/// Ids from `pool` that have not been served yet, in pool order.
pub fn eligible_ids(pool: &[i64], previous: &[i64]) -> Vec<i64> {
    let served: HashSet<i64> = previous.iter().copied().collect();
    pool.iter()
        .copied()
        .filter(|id| !served.contains(id))
        .collect()
}

/// Draws the next question uniformly from `pool` minus `previous`.
///
/// Returns `None` once every id in the pool has been served. `previous` is
/// treated as a set, so repeated ids or ids outside the pool do not count
/// towards exhaustion: `[q0, q0, q0]` over a three-question pool still yields
/// a question, where a plain `previous.len() >= pool.len()` check would not.
pub fn pick_question<R: Rng + ?Sized>(pool: &[i64], previous: &[i64], rng: &mut R) -> Option<i64> {
    eligible_ids(pool, previous).choose(rng).copied()
}
