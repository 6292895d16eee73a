//! Collision-free slot placement
//!
//! Obstacles and vehicles are dropped into discrete slots by rejection
//! sampling: draw a uniform slot, retry while it is taken.

use std::collections::BTreeSet;

use rand::Rng;

/// Draw `count` distinct slots from `0..slots`, in draw order
///
/// Termination requires `count <= slots`; `GameConfig::validate` guarantees it
/// for every generator. A larger request is truncated to `slots`.
pub fn distinct_slots<R: Rng + ?Sized>(rng: &mut R, count: u32, slots: u32) -> Vec<u32> {
    debug_assert!(count <= slots, "cannot place {count} items into {slots} slots");
    let count = count.min(slots) as usize;

    let mut taken = BTreeSet::new();
    let mut order = Vec::with_capacity(count);
    while order.len() < count {
        let slot = rng.random_range(0..slots);
        if taken.insert(slot) {
            order.push(slot);
        }
    }
    order
}
