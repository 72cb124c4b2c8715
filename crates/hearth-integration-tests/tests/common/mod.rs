//! Shared helpers for integration tests.

use hearth_abilities::{AbilityManager, TickReport};

/// Run `n` ticks, returning the report of the last one.
#[allow(dead_code)]
pub fn tick(manager: &mut AbilityManager, n: usize) -> TickReport {
    let mut last = TickReport::default();
    for _ in 0..n {
        last = manager.update_abilities();
    }
    last
}
