//! LED indicator vector.
//!
//! One boolean per category, fully recomputed each tick from the selection
//! and idle state - no incremental mutation to keep consistent.

use crate::config::MAX_CATEGORIES;
use heapless::Vec;

/// Ordered LED states, one per category.
pub type IndicatorVector = Vec<bool, MAX_CATEGORIES>;

/// Compute the LED vector: all on while idle, otherwise only the selected
/// category's LED.
pub fn indicator_vector(category_index: usize, category_count: usize, idle: bool) -> IndicatorVector {
    let mut vector = Vec::new();
    for i in 0..category_count.min(MAX_CATEGORIES) {
        // Capacity is bounded by the loop range.
        let _ = vector.push(idle || i == category_index);
    }
    vector
}
