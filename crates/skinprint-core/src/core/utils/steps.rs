use phf::{Map, phf_map};
use std::cmp::Ordering;

/// Order in which product functions are applied within a routine.
static STEP_ORDER: Map<&'static str, u32> = phf_map! {
    "cleanser" => 1,
    "toner" => 2,
    "exfoliant" => 3,
    "serum" => 4,
    "moisturizer" => 5,
    "sunscreen" => 6,
};

/// Position given to functions outside the table; they run after every known step.
pub const UNKNOWN_STEP_ORDER: u32 = 999;

pub fn step_order(function: &str) -> u32 {
    STEP_ORDER
        .get(function.trim().to_lowercase().as_str())
        .copied()
        .unwrap_or(UNKNOWN_STEP_ORDER)
}

pub fn step_cmp(function1: &str, function2: &str) -> Ordering {
    step_order(function1).cmp(&step_order(function2))
}

pub fn is_known_step(function: &str) -> bool {
    step_order(function) != UNKNOWN_STEP_ORDER
}
