//! Result ordering: type priority first, then newest first

use super::UnifiedResult;

/// Priority of types absent from [`TYPE_PRIORITIES`]
pub const UNKNOWN_TYPE_PRIORITY: u8 = 10;

/// Lower sorts first
const TYPE_PRIORITIES: [(&str, u8); 9] = [
    ("news", 1),
    ("vacancy", 2),
    ("branch", 3),
    ("management", 4),
    ("about", 5),
    ("services", 6),
    ("aeronautical", 7),
    ("social", 8),
    ("appeals", 9),
];

pub fn type_priority(result_type: &str) -> u8 {
    TYPE_PRIORITIES
        .iter()
        .find(|(name, _)| *name == result_type)
        .map(|(_, priority)| *priority)
        .unwrap_or(UNKNOWN_TYPE_PRIORITY)
}

/// Sort in place by type priority, then date descending
///
/// The sort is stable: results equal on both keys keep their input order.
pub fn rank(results: &mut [UnifiedResult]) {
    results.sort_by(|a, b| {
        type_priority(&a.result_type)
            .cmp(&type_priority(&b.result_type))
            .then_with(|| b.date.cmp(&a.date))
    });
}
