//! Ordering of unit names by their numeric prefix.
//!
//! Unit names are `"<counter>_<key>"`; `"2_x"` sorts before `"10_x"`.

use std::cmp::Ordering;

/// Split a unit name into its leading counter and the remainder.
fn split_counter(name: &str) -> Option<(u64, &str)> {
    let digits = name.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let counter = name[..digits].parse().ok()?;
    Some((counter, &name[digits..]))
}

/// Compare unit names numerically on their counter, then by the rest.
///
/// Names without a numeric prefix sort after numbered ones, lexicographically.
pub fn compare_unit_names(a: &str, b: &str) -> Ordering {
    match (split_counter(a), split_counter(b)) {
        (Some((na, ra)), Some((nb, rb))) => na.cmp(&nb).then_with(|| ra.cmp(rb)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
