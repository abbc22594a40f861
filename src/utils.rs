/// Make a trimmed copy of the provided `&str`, or `None` if it only contains whitespace.
pub fn take_if_not_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Trim every text value in the given list, keeping the original order.
pub fn trim_all(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|it| it.trim().to_string())
        .collect()
}

/// Product of the given numbers, saturating at `usize::MAX` instead of overflowing.
///
/// No in-memory table has `usize::MAX` values, so a saturated product never matches
/// an actual table size.
pub fn saturating_product(values: &[usize]) -> usize {
    values.iter().fold(1usize, |acc, it| acc.saturating_mul(*it))
}

/// Compute the position of an assignment in a table where each variable has the
/// given cardinality. The first variable is the most significant digit, i.e. the last
/// variable changes the fastest.
///
/// Returns `None` if the lengths do not match, a state exceeds its cardinality, or the
/// position does not fit into `usize`.
pub fn mixed_radix_index(assignment: &[usize], cardinalities: &[usize]) -> Option<usize> {
    if assignment.len() != cardinalities.len() {
        return None;
    }
    let mut index = 0usize;
    for (state, cardinality) in assignment.iter().zip(cardinalities) {
        if state >= cardinality {
            return None;
        }
        index = index.checked_mul(*cardinality)?.checked_add(*state)?;
    }
    Some(index)
}
