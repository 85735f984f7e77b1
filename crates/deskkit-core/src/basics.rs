//! Small numeric and string helpers.

use crate::error::CoreError;

/// `a / b`, or `None` when `b` is zero.
pub fn safe_div(a: f64, b: f64) -> Option<f64> {
    if b == 0.0 {
        None
    } else {
        Some(a / b)
    }
}

/// Lowercase, trim, collapse each run of spaces into one `-`, then drop
/// everything that is neither alphanumeric nor `-`.
///
/// Hyphens already present are kept, so `"a - b"` becomes `"a---b"`.
pub fn slugify(s: &str) -> String {
    let lowered = s.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut in_space = false;
    for c in lowered.trim().chars() {
        if c == ' ' {
            if !in_space {
                out.push('-');
                in_space = true;
            }
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out.retain(|c| c.is_alphanumeric() || c == '-');
    out
}

/// Median of `nums`; the mean of the two middle values for even lengths.
pub fn median(nums: &[f64]) -> Result<f64, CoreError> {
    if nums.is_empty() {
        return Err(CoreError::EmptyInput);
    }
    let mut sorted = nums.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Ok(sorted[mid])
    } else {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}
