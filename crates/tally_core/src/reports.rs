//! Aggregate reporting over stored records.
//!
//! Pure functions with no I/O or side effects. Coercion rule throughout:
//! only a genuine [`Value::Numeric`](tally_store::Value) contributes its
//! value; any other value counts as zero but still counts as an entry.

use serde::Serialize;
use tally_store::Record;

/// Sum, count, and average over a set of records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    /// Sum of numeric values; non-numeric values contribute zero.
    pub total: f64,
    /// Number of records, numeric or not.
    pub count: usize,
    /// `total / count` rounded to two decimals, zero when empty.
    pub average: f64,
}

impl Summary {
    /// The summary of an empty record set.
    pub const EMPTY: Summary = Summary {
        total: 0.0,
        count: 0,
        average: 0.0,
    };
}

/// Computes sum, count, and average over the given records.
#[must_use]
pub fn summarize(records: &[Record]) -> Summary {
    if records.is_empty() {
        return Summary::EMPTY;
    }

    let total: f64 = records
        .iter()
        .map(|record| record.value.numeric_or_zero())
        .sum();
    let count = records.len();
    let average = round_half_up(total / count as f64);

    Summary {
        total,
        count,
        average,
    }
}

/// Renders a one-line human-readable report built from [`summarize`].
#[must_use]
pub fn generate_report(records: &[Record]) -> String {
    let summary = summarize(records);
    format!(
        "Total entries: {}, Total value: {}, Average: {}",
        summary.count, summary.total, summary.average
    )
}

/// Retains records whose numeric value is at least `min`, preserving input
/// order. Non-numeric values coerce to zero, so they pass any `min <= 0`.
#[must_use]
pub fn filter_by_min_value(records: &[Record], min: f64) -> Vec<Record> {
    records
        .iter()
        .filter(|record| record.value.numeric_or_zero() >= min)
        .cloned()
        .collect()
}

/// Rounds to two decimals, half-up on the third decimal digit.
fn round_half_up(x: f64) -> f64 {
    (x * 100.0 + 0.5).floor() / 100.0
}
