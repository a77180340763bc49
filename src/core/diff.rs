//! Golden snapshot comparison with numeric tolerance
//!
//! Used for regression gating: a freshly generated BOM snapshot is compared
//! index by index against a stored reference. Floating-point noise from
//! geometry computations is absorbed by an absolute epsilon; everything
//! else must match exactly.

use std::io::{self, Write};

use serde_json::Value;

/// Default absolute tolerance for numeric comparisons.
pub const DEFAULT_EPSILON: f64 = 0.0005;

/// Recursive tolerant equality over JSON values.
///
/// Numbers match when their absolute difference is within `epsilon`
/// (relative tolerance is always zero). Strings, booleans, and null compare
/// strictly. Sequences must match element-wise in order; mappings must have
/// exactly the same key set with matching values. Anything else falls back
/// to strict equality.
pub fn records_match(golden: &Value, candidate: &Value, epsilon: f64) -> bool {
    match (golden, candidate) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => (x - y).abs() <= epsilon,
            _ => a == b,
        },
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len()
                && a.iter()
                    .zip(b)
                    .all(|(x, y)| records_match(x, y, epsilon))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| records_match(x, y, epsilon)))
        }
        _ => golden == candidate,
    }
}

/// One index where the candidate diverged from the golden reference.
#[derive(Debug, Clone)]
pub struct Mismatch {
    pub index: usize,
    pub golden: Value,
    pub candidate: Value,
}

/// Itemized outcome of comparing a candidate sequence against a golden one.
#[derive(Debug)]
pub struct DiffReport {
    pub epsilon: f64,
    pub golden_len: usize,
    pub candidate_len: usize,
    pub mismatches: Vec<Mismatch>,
}

impl DiffReport {
    pub fn has_count_mismatch(&self) -> bool {
        self.golden_len != self.candidate_len
    }

    /// True only when both sequences have equal length and every index
    /// matched.
    pub fn is_match(&self) -> bool {
        !self.has_count_mismatch() && self.mismatches.is_empty()
    }

    /// Write the human-readable mismatch report.
    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        if self.has_count_mismatch() {
            writeln!(
                out,
                "Count mismatch: golden {} != current {}",
                self.golden_len, self.candidate_len
            )?;
        }
        for mismatch in &self.mismatches {
            writeln!(
                out,
                "Mismatch at record {} (epsilon={})",
                mismatch.index, self.epsilon
            )?;
            writeln!(out, "GOLDEN: {}", mismatch.golden)?;
            writeln!(out, "CURRNT: {}", mismatch.candidate)?;
        }
        Ok(())
    }
}

/// Compare two record sequences positionally.
///
/// A length mismatch is reported once, by count, and does not stop the
/// element-wise comparison over the common prefix.
pub fn compare(golden: &[Value], candidate: &[Value], epsilon: f64) -> DiffReport {
    let mismatches = golden
        .iter()
        .zip(candidate)
        .enumerate()
        .filter(|(_, (g, c))| !records_match(g, c, epsilon))
        .map(|(index, (g, c))| Mismatch {
            index,
            golden: g.clone(),
            candidate: c.clone(),
        })
        .collect();

    DiffReport {
        epsilon,
        golden_len: golden.len(),
        candidate_len: candidate.len(),
        mismatches,
    }
}
