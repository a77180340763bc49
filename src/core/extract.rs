//! Echo extraction - recovering BOM records from CAD console output
//!
//! The rendering tool never emits a structured protocol; BOM items arrive as
//! `BOM_ITEM` echo lines buried in free-form console output, sometimes
//! wrapped in tool-specific framing. Extraction therefore runs an ordered
//! list of strategies over increasingly permissive grammars and stops at the
//! first one that finds anything.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::core::record::BomRecord;

/// Marker token identifying an embedded BOM item in tool output.
pub const MARKER: &str = "BOM_ITEM";

/// Console-style echo: `"BOM_ITEM:", "TAG", [ ... ]` (tag optional).
static QUOTED_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)"BOM_ITEM:",\s*(?:"([^"]+)"\s*,\s*)?(\[.*?\])"#).expect("static regex")
});

/// Bare variant: `BOM_ITEM: "TAG", [ ... ]` (tag optional).
static BARE_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)BOM_ITEM:\s*(?:"([^"]+)"\s*,\s*)?(\[.*?\])"#).expect("static regex")
});

/// Optional quoted label directly before the payload bracket: `"TAG",`
static TRAILING_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)"\s*,\s*$"#).expect("static regex"));

/// Caller-supplied identity stamped onto every extracted record.
#[derive(Debug, Clone)]
pub struct RecordStamp {
    pub product: String,
    pub version: String,
}

/// One extraction attempt over the raw text.
///
/// Returns every record it can recover; an empty result hands control to the
/// next, more permissive strategy.
trait ExtractStrategy {
    fn extract(&self, text: &str, stamp: &RecordStamp) -> Vec<BomRecord>;
}

/// Tier 1: scan line by line. The most robust form, immune to unrelated
/// bracket noise elsewhere in the output.
struct PerLine;

impl ExtractStrategy for PerLine {
    fn extract(&self, text: &str, stamp: &RecordStamp) -> Vec<BomRecord> {
        text.lines()
            .filter_map(|line| parse_marker_line(line, stamp))
            .collect()
    }
}

/// Tier 2: whole-text scan for the quoted console form, matching across
/// line breaks.
struct QuotedMarker;

impl ExtractStrategy for QuotedMarker {
    fn extract(&self, text: &str, stamp: &RecordStamp) -> Vec<BomRecord> {
        extract_with(&QUOTED_ITEM_RE, text, stamp)
    }
}

/// Tier 3: whole-text scan for the unquoted form.
struct BareMarker;

impl ExtractStrategy for BareMarker {
    fn extract(&self, text: &str, stamp: &RecordStamp) -> Vec<BomRecord> {
        extract_with(&BARE_ITEM_RE, text, stamp)
    }
}

/// Recover all BOM records from raw tool output, in first-occurrence order.
///
/// Strategies are tried in order; the first tier that yields any record
/// wins. An empty result means the text carried no recoverable items.
pub fn extract_records(text: &str, stamp: &RecordStamp) -> Vec<BomRecord> {
    let strategies: [&dyn ExtractStrategy; 3] = [&PerLine, &QuotedMarker, &BareMarker];
    for strategy in strategies {
        let records = strategy.extract(text, stamp);
        if !records.is_empty() {
            return records;
        }
    }
    Vec::new()
}

/// Parse one line containing the marker token, if it carries a payload.
fn parse_marker_line(line: &str, stamp: &RecordStamp) -> Option<BomRecord> {
    let (_, post) = line.split_once(MARKER)?;

    // Greedy outward bracket match: first '[' to last ']'.
    let lb = post.find('[')?;
    let rb = post.rfind(']')?;
    if rb <= lb {
        return None;
    }
    let payload = post[lb..=rb].trim();

    let prefix = post[..lb].trim();
    let tag = TRAILING_TAG_RE
        .captures(prefix)
        .map(|caps| caps[1].to_string());

    fold_payload(payload, tag, stamp)
}

fn extract_with(re: &Regex, text: &str, stamp: &RecordStamp) -> Vec<BomRecord> {
    re.captures_iter(text)
        .filter_map(|caps| {
            let payload = caps.get(2)?.as_str();
            let tag = caps.get(1).map(|m| m.as_str().to_string());
            fold_payload(payload, tag, stamp)
        })
        .collect()
}

/// Fold a flat key/value array (`["D", 150, "L", 1500, ...]`) into a record.
///
/// Even-indexed entries are keys, odd-indexed entries their values. A
/// malformed payload yields `None` and the item is dropped; this is a
/// per-record skip, never a run failure.
fn fold_payload(raw: &str, tag: Option<String>, stamp: &RecordStamp) -> Option<BomRecord> {
    let entries: Vec<Value> = serde_json::from_str(raw).ok()?;

    let mut record = BomRecord::new();
    record.insert("product".into(), Value::String(stamp.product.clone()));
    record.insert("version".into(), Value::String(stamp.version.clone()));
    if let Some(tag) = tag {
        record.insert("bom_tag".into(), Value::String(tag));
    }

    for pair in entries.chunks(2) {
        let key = match &pair[0] {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        // A trailing key without a value binds to null rather than erroring.
        let value = pair.get(1).cloned().unwrap_or(Value::Null);
        record.insert(key, value);
    }
    Some(record)
}
