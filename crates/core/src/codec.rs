//! Codec for the compact threshold rule grammar.
//!
//! A thresholds string is a space-joined list of clauses, each of the form
//! `label=value[uom];warn1:warn2;crit1:crit2[;min;max]`, e.g.
//!
//! ```text
//! load=3.2s;0:5;0:10;0;20 swap=40%;50:60;70:80
//! ```
//!
//! [`decode_thresholds`] is lenient: it never fails, and a token that does
//! not have the `label=...` shape degrades to a label-only [`Threshold`]
//! holding the raw token, so broken input stays visible and editable.
//! [`decode_thresholds_strict`] decodes the same grammar but reports the
//! first malformed token instead of degrading it; tooling uses it to flag
//! strings the lenient path would silently accept.

use crate::error::GrammarError;
use crate::rule::Threshold;
use crate::uom::split_value_uom;

/// Decode a compact thresholds string into its clauses, in input order.
///
/// The empty string decodes to no clauses at all. Tokens are separated by
/// single spaces; a run of spaces produces empty tokens, which degrade
/// like any other malformed token.
pub fn decode_thresholds(input: &str) -> Vec<Threshold> {
    if input.is_empty() {
        return Vec::new();
    }
    input
        .split(' ')
        .map(|token| decode_token(token).unwrap_or_else(|| Threshold::label_only(token)))
        .collect()
}

/// Decode a compact thresholds string, rejecting malformed tokens.
///
/// Identical to [`decode_thresholds`] on well-formed input; returns the
/// first token that would have degraded to label-only otherwise.
pub fn decode_thresholds_strict(input: &str) -> Result<Vec<Threshold>, GrammarError> {
    if input.is_empty() {
        return Ok(Vec::new());
    }
    input
        .split(' ')
        .enumerate()
        .map(|(index, token)| {
            decode_token(token).ok_or_else(|| GrammarError::MalformedToken {
                index,
                token: token.to_string(),
            })
        })
        .collect()
}

/// Encode threshold clauses back into the compact grammar, space-joined.
///
/// Every clause gets its warning and critical segments, even when blank;
/// the trailing `;min;max` pair is written only when both are non-empty.
/// Encoding an empty slice yields the empty string.
pub fn encode_thresholds(thresholds: &[Threshold]) -> String {
    thresholds
        .iter()
        .map(encode_threshold)
        .collect::<Vec<_>>()
        .join(" ")
}

fn encode_threshold(t: &Threshold) -> String {
    let mut out = format!(
        "{}={}{};{}:{};{}:{}",
        t.label, t.value, t.uom, t.warn1, t.warn2, t.crit1, t.crit2
    );
    if !t.min.is_empty() && !t.max.is_empty() {
        out.push(';');
        out.push_str(&t.min);
        out.push(';');
        out.push_str(&t.max);
    }
    out
}

/// Decode one space-separated token, or `None` when it is not a single
/// `label=value...` pair.
fn decode_token(token: &str) -> Option<Threshold> {
    let parts: Vec<&str> = token.split('=').collect();
    let (label, rest) = match parts.as_slice() {
        [label, rest] => (*label, *rest),
        _ => return None,
    };

    let subtokens: Vec<&str> = rest.split(';').collect();
    let (value, uom) = split_value_uom(subtokens.first().copied().unwrap_or(""));
    let (warn1, warn2) = decode_range(subtokens.get(1).copied());
    let (crit1, crit2) = decode_range(subtokens.get(2).copied());

    Some(Threshold {
        label: label.to_string(),
        value: value.to_string(),
        uom,
        warn1,
        warn2,
        crit1,
        crit2,
        min: subtokens.get(3).copied().unwrap_or("").to_string(),
        max: subtokens.get(4).copied().unwrap_or("").to_string(),
    })
}

/// Split a `start:end` range subtoken into its bounds.
///
/// An absent subtoken leaves both bounds blank. A subtoken without a colon
/// is an end bound with an implied start of `"0"` (the zero-floor
/// shorthand, so `;5;` reads as `;0:5;`). Parts past the second colon are
/// dropped.
fn decode_range(raw: Option<&str>) -> (String, String) {
    let Some(raw) = raw else {
        return (String::new(), String::new());
    };
    let mut parts = raw.split(':');
    let first = parts.next().unwrap_or("");
    match parts.next() {
        Some(second) => (first.to_string(), second.to_string()),
        None => ("0".to_string(), first.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
