//! Form-layer checks for threshold rules.
//!
//! The codec itself never rejects input; these checks run at submission
//! time (and in the lint tool) and report everything wrong with a rule
//! list as per-field violations. Field paths use the `rules[i]` /
//! `thresholds[j].warn2` notation so a caller can attach each violation
//! to the exact form input it belongs to.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::rule::{Threshold, ThresholdRule};

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

/// Threshold labels: a letter followed by letters or digits.
pub const LABEL_PATTERN: &str = r"^[a-zA-Z][A-Za-z0-9]*$";

/// Signed decimal, possibly blank: `5`, `5.5`, `.5`, `-5`, `-.5`.
/// A lone `-` or `.`, or a trailing dot, does not match; blankness is
/// checked separately by the required-field rules.
pub const DECIMAL_PATTERN: &str = r"^(-(\d+(\.\d+)?|\.\d+)|(\d+)?(\.\d+)?)$";

/// Start bound of a warning/critical range: an optional `@` marker, then
/// either the open-start marker `~` (optionally followed by a decimal) or
/// a signed decimal.
pub const RANGE_START_PATTERN: &str =
    r"^@?(~(\d+)?(\.\d+)?|-(\d+(\.\d+)?|\.\d+)|(\d+)?(\.\d+)?)$";

static LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(LABEL_PATTERN).expect("label pattern is valid"));
static DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DECIMAL_PATTERN).expect("decimal pattern is valid"));
static RANGE_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(RANGE_START_PATTERN).expect("range start pattern is valid"));

const LABEL_HINT: &str = "must start with a letter followed by letters or digits";
const DECIMAL_HINT: &str = "must be a decimal number";
const RANGE_START_HINT: &str = "must be a decimal number, optionally marked with @ or ~";

// ---------------------------------------------------------------------------
// Violations
// ---------------------------------------------------------------------------

/// What category of check a [`FieldViolation`] failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViolationKind {
    /// A mandatory field is blank, or a paired field is missing.
    Required,
    /// The field's text does not match its grammar.
    Pattern,
    /// Two numeric fields are out of order.
    Order,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Pattern => "pattern",
            Self::Order => "order",
        }
    }
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One failed check, attached to a specific field path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub kind: ViolationKind,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind,
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

/// Check one threshold clause; field paths are bare field names.
pub fn validate_threshold(threshold: &Threshold) -> Vec<FieldViolation> {
    let mut out = Vec::new();

    out.extend(required_field("label", &threshold.label, &LABEL_RE, LABEL_HINT));
    out.extend(required_field("value", &threshold.value, &DECIMAL_RE, DECIMAL_HINT));
    out.extend(required_field(
        "warn1",
        &threshold.warn1,
        &RANGE_START_RE,
        RANGE_START_HINT,
    ));
    out.extend(required_field("warn2", &threshold.warn2, &DECIMAL_RE, DECIMAL_HINT));
    out.extend(required_field(
        "crit1",
        &threshold.crit1,
        &RANGE_START_RE,
        RANGE_START_HINT,
    ));
    out.extend(required_field("crit2", &threshold.crit2, &DECIMAL_RE, DECIMAL_HINT));
    out.extend(optional_field("min", &threshold.min, &DECIMAL_RE, DECIMAL_HINT));
    out.extend(optional_field("max", &threshold.max, &DECIMAL_RE, DECIMAL_HINT));

    out.extend(range_end_order("warn1", "warn2", &threshold.warn1, &threshold.warn2));
    out.extend(range_end_order("crit1", "crit2", &threshold.crit1, &threshold.crit2));

    // min and max bound the valid data range together; the encoder drops a
    // lone one, so catch that before it is silently lost.
    if threshold.min.is_empty() != threshold.max.is_empty() {
        let field = if threshold.min.is_empty() { "min" } else { "max" };
        out.push(FieldViolation::new(
            field,
            ViolationKind::Required,
            "min and max must be given together",
        ));
    }
    if let (Ok(min), Ok(max)) = (threshold.min.parse::<f64>(), threshold.max.parse::<f64>()) {
        if max <= min {
            out.push(FieldViolation::new(
                "max",
                ViolationKind::Order,
                "max must be greater than min",
            ));
        }
    }

    out
}

/// Check one rule and all of its clauses; clause paths are
/// `thresholds[j].field`.
pub fn validate_rule(rule: &ThresholdRule) -> Vec<FieldViolation> {
    let mut out = Vec::new();

    if rule.metric.is_empty() {
        out.push(FieldViolation::new(
            "metric",
            ViolationKind::Required,
            "metric is required",
        ));
    }
    if rule.thresholds.is_empty() {
        out.push(FieldViolation::new(
            "thresholds",
            ViolationKind::Required,
            "at least one threshold is required",
        ));
    }
    for (j, threshold) in rule.thresholds.iter().enumerate() {
        for mut violation in validate_threshold(threshold) {
            violation.field = format!("thresholds[{j}].{}", violation.field);
            out.push(violation);
        }
    }

    out
}

/// Check a whole rule list; paths are `rules[i].thresholds[j].field`.
pub fn validate_rules(rules: &[ThresholdRule]) -> Vec<FieldViolation> {
    let mut out = Vec::new();
    for (i, rule) in rules.iter().enumerate() {
        for mut violation in validate_rule(rule) {
            violation.field = format!("rules[{i}].{}", violation.field);
            out.push(violation);
        }
    }
    out
}

/// Required fields report blankness first and a grammar mismatch otherwise.
fn required_field(field: &str, raw: &str, re: &Regex, hint: &str) -> Option<FieldViolation> {
    if raw.is_empty() {
        Some(FieldViolation::new(
            field,
            ViolationKind::Required,
            format!("{field} is required"),
        ))
    } else if !re.is_match(raw) {
        Some(FieldViolation::new(field, ViolationKind::Pattern, hint))
    } else {
        None
    }
}

/// Optional fields are only checked against their grammar when non-blank.
fn optional_field(field: &str, raw: &str, re: &Regex, hint: &str) -> Option<FieldViolation> {
    if !raw.is_empty() && !re.is_match(raw) {
        Some(FieldViolation::new(field, ViolationKind::Pattern, hint))
    } else {
        None
    }
}

/// A range's end must not be below its start.
///
/// The comparison only applies when both bounds read as numbers: a blank
/// or `~` (open) start never constrains the end, and a leading `@` marker
/// on the start is ignored for the numeric comparison.
fn range_end_order(
    start_field: &str,
    end_field: &str,
    start_raw: &str,
    end_raw: &str,
) -> Option<FieldViolation> {
    let start_raw = start_raw.strip_prefix('@').unwrap_or(start_raw);
    let start: f64 = start_raw.parse().ok()?;
    let end: f64 = end_raw.parse().ok()?;
    (end < start).then(|| {
        FieldViolation::new(
            end_field,
            ViolationKind::Order,
            format!("{end_field} must be greater than or equal to {start_field}"),
        )
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode_thresholds;

    fn valid_threshold() -> Threshold {
        decode_thresholds("load=3.2s;0:5;0:10;0;20").remove(0)
    }

    fn kinds_for<'a>(violations: &'a [FieldViolation], field: &str) -> Vec<&'a ViolationKind> {
        violations
            .iter()
            .filter(|v| v.field == field)
            .map(|v| &v.kind)
            .collect()
    }

    // -- happy path --

    #[test]
    fn a_well_formed_threshold_has_no_violations() {
        assert_eq!(validate_threshold(&valid_threshold()), Vec::new());
    }

    // -- label --

    #[test]
    fn label_must_start_with_a_letter() {
        let mut t = valid_threshold();
        t.label = "9load".to_string();
        assert_eq!(kinds_for(&validate_threshold(&t), "label"), vec![&ViolationKind::Pattern]);

        t.label = "load-avg".to_string();
        assert_eq!(kinds_for(&validate_threshold(&t), "label"), vec![&ViolationKind::Pattern]);

        t.label = "load15".to_string();
        assert_eq!(kinds_for(&validate_threshold(&t), "label"), Vec::<&ViolationKind>::new());
    }

    #[test]
    fn blank_label_is_required_not_pattern() {
        let mut t = valid_threshold();
        t.label = String::new();
        assert_eq!(kinds_for(&validate_threshold(&t), "label"), vec![&ViolationKind::Required]);
    }

    // -- numeric patterns --

    #[test]
    fn value_accepts_signed_decimals() {
        for ok in ["5", "5.5", ".5", "-5", "-.5", "-5.5", "0"] {
            let mut t = valid_threshold();
            t.value = ok.to_string();
            assert_eq!(
                kinds_for(&validate_threshold(&t), "value"),
                Vec::<&ViolationKind>::new(),
                "value {ok:?} should pass"
            );
        }
        for bad in ["-", ".", "5.", "-5.", "1e5", "five", "@5", "~"] {
            let mut t = valid_threshold();
            t.value = bad.to_string();
            assert_eq!(
                kinds_for(&validate_threshold(&t), "value"),
                vec![&ViolationKind::Pattern],
                "value {bad:?} should fail"
            );
        }
    }

    #[test]
    fn range_starts_accept_at_and_tilde_markers() {
        for ok in ["0", "-0.5", "~", "@5", "@~", "~5", "~.5", "@~2.5"] {
            let mut t = valid_threshold();
            t.warn1 = ok.to_string();
            t.warn2 = "100".to_string();
            assert_eq!(
                kinds_for(&validate_threshold(&t), "warn1"),
                Vec::<&ViolationKind>::new(),
                "warn1 {ok:?} should pass"
            );
        }
        for bad in ["-~", "@@5", "5~", "-", "~-5"] {
            let mut t = valid_threshold();
            t.warn1 = bad.to_string();
            assert_eq!(
                kinds_for(&validate_threshold(&t), "warn1"),
                vec![&ViolationKind::Pattern],
                "warn1 {bad:?} should fail"
            );
        }
    }

    // -- range ordering --

    #[test]
    fn warn_range_end_below_start_is_flagged() {
        let mut t = valid_threshold();
        t.warn1 = "5".to_string();
        t.warn2 = "3".to_string();
        assert_eq!(kinds_for(&validate_threshold(&t), "warn2"), vec![&ViolationKind::Order]);
    }

    #[test]
    fn equal_range_bounds_are_allowed() {
        let mut t = valid_threshold();
        t.crit1 = "10".to_string();
        t.crit2 = "10".to_string();
        assert_eq!(validate_threshold(&t), Vec::new());
    }

    #[test]
    fn open_start_never_constrains_the_end() {
        let mut t = valid_threshold();
        t.warn1 = "~".to_string();
        t.warn2 = "-100".to_string();
        assert_eq!(validate_threshold(&t), Vec::new());
    }

    #[test]
    fn at_marker_is_stripped_before_comparing() {
        let mut t = valid_threshold();
        t.crit1 = "@5".to_string();
        t.crit2 = "3".to_string();
        assert_eq!(kinds_for(&validate_threshold(&t), "crit2"), vec![&ViolationKind::Order]);

        t.crit2 = "7".to_string();
        assert_eq!(validate_threshold(&t), Vec::new());
    }

    // -- min / max --

    #[test]
    fn max_must_exceed_min() {
        let mut t = valid_threshold();
        t.min = "5".to_string();
        t.max = "3".to_string();
        assert_eq!(kinds_for(&validate_threshold(&t), "max"), vec![&ViolationKind::Order]);

        t.max = "5".to_string();
        assert_eq!(kinds_for(&validate_threshold(&t), "max"), vec![&ViolationKind::Order]);
    }

    #[test]
    fn lone_min_or_max_is_flagged_on_the_blank_side() {
        let mut t = valid_threshold();
        t.max = String::new();
        assert_eq!(kinds_for(&validate_threshold(&t), "max"), vec![&ViolationKind::Required]);

        let mut t = valid_threshold();
        t.min = String::new();
        assert_eq!(kinds_for(&validate_threshold(&t), "min"), vec![&ViolationKind::Required]);
    }

    #[test]
    fn absent_min_and_max_are_fine() {
        let mut t = valid_threshold();
        t.min = String::new();
        t.max = String::new();
        assert_eq!(validate_threshold(&t), Vec::new());
    }

    // -- blank and degraded clauses --

    #[test]
    fn blank_clause_reports_every_required_field() {
        let violations = validate_threshold(&Threshold::default());
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["label", "value", "warn1", "warn2", "crit1", "crit2"]);
        assert!(violations.iter().all(|v| v.kind == ViolationKind::Required));
    }

    #[test]
    fn degraded_tokens_fail_submit_validation() {
        // The lenient decoder lets a broken token through as label-only;
        // the form layer is what stops it from being saved.
        let decoded = decode_thresholds("junk");
        let violations = validate_threshold(&decoded[0]);
        assert!(violations.iter().any(|v| v.field == "value"));
        assert!(violations.iter().any(|v| v.field == "warn1"));
    }

    // -- rule and rule-list paths --

    #[test]
    fn rule_paths_point_at_the_offending_clause() {
        let rule = ThresholdRule {
            metric: String::new(),
            host: None,
            endpoint_group: None,
            thresholds: vec![valid_threshold(), Threshold::default()],
        };
        let violations = validate_rule(&rule);
        assert!(violations.iter().any(|v| v.field == "metric"));
        assert!(violations.iter().any(|v| v.field == "thresholds[1].label"));
        assert!(!violations.iter().any(|v| v.field.starts_with("thresholds[0]")));
    }

    #[test]
    fn empty_rule_list_entry_is_flagged() {
        let rule = ThresholdRule {
            metric: "eu.egi.CertValidity".to_string(),
            host: None,
            endpoint_group: None,
            thresholds: Vec::new(),
        };
        assert_eq!(
            validate_rule(&rule),
            vec![FieldViolation::new(
                "thresholds",
                ViolationKind::Required,
                "at least one threshold is required"
            )]
        );
    }

    #[test]
    fn rule_list_paths_are_fully_qualified() {
        let good = ThresholdRule {
            metric: "eu.egi.CertValidity".to_string(),
            host: None,
            endpoint_group: None,
            thresholds: vec![valid_threshold()],
        };
        let mut bad = good.clone();
        bad.thresholds[0].warn2 = "-1".to_string();
        let violations = validate_rules(&[good, bad]);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "rules[1].thresholds[0].warn2");
        assert_eq!(violations[0].kind, ViolationKind::Order);
    }
}
