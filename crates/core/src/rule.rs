//! Editable model for metric threshold rules.
//!
//! A [`ThresholdRule`] is the form-friendly shape of one profile entry:
//! the metric it applies to, optional host / endpoint-group scoping, and
//! the rule's threshold clauses broken out field by field. The compact
//! wire string is handled by [`crate::codec`]; the profile document that
//! carries it by [`crate::profile`].

use serde::{Deserialize, Serialize};

use crate::uom::Uom;

/// One `label=value...` clause of a threshold rule, broken into fields.
///
/// Numeric fields are kept as the user typed them (strings, blank when
/// absent) so that editing round-trips text instead of reformatting it.
/// Range bounds may carry the `@` (inside-range) and `~` (open start)
/// markers in `warn1` / `crit1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Threshold {
    pub label: String,
    pub value: String,
    pub uom: Uom,
    pub warn1: String,
    pub warn2: String,
    pub crit1: String,
    pub crit2: String,
    pub min: String,
    pub max: String,
}

impl Threshold {
    /// A threshold carrying only a label, every other field blank.
    ///
    /// Tokens that do not decode as `label=value...` degrade to this form,
    /// keeping the raw text visible in the editor instead of dropping it.
    pub fn label_only(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }
}

/// A metric's threshold rule, with optional host / endpoint-group scope.
///
/// `host` and `endpoint_group` are `None` when the rule applies
/// profile-wide; the wire format writes them only when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdRule {
    pub metric: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_group: Option<String>,
    pub thresholds: Vec<Threshold>,
}

impl ThresholdRule {
    /// A freshly added rule: no metric, no scoping, one blank clause
    /// ready for input.
    pub fn new() -> Self {
        Self {
            metric: String::new(),
            host: None,
            endpoint_group: None,
            thresholds: vec![Threshold::default()],
        }
    }

    /// Ensure the rule has at least one threshold row to edit.
    ///
    /// Rules decoded from an empty thresholds string have no clauses; the
    /// editor still needs a row to type into.
    pub fn normalize_for_edit(&mut self) {
        if self.thresholds.is_empty() {
            self.thresholds.push(Threshold::default());
        }
    }
}

impl Default for ThresholdRule {
    fn default() -> Self {
        Self::new()
    }
}
