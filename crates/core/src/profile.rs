//! Wire-shaped thresholds profile documents.
//!
//! This is the boundary representation: each rule entry carries its
//! thresholds as one compact string, and the optional `host` /
//! `endpoint_group` scope keys are present only when non-empty. Decoding
//! turns entries into the editable [`ThresholdRule`] shape; encoding packs
//! an edited rule list back into entries for transmission.

use serde::{Deserialize, Serialize};

use crate::codec::{decode_thresholds, encode_thresholds};
use crate::rule::ThresholdRule;

/// One rule as stored in a thresholds profile document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdRuleEntry {
    pub metric: String,
    #[serde(default)]
    pub thresholds: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_group: Option<String>,
}

impl ThresholdRuleEntry {
    /// Expand this entry's compact thresholds string into an editable rule.
    ///
    /// Legacy documents sometimes carry `host` / `endpoint_group` as empty
    /// strings; those read as absent.
    pub fn decode(&self) -> ThresholdRule {
        ThresholdRule {
            metric: self.metric.clone(),
            host: presence(self.host.as_deref()),
            endpoint_group: presence(self.endpoint_group.as_deref()),
            thresholds: decode_thresholds(&self.thresholds),
        }
    }

    /// Pack an edited rule back into its wire shape.
    pub fn from_rule(rule: &ThresholdRule) -> Self {
        Self {
            metric: rule.metric.clone(),
            thresholds: encode_thresholds(&rule.thresholds),
            host: presence(rule.host.as_deref()),
            endpoint_group: presence(rule.endpoint_group.as_deref()),
        }
    }
}

/// A thresholds profile document: a named, ordered list of rule entries.
///
/// `id` is the backend's identifier for the profile; new profiles have
/// none yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdsProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub rules: Vec<ThresholdRuleEntry>,
}

impl ThresholdsProfile {
    /// Expand every entry for editing, preserving order.
    pub fn decode_rules(&self) -> Vec<ThresholdRule> {
        decode_rules(&self.rules)
    }

    /// Replace this profile's entries with a re-encoded rule list, as done
    /// on save.
    pub fn replace_rules(&mut self, rules: &[ThresholdRule]) {
        self.rules = encode_rules(rules);
    }
}

/// Decode a list of wire entries into editable rules, preserving order.
pub fn decode_rules(entries: &[ThresholdRuleEntry]) -> Vec<ThresholdRule> {
    entries.iter().map(ThresholdRuleEntry::decode).collect()
}

/// Encode an edited rule list back into wire entries, preserving order.
pub fn encode_rules(rules: &[ThresholdRule]) -> Vec<ThresholdRuleEntry> {
    rules.iter().map(ThresholdRuleEntry::from_rule).collect()
}

/// Treat empty strings as absent scope values.
fn presence(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}
