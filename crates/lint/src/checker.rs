//! The checks a lint run applies to a thresholds profile document.
//!
//! Three passes per rule entry, all built on `warden-core`:
//!
//! 1. **grammar** -- strict-decode the compact string and report tokens
//!    the lenient decoder would silently degrade to label-only clauses;
//! 2. **canonical** -- re-encode what was decoded and warn when the
//!    stored spelling differs (zero-floor shorthand, stray segments);
//! 3. **field** -- run the form-layer validation the editor applies at
//!    submit time, so defects are caught before anyone opens the form.

use std::fs;
use std::path::Path;

use warden_core::codec::{decode_thresholds_strict, encode_thresholds};
use warden_core::profile::ThresholdsProfile;
use warden_core::validation::validate_rules;

use crate::error::LintError;
use crate::report::{Check, FileReport, Finding};

/// Read and parse one profile document.
pub fn load_profile(path: &Path) -> Result<ThresholdsProfile, LintError> {
    let raw = fs::read_to_string(path).map_err(|source| LintError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| LintError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Run every check against one parsed profile.
pub fn check_profile(profile: &ThresholdsProfile) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (i, entry) in profile.rules.iter().enumerate() {
        let field = format!("rules[{i}].thresholds");
        match decode_thresholds_strict(&entry.thresholds) {
            Ok(decoded) => {
                let canonical = encode_thresholds(&decoded);
                if canonical != entry.thresholds {
                    findings.push(Finding::warning(
                        Check::Canonical,
                        field,
                        format!(
                            "stored as `{}` but re-encodes as `{canonical}`",
                            entry.thresholds
                        ),
                    ));
                }
            }
            Err(err) => {
                findings.push(Finding::error(Check::Grammar, field, err.to_string()));
            }
        }
    }

    for violation in validate_rules(&profile.decode_rules()) {
        findings.push(Finding::error(Check::Field, violation.field, violation.message));
    }

    findings
}

/// Load and check one file, producing its slice of the run report.
pub fn check_file(path: &Path) -> Result<FileReport, LintError> {
    let profile = load_profile(path)?;
    let findings = check_profile(&profile);
    Ok(FileReport {
        path: path.display().to_string(),
        profile: profile.name,
        findings,
    })
}
