//! Lint findings and the run report that carries them.
//!
//! A [`Finding`] points at one field path in one profile document; a
//! [`LintReport`] aggregates the findings of a whole run and renders
//! them either as aligned text for people or as JSON for tooling.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// How serious a finding is. Errors fail the run; warnings do not change
/// what the backend would accept but signal non-canonical content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which check produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Check {
    /// The compact thresholds string has a token the decoder degrades.
    Grammar,
    /// A decoded field fails its form-layer validation.
    Field,
    /// The stored string decodes fine but is not the canonical spelling.
    Canonical,
}

impl Check {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grammar => "grammar",
            Self::Field => "field",
            Self::Canonical => "canonical",
        }
    }
}

impl std::fmt::Display for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One problem found in one profile document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub check: Check,
    /// Path into the document, e.g. `rules[1].thresholds[0].warn2`.
    pub field: String,
    pub message: String,
}

impl Finding {
    pub fn error(check: Check, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            check,
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn warning(check: Check, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            check,
            field: field.into(),
            message: message.into(),
        }
    }
}

/// All findings for one linted file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: String,
    pub profile: String,
    pub findings: Vec<Finding>,
}

/// The outcome of a whole lint run.
#[derive(Debug, Clone, Serialize)]
pub struct LintReport {
    /// UTC timestamp of the run.
    pub checked_at: DateTime<Utc>,
    pub files: Vec<FileReport>,
}

impl LintReport {
    pub fn new(files: Vec<FileReport>) -> Self {
        Self {
            checked_at: Utc::now(),
            files,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.files.iter().all(|f| f.findings.is_empty())
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.files
            .iter()
            .flat_map(|f| &f.findings)
            .filter(|finding| finding.severity == severity)
            .count()
    }

    /// Human-readable rendering, one block per file plus a summary line.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for file in &self.files {
            out.push_str(&format!("{}: profile \"{}\"\n", file.path, file.profile));
            if file.findings.is_empty() {
                out.push_str("  no findings\n");
            }
            for finding in &file.findings {
                out.push_str(&format!(
                    "  [{}] {} {}: {}\n",
                    finding.severity, finding.check, finding.field, finding.message
                ));
            }
        }
        out.push_str(&format!(
            "errors: {}  warnings: {}  files: {}\n",
            self.error_count(),
            self.warning_count(),
            self.files.len()
        ));
        out
    }

    /// Machine-readable rendering of the whole report.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).expect("LintReport is always serialisable")
    }
}

/// Output format for a lint run, selected via `WARDEN_LINT_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl ReportFormat {
    /// Parse the environment value; `None` for anything unrecognised.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}
