//! `warden-lint` -- thresholds profile linter.
//!
//! Reads thresholds profile documents (JSON), checks every rule's compact
//! thresholds string for grammar defects, non-canonical spellings and
//! field-level validation errors, and prints a report.
//!
//! # Environment variables
//!
//! | Variable             | Required | Default | Description                    |
//! |----------------------|----------|---------|--------------------------------|
//! | `WARDEN_LINT_FORMAT` | no       | `text`  | Report format: `text` or `json` |
//!
//! # Exit codes
//!
//! * `0` -- no errors (canonical-form warnings may still be reported)
//! * `1` -- at least one error-severity finding
//! * `2` -- unusable invocation or unreadable/unparseable input file

use std::path::Path;

use warden_lint::checker;
use warden_lint::report::{LintReport, ReportFormat};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable selecting the report format.
const FORMAT_ENV: &str = "WARDEN_LINT_FORMAT";

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warden_lint=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        tracing::error!("No input files; usage: warden-lint <profile.json> [...]");
        std::process::exit(2);
    }

    let format = match std::env::var(FORMAT_ENV) {
        Ok(raw) => ReportFormat::parse(&raw).unwrap_or_else(|| {
            tracing::error!(value = %raw, "WARDEN_LINT_FORMAT must be `text` or `json`");
            std::process::exit(2);
        }),
        Err(_) => ReportFormat::default(),
    };

    let mut files = Vec::with_capacity(paths.len());
    for path in &paths {
        match checker::check_file(Path::new(path)) {
            Ok(file) => {
                tracing::info!(
                    path = %file.path,
                    profile = %file.profile,
                    findings = file.findings.len(),
                    "Checked profile",
                );
                files.push(file);
            }
            Err(e) => {
                tracing::error!(error = %e, "Lint run aborted");
                std::process::exit(2);
            }
        }
    }

    let report = LintReport::new(files);
    match format {
        ReportFormat::Text => print!("{}", report.render_text()),
        ReportFormat::Json => println!("{}", report.to_json()),
    }

    if report.error_count() > 0 {
        std::process::exit(1);
    }
}
