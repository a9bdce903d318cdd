//! Errors that stop a lint run before any checking happens.

#[derive(Debug, thiserror::Error)]
pub enum LintError {
    #[error("Cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a thresholds profile document ({path}): {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
