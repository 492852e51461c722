//! Domain error types.
//!
//! Only the loading boundary (records, config, preferences) can fail. The
//! calculator itself is total and never produces one of these.

/// Top-level error type for elitekpi.
#[derive(Debug, thiserror::Error)]
pub enum KpiError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("failed to load {file} line {line}: {reason}")]
    RecordLoad {
        file: String,
        line: u64,
        reason: String,
    },

    #[error("unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("preferences store error: {reason}")]
    PreferencesStore { reason: String },

    #[error("report render error: {reason}")]
    Render { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&KpiError> for std::process::ExitCode {
    fn from(err: &KpiError) -> Self {
        let code: u8 = match err {
            KpiError::Io(_) | KpiError::Render { .. } => 1,
            KpiError::ConfigParse { .. }
            | KpiError::ConfigMissing { .. }
            | KpiError::ConfigInvalid { .. } => 2,
            KpiError::RecordLoad { .. } | KpiError::UnknownVariant { .. } => 3,
            KpiError::PreferencesStore { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
