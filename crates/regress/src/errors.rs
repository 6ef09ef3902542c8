//! Error types for the orchestrator.

use manifold_kernel::EngineError;

/// A scope override that cannot be applied. Always detected before any
/// setting is mutated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown setting: {name}")]
    UnknownSetting { name: String },

    #[error("setting {setting} does not accept {value}")]
    WrongValue { setting: String, value: String },

    #[error("accuracy must be at least one significant digit")]
    ZeroAccuracy,

    #[error("field conversion '{backend}' requested but the algebra backend is not active")]
    BackendUnavailable { backend: String },

    #[error("setting {setting} overridden more than once in one scope")]
    DuplicateOverride { setting: String },
}

/// Unified error type for a regression run.
///
/// Everything here aborts the run; example mismatches are never errors.
#[derive(Debug, thiserror::Error)]
pub enum RegressError {
    #[error("configuration error in {provider}: {source}")]
    Config {
        provider: String,
        #[source]
        source: ConfigError,
    },

    #[error("duplicate provider: {name}")]
    DuplicateProvider { name: String },

    /// Returned by a self-reporting provider that could not finish its own
    /// run. The orchestrator aborts the run with it.
    #[error("provider {provider} crashed: {message}")]
    ProviderCrash { provider: String, message: String },

    #[error("render failed: {reason}")]
    Render { reason: String },

    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("console error: {0}")]
    Io(#[from] std::io::Error),
}

impl RegressError {
    pub(crate) fn config(provider: &str, source: ConfigError) -> Self {
        Self::Config {
            provider: provider.to_string(),
            source,
        }
    }
}
