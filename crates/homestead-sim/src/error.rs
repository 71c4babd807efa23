//! Error types for the headless runner.
//!
//! [`SimError`] is the top-level error type that wraps all possible
//! failure modes during startup and the tick loop.

/// Top-level error for the runner binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: homestead_core::ConfigError,
    },

    /// The settlement could not be built or advanced.
    #[error("engine error: {source}")]
    Engine {
        /// The underlying engine error.
        #[from]
        source: homestead_core::EngineError,
    },

    /// The final snapshot could not be serialized.
    #[error("snapshot error: {source}")]
    Snapshot {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}
