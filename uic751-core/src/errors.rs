//! UIC 751-3 demodulator error types.

use thiserror::Error;

/// Top-level error type for all `uic751-core` operations.
#[derive(Debug, Error)]
pub enum UicError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("initialization error: {0}")]
    Init(#[from] InitError),
}

/// Invalid or out-of-range configuration value, reported before any
/// sample is processed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid sample rate: {rate} Hz (must be > 0)")]
    InvalidSampleRate { rate: f64 },

    #[error("sample rate {rate} Hz is below the recommended minimum of {min} Hz")]
    LowSampleRate { rate: f64, min: f64 },

    #[error("invalid bit rate: {bps} bps (must be > 0)")]
    InvalidBitRate { bps: f64 },

    #[error("FSK mark/space frequencies collide: mark={mark_hz} Hz, space={space_hz} Hz")]
    InvalidFskFrequencies { mark_hz: f64, space_hz: f64 },

    #[error("invalid tone certainty: {certainty} (must be in [0, 1])")]
    InvalidToneCertainty { certainty: f64 },

    #[error("invalid required ticks: {ticks} (must be >= 1)")]
    InvalidRequiredTicks { ticks: u32 },
}

/// Failure constructing a demodulator subcomponent.
///
/// All of `uic751-core`'s components are plain owned Rust values, so
/// construction failure never leaves partially-acquired resources
/// behind to clean up; the variant exists to carry the originating
/// `ConfigError` to the caller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InitError {
    #[error("failed to initialize {component}: {source}")]
    ComponentFailed {
        component: &'static str,
        #[source]
        source: ConfigError,
    },
}

/// Result type alias for `uic751-core` operations.
pub type Result<T> = std::result::Result<T, UicError>;
