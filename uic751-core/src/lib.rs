//! Signal-processing and protocol pipeline for the UIC 751-3
//! ground-to-train signalling channel: Goertzel tone classification,
//! correlator-based BFSK demodulation, 51-bit telegram framing, and an
//! event coordinator tying them together.

pub mod bfsk;
pub mod config;
pub mod coordinator;
pub mod errors;
pub mod goertzel;
pub mod logging;
pub mod sample;
pub mod telegram;

pub use bfsk::{BfskDetector, BfskResult};
pub use config::{BfskParams, CoordinatorConfig, GoertzelConfig};
pub use coordinator::{Event, UicDemodulator};
pub use errors::{ConfigError, InitError, Result, UicError};
pub use goertzel::GoertzelBank;
pub use logging::{LogConfig, LogLevel, SignalLogger};
pub use sample::{int16_to_float, signal_power};
pub use telegram::{Telegram, TelegramStatus};
