//! Configuration types for the Goertzel bank, BFSK detector and event
//! coordinator.
//!
//! These are plain, serde-serializable value types so that library
//! embedders can persist a calibration profile; the CLI maps its flags
//! onto them directly rather than reading them from a file (see
//! `SPEC_FULL.md` §9).

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// The four in-band supervisory tones, in the fixed order the Goertzel
/// bank and the coordinator's tone classification both rely on.
pub const TONE_FREQUENCIES_HZ: [f64; 4] = [1520.0, 1960.0, 2280.0, 2800.0];

/// Recommended minimum sample rate; below this the caller should warn
/// but may still proceed (`spec.md` §6).
pub const RECOMMENDED_MIN_SAMPLE_RATE_HZ: f64 = 11_800.0;

/// Default sample rate for the CLI's audio source.
pub const DEFAULT_SAMPLE_RATE_HZ: f64 = 44_100.0;

/// Configuration for [`crate::goertzel::GoertzelBank`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoertzelConfig {
    pub frequencies: [f64; 4],
    pub sample_rate: f64,
}

impl GoertzelConfig {
    pub fn new(sample_rate: f64) -> Self {
        Self {
            frequencies: TONE_FREQUENCIES_HZ,
            sample_rate,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.sample_rate > 0.0) {
            return Err(ConfigError::InvalidSampleRate { rate: self.sample_rate });
        }
        Ok(())
    }
}

/// Configuration for [`crate::bfsk::BfskDetector`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BfskParams {
    pub bps: f64,
    pub mark_hz: f64,
    pub space_hz: f64,
}

impl Default for BfskParams {
    fn default() -> Self {
        Self {
            bps: 600.0,
            mark_hz: 1300.0,
            space_hz: 1700.0,
        }
    }
}

impl BfskParams {
    pub fn validate(&self, sample_rate: f64) -> Result<(), ConfigError> {
        if !(sample_rate > 0.0) {
            return Err(ConfigError::InvalidSampleRate { rate: sample_rate });
        }
        if !(self.bps > 0.0) {
            return Err(ConfigError::InvalidBitRate { bps: self.bps });
        }
        if self.mark_hz == self.space_hz {
            return Err(ConfigError::InvalidFskFrequencies {
                mark_hz: self.mark_hz,
                space_hz: self.space_hz,
            });
        }
        Ok(())
    }
}

/// Configuration for [`crate::coordinator::UicDemodulator`] tone
/// debounce behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// Minimum normalised Goertzel magnitude for a tone to be considered
    /// present, in `[0, 1]`.
    pub tone_certainty: f64,
    /// Number of consecutive buffers classified identically before a
    /// tone transition is announced.
    pub required_ticks: u32,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            tone_certainty: 0.75,
            required_ticks: 3,
        }
    }
}

impl CoordinatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.tone_certainty) {
            return Err(ConfigError::InvalidToneCertainty {
                certainty: self.tone_certainty,
            });
        }
        if self.required_ticks == 0 {
            return Err(ConfigError::InvalidRequiredTicks {
                ticks: self.required_ticks,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goertzel_config_rejects_nonpositive_sample_rate() {
        assert!(GoertzelConfig::new(0.0).validate().is_err());
        assert!(GoertzelConfig::new(-44100.0).validate().is_err());
        assert!(GoertzelConfig::new(44100.0).validate().is_ok());
    }

    #[test]
    fn bfsk_params_rejects_colliding_frequencies() {
        let params = BfskParams {
            bps: 600.0,
            mark_hz: 1300.0,
            space_hz: 1300.0,
        };
        assert_eq!(
            params.validate(16000.0),
            Err(ConfigError::InvalidFskFrequencies {
                mark_hz: 1300.0,
                space_hz: 1300.0
            })
        );
    }

    #[test]
    fn bfsk_params_rejects_nonpositive_bps() {
        let params = BfskParams {
            bps: 0.0,
            ..Default::default()
        };
        assert!(params.validate(16000.0).is_err());
    }

    #[test]
    fn coordinator_config_rejects_out_of_range_certainty() {
        let config = CoordinatorConfig {
            tone_certainty: 1.5,
            required_ticks: 3,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn coordinator_config_rejects_zero_ticks() {
        let config = CoordinatorConfig {
            tone_certainty: 0.75,
            required_ticks: 0,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn defaults_are_valid() {
        assert!(BfskParams::default().validate(16000.0).is_ok());
        assert!(CoordinatorConfig::default().validate().is_ok());
    }
}
