//! Goertzel filter bank for the four UIC 751-3 supervisory tones.

use crate::config::GoertzelConfig;
use crate::errors::{InitError, UicError};

/// Precomputed Goertzel coefficients for a fixed set of target
/// frequencies.
///
/// Immutable after construction; [`GoertzelBank::magnitude`] carries no
/// state between calls, so one bank can be reused across buffers freely.
#[derive(Debug, Clone)]
pub struct GoertzelBank {
    coeffs: [f64; 4],
}

impl GoertzelBank {
    /// Precomputes `c_k = 2*cos(2*pi*f_k/Fs)` for each target frequency.
    pub fn new(config: &GoertzelConfig) -> Result<Self, UicError> {
        config.validate().map_err(|e| {
            UicError::Init(InitError::ComponentFailed {
                component: "GoertzelBank",
                source: e,
            })
        })?;

        let mut coeffs = [0.0; 4];
        for (k, &freq) in config.frequencies.iter().enumerate() {
            coeffs[k] = 2.0 * (2.0 * std::f64::consts::PI * freq / config.sample_rate).cos();
        }

        Ok(Self { coeffs })
    }

    /// Computes one relative (unsquared) magnitude per target frequency
    /// for the given buffer.
    pub fn magnitude(&self, samples: &[f32], out: &mut [f64; 4]) {
        for (k, &coeff) in self.coeffs.iter().enumerate() {
            let mut reallyold;
            let mut old = 0.0_f64;
            let mut current = 0.0_f64;

            for &sample in samples {
                reallyold = old;
                old = current;
                current = sample as f64 + coeff * old - reallyold;
            }

            out[k] = (current * current + old * old - current * old * coeff).sqrt();
        }
    }
}
