//! Sample conversion and normalisation helpers.

/// Converts signed 16-bit PCM samples to the float domain used
/// throughout the pipeline.
///
/// The `+0.5` bias compensates the asymmetry of two's complement
/// (`i16::MIN` is `-32768` but `i16::MAX` is only `32767`) and is part
/// of the contract: callers must not "fix" it away.
pub fn int16_to_float(samples: &[i16]) -> Vec<f32> {
    samples.iter().map(|&s| s as f32 / 32768.0 + 0.5).collect()
}

/// Sum of absolute sample values, used by the coordinator to normalise
/// Goertzel magnitudes into the `[0, 1]` certainty domain.
pub fn signal_power(samples: &[f32]) -> f64 {
    samples.iter().map(|&s| (s as f64).abs()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int16_conversion_matches_contract() {
        let floats = int16_to_float(&[-32768, 0, 32767]);
        assert!((floats[0] - (-0.5)).abs() < 1e-6);
        assert!((floats[1] - 0.5).abs() < 1e-6);
        assert!((floats[2] - 1.499_969_5).abs() < 1e-4);
    }

    #[test]
    fn signal_power_sums_absolute_values() {
        let power = signal_power(&[-0.5, 0.25, -0.25]);
        assert!((power - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_input_yields_empty_or_zero() {
        assert!(int16_to_float(&[]).is_empty());
        assert_eq!(signal_power(&[]), 0.0);
    }
}
