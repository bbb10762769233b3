//! Correlator-based BFSK bit detector with adaptive bit timing.
//!
//! Based on the delay-and-multiply FM discriminator described in Cypress
//! Semiconductor AN2336 ("PSoC(R)1 - Simplified FSK Detection"): for a
//! sinusoid of frequency `f` sampled at `Fs`, the sign of the product of
//! `x[n]` with a delayed sample `x[n-D]` equals `sign(cos(2*pi*f*D/Fs))`.
//! Only the sign of each sample is needed, so the correlator reduces to
//! XOR-like logic on +-1 values.

use crate::config::BfskParams;
use crate::errors::{InitError, UicError};

/// Result of feeding one or more samples to [`BfskDetector::analyze`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BfskResult {
    /// The input buffer was exhausted without producing a bit.
    End,
    /// A polarity change occurred before a full bit period elapsed at
    /// the previous polarity; framing should reset.
    Invalid,
    Zero,
    One,
}

/// Sign of a sample, represented as +-1 to match the reference
/// correlator's integer arithmetic exactly (no float comparisons inside
/// the per-sample loop).
#[inline]
fn sign(sample: f32) -> i32 {
    if sample >= 0.0 {
        1
    } else {
        -1
    }
}

pub struct BfskDetector {
    params: BfskParams,
    sample_rate: f64,

    /// Ring buffer of recent sample signs, length `D`.
    prev: Vec<i32>,
    prev_idx: usize,

    /// Ring buffer of correlator outputs, length `W`.
    corr: Vec<i32>,
    corr_idx: usize,
    corr_sum: i64,

    /// `true` if `mark_hz < space_hz` (the correlator's raw sign must be
    /// inverted to match bit polarity in that case).
    invert_corr: bool,

    /// Last emitted bit polarity, or `None` before the first transition.
    previous_bit: Option<u8>,

    /// Fractional bit-period counter since the last polarity change.
    emitted_bits: f64,
}

impl BfskDetector {
    pub fn new(params: &BfskParams, sample_rate: f64) -> Result<Self, UicError> {
        params.validate(sample_rate).map_err(|e| {
            UicError::Init(InitError::ComponentFailed {
                component: "BfskDetector",
                source: e,
            })
        })?;

        // Empirically tuned for 1300/1700 Hz (spec.md SS9); approximates the
        // quarter-period at the midpoint between mark and space.
        let prev_len = (((sample_rate * 350.0 / 300_000.0).ceil() as i64 - 1).max(1)) as usize;
        // 6/8 of a bit period, in samples.
        let corr_len = (((sample_rate * 6.0) / (params.bps * 8.0)).floor() as i64).max(1) as usize;

        Ok(Self {
            params: *params,
            sample_rate,
            prev: vec![0; prev_len],
            prev_idx: 0,
            corr: vec![0; corr_len],
            corr_idx: 0,
            corr_sum: 0,
            invert_corr: params.mark_hz < params.space_hz,
            previous_bit: None,
            emitted_bits: 0.0,
        })
    }

    /// Invariant check used by tests and debug assertions: the running
    /// sum must always equal the sum of the correlator ring buffer.
    #[cfg(test)]
    fn corr_sum_matches_buffer(&self) -> bool {
        self.corr_sum == self.corr.iter().map(|&v| v as i64).sum::<i64>()
    }

    /// Consumes samples from the front of `samples`, advancing until a
    /// non-[`BfskResult::End`] result is produced or the buffer is
    /// exhausted. Returns the result together with the number of samples
    /// consumed, so the caller can re-invoke to drain the remainder.
    pub fn analyze(&mut self, samples: &[f32]) -> (BfskResult, usize) {
        for (consumed, &raw_sample) in samples.iter().enumerate() {
            let s = sign(raw_sample);

            let c_new = self.prev[self.prev_idx] * s;
            let c_old = self.corr[self.corr_idx];
            self.corr_sum += (c_new - c_old) as i64;
            self.corr[self.corr_idx] = c_new;
            self.corr_idx = (self.corr_idx + 1) % self.corr.len();

            let curr_bit: u8 = if (self.corr_sum >= 0) ^ self.invert_corr {
                1
            } else {
                0
            };

            let mut result = BfskResult::End;

            if Some(curr_bit) == self.previous_bit {
                let n0 = self.emitted_bits.floor();
                self.emitted_bits += self.params.bps / self.sample_rate;
                let n1 = self.emitted_bits.floor();

                if n1 > n0 {
                    result = if curr_bit == 0 {
                        BfskResult::Zero
                    } else {
                        BfskResult::One
                    };
                }
            } else {
                if self.emitted_bits < 1.0 {
                    result = BfskResult::Invalid;
                }
                self.previous_bit = Some(curr_bit);
                // Half a bit, to centre the next sample point mid-cell.
                self.emitted_bits = 0.5;
            }

            self.prev[self.prev_idx] = s;
            self.prev_idx = (self.prev_idx + 1) % self.prev.len();

            if result != BfskResult::End {
                return (result, consumed + 1);
            }
        }

        (BfskResult::End, samples.len())
    }
}
