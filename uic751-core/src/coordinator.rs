//! Event coordinator: multiplexes the Goertzel bank and BFSK/telegram
//! pipeline into a single stream of typed events, with tone debounce
//! and SILENCE-before-PACKET ordering.

use crate::bfsk::{BfskDetector, BfskResult};
use crate::config::{BfskParams, CoordinatorConfig, GoertzelConfig};
use crate::errors::{InitError, UicError};
use crate::goertzel::GoertzelBank;
use crate::logging::{LogConfig, SignalLogger};
use crate::sample::signal_power;
use crate::telegram::Telegram;

/// Tone/packet classification, wire-independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The current buffer produced nothing further; stop calling
    /// [`UicDemodulator::analyze`] until the next buffer.
    None,
    Warning,
    Listening,
    Chfree,
    Pilot,
    Silence,
    Packet,
}

impl Event {
    fn from_tone_class(class: u8) -> Self {
        match class {
            0 => Event::Warning,
            1 => Event::Listening,
            2 => Event::Chfree,
            3 => Event::Pilot,
            _ => Event::Silence,
        }
    }
}

/// "No tone present" sentinel for `current_signal`/`last_signal`.
const NO_TONE: u8 = 4;

/// Owns one Goertzel bank, one BFSK detector and one telegram framer,
/// and drives them per buffer.
pub struct UicDemodulator {
    goertzel: GoertzelBank,
    bfsk: BfskDetector,
    telegram: Telegram,

    tone_certainty: f64,
    required_ticks: u32,

    last_signal: Option<u8>,
    current_signal: u8,
    current_signal_ticks: u32,

    ran_goertzel: bool,
    cursor: usize,
    deferred_packet: bool,

    logger: SignalLogger,
}

impl UicDemodulator {
    /// Builds a demodulator with default BFSK/coordinator parameters and
    /// `Info`-level logging.
    pub fn new(sample_rate: f64) -> Result<Self, UicError> {
        Self::with_params(
            sample_rate,
            BfskParams::default(),
            CoordinatorConfig::default(),
            LogConfig::default(),
        )
    }

    pub fn with_params(
        sample_rate: f64,
        bfsk_params: BfskParams,
        coordinator: CoordinatorConfig,
        log_config: LogConfig,
    ) -> Result<Self, UicError> {
        coordinator.validate().map_err(|e| {
            UicError::Init(InitError::ComponentFailed {
                component: "UicDemodulator",
                source: e,
            })
        })?;

        let goertzel = GoertzelBank::new(&GoertzelConfig::new(sample_rate))?;
        let bfsk = BfskDetector::new(&bfsk_params, sample_rate)?;

        Ok(Self {
            goertzel,
            bfsk,
            telegram: Telegram::new(),
            tone_certainty: coordinator.tone_certainty,
            required_ticks: coordinator.required_ticks,
            last_signal: None,
            current_signal: NO_TONE,
            current_signal_ticks: 0,
            ran_goertzel: false,
            cursor: 0,
            deferred_packet: false,
            logger: SignalLogger::new(log_config),
        })
    }

    pub fn set_tone_certainty(&mut self, certainty: f64) -> Result<(), UicError> {
        let candidate = CoordinatorConfig {
            tone_certainty: certainty,
            required_ticks: self.required_ticks,
        };
        candidate.validate().map_err(UicError::Config)?;
        self.tone_certainty = certainty;
        Ok(())
    }

    pub fn set_required_ticks(&mut self, ticks: u32) -> Result<(), UicError> {
        let candidate = CoordinatorConfig {
            tone_certainty: self.tone_certainty,
            required_ticks: ticks,
        };
        candidate.validate().map_err(UicError::Config)?;
        self.required_ticks = ticks;
        Ok(())
    }

    /// The telegram parsed by the most recent `Packet` event, valid until
    /// the next mutating call.
    pub fn telegram(&self) -> &Telegram {
        &self.telegram
    }

    pub fn logger(&self) -> &SignalLogger {
        &self.logger
    }

    pub fn logger_mut(&mut self) -> &mut SignalLogger {
        &mut self.logger
    }

    /// Clears per-buffer scratch state; call once before the `analyze`
    /// loop for a new buffer.
    pub fn analyze_begin(&mut self) {
        self.ran_goertzel = false;
        self.cursor = 0;
    }

    /// Processes `samples` incrementally, returning one event per call.
    /// Call in a loop, passing the *same* buffer each time, until it
    /// returns [`Event::None`].
    pub fn analyze(&mut self, samples: &[f32]) -> Event {
        if self.deferred_packet {
            self.deferred_packet = false;
            self.logger.info("EVENT", "PACKET (deferred from prior SILENCE)");
            return Event::Packet;
        }

        if !self.ran_goertzel {
            self.ran_goertzel = true;
            if let Some(event) = self.classify_tone(samples) {
                return event;
            }
        }

        self.drive_bit_detector(samples)
    }

    /// Runs the Goertzel bank once for this buffer, updates the debounce
    /// counters, and returns an event if a transition just crossed the
    /// `required_ticks` threshold.
    fn classify_tone(&mut self, samples: &[f32]) -> Option<Event> {
        let mut magnitudes = [0.0_f64; 4];
        self.goertzel.magnitude(samples, &mut magnitudes);
        let power = signal_power(samples);

        let new_signal = if power > 0.0 {
            let mut best = NO_TONE;
            let mut best_norm = self.tone_certainty;
            for (k, &fmag) in magnitudes.iter().enumerate() {
                let norm = fmag / power;
                if norm > best_norm {
                    best = k as u8;
                    best_norm = norm;
                }
            }
            best
        } else {
            NO_TONE
        };

        if new_signal == self.current_signal {
            self.current_signal_ticks += 1;
        } else {
            self.current_signal = new_signal;
            self.current_signal_ticks = 1;
        }

        if self.current_signal_ticks == self.required_ticks
            && Some(self.current_signal) != self.last_signal
        {
            self.last_signal = Some(self.current_signal);
            let event = Event::from_tone_class(self.current_signal);
            self.logger
                .info("TONE", format!("class {} -> {:?}", self.current_signal, event));
            return Some(event);
        }

        None
    }

    /// Drives the BFSK detector and telegram framer across the
    /// unconsumed tail of `samples`, returning the first event produced
    /// or `None` once the buffer is exhausted.
    fn drive_bit_detector(&mut self, samples: &[f32]) -> Event {
        loop {
            let remaining = &samples[self.cursor..];
            if remaining.is_empty() {
                return Event::None;
            }

            let (result, consumed) = self.bfsk.analyze(remaining);
            self.cursor += consumed;

            match result {
                BfskResult::End => return Event::None,
                BfskResult::Invalid => {
                    self.telegram.reset();
                    self.logger.debug("BFSK", "INVALID, telegram reset");
                }
                BfskResult::Zero | BfskResult::One => {
                    let bit = (result == BfskResult::One) as u8;
                    let status = self.telegram.feed(bit);
                    if status.is_done() {
                        self.logger
                            .info("TELEGRAM", format!("frame complete: {status:?}"));

                        if self.last_signal != Some(NO_TONE) {
                            self.last_signal = Some(NO_TONE);
                            self.current_signal = NO_TONE;
                            self.current_signal_ticks = 1;
                            self.deferred_packet = true;
                            self.logger
                                .info("EVENT", "SILENCE synthesised before PACKET");
                            return Event::Silence;
                        }

                        return Event::Packet;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TONE_FREQUENCIES_HZ;
    use std::f64::consts::TAU;

    const SAMPLE_RATE: f64 = 16_000.0;

    fn tone(freq_hz: f64, n: usize) -> Vec<f32> {
        (0..n)
            .map(|i| (TAU * freq_hz * i as f64 / SAMPLE_RATE).sin() as f32)
            .collect()
    }

    fn run_buffer(demod: &mut UicDemodulator, samples: &[f32]) -> Vec<Event> {
        demod.analyze_begin();
        let mut events = Vec::new();
        loop {
            let event = demod.analyze(samples);
            if event == Event::None {
                break;
            }
            events.push(event);
        }
        events
    }

    #[test]
    fn tone_debounce_emits_exactly_once_at_threshold() {
        let mut demod = UicDemodulator::new(SAMPLE_RATE).unwrap();
        let buffer = tone(TONE_FREQUENCIES_HZ[0], 800);

        assert!(run_buffer(&mut demod, &buffer).is_empty());
        assert!(run_buffer(&mut demod, &buffer).is_empty());
        assert_eq!(run_buffer(&mut demod, &buffer), vec![Event::Warning]);
        assert!(run_buffer(&mut demod, &buffer).is_empty());
    }

    #[test]
    fn required_ticks_one_emits_on_first_observation() {
        let mut demod = UicDemodulator::new(SAMPLE_RATE).unwrap();
        demod.set_required_ticks(1).unwrap();
        let buffer = tone(TONE_FREQUENCIES_HZ[2], 800);
        assert_eq!(run_buffer(&mut demod, &buffer), vec![Event::Chfree]);
    }

    #[test]
    fn single_tone_buffer_then_short_runs_of_silence_never_emit() {
        let mut demod = UicDemodulator::new(SAMPLE_RATE).unwrap();
        let tone_buf = tone(TONE_FREQUENCIES_HZ[1], 800);
        let silence_buf = vec![0.0_f32; 800];

        assert!(run_buffer(&mut demod, &tone_buf).is_empty());
        // required_ticks - 1 = 2 silence buffers: debounce resets on the
        // very first one, so neither of these two may emit.
        assert!(run_buffer(&mut demod, &silence_buf).is_empty());
        assert!(run_buffer(&mut demod, &silence_buf).is_empty());
    }

    #[test]
    fn settings_survive_analyze_begin() {
        let mut demod = UicDemodulator::new(SAMPLE_RATE).unwrap();
        demod.set_tone_certainty(0.5).unwrap();
        demod.set_required_ticks(5).unwrap();
        demod.analyze_begin();
        assert_eq!(demod.required_ticks, 5);
        assert_eq!(demod.tone_certainty, 0.5);
    }

    #[test]
    fn rejects_invalid_certainty() {
        let mut demod = UicDemodulator::new(SAMPLE_RATE).unwrap();
        assert!(demod.set_tone_certainty(1.5).is_err());
    }
}
