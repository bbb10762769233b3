mod audio_source;
mod logging;
mod output;

use std::path::PathBuf;

use clap::Parser;

use audio_source::{AudioSource, StdinSource, WavSource};
use logging::{LogFormat, StructuredLogger};
use uic751_core::config::{BfskParams, CoordinatorConfig, DEFAULT_SAMPLE_RATE_HZ, RECOMMENDED_MIN_SAMPLE_RATE_HZ};
use uic751_core::{int16_to_float, ConfigError, Event, LogConfig, UicDemodulator};

/// UIC 751-3 ground-to-train telegram demodulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "UIC 751-3 telegram demodulator", long_about = None)]
struct Cli {
    /// Audio sample rate, in Hz.
    #[arg(short = 'r', long = "rate", default_value_t = DEFAULT_SAMPLE_RATE_HZ)]
    rate: f64,

    /// Buffer length, in milliseconds.
    #[arg(short = 'b', long = "buffer-ms", default_value_t = 20.0)]
    buffer_ms: f64,

    /// Minimum normalised tone magnitude to declare a tone present.
    #[arg(short = 'c', long = "certainty", default_value_t = CoordinatorConfig::default().tone_certainty)]
    certainty: f64,

    /// Consecutive buffers required before announcing a tone transition.
    #[arg(short = 't', long = "ticks", default_value_t = CoordinatorConfig::default().required_ticks)]
    ticks: u32,

    /// Print each completed telegram's raw 39-bit payload.
    #[arg(short = 'u', long = "raw")]
    raw: bool,

    /// Suppress telegrams that fail CRC (INTEGRITY).
    #[arg(short = 'd', long = "hide-damaged")]
    hide_damaged: bool,

    /// Audio source: "-"/"stdin" for raw PCM on stdin (default), or a
    /// path to a mono 16-bit WAV file.
    #[arg(short = 's', long = "source")]
    source: Option<String>,

    /// Diagnostic log format (stderr only; stdout carries protocol output).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    log_format: LogFormat,
}

fn main() {
    color_eyre::install().ok();
    let cli = Cli::parse();
    std::process::exit(run(cli));
}

fn run(cli: Cli) -> i32 {
    let mut logger = StructuredLogger::new(cli.log_format);

    let bfsk_params = BfskParams::default();
    let coordinator_config = CoordinatorConfig {
        tone_certainty: cli.certainty,
        required_ticks: cli.ticks,
    };

    if let Err(e) = coordinator_config.validate() {
        logger.error(format!("invalid configuration: {e}")).ok();
        return 1;
    }
    if cli.rate <= 0.0 {
        logger.error(format!("invalid sample rate: {}", cli.rate)).ok();
        return 1;
    }
    if !(cli.buffer_ms > 0.0) {
        logger.error(format!("invalid buffer length: {} ms", cli.buffer_ms)).ok();
        return 1;
    }
    if cli.rate < RECOMMENDED_MIN_SAMPLE_RATE_HZ {
        let warning = ConfigError::LowSampleRate {
            rate: cli.rate,
            min: RECOMMENDED_MIN_SAMPLE_RATE_HZ,
        };
        logger.warn(warning.to_string()).ok();
    }

    let mut source: Box<dyn AudioSource> = match cli.source.as_deref() {
        None | Some("-") | Some("stdin") => Box::new(StdinSource::new()),
        Some(path) => match WavSource::open(&PathBuf::from(path)) {
            Ok(wav) => {
                if (wav.sample_rate() as f64 - cli.rate).abs() > f64::EPSILON {
                    logger
                        .warn(format!(
                            "WAV file sample rate ({} Hz) overrides --rate ({} Hz)",
                            wav.sample_rate(),
                            cli.rate
                        ))
                        .ok();
                }
                Box::new(wav)
            }
            Err(e) => {
                logger.error(format!("{e}")).ok();
                return 3;
            }
        },
    };

    let mut demod = match UicDemodulator::with_params(
        cli.rate,
        bfsk_params,
        coordinator_config,
        LogConfig::default(),
    ) {
        Ok(d) => d,
        Err(e) => {
            logger.error(format!("initialisation failed: {e}")).ok();
            return 2;
        }
    };

    let sample_count = ((cli.buffer_ms * cli.rate) / 1000.0).ceil() as usize;
    let mut raw_buffer = vec![0i16; sample_count.max(1)];

    logger
        .info(format!(
            "listening at {} Hz, {} samples/buffer",
            cli.rate, sample_count
        ))
        .ok();

    loop {
        let read = match source.read_chunk(&mut raw_buffer) {
            Ok(n) => n,
            Err(e) => {
                logger.error(format!("read failure: {e}")).ok();
                return 3;
            }
        };
        if read == 0 {
            logger.info("end of stream").ok();
            return 0;
        }

        let samples = int16_to_float(&raw_buffer[..read]);

        demod.analyze_begin();
        loop {
            match demod.analyze(&samples) {
                Event::None => break,
                Event::Packet => {
                    output::print_packet(demod.telegram(), cli.hide_damaged, cli.raw);
                }
                event => {
                    output::print_event(event);
                }
            }
        }
    }
}
