//! Audio source collaborator: produces interleaved mono 16-bit PCM
//! samples from stdin or from a WAV file, at a caller-declared rate.

use std::io::{self, Read};
use std::path::Path;

use color_eyre::eyre::{eyre, Result};

/// Reads fixed-size chunks of signed 16-bit PCM, little-endian, mono.
pub trait AudioSource {
    /// Fills `buffer` with up to `buffer.len()` samples, returning the
    /// number actually read. `0` means end of stream.
    fn read_chunk(&mut self, buffer: &mut [i16]) -> Result<usize>;
}

/// Reads raw PCM directly from stdin, the default source (pipe-friendly,
/// no file argument required).
pub struct StdinSource {
    stdin: io::Stdin,
}

impl StdinSource {
    pub fn new() -> Self {
        Self { stdin: io::stdin() }
    }
}

impl Default for StdinSource {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioSource for StdinSource {
    fn read_chunk(&mut self, buffer: &mut [i16]) -> Result<usize> {
        let mut raw = vec![0u8; buffer.len() * 2];
        let mut filled = 0;
        let mut lock = self.stdin.lock();
        loop {
            match lock.read(&mut raw[filled..])? {
                0 => break,
                n => {
                    filled += n;
                    if filled == raw.len() {
                        break;
                    }
                }
            }
        }
        let samples = filled / 2;
        for i in 0..samples {
            buffer[i] = i16::from_le_bytes([raw[i * 2], raw[i * 2 + 1]]);
        }
        Ok(samples)
    }
}

/// Reads mono 16-bit PCM from a WAV file via `hound`.
pub struct WavSource {
    reader: hound::WavReader<std::io::BufReader<std::fs::File>>,
}

impl WavSource {
    pub fn open(path: &Path) -> Result<Self> {
        let reader = hound::WavReader::open(path)
            .map_err(|e| eyre!("failed to open WAV file {}: {e}", path.display()))?;
        let spec = reader.spec();
        if spec.channels != 1 {
            return Err(eyre!(
                "WAV file {} has {} channels; only mono is supported",
                path.display(),
                spec.channels
            ));
        }
        if spec.bits_per_sample != 16 {
            return Err(eyre!(
                "WAV file {} uses {}-bit samples; only 16-bit PCM is supported",
                path.display(),
                spec.bits_per_sample
            ));
        }
        Ok(Self { reader })
    }

    pub fn sample_rate(&self) -> u32 {
        self.reader.spec().sample_rate
    }
}

impl AudioSource for WavSource {
    fn read_chunk(&mut self, buffer: &mut [i16]) -> Result<usize> {
        let mut samples = self.reader.samples::<i16>();
        let mut n = 0;
        for slot in buffer.iter_mut() {
            match samples.next() {
                Some(Ok(sample)) => {
                    *slot = sample;
                    n += 1;
                }
                Some(Err(e)) => return Err(eyre!("WAV read error: {e}")),
                None => break,
            }
        }
        Ok(n)
    }
}
