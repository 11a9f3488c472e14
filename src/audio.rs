use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};
use thiserror::Error;

const SAMPLE_RATE: u32 = 44_100;
const TONE_HZ: f32 = 880.0;
const PULSE_PERIOD_SECS: f32 = 0.2;
const PULSE_DECAY_SECS: f32 = 0.1;
const GAIN: f32 = 0.4;

#[derive(Debug, Error)]
pub enum ChimeError {
    #[error("audio output device unavailable: {0}")]
    Device(#[from] rodio::StreamError),
    #[error("audio playback failed: {0}")]
    Playback(#[from] rodio::PlayError),
}

/// Repeating short beep used by both the completed countdown and the ringing
/// alarm. The output device is opened lazily on the first ring, never during
/// startup, and is fully released again on `stop` and on drop. Callers treat
/// a `ChimeError` as "continue without sound".
pub struct Chime {
    output: Option<(OutputStream, OutputStreamHandle)>,
    sink: Option<Sink>,
}

impl Default for Chime {
    fn default() -> Self {
        Self::new()
    }
}

impl Chime {
    pub fn new() -> Self {
        Self {
            output: None,
            sink: None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.sink.is_some()
    }

    /// Starts the repeating pulse; no-op while already playing.
    pub fn play(&mut self) -> Result<(), ChimeError> {
        if self.sink.is_some() {
            return Ok(());
        }
        if self.output.is_none() {
            self.output = Some(OutputStream::try_default()?);
        }
        let Some((_, handle)) = self.output.as_ref() else {
            return Ok(());
        };
        let sink = Sink::try_new(handle)?;
        let pulse = SamplesBuffer::new(1, SAMPLE_RATE, pulse_samples());
        sink.append(pulse.repeat_infinite());
        self.sink = Some(sink);
        Ok(())
    }

    /// Silences the chime and releases the output device.
    pub fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.output = None;
    }
}

impl Drop for Chime {
    fn drop(&mut self) {
        self.stop();
    }
}

/// One 200 ms pulse period: a sine burst decaying to near-silence over the
/// first 100 ms, then silence for the rest of the period.
fn pulse_samples() -> Vec<f32> {
    let total = (SAMPLE_RATE as f32 * PULSE_PERIOD_SECS) as usize;
    let mut samples = Vec::with_capacity(total);
    for i in 0..total {
        let t = i as f32 / SAMPLE_RATE as f32;
        let envelope = if t < PULSE_DECAY_SECS {
            1.0 - t / PULSE_DECAY_SECS
        } else {
            0.0
        };
        samples.push((t * TONE_HZ * 2.0 * std::f32::consts::PI).sin() * envelope * GAIN);
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulse_covers_one_full_period() {
        let samples = pulse_samples();
        assert_eq!(samples.len(), (SAMPLE_RATE as f32 * PULSE_PERIOD_SECS) as usize);
    }

    #[test]
    fn pulse_decays_to_silence_within_the_period() {
        let samples = pulse_samples();
        let decay_end = (SAMPLE_RATE as f32 * PULSE_DECAY_SECS) as usize;

        let early_peak = samples[..decay_end / 4]
            .iter()
            .fold(0.0_f32, |acc, s| acc.max(s.abs()));
        assert!(early_peak > 0.2);

        for sample in &samples[decay_end..] {
            assert!(sample.abs() < 1e-6);
        }
    }

    #[test]
    fn new_chime_is_silent_and_holds_no_device() {
        let chime = Chime::new();
        assert!(!chime.is_playing());
    }
}
