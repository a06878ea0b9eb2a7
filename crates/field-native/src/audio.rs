//! Microphone input via cpal, reduced to a rolling mono window the field can read.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Samples handed to the field each frame, matching the browser analyser.
pub const WINDOW_SAMPLES: usize = 1024;

/// Latest `capacity` mono samples from the input callback.
pub struct AmplitudeTap {
    samples: VecDeque<f32>,
    capacity: usize,
}

impl AmplitudeTap {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append interleaved frames, keeping the first channel.
    pub fn push_interleaved(&mut self, data: &[f32], channels: usize) {
        if self.capacity == 0 {
            return;
        }
        for frame in data.chunks(channels.max(1)) {
            if self.samples.len() == self.capacity {
                self.samples.pop_front();
            }
            self.samples.push_back(frame[0]);
        }
    }

    /// Copy a full window into `out`. Returns false until enough samples arrived.
    pub fn snapshot(&self, out: &mut Vec<f32>) -> bool {
        if self.capacity == 0 || self.samples.len() < self.capacity {
            return false;
        }
        out.clear();
        out.extend(self.samples.iter().copied());
        true
    }
}

pub type SharedTap = Arc<Mutex<AmplitudeTap>>;

/// Open the default input device. `None` when there is no usable microphone.
pub fn start_input(tap: SharedTap) -> Option<cpal::Stream> {
    let host = cpal::default_host();
    let Some(device) = host.default_input_device() else {
        log::warn!("no audio input device");
        return None;
    };
    let config = match device.default_input_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("audio input config: {e}");
            return None;
        }
    };
    let channels = config.channels() as usize;
    let err_fn = |err| log::error!("audio stream error: {err}");

    let stream = match config.sample_format() {
        cpal::SampleFormat::F32 => device.build_input_stream(
            &config.into(),
            move |data: &[f32], _| {
                if let Ok(mut tap) = tap.lock() {
                    tap.push_interleaved(data, channels);
                }
            },
            err_fn,
            None,
        ),
        cpal::SampleFormat::I16 => {
            let mut buf = Vec::new();
            device.build_input_stream(
                &config.into(),
                move |data: &[i16], _| {
                    buf.clear();
                    buf.extend(data.iter().map(|&s| s as f32 / i16::MAX as f32));
                    if let Ok(mut tap) = tap.lock() {
                        tap.push_interleaved(&buf, channels);
                    }
                },
                err_fn,
                None,
            )
        }
        other => {
            log::warn!("unsupported input sample format {other:?}");
            return None;
        }
    };
    let stream = match stream {
        Ok(s) => s,
        Err(e) => {
            log::warn!("could not open audio input: {e}");
            return None;
        }
    };
    if let Err(e) = stream.play() {
        log::warn!("could not start audio input: {e}");
        return None;
    }
    log::info!("audio input running, {channels} channel(s)");
    Some(stream)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_waits_for_a_full_window() {
        let mut tap = AmplitudeTap::new(4);
        let mut out = Vec::new();
        tap.push_interleaved(&[0.1, 0.2, 0.3], 1);
        assert!(!tap.snapshot(&mut out));
        tap.push_interleaved(&[0.4], 1);
        assert!(tap.snapshot(&mut out));
        assert_eq!(out, vec![0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn zero_capacity_tap_stays_empty() {
        let mut tap = AmplitudeTap::new(0);
        let mut out = Vec::new();
        tap.push_interleaved(&[0.5; 64], 1);
        assert!(tap.samples.is_empty());
        assert!(!tap.snapshot(&mut out));
    }

    #[test]
    fn keeps_latest_samples_of_first_channel() {
        let mut tap = AmplitudeTap::new(3);
        let mut out = Vec::new();
        // stereo frames: (left, right)
        tap.push_interleaved(&[1.0, -1.0, 2.0, -2.0, 3.0, -3.0, 4.0, -4.0], 2);
        assert!(tap.snapshot(&mut out));
        assert_eq!(out, vec![2.0, 3.0, 4.0]);
    }
}
