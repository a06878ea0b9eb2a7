//! Pointer and amplitude inputs handed to the physics step each tick.

use crate::camera::Viewport;
use crate::error::SignalError;

/// Pointer position normalized to [-1, 1] on both axes, y pointing up.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

impl PointerState {
    pub const CENTER: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: clamp_unit(x),
            y: clamp_unit(y),
        }
    }

    /// Map CSS-pixel client coordinates into normalized device space.
    pub fn from_viewport_px(x: f32, y: f32, viewport: Viewport) -> Self {
        if viewport.width == 0 || viewport.height == 0 {
            return Self::CENTER;
        }
        let w = viewport.width as f32;
        let h = viewport.height as f32;
        Self::new((x / w) * 2.0 - 1.0, -(y / h) * 2.0 + 1.0)
    }
}

#[inline]
fn clamp_unit(v: f32) -> f32 {
    if v.is_finite() {
        v.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// One frame of time-domain amplitude values in [-1, 1].
#[derive(Clone, Debug, PartialEq)]
pub struct AmplitudeSample {
    values: Vec<f32>,
    mean_abs: f32,
}

impl AmplitudeSample {
    pub fn new(raw: &[f32]) -> Result<Self, SignalError> {
        let mut sample = Self {
            values: Vec::with_capacity(raw.len()),
            mean_abs: 0.0,
        };
        sample.refill(raw)?;
        Ok(sample)
    }

    /// Replace the contents in place. On error the previous values are kept.
    pub fn refill(&mut self, raw: &[f32]) -> Result<(), SignalError> {
        check_frame(raw)?;
        self.values.clear();
        self.values.extend(raw.iter().map(|v| v.clamp(-1.0, 1.0)));
        let sum: f32 = self.values.iter().map(|v| v.abs()).sum();
        self.mean_abs = sum / self.values.len() as f32;
        Ok(())
    }

    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn get(&self, i: usize) -> Option<f32> {
        self.values.get(i).copied()
    }

    #[inline]
    pub fn mean_abs(&self) -> f32 {
        self.mean_abs
    }
}

fn check_frame(raw: &[f32]) -> Result<(), SignalError> {
    if raw.is_empty() {
        return Err(SignalError::EmptySample);
    }
    if let Some(index) = raw.iter().position(|v| !v.is_finite()) {
        return Err(SignalError::NonFinite { index });
    }
    Ok(())
}

/// Inputs written by the host between ticks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Signals {
    pub pointer: PointerState,
    /// `None` until the first valid frame arrives.
    pub amplitude: Option<AmplitudeSample>,
}

impl Signals {
    pub fn set_pointer(&mut self, pointer: PointerState) {
        self.pointer = pointer;
    }

    /// Store a new amplitude frame, reusing the existing buffer.
    pub fn push_amplitude(&mut self, raw: &[f32]) -> Result<(), SignalError> {
        match self.amplitude.as_mut() {
            Some(sample) => sample.refill(raw),
            None => {
                self.amplitude = Some(AmplitudeSample::new(raw)?);
                Ok(())
            }
        }
    }

    pub fn clear_amplitude(&mut self) {
        self.amplitude = None;
    }
}
