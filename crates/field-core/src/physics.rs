//! Per-tick particle update.
//!
//! [`step`] runs once per group per frame and must stay allocation-free: it
//! only walks the group's existing arrays.

use crate::config::{PhysicsParams, Spin};
use crate::constants::{INFLUENCE_EPSILON, MAX_INFLUENCE};
use crate::group::ParticleGroup;
use crate::signal::{AmplitudeSample, PointerState};
use glam::Vec2;

/// Advance one group by one tick.
///
/// `amplitude` is ignored unless `audio_reactive` is set, so a reactive field
/// with no sample behaves exactly like a non-reactive one.
pub fn step(
    group: &mut ParticleGroup,
    params: &PhysicsParams,
    audio_reactive: bool,
    pointer: PointerState,
    amplitude: Option<&AmplitudeSample>,
    time_secs: f32,
) {
    let amplitude = amplitude.filter(|_| audio_reactive);
    let world_pointer = Vec2::new(pointer.x, pointer.y) * params.pointer_scale;
    let radius_sq = params.proximity_radius * params.proximity_radius;
    let pulse = ((time_secs * 2.0).sin() + 2.0) * 0.5;

    let parts = group.parts_mut();
    let mut sizes = parts.size_scale;
    for (i, (p, v)) in parts
        .positions
        .iter_mut()
        .zip(parts.velocities.iter())
        .enumerate()
    {
        *p += *v;

        if let Some(w) = params.wave {
            p.y += (time_secs * w.time_freq + p.x * w.spatial_freq).sin() * w.amplitude;
        }

        if let Some(a) = amplitude.and_then(|s| s.get(i)) {
            let a = a.abs();
            p.x += a * params.amplitude_displacement;
            p.y += a * params.amplitude_displacement;
            let c = &mut parts.colors[i];
            c.x = (c.x + a * params.amplitude_brighten).min(1.0);
        }

        let d = Vec2::new(p.x, p.y) - world_pointer;
        let d2 = d.length_squared();
        if d2 < radius_sq {
            let dist = d2.sqrt();
            let influence = if dist <= INFLUENCE_EPSILON {
                MAX_INFLUENCE
            } else {
                (params.attraction / dist).min(MAX_INFLUENCE)
            };
            p.x -= d.x * influence;
            p.y -= d.y * influence;
            if params.proximity_brighten > 0.0 {
                let c = &mut parts.colors[i];
                c.x = (c.x + params.proximity_brighten).min(1.0);
            }
            if let Some(s) = sizes.as_deref_mut().and_then(|s| s.get_mut(i)) {
                *s = pulse;
            }
        }

        reflect(&mut p.x, params.bound, params.bounce);
        reflect(&mut p.y, params.bound, params.bounce);
        reflect(&mut p.z, params.bound, params.bounce);
    }

    match params.spin {
        Spin::Still => {}
        Spin::Pointer { base } => {
            parts.rotation.x += base * (1.0 + pointer.y.abs());
            parts.rotation.y += base * (1.0 + pointer.x.abs());
        }
        Spin::Audio { base, gain } => {
            if let Some(s) = amplitude {
                let delta = base + gain * s.mean_abs();
                parts.rotation.x += delta;
                parts.rotation.y += delta;
            }
        }
    }
}

/// Scale an out-of-bounds coordinate by `bounce`, a factor in (-1, 0).
#[inline]
fn reflect(v: &mut f32, bound: f32, bounce: f32) {
    if v.abs() > bound {
        *v *= bounce;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflect_flips_and_shrinks() {
        let mut v = 52.0;
        reflect(&mut v, 50.0, -0.98);
        assert!(v < 0.0 && v.abs() < 52.0);
        let mut inside = 10.0;
        reflect(&mut inside, 50.0, -0.98);
        assert_eq!(inside, 10.0);
    }
}
