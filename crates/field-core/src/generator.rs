//! Builds particle groups at startup from a [`FieldConfig`].

use crate::camera::Viewport;
use crate::config::{Blend, Distribution, FieldConfig, GroupSpec, Palette};
use crate::group::{GroupStyle, ParticleGroup};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::{PI, TAU};

/// Generate every group of `config`, shrinking counts on narrow viewports.
pub fn generate_field<R: Rng + ?Sized>(
    config: &FieldConfig,
    viewport: Viewport,
    rng: &mut R,
) -> Vec<ParticleGroup> {
    let factor = if viewport.is_narrower_than(config.mobile_breakpoint) {
        config.mobile_count_factor
    } else {
        1.0
    };
    let groups: Vec<ParticleGroup> = config
        .groups
        .iter()
        .map(|spec| {
            generate_group(
                spec,
                config.distribution,
                config.palette,
                config.physics.size_pulse,
                factor,
                rng,
            )
        })
        .collect();
    log::debug!(
        "generated {} groups, {} particles (count factor {factor})",
        groups.len(),
        groups.iter().map(ParticleGroup::count).sum::<usize>()
    );
    groups
}

pub fn generate_group<R: Rng + ?Sized>(
    spec: &GroupSpec,
    distribution: Distribution,
    palette: Palette,
    size_pulse: bool,
    count_factor: f32,
    rng: &mut R,
) -> ParticleGroup {
    let count = scaled_count(spec.count, count_factor);
    let half = spec.drift_scale * 0.5;
    let base = Vec3::from(spec.color);

    let mut positions = Vec::with_capacity(count);
    let mut velocities = Vec::with_capacity(count);
    let mut colors = Vec::with_capacity(count);
    for _ in 0..count {
        positions.push(sample_position(distribution, rng));
        velocities.push(Vec3::new(
            symmetric(rng, half),
            symmetric(rng, half),
            symmetric(rng, half),
        ));
        colors.push(match palette {
            Palette::Solid => base,
            Palette::NeuralGradient => Vec3::new(
                rng.gen::<f32>(),
                rng.gen_range(0.5..1.0),
                rng.gen::<f32>(),
            ),
        });
    }
    let size_scale = size_pulse.then(|| (0..count).map(|_| rng.gen_range(0.5..2.5)).collect());

    let style = GroupStyle {
        point_size: spec.point_size,
        opacity: spec.opacity,
        blend: Blend::Additive,
    };
    ParticleGroup::assemble(positions, velocities, colors, size_scale, style)
}

/// `floor(count * factor)`, at least one particle.
pub fn scaled_count(count: usize, factor: f32) -> usize {
    if factor >= 1.0 || !factor.is_finite() {
        return count.max(1);
    }
    ((count as f32 * factor).floor() as usize).max(1)
}

#[inline]
fn symmetric<R: Rng + ?Sized>(rng: &mut R, half: f32) -> f32 {
    if half > 0.0 {
        rng.gen_range(-half..half)
    } else {
        0.0
    }
}

fn sample_position<R: Rng + ?Sized>(distribution: Distribution, rng: &mut R) -> Vec3 {
    match distribution {
        Distribution::Sphere { radius } => {
            let theta = rng.gen_range(0.0..=PI);
            let phi = rng.gen_range(0.0..TAU);
            let (st, ct) = theta.sin_cos();
            let (sp, cp) = phi.sin_cos();
            Vec3::new(st * cp, st * sp, ct) * radius
        }
        Distribution::Cube { half_width } => Vec3::new(
            rng.gen_range(-half_width..half_width),
            rng.gen_range(-half_width..half_width),
            rng.gen_range(-half_width..half_width),
        ),
    }
}
