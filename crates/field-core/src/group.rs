//! Particle group storage.
//!
//! Per-particle data lives in parallel arrays that all share one length. The
//! fields are private so nothing outside this module can grow or shrink one
//! array without the others.

use crate::config::Blend;
use glam::{Mat4, Quat, Vec2, Vec3};

/// Draw style shared by every particle of a group.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroupStyle {
    pub point_size: f32,
    pub opacity: f32,
    pub blend: Blend,
}

#[derive(Clone, Debug)]
pub struct ParticleGroup {
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    colors: Vec<Vec3>,
    size_scale: Option<Vec<f32>>,
    style: GroupStyle,
    rotation: Vec2,
}

/// Mutable views over one group's per-particle arrays plus its spin.
pub struct GroupParts<'a> {
    pub positions: &'a mut [Vec3],
    pub velocities: &'a [Vec3],
    pub colors: &'a mut [Vec3],
    pub size_scale: Option<&'a mut [f32]>,
    pub rotation: &'a mut Vec2,
}

impl ParticleGroup {
    /// Returns `None` when the per-particle arrays disagree on length.
    pub fn from_parts(
        positions: Vec<Vec3>,
        velocities: Vec<Vec3>,
        colors: Vec<Vec3>,
        size_scale: Option<Vec<f32>>,
        style: GroupStyle,
    ) -> Option<Self> {
        let n = positions.len();
        let sizes_ok = size_scale.as_ref().map_or(true, |s| s.len() == n);
        if velocities.len() != n || colors.len() != n || !sizes_ok {
            return None;
        }
        Some(Self {
            positions,
            velocities,
            colors,
            size_scale,
            style,
            rotation: Vec2::ZERO,
        })
    }

    /// Crate-internal constructor for callers that build all arrays together.
    pub(crate) fn assemble(
        positions: Vec<Vec3>,
        velocities: Vec<Vec3>,
        colors: Vec<Vec3>,
        size_scale: Option<Vec<f32>>,
        style: GroupStyle,
    ) -> Self {
        debug_assert_eq!(positions.len(), velocities.len());
        debug_assert_eq!(positions.len(), colors.len());
        Self {
            positions,
            velocities,
            colors,
            size_scale,
            style,
            rotation: Vec2::ZERO,
        }
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[inline]
    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    #[inline]
    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    #[inline]
    pub fn size_scale(&self) -> Option<&[f32]> {
        self.size_scale.as_deref()
    }

    #[inline]
    pub fn style(&self) -> &GroupStyle {
        &self.style
    }

    #[inline]
    pub fn rotation(&self) -> Vec2 {
        self.rotation
    }

    pub fn parts_mut(&mut self) -> GroupParts<'_> {
        GroupParts {
            positions: &mut self.positions,
            velocities: &self.velocities,
            colors: &mut self.colors,
            size_scale: self.size_scale.as_deref_mut(),
            rotation: &mut self.rotation,
        }
    }

    /// Spin as a model transform: rotate about X, then Y.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_quat(Quat::from_euler(
            glam::EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            0.0,
        ))
    }
}
