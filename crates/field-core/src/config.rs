//! Typed configuration for the particle field and the two built-in presets.

use crate::constants::*;
use crate::error::FieldError;
use std::fmt;
use std::str::FromStr;

/// How particle positions are seeded at creation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Distribution {
    /// On the surface of a sphere centered at the origin.
    Sphere { radius: f32 },
    /// Uniformly inside an axis-aligned cube centered at the origin.
    Cube { half_width: f32 },
}

/// Per-particle color rule applied by the generator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Palette {
    /// Every particle takes its group's base color.
    Solid,
    /// Random channels between cyan and magenta; green stays in the upper half.
    NeuralGradient,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blend {
    Additive,
}

/// Slow rotation applied to a whole group after its particles are stepped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Spin {
    Still,
    /// Each axis turns faster as the pointer moves away from center on the other axis.
    Pointer { base: f32 },
    /// Turns only while an amplitude sample is present.
    Audio { base: f32, gain: f32 },
}

/// Sinusoidal vertical sway applied before pointer forces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wave {
    pub amplitude: f32,
    pub time_freq: f32,
    pub spatial_freq: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GroupSpec {
    pub count: usize,
    pub point_size: f32,
    pub color: [f32; 3],
    pub drift_scale: f32,
    pub opacity: f32,
}

impl GroupSpec {
    pub fn new(count: usize, point_size: f32, color_hex: u32, drift_scale: f32) -> Self {
        Self {
            count,
            point_size,
            color: hex_to_rgb(color_hex),
            drift_scale,
            opacity: AMBIENT_OPACITY,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PhysicsParams {
    /// Multiplier from normalized pointer space to world units.
    pub pointer_scale: f32,
    pub proximity_radius: f32,
    /// Numerator of the reciprocal-distance attraction.
    pub attraction: f32,
    /// Added to the red channel of particles near the pointer.
    pub proximity_brighten: f32,
    /// Magnitude past which a coordinate is reflected.
    pub bound: f32,
    /// Negative factor in (-1, 0) applied to an out-of-bounds coordinate.
    pub bounce: f32,
    pub amplitude_displacement: f32,
    pub amplitude_brighten: f32,
    pub wave: Option<Wave>,
    pub spin: Spin,
    /// Keep a per-particle size multiplier that pulses near the pointer.
    pub size_pulse: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinkParams {
    pub max_distance: f32,
    pub cap: usize,
    pub rebuild_interval_sec: f64,
    pub rebuild_window_sec: f64,
}

impl LinkParams {
    #[inline]
    pub fn max_distance_sq(&self) -> f32 {
        self.max_distance * self.max_distance
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LinkStrategy {
    /// All-pairs scan, capped and throttled.
    #[default]
    Quadratic,
    /// Uniform spatial hash with one cell per link distance.
    Grid,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    pub color: [f32; 3],
    pub opacity: f32,
    pub blend: Blend,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: LINK_COLOR,
            opacity: LINK_OPACITY,
            blend: Blend::Additive,
        }
    }
}

/// Everything the render loop needs to build and animate one field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub audio_reactive: bool,
    pub distribution: Distribution,
    pub palette: Palette,
    /// The first group is the primary group used for proximity links.
    pub groups: Vec<GroupSpec>,
    pub physics: PhysicsParams,
    pub links: LinkParams,
    pub link_strategy: LinkStrategy,
    pub line_style: LineStyle,
    pub mobile_breakpoint: u32,
    pub mobile_count_factor: f32,
}

impl FieldConfig {
    /// General ambient backdrop: four solid-colored clouds in a cube.
    pub fn ambient() -> Self {
        Self {
            audio_reactive: false,
            distribution: Distribution::Cube {
                half_width: AMBIENT_CUBE_HALF_WIDTH,
            },
            palette: Palette::Solid,
            groups: vec![
                GroupSpec::new(1500, 0.3, 0xffffff, 0.03),
                GroupSpec::new(300, 0.4, 0x00ffff, 0.04),
                GroupSpec::new(300, 0.4, 0xff00ff, 0.04),
                GroupSpec::new(800, 0.2, 0x0066ff, 0.02),
            ],
            physics: PhysicsParams {
                pointer_scale: AMBIENT_POINTER_SCALE,
                proximity_radius: AMBIENT_PROXIMITY_RADIUS,
                attraction: AMBIENT_ATTRACTION,
                proximity_brighten: 0.0,
                bound: AMBIENT_BOUND,
                bounce: AMBIENT_BOUNCE,
                amplitude_displacement: AMPLITUDE_DISPLACEMENT,
                amplitude_brighten: AMPLITUDE_BRIGHTEN,
                wave: Some(Wave {
                    amplitude: AMBIENT_WAVE_AMPLITUDE,
                    time_freq: AMBIENT_WAVE_TIME_FREQ,
                    spatial_freq: AMBIENT_WAVE_SPATIAL_FREQ,
                }),
                spin: Spin::Pointer {
                    base: AMBIENT_SPIN_BASE,
                },
                size_pulse: true,
            },
            links: LinkParams {
                max_distance: LINK_MAX_DISTANCE,
                cap: AMBIENT_LINK_CAP,
                rebuild_interval_sec: LINK_REBUILD_INTERVAL_SEC,
                rebuild_window_sec: LINK_REBUILD_WINDOW_SEC,
            },
            link_strategy: LinkStrategy::Quadratic,
            line_style: LineStyle::default(),
            mobile_breakpoint: MOBILE_BREAKPOINT_PX,
            mobile_count_factor: AMBIENT_MOBILE_FACTOR,
        }
    }

    /// Audio-reactive "neural" field: two gradient-colored spheres.
    pub fn neural() -> Self {
        let group = GroupSpec {
            count: NEURAL_GROUP_COUNT,
            point_size: NEURAL_POINT_SIZE,
            color: [1.0, 1.0, 1.0],
            drift_scale: NEURAL_DRIFT_SCALE,
            opacity: NEURAL_OPACITY,
        };
        Self {
            audio_reactive: true,
            distribution: Distribution::Sphere {
                radius: NEURAL_SPHERE_RADIUS,
            },
            palette: Palette::NeuralGradient,
            groups: vec![group.clone(), group],
            physics: PhysicsParams {
                pointer_scale: NEURAL_POINTER_SCALE,
                proximity_radius: NEURAL_PROXIMITY_RADIUS,
                attraction: NEURAL_ATTRACTION,
                proximity_brighten: NEURAL_PROXIMITY_BRIGHTEN,
                bound: NEURAL_BOUND,
                bounce: NEURAL_BOUNCE,
                amplitude_displacement: AMPLITUDE_DISPLACEMENT,
                amplitude_brighten: AMPLITUDE_BRIGHTEN,
                wave: None,
                spin: Spin::Audio {
                    base: AUDIO_SPIN_BASE,
                    gain: AUDIO_SPIN_GAIN,
                },
                size_pulse: false,
            },
            links: LinkParams {
                max_distance: LINK_MAX_DISTANCE,
                cap: NEURAL_LINK_CAP,
                rebuild_interval_sec: LINK_REBUILD_INTERVAL_SEC,
                rebuild_window_sec: LINK_REBUILD_WINDOW_SEC,
            },
            link_strategy: LinkStrategy::Quadratic,
            line_style: LineStyle::default(),
            mobile_breakpoint: MOBILE_BREAKPOINT_PX,
            mobile_count_factor: NEURAL_MOBILE_FACTOR,
        }
    }

    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Ambient => Self::ambient(),
            Preset::Neural => Self::neural(),
        }
    }

    pub fn with_link_strategy(mut self, strategy: LinkStrategy) -> Self {
        self.link_strategy = strategy;
        self
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        let bad = |msg: String| Err(FieldError::InvalidConfig(msg));
        if self.groups.is_empty() {
            return bad("at least one particle group is required".into());
        }
        if let Some(i) = self.groups.iter().position(|g| g.count == 0) {
            return bad(format!("group {i} has zero particles"));
        }
        let p = &self.physics;
        if !(p.bounce > -1.0 && p.bounce < 0.0) {
            return bad(format!("bounce must be in (-1, 0), got {}", p.bounce));
        }
        if !(p.bound > 0.0) {
            return bad(format!("bound must be positive, got {}", p.bound));
        }
        if !(p.proximity_radius > 0.0) {
            return bad(format!(
                "proximity radius must be positive, got {}",
                p.proximity_radius
            ));
        }
        match self.distribution {
            Distribution::Sphere { radius } if !(radius > 0.0) => {
                return bad(format!("sphere radius must be positive, got {radius}"));
            }
            Distribution::Cube { half_width } if !(half_width > 0.0) => {
                return bad(format!("cube half-width must be positive, got {half_width}"));
            }
            _ => {}
        }
        let l = &self.links;
        if !(l.max_distance >= LINK_MIN_DISTANCE) || !l.max_distance.is_finite() {
            return bad(format!(
                "link distance must be finite and at least {LINK_MIN_DISTANCE}, got {}",
                l.max_distance
            ));
        }
        if l.cap == 0 {
            return bad("link cap must be non-zero".into());
        }
        if !(l.rebuild_interval_sec > 0.0) || !(l.rebuild_window_sec > 0.0) {
            return bad("link rebuild interval and window must be positive".into());
        }
        if !(self.mobile_count_factor > 0.0 && self.mobile_count_factor <= 1.0) {
            return bad(format!(
                "mobile count factor must be in (0, 1], got {}",
                self.mobile_count_factor
            ));
        }
        Ok(())
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self::neural()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Preset {
    Ambient,
    #[default]
    Neural,
}

impl FromStr for Preset {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ambient" => Ok(Self::Ambient),
            "neural" => Ok(Self::Neural),
            other => Err(FieldError::InvalidConfig(format!("unknown preset '{other}'"))),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ambient => "ambient",
            Self::Neural => "neural",
        })
    }
}

#[inline]
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_validate() {
        FieldConfig::ambient().validate().expect("ambient");
        FieldConfig::neural().validate().expect("neural");
    }

    #[test]
    fn preset_parses_case_insensitively() {
        assert_eq!("Ambient".parse::<Preset>().ok(), Some(Preset::Ambient));
        assert_eq!(" neural ".parse::<Preset>().ok(), Some(Preset::Neural));
        assert!("galaxy".parse::<Preset>().is_err());
        assert_eq!(Preset::Ambient.to_string(), "ambient");
    }

    #[test]
    fn amplifying_bounce_is_rejected() {
        let mut cfg = FieldConfig::neural();
        cfg.physics.bounce = -1.2;
        assert!(matches!(cfg.validate(), Err(FieldError::InvalidConfig(_))));
        cfg.physics.bounce = 0.5;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn empty_groups_and_zero_cap_are_rejected() {
        let mut cfg = FieldConfig::ambient();
        cfg.links.cap = 0;
        assert!(cfg.validate().is_err());
        let mut cfg = FieldConfig::ambient();
        cfg.groups.clear();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn degenerate_link_distances_are_rejected() {
        for d in [0.0, 1e-9, -5.0, f32::NAN, f32::INFINITY] {
            let mut cfg = FieldConfig::neural();
            cfg.links.max_distance = d;
            assert!(cfg.validate().is_err(), "accepted link distance {d}");
        }
        let mut cfg = FieldConfig::neural();
        cfg.links.max_distance = LINK_MIN_DISTANCE;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn hex_colors_unpack_to_unit_range() {
        assert_eq!(hex_to_rgb(0x00ffff), [0.0, 1.0, 1.0]);
        let c = hex_to_rgb(0x0066ff);
        assert!((c[1] - 0.4).abs() < 1e-6);
    }
}
