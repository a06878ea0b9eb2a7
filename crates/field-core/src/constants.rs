// Shared tuning constants for the two field presets.

// Viewport
pub const MOBILE_BREAKPOINT_PX: u32 = 768; // below this CSS width, counts shrink
pub const MAX_PIXEL_RATIO: f32 = 2.0; // cap on devicePixelRatio for the backing store

// Camera
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_Z: f32 = 30.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

// Proximity links
pub const LINK_MAX_DISTANCE: f32 = 5.0; // world units
pub const LINK_MIN_DISTANCE: f32 = 1e-3; // smallest accepted link distance
pub const AMBIENT_LINK_CAP: usize = 800;
pub const NEURAL_LINK_CAP: usize = 1200;
pub const LINK_REBUILD_INTERVAL_SEC: f64 = 0.1;
pub const LINK_REBUILD_WINDOW_SEC: f64 = 0.016; // roughly one frame at 60 Hz
pub const LINK_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const LINK_OPACITY: f32 = 0.2;

// Pointer attraction
pub const MAX_INFLUENCE: f32 = 1.0; // 1.0 snaps onto the pointer, never past it
pub const INFLUENCE_EPSILON: f32 = 1e-6;

// Ambient preset
pub const AMBIENT_CUBE_HALF_WIDTH: f32 = 50.0;
pub const AMBIENT_BOUND: f32 = 50.0;
pub const AMBIENT_BOUNCE: f32 = -0.98;
pub const AMBIENT_POINTER_SCALE: f32 = 50.0;
pub const AMBIENT_PROXIMITY_RADIUS: f32 = 20.0;
pub const AMBIENT_ATTRACTION: f32 = 0.03;
pub const AMBIENT_MOBILE_FACTOR: f32 = 0.6;
pub const AMBIENT_SPIN_BASE: f32 = 0.0002; // radians per tick
pub const AMBIENT_WAVE_AMPLITUDE: f32 = 0.04;
pub const AMBIENT_WAVE_TIME_FREQ: f32 = 0.5;
pub const AMBIENT_WAVE_SPATIAL_FREQ: f32 = 0.05;
pub const AMBIENT_OPACITY: f32 = 0.8;

// Neural preset
pub const NEURAL_SPHERE_RADIUS: f32 = 25.0;
pub const NEURAL_BOUND: f32 = 30.0;
pub const NEURAL_BOUNCE: f32 = -0.95;
pub const NEURAL_POINTER_SCALE: f32 = 30.0;
pub const NEURAL_PROXIMITY_RADIUS: f32 = 10.0;
pub const NEURAL_ATTRACTION: f32 = 0.12;
pub const NEURAL_PROXIMITY_BRIGHTEN: f32 = 0.1;
pub const NEURAL_MOBILE_FACTOR: f32 = 0.75;
pub const NEURAL_GROUP_COUNT: usize = 2000;
pub const NEURAL_POINT_SIZE: f32 = 0.15;
pub const NEURAL_DRIFT_SCALE: f32 = 0.02;
pub const NEURAL_OPACITY: f32 = 0.8;

// Audio reactivity
pub const AMPLITUDE_DISPLACEMENT: f32 = 0.1;
pub const AMPLITUDE_BRIGHTEN: f32 = 0.1;
pub const AUDIO_SPIN_BASE: f32 = 0.001;
pub const AUDIO_SPIN_GAIN: f32 = 0.01;
pub const AMPLITUDE_FRAME_LEN: usize = 1024; // analyser fftSize 2048 -> 1024 time-domain samples
