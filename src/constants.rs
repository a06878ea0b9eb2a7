// Page wiring and audio tuning for the web front end.

// DOM
pub const DEFAULT_CANVAS_ID: &str = "field-canvas";
pub const PRESET_ATTR: &str = "data-preset"; // "ambient" | "neural"

// Audio tap: sine drone -> analyser -> master gain -> speakers
pub const DRONE_HZ: f32 = 220.0;
pub const ANALYSER_FFT_SIZE: u32 = 2048; // 1024 time-domain samples per read
pub const AUDIBLE_GAIN: f32 = 0.05;
pub const GAIN_RAMP_SEC: f64 = 0.5;

// Keyboard
pub const KEY_TOGGLE_AUDIBLE: &str = "m";
pub const KEY_ENABLE_AUDIO: &str = "a";
