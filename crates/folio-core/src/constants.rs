//! Single source of truth for tuning constants shared by the scene,
//! renderer and browser host.

/// Hard ceiling for the canvas pixel ratio regardless of the display.
pub const PIXEL_RATIO_CEILING: f32 = 2.0;

/// Pixel ratio assumed when the host does not report one.
pub const DEFAULT_PIXEL_RATIO: f32 = 1.0;

/// Core count at or below which a device is treated as constrained.
pub const CONSTRAINED_MAX_CORES: u32 = 4;

/// Device memory (GiB) at or below which a device is treated as constrained.
pub const CONSTRAINED_MAX_MEMORY_GB: f64 = 4.0;

/// User-agent keywords that mark a mobile or tablet browser (lowercase).
pub const MOBILE_UA_KEYWORDS: [&str; 5] = ["mobile", "android", "iphone", "ipad", "tablet"];

// -- Quality profiles --

pub const CONSTRAINED_PARTICLE_COUNT: u32 = 300;
pub const CONSTRAINED_FOREGROUND_COUNT: u32 = 30;
pub const CONSTRAINED_PARTICLE_SIZE: f32 = 0.004;
pub const CONSTRAINED_FRAME_SKIP: u32 = 2;
pub const CONSTRAINED_PIXEL_RATIO: f32 = 1.0;

pub const FULL_PARTICLE_COUNT: u32 = 1000;
pub const FULL_FOREGROUND_COUNT: u32 = 80;
pub const FULL_PARTICLE_SIZE: f32 = 0.003;
pub const FULL_FRAME_SKIP: u32 = 1;

// -- Composer timing (milliseconds) --

/// Upper bound on how long classification waits for an idle period.
pub const IDLE_DEADLINE_MS: u32 = 500;

/// Delay used instead of an idle callback when the host has none.
pub const IDLE_FALLBACK_DELAY_MS: u32 = 50;

/// Delay between the profile being known and the canvas becoming visible.
pub const REVEAL_DELAY_MS: u32 = 200;

/// Duration of the transparent-to-opaque fade.
pub const FADE_DURATION_MS: f64 = 1000.0;

// -- Scene layout --

/// Background star field radius.
pub const BACKGROUND_RADIUS: f32 = 2.5;

/// Foreground particle radius.
pub const FOREGROUND_RADIUS: f32 = 1.5;

/// Foreground particles are drawn this many times larger than background ones.
pub const FOREGROUND_SIZE_FACTOR: f32 = 2.5;

/// Particle opacity before additive blending.
pub const PARTICLE_OPACITY: f32 = 0.6;

/// Field rotation rate divisors: rotation.x -= dt / 15, rotation.y -= dt / 20.
pub const FIELD_SPIN_DIVISOR_X: f32 = 15.0;
pub const FIELD_SPIN_DIVISOR_Y: f32 = 20.0;

/// Fixed tilt of every particle group about Z.
pub const FIELD_GROUP_TILT_Z: f32 = std::f32::consts::FRAC_PI_4;

/// Accent shape angular speed (radians per second of elapsed time).
pub const ACCENT_SPIN_X: f32 = 0.2;
pub const ACCENT_SPIN_Y: f32 = 0.3;

pub const ACCENT_POSITION: [f32; 3] = [1.0, 0.0, -0.5];
pub const ACCENT_SCALE: f32 = 0.8;
pub const ACCENT_OPACITY: f32 = 0.3;
pub const ACCENT_EMISSIVE_INTENSITY: f32 = 2.0;

/// Float (bobbing) wrapper parameters for the accent shape.
pub const FLOAT_SPEED: f32 = 4.0;
pub const FLOAT_ROTATION_INTENSITY: f32 = 1.0;
pub const FLOAT_INTENSITY: f32 = 2.0;
pub const FLOAT_RANGE: [f32; 2] = [-0.1, 0.1];

pub const CAMERA_POSITION: [f32; 3] = [0.0, 0.0, 2.5];
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

pub const FOG_NEAR: f32 = 1.0;
pub const FOG_FAR: f32 = 5.0;

// -- Palette (linear-ish sRGB components in [0, 1]) --

/// #059669
pub const COLOR_EMERALD_600: [f32; 3] = [0.020, 0.588, 0.412];
/// #34d399
pub const COLOR_EMERALD_400: [f32; 3] = [0.204, 0.827, 0.600];
/// #10b981
pub const COLOR_EMERALD_500: [f32; 3] = [0.063, 0.725, 0.506];
/// #064e3b
pub const COLOR_EMERALD_900: [f32; 3] = [0.024, 0.306, 0.231];
/// #3b82f6
pub const COLOR_BLUE_500: [f32; 3] = [0.231, 0.510, 0.965];
