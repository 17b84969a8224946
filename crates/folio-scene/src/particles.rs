use folio_core::constants::{
    FIELD_GROUP_TILT_Z, FIELD_SPIN_DIVISOR_X, FIELD_SPIN_DIVISOR_Y, PARTICLE_OPACITY,
};
use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::Rng;

use crate::frame_gate::FrameGate;

/// Flat xyz positions, three floats per point. Immutable once generated.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    positions: Vec<f32>,
}

impl PointCloud {
    /// Number of points (not floats).
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Raw interleaved positions, length `3 * len()`.
    pub fn as_slice(&self) -> &[f32] {
        &self.positions
    }

    pub fn points(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.positions
            .chunks_exact(3)
            .map(|p| Vec3::new(p[0], p[1], p[2]))
    }
}

/// Sample `count` points uniformly inside a sphere of `radius`.
///
/// Inverse-transform sampling: r = R * cbrt(u1) keeps the density uniform in
/// volume, phi = acos(2 * u3 - 1) keeps it uniform in solid angle.
pub fn generate<R: Rng + ?Sized>(count: usize, radius: f32, rng: &mut R) -> PointCloud {
    let mut positions = Vec::with_capacity(count * 3);
    for _ in 0..count {
        let u1: f64 = rng.gen();
        let u2: f64 = rng.gen();
        let u3: f64 = rng.gen();

        let r = radius as f64 * u1.cbrt();
        let theta = u2 * std::f64::consts::TAU;
        let phi = (2.0 * u3 - 1.0).acos();

        positions.push((r * phi.sin() * theta.cos()) as f32);
        positions.push((r * phi.sin() * theta.sin()) as f32);
        positions.push((r * phi.cos()) as f32);
    }
    PointCloud { positions }
}

/// Euler angles in radians, applied in XYZ order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn to_quat(self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.x, self.y, self.z)
    }
}

/// How a field is drawn. Blending is always additive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStyle {
    pub color: [f32; 3],
    /// World-space point size (attenuated by distance).
    pub size: f32,
    pub opacity: f32,
    /// Fixed rotation of the enclosing group about Z.
    pub tilt_z: f32,
}

impl FieldStyle {
    pub fn new(color: [f32; 3], size: f32) -> Self {
        Self {
            color,
            size,
            opacity: PARTICLE_OPACITY,
            tilt_z: FIELD_GROUP_TILT_Z,
        }
    }
}

/// A point cloud plus its spin. The rotation is written only through
/// [`ParticleField::advance`] after the frame gate accepts the tick.
#[derive(Debug, Clone)]
pub struct ParticleField {
    cloud: PointCloud,
    style: FieldStyle,
    rotation: RotationState,
    gate: FrameGate,
}

impl ParticleField {
    pub fn new(cloud: PointCloud, style: FieldStyle, frame_skip: u32) -> Self {
        Self {
            cloud,
            style,
            rotation: RotationState::default(),
            gate: FrameGate::new(frame_skip),
        }
    }

    /// Generate a field of `count` points within `radius`.
    pub fn generate<R: Rng + ?Sized>(
        count: usize,
        radius: f32,
        style: FieldStyle,
        frame_skip: u32,
        rng: &mut R,
    ) -> Self {
        Self::new(generate(count, radius, rng), style, frame_skip)
    }

    /// One host frame. `delta` is seconds since the previous frame.
    /// Returns true if the rotation changed.
    pub fn advance(&mut self, delta: f32) -> bool {
        if !self.gate.accept() {
            return false;
        }
        self.rotation.x -= delta / FIELD_SPIN_DIVISOR_X;
        self.rotation.y -= delta / FIELD_SPIN_DIVISOR_Y;
        true
    }

    pub fn cloud(&self) -> &PointCloud {
        &self.cloud
    }

    pub fn style(&self) -> &FieldStyle {
        &self.style
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    /// Group tilt followed by the animated spin.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_z(self.style.tilt_z) * Mat4::from_quat(self.rotation.to_quat())
    }
}
