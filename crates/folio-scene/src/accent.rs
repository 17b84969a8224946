use std::collections::HashMap;

use folio_core::constants::{
    ACCENT_EMISSIVE_INTENSITY, ACCENT_OPACITY, ACCENT_POSITION, ACCENT_SCALE, ACCENT_SPIN_X,
    ACCENT_SPIN_Y, COLOR_EMERALD_600, COLOR_EMERALD_900, FLOAT_INTENSITY, FLOAT_RANGE,
    FLOAT_ROTATION_INTENSITY, FLOAT_SPEED,
};
use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::frame_gate::FrameGate;
use crate::particles::RotationState;

/// Wireframe geometry on the unit sphere.
#[derive(Debug, Clone)]
pub struct AccentMesh {
    pub vertices: Vec<Vec3>,
    /// Unique undirected edges as vertex index pairs (lower index first).
    pub edges: Vec<[u32; 2]>,
}

impl AccentMesh {
    /// Icosahedron with each face split into 4^detail triangles, vertices
    /// projected back onto the unit sphere.
    pub fn icosphere(detail: u32) -> Self {
        let t = (1.0 + 5.0f32.sqrt()) / 2.0;
        let mut vertices: Vec<Vec3> = [
            [-1.0, t, 0.0],
            [1.0, t, 0.0],
            [-1.0, -t, 0.0],
            [1.0, -t, 0.0],
            [0.0, -1.0, t],
            [0.0, 1.0, t],
            [0.0, -1.0, -t],
            [0.0, 1.0, -t],
            [t, 0.0, -1.0],
            [t, 0.0, 1.0],
            [-t, 0.0, -1.0],
            [-t, 0.0, 1.0],
        ]
        .iter()
        .map(|&v| Vec3::from_array(v).normalize())
        .collect();

        let mut faces: Vec<[u32; 3]> = vec![
            [0, 11, 5],
            [0, 5, 1],
            [0, 1, 7],
            [0, 7, 10],
            [0, 10, 11],
            [1, 5, 9],
            [5, 11, 4],
            [11, 10, 2],
            [10, 7, 6],
            [7, 1, 8],
            [3, 9, 4],
            [3, 4, 2],
            [3, 2, 6],
            [3, 6, 8],
            [3, 8, 9],
            [4, 9, 5],
            [2, 4, 11],
            [6, 2, 10],
            [8, 6, 7],
            [9, 8, 1],
        ];

        for _ in 0..detail {
            let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
            let mut next = Vec::with_capacity(faces.len() * 4);
            for [a, b, c] in faces {
                let ab = midpoint(&mut vertices, &mut midpoints, a, b);
                let bc = midpoint(&mut vertices, &mut midpoints, b, c);
                let ca = midpoint(&mut vertices, &mut midpoints, c, a);
                next.push([a, ab, ca]);
                next.push([b, bc, ab]);
                next.push([c, ca, bc]);
                next.push([ab, bc, ca]);
            }
            faces = next;
        }

        let mut edges: Vec<[u32; 2]> = faces
            .iter()
            .flat_map(|&[a, b, c]| [[a, b], [b, c], [c, a]])
            .map(|[i, j]| [i.min(j), i.max(j)])
            .collect();
        edges.sort_unstable();
        edges.dedup();

        Self { vertices, edges }
    }

    /// Flattened line-list positions, two per edge.
    pub fn line_positions(&self) -> Vec<[f32; 3]> {
        self.edges
            .iter()
            .flat_map(|&[a, b]| {
                [
                    self.vertices[a as usize].to_array(),
                    self.vertices[b as usize].to_array(),
                ]
            })
            .collect()
    }
}

fn midpoint(
    vertices: &mut Vec<Vec3>,
    cache: &mut HashMap<(u32, u32), u32>,
    a: u32,
    b: u32,
) -> u32 {
    let key = (a.min(b), a.max(b));
    if let Some(&idx) = cache.get(&key) {
        return idx;
    }
    let mid = ((vertices[a as usize] + vertices[b as usize]) * 0.5).normalize();
    let idx = vertices.len() as u32;
    vertices.push(mid);
    cache.insert(key, idx);
    idx
}

/// Gentle bobbing applied around the accent shape. Runs every frame,
/// independent of the frame gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatMotion {
    pub speed: f32,
    pub rotation_intensity: f32,
    pub float_intensity: f32,
    pub range: [f32; 2],
    /// Phase offset so separate instances do not move in lockstep.
    pub offset: f32,
}

impl FloatMotion {
    pub fn new(offset: f32) -> Self {
        Self {
            speed: FLOAT_SPEED,
            rotation_intensity: FLOAT_ROTATION_INTENSITY,
            float_intensity: FLOAT_INTENSITY,
            range: FLOAT_RANGE,
            offset,
        }
    }

    /// Wrapper rotation and vertical offset at `elapsed` seconds.
    pub fn sample(&self, elapsed: f32) -> (RotationState, f32) {
        let t = (self.offset + elapsed) / 4.0 * self.speed;
        let rotation = RotationState {
            x: t.cos() / 8.0 * self.rotation_intensity,
            y: t.sin() / 8.0 * self.rotation_intensity,
            z: t.sin() / 20.0 * self.rotation_intensity,
        };
        // Map sin(t) / 10 from [-0.1, 0.1] onto the configured range.
        let raw = t.sin() / 10.0;
        let [lo, hi] = self.range;
        let y = lo + (raw + 0.1) / 0.2 * (hi - lo);
        (rotation, y * self.float_intensity)
    }
}

/// Decorative wireframe shape. Rotation is absolute in elapsed time and is
/// only recomputed on accepted ticks.
#[derive(Debug, Clone)]
pub struct AccentShape {
    mesh: AccentMesh,
    position: Vec3,
    scale: f32,
    pub color: [f32; 3],
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
    pub opacity: f32,
    rotation: RotationState,
    float_motion: Option<FloatMotion>,
    float_time: f32,
    gate: FrameGate,
}

impl AccentShape {
    pub fn new(frame_skip: u32, float_motion: Option<FloatMotion>) -> Self {
        Self {
            mesh: AccentMesh::icosphere(1),
            position: Vec3::from_array(ACCENT_POSITION),
            scale: ACCENT_SCALE,
            color: COLOR_EMERALD_600,
            emissive: COLOR_EMERALD_900,
            emissive_intensity: ACCENT_EMISSIVE_INTENSITY,
            opacity: ACCENT_OPACITY,
            rotation: RotationState::default(),
            float_motion,
            float_time: 0.0,
            gate: FrameGate::new(frame_skip),
        }
    }

    /// One host frame at `elapsed` seconds since the scene clock started.
    pub fn advance(&mut self, elapsed: f32) -> bool {
        self.float_time = elapsed;
        if !self.gate.accept() {
            return false;
        }
        self.rotation.x = elapsed * ACCENT_SPIN_X;
        self.rotation.y = elapsed * ACCENT_SPIN_Y;
        true
    }

    pub fn mesh(&self) -> &AccentMesh {
        &self.mesh
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn has_float_motion(&self) -> bool {
        self.float_motion.is_some()
    }

    /// Placement, then float wrapper, then the mesh's own spin and scale.
    pub fn model_matrix(&self) -> Mat4 {
        let float = match self.float_motion {
            Some(motion) => {
                let (rot, y) = motion.sample(self.float_time);
                Mat4::from_translation(Vec3::new(0.0, y, 0.0)) * Mat4::from_quat(rot.to_quat())
            }
            None => Mat4::IDENTITY,
        };
        let spin = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, 0.0);
        Mat4::from_translation(self.position)
            * float
            * Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), spin, Vec3::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_icosahedron_counts() {
        let mesh = AccentMesh::icosphere(0);
        assert_eq!(mesh.vertices.len(), 12);
        assert_eq!(mesh.edges.len(), 30);
    }

    #[test]
    fn test_detail_one_counts() {
        let mesh = AccentMesh::icosphere(1);
        assert_eq!(mesh.vertices.len(), 42);
        assert_eq!(mesh.edges.len(), 120);
        assert_eq!(mesh.line_positions().len(), 240);
    }

    #[test]
    fn test_vertices_on_unit_sphere() {
        let mesh = AccentMesh::icosphere(1);
        for v in &mesh.vertices {
            assert!((v.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_rotation_tracks_elapsed_time() {
        let mut shape = AccentShape::new(1, None);
        assert!(shape.advance(10.0));
        assert!((shape.rotation().x - 2.0).abs() < 1e-5);
        assert!((shape.rotation().y - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_rotation_gated_by_frame_skip() {
        let mut shape = AccentShape::new(2, None);
        assert!(!shape.advance(1.0));
        assert_eq!(shape.rotation(), RotationState::default());
        assert!(shape.advance(2.0));
        assert!((shape.rotation().x - 0.4).abs() < 1e-5);
    }

    #[test]
    fn test_float_offset_within_range() {
        let motion = FloatMotion::new(0.0);
        for i in 0..200 {
            let (rot, y) = motion.sample(i as f32 * 0.05);
            let max_y = 0.1 * FLOAT_INTENSITY;
            assert!(y.abs() <= max_y + 1e-5, "y {y}");
            assert!(rot.x.abs() <= 0.125 + 1e-5);
            assert!(rot.z.abs() <= 0.05 + 1e-5);
        }
    }

    #[test]
    fn test_model_matrix_places_shape() {
        let shape = AccentShape::new(1, None);
        let origin = shape.model_matrix().transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(1.0, 0.0, -0.5)).length() < 1e-6);

        let unit = shape.model_matrix().transform_vector3(Vec3::X);
        assert!((unit.length() - ACCENT_SCALE).abs() < 1e-5);
    }
}
