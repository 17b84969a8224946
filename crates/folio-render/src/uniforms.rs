use folio_scene::lighting::MAX_POINT_LIGHTS;
use folio_scene::{AccentShape, CameraRig, ParticleField, Scene};

/// Per-frame uniforms shared by every draw. Must match `Frame` in common.wgsl.
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    /// near, far, enabled (0/1), unused
    pub fog: [f32; 4],
    pub fog_color: [f32; 4],
    /// ambient intensity, point light count, unused, unused
    pub ambient: [f32; 4],
    pub light_pos: [[f32; 4]; MAX_POINT_LIGHTS],
    /// rgb, intensity
    pub light_color: [[f32; 4]; MAX_POINT_LIGHTS],
}

impl FrameUniforms {
    pub fn from_scene(scene: &Scene, aspect: f32) -> Self {
        let mut uniforms = Self {
            view: scene.camera.view().to_cols_array_2d(),
            proj: scene.camera.projection(aspect).to_cols_array_2d(),
            fog: [0.0; 4],
            fog_color: [0.0; 4],
            ambient: [scene.lights.ambient, 0.0, 0.0, 0.0],
            light_pos: [[0.0; 4]; MAX_POINT_LIGHTS],
            light_color: [[0.0; 4]; MAX_POINT_LIGHTS],
        };

        if let Some(fog) = scene.fog {
            uniforms.fog = [fog.near, fog.far, 1.0, 0.0];
            uniforms.fog_color = [fog.color[0], fog.color[1], fog.color[2], 1.0];
        }

        let count = scene.lights.points.len().min(MAX_POINT_LIGHTS);
        for (i, light) in scene.lights.points.iter().take(count).enumerate() {
            let [x, y, z] = light.position;
            let [r, g, b] = light.color;
            uniforms.light_pos[i] = [x, y, z, 1.0];
            uniforms.light_color[i] = [r, g, b, light.intensity];
        }
        uniforms.ambient[1] = count as f32;
        uniforms
    }
}

/// Per-draw uniforms. Must match `Draw` in common.wgsl.
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawUniforms {
    pub model: [[f32; 4]; 4],
    /// rgb, opacity
    pub color: [f32; 4],
    /// rgb pre-multiplied by intensity, unused
    pub emissive: [f32; 4],
    /// view-space half extent of a particle quad, unused x3
    pub params: [f32; 4],
}

impl DrawUniforms {
    /// A point of world size `s` covers `s * (height / 2) / depth` pixels.
    /// The equivalent view-space quad half extent is `s * tan(fov / 2) / 2`.
    pub fn for_field(field: &ParticleField, camera: &CameraRig) -> Self {
        let style = field.style();
        let half_extent = style.size * (camera.fov_y_deg.to_radians() * 0.5).tan() * 0.5;
        Self {
            model: field.model_matrix().to_cols_array_2d(),
            color: [style.color[0], style.color[1], style.color[2], style.opacity],
            emissive: [0.0; 4],
            params: [half_extent, 0.0, 0.0, 0.0],
        }
    }

    pub fn for_accent(accent: &AccentShape) -> Self {
        let e = accent.emissive_intensity;
        Self {
            model: accent.model_matrix().to_cols_array_2d(),
            color: [
                accent.color[0],
                accent.color[1],
                accent.color[2],
                accent.opacity,
            ],
            emissive: [
                accent.emissive[0] * e,
                accent.emissive[1] * e,
                accent.emissive[2] * e,
                0.0,
            ],
            params: [0.0; 4],
        }
    }
}
