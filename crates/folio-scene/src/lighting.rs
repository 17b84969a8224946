use folio_core::constants::{COLOR_BLUE_500, COLOR_EMERALD_500, FOG_FAR, FOG_NEAR};
use folio_core::QualityProfile;

/// Maximum point lights the renderer uploads.
pub const MAX_POINT_LIGHTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: [f32; 3],
    pub intensity: f32,
    pub color: [f32; 3],
}

/// Ambient term plus up to [`MAX_POINT_LIGHTS`] point lights.
#[derive(Debug, Clone, PartialEq)]
pub struct LightRig {
    pub ambient: f32,
    pub points: Vec<PointLight>,
}

impl LightRig {
    pub fn for_profile(profile: &QualityProfile) -> Self {
        if profile.enable_dynamic_lighting {
            Self {
                ambient: 0.2,
                points: vec![
                    PointLight {
                        position: [10.0, 10.0, 10.0],
                        intensity: 1.0,
                        color: COLOR_EMERALD_500,
                    },
                    PointLight {
                        position: [-10.0, -10.0, -10.0],
                        intensity: 0.5,
                        color: COLOR_BLUE_500,
                    },
                ],
            }
        } else {
            // No point lights; flat ambient only.
            Self {
                ambient: 0.4,
                points: Vec::new(),
            }
        }
    }
}

/// Linear distance fog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub color: [f32; 3],
    pub near: f32,
    pub far: f32,
}

impl Fog {
    pub fn for_profile(profile: &QualityProfile) -> Option<Self> {
        profile.enable_fog.then_some(Self {
            color: [0.0, 0.0, 0.0],
            near: FOG_NEAR,
            far: FOG_FAR,
        })
    }

    /// Fog amount in [0, 1] at view-space `depth`.
    pub fn factor(&self, depth: f32) -> f32 {
        ((depth - self.near) / (self.far - self.near)).clamp(0.0, 1.0)
    }
}
