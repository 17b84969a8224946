use folio_core::constants::{
    BACKGROUND_RADIUS, CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, CAMERA_POSITION,
    COLOR_EMERALD_400, COLOR_EMERALD_600, FOREGROUND_RADIUS, FOREGROUND_SIZE_FACTOR,
};
use folio_core::QualityProfile;
use glam::{Mat4, Vec3};
use rand::Rng;

use crate::accent::{AccentShape, FloatMotion};
use crate::lighting::{Fog, LightRig};
use crate::particles::{FieldStyle, ParticleField};

/// Fixed perspective camera looking down -Z at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub position: Vec3,
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            position: Vec3::from_array(CAMERA_POSITION),
            fov_y_deg: CAMERA_FOV_DEG,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        }
    }
}

impl CameraRig {
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, Vec3::ZERO, Vec3::Y)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            1.0
        };
        Mat4::perspective_rh(self.fov_y_deg.to_radians(), aspect, self.near, self.far)
    }
}

/// Everything the animated background draws: a sparse distant star field, a
/// denser foreground, an optional accent shape, lights and fog.
#[derive(Debug, Clone)]
pub struct Scene {
    pub background: ParticleField,
    pub foreground: ParticleField,
    pub accent: Option<AccentShape>,
    pub lights: LightRig,
    pub fog: Option<Fog>,
    pub camera: CameraRig,
    pub pixel_ratio: f32,
}

impl Scene {
    /// Build the scene for a profile. Point clouds are generated here, once.
    pub fn compose<R: Rng + ?Sized>(profile: &QualityProfile, rng: &mut R) -> Self {
        let background = ParticleField::generate(
            profile.particle_count as usize,
            BACKGROUND_RADIUS,
            FieldStyle::new(COLOR_EMERALD_600, profile.particle_size),
            profile.frame_skip,
            rng,
        );
        let foreground = ParticleField::generate(
            profile.foreground_particle_count as usize,
            FOREGROUND_RADIUS,
            FieldStyle::new(
                COLOR_EMERALD_400,
                profile.particle_size * FOREGROUND_SIZE_FACTOR,
            ),
            profile.frame_skip,
            rng,
        );

        let accent = profile.enable_accent_shape.then(|| {
            let float = profile
                .enable_float_motion
                .then(|| FloatMotion::new(rng.gen::<f32>() * 10_000.0));
            AccentShape::new(profile.frame_skip, float)
        });

        log::debug!(
            "Composed scene: {} background, {} foreground particles, accent: {}",
            background.cloud().len(),
            foreground.cloud().len(),
            accent.is_some()
        );

        Self {
            background,
            foreground,
            accent,
            lights: LightRig::for_profile(profile),
            fog: Fog::for_profile(profile),
            camera: CameraRig::default(),
            pixel_ratio: profile.pixel_ratio_cap,
        }
    }

    /// Advance every animated component by one host frame.
    /// `elapsed` is seconds since the scene clock started, `delta` seconds
    /// since the previous frame.
    pub fn advance(&mut self, elapsed: f32, delta: f32) {
        self.background.advance(delta);
        self.foreground.advance(delta);
        if let Some(accent) = self.accent.as_mut() {
            accent.advance(elapsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{select_profile, CapabilityTier};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_full_scene_layout() {
        let profile = select_profile(CapabilityTier::Full, 2.0);
        let scene = Scene::compose(&profile, &mut ChaCha8Rng::seed_from_u64(1));

        assert_eq!(scene.background.cloud().len(), 1000);
        assert_eq!(scene.foreground.cloud().len(), 80);
        assert!((scene.foreground.style().size - 0.0075).abs() < 1e-6);
        assert!(scene.accent.as_ref().is_some_and(|a| a.has_float_motion()));
        assert!(scene.fog.is_some());
        assert_eq!(scene.pixel_ratio, 2.0);

        for p in scene.background.cloud().points() {
            assert!(p.length() <= BACKGROUND_RADIUS * (1.0 + 1e-5));
        }
        for p in scene.foreground.cloud().points() {
            assert!(p.length() <= FOREGROUND_RADIUS * (1.0 + 1e-5));
        }
    }

    #[test]
    fn test_constrained_scene_is_reduced() {
        let profile = select_profile(CapabilityTier::Constrained, 3.0);
        let scene = Scene::compose(&profile, &mut ChaCha8Rng::seed_from_u64(1));
        assert_eq!(scene.background.cloud().len(), 300);
        assert_eq!(scene.foreground.cloud().len(), 30);
        assert!(scene.accent.is_none());
        assert!(scene.fog.is_none());
        assert_eq!(scene.pixel_ratio, 1.0);
    }

    #[test]
    fn test_advance_moves_fields_and_accent() {
        let profile = select_profile(CapabilityTier::Full, 1.0);
        let mut scene = Scene::compose(&profile, &mut ChaCha8Rng::seed_from_u64(7));
        scene.advance(1.0, 0.016);
        assert!(scene.background.rotation().x < 0.0);
        assert!(scene.foreground.rotation().y < 0.0);
        let accent = scene.accent.as_ref().expect("accent");
        assert!((accent.rotation().y - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_camera_projection_handles_zero_aspect() {
        let cam = CameraRig::default();
        let proj = cam.projection(0.0);
        assert!(proj.is_finite());
        let eye = cam.view().transform_point3(cam.position);
        assert!(eye.length() < 1e-5);
    }
}
