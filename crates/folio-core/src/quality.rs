use serde::Serialize;

use crate::constants::*;
use crate::device::CapabilityTier;

/// Concrete rendering parameters for a session. Built once from a tier and
/// never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityProfile {
    pub tier: CapabilityTier,
    pub particle_count: u32,
    pub foreground_particle_count: u32,
    pub particle_size: f32,
    pub enable_accent_shape: bool,
    pub enable_float_motion: bool,
    pub enable_dynamic_lighting: bool,
    pub enable_fog: bool,
    /// Accept one animation tick in `frame_skip`. Always >= 1.
    pub frame_skip: u32,
    /// Canvas pixel ratio. Never above `PIXEL_RATIO_CEILING`.
    pub pixel_ratio_cap: f32,
}

impl QualityProfile {
    /// Whether the composer should mount the animated canvas at all.
    pub fn is_animated(&self) -> bool {
        self.tier == CapabilityTier::Full
    }
}

/// Map a tier to its profile. `reported_pixel_ratio` only matters for the
/// full tier.
pub fn select_profile(tier: CapabilityTier, reported_pixel_ratio: f32) -> QualityProfile {
    match tier {
        CapabilityTier::Constrained => QualityProfile {
            tier,
            particle_count: CONSTRAINED_PARTICLE_COUNT,
            foreground_particle_count: CONSTRAINED_FOREGROUND_COUNT,
            particle_size: CONSTRAINED_PARTICLE_SIZE,
            enable_accent_shape: false,
            enable_float_motion: false,
            enable_dynamic_lighting: false,
            enable_fog: false,
            frame_skip: CONSTRAINED_FRAME_SKIP,
            pixel_ratio_cap: CONSTRAINED_PIXEL_RATIO,
        },
        CapabilityTier::Full => QualityProfile {
            tier,
            particle_count: FULL_PARTICLE_COUNT,
            foreground_particle_count: FULL_FOREGROUND_COUNT,
            particle_size: FULL_PARTICLE_SIZE,
            enable_accent_shape: true,
            enable_float_motion: true,
            enable_dynamic_lighting: true,
            enable_fog: true,
            frame_skip: FULL_FRAME_SKIP,
            pixel_ratio_cap: cap_pixel_ratio(reported_pixel_ratio),
        },
    }
}

/// Clamp a reported device pixel ratio to the ceiling. Missing or nonsensical
/// ratios fall back to 1.
pub fn cap_pixel_ratio(reported: f32) -> f32 {
    let ratio = if reported.is_finite() && reported > 0.0 {
        reported
    } else {
        DEFAULT_PIXEL_RATIO
    };
    ratio.min(PIXEL_RATIO_CEILING)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constrained_profile_values() {
        let p = select_profile(CapabilityTier::Constrained, 3.0);
        assert_eq!(p.particle_count, 300);
        assert_eq!(p.foreground_particle_count, 30);
        assert!((p.particle_size - 0.004).abs() < f32::EPSILON);
        assert!(!p.enable_accent_shape);
        assert!(!p.enable_float_motion);
        assert!(!p.enable_dynamic_lighting);
        assert!(!p.enable_fog);
        assert_eq!(p.frame_skip, 2);
        assert_eq!(p.pixel_ratio_cap, 1.0);
        assert!(!p.is_animated());
    }

    #[test]
    fn test_full_profile_values() {
        let p = select_profile(CapabilityTier::Full, 1.5);
        assert_eq!(p.particle_count, 1000);
        assert_eq!(p.foreground_particle_count, 80);
        assert!((p.particle_size - 0.003).abs() < f32::EPSILON);
        assert!(p.enable_accent_shape);
        assert!(p.enable_float_motion);
        assert!(p.enable_dynamic_lighting);
        assert!(p.enable_fog);
        assert_eq!(p.frame_skip, 1);
        assert_eq!(p.pixel_ratio_cap, 1.5);
        assert!(p.is_animated());
    }

    #[test]
    fn test_selection_is_deterministic() {
        for tier in [CapabilityTier::Constrained, CapabilityTier::Full] {
            assert_eq!(select_profile(tier, 2.0), select_profile(tier, 2.0));
        }
    }

    #[test]
    fn test_pixel_ratio_never_exceeds_ceiling() {
        assert_eq!(select_profile(CapabilityTier::Full, 3.0).pixel_ratio_cap, 2.0);
        assert_eq!(select_profile(CapabilityTier::Full, 1.0).pixel_ratio_cap, 1.0);
        for tenths in 0..=60 {
            let reported = tenths as f32 / 10.0;
            for tier in [CapabilityTier::Constrained, CapabilityTier::Full] {
                let cap = select_profile(tier, reported).pixel_ratio_cap;
                assert!(cap <= PIXEL_RATIO_CEILING, "cap {cap} for {reported}");
                assert!(cap > 0.0);
            }
        }
    }

    #[test]
    fn test_bad_pixel_ratio_defaults_to_one() {
        assert_eq!(cap_pixel_ratio(0.0), 1.0);
        assert_eq!(cap_pixel_ratio(-2.0), 1.0);
        assert_eq!(cap_pixel_ratio(f32::NAN), 1.0);
        assert_eq!(cap_pixel_ratio(f32::INFINITY), 1.0);
    }

    #[test]
    fn test_frame_skip_at_least_one() {
        for tier in [CapabilityTier::Constrained, CapabilityTier::Full] {
            assert!(select_profile(tier, 1.0).frame_skip >= 1);
        }
    }
}
