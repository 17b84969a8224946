use serde::Serialize;

use crate::constants::{CONSTRAINED_MAX_CORES, CONSTRAINED_MAX_MEMORY_GB, MOBILE_UA_KEYWORDS};

/// Coarse rendering capacity of the host device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CapabilityTier {
    /// Phones, tablets and low-end machines: static or cheap rendering only.
    Constrained,
    /// Everything else: full animated scene.
    Full,
}

/// Which signal decided the tier. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifyReason {
    MobileUserAgent,
    FewCores,
    LowMemory,
    Capable,
}

impl std::fmt::Display for ClassifyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::MobileUserAgent => "mobile user agent",
            Self::FewCores => "few logical cores",
            Self::LowMemory => "low device memory",
            Self::Capable => "capable device",
        };
        f.write_str(s)
    }
}

/// Environment signals sampled once at classification time.
///
/// Optional fields are absent when the host does not report them
/// (e.g. `navigator.deviceMemory` outside Chromium).
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentSignals {
    pub user_agent: String,
    pub logical_cores: Option<u32>,
    pub device_memory_gb: Option<f64>,
    pub device_pixel_ratio: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl Default for EnvironmentSignals {
    fn default() -> Self {
        Self {
            user_agent: String::new(),
            logical_cores: None,
            device_memory_gb: None,
            device_pixel_ratio: 1.0,
            viewport_width: 0.0,
            viewport_height: 0.0,
        }
    }
}

/// Capability to read environment signals. The browser host implements this
/// over `navigator`/`window`; tests inject fixed values.
pub trait SignalSource {
    fn sample(&self) -> EnvironmentSignals;
}

/// Fixed signals, for tests and native tools.
#[derive(Debug, Clone, Default)]
pub struct StaticSignals(pub EnvironmentSignals);

impl SignalSource for StaticSignals {
    fn sample(&self) -> EnvironmentSignals {
        self.0.clone()
    }
}

/// Classify the host into a capability tier.
pub fn classify(signals: &EnvironmentSignals) -> CapabilityTier {
    match classify_with_reason(signals) {
        ClassifyReason::Capable => CapabilityTier::Full,
        _ => CapabilityTier::Constrained,
    }
}

/// Classify and report the first signal that forced the constrained tier.
///
/// A core count of 0 is not a real reading and counts as absent, so it does
/// not force the constrained tier the way a count of 1 to 4 does.
pub fn classify_with_reason(signals: &EnvironmentSignals) -> ClassifyReason {
    let ua = signals.user_agent.to_lowercase();
    if MOBILE_UA_KEYWORDS.iter().any(|kw| ua.contains(kw)) {
        return ClassifyReason::MobileUserAgent;
    }

    // Zero cores is not a real reading; treat it as absent.
    if let Some(cores) = signals.logical_cores.filter(|&c| c > 0) {
        if cores <= CONSTRAINED_MAX_CORES {
            return ClassifyReason::FewCores;
        }
    }

    if let Some(mem) = signals
        .device_memory_gb
        .filter(|m| m.is_finite() && *m > 0.0)
    {
        if mem <= CONSTRAINED_MAX_MEMORY_GB {
            return ClassifyReason::LowMemory;
        }
    }

    ClassifyReason::Capable
}
