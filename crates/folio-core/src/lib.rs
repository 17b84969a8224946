pub mod constants;
pub mod device;
pub mod error;
pub mod quality;

pub use device::{
    classify, CapabilityTier, ClassifyReason, EnvironmentSignals, SignalSource, StaticSignals,
};
pub use error::FolioError;
pub use quality::{select_profile, QualityProfile};
