pub mod accent;
pub mod composer;
pub mod frame_gate;
pub mod lighting;
pub mod particles;
pub mod scene;
pub mod schedule;

#[cfg(test)]
mod test_scheduler;

pub use accent::{AccentMesh, AccentShape, FloatMotion};
pub use composer::{ComposerPhase, Presentation, SceneComposer};
pub use frame_gate::{should_advance, FrameGate};
pub use lighting::{Fog, LightRig, PointLight};
pub use particles::{generate, FieldStyle, ParticleField, PointCloud, RotationState};
pub use scene::{CameraRig, Scene};
pub use schedule::{Scheduler, Task, TaskHandle, When};
