use thiserror::Error;

/// Errors that can occur while bringing up the animated background.
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("WebGPU adapter not found: {0}")]
    AdapterNotFound(String),

    #[error("Failed to request GPU device: {0}")]
    DeviceRequestFailed(String),

    #[error("Surface configuration failed: {0}")]
    SurfaceConfigFailed(String),

    #[error("Host environment unavailable: {0}")]
    HostUnavailable(String),

    #[error("DOM operation failed: {0}")]
    Dom(String),
}
