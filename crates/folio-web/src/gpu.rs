use folio_core::FolioError;
use wgpu::{
    Device, DeviceDescriptor, Instance, InstanceDescriptor, InstanceFlags, PowerPreference, Queue,
    RequestAdapterOptions, Surface, SurfaceConfiguration, TextureFormat, TextureUsages,
};

/// WebGPU resources for the background canvas.
pub struct GpuContext {
    pub device: Device,
    pub queue: Queue,
    pub surface: Surface<'static>,
    pub surface_config: SurfaceConfiguration,
    pub surface_format: TextureFormat,
}

impl GpuContext {
    /// Reconfigure the surface if the backing size changed.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.surface_config.width && height == self.surface_config.height {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
        log::debug!("Surface resized to {width}x{height}");
    }
}

/// Initialize WebGPU on `canvas`.
///
/// Browser WebGPU backend only. Antialiasing is left off; particles are
/// smoothed in the fragment shader.
pub async fn init_gpu(
    canvas: web_sys::HtmlCanvasElement,
    width: u32,
    height: u32,
) -> Result<GpuContext, FolioError> {
    let instance = Instance::new(&InstanceDescriptor {
        backends: wgpu::Backends::BROWSER_WEBGPU,
        flags: InstanceFlags::default(),
        ..Default::default()
    });

    let surface: Surface<'static> = instance
        .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
        .map_err(|e| FolioError::SurfaceConfigFailed(format!("{e}")))?;

    let adapter = instance
        .request_adapter(&RequestAdapterOptions {
            power_preference: PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await
        .ok_or_else(|| {
            FolioError::AdapterNotFound("No WebGPU adapter; browser may lack WebGPU".into())
        })?;

    let info = adapter.get_info();
    log::info!("Adapter: {} ({:?})", info.name, info.backend);

    let (device, queue) = adapter
        .request_device(
            &DeviceDescriptor {
                label: Some("folio-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                ..Default::default()
            },
            None,
        )
        .await
        .map_err(|e| FolioError::DeviceRequestFailed(format!("{e}")))?;

    let caps = surface.get_capabilities(&adapter);
    let surface_format = caps
        .formats
        .iter()
        .find(|f| f.is_srgb())
        .copied()
        .or_else(|| caps.formats.first().copied())
        .ok_or_else(|| FolioError::SurfaceConfigFailed("surface reports no formats".into()))?;
    let alpha_mode = caps
        .alpha_modes
        .first()
        .copied()
        .unwrap_or(wgpu::CompositeAlphaMode::Auto);

    let surface_config = SurfaceConfiguration {
        usage: TextureUsages::RENDER_ATTACHMENT,
        format: surface_format,
        width,
        height,
        present_mode: wgpu::PresentMode::AutoVsync,
        desired_maximum_frame_latency: 2,
        alpha_mode,
        view_formats: vec![],
    };
    surface.configure(&device, &surface_config);

    log::info!("Surface format: {surface_format:?}, size: {width}x{height}");

    Ok(GpuContext {
        device,
        queue,
        surface,
        surface_config,
        surface_format,
    })
}
