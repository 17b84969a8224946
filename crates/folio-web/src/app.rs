use std::cell::RefCell;
use std::rc::{Rc, Weak};

use folio_core::FolioError;
use folio_render::Renderer;
use folio_scene::{ComposerPhase, Presentation, SceneComposer, Task, TaskHandle};

use crate::frame_loop::FrameLoop;
use crate::gpu::{self, GpuContext};
use crate::host::{self, BrowserScheduler, Deliver};
use crate::layer::BackgroundLayer;
use crate::signals::BrowserSignals;
use crate::style;
use crate::timing;

/// The mounted background. Owns the composer and every browser resource
/// it drives.
pub struct Background {
    composer: SceneComposer,
    scheduler: BrowserScheduler,
    layer: BackgroundLayer,
    frame_loop: FrameLoop,
    gpu: Option<GpuContext>,
    renderer: Option<Renderer>,
    clock_start_ms: Option<f64>,
    last_frame_ms: Option<f64>,
}

impl Background {
    /// Insert the static layer and schedule profiling.
    pub fn mount(seed: u64) -> Result<Rc<RefCell<Self>>, FolioError> {
        let layer = BackgroundLayer::attach()?;

        let background = Rc::new_cyclic(|weak: &Weak<RefCell<Self>>| {
            let weak = weak.clone();
            let deliver: Deliver = Rc::new(move |task, handle| Self::deliver(&weak, task, handle));
            RefCell::new(Self {
                composer: SceneComposer::new(Box::new(BrowserSignals), seed),
                scheduler: BrowserScheduler::new(deliver),
                layer,
                frame_loop: FrameLoop::new(),
                gpu: None,
                renderer: None,
                clock_start_ms: None,
                last_frame_ms: None,
            })
        });

        {
            let mut guard = background.borrow_mut();
            let bg = &mut *guard;
            bg.composer.mount(&mut bg.scheduler);
        }
        log::info!("Background mounted (static)");
        Ok(background)
    }

    fn deliver(weak: &Weak<RefCell<Self>>, task: Task, handle: TaskHandle) {
        let Some(this) = weak.upgrade() else {
            return;
        };
        let mut guard = this.borrow_mut();
        let bg = &mut *guard;
        bg.scheduler.retire(handle);
        bg.composer.run_task(task, host::now_ms(), &mut bg.scheduler);

        if task == Task::Classify {
            bg.present(weak);
        }
    }

    /// Act on the profile the composer just settled on.
    fn present(&mut self, weak: &Weak<RefCell<Self>>) {
        match self.composer.presentation() {
            Presentation::Pending => {}
            Presentation::StaticFallback => log::info!("Keeping static background"),
            Presentation::Animated => {
                if let Err(e) = self.start_animated(weak) {
                    log::error!("Animated background unavailable: {e}");
                    self.fall_back();
                }
            }
        }
    }

    fn start_animated(&mut self, weak: &Weak<RefCell<Self>>) -> Result<(), FolioError> {
        let canvas = self.layer.show_canvas()?;
        let ratio = self.pixel_ratio();
        let (css_w, css_h) = self.layer.css_size();
        let (width, height) = style::backing_size(css_w, css_h, ratio);
        canvas.set_width(width);
        canvas.set_height(height);
        log::info!("Canvas: {css_w}x{css_h} CSS, {width}x{height} physical (dpr cap {ratio:.2})");

        let init_weak = weak.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = gpu::init_gpu(canvas, width, height).await;
            let Some(this) = init_weak.upgrade() else {
                return;
            };
            this.borrow_mut().finish_gpu_init(result);
        });

        if self.frame_loop.is_running() {
            return Ok(());
        }
        let frame_weak = weak.clone();
        self.frame_loop.start(move |timestamp| match frame_weak.upgrade() {
            Some(this) => this.borrow_mut().frame(timestamp),
            None => false,
        });
        Ok(())
    }

    fn finish_gpu_init(&mut self, result: Result<GpuContext, FolioError>) {
        if self.composer.phase() == ComposerPhase::Unmounted {
            return;
        }
        match result {
            Ok(gpu) => match self.composer.scene() {
                Some(scene) => {
                    self.renderer = Some(Renderer::new(&gpu.device, gpu.surface_format, scene));
                    self.gpu = Some(gpu);
                }
                None => log::warn!("GPU ready but no scene to draw"),
            },
            Err(e) => {
                log::error!("GPU init failed: {e}");
                self.fall_back();
            }
        }
    }

    /// Drop everything animated and show the static look again.
    fn fall_back(&mut self) {
        self.frame_loop.stop();
        self.renderer = None;
        self.gpu = None;
        if let Err(e) = self.layer.revert_to_static() {
            log::error!("Could not restore static background: {e}");
        }
    }

    fn pixel_ratio(&self) -> f32 {
        self.composer.profile().map_or(1.0, |p| p.pixel_ratio_cap)
    }

    /// One animation frame. Returns false to end the loop.
    fn frame(&mut self, timestamp: f64) -> bool {
        if self.composer.phase() == ComposerPhase::Unmounted {
            return false;
        }

        let start = *self.clock_start_ms.get_or_insert(timestamp);
        let delta = timing::frame_delta(self.last_frame_ms, timestamp);
        self.last_frame_ms = Some(timestamp);

        let elapsed = ((timestamp - start) / 1000.0) as f32;
        self.composer.on_frame(elapsed, delta);
        self.layer.set_opacity(self.composer.opacity(timestamp));
        self.render_frame();
        true
    }

    fn render_frame(&mut self) {
        let ratio = self.pixel_ratio();
        let (Some(gpu), Some(renderer), Some(scene)) =
            (self.gpu.as_mut(), self.renderer.as_ref(), self.composer.scene())
        else {
            return;
        };

        let (css_w, css_h) = self.layer.css_size();
        let (width, height) = style::backing_size(css_w, css_h, ratio);
        if let Some(canvas) = self.layer.canvas() {
            if canvas.width() != width || canvas.height() != height {
                canvas.set_width(width);
                canvas.set_height(height);
            }
        }
        gpu.resize(width, height);
        renderer.update(&gpu.queue, scene, width, height);

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.surface_config);
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Surface out of memory");
                return;
            }
            Err(e) => {
                log::warn!("Surface error: {e:?}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("folio-frame"),
            });
        renderer.render(&mut encoder, &view);
        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }

    /// Cancel pending work, stop drawing and remove the layer.
    pub fn unmount(&mut self) {
        self.composer.unmount(&mut self.scheduler);
        if self.scheduler.pending_count() > 0 {
            log::warn!("{} host timers outlived unmount", self.scheduler.pending_count());
        }
        self.frame_loop.stop();
        self.renderer = None;
        self.gpu = None;
        self.layer.remove();
        log::info!("Background unmounted");
    }
}
