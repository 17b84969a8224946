use folio_scene::{ParticleField, Scene};
use wgpu::util::DeviceExt;

use crate::uniforms::{DrawUniforms, FrameUniforms};

/// Bytes per particle instance (xyz).
const INSTANCE_STRIDE: u64 = 12;

/// Vertices per particle quad (two triangles).
const QUAD_VERTICES: u32 = 6;

/// GPU resources for one drawable: geometry plus its own uniform slot.
struct DrawSlot {
    vertex_buffer: wgpu::Buffer,
    count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Owns every GPU resource for the background scene. Geometry is uploaded
/// once at creation; only uniforms change per frame.
pub struct Renderer {
    particle_pipeline: wgpu::RenderPipeline,
    accent_pipeline: wgpu::RenderPipeline,
    frame_buffer: wgpu::Buffer,
    background: DrawSlot,
    foreground: DrawSlot,
    accent: Option<DrawSlot>,
}

impl Renderer {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat, scene: &Scene) -> Self {
        let common_wgsl = include_str!("../../../shaders/common.wgsl");
        let particles_wgsl = include_str!("../../../shaders/particles.wgsl");
        let accent_wgsl = include_str!("../../../shaders/accent.wgsl");

        let particle_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("particles-shader"),
            source: wgpu::ShaderSource::Wgsl(format!("{common_wgsl}\n{particles_wgsl}").into()),
        });
        let accent_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("accent-shader"),
            source: wgpu::ShaderSource::Wgsl(format!("{common_wgsl}\n{accent_wgsl}").into()),
        });

        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame-uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene-bgl"),
            entries: &[uniform_entry(0), uniform_entry(1)],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene-pipeline-layout"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let additive = wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
        };

        let particle_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("particle-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &particle_module,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: INSTANCE_STRIDE,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &[wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 0,
                    }],
                }],
                compilation_options: Default::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &particle_module,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(additive),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            multiview: None,
            cache: None,
        });

        let accent_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("accent-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &accent_module,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: 12,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 0,
                    }],
                }],
                compilation_options: Default::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &accent_module,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            multiview: None,
            cache: None,
        });

        let background =
            Self::field_slot(device, &bgl, &frame_buffer, &scene.background, "background");
        let foreground =
            Self::field_slot(device, &bgl, &frame_buffer, &scene.foreground, "foreground");

        let accent = scene.accent.as_ref().map(|shape| {
            let lines = shape.mesh().line_positions();
            let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("accent-lines"),
                contents: bytemuck::cast_slice(&lines),
                usage: wgpu::BufferUsages::VERTEX,
            });
            Self::slot(
                device,
                &bgl,
                &frame_buffer,
                vertex_buffer,
                lines.len() as u32,
                DrawUniforms::for_accent(shape),
                "accent",
            )
        });

        log::info!(
            "Renderer ready: {} + {} instances, accent lines: {}",
            background.count,
            foreground.count,
            accent.as_ref().map_or(0, |a| a.count)
        );

        Self {
            particle_pipeline,
            accent_pipeline,
            frame_buffer,
            background,
            foreground,
            accent,
        }
    }

    fn field_slot(
        device: &wgpu::Device,
        bgl: &wgpu::BindGroupLayout,
        frame_buffer: &wgpu::Buffer,
        field: &ParticleField,
        label: &str,
    ) -> DrawSlot {
        let positions = field.cloud().as_slice();
        // Zero-sized vertex buffers cannot be bound; keep one dummy instance
        // and draw none.
        let contents: &[f32] = if positions.is_empty() {
            &[0.0; 3]
        } else {
            positions
        };
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}-instances")),
            contents: bytemuck::cast_slice(contents),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self::slot(
            device,
            bgl,
            frame_buffer,
            vertex_buffer,
            field.cloud().len() as u32,
            DrawUniforms::for_field(field, &folio_scene::CameraRig::default()),
            label,
        )
    }

    fn slot(
        device: &wgpu::Device,
        bgl: &wgpu::BindGroupLayout,
        frame_buffer: &wgpu::Buffer,
        vertex_buffer: wgpu::Buffer,
        count: u32,
        initial: DrawUniforms,
        label: &str,
    ) -> DrawSlot {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}-uniforms")),
            contents: bytemuck::bytes_of(&initial),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label}-bg")),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: frame_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: uniform_buffer.as_entire_binding(),
                },
            ],
        });
        DrawSlot {
            vertex_buffer,
            count,
            uniform_buffer,
            bind_group,
        }
    }

    /// Upload this frame's camera, lighting and model matrices.
    pub fn update(&self, queue: &wgpu::Queue, scene: &Scene, width: u32, height: u32) {
        let aspect = width as f32 / height.max(1) as f32;
        queue.write_buffer(
            &self.frame_buffer,
            0,
            bytemuck::bytes_of(&FrameUniforms::from_scene(scene, aspect)),
        );
        queue.write_buffer(
            &self.background.uniform_buffer,
            0,
            bytemuck::bytes_of(&DrawUniforms::for_field(&scene.background, &scene.camera)),
        );
        queue.write_buffer(
            &self.foreground.uniform_buffer,
            0,
            bytemuck::bytes_of(&DrawUniforms::for_field(&scene.foreground, &scene.camera)),
        );
        if let (Some(slot), Some(shape)) = (&self.accent, &scene.accent) {
            queue.write_buffer(
                &slot.uniform_buffer,
                0,
                bytemuck::bytes_of(&DrawUniforms::for_accent(shape)),
            );
        }
    }

    /// Clear to black, then draw the accent and both particle fields.
    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene-pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if let Some(slot) = &self.accent {
            pass.set_pipeline(&self.accent_pipeline);
            pass.set_bind_group(0, &slot.bind_group, &[]);
            pass.set_vertex_buffer(0, slot.vertex_buffer.slice(..));
            pass.draw(0..slot.count, 0..1);
        }

        pass.set_pipeline(&self.particle_pipeline);
        for slot in [&self.background, &self.foreground] {
            if slot.count == 0 {
                continue;
            }
            pass.set_bind_group(0, &slot.bind_group, &[]);
            pass.set_vertex_buffer(0, slot.vertex_buffer.slice(..));
            pass.draw(0..QUAD_VERTICES, 0..slot.count);
        }
    }
}
