//! wgpu renderer for a [`Scene`].
//!
//! Two pipelines share one camera uniform: instanced triangle meshes with
//! alpha blending, and a line list for helpers. Geometry is uploaded once per
//! distinct [`Geometry`] and cached; instance colors and transforms are
//! rewritten every frame.

mod camera;
mod draw;

use std::collections::HashMap;
use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use tracing::{debug, info};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::error::GpuError;
use crate::scene::{Geometry, Scene};

pub use camera::Camera;
pub use draw::{DrawList, LineVertex, MeshBatch, MeshInstance};

/// WGSL source of both pipelines.
pub const SHADER_SOURCE: &str = include_str!("scene.wgsl");

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const INSTANCE_ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
    1 => Float32x4,
    2 => Float32x4,
    3 => Float32x4,
    4 => Float32x4,
    5 => Float32x4,
];
const LINE_ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4];

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
}

/// Vertex and index buffers of one uploaded geometry.
struct GpuGeometry {
    /// Keeps the cache key alive.
    _source: Arc<Geometry>,
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
}

/// Buffer that is reallocated when a frame needs more room.
struct GrowableBuffer {
    label: &'static str,
    usage: wgpu::BufferUsages,
    buffer: wgpu::Buffer,
    capacity: u64,
}

impl GrowableBuffer {
    fn new(device: &wgpu::Device, label: &'static str, usage: wgpu::BufferUsages) -> Self {
        let usage = usage | wgpu::BufferUsages::COPY_DST;
        let capacity = 256;
        Self {
            label,
            usage,
            buffer: create_buffer(device, label, usage, capacity),
            capacity,
        }
    }

    fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, data: &[u8]) {
        let needed = data.len() as u64;
        if needed > self.capacity {
            self.capacity = needed.next_power_of_two();
            self.buffer = create_buffer(device, self.label, self.usage, self.capacity);
            debug!(buffer = self.label, bytes = self.capacity, "Grew GPU buffer");
        }
        if !data.is_empty() {
            queue.write_buffer(&self.buffer, 0, data);
        }
    }
}

fn create_buffer(device: &wgpu::Device, label: &str, usage: wgpu::BufferUsages, size: u64) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size,
        usage,
        mapped_at_creation: false,
    })
}

/// GPU resources bound to one window surface.
pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    mesh_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    depth_texture: wgpu::TextureView,
    geometry_cache: HashMap<*const Geometry, GpuGeometry>,
    instance_buffer: GrowableBuffer,
    line_buffer: GrowableBuffer,
    linear_output: bool,
    pub camera: Camera,
}

impl GpuState {
    pub async fn new(window: Arc<Window>, camera: Camera) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| GpuError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        info!(
            adapter = %adapter.get_info().name,
            format = ?surface_format,
            width = config.width,
            height = config.height,
            "GPU initialized"
        );

        let depth_texture = create_depth_texture(&device, &config);

        let uniforms = Uniforms {
            view_proj: camera.view_proj(aspect(&config)).to_cols_array_2d(),
        };
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Uniform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER_SOURCE.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        let mesh_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            PipelineKind::Mesh,
            config.format,
        );
        let line_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            PipelineKind::Line,
            config.format,
        );

        let instance_buffer = GrowableBuffer::new(&device, "Instance Buffer", wgpu::BufferUsages::VERTEX);
        let line_buffer = GrowableBuffer::new(&device, "Line Buffer", wgpu::BufferUsages::VERTEX);

        Ok(Self {
            surface,
            device,
            queue,
            linear_output: config.format.is_srgb(),
            config,
            mesh_pipeline,
            line_pipeline,
            uniform_buffer,
            uniform_bind_group,
            depth_texture,
            geometry_cache: HashMap::new(),
            instance_buffer,
            line_buffer,
            camera,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_texture = create_depth_texture(&self.device, &self.config);
        }
    }

    /// Reconfigure the surface at its current size.
    pub fn reconfigure(&mut self) {
        self.resize(winit::dpi::PhysicalSize {
            width: self.config.width,
            height: self.config.height,
        });
    }

    fn update_uniforms(&mut self) {
        let uniforms = Uniforms {
            view_proj: self.camera.view_proj(aspect(&self.config)).to_cols_array_2d(),
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
    }

    fn upload_geometry(&mut self, batches: &[MeshBatch]) {
        for batch in batches {
            let key = Arc::as_ptr(&batch.geometry);
            if self.geometry_cache.contains_key(&key) {
                continue;
            }
            let geometry = &batch.geometry;
            let vertices = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Geometry Vertex Buffer"),
                contents: bytemuck::cast_slice(geometry.positions()),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let indices = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Geometry Index Buffer"),
                contents: bytemuck::cast_slice(geometry.indices()),
                usage: wgpu::BufferUsages::INDEX,
            });
            debug!(triangles = geometry.triangle_count(), "Uploaded geometry");
            self.geometry_cache.insert(
                key,
                GpuGeometry {
                    _source: geometry.clone(),
                    vertices,
                    indices,
                    index_count: geometry.indices().len() as u32,
                },
            );
        }
    }

    /// Draw `scene` to the window.
    pub fn render(&mut self, scene: &Scene) -> Result<(), wgpu::SurfaceError> {
        let list = DrawList::from_scene(scene, self.linear_output);

        self.update_uniforms();
        self.upload_geometry(&list.batches);
        self.instance_buffer
            .write(&self.device, &self.queue, bytemuck::cast_slice(&list.instances));
        self.line_buffer
            .write(&self.device, &self.queue, bytemuck::cast_slice(&list.lines));

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);

            // Opaque helpers first so transparent meshes blend over them
            if !list.lines.is_empty() {
                render_pass.set_pipeline(&self.line_pipeline);
                render_pass.set_vertex_buffer(0, self.line_buffer.buffer.slice(..));
                render_pass.draw(0..list.lines.len() as u32, 0..1);
            }

            if !list.instances.is_empty() {
                render_pass.set_pipeline(&self.mesh_pipeline);
                render_pass.set_vertex_buffer(1, self.instance_buffer.buffer.slice(..));
                for batch in &list.batches {
                    let Some(gpu) = self.geometry_cache.get(&Arc::as_ptr(&batch.geometry)) else {
                        continue;
                    };
                    render_pass.set_vertex_buffer(0, gpu.vertices.slice(..));
                    render_pass.set_index_buffer(gpu.indices.slice(..), wgpu::IndexFormat::Uint32);
                    let instances = batch.first_instance..batch.first_instance + batch.instance_count;
                    render_pass.draw_indexed(0..gpu.index_count, 0, instances);
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

#[derive(Clone, Copy)]
enum PipelineKind {
    Mesh,
    Line,
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    kind: PipelineKind,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let mesh_buffers = [
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &POSITION_ATTRS,
        },
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &INSTANCE_ATTRS,
        },
    ];
    let line_buffers = [wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &LINE_ATTRS,
    }];

    // Transparent meshes test depth but do not write it
    let (label, entry_point, buffers, topology, depth_write_enabled) = match kind {
        PipelineKind::Mesh => (
            "Mesh Pipeline",
            "vs_mesh",
            &mesh_buffers[..],
            wgpu::PrimitiveTopology::TriangleList,
            false,
        ),
        PipelineKind::Line => (
            "Line Pipeline",
            "vs_line",
            &line_buffers[..],
            wgpu::PrimitiveTopology::LineList,
            true,
        ),
    };

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(entry_point),
            buffers,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

fn aspect(config: &wgpu::SurfaceConfiguration) -> f32 {
    config.width as f32 / config.height.max(1) as f32
}

fn create_depth_texture(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
