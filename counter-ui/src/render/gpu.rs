//! GPU Renderer implementation using wgpu

use std::sync::Arc;

use wgpu::*;
use crate::core::context::Color;
use crate::error::UiError;
use crate::render::{RenderList, Primitive};

const MAX_VERTICES: u64 = 16 * 1024;
const MAX_INDICES: u64 = MAX_VERTICES / 4 * 6;

/// Vertex for 2D rendering
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBS: [VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2,  // position
        1 => Float32x4,  // color
    ];

    pub fn desc() -> VertexBufferLayout<'static> {
        VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as BufferAddress,
            step_mode: VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// GPU state and resources
pub struct GpuRenderer {
    surface: Surface<'static>,
    device: Device,
    queue: Queue,
    config: SurfaceConfiguration,
    pipeline: RenderPipeline,
    vertex_buffer: Buffer,
    index_buffer: Buffer,
    pub size: (u32, u32),
    pub clear_color: Color,
}

impl GpuRenderer {
    pub async fn new(window: Arc<winit::window::Window>) -> Result<Self, UiError> {
        let size = window.inner_size();
        
        let instance = Instance::new(InstanceDescriptor {
            backends: Backends::all(),
            ..Default::default()
        });
        
        let surface = instance.create_surface(window)?;
        
        let adapter = instance
            .request_adapter(&RequestAdapterOptions {
                power_preference: PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(UiError::NoAdapter)?;
        
        let (device, queue) = adapter
            .request_device(
                &DeviceDescriptor {
                    label: Some("counter-ui device"),
                    required_features: Features::empty(),
                    required_limits: Limits::downlevel_webgl2_defaults(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;
        
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(UiError::UnsupportedSurface)?;
        
        let config = SurfaceConfiguration {
            usage: TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes.first().copied().unwrap_or(CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        
        let pipeline = rect_pipeline(&device, config.format);
        let vertex_buffer = geometry_buffer::<Vertex>(&device, "counter-ui vertices", MAX_VERTICES, BufferUsages::VERTEX);
        let index_buffer = geometry_buffer::<u32>(&device, "counter-ui indices", MAX_INDICES, BufferUsages::INDEX);
        
        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer,
            index_buffer,
            size: (size.width, size.height),
            clear_color: Color::rgb(18, 18, 18),
        })
    }
    
    pub fn resize(&mut self, new_size: (u32, u32)) {
        if new_size.0 > 0 && new_size.1 > 0 {
            self.size = new_size;
            self.config.width = new_size.0;
            self.config.height = new_size.1;
            self.surface.configure(&self.device, &self.config);
        }
    }
    
    fn clear_value(&self) -> wgpu::Color {
        let [r, g, b, a] = self.clear_color.to_array().map(f64::from);
        wgpu::Color { r, g, b, a }
    }
    
    /// Draw a render list laid out in a `viewport` of logical units
    pub fn render(&mut self, render_list: &RenderList, viewport: (f32, f32)) -> Result<(), SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output.texture.create_view(&TextureViewDescriptor::default());
        
        let (vertices, indices) = build_geometry(render_list, viewport);
        
        self.queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&vertices));
        self.queue.write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&indices));
        
        let mut encoder = self.device.create_command_encoder(&CommandEncoderDescriptor {
            label: Some("render encoder"),
        });
        
        {
            let mut render_pass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("render pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(self.clear_value()),
                        store: StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            
            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.set_index_buffer(self.index_buffer.slice(..), IndexFormat::Uint32);
            render_pass.draw_indexed(0..indices.len() as u32, 0, 0..1);
        }
        
        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        
        Ok(())
    }
}

/// Solid-color triangle pipeline over [`Vertex`] input
fn rect_pipeline(device: &Device, format: TextureFormat) -> RenderPipeline {
    let shader = device.create_shader_module(ShaderModuleDescriptor {
        label: Some("counter-ui rects"),
        source: ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
    });
    let layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
        label: Some("counter-ui rects"),
        bind_group_layouts: &[],
        push_constant_ranges: &[],
    });
    
    device.create_render_pipeline(&RenderPipelineDescriptor {
        label: Some("counter-ui rects"),
        layout: Some(&layout),
        vertex: VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(ColorTargetState {
                format,
                blend: Some(BlendState::ALPHA_BLENDING),
                write_mask: ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: PrimitiveState::default(),
        depth_stencil: None,
        multisample: MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

/// Fixed-capacity buffer of `capacity` elements, rewritten every frame
fn geometry_buffer<T>(device: &Device, label: &str, capacity: u64, usage: BufferUsages) -> Buffer {
    device.create_buffer(&BufferDescriptor {
        label: Some(label),
        size: capacity * std::mem::size_of::<T>() as u64,
        usage: usage | BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Triangulate rects into NDC. Text needs a glyph atlas and is skipped.
fn build_geometry(render_list: &RenderList, viewport: (f32, f32)) -> (Vec<Vertex>, Vec<u32>) {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    
    let w = viewport.0.max(1.0);
    let h = viewport.1.max(1.0);
    
    for primitive in &render_list.primitives {
        if vertices.len() as u64 + 4 > MAX_VERTICES {
            tracing::warn!("vertex buffer full, dropping remaining primitives");
            break;
        }
        if let Primitive::Rect { x, y, width, height, color, .. } = primitive {
            let base = vertices.len() as u32;
            
            // Convert to NDC (-1 to 1)
            let x1 = (x / w) * 2.0 - 1.0;
            let y1 = 1.0 - (y / h) * 2.0;
            let x2 = ((x + width) / w) * 2.0 - 1.0;
            let y2 = 1.0 - ((y + height) / h) * 2.0;
            
            let c = color.to_array();
            
            vertices.extend_from_slice(&[
                Vertex { position: [x1, y1], color: c },
                Vertex { position: [x2, y1], color: c },
                Vertex { position: [x2, y2], color: c },
                Vertex { position: [x1, y2], color: c },
            ]);
            
            indices.extend_from_slice(&[
                base, base + 1, base + 2,
                base, base + 2, base + 3,
            ]);
        }
    }
    
    (vertices, indices)
}
