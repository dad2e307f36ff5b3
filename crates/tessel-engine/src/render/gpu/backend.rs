use std::num::NonZeroU64;

use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::paint::Color;
use crate::render::backend::{BatchLimits, RenderBackend};
use crate::render::vertex::{self, QuadVertex};
use crate::render::RenderCtx;

use super::shader::{self, FIRST_TEXTURE_BINDING, SHADER_LABEL};
use super::texture::Texture2D;

const UNIFORM_SIZE: u64 = std::mem::size_of::<[f32; 16]>() as u64;

/// Depth buffer format; quads with a larger `z` win the `Less` test.
const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

const DEPTH_CLEAR: f32 = 1.0;

/// Color target for one frame.
struct FrameTarget {
    view: wgpu::TextureView,
    width: u32,
    height: u32,
}

/// Depth attachment matching the current frame target.
struct DepthTarget {
    view: wgpu::TextureView,
    width: u32,
    height: u32,
}

/// wgpu implementation of [`RenderBackend`].
///
/// Every draw is recorded into its own render pass and submitted right away.
/// `Queue::write_buffer` takes effect at the next submit, so this keeps each
/// draw paired with the vertex upload that preceded it even when the batch
/// renderer flushes several times per frame.
///
/// The clear requested at the start of a frame is folded into the first pass
/// as its load op; [`finish_frame`](Self::finish_frame) clears explicitly
/// when nothing was drawn. The depth buffer is cleared by the first pass of
/// each frame and loaded by the rest, so `z` orders quads across flushes.
pub struct WgpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    limits: BatchLimits,

    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,

    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    sampler: wgpu::Sampler,

    white: Texture2D,
    bound: Vec<Option<wgpu::TextureView>>,

    target: Option<FrameTarget>,
    depth: Option<DepthTarget>,
    depth_cleared: bool,
    pending_clear: Option<Color>,
    viewport: (u32, u32),
    warned_no_target: bool,
}

impl WgpuBackend {
    /// Creates the quad pipeline and batch buffers.
    ///
    /// `requested.max_texture_slots` is clamped to what the device can sample
    /// in one shader stage.
    pub fn new(ctx: &RenderCtx<'_>, requested: BatchLimits) -> Self {
        let limits = negotiate_limits(requested, ctx.device.limits().max_sampled_textures_per_shader_stage);
        limits.validate();

        let device = ctx.device.clone();
        let queue = ctx.queue.clone();

        let shader_src = shader::quad_shader_source(limits.max_texture_slots);
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(SHADER_LABEL),
            source: wgpu::ShaderSource::Wgsl(shader_src.into()),
        });

        let bind_group_layout = create_bind_group_layout(&device, limits.max_texture_slots);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tessel quad pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(SHADER_LABEL),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tessel quad vbo"),
            size: (limits.max_vertices() * std::mem::size_of::<QuadVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let indices = vertex::quad_indices(limits.max_quads);
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("tessel quad ibo"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("tessel view-projection ubo"),
            contents: bytemuck::cast_slice(&Mat4::IDENTITY.to_cols_array()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("tessel quad sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let white = Texture2D::from_rgba8(ctx, 1, 1, &[0xff; 4]);

        log::info!(
            "WgpuBackend: pipeline '{SHADER_LABEL}' ready ({} texture slots, format {:?})",
            limits.max_texture_slots,
            ctx.surface_format
        );

        Self {
            device,
            queue,
            limits,
            pipeline,
            bind_group_layout,
            vertex_buffer,
            index_buffer,
            uniform_buffer,
            sampler,
            white,
            bound: vec![None; limits.max_texture_slots],
            target: None,
            depth: None,
            depth_cleared: false,
            pending_clear: None,
            viewport: (0, 0),
            warned_no_target: false,
        }
    }

    /// Directs subsequent draws at `view` (`width × height` physical pixels).
    pub fn begin_frame(&mut self, view: wgpu::TextureView, width: u32, height: u32) {
        self.ensure_depth(width, height);
        self.target = Some(FrameTarget { view, width, height });
        self.depth_cleared = false;
    }

    /// Executes a clear that no draw consumed and releases the frame target.
    pub fn finish_frame(&mut self) {
        if let Some(color) = self.pending_clear.take() {
            if let (Some(target), Some(depth)) = (self.target.as_ref(), self.depth.as_ref()) {
                let mut encoder = self.encoder();
                drop(begin_pass(
                    &mut encoder,
                    &target.view,
                    &depth.view,
                    wgpu::LoadOp::Clear(color.into()),
                    depth_load(false),
                ));
                self.queue.submit(std::iter::once(encoder.finish()));
            }
        }
        self.target = None;
    }

    /// Recreates the depth buffer when the target size changed.
    fn ensure_depth(&mut self, width: u32, height: u32) {
        let current = self.depth.as_ref().map(|d| (d.width, d.height));
        if !depth_needs_rebuild(current, (width, height)) {
            return;
        }

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("tessel depth"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        log::debug!("WgpuBackend: depth buffer {width}x{height}");

        self.depth = Some(DepthTarget { view, width, height });
    }

    fn encoder(&self) -> wgpu::CommandEncoder {
        self.device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("tessel batch encoder"),
            })
    }

    fn create_bind_group(&self) -> wgpu::BindGroup {
        let white = self.white.view();
        let mut entries = Vec::with_capacity(2 + self.bound.len());
        entries.push(wgpu::BindGroupEntry {
            binding: 0,
            resource: self.uniform_buffer.as_entire_binding(),
        });
        entries.push(wgpu::BindGroupEntry {
            binding: 1,
            resource: wgpu::BindingResource::Sampler(&self.sampler),
        });
        // Unused slots still need a resource; the white texture fills them.
        for (slot, view) in self.bound.iter().enumerate() {
            entries.push(wgpu::BindGroupEntry {
                binding: FIRST_TEXTURE_BINDING + slot as u32,
                resource: wgpu::BindingResource::TextureView(view.as_ref().unwrap_or(white)),
            });
        }

        self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tessel batch bind group"),
            layout: &self.bind_group_layout,
            entries: &entries,
        })
    }
}

impl RenderBackend for WgpuBackend {
    type Texture = Texture2D;

    fn limits(&self) -> BatchLimits {
        self.limits
    }

    fn white_texture(&self) -> &Texture2D {
        &self.white
    }

    fn set_view_projection(&mut self, view_projection: &Mat4) {
        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&view_projection.to_cols_array()),
        );
    }

    fn clear(&mut self, color: Color) {
        self.pending_clear = Some(color);
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        self.ensure_depth(width, height);
    }

    fn upload_vertices(&mut self, vertices: &[QuadVertex]) {
        if vertices.is_empty() {
            return;
        }
        self.queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(vertices));
    }

    fn bind_texture(&mut self, slot: usize, binding: &wgpu::TextureView) {
        self.bound[slot] = Some(binding.clone());
    }

    fn draw_indexed(&mut self, index_count: u32) {
        let (Some(target), Some(depth)) = (self.target.as_ref(), self.depth.as_ref()) else {
            if !self.warned_no_target {
                log::warn!("WgpuBackend: draw issued outside begin_frame/finish_frame; ignored");
                self.warned_no_target = true;
            }
            return;
        };

        let bind_group = self.create_bind_group();
        let load = match self.pending_clear.take() {
            Some(color) => wgpu::LoadOp::Clear(color.into()),
            None => wgpu::LoadOp::Load,
        };
        let depth_ops = depth_load(self.depth_cleared);
        self.depth_cleared = true;

        let (vw, vh) = viewport_within(self.viewport, (target.width, target.height));

        let mut encoder = self.encoder();
        {
            let mut rpass = begin_pass(&mut encoder, &target.view, &depth.view, load, depth_ops);
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &bind_group, &[]);
            rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            rpass.set_viewport(0.0, 0.0, vw as f32, vh as f32, 0.0, 1.0);
            rpass.draw_indexed(0..index_count, 0, 0..1);
        }
        self.queue.submit(std::iter::once(encoder.finish()));

        self.bound.iter_mut().for_each(|slot| *slot = None);
    }
}

fn begin_pass<'e>(
    encoder: &'e mut wgpu::CommandEncoder,
    view: &wgpu::TextureView,
    depth_view: &wgpu::TextureView,
    load: wgpu::LoadOp<wgpu::Color>,
    depth_load: wgpu::LoadOp<f32>,
) -> wgpu::RenderPass<'e> {
    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("tessel batch pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            resolve_target: None,
            ops: wgpu::Operations {
                load,
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: depth_view,
            depth_ops: Some(wgpu::Operations {
                load: depth_load,
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    })
}

fn create_bind_group_layout(device: &wgpu::Device, slots: usize) -> wgpu::BindGroupLayout {
    let mut entries = vec![
        wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: NonZeroU64::new(UNIFORM_SIZE),
            },
            count: None,
        },
        wgpu::BindGroupLayoutEntry {
            binding: 1,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        },
    ];
    entries.extend((0..slots).map(|slot| wgpu::BindGroupLayoutEntry {
        binding: FIRST_TEXTURE_BINDING + slot as u32,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }));

    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("tessel quad bgl"),
        entries: &entries,
    })
}

/// Depth load op: the first pass of a frame clears, later passes keep the
/// depth written by earlier flushes.
fn depth_load(cleared: bool) -> wgpu::LoadOp<f32> {
    if cleared {
        wgpu::LoadOp::Load
    } else {
        wgpu::LoadOp::Clear(DEPTH_CLEAR)
    }
}

/// A zero-sized surface keeps the old buffer; wgpu rejects 0-extent textures.
fn depth_needs_rebuild(current: Option<(u32, u32)>, wanted: (u32, u32)) -> bool {
    if wanted.0 == 0 || wanted.1 == 0 {
        return false;
    }
    current != Some(wanted)
}

/// Clamps the slot count to the device's per-stage sampled texture limit.
fn negotiate_limits(requested: BatchLimits, device_max_textures: u32) -> BatchLimits {
    let max = device_max_textures as usize;
    if requested.max_texture_slots <= max {
        return requested;
    }

    log::warn!(
        "WgpuBackend: {} texture slots requested, device supports {max}; clamping",
        requested.max_texture_slots
    );
    BatchLimits {
        max_texture_slots: max,
        ..requested
    }
}

/// Viewport size clamped to the target; a zero viewport means "whole target".
fn viewport_within(viewport: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    match viewport {
        (0, _) | (_, 0) => target,
        (w, h) => (w.min(target.0), h.min(target.1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_within_device_limit_are_kept() {
        let requested = BatchLimits::default();
        assert_eq!(negotiate_limits(requested, 32), requested);
        assert_eq!(negotiate_limits(requested, 64), requested);
    }

    #[test]
    fn slots_clamped_to_device_limit() {
        let limits = negotiate_limits(BatchLimits::default(), 16);
        assert_eq!(limits.max_texture_slots, 16);
        assert_eq!(limits.max_quads, BatchLimits::DEFAULT_MAX_QUADS);
    }

    #[test]
    fn first_pass_clears_depth_later_passes_load_it() {
        assert!(matches!(depth_load(false), wgpu::LoadOp::Clear(d) if d == DEPTH_CLEAR));
        assert!(matches!(depth_load(true), wgpu::LoadOp::Load));
    }

    #[test]
    fn depth_rebuilt_only_on_size_change() {
        assert!(depth_needs_rebuild(None, (800, 600)));
        assert!(!depth_needs_rebuild(Some((800, 600)), (800, 600)));
        assert!(depth_needs_rebuild(Some((800, 600)), (1024, 768)));
        assert!(!depth_needs_rebuild(Some((800, 600)), (0, 600)));
        assert!(!depth_needs_rebuild(None, (800, 0)));
    }

    #[test]
    fn viewport_never_exceeds_target() {
        assert_eq!(viewport_within((0, 0), (800, 600)), (800, 600));
        assert_eq!(viewport_within((640, 480), (800, 600)), (640, 480));
        assert_eq!(viewport_within((1920, 1080), (800, 600)), (800, 600));
    }
}
