use glam::Mat4;

use crate::paint::Color;
use crate::scene::Scene;

use super::backend::{BatchLimits, BatchTexture, RenderBackend, TextureId};
use super::camera::OrthographicCamera;
use super::renderer::{Renderer, TextureStyle};
use super::stats::Statistics;
use super::vertex::{self, QuadVertex, INDICES_PER_QUAD, VERTICES_PER_QUAD};

type Binding<B> = <<B as RenderBackend>::Texture as BatchTexture>::Binding;

/// Slot reserved for the backend's white texture.
const WHITE_SLOT: usize = 0;

#[derive(Debug, Clone)]
struct TextureSlot<T> {
    id: TextureId,
    binding: T,
}

/// Batching quad renderer.
///
/// Draw calls issued between [`begin_scene`](Self::begin_scene) and
/// [`end_scene`](Self::end_scene) are appended to a fixed-capacity scratch
/// buffer and submitted as few indexed draws as the two batch limits allow:
/// - at most `max_quads` quads per draw
/// - at most `max_texture_slots` distinct textures per draw (slot 0 is the
///   white texture used by solid-color quads)
///
/// Hitting either limit flushes the pending batch and starts a new one; callers
/// never flush manually.
///
/// Texture slot lookup is a linear scan over the occupied slots. The slot count
/// is small (32 by default) so this stays cheaper than a hash lookup.
pub struct Renderer2D<B: RenderBackend> {
    backend: B,
    limits: BatchLimits,

    vertices: Box<[QuadVertex]>,
    vertex_cursor: usize,
    index_count: usize,

    texture_slots: Vec<Option<TextureSlot<Binding<B>>>>,
    slot_cursor: usize,

    clear_color: Color,
    stats: Statistics,
}

impl<B: RenderBackend> Renderer2D<B> {
    /// Allocates the scratch buffer and slot table for the backend's limits.
    ///
    /// Panics if the limits cannot hold one textured quad.
    pub fn new(backend: B) -> Self {
        let limits = backend.limits();
        limits.validate();

        let white = backend.white_texture();
        let mut texture_slots = vec![None; limits.max_texture_slots];
        texture_slots[WHITE_SLOT] = Some(TextureSlot {
            id: white.id(),
            binding: white.binding(),
        });

        log::info!(
            "Renderer2D: {} quads / {} texture slots per batch",
            limits.max_quads,
            limits.max_texture_slots
        );

        Self {
            backend,
            limits,
            vertices: vertex::scratch_buffer(limits.max_quads),
            vertex_cursor: 0,
            index_count: 0,
            texture_slots,
            slot_cursor: WHITE_SLOT + 1,
            clear_color: Color::BLACK,
            stats: Statistics::default(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn limits(&self) -> BatchLimits {
        self.limits
    }

    /// Indices pending in the current batch.
    pub fn index_count(&self) -> usize {
        self.index_count
    }

    /// Vertices written to the scratch buffer for the current batch.
    pub fn vertex_count(&self) -> usize {
        self.vertex_cursor
    }

    /// Occupied texture slots in the current batch, white slot included.
    pub fn texture_slot_count(&self) -> usize {
        self.slot_cursor
    }

    /// Renders one frame of `scene`: clear, begin, scene draw hook, end.
    pub fn render<S>(&mut self, scene: &mut S)
    where
        S: Scene<B::Texture> + ?Sized,
    {
        let state = scene.state();
        self.clear(state.background_color);
        self.begin_scene(state.active_camera());
        scene.render(self);
        self.end_scene();
    }

    /// Uploads the camera transform and starts an empty batch.
    pub fn begin_scene(&mut self, camera: &OrthographicCamera) {
        self.backend.set_view_projection(&camera.view_projection());
        self.reset_batch();
    }

    /// Uploads the written part of the scratch buffer and flushes it.
    pub fn end_scene(&mut self) {
        self.backend.upload_vertices(&self.vertices[..self.vertex_cursor]);
        self.flush();
    }

    /// Issues one draw for the pending batch. No-op when nothing was drawn.
    pub fn flush(&mut self) {
        if self.index_count == 0 {
            return;
        }

        for (slot, entry) in self.texture_slots[..self.slot_cursor].iter().enumerate() {
            if let Some(entry) = entry {
                self.backend.bind_texture(slot, &entry.binding);
            }
        }

        self.backend.draw_indexed(self.index_count as u32);
        self.stats.draw_calls += 1;
    }

    /// Sets the clear color and clears the backbuffer with it.
    pub fn clear(&mut self, color: Color) {
        self.set_clear_color(color);
        self.backend.clear(color);
    }

    /// Sets the color used by the next [`clear`](Self::clear) of the frame.
    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    /// Propagates a backbuffer resize to the backend viewport.
    pub fn did_resize(&mut self, width: u32, height: u32) {
        self.backend.set_viewport(width, height);
    }

    /// Draw calls of the last completed frame.
    pub fn draw_calls(&self) -> usize {
        self.stats.last_frame_draw_calls
    }

    /// Quads of the last completed frame.
    pub fn quad_count(&self) -> usize {
        self.stats.last_frame_quad_count
    }

    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    /// Closes the frame's statistics. Call once per frame after rendering.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    fn reset_batch(&mut self) {
        self.index_count = 0;
        self.vertex_cursor = 0;
        for slot in &mut self.texture_slots[WHITE_SLOT + 1..self.slot_cursor] {
            *slot = None;
        }
        self.slot_cursor = WHITE_SLOT + 1;
    }

    fn flush_and_reset(&mut self) {
        log::trace!(
            "Renderer2D: batch full ({} indices, {} slots), flushing",
            self.index_count,
            self.slot_cursor
        );
        self.end_scene();
        self.reset_batch();
    }

    fn ensure_quad_capacity(&mut self) {
        if self.index_count >= self.limits.max_indices() {
            self.flush_and_reset();
        }
    }

    /// Returns the slot holding `texture`, assigning a new one if needed.
    fn texture_slot(&mut self, texture: &B::Texture) -> usize {
        let id = texture.id();
        let found = (WHITE_SLOT + 1..self.slot_cursor)
            .find(|&i| self.texture_slots[i].as_ref().is_some_and(|s| s.id == id));
        if let Some(slot) = found {
            return slot;
        }

        if self.slot_cursor >= self.limits.max_texture_slots {
            self.flush_and_reset();
        }

        let slot = self.slot_cursor;
        self.texture_slots[slot] = Some(TextureSlot {
            id,
            binding: texture.binding(),
        });
        self.slot_cursor += 1;
        slot
    }

    fn push_quad(
        &mut self,
        transform: Mat4,
        color: Color,
        slot: usize,
        tiling_factor: f32,
        color_blend_factor: f32,
    ) {
        let transform = transform.to_cols_array();
        let color = color.to_array();
        let end = self.vertex_cursor + VERTICES_PER_QUAD;

        for v in &mut self.vertices[self.vertex_cursor..end] {
            v.color = color;
            v.tex_index = slot as f32;
            v.tiling_factor = tiling_factor;
            v.color_blend_factor = color_blend_factor;
            v.transform = transform;
        }

        self.vertex_cursor = end;
        self.index_count += INDICES_PER_QUAD;
        self.stats.quad_count += 1;
    }
}

impl<B: RenderBackend> Renderer for Renderer2D<B> {
    type Texture = B::Texture;

    fn draw_quad(&mut self, transform: Mat4, color: Color) {
        self.ensure_quad_capacity();
        self.push_quad(transform, color, WHITE_SLOT, 1.0, 0.0);
    }

    fn draw_textured_quad(&mut self, transform: Mat4, texture: &B::Texture, style: TextureStyle) {
        self.ensure_quad_capacity();
        let slot = self.texture_slot(texture);
        self.push_quad(
            transform,
            style.tint,
            slot,
            style.tiling_factor,
            style.color_blend_factor,
        );
    }
}
