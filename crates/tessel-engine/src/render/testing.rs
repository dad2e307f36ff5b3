//! In-memory backend that records every GPU call the batch renderer makes.

use glam::Mat4;

use crate::paint::Color;

use super::backend::{BatchLimits, BatchTexture, RenderBackend, TextureId};
use super::vertex::QuadVertex;

#[derive(Debug)]
pub(crate) struct FakeTexture {
    id: TextureId,
}

impl FakeTexture {
    pub(crate) fn new() -> Self {
        Self { id: TextureId::next() }
    }
}

impl BatchTexture for FakeTexture {
    type Binding = TextureId;

    fn id(&self) -> TextureId {
        self.id
    }

    fn binding(&self) -> TextureId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    ViewProjection(Mat4),
    Clear(Color),
    Viewport(u32, u32),
    Upload(Vec<QuadVertex>),
    Bind { slot: usize, texture: TextureId },
    Draw(u32),
}

#[derive(Debug)]
pub(crate) struct RecordingBackend {
    limits: BatchLimits,
    white: FakeTexture,
    pub(crate) calls: Vec<Call>,
}

impl RecordingBackend {
    pub(crate) fn new(max_quads: usize, max_texture_slots: usize) -> Self {
        Self {
            limits: BatchLimits { max_quads, max_texture_slots },
            white: FakeTexture::new(),
            calls: Vec::new(),
        }
    }

    pub(crate) fn white_id(&self) -> TextureId {
        self.white.id
    }

    /// Index counts of every issued draw, in order.
    pub(crate) fn draws(&self) -> Vec<u32> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Draw(n) => Some(*n),
                _ => None,
            })
            .collect()
    }

    /// Every vertex upload, in order.
    pub(crate) fn uploads(&self) -> Vec<&[QuadVertex]> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Upload(v) => Some(v.as_slice()),
                _ => None,
            })
            .collect()
    }

    /// Slot bindings issued right before the `n`-th draw.
    pub(crate) fn bindings_for_draw(&self, n: usize) -> Vec<(usize, TextureId)> {
        let mut draw = 0;
        let mut bound = Vec::new();
        for call in &self.calls {
            match call {
                Call::Bind { slot, texture } => bound.push((*slot, *texture)),
                Call::Draw(_) if draw == n => return bound,
                Call::Draw(_) => {
                    draw += 1;
                    bound.clear();
                }
                _ => {}
            }
        }
        Vec::new()
    }
}

impl RenderBackend for RecordingBackend {
    type Texture = FakeTexture;

    fn limits(&self) -> BatchLimits {
        self.limits
    }

    fn white_texture(&self) -> &FakeTexture {
        &self.white
    }

    fn set_view_projection(&mut self, view_projection: &Mat4) {
        self.calls.push(Call::ViewProjection(*view_projection));
    }

    fn clear(&mut self, color: Color) {
        self.calls.push(Call::Clear(color));
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        self.calls.push(Call::Viewport(width, height));
    }

    fn upload_vertices(&mut self, vertices: &[QuadVertex]) {
        self.calls.push(Call::Upload(vertices.to_vec()));
    }

    fn bind_texture(&mut self, slot: usize, binding: &TextureId) {
        self.calls.push(Call::Bind { slot, texture: *binding });
    }

    fn draw_indexed(&mut self, index_count: u32) {
        self.calls.push(Call::Draw(index_count));
    }
}
