use std::sync::atomic::{AtomicU64, Ordering};

use glam::Mat4;

use crate::paint::Color;

use super::vertex::QuadVertex;

/// Process-unique texture identity.
///
/// Two handles refer to the same GPU texture iff their ids are equal; the
/// batch renderer uses this to reuse texture slots.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TextureId(u64);

impl TextureId {
    /// Allocates a fresh id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        TextureId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A texture that can occupy a batch slot.
///
/// `Binding` is the cheap, transient handle the slot table keeps until the
/// batch is flushed (a texture view for wgpu). The texture itself stays owned
/// by the caller.
pub trait BatchTexture {
    type Binding: Clone;

    fn id(&self) -> TextureId;

    fn binding(&self) -> Self::Binding;
}

/// Capacity limits of one batch.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BatchLimits {
    /// Quads per draw call.
    pub max_quads: usize,

    /// Texture slots per draw call, including the reserved white slot 0.
    pub max_texture_slots: usize,
}

impl BatchLimits {
    pub const DEFAULT_MAX_QUADS: usize = 500;
    pub const DEFAULT_MAX_TEXTURE_SLOTS: usize = 32;

    #[inline]
    pub fn max_vertices(&self) -> usize {
        self.max_quads * super::vertex::VERTICES_PER_QUAD
    }

    #[inline]
    pub fn max_indices(&self) -> usize {
        self.max_quads * super::vertex::INDICES_PER_QUAD
    }

    /// Panics when the limits cannot hold a single textured quad.
    pub fn validate(&self) {
        assert!(self.max_quads >= 1, "batch must hold at least one quad");
        assert!(
            self.max_texture_slots >= 2,
            "batch needs the white slot plus at least one texture slot, got {}",
            self.max_texture_slots
        );
        assert!(
            self.max_indices() <= u32::MAX as usize,
            "max_quads {} overflows 32-bit indices",
            self.max_quads
        );
    }
}

impl Default for BatchLimits {
    fn default() -> Self {
        Self {
            max_quads: Self::DEFAULT_MAX_QUADS,
            max_texture_slots: Self::DEFAULT_MAX_TEXTURE_SLOTS,
        }
    }
}

/// GPU seam consumed by [`super::Renderer2D`].
///
/// Implementations are synchronous from the renderer's point of view and are
/// not expected to fail; unrecoverable GPU errors abort inside the backend.
pub trait RenderBackend {
    type Texture: BatchTexture;

    /// Capacity the backend's buffers were created for.
    fn limits(&self) -> BatchLimits;

    /// The 1×1 opaque white texture bound permanently at slot 0.
    fn white_texture(&self) -> &Self::Texture;

    /// Binds the quad shader and uploads the per-scene view-projection uniform.
    fn set_view_projection(&mut self, view_projection: &Mat4);

    /// Clears the backbuffer to `color`.
    fn clear(&mut self, color: Color);

    /// Updates the viewport after a resize (physical pixels).
    fn set_viewport(&mut self, width: u32, height: u32);

    /// Uploads the written prefix of the scratch buffer, starting at offset 0.
    fn upload_vertices(&mut self, vertices: &[QuadVertex]);

    /// Binds `binding` to texture unit `slot` for the next draw.
    fn bind_texture(&mut self, slot: usize, binding: &<Self::Texture as BatchTexture>::Binding);

    /// Issues one indexed draw over the first `index_count` indices.
    fn draw_indexed(&mut self, index_count: u32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_ids_are_unique() {
        let a = TextureId::next();
        let b = TextureId::next();
        assert_ne!(a, b);
        assert!(b.get() > a.get());
    }

    #[test]
    fn default_limits() {
        let limits = BatchLimits::default();
        assert_eq!(limits.max_quads, 500);
        assert_eq!(limits.max_texture_slots, 32);
        assert_eq!(limits.max_vertices(), 2000);
        assert_eq!(limits.max_indices(), 3000);
        limits.validate();
    }

    #[test]
    #[should_panic(expected = "white slot")]
    fn single_slot_is_rejected() {
        BatchLimits { max_quads: 10, max_texture_slots: 1 }.validate();
    }
}
