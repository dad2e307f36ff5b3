use crate::render::backend::{BatchTexture, TextureId};
use crate::render::RenderCtx;

/// RGBA8 2D texture sampled by the quad pipeline.
///
/// The GPU texture is released when the value is dropped. Batches only hold
/// views, so dropping a texture between frames is safe.
pub struct Texture2D {
    id: TextureId,
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    queue: wgpu::Queue,
    width: u32,
    height: u32,
}

impl Texture2D {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    /// Creates an uninitialized `width × height` texture.
    pub fn new(ctx: &RenderCtx<'_>, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "texture size must be non-zero");

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("tessel texture2d"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            id: TextureId::next(),
            texture,
            view,
            queue: ctx.queue.clone(),
            width,
            height,
        }
    }

    /// Creates a texture and uploads tightly packed RGBA8 `data`.
    pub fn from_rgba8(ctx: &RenderCtx<'_>, width: u32, height: u32, data: &[u8]) -> Self {
        let texture = Self::new(ctx, width, height);
        texture.set_data(data);
        texture
    }

    /// Replaces the whole image. `data` must be exactly `width * height * 4`
    /// bytes of RGBA8.
    pub fn set_data(&self, data: &[u8]) {
        let expected = self.width as usize * self.height as usize * 4;
        assert_eq!(
            data.len(),
            expected,
            "texture data must be width * height * 4 bytes"
        );

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(self.width * 4),
                rows_per_image: Some(self.height),
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }
}

impl BatchTexture for Texture2D {
    type Binding = wgpu::TextureView;

    fn id(&self) -> TextureId {
        self.id
    }

    fn binding(&self) -> wgpu::TextureView {
        self.view.clone()
    }
}

impl std::fmt::Debug for Texture2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture2D")
            .field("id", &self.id)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}
