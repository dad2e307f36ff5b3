//! wgpu backend: quad pipeline, batch buffers and textures.

mod backend;
mod shader;
mod texture;

pub use backend::WgpuBackend;
pub use shader::{quad_shader_source, SHADER_LABEL};
pub use texture::Texture2D;
