//! GPU rendering subsystem.
//!
//! [`Renderer2D`] batches quads into as few draw calls as its limits allow and
//! hands them to a [`RenderBackend`]. [`WgpuBackend`] is the GPU
//! implementation; tests drive the renderer with an in-memory backend.
//!
//! Convention:
//! - world space is y-up; the active camera maps it to clip space
//! - quads are unit squares centered on their origin, placed by a model
//!   transform
//! - layering follows `z`: a depth buffer (`Less`, cleared each frame) keeps
//!   higher-`z` quads in front regardless of submission or flush order

mod backend;
mod batch;
mod camera;
mod ctx;
mod gpu;
mod renderer;
mod stats;
mod vertex;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{BatchLimits, BatchTexture, RenderBackend, TextureId};
pub use batch::Renderer2D;
pub use camera::{OrthoBounds, OrthographicCamera};
pub use ctx::RenderCtx;
pub use gpu::{quad_shader_source, Texture2D, WgpuBackend, SHADER_LABEL};
pub use renderer::{quad_transform, Renderer, TextureStyle};
pub use stats::Statistics;
pub use vertex::{quad_indices, QuadVertex, INDICES_PER_QUAD, VERTICES_PER_QUAD};
