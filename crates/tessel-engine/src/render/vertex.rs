//! Quad vertex record and the fixed quad geometry shared by every batch.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::paint::Color;

/// One vertex of a batched quad.
///
/// Field order and types match the quad pipeline's vertex attributes
/// byte-for-byte (locations 0..=9, see [`QuadVertex::layout`]).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub tex_coord: [f32; 2],
    pub tex_index: f32,
    pub tiling_factor: f32,
    pub color_blend_factor: f32,
    /// Column-major model transform.
    pub transform: [f32; 16],
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 10] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x4, // color
        2 => Float32x2, // tex_coord
        3 => Float32,   // tex_index
        4 => Float32,   // tiling_factor
        5 => Float32,   // color_blend_factor
        6 => Float32x4, // transform col 0
        7 => Float32x4, // transform col 1
        8 => Float32x4, // transform col 2
        9 => Float32x4  // transform col 3
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }

    /// Template vertex for corner `corner` (0..4) of the unit quad.
    pub(crate) fn template(corner: usize) -> Self {
        Self {
            position: QUAD_POSITIONS[corner],
            color: Color::WHITE.to_array(),
            tex_coord: QUAD_TEX_COORDS[corner],
            tex_index: 0.0,
            tiling_factor: 1.0,
            color_blend_factor: 0.0,
            transform: Mat4::IDENTITY.to_cols_array(),
        }
    }
}

/// Vertices written per quad.
pub const VERTICES_PER_QUAD: usize = 4;

/// Indices consumed per quad (two triangles).
pub const INDICES_PER_QUAD: usize = 6;

/// Local-space corners: bottom-left, bottom-right, top-right, top-left.
pub const QUAD_POSITIONS: [[f32; 3]; VERTICES_PER_QUAD] = [
    [-0.5, -0.5, 0.0],
    [0.5, -0.5, 0.0],
    [0.5, 0.5, 0.0],
    [-0.5, 0.5, 0.0],
];

pub const QUAD_TEX_COORDS: [[f32; 2]; VERTICES_PER_QUAD] =
    [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

const QUAD_INDEX_PATTERN: [u32; INDICES_PER_QUAD] = [0, 1, 2, 2, 3, 0];

/// Builds the static index list for `max_quads` quads.
///
/// Each quad repeats `{0, 1, 2, 2, 3, 0}` offset by 4 per quad.
pub fn quad_indices(max_quads: usize) -> Vec<u32> {
    let mut indices = Vec::with_capacity(max_quads * INDICES_PER_QUAD);
    for quad in 0..max_quads {
        let base = (quad * VERTICES_PER_QUAD) as u32;
        indices.extend(QUAD_INDEX_PATTERN.iter().map(|i| base + i));
    }
    indices
}

/// Allocates a scratch buffer for `max_quads` quads, pre-filled with the
/// template positions and texture coordinates.
pub(crate) fn scratch_buffer(max_quads: usize) -> Box<[QuadVertex]> {
    (0..max_quads * VERTICES_PER_QUAD)
        .map(|i| QuadVertex::template(i % VERTICES_PER_QUAD))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{offset_of, size_of};

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(size_of::<QuadVertex>(), 112);
        assert_eq!(offset_of!(QuadVertex, color), 12);
        assert_eq!(offset_of!(QuadVertex, tex_coord), 28);
        assert_eq!(offset_of!(QuadVertex, tex_index), 36);
        assert_eq!(offset_of!(QuadVertex, tiling_factor), 40);
        assert_eq!(offset_of!(QuadVertex, color_blend_factor), 44);
        assert_eq!(offset_of!(QuadVertex, transform), 48);
    }

    #[test]
    fn layout_offsets_match_struct() {
        let layout = QuadVertex::layout();
        assert_eq!(layout.array_stride, 112);
        let offsets: Vec<u64> = layout.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 28, 36, 40, 44, 48, 64, 80, 96]);
    }

    #[test]
    fn indices_repeat_pattern_with_offset() {
        let indices = quad_indices(3);
        assert_eq!(indices.len(), 18);
        assert_eq!(&indices[..6], &[0, 1, 2, 2, 3, 0]);
        assert_eq!(&indices[6..12], &[4, 5, 6, 6, 7, 4]);
        assert_eq!(&indices[12..], &[8, 9, 10, 10, 11, 8]);
    }

    #[test]
    fn scratch_buffer_cycles_corner_template() {
        let buf = scratch_buffer(2);
        assert_eq!(buf.len(), 8);
        for (i, v) in buf.iter().enumerate() {
            assert_eq!(v.position, QUAD_POSITIONS[i % 4]);
            assert_eq!(v.tex_coord, QUAD_TEX_COORDS[i % 4]);
        }
    }
}
