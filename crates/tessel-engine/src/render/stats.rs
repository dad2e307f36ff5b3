use super::vertex::{INDICES_PER_QUAD, VERTICES_PER_QUAD};

/// Per-frame renderer counters.
///
/// Double-buffered: `draw_calls`/`quad_count` accumulate during the frame in
/// progress, the `last_frame_*` fields hold the totals of the last completed
/// frame. [`Statistics::reset`] rolls the current values over.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Statistics {
    pub draw_calls: usize,
    pub quad_count: usize,

    pub last_frame_draw_calls: usize,
    pub last_frame_quad_count: usize,
}

impl Statistics {
    #[inline]
    pub fn total_vertex_count(&self) -> usize {
        self.quad_count * VERTICES_PER_QUAD
    }

    #[inline]
    pub fn total_index_count(&self) -> usize {
        self.quad_count * INDICES_PER_QUAD
    }

    /// Publishes the current counts as last-frame totals and starts a new frame.
    pub fn reset(&mut self) {
        self.last_frame_draw_calls = self.draw_calls;
        self.last_frame_quad_count = self.quad_count;
        self.draw_calls = 0;
        self.quad_count = 0;
    }
}
