/// Initialization parameters for the GPU layer.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    ///
    /// Off by default: colors and textures are authored in display space and
    /// blended without linearization.
    pub prefer_srgb: bool,

    /// Present mode. `Fifo` (vsync) is supported everywhere.
    pub present_mode: wgpu::PresentMode,

    /// Alpha mode preference; an unsupported choice falls back to the first
    /// supported mode.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,

    /// Baseline limits requested from the device.
    pub required_limits: wgpu::Limits,

    /// Sampled textures per shader stage to request on top of
    /// `required_limits`, capped at what the adapter supports. The batch
    /// renderer uses one per texture slot.
    pub sampled_textures: u32,

    /// Hint; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl GpuInit {
    /// Limits to request from an adapter that supports `adapter`.
    pub(crate) fn limits_for(&self, adapter: &wgpu::Limits) -> wgpu::Limits {
        let mut limits = self.required_limits.clone();
        limits.max_sampled_textures_per_shader_stage = limits
            .max_sampled_textures_per_shader_stage
            .max(self.sampled_textures.min(adapter.max_sampled_textures_per_shader_stage));
        limits
    }
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            sampled_textures: 32,
            desired_maximum_frame_latency: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter_with(max_textures: u32) -> wgpu::Limits {
        wgpu::Limits {
            max_sampled_textures_per_shader_stage: max_textures,
            ..wgpu::Limits::default()
        }
    }

    #[test]
    fn requests_extra_textures_when_adapter_allows() {
        let init = GpuInit::default();
        let limits = init.limits_for(&adapter_with(128));
        assert_eq!(limits.max_sampled_textures_per_shader_stage, 32);
    }

    #[test]
    fn never_requests_more_than_adapter_supports() {
        let init = GpuInit::default();
        let limits = init.limits_for(&adapter_with(24));
        assert_eq!(limits.max_sampled_textures_per_shader_stage, 24);
    }

    #[test]
    fn never_lowers_baseline() {
        let init = GpuInit { sampled_textures: 2, ..GpuInit::default() };
        let limits = init.limits_for(&adapter_with(128));
        assert_eq!(
            limits.max_sampled_textures_per_shader_stage,
            wgpu::Limits::default().max_sampled_textures_per_shader_stage
        );
    }
}
