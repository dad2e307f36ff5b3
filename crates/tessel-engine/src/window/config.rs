use std::time::Duration;

use winit::dpi::LogicalSize;

use crate::device::GpuInit;
use crate::render::BatchLimits;
use crate::time::FixedStep;

/// Application window and run-loop configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub size: LogicalSize<f64>,
    /// Borderless fullscreen on the current monitor.
    pub fullscreen: bool,
    pub vsync: bool,
    /// Write run statistics into the window title once per second.
    pub debug: bool,
    /// Fixed updates per second.
    pub frames_per_second: u32,
    /// Run-loop tick period.
    pub tick_interval: Duration,
    pub batch: BatchLimits,
    /// Base GPU parameters. Present mode and sampled texture count are
    /// derived from `vsync` and `batch` by [`AppConfig::gpu_init`].
    pub gpu: GpuInit,
}

impl AppConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.size = LogicalSize::new(width, height);
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_frames_per_second(mut self, fps: u32) -> Self {
        self.frames_per_second = fps;
        self
    }

    pub fn gpu_init(&self) -> GpuInit {
        GpuInit {
            present_mode: if self.vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            sampled_textures: self.batch.max_texture_slots as u32,
            ..self.gpu.clone()
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "tessel".to_string(),
            size: LogicalSize::new(1280.0, 720.0),
            fullscreen: false,
            vsync: true,
            debug: false,
            frames_per_second: FixedStep::DEFAULT_RATE,
            tick_interval: Duration::from_millis(1),
            batch: BatchLimits::default(),
            gpu: GpuInit::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.size, LogicalSize::new(1280.0, 720.0));
        assert_eq!(config.frames_per_second, 60);
        assert_eq!(config.tick_interval, Duration::from_millis(1));
        assert!(!config.debug);
    }

    #[test]
    fn gpu_init_follows_vsync_and_batch() {
        let mut config = AppConfig::new("demo").with_debug(true);
        config.vsync = false;
        config.batch.max_texture_slots = 8;

        let init = config.gpu_init();
        assert_eq!(init.present_mode, wgpu::PresentMode::AutoNoVsync);
        assert_eq!(init.sampled_textures, 8);
        assert_eq!(config.title, "demo");
    }
}
