use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use ouroboros::self_referencing;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Fullscreen, Window, WindowId};

use crate::core::{dispatch, AppCtx, Command, Event, EventQueue, Flow, RunStats};
use crate::device::{Gpu, SurfaceErrorAction};
use crate::input::platform::translate_window_event;
use crate::input::InputState;
use crate::render::{Renderer2D, Texture2D, WgpuBackend};
use crate::scene::Scene;
use crate::time::{FixedStep, FrameClock, RateCounter};

use super::AppConfig;

/// Entry point: opens the window and runs `scene` until it closes.
pub struct Application;

impl Application {
    pub fn run<S>(config: AppConfig, scene: S) -> Result<()>
    where
        S: Scene + 'static,
    {
        Self::run_boxed(config, Box::new(scene))
    }

    pub fn run_boxed(config: AppConfig, scene: Box<dyn Scene>) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, scene);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState {
    config: AppConfig,

    scene: Box<dyn Scene>,
    scene_attached: bool,

    entry: Option<WindowEntry>,
    renderer: Option<Renderer2D<WgpuBackend>>,

    input: InputState,
    events: EventQueue,
    commands: Vec<Command>,

    clock: FrameClock,
    fixed: FixedStep,
    rates: RateCounter,
    stats: RunStats,
    elapsed: f64,
    next_tick: Instant,

    minimized: bool,
    running: bool,
    fatal: Option<anyhow::Error>,
}

/// Builds the hook context from disjoint `AppState` fields.
fn app_ctx<'a>(
    input: &'a InputState,
    entry: Option<&'a WindowEntry>,
    commands: &'a mut Vec<Command>,
    stats: RunStats,
    elapsed: f64,
) -> AppCtx<'a> {
    let graphics = entry.map(|e| e.borrow_gpu().render_ctx());
    AppCtx::new(input, graphics, commands, stats, elapsed)
}

impl AppState {
    fn new(config: AppConfig, scene: Box<dyn Scene>) -> Self {
        let fixed = FixedStep::new(config.frames_per_second);
        Self {
            config,
            scene,
            scene_attached: false,
            entry: None,
            renderer: None,
            input: InputState::default(),
            events: EventQueue::new(),
            commands: Vec::new(),
            clock: FrameClock::new(),
            fixed,
            rates: RateCounter::default(),
            stats: RunStats::default(),
            elapsed: 0.0,
            next_tick: Instant::now(),
            minimized: false,
            running: true,
            fatal: None,
        }
    }

    fn fail(&mut self, err: anyhow::Error) {
        log::error!("{err:#}");
        self.fatal = Some(err);
        self.running = false;
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let mut attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.size);
        if self.config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.config.gpu_init();
        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")?;

        let gpu = entry.borrow_gpu();
        let size = gpu.size();
        let backend = WgpuBackend::new(&gpu.render_ctx(), self.config.batch);
        let mut renderer = Renderer2D::new(backend);
        renderer.did_resize(size.width, size.height);

        log::info!(
            "window '{}' created ({}x{} physical)",
            self.config.title,
            size.width,
            size.height
        );

        self.renderer = Some(renderer);
        self.entry = Some(entry);
        self.clock.reset();
        Ok(())
    }

    fn tick(&mut self) {
        let dt = self.clock.tick().dt;
        self.elapsed += dt as f64;
        self.fixed.accumulate(dt);

        if !self.scene_attached {
            let mut ctx = app_ctx(&self.input, self.entry.as_ref(), &mut self.commands, self.stats, self.elapsed);
            self.scene.did_move(&mut ctx);
            self.scene_attached = true;
        }

        self.drain_events();
        if !self.running {
            return;
        }

        {
            let mut ctx = app_ctx(&self.input, self.entry.as_ref(), &mut self.commands, self.stats, self.elapsed);
            self.scene.update(&mut ctx, dt);
            if let Some(step) = self.fixed.take_step() {
                self.scene.fixed_update(&mut ctx, step);
                self.rates.record_update();
            }
        }

        if self.should_render() && self.render_frame() {
            self.rates.record_frame();
        }

        if let Some(renderer) = self.renderer.as_mut() {
            renderer.reset_stats();
            self.stats.draw_calls = renderer.draw_calls();
            self.stats.quad_count = renderer.quad_count();
        }

        if let Some(rates) = self.rates.advance(dt) {
            self.stats = self.stats.with_rates(rates);
            if self.config.debug {
                if let Some(entry) = self.entry.as_ref() {
                    entry.borrow_window().set_title(&self.stats.debug_title());
                }
            }
        }

        self.apply_commands();
    }

    fn drain_events(&mut self) {
        while let Some(event) = self.events.pop() {
            self.input.apply_event(&event);

            if let Event::WindowResize { width, height } = event {
                self.minimized = width == 0 || height == 0;
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.did_resize(width, height);
                }
                if let Some(entry) = self.entry.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(PhysicalSize::new(width, height)));
                }
            }

            let mut ctx = app_ctx(&self.input, self.entry.as_ref(), &mut self.commands, self.stats, self.elapsed);
            if dispatch::<Texture2D, _>(self.scene.as_mut(), &mut ctx, &event) == Flow::Close {
                log::info!("window closed");
                self.running = false;
                self.events.clear();
                return;
            }
        }
    }

    /// Rendering is skipped while the window has a zero extent.
    fn should_render(&self) -> bool {
        !self.minimized
    }

    /// Renders and presents one frame. Returns false when the frame was skipped.
    fn render_frame(&mut self) -> bool {
        let (Some(entry), Some(renderer)) = (self.entry.as_mut(), self.renderer.as_mut()) else {
            return false;
        };

        let frame = match entry.borrow_gpu().begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                if entry.with_gpu_mut(|gpu| gpu.handle_surface_error(err)) == SurfaceErrorAction::Fatal {
                    self.fail(anyhow!("surface is out of memory"));
                }
                return false;
            }
        };

        let size = entry.borrow_gpu().size();
        renderer
            .backend_mut()
            .begin_frame(frame.view.clone(), size.width, size.height);
        renderer.render(self.scene.as_mut());
        renderer.backend_mut().finish_frame();

        entry.borrow_window().pre_present_notify();
        entry.borrow_gpu().present(frame);
        true
    }

    fn apply_commands(&mut self) {
        for command in std::mem::take(&mut self.commands) {
            match command {
                Command::Present(scene) => {
                    let mut ctx = app_ctx(&self.input, self.entry.as_ref(), &mut self.commands, self.stats, self.elapsed);
                    self.scene.will_move(&mut ctx);
                    self.scene = scene;
                    self.scene.did_move(&mut ctx);
                }
                Command::Close => {
                    if !self.running {
                        continue;
                    }
                    let mut ctx = app_ctx(&self.input, self.entry.as_ref(), &mut self.commands, self.stats, self.elapsed);
                    self.scene.will_move(&mut ctx);
                    self.scene.window_closed(&mut ctx);
                    self.running = false;
                    log::info!("application closed");
                }
                Command::SetTitle(title) => {
                    if let Some(entry) = self.entry.as_ref() {
                        entry.borrow_window().set_title(&title);
                    }
                }
                Command::SetFramesPerSecond(0) => {
                    log::warn!("ignoring request for 0 fixed updates per second");
                }
                Command::SetFramesPerSecond(fps) => self.fixed.set_rate(fps),
            }
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        if let Err(err) = self.create_window(event_loop) {
            self.fail(err);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(entry) = self.entry.as_ref() else {
            return;
        };
        translate_window_event(entry.borrow_window(), &self.input, &event, &mut self.events);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.running && self.entry.is_some() {
            let now = Instant::now();
            if now >= self.next_tick {
                self.tick();
                self.next_tick = now + self.config.tick_interval;
            }
        }

        if !self.running {
            event_loop.exit();
            return;
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_tick));
    }
}
