use crate::coords::Point;
use crate::input::{InputState, Key, MouseButton};
use crate::render::RenderCtx;
use crate::scene::Scene;
use crate::time::Rates;

/// Run statistics of the last full second.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct RunStats {
    /// Fixed updates per second.
    pub updates: u32,
    /// Frames rendered per second.
    pub frames: u32,
    /// Draw calls of the last rendered frame.
    pub draw_calls: usize,
    /// Quads of the last rendered frame.
    pub quad_count: usize,
}

impl RunStats {
    pub(crate) fn with_rates(self, rates: Rates) -> Self {
        Self {
            updates: rates.updates,
            frames: rates.frames,
            ..self
        }
    }

    /// Window title used in debug mode.
    pub fn debug_title(&self) -> String {
        format!(
            "UPS: {}, FPS: {}, drawCalls: {}, quadCount: {}",
            self.updates, self.frames, self.draw_calls, self.quad_count
        )
    }
}

/// Requests a scene makes of the runtime.
///
/// Buffered and applied after the current tick's work completes.
pub enum Command {
    Present(Box<dyn Scene>),
    Close,
    SetTitle(String),
    SetFramesPerSecond(u32),
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Present(_) => f.write_str("Present(..)"),
            Command::Close => f.write_str("Close"),
            Command::SetTitle(t) => f.debug_tuple("SetTitle").field(t).finish(),
            Command::SetFramesPerSecond(n) => f.debug_tuple("SetFramesPerSecond").field(n).finish(),
        }
    }
}

/// Context handed to every scene hook.
///
/// Gives read access to input and run statistics, GPU handles for creating
/// textures, and a command buffer for application-level requests.
pub struct AppCtx<'a> {
    input: &'a InputState,
    graphics: Option<RenderCtx<'a>>,
    commands: &'a mut Vec<Command>,
    stats: RunStats,
    elapsed: f64,
}

impl<'a> AppCtx<'a> {
    pub(crate) fn new(
        input: &'a InputState,
        graphics: Option<RenderCtx<'a>>,
        commands: &'a mut Vec<Command>,
        stats: RunStats,
        elapsed: f64,
    ) -> Self {
        Self {
            input,
            graphics,
            commands,
            stats,
            elapsed,
        }
    }

    pub fn input(&self) -> &InputState {
        self.input
    }

    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.input.is_key_pressed(key)
    }

    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.input.is_mouse_button_pressed(button)
    }

    pub fn mouse_position(&self) -> Point {
        self.input.mouse_position()
    }

    pub fn mouse_x(&self) -> f32 {
        self.mouse_position().x
    }

    pub fn mouse_y(&self) -> f32 {
        self.mouse_position().y
    }

    /// Device handles for creating GPU resources. `None` only when no GPU is
    /// attached (headless tests).
    pub fn graphics(&self) -> Option<&RenderCtx<'a>> {
        self.graphics.as_ref()
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Seconds since the run-loop started.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Replaces the presented scene at the start of the next tick.
    pub fn present<S: Scene + 'static>(&mut self, scene: S) {
        self.commands.push(Command::Present(Box::new(scene)));
    }

    /// Stops the run-loop after the current tick.
    pub fn close(&mut self) {
        self.commands.push(Command::Close);
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.commands.push(Command::SetTitle(title.into()));
    }

    /// Sets the number of fixed updates per second.
    pub fn set_frames_per_second(&mut self, fps: u32) {
        self.commands.push(Command::SetFramesPerSecond(fps));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Event, KeyEvent};
    use crate::input::Modifiers;

    #[test]
    fn queries_read_input_state() {
        let mut input = InputState::default();
        input.apply_event(&Event::KeyPressed(KeyEvent {
            key: Key::D,
            code: 0,
            modifiers: Modifiers::default(),
            repeated: false,
        }));
        input.apply_event(&Event::MouseMoved(Point::new(3.0, 4.0)));

        let mut commands = Vec::new();
        let ctx = AppCtx::new(&input, None, &mut commands, RunStats::default(), 0.0);
        assert!(ctx.is_key_pressed(Key::D));
        assert!(!ctx.is_key_pressed(Key::A));
        assert_eq!(ctx.mouse_x(), 3.0);
        assert_eq!(ctx.mouse_y(), 4.0);
        assert!(ctx.graphics().is_none());
    }

    #[test]
    fn commands_are_buffered_in_order() {
        let input = InputState::default();
        let mut commands = Vec::new();
        {
            let mut ctx = AppCtx::new(&input, None, &mut commands, RunStats::default(), 0.0);
            ctx.set_frames_per_second(144);
            ctx.set_title("hello");
            ctx.close();
        }
        assert!(matches!(commands[0], Command::SetFramesPerSecond(144)));
        assert!(matches!(&commands[1], Command::SetTitle(t) if t == "hello"));
        assert!(matches!(commands[2], Command::Close));
    }

    #[test]
    fn debug_title_format() {
        let stats = RunStats { updates: 144, frames: 998, draw_calls: 1, quad_count: 2 };
        assert_eq!(stats.debug_title(), "UPS: 144, FPS: 998, drawCalls: 1, quadCount: 2");

        let merged = stats.with_rates(Rates { updates: 60, frames: 120 });
        assert_eq!(merged.updates, 60);
        assert_eq!(merged.draw_calls, 1);
    }
}
