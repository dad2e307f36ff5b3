use crate::coords::Size;
use crate::input::MouseButton;
use crate::scene::Scene;

use super::ctx::AppCtx;
use super::event::Event;

/// What the run-loop should do after an event was routed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Flow {
    Continue,
    /// The window was closed; stop after the current tick.
    Close,
}

/// Routes one event to the matching scene hook.
///
/// Window-level side effects (surface reconfigure, renderer viewport) are the
/// caller's job and happen before this is called.
pub fn dispatch<T, S>(scene: &mut S, ctx: &mut AppCtx<'_>, event: &Event) -> Flow
where
    S: Scene<T> + ?Sized,
{
    match event {
        Event::WindowClose => {
            scene.will_move(ctx);
            scene.window_closed(ctx);
            return Flow::Close;
        }
        Event::WindowResize { width, height } => {
            scene.window_resized(ctx, Size::new(*width as f32, *height as f32));
        }
        Event::WindowFocus => scene.window_focused(ctx),
        Event::WindowLostFocus => scene.window_lost_focus(ctx),
        Event::WindowMoved(p) => scene.window_moved(ctx, *p),

        Event::KeyPressed(e) if e.repeated => {}
        Event::KeyPressed(e) => scene.key_down(ctx, e),
        Event::KeyReleased(e) => scene.key_up(ctx, e),
        Event::KeyTyped(ch) => scene.key_typed(ctx, *ch),

        Event::MouseButtonPressed(e) => scene.mouse_down(ctx, e),
        Event::MouseButtonReleased(e) => scene.mouse_up(ctx, e),
        Event::MouseMoved(p) => {
            if ctx.is_mouse_button_pressed(MouseButton::Left) {
                scene.mouse_dragged(ctx, *p);
            } else {
                scene.mouse_moved(ctx, *p);
            }
        }
        Event::MouseScrolled(delta) => scene.mouse_scrolled(ctx, *delta),

        Event::ModifiersChanged(_) | Event::MouseLeft => {}
    }
    Flow::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Point;
    use crate::core::{KeyEvent, MouseButtonEvent, RunStats};
    use crate::input::{InputState, Key, Modifiers};
    use crate::scene::SceneState;

    struct Recorder {
        state: SceneState,
        log: Vec<String>,
    }

    impl Recorder {
        fn new() -> Self {
            Self { state: SceneState::new(Size::new(100.0, 100.0)), log: Vec::new() }
        }
    }

    impl Scene<()> for Recorder {
        fn state(&self) -> &SceneState {
            &self.state
        }
        fn state_mut(&mut self) -> &mut SceneState {
            &mut self.state
        }
        fn will_move(&mut self, _: &mut AppCtx<'_>) {
            self.log.push("will_move".into());
        }
        fn window_closed(&mut self, _: &mut AppCtx<'_>) {
            self.log.push("window_closed".into());
        }
        fn window_resized(&mut self, _: &mut AppCtx<'_>, size: Size) {
            self.log.push(format!("resized {}x{}", size.width, size.height));
        }
        fn key_down(&mut self, _: &mut AppCtx<'_>, e: &KeyEvent) {
            self.log.push(format!("key_down {}", e.key));
        }
        fn key_up(&mut self, _: &mut AppCtx<'_>, e: &KeyEvent) {
            self.log.push(format!("key_up {}", e.key));
        }
        fn key_typed(&mut self, _: &mut AppCtx<'_>, ch: char) {
            self.log.push(format!("typed {ch}"));
        }
        fn mouse_down(&mut self, _: &mut AppCtx<'_>, _: &MouseButtonEvent) {
            self.log.push("mouse_down".into());
        }
        fn mouse_moved(&mut self, _: &mut AppCtx<'_>, p: Point) {
            self.log.push(format!("moved {},{}", p.x, p.y));
        }
        fn mouse_dragged(&mut self, _: &mut AppCtx<'_>, p: Point) {
            self.log.push(format!("dragged {},{}", p.x, p.y));
        }
        fn window_lost_focus(&mut self, _: &mut AppCtx<'_>) {
            self.log.push("lost_focus".into());
        }
    }

    /// Applies `events` to the input state, then routes them like the run-loop.
    fn run(scene: &mut Recorder, input: &mut InputState, events: &[Event]) -> Vec<Flow> {
        let mut commands = Vec::new();
        events
            .iter()
            .map(|event| {
                input.apply_event(event);
                let mut ctx = AppCtx::new(input, None, &mut commands, RunStats::default(), 0.0);
                dispatch::<(), _>(scene, &mut ctx, event)
            })
            .collect()
    }

    fn key(key: Key, repeated: bool) -> KeyEvent {
        KeyEvent { key, code: 0, modifiers: Modifiers::default(), repeated }
    }

    #[test]
    fn close_moves_scene_out_and_stops() {
        let mut scene = Recorder::new();
        let flows = run(&mut scene, &mut InputState::default(), &[Event::WindowClose]);
        assert_eq!(flows, vec![Flow::Close]);
        assert_eq!(scene.log, ["will_move", "window_closed"]);
    }

    #[test]
    fn resize_reports_size_and_continues() {
        let mut scene = Recorder::new();
        let flows = run(
            &mut scene,
            &mut InputState::default(),
            &[Event::WindowResize { width: 800, height: 600 }],
        );
        assert_eq!(flows, vec![Flow::Continue]);
        assert_eq!(scene.log, ["resized 800x600"]);
    }

    #[test]
    fn key_repeats_are_suppressed() {
        let mut scene = Recorder::new();
        run(
            &mut scene,
            &mut InputState::default(),
            &[
                Event::KeyPressed(key(Key::W, false)),
                Event::KeyPressed(key(Key::W, true)),
                Event::KeyPressed(key(Key::W, true)),
                Event::KeyTyped('w'),
                Event::KeyReleased(key(Key::W, false)),
            ],
        );
        assert_eq!(scene.log, ["key_down W", "typed w", "key_up W"]);
    }

    #[test]
    fn move_becomes_drag_while_left_button_held() {
        let press = MouseButtonEvent {
            button: MouseButton::Left,
            position: Point::new(1.0, 1.0),
            modifiers: Modifiers::default(),
        };

        let mut scene = Recorder::new();
        run(
            &mut scene,
            &mut InputState::default(),
            &[
                Event::MouseMoved(Point::new(1.0, 1.0)),
                Event::MouseButtonPressed(press),
                Event::MouseMoved(Point::new(2.0, 3.0)),
                Event::MouseButtonReleased(press),
                Event::MouseMoved(Point::new(4.0, 4.0)),
            ],
        );
        assert_eq!(scene.log, ["moved 1,1", "mouse_down", "dragged 2,3", "moved 4,4"]);
    }

    #[test]
    fn right_button_does_not_drag() {
        let press = MouseButtonEvent {
            button: MouseButton::Right,
            position: Point::ZERO,
            modifiers: Modifiers::default(),
        };

        let mut scene = Recorder::new();
        run(
            &mut scene,
            &mut InputState::default(),
            &[Event::MouseButtonPressed(press), Event::MouseMoved(Point::new(5.0, 5.0))],
        );
        assert_eq!(scene.log, ["mouse_down", "moved 5,5"]);
    }

    #[test]
    fn focus_loss_ends_drag() {
        let press = MouseButtonEvent {
            button: MouseButton::Left,
            position: Point::ZERO,
            modifiers: Modifiers::default(),
        };

        let mut scene = Recorder::new();
        run(
            &mut scene,
            &mut InputState::default(),
            &[
                Event::MouseButtonPressed(press),
                Event::WindowLostFocus,
                Event::MouseMoved(Point::new(1.0, 0.0)),
            ],
        );
        assert_eq!(scene.log, ["mouse_down", "lost_focus", "moved 1,0"]);
    }
}
