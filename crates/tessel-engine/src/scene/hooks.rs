use crate::coords::{Point, Size};
use crate::core::{AppCtx, KeyEvent, MouseButtonEvent};
use crate::render::{Renderer, Texture2D};

use super::SceneState;

/// A screen of the application.
///
/// Every hook has an empty default body; implement only what the scene
/// reacts to. `T` is the texture type the scene draws with and only differs
/// from [`Texture2D`] in headless tests.
pub trait Scene<T = Texture2D> {
    fn state(&self) -> &SceneState;

    fn state_mut(&mut self) -> &mut SceneState;

    /// The scene became the presented scene.
    fn did_move(&mut self, ctx: &mut AppCtx<'_>) {
        let _ = ctx;
    }

    /// The scene is about to stop being presented (replacement or shutdown).
    fn will_move(&mut self, ctx: &mut AppCtx<'_>) {
        let _ = ctx;
    }

    /// Called once per tick with the wall time since the previous tick.
    fn update(&mut self, ctx: &mut AppCtx<'_>, dt: f32) {
        let _ = (ctx, dt);
    }

    /// Called at most once per tick with the fixed step length.
    fn fixed_update(&mut self, ctx: &mut AppCtx<'_>, dt: f32) {
        let _ = (ctx, dt);
    }

    /// Issues the scene's draw calls. The camera is already bound.
    fn render(&mut self, renderer: &mut dyn Renderer<Texture = T>) {
        let _ = renderer;
    }

    fn key_down(&mut self, ctx: &mut AppCtx<'_>, event: &KeyEvent) {
        let _ = (ctx, event);
    }

    fn key_up(&mut self, ctx: &mut AppCtx<'_>, event: &KeyEvent) {
        let _ = (ctx, event);
    }

    /// Committed text input, one character at a time.
    fn key_typed(&mut self, ctx: &mut AppCtx<'_>, ch: char) {
        let _ = (ctx, ch);
    }

    fn mouse_down(&mut self, ctx: &mut AppCtx<'_>, event: &MouseButtonEvent) {
        let _ = (ctx, event);
    }

    fn mouse_up(&mut self, ctx: &mut AppCtx<'_>, event: &MouseButtonEvent) {
        let _ = (ctx, event);
    }

    /// Pointer moved with the left button up. Logical pixels, top-left origin.
    fn mouse_moved(&mut self, ctx: &mut AppCtx<'_>, position: Point) {
        let _ = (ctx, position);
    }

    /// Pointer moved with the left button held.
    fn mouse_dragged(&mut self, ctx: &mut AppCtx<'_>, position: Point) {
        let _ = (ctx, position);
    }

    fn mouse_scrolled(&mut self, ctx: &mut AppCtx<'_>, delta: Point) {
        let _ = (ctx, delta);
    }

    fn window_closed(&mut self, ctx: &mut AppCtx<'_>) {
        let _ = ctx;
    }

    /// Backbuffer size changed. `size` is in physical pixels and is zero
    /// while the window is minimized.
    fn window_resized(&mut self, ctx: &mut AppCtx<'_>, size: Size) {
        let _ = (ctx, size);
    }

    fn window_focused(&mut self, ctx: &mut AppCtx<'_>) {
        let _ = ctx;
    }

    fn window_lost_focus(&mut self, ctx: &mut AppCtx<'_>) {
        let _ = ctx;
    }

    fn window_moved(&mut self, ctx: &mut AppCtx<'_>, position: Point) {
        let _ = (ctx, position);
    }
}
