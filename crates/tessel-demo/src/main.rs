use glam::Vec3;

use tessel_engine::coords::{Point, Size};
use tessel_engine::input::Key;
use tessel_engine::logging::{init_logging, LoggingConfig};
use tessel_engine::paint::Color;
use tessel_engine::render::{OrthographicCamera, RenderCtx, Renderer, Texture2D};
use tessel_engine::scene::{Scene, SceneState};
use tessel_engine::{AppConfig, AppCtx, Application, KeyEvent};

/// Sprite speed in scene units per second.
const SPEED: f32 = 500.0;

/// Fraction of the remaining distance the camera closes per second.
const CAMERA_FOLLOW: f32 = 3.0;

const QUAD_SIZE: Size = Size::new(300.0, 300.0);

struct TestScene {
    state: SceneState,
    square_position: Point,
    z_rotation: f32,
    texture: Option<Texture2D>,
}

impl TestScene {
    fn new(size: Size) -> Self {
        Self {
            state: SceneState::new(size),
            square_position: Point::ZERO,
            z_rotation: 0.0,
            texture: None,
        }
    }
}

impl Scene for TestScene {
    fn state(&self) -> &SceneState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SceneState {
        &mut self.state
    }

    fn did_move(&mut self, ctx: &mut AppCtx<'_>) {
        let size = self.state.size();
        self.state
            .set_camera(Some(OrthographicCamera::with_size(size.width, size.height)));

        if let Some(gfx) = ctx.graphics() {
            self.texture = Some(checkerboard(gfx, 64, 8));
        } else {
            log::warn!("no GPU attached; sprite disabled");
        }
    }

    fn update(&mut self, ctx: &mut AppCtx<'_>, dt: f32) {
        let mut velocity = Point::ZERO;
        if ctx.is_key_pressed(Key::W) {
            velocity.y += 1.0;
        }
        if ctx.is_key_pressed(Key::S) {
            velocity.y -= 1.0;
        }
        if ctx.is_key_pressed(Key::D) {
            velocity.x += 1.0;
        }
        if ctx.is_key_pressed(Key::A) {
            velocity.x -= 1.0;
        }
        self.square_position = self.square_position + velocity.normalized_or_zero() * (SPEED * dt);

        let target = self.square_position;
        if let Some(camera) = self.state.camera_mut() {
            let pos = camera.position();
            let goal = Vec3::new(target.x, target.y, pos.z);
            camera.set_position(pos + (goal - pos) * (CAMERA_FOLLOW * dt));
        }

        self.z_rotation += dt;
    }

    fn key_down(&mut self, ctx: &mut AppCtx<'_>, event: &KeyEvent) {
        if event.key == Key::Escape {
            ctx.close();
        }
    }

    fn window_resized(&mut self, _ctx: &mut AppCtx<'_>, size: Size) {
        // Minimized windows report a zero extent; keep the last usable projection.
        if size.is_valid() {
            self.state.set_size(size);
        }
    }

    fn render(&mut self, renderer: &mut dyn Renderer<Texture = Texture2D>) {
        renderer.draw_rect(Point::ZERO, 0.8, QUAD_SIZE, Color::rgb(0.0, 1.0, 0.4));

        if let Some(texture) = self.texture.as_ref() {
            renderer.draw_sprite(self.square_position, 0.9, self.z_rotation, QUAD_SIZE, texture);
        }
    }
}

/// `size × size` texture of `cells × cells` alternating squares.
fn checkerboard(gfx: &RenderCtx<'_>, size: u32, cells: u32) -> Texture2D {
    let cell = (size / cells).max(1);
    let light = [0xf2, 0xc1, 0x4e, 0xff];
    let dark = [0x3b, 0x2f, 0x6e, 0xff];

    let mut data = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let texel = if (x / cell + y / cell) % 2 == 0 { light } else { dark };
            data.extend_from_slice(&texel);
        }
    }
    Texture2D::from_rgba8(gfx, size, size, &data)
}

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let config = AppConfig::new("Tessel Demo")
        .with_size(1280.0, 720.0)
        .with_debug(true)
        .with_frames_per_second(144);

    let scene = TestScene::new(Size::new(1280.0, 720.0));
    Application::run(config, scene)
}
