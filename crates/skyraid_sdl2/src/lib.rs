use std::time::Instant;

use anyhow::{Error, Result};
use sdl2::event::Event;
use sdl2::image::Sdl2ImageContext;
use sdl2::keyboard::KeyboardState;
use sdl2::mixer::Sdl2MixerContext;
use sdl2::pixels::Color;
use sdl2::render::{TextureCreator, WindowCanvas};
use sdl2::video::WindowContext;
use sdl2::AudioSubsystem;
use typed_builder::TypedBuilder;

pub use sdl2;

/// The game driven by the SDL2 run loop.
///
/// The loop owns the window, canvas and event pump; the app owns everything
/// else. Each frame: every pending event is forwarded, `update` runs with the
/// elapsed real time and current keyboard state, then `render` draws onto an
/// already-cleared canvas. A quit request still finishes the current frame;
/// the loop exits before the next one.
pub trait App {
    /// One-time setup after the window and audio device exist. Textures must
    /// be created through `textures`.
    fn init(&mut self, textures: &TextureCreator<WindowContext>) -> Result<()>;
    fn handle_event(&mut self, event: &Event);
    fn update(&mut self, dt: f32, keys: &KeyboardState);
    fn render(&mut self, canvas: &mut WindowCanvas) -> Result<()>;
    fn should_exit(&self) -> bool;
    fn exit(&mut self);
}

#[derive(TypedBuilder)]
pub struct SdlInitInfo {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

pub struct SdlContext {
    pub sdl_context: sdl2::Sdl,
    pub event_pump: sdl2::EventPump,
    pub canvas: WindowCanvas,
    _audio: AudioSubsystem,
    _image: Sdl2ImageContext,
    _mixer: Sdl2MixerContext,
}

impl SdlContext {
    /// Acquire every SDL resource in dependency order. Any failure here is
    /// fatal; resources already acquired are released again by drop order.
    fn init(info: &SdlInitInfo) -> Result<Self> {
        let sdl_context = sdl2::init().map_err(Error::msg)?;
        let video_subsystem = sdl_context.video().map_err(Error::msg)?;
        let _image = sdl2::image::init(sdl2::image::InitFlag::PNG).map_err(Error::msg)?;

        let window = video_subsystem
            .window(&info.title, info.width, info.height)
            .position_centered()
            .build()?;
        let canvas = window.into_canvas().accelerated().present_vsync().build()?;
        log::info!("window and renderer created");

        let _audio = sdl_context.audio().map_err(Error::msg)?;
        sdl2::mixer::open_audio(
            sdl2::mixer::DEFAULT_FREQUENCY,
            sdl2::mixer::DEFAULT_FORMAT,
            sdl2::mixer::DEFAULT_CHANNELS,
            1_024,
        )
        .map_err(Error::msg)?;
        let _mixer = sdl2::mixer::init(sdl2::mixer::InitFlag::MP3).map_err(Error::msg)?;
        log::info!("audio device opened");

        let event_pump = sdl_context.event_pump().map_err(Error::msg)?;

        Ok(SdlContext {
            sdl_context,
            event_pump,
            canvas,
            _audio,
            _image,
            _mixer,
        })
    }

    pub fn run(info: SdlInitInfo, mut app: impl App) -> Result<()> {
        let mut ctx = Self::init(&info)?;

        // Textures created with the unsafe_textures feature carry no lifetime,
        // so the app can own them past this borrow.
        let texture_creator = ctx.canvas.texture_creator();
        app.init(&texture_creator)?;

        let mut last_frame = Instant::now();
        loop {
            for event in ctx.event_pump.poll_iter() {
                app.handle_event(&event);
            }

            let now = Instant::now();
            let dt = now.duration_since(last_frame).as_secs_f32();
            last_frame = now;
            app.update(dt, &ctx.event_pump.keyboard_state());

            ctx.canvas.set_draw_color(Color::RGB(0, 0, 0));
            ctx.canvas.clear();
            app.render(&mut ctx.canvas)?;
            ctx.canvas.present();

            if app.should_exit() {
                app.exit();
                break;
            }
        }

        sdl2::mixer::close_audio();
        Ok(())
    }
}
