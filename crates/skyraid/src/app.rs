use anyhow::{Error, Result};
use skyraid_game::{InputState, SoundCue, World};
use skyraid_sdl2::sdl2::event::Event;
use skyraid_sdl2::sdl2::keyboard::{KeyboardState, Keycode, Scancode};
use skyraid_sdl2::sdl2::mixer::{Channel, Chunk, Music};
use skyraid_sdl2::sdl2::rect::{FPoint, FRect, Rect};
use skyraid_sdl2::sdl2::render::{TextureCreator, WindowCanvas};
use skyraid_sdl2::sdl2::video::WindowContext;
use skyraid_sdl2::App;

use crate::assets::Assets;

/// Background music volume, out of 128.
const MUSIC_VOLUME: i32 = 16;

/// Wires the simulation to the SDL2 frontend: input mapping, sound cue
/// playback and sprite drawing.
pub struct GameApp {
    world: World,
    assets: Option<Assets>,
    sounds: Vec<SoundCue>,
    should_exit: bool,
}

impl GameApp {
    pub fn new() -> Self {
        GameApp {
            world: World::new(),
            assets: None,
            sounds: Vec::new(),
            should_exit: false,
        }
    }

    fn play(&self, cue: SoundCue) {
        let Some(assets) = &self.assets else { return };
        let chunk = match cue {
            SoundCue::EnemyFire => &assets.enemy_fire,
            SoundCue::PlayerFire => &assets.player_fire,
            SoundCue::Explosion => &assets.explosion,
        };
        play_chunk(chunk);
    }
}

impl Default for GameApp {
    fn default() -> Self {
        Self::new()
    }
}

impl App for GameApp {
    fn init(&mut self, textures: &TextureCreator<WindowContext>) -> Result<()> {
        log::info!("loading assets");
        let assets = Assets::load(textures);
        if let Some(music) = &assets.music {
            if let Err(e) = music.play(-1) {
                log::warn!("failed to start music: {e}");
            }
            Music::set_volume(MUSIC_VOLUME);
        }
        self.assets = Some(assets);
        Ok(())
    }

    fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Quit { .. } => self.should_exit = true,
            Event::KeyDown {
                keycode: Some(Keycode::Escape),
                ..
            } => self.should_exit = true,
            // Releasing the fire key re-arms the one-shot-per-press gate.
            Event::KeyUp {
                keycode: Some(Keycode::Space),
                ..
            } => self.world.release_fire(),
            _ => {}
        }
    }

    fn update(&mut self, dt: f32, keys: &KeyboardState) {
        let input = InputState {
            up: keys.is_scancode_pressed(Scancode::W),
            down: keys.is_scancode_pressed(Scancode::S),
            left: keys.is_scancode_pressed(Scancode::A),
            right: keys.is_scancode_pressed(Scancode::D),
            fire: keys.is_scancode_pressed(Scancode::Space),
        };

        let mut sounds = std::mem::take(&mut self.sounds);
        sounds.clear();
        self.world.update(dt, &input, &mut sounds);
        for cue in &sounds {
            self.play(*cue);
        }
        self.sounds = sounds;
    }

    fn render(&mut self, canvas: &mut WindowCanvas) -> Result<()> {
        let Some(assets) = &self.assets else {
            return Ok(());
        };
        // Rotations pivot on the destination's top-left corner.
        let pivot = FPoint::new(0.0, 0.0);

        if let Some(background) = &assets.background {
            for tile in &self.world.background {
                canvas
                    .copy_f(background, src_rect(tile), dst_rect(tile))
                    .map_err(Error::msg)?;
            }
        }

        let Some(atlas) = &assets.sprites else {
            return Ok(());
        };

        let player = &self.world.player.sprite;
        canvas
            .copy_ex_f(
                atlas,
                src_rect(player),
                dst_rect(player),
                player.angle,
                pivot,
                false,
                false,
            )
            .map_err(Error::msg)?;

        for bullet in &self.world.player_bullets {
            let s = &bullet.sprite;
            canvas
                .copy_ex_f(atlas, src_rect(s), dst_rect(s), s.angle, pivot, false, false)
                .map_err(Error::msg)?;
        }

        for enemy in &self.world.enemies {
            let s = &enemy.sprite;
            canvas
                .copy_ex_f(atlas, src_rect(s), dst_rect(s), s.angle, pivot, false, false)
                .map_err(Error::msg)?;
        }

        for bullet in &self.world.enemy_bullets {
            let s = &bullet.sprite;
            canvas
                .copy_f(atlas, src_rect(s), dst_rect(s))
                .map_err(Error::msg)?;
        }

        Ok(())
    }

    fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn exit(&mut self) {
        log::info!("shutting down");
    }
}

fn src_rect(sprite: &skyraid_game::sprite::Sprite) -> Rect {
    let r = &sprite.src;
    Rect::new(r.x, r.y, r.w as u32, r.h as u32)
}

fn dst_rect(sprite: &skyraid_game::sprite::Sprite) -> FRect {
    let r = &sprite.dst;
    FRect::new(r.x, r.y, r.w, r.h)
}

fn play_chunk(chunk: &Option<Chunk>) {
    if let Some(chunk) = chunk {
        if let Err(e) = Channel::all().play(chunk, 0) {
            log::warn!("failed to play sound: {e}");
        }
    }
}
