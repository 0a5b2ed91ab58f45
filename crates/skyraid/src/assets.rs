use log::warn;
use skyraid_sdl2::sdl2::image::LoadTexture;
use skyraid_sdl2::sdl2::mixer::{Chunk, Music};
use skyraid_sdl2::sdl2::render::{Texture, TextureCreator};
use skyraid_sdl2::sdl2::video::WindowContext;

pub const BACKGROUND_IMAGE: &str = "assets/images/background.png";
pub const SPRITES_IMAGE: &str = "assets/images/sprites.png";
pub const GAME_MUSIC: &str = "assets/audio/game.mp3";
pub const ENEMY_FIRE_SOUND: &str = "assets/audio/enemy.wav";
pub const PLAYER_FIRE_SOUND: &str = "assets/audio/laser.wav";
pub const EXPLOSION_SOUND: &str = "assets/audio/explode.wav";

/// Media loaded once at startup. Every handle is optional: a missing file is
/// logged and the game runs without it, silently or with blank sprites.
///
/// Paths are relative to the working directory; we expect to be run from the
/// workspace root so that these assets can be found.
pub struct Assets {
    pub background: Option<Texture>,
    pub sprites: Option<Texture>,
    pub music: Option<Music<'static>>,
    pub enemy_fire: Option<Chunk>,
    pub player_fire: Option<Chunk>,
    pub explosion: Option<Chunk>,
}

impl Assets {
    pub fn load(textures: &TextureCreator<WindowContext>) -> Self {
        Assets {
            background: load_texture(textures, BACKGROUND_IMAGE),
            sprites: load_texture(textures, SPRITES_IMAGE),
            music: load_music(GAME_MUSIC),
            enemy_fire: load_chunk(ENEMY_FIRE_SOUND),
            player_fire: load_chunk(PLAYER_FIRE_SOUND),
            explosion: load_chunk(EXPLOSION_SOUND),
        }
    }
}

fn load_texture(textures: &TextureCreator<WindowContext>, path: &str) -> Option<Texture> {
    match textures.load_texture(path) {
        Ok(texture) => Some(texture),
        Err(e) => {
            warn!("failed to load texture {path}: {e}");
            None
        }
    }
}

fn load_music(path: &str) -> Option<Music<'static>> {
    match Music::from_file(path) {
        Ok(music) => Some(music),
        Err(e) => {
            warn!("failed to load music {path}: {e}");
            None
        }
    }
}

fn load_chunk(path: &str) -> Option<Chunk> {
    match Chunk::from_file(path) {
        Ok(chunk) => Some(chunk),
        Err(e) => {
            warn!("failed to load sound {path}: {e}");
            None
        }
    }
}
