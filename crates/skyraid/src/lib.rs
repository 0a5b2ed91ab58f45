pub mod app;
pub mod assets;

use anyhow::Result;
use skyraid_game::{SCREEN_HEIGHT, SCREEN_WIDTH};
use skyraid_sdl2::{SdlContext, SdlInitInfo};

pub const WINDOW_TITLE: &str = "Skyraid";

pub fn run() -> Result<()> {
    let app = app::GameApp::new();
    let init_info = SdlInitInfo::builder()
        .width(SCREEN_WIDTH as u32)
        .height(SCREEN_HEIGHT as u32)
        .title(WINDOW_TITLE.to_string())
        .build();
    SdlContext::run(init_info, app)
}
