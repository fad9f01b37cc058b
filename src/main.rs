use std::time::Duration;

use log::info;
use macroquad::prelude::*;

use crazy_blocks::{dispatch, Game, Renderer};

mod input;
mod render;
mod sound;

use input::Controls;
use render::BoardRenderer;
use sound::SfxPlayer;

fn window_conf() -> Conf {
    Conf {
        window_title: "Crazy Blocks".to_owned(),
        window_width: 720,
        window_height: 720,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut game = Game::from_os_rng();
    let mut sfx = SfxPlayer::open();
    let mut renderer = BoardRenderer::new();
    let mut controls = Controls::default();
    info!("started with {} as first piece", game.current().map_or("?", |p| p.template.name));

    loop {
        let dt = get_frame_time();

        if controls.mute_pressed() {
            sfx.toggle_mute();
        }
        for command in controls.poll(dt, !game.is_running()) {
            game.handle(command);
        }
        game.tick(Duration::from_secs_f32(dt));

        dispatch(game.drain_events(), &mut sfx, &mut renderer);
        renderer.draw(&game.frame());
        next_frame().await;
    }
}
