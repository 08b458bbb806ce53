//! Tile Shooter entry point
//!
//! Headless driver: loads configuration and the start level, plays a scripted
//! input sequence at the configured frame rate, and renders every frame
//! through the camera into an off-screen surface.
//!
//! Usage: `tile-shooter [settings.json] [tuning.json] [frames]`

use std::path::PathBuf;

use anyhow::{Context, Result};

use tile_shooter::assets::{AssetBank, PlaceholderArt};
use tile_shooter::camera::ViewRect;
use tile_shooter::platform::{FrameClock, HeadlessWindow, InputEvent, Key, Present};
use tile_shooter::renderer::{Rgba, Surface, rasterize};
use tile_shooter::{Game, SessionPhase, Settings, Tuning};

/// Frames played when none are given on the command line
const DEMO_FRAMES: u64 = 600;

/// Inputs fed in at a given frame
fn scripted_input(frame: u64) -> &'static [InputEvent] {
    use InputEvent::*;
    match frame {
        0 => &[KeyDown(Key::Right)],
        45 => &[KeyDown(Key::Jump)],
        90 | 150 | 210 => &[KeyDown(Key::Shoot)],
        240 => &[KeyUp(Key::Right), KeyDown(Key::Left)],
        300 => &[KeyDown(Key::Jump)],
        360 => &[KeyUp(Key::Left)],
        _ => &[],
    }
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Tile Shooter (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings_path = PathBuf::from(args.next().unwrap_or_else(|| "settings.json".into()));
    let tuning_path = PathBuf::from(args.next().unwrap_or_else(|| "tuning.json".into()));
    let frames = match args.next() {
        Some(n) => n.parse().with_context(|| format!("invalid frame count {n:?}"))?,
        None => DEMO_FRAMES,
    };

    let settings = Settings::load_or_default(&settings_path)?;
    let tuning = Tuning::load_or_default(&tuning_path)?;
    let background = Rgba::from(settings.background);
    let mut clock = FrameClock::new(settings.fps);
    let mut window = HeadlessWindow::new(settings.screen_width, settings.screen_height, background);
    let screen = ViewRect::new(0, 0, settings.screen_width as i32, settings.screen_height as i32);

    let mut game = Game::new(settings, tuning).context("failed to load the start level")?;
    let mut bank = AssetBank::new(PlaceholderArt);
    let mut backscreen = new_backscreen(&game);
    let mut level_no = game.level_no();

    while game.running && clock.frames() < frames {
        for &event in scripted_input(clock.frames()) {
            game.handle_input(event);
        }

        game.tick()?;
        if game.level_no() != level_no {
            level_no = game.level_no();
            backscreen = new_backscreen(&game);
        }

        let frame = game.frame();
        rasterize(&mut backscreen, &frame, &mut bank, background)?;
        let view = game.camera.get_surface(&backscreen, frame.world, frame.local);
        window.present(&view, screen);
        log::trace!(
            "frame {}: {} sprites, view {}x{}",
            clock.frames(),
            frame.sprites.len(),
            view.width(),
            view.height()
        );

        match game.phase {
            SessionPhase::Playing => {}
            SessionPhase::GameOver => {
                log::info!("Player died at frame {}", clock.frames());
                break;
            }
            SessionPhase::Finished => {
                log::info!("Finished all levels at frame {}", clock.frames());
                break;
            }
        }
        clock.tick();
    }

    let registry = game.level.registry();
    match game.level.player() {
        Some((rect, player)) => log::info!(
            "Level {}: player at ({:.1}, {:.1}), health {}, ammo {}",
            game.level_no(),
            rect.left(),
            rect.top(),
            player.health,
            player.ammo
        ),
        None => log::info!("Level {}: no player", game.level_no()),
    }
    log::info!(
        "{} frames presented, {} enemies left, {} bullets in flight, {} assets loaded",
        window.presented(),
        registry.enemies.len(),
        registry.bullets.len(),
        bank.len()
    );
    Ok(())
}

/// Full-level backing surface for the current level
fn new_backscreen(game: &Game) -> Surface {
    let size = game.level.world_size();
    Surface::new(size.x as u32, size.y as u32, Rgba::TRANSPARENT)
}
