//! Game session
//!
//! Composition root of the core: owns the configuration, the live level, the
//! camera and the session phase, and turns input events and frame ticks into
//! simulation calls.

use crate::camera::Camera;
use crate::error::LoadError;
use crate::platform::{InputEvent, Key};
use crate::renderer::RenderFrame;
use crate::settings::Settings;
use crate::sim::{self, Level, TickOutcome, TileGrid};
use crate::tuning::Tuning;

/// Where the session is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Simulation running
    Playing,
    /// Player died; frozen until `restart`
    GameOver,
    /// Completed the last level
    Finished,
}

pub struct Game {
    pub settings: Settings,
    pub tuning: Tuning,
    pub level: Level,
    pub camera: Camera,
    pub phase: SessionPhase,
    /// Cleared by a quit request
    pub running: bool,
}

impl Game {
    /// Start a session on `settings.start_level`, read from `settings.level_dir`
    pub fn new(settings: Settings, tuning: Tuning) -> Result<Self, LoadError> {
        let level = load_level(&settings, &tuning, settings.start_level)?;
        Ok(Self::with_level(settings, tuning, level))
    }

    /// Start a session on an already-built level
    pub fn with_level(settings: Settings, tuning: Tuning, level: Level) -> Self {
        let camera = Camera::new(0, 0, settings.screen_width, settings.screen_height);
        let mut game = Self {
            settings,
            tuning,
            level,
            camera,
            phase: SessionPhase::Playing,
            running: true,
        };
        game.follow_player();
        game
    }

    pub fn level_no(&self) -> u32 {
        self.level.level_no
    }

    /// Apply one input event
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Quit | InputEvent::KeyDown(Key::Quit) => {
                log::info!("Quit requested");
                self.running = false;
                return;
            }
            _ => {}
        }
        if self.phase != SessionPhase::Playing {
            return;
        }

        let run_speed = self.tuning.run_speed;
        let jump_speed = self.tuning.jump_speed;
        let Some((_, player)) = self.level.player_mut() else {
            return;
        };
        match event {
            InputEvent::KeyDown(Key::Left) => {
                player.vel.x = -run_speed;
                player.direction = -1;
            }
            InputEvent::KeyDown(Key::Right) => {
                player.vel.x = run_speed;
                player.direction = 1;
            }
            InputEvent::KeyDown(Key::Jump) => player.jump(jump_speed),
            InputEvent::KeyDown(Key::Shoot) => player.shoot_requested = true,
            InputEvent::KeyUp(Key::Left | Key::Right) => player.vel.x = 0.0,
            _ => {}
        }
    }

    /// Run one frame of simulation.
    ///
    /// Loading the next level is the only fallible step.
    pub fn tick(&mut self) -> Result<TickOutcome, LoadError> {
        if self.phase != SessionPhase::Playing {
            return Ok(TickOutcome::default());
        }

        self.follow_player();
        let outcome = sim::tick(&mut self.level);

        if !outcome.player_alive {
            log::info!("Game over on level {}", self.level_no());
            self.phase = SessionPhase::GameOver;
        } else if outcome.level_complete {
            self.advance_level()?;
        }
        Ok(outcome)
    }

    /// Move on to the next level, or finish after the last one
    pub fn advance_level(&mut self) -> Result<(), LoadError> {
        let next = self.level_no() + 1;
        if next > self.settings.max_levels {
            log::info!("All {} levels complete", self.settings.max_levels);
            self.phase = SessionPhase::Finished;
            return Ok(());
        }
        self.level = load_level(&self.settings, &self.tuning, next)?;
        log::info!("Advanced to level {next}");
        self.phase = SessionPhase::Playing;
        self.follow_player();
        Ok(())
    }

    /// Repopulate the current level from its grid and resume play
    pub fn restart(&mut self) {
        log::info!("Restarting level {}", self.level_no());
        self.level.reset();
        self.phase = SessionPhase::Playing;
        self.follow_player();
    }

    /// Renderable snapshot of the current state
    pub fn frame(&self) -> RenderFrame {
        RenderFrame::capture(&self.level, &self.camera)
    }

    fn follow_player(&mut self) {
        if let Some((rect, _)) = self.level.player() {
            self.camera.follow(rect);
        }
    }
}

fn load_level(settings: &Settings, tuning: &Tuning, level_no: u32) -> Result<Level, LoadError> {
    let grid = TileGrid::load_path(&settings.level_path(level_no), settings.rows, settings.cols)?;
    Ok(Level::new(level_no, grid, tuning.clone()))
}
