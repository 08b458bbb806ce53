//! One simulation tick
//!
//! Stages run in a fixed order: player physics, player update (weapon and
//! bullet hits), enemy AI, then projectiles. An entity updated earlier in the
//! tick sees the positions left by the previous tick for anything updated
//! later; an enemy's bullet fired this tick reaches the player check next
//! tick at the earliest.

use super::combat;
use super::level::Level;
use super::physics;

/// What a tick reported back to the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// The resolver signalled the end of the level
    pub level_complete: bool,
    /// The player is alive after the tick
    pub player_alive: bool,
}

/// Advance the level by one fixed tick
pub fn tick(level: &mut Level) -> TickOutcome {
    let mut outcome = TickOutcome::default();

    if level.player_id().is_some() {
        outcome.level_complete = physics::step_player(level);
        combat::update_player(level);
    } else {
        log::warn!("Level {} has no player; skipping player stages", level.level_no);
    }

    combat::update_enemies(level);
    combat::update_bullets(level);

    outcome.player_alive = level.player().is_some_and(|(_, p)| p.is_alive());
    outcome
}
