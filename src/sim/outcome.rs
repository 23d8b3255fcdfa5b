//! Run outcome detection
//!
//! `Playing` is the only state with outgoing transitions. Failure conditions
//! are checked before the goal, so a tick that both dies and touches the goal
//! ends in `Over`.

use super::collision::box_overlaps_rect;
use super::level::LevelData;
use super::state::{FailureCause, Outcome, Player};
use crate::tuning::Tuning;

/// A terminal transition produced by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub outcome: Outcome,
    pub cause: Option<FailureCause>,
}

impl Transition {
    pub fn cleared() -> Self {
        Self {
            outcome: Outcome::Cleared,
            cause: None,
        }
    }

    pub fn over(cause: FailureCause) -> Self {
        Self {
            outcome: Outcome::Over,
            cause: Some(cause),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.outcome == Outcome::Over
    }
}

/// Dropped below the bottom of the world
pub fn fell_out(player: &Player, level: &LevelData, tuning: &Tuning) -> bool {
    player.pos.y > level.height + tuning.fall_margin
}

/// Over a pit and sunk to within `pit_margin` of ground level
pub fn in_pit(player: &Player, level: &LevelData, tuning: &Tuning) -> bool {
    player.pos.y >= level.ground_level - tuning.pit_margin
        && level.pits.iter().any(|pit| pit.contains(player.pos.x))
}

/// Player box overlaps the goal
pub fn reached_goal(player: &Player, level: &LevelData, tuning: &Tuning) -> bool {
    box_overlaps_rect(player.pos, tuning.player_half_extents(), &level.goal)
}

/// Decide this tick's transition, if any
pub fn check(
    current: Outcome,
    player: &Player,
    level: &LevelData,
    tuning: &Tuning,
    hazard_hit: bool,
) -> Option<Transition> {
    if current.is_terminal() {
        return None;
    }

    if hazard_hit {
        return Some(Transition::over(FailureCause::Hazard));
    }
    if fell_out(player, level, tuning) {
        return Some(Transition::over(FailureCause::FellOut));
    }
    if in_pit(player, level, tuning) {
        return Some(Transition::over(FailureCause::Pit));
    }
    if reached_goal(player, level, tuning) {
        return Some(Transition::cleared());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn player_at(x: f32, y: f32) -> Player {
        Player::new(Vec2::new(x, y))
    }

    #[test]
    fn test_goal_clears() {
        let level = LevelData::stellar();
        let tuning = Tuning::default();
        let player = player_at(3920.0, 552.0);

        assert_eq!(
            check(Outcome::Playing, &player, &level, &tuning, false),
            Some(Transition::cleared())
        );
    }

    #[test]
    fn test_terminal_states_do_not_transition() {
        let level = LevelData::stellar();
        let tuning = Tuning::default();
        let player = player_at(3920.0, 552.0);

        assert_eq!(check(Outcome::Cleared, &player, &level, &tuning, false), None);
        assert_eq!(check(Outcome::Over, &player, &level, &tuning, true), None);
    }

    #[test]
    fn test_pit_is_fatal_near_ground() {
        let level = LevelData::stellar();
        let tuning = Tuning::default();
        let pit = level.pits[0];

        let sinking = player_at(pit.x + 10.0, level.ground_level - 4.0);
        assert!(in_pit(&sinking, &level, &tuning));
        assert_eq!(
            check(Outcome::Playing, &sinking, &level, &tuning, false),
            Some(Transition::over(FailureCause::Pit))
        );

        // Jumping over the pit is safe
        let airborne = player_at(pit.x + 10.0, level.ground_level - 80.0);
        assert!(!in_pit(&airborne, &level, &tuning));

        // Right edge is exclusive
        let past = player_at(pit.x + pit.width, level.ground_level - 4.0);
        assert!(!in_pit(&past, &level, &tuning));
    }

    #[test]
    fn test_fall_out_of_world() {
        let level = LevelData::stellar();
        let tuning = Tuning::default();

        let below = player_at(500.0, level.height + tuning.fall_margin + 1.0);
        assert!(fell_out(&below, &level, &tuning));
        let standing = player_at(500.0, level.ground_level - 16.0);
        assert!(!fell_out(&standing, &level, &tuning));
    }

    #[test]
    fn test_failure_beats_goal() {
        let level = LevelData::stellar();
        let tuning = Tuning::default();
        let player = player_at(3920.0, 552.0);

        let transition = check(Outcome::Playing, &player, &level, &tuning, true).unwrap();
        assert!(transition.is_failure());
        assert_eq!(transition.cause, Some(FailureCause::Hazard));
    }
}
