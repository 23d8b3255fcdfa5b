//! Per-frame simulation tick
//!
//! Pipeline: physics -> hazards -> fragments -> camera -> outcome. Once the
//! run leaves `Playing` the state is frozen and `tick` only clears the cue
//! list.

use super::input::ActionSet;
use super::outcome::{self, Transition};
use super::state::{Cue, GameState, Outcome};
use super::{camera, hazards, physics, pickup};
use crate::tuning::Tuning;

/// What one tick produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Audio cues, in emission order
    pub cues: Vec<Cue>,
    /// Fragments collected this tick
    pub collected: u32,
    /// Set on the tick the run ends
    pub transition: Option<Transition>,
}

/// Advance the game state by one tick using a captured action set
pub fn tick(state: &mut GameState, actions: ActionSet, tuning: &Tuning) -> TickReport {
    let mut report = TickReport::default();

    if state.outcome.is_terminal() {
        state.cues.clear();
        return report;
    }

    state.time_ticks += 1;

    // --- PHYSICS ---
    let physics = physics::step_player(&mut state.player, actions, &state.level.platforms, tuning);
    if physics.jumped {
        log::debug!("tick {}: jump from x={:.1}", state.time_ticks, state.player.pos.x);
        report.cues.push(Cue::Jump);
    }

    // --- HAZARDS ---
    hazards::advance(&mut state.hazards);
    let hazard = hazards::evaluate(&state.hazards, &mut state.player, tuning);

    // --- FRAGMENTS ---
    let picked = pickup::collect_fragments(&mut state.fragments, state.player.pos, tuning.pickup_radius);
    for &i in &picked {
        log::debug!("tick {}: collected fragment {}", state.time_ticks, i);
        report.cues.push(Cue::Collect);
    }
    report.collected = picked.len() as u32;
    if state.scoreboard.award(report.collected, tuning.fragment_score) {
        log::debug!(
            "tick {}: all {} fragments collected",
            state.time_ticks,
            state.fragments.len()
        );
    }

    // --- CAMERA ---
    let was_scrolled = state.camera.x > 0.0;
    camera::follow(&mut state.camera, state.player.pos.x);
    if !was_scrolled && state.camera.x > 0.0 {
        log::debug!("tick {}: camera engaged at x={:.1}", state.time_ticks, state.camera.x);
    }

    // --- OUTCOME ---
    if let Some(transition) = outcome::check(
        state.outcome,
        &state.player,
        &state.level,
        tuning,
        hazard.fatal.is_some(),
    ) {
        state.outcome = transition.outcome;
        state.failure = transition.cause;
        report.cues.push(match transition.outcome {
            Outcome::Cleared => Cue::Goal,
            _ => Cue::GameOver,
        });
        report.transition = Some(transition);
    }

    state.cues.clone_from(&report.cues);
    report
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glam::Vec2;

    use super::*;
    use crate::settings::Settings;
    use crate::sim::collision::Rect;
    use crate::sim::level::{LevelData, Platform, PlatformKind};
    use crate::sim::state::{FailureCause, GravityWell, Hazard, PatrolHazard};

    /// Single long ground platform, goal far away, nothing else
    fn flat_level() -> LevelData {
        LevelData {
            name: "flat".to_string(),
            width: 4000.0,
            height: 600.0,
            ground_level: 568.0,
            player_start: Vec2::new(50.0, 468.0),
            platforms: vec![Platform::new(0.0, 568.0, 4000.0, 32.0, PlatformKind::Ground)],
            pits: Vec::new(),
            fragments: Vec::new(),
            hazards: Vec::new(),
            goal: Rect::new(3920.0, 468.0, 50.0, 100.0),
        }
    }

    fn new_state(level: LevelData) -> GameState {
        GameState::new(Arc::new(level), &Tuning::default(), &Settings::default())
    }

    #[test]
    fn test_settles_without_input() {
        let tuning = Tuning::default();
        let mut state = new_state(flat_level());

        for _ in 0..30 {
            tick(&mut state, ActionSet::empty(), &tuning);
        }

        assert_eq!(state.player.pos.y, 568.0 - tuning.player_half_height);
        assert!(state.player.grounded);
        assert_eq!(state.player.vel.y, 0.0);
        assert_eq!(state.outcome, Outcome::Playing);
        assert_eq!(state.time_ticks, 30);
    }

    #[test]
    fn test_goal_contact_clears_once() {
        let tuning = Tuning::default();
        let mut state = new_state(flat_level());
        state.player.pos = Vec2::new(3920.0, 552.0);

        let first = tick(&mut state, ActionSet::empty(), &tuning);
        assert_eq!(first.transition, Some(Transition::cleared()));
        assert_eq!(first.cues, vec![Cue::Goal]);
        assert_eq!(state.outcome, Outcome::Cleared);

        // Still overlapping the goal: frozen, nothing re-fires
        let frozen = state.player;
        for _ in 0..10 {
            let report = tick(&mut state, ActionSet::MOVE_RIGHT, &tuning);
            assert_eq!(report, TickReport::default());
        }
        assert_eq!(state.player, frozen);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_terminal_cue_is_not_replayed_while_frozen() {
        let tuning = Tuning::default();
        let mut state = new_state(flat_level());
        state.player.pos = Vec2::new(3920.0, 552.0);

        tick(&mut state, ActionSet::empty(), &tuning);
        assert_eq!(state.cues, vec![Cue::Goal]);

        for _ in 0..5 {
            tick(&mut state, ActionSet::JUMP, &tuning);
            assert!(state.cues.is_empty());
        }
    }

    #[test]
    fn test_pit_fall_ends_run() {
        let tuning = Tuning::default();
        let mut level = flat_level();
        level.platforms = vec![
            Platform::new(0.0, 568.0, 300.0, 32.0, PlatformKind::Ground),
            Platform::new(380.0, 568.0, 3620.0, 32.0, PlatformKind::Ground),
        ];
        level.pits = vec![crate::sim::level::Pit { x: 300.0, width: 80.0 }];
        let mut state = new_state(level);
        state.player = crate::sim::state::Player {
            pos: Vec2::new(340.0, 540.0),
            vel: Vec2::ZERO,
            grounded: false,
        };

        let mut last = TickReport::default();
        for _ in 0..20 {
            last = tick(&mut state, ActionSet::empty(), &tuning);
            if last.transition.is_some() {
                break;
            }
        }

        assert_eq!(state.outcome, Outcome::Over);
        assert_eq!(state.failure, Some(FailureCause::Pit));
        assert_eq!(last.cues, vec![Cue::GameOver]);
    }

    #[test]
    fn test_patrol_contact_ends_run() {
        let tuning = Tuning::default();
        let mut level = flat_level();
        level.hazards = vec![Hazard::Patrol(PatrolHazard {
            pos: Vec2::new(120.0, 540.0),
            vx: -2.0,
            half_extents: Vec2::splat(14.0),
            min_x: 60.0,
            max_x: 300.0,
        })];
        let mut state = new_state(level);

        for _ in 0..60 {
            tick(&mut state, ActionSet::empty(), &tuning);
        }

        assert_eq!(state.outcome, Outcome::Over);
        assert_eq!(state.failure, Some(FailureCause::Hazard));
    }

    #[test]
    fn test_well_pull_lags_one_tick() {
        let tuning = Tuning::default();
        let mut level = flat_level();
        level.hazards = vec![Hazard::GravityWell(GravityWell {
            pos: Vec2::new(150.0, 552.0),
            pull_radius: 120.0,
            kill_radius: 10.0,
            half_extents: Vec2::splat(24.0),
        })];
        let mut state = new_state(level);
        state.player.pos = Vec2::new(100.0, 552.0);
        state.player.grounded = true;

        tick(&mut state, ActionSet::empty(), &tuning);
        // Position moved by friction-only velocity (zero); pull is now in vel
        assert_eq!(state.player.pos.x, 100.0);
        assert!(state.player.vel.x > 0.0);

        tick(&mut state, ActionSet::empty(), &tuning);
        assert!(state.player.pos.x > 100.0);
    }

    #[test]
    fn test_collect_cue_and_perfect() {
        let tuning = Tuning::default();
        let mut level = flat_level();
        level.fragments = vec![Vec2::new(60.0, 552.0), Vec2::new(70.0, 540.0)];
        let mut state = new_state(level);
        state.player.pos = Vec2::new(60.0, 552.0);
        state.player.grounded = true;

        let report = tick(&mut state, ActionSet::empty(), &tuning);

        assert_eq!(report.collected, 2);
        assert_eq!(report.cues, vec![Cue::Collect, Cue::Collect]);
        assert_eq!(state.score(), 2 * tuning.fragment_score);
        assert!(state.scoreboard.perfect);
        assert_eq!(state.cues, report.cues);

        let report = tick(&mut state, ActionSet::empty(), &tuning);
        assert_eq!(report.collected, 0);
        assert_eq!(state.score(), 2 * tuning.fragment_score);
    }

    #[test]
    fn test_jump_cue() {
        let tuning = Tuning::default();
        let mut state = new_state(flat_level());
        for _ in 0..30 {
            tick(&mut state, ActionSet::empty(), &tuning);
        }

        let report = tick(&mut state, ActionSet::JUMP, &tuning);
        assert_eq!(report.cues, vec![Cue::Jump]);

        // Held jump while airborne: no repeat
        let report = tick(&mut state, ActionSet::JUMP, &tuning);
        assert!(report.cues.is_empty());
    }

    #[test]
    fn test_determinism() {
        let tuning = Tuning::default();
        let mut a = new_state(LevelData::stellar());
        let mut b = new_state(LevelData::stellar());

        let inputs = [
            ActionSet::MOVE_RIGHT,
            ActionSet::MOVE_RIGHT | ActionSet::JUMP,
            ActionSet::empty(),
            ActionSet::MOVE_LEFT,
        ];

        for i in 0..400 {
            let input = inputs[(i / 7) % inputs.len()];
            tick(&mut a, input, &tuning);
            tick(&mut b, input, &tuning);
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.player, b.player);
        assert_eq!(a.hazards, b.hazards);
        assert_eq!(a.fragments, b.fragments);
        assert_eq!(a.camera, b.camera);
        assert_eq!(a.outcome, b.outcome);
    }
}
