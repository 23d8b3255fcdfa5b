//! Stellar Run entry point
//!
//! Headless native host: loads a level, drives the engine with an autopilot
//! and records the result on the local high score board.
//!
//! Usage: `stellar-run [level.json]` (defaults to the built-in stellar level).
//! Set `RUST_LOG=debug` to see jumps and pickups.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use stellar_run::consts::SIM_DT;
use stellar_run::sim::{ActionSet, GameState, Hazard, LevelData, tick};
use stellar_run::{Completion, Engine, HighScores, Tuning};

/// Give up after two minutes of simulated frames
const MAX_FRAMES: u32 = 60 * 120;
/// How far ahead (px) the reflex looks for a pit edge
const PIT_LOOKAHEAD: f32 = 48.0;
/// How far ahead (px) the reflex looks for a patrolling hazard
const HAZARD_LOOKAHEAD: f32 = 90.0;
/// Ticks a candidate action is held before a rollout hands over to the reflex
const PLAN_HOLD: u32 = 8;
/// Rollout length (ticks)
const PLAN_HORIZON: u32 = 120;

/// Run right and hop over whatever is coming
fn reflex(state: &GameState) -> ActionSet {
    let player = &state.player;
    let mut actions = ActionSet::MOVE_RIGHT;

    if !player.grounded {
        return actions;
    }

    let pit_ahead = state.level.pits.iter().any(|pit| {
        let gap = pit.x - player.pos.x;
        (0.0..PIT_LOOKAHEAD).contains(&gap)
    });

    let hazard_ahead = state.hazards.iter().any(|hazard| match hazard {
        Hazard::Patrol(patrol) => {
            let gap = patrol.pos.x - player.pos.x;
            (0.0..HAZARD_LOOKAHEAD).contains(&gap) && (patrol.pos.y - player.pos.y).abs() < 64.0
        }
        Hazard::GravityWell(well) => {
            let gap = well.pos.x - player.pos.x;
            (0.0..well.pull_radius).contains(&gap) && (well.pos.y - player.pos.y).abs() < 64.0
        }
    });

    if pit_ahead || hazard_ahead {
        actions |= ActionSet::JUMP;
    }
    actions
}

/// Simulate a copy of the run: `first` held for `PLAN_HOLD` ticks (or the
/// reflex throughout when `None`), then the reflex. Higher is better.
fn rollout(state: &GameState, first: Option<ActionSet>, tuning: &Tuning) -> f32 {
    let mut sim = state.clone();
    for t in 0..PLAN_HORIZON {
        let actions = match first {
            Some(held) if t < PLAN_HOLD => held,
            _ => reflex(&sim),
        };
        if let Some(transition) = tick(&mut sim, actions, tuning).transition {
            // Dying later beats dying sooner; clearing sooner beats clearing later
            return if transition.is_failure() {
                t as f32 - 1.0e6
            } else {
                1.0e6 - t as f32
            };
        }
    }
    sim.player.pos.x
}

/// Demo AI: try a handful of short plans against the deterministic sim and
/// take the first action of the best one
fn autopilot(state: &GameState, tuning: &Tuning) -> ActionSet {
    let candidates = [
        None,
        Some(ActionSet::MOVE_RIGHT),
        Some(ActionSet::MOVE_RIGHT | ActionSet::JUMP),
        Some(ActionSet::empty()),
        Some(ActionSet::MOVE_LEFT),
    ];

    let mut best = (f32::MIN, reflex(state));
    for candidate in candidates {
        let score = rollout(state, candidate, tuning);
        if score > best.0 {
            best = (score, candidate.unwrap_or_else(|| reflex(state)));
        }
    }
    best.1
}

fn high_scores_path() -> PathBuf {
    std::env::temp_dir().join("stellar-run-highscores.json")
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn run() -> i32 {
    let level = match std::env::args().nth(1) {
        Some(path) => match LevelData::load(&path) {
            Ok(level) => level,
            Err(e) => {
                log::error!("Failed to load level {}: {}", path, e);
                return 1;
            }
        },
        None => LevelData::stellar(),
    };

    let mut engine = Engine::default();
    let result: Rc<RefCell<Option<Completion>>> = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&result);
    engine.set_completion_callback(move |completion| {
        *sink.borrow_mut() = Some(completion);
    });
    engine.set_cue_callback(|cue| log::debug!("cue: {}", cue.as_str()));

    let input = engine.input_handle();
    engine.start(level);

    let mut frames = 0;
    while result.borrow().is_none() && frames < MAX_FRAMES {
        if let Some(state) = engine.state() {
            input.replace(autopilot(state, engine.tuning()));
        }
        engine.advance(SIM_DT);
        frames += 1;
    }

    let finished = *result.borrow();
    let Some(completion) = finished else {
        log::warn!("Autopilot gave up after {} frames", frames);
        engine.stop();
        return 2;
    };

    let ticks = engine.state().map_or(0, |s| s.time_ticks);
    log::info!(
        "{} after {} ticks: score {}{}",
        if completion.is_failure { "Game over" } else { "Level cleared" },
        ticks,
        completion.score,
        if completion.perfect { " (perfect)" } else { "" }
    );

    let path = high_scores_path();
    let mut scores = HighScores::load(&path);
    let record = scores.is_new_record(completion.score);
    if let Some(rank) = scores.submit(&completion, now_secs()) {
        log::info!("High score rank #{}{}", rank, if record { " (new record)" } else { "" });
        if let Err(e) = scores.save(&path) {
            log::error!("Failed to save high scores to {}: {}", path.display(), e);
        }
    }

    0
}

fn main() {
    env_logger::init();
    log::info!("Stellar Run (headless) starting...");
    std::process::exit(run());
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glam::Vec2;
    use stellar_run::Settings;
    use stellar_run::sim::Outcome;

    use super::*;

    fn stellar_state() -> GameState {
        GameState::new(
            Arc::new(LevelData::stellar()),
            &Tuning::default(),
            &Settings::default(),
        )
    }

    #[test]
    fn test_reflex_jumps_at_pit_edge() {
        let mut state = stellar_state();
        state.player.pos = Vec2::new(870.0, 552.0);
        state.player.grounded = true;
        assert!(reflex(&state).contains(ActionSet::JUMP));

        state.player.pos.x = 500.0;
        assert_eq!(reflex(&state), ActionSet::MOVE_RIGHT);

        // Airborne: keep running, never queue a jump
        state.player.pos.x = 870.0;
        state.player.grounded = false;
        assert_eq!(reflex(&state), ActionSet::MOVE_RIGHT);
    }

    #[test]
    fn test_autopilot_crosses_first_pit() {
        let tuning = Tuning::default();
        let mut state = stellar_state();

        for _ in 0..400 {
            if state.player.pos.x > 1000.0 {
                break;
            }
            let actions = autopilot(&state, &tuning);
            tick(&mut state, actions, &tuning);
        }

        assert_eq!(state.outcome, Outcome::Playing);
        assert!(state.player.pos.x > 1000.0);
    }

    #[test]
    fn test_rollout_ranks_death_below_survival() {
        let tuning = Tuning::default();
        let mut state = stellar_state();
        state.player.pos = Vec2::new(880.0, 552.0);
        state.player.vel = Vec2::new(5.0, 0.0);
        state.player.grounded = true;

        let walk_in = rollout(&state, Some(ActionSet::MOVE_RIGHT), &tuning);
        let hop = rollout(&state, Some(ActionSet::MOVE_RIGHT | ActionSet::JUMP), &tuning);
        assert!(walk_in < 0.0);
        assert!(hop > walk_in);
    }
}
