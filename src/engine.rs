//! Engine instance driven by the host
//!
//! The host owns one `Engine` per play session and drives it from its frame
//! loop. The engine owns the run state, reads input through an `InputHandle`,
//! forwards audio cues, and reports the end of a run through a completion
//! callback after a configurable delay. Nothing here is global, so any number
//! of engines can coexist (tests create many).

use std::sync::Arc;

use crate::settings::{Settings, Timestep};
use crate::sim::{self, Cue, GameState, InputHandle, LevelData, Outcome, TickReport};
use crate::tuning::Tuning;

/// Final result of a run, handed to the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub score: u64,
    /// True for `Over`, false for `Cleared`
    pub is_failure: bool,
    /// Every fragment was collected
    pub perfect: bool,
}

type CompletionCallback = Box<dyn FnMut(Completion)>;
type CueCallback = Box<dyn FnMut(Cue)>;

/// Completion waiting for its delay to run out
#[derive(Debug, Clone, Copy)]
struct PendingCompletion {
    completion: Completion,
    ticks_left: u32,
}

/// Simulation engine
///
/// Dropping the engine drops any pending completion with it, so a callback
/// can never fire into a torn-down session.
pub struct Engine {
    settings: Settings,
    tuning: Tuning,
    input: InputHandle,
    level: Option<Arc<LevelData>>,
    state: Option<GameState>,
    running: bool,
    pending: Option<PendingCompletion>,
    on_complete: Option<CompletionCallback>,
    on_cue: Option<CueCallback>,
    /// Unsimulated frame time in `Timestep::Fixed` mode (seconds)
    accumulator: f32,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Settings::default(), Tuning::default())
    }
}

impl Engine {
    /// Invalid settings are replaced by the defaults so the engine always ticks
    pub fn new(settings: Settings, tuning: Tuning) -> Self {
        let settings = match settings.validate() {
            Ok(()) => settings,
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Settings::default()
            }
        };
        Self {
            settings,
            tuning,
            input: InputHandle::new(),
            level: None,
            state: None,
            running: false,
            pending: None,
            on_complete: None,
            on_cue: None,
            accumulator: 0.0,
        }
    }

    /// Handle for the host's input layer; clones share the engine's slot
    pub fn input_handle(&self) -> InputHandle {
        self.input.clone()
    }

    /// Called at most once per run with the final result
    pub fn set_completion_callback(&mut self, callback: impl FnMut(Completion) + 'static) {
        self.on_complete = Some(Box::new(callback));
    }

    /// Called for every audio cue, in emission order
    pub fn set_cue_callback(&mut self, callback: impl FnMut(Cue) + 'static) {
        self.on_cue = Some(Box::new(callback));
    }

    /// Load a level and begin a fresh run
    pub fn start(&mut self, level: impl Into<Arc<LevelData>>) {
        let level = level.into();
        log::info!(
            "Starting level '{}' ({} platforms, {} fragments, {} hazards, {} timestep)",
            level.name,
            level.platforms.len(),
            level.fragments.len(),
            level.hazards.len(),
            self.settings.timestep.as_str()
        );
        self.level = Some(level);
        self.begin_run();
    }

    /// Restart the current level from scratch. Returns false if no level
    /// has been started.
    pub fn reset(&mut self) -> bool {
        if self.level.is_none() {
            log::warn!("reset() called before start()");
            return false;
        }
        log::info!("Restarting level");
        self.begin_run();
        true
    }

    /// Halt ticking and cancel any pending completion. The last state stays
    /// readable; `reset` or `start` resumes.
    pub fn stop(&mut self) {
        self.cancel_pending("engine stopped");
        if self.running {
            log::info!("Engine stopped");
        }
        self.running = false;
        self.accumulator = 0.0;
    }

    fn begin_run(&mut self) {
        self.cancel_pending("run restarted");
        self.state = self
            .level
            .as_ref()
            .map(|level| GameState::new(Arc::clone(level), &self.tuning, &self.settings));
        self.running = self.state.is_some();
        self.accumulator = 0.0;
    }

    fn cancel_pending(&mut self, reason: &str) {
        if let Some(pending) = self.pending.take() {
            log::warn!(
                "Cancelled pending completion (score {}, failure {}): {}",
                pending.completion.score,
                pending.completion.is_failure,
                reason
            );
        }
    }

    /// Run exactly one simulation tick using the input captured now.
    ///
    /// Returns `None` when the engine has no level or has been stopped.
    pub fn tick(&mut self) -> Option<TickReport> {
        let Some(state) = self.state.as_mut() else {
            log::warn!("tick() called before start()");
            return None;
        };
        if !self.running {
            return None;
        }

        let actions = self.input.snapshot();
        let report = sim::tick(state, actions, &self.tuning);

        if let Some(on_cue) = self.on_cue.as_mut() {
            for &cue in &report.cues {
                on_cue(cue);
            }
        }

        if let Some(transition) = report.transition {
            let completion = Completion {
                score: state.score(),
                is_failure: transition.is_failure(),
                perfect: state.scoreboard.perfect,
            };
            match transition.cause {
                Some(cause) => log::info!(
                    "Game over at tick {}: {} (score {})",
                    state.time_ticks,
                    cause.as_str(),
                    completion.score
                ),
                None => log::info!(
                    "Level cleared at tick {} (score {}, {}/{} fragments)",
                    state.time_ticks,
                    completion.score,
                    state.collected_count(),
                    state.fragments.len()
                ),
            }
            self.pending = Some(PendingCompletion {
                completion,
                ticks_left: self.settings.completion_delay_ticks,
            });
        }

        self.poll_completion();
        Some(report)
    }

    /// Count down the pending completion and fire it when due
    fn poll_completion(&mut self) {
        let due = match self.pending.as_mut() {
            Some(pending) if pending.ticks_left == 0 => true,
            Some(pending) => {
                pending.ticks_left -= 1;
                false
            }
            None => false,
        };
        if !due {
            return;
        }

        if let Some(pending) = self.pending.take() {
            log::info!(
                "Run complete: score {}, failure {}, perfect {}",
                pending.completion.score,
                pending.completion.is_failure,
                pending.completion.perfect
            );
            if let Some(on_complete) = self.on_complete.as_mut() {
                on_complete(pending.completion);
            }
        }
    }

    /// Drive the engine from a host frame of `frame_dt` seconds.
    ///
    /// `PerFrame` runs one tick regardless of `frame_dt`; `Fixed` runs as many
    /// fixed-rate ticks as the accumulated time allows. Returns ticks run.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        match self.settings.timestep {
            Timestep::PerFrame => self.tick().map_or(0, |_| 1),
            Timestep::Fixed { hz, max_substeps } => {
                let step = 1.0 / hz;
                // Clamp long stalls (tab switches, debugger pauses)
                self.accumulator += frame_dt.clamp(0.0, 0.1);

                let mut substeps = 0;
                while self.accumulator >= step && substeps < max_substeps {
                    if self.tick().is_none() {
                        break;
                    }
                    self.accumulator -= step;
                    substeps += 1;
                }
                substeps
            }
        }
    }

    /// Current run state for rendering; `None` before `start`
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.state.as_ref().map(|s| s.outcome)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// A terminal transition happened and its callback has not fired yet
    pub fn has_pending_completion(&self) -> bool {
        self.pending.is_some()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }
}
