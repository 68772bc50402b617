//! Engine module - the fixed-timestep loop around the simulation.
//!
//! The engine separates how often the world advances from how often it is
//! drawn. The host calls [`Engine::advance`] once per frame with a monotonic
//! timestamp; elapsed time lands in an accumulator, whole tick periods are
//! consumed as discrete simulation steps, and the sub-tick remainder becomes
//! the interpolation alpha for that frame's render. The engine schedules
//! nothing itself: drivers (the terminal binary, tests) own the frame clock,
//! which keeps the whole loop synchronously testable.

use arrayvec::ArrayVec;

use crate::core::{GameConfig, GameState, RenderSnapshot};
use crate::error::{EngineError, EngineFault};
use crate::types::{GameAction, Phase, MAX_CATCHUP_TICKS};

/// Upper bound on events one frame can produce: a clamped catch-up burst of
/// ticks, each possibly eating, plus lifecycle transitions around it.
pub const FRAME_EVENT_CAP: usize = (MAX_CATCHUP_TICKS as usize) * 2 + 4;

/// One-way notification target for score changes.
///
/// The engine pushes every new score value outward; it requires nothing of
/// the sink beyond accepting an integer. Absence is tolerated.
pub trait ScoreSink {
    fn publish(&mut self, score: u32);
}

/// Observable lifecycle and tick transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ready -> Playing.
    Started,
    /// One simulation step completed while Playing.
    Stepped { score: u32 },
    /// The step landed on food (emitted in addition to `Stepped`).
    FoodEaten { score: u32 },
    /// Playing -> GameOver.
    GameOver { final_score: u32 },
}

/// What one call to [`Engine::advance`] produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Interpolation fraction for rendering, in [0,1) while Playing and
    /// exactly 1.0 when the scene is settled (Ready, GameOver, destroyed).
    pub alpha: f32,
    /// Simulation steps consumed this frame.
    pub steps: u32,
    /// Events since the previous frame, oldest first.
    pub events: ArrayVec<GameEvent, FRAME_EVENT_CAP>,
}

/// The game engine: simulation state plus the timing accumulator.
pub struct Engine {
    state: GameState,
    tick_ms: f64,
    /// Unconsumed simulated time in milliseconds. Never negative.
    accumulator: f64,
    last_time: Option<f64>,
    destroyed: bool,
    sink: Option<Box<dyn ScoreSink>>,
    pending: ArrayVec<GameEvent, FRAME_EVENT_CAP>,
}

impl Engine {
    /// Build an engine in the Ready phase with the loop not running.
    ///
    /// The configuration is validated here; a canvas that is not an exact
    /// multiple of the grid size is rejected rather than clamped.
    pub fn new(
        config: GameConfig,
        seed: u32,
        sink: Option<Box<dyn ScoreSink>>,
    ) -> Result<Self, EngineError> {
        let grid = config.grid()?;
        let state = GameState::new(grid, seed)?;
        let mut engine = Self {
            state,
            tick_ms: config.tick_ms,
            accumulator: 0.0,
            last_time: None,
            destroyed: false,
            sink,
            pending: ArrayVec::new(),
        };
        engine.publish_score(0);
        Ok(engine)
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn score(&self) -> u32 {
        self.state.score()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Start a run from Ready. No-op in any other phase (use
    /// [`GameAction::Activate`] from GameOver to retry).
    pub fn start(&mut self) -> bool {
        if self.destroyed || !self.state.start() {
            return false;
        }
        self.reset_clock();
        self.push_event(GameEvent::Started);
        true
    }

    /// Route a discrete input through the state machine.
    ///
    /// Direction inputs buffer a heading while Playing; `Activate` starts
    /// from Ready or performs a full reset + start from GameOver. Anything
    /// else is silently ignored, as is every input after `destroy`.
    pub fn handle_input(&mut self, action: GameAction) -> Result<bool, EngineFault> {
        if self.destroyed {
            return Ok(false);
        }
        match action {
            GameAction::Turn(dir) => Ok(self.state.steer(dir)),
            GameAction::Activate => match self.state.phase() {
                Phase::Ready => Ok(self.start()),
                Phase::GameOver => {
                    self.state.reset()?;
                    self.publish_score(0);
                    Ok(self.start())
                }
                Phase::Playing => Ok(false),
            },
        }
    }

    /// Advance the engine to `now_ms` (a monotonic timestamp in
    /// milliseconds) and describe the frame to draw.
    ///
    /// Runs zero or more simulation steps depending on elapsed time. A stall
    /// longer than `MAX_CATCHUP_TICKS` tick periods is absorbed by dropping
    /// the excess backlog instead of looping synchronously through it; only
    /// the sub-tick remainder survives into alpha.
    pub fn advance(&mut self, now_ms: f64) -> Result<Frame, EngineFault> {
        if self.destroyed || self.state.phase() != Phase::Playing {
            // Keep the clock fresh so resuming play never sees a stale gap.
            self.last_time = Some(now_ms);
            return Ok(self.settled_frame());
        }

        let delta = match self.last_time.replace(now_ms) {
            Some(last) => (now_ms - last).max(0.0),
            None => 0.0,
        };
        self.accumulator += delta;

        let mut steps = 0u32;
        while self.accumulator >= self.tick_ms && steps < MAX_CATCHUP_TICKS {
            let outcome = self.state.tick()?;
            self.accumulator -= self.tick_ms;
            steps += 1;

            self.push_event(GameEvent::Stepped {
                score: outcome.score,
            });
            if outcome.ate {
                self.publish_score(outcome.score);
                self.push_event(GameEvent::FoodEaten {
                    score: outcome.score,
                });
            }
            if outcome.ended {
                self.push_event(GameEvent::GameOver {
                    final_score: outcome.score,
                });
                self.accumulator = 0.0;
                break;
            }
        }

        // Catch-up clamp hit: discard whole periods, keep the remainder.
        if self.accumulator >= self.tick_ms {
            self.accumulator %= self.tick_ms;
        }

        let alpha = if self.state.phase() == Phase::Playing {
            (self.accumulator / self.tick_ms) as f32
        } else {
            1.0
        };

        Ok(Frame {
            alpha,
            steps,
            events: self.pending.drain(..).collect(),
        })
    }

    /// Fill a caller-owned render snapshot.
    pub fn snapshot_into(&self, out: &mut RenderSnapshot) {
        self.state.snapshot_into(out);
    }

    /// Stop the loop and leave the engine inert. Safe to call at any time,
    /// any number of times; subsequent input and advance calls are no-ops.
    pub fn destroy(&mut self) {
        self.destroyed = true;
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn reset_clock(&mut self) {
        self.accumulator = 0.0;
        self.last_time = None;
    }

    fn settled_frame(&mut self) -> Frame {
        Frame {
            alpha: 1.0,
            steps: 0,
            events: self.pending.drain(..).collect(),
        }
    }

    fn publish_score(&mut self, score: u32) {
        if let Some(sink) = self.sink.as_mut() {
            sink.publish(score);
        }
    }

    fn push_event(&mut self, event: GameEvent) {
        // The capacity covers the worst clamped frame; dropping the oldest
        // event would reorder transitions, so overflow drops the newest.
        let _ = self.pending.try_push(event);
    }
}
