// simulation.rs - Per-frame state machine: pause, step, rewind, edits and tick pacing

use std::time::{Duration, Instant};

use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::engine::Engine;
use crate::history::Recorded;
use crate::patterns::PATTERNS;

const CYCLE_WINDOW: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
}

/// Input gathered by the windowing layer for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub toggle_pause: bool,
    pub step_forward: bool,
    pub step_back: bool,
    pub quit: bool,
    /// Pointer position in grid cells; may lie off the grid.
    pub pointer: Option<(i64, i64)>,
    pub left_down: bool,
    pub right_down: bool,
    /// Index into [`PATTERNS`] to stamp at the pointer.
    pub stamp: Option<usize>,
    pub clear: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Quit,
}

/// Numbers for a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub state: RunState,
    pub generation: u64,
    pub cursor: usize,
    pub history_len: usize,
    pub population: usize,
}

/// Remembers the fingerprints of the last few generations reached by play.
#[derive(Debug, Clone, Default)]
struct CycleWatch {
    recent: [u64; CYCLE_WINDOW],
    count: usize,
}

impl CycleWatch {
    /// Records `fingerprint`; `true` when it was already in the window.
    fn repeats(&mut self, fingerprint: u64) -> bool {
        let filled = self.count.min(CYCLE_WINDOW);
        if self.recent[..filled].contains(&fingerprint) {
            return true;
        }
        self.recent[self.count % CYCLE_WINDOW] = fingerprint;
        self.count += 1;
        false
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Drives an [`Engine`] once per frame. Time is passed in, so the caller owns the clock.
#[derive(Debug)]
pub struct Simulation<R = StdRng> {
    engine: Engine<R>,
    state: RunState,
    tick_interval: Duration,
    last_tick: Option<Instant>,
    cycle_watch: Option<CycleWatch>,
}

impl<R: Rng> Simulation<R> {
    /// Starts running; the first frame ticks immediately.
    pub fn new(engine: Engine<R>) -> Self {
        let tick_interval = engine.config().tick_interval();
        let cycle_watch = engine.config().pause_on_cycle.then(CycleWatch::default);
        Self { engine, state: RunState::Running, tick_interval, last_tick: None, cycle_watch }
    }

    pub fn with_state(mut self, state: RunState) -> Self {
        self.state = state;
        self
    }

    pub fn engine(&self) -> &Engine<R> {
        &self.engine
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn pixels(&self) -> &[u8] {
        self.engine.pixels()
    }

    pub fn status(&self) -> Status {
        let history = self.engine.history();
        Status {
            state: self.state,
            generation: history.generation_number(),
            cursor: history.cursor(),
            history_len: history.len(),
            population: self.engine.current().population(),
        }
    }

    /// Processes one frame of input and at most one tick.
    pub fn frame(&mut self, input: &FrameInput, now: Instant) -> FrameOutcome {
        if input.quit {
            info!(generation = self.engine.history().generation_number(), "quit requested");
            return FrameOutcome::Quit;
        }

        self.apply_edits(input);

        if input.toggle_pause {
            self.state = match self.state {
                RunState::Running => RunState::Paused,
                RunState::Paused => RunState::Running,
            };
            self.last_tick = Some(now);
            self.reset_cycle_watch();
            debug!(state = ?self.state, "pause toggled");
        }

        match self.state {
            RunState::Running => {
                let due = self
                    .last_tick
                    .is_none_or(|last| now.saturating_duration_since(last) >= self.tick_interval);
                if due {
                    self.last_tick = Some(now);
                    self.tick();
                }
            }
            RunState::Paused => {
                if input.step_forward {
                    self.reset_cycle_watch();
                    self.engine.advance();
                }
                if input.step_back {
                    self.reset_cycle_watch();
                    if !self.engine.step_back() {
                        debug!("already at the oldest generation");
                    }
                }
            }
        }

        FrameOutcome::Continue
    }

    fn apply_edits(&mut self, input: &FrameInput) {
        let mut edited = false;
        if let Some((x, y)) = input.pointer {
            if input.left_down {
                edited |= self.engine.paint(x, y, true);
            }
            if input.right_down {
                edited |= self.engine.paint(x, y, false);
            }
            if let Some(pattern) = input.stamp.and_then(|i| PATTERNS.get(i)) {
                if self.engine.stamp(pattern, x, y) {
                    debug!(pattern = pattern.name, x, y, "stamped pattern");
                    edited = true;
                }
            }
        }
        if input.clear {
            edited |= self.engine.clear();
        }
        if edited {
            self.reset_cycle_watch();
        }
    }

    fn tick(&mut self) {
        if let Recorded::Forked { discarded } = self.engine.advance() {
            debug!(discarded, "resumed from a rewound generation");
        }
        let fingerprint = self.engine.current().fingerprint();
        let repeated = self.cycle_watch.as_mut().is_some_and(|watch| watch.repeats(fingerprint));
        if repeated {
            self.state = RunState::Paused;
            self.reset_cycle_watch();
            info!(generation = self.engine.history().generation_number(), "cycle detected, pausing");
        }
    }

    fn reset_cycle_watch(&mut self) {
        if let Some(watch) = self.cycle_watch.as_mut() {
            watch.reset();
        }
    }
}
