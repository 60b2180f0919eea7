// engine.rs - Owns the board history, the rules, the random source and the pixel buffers

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::config::LifeConfig;
use crate::error::ConfigError;
use crate::grid::Generation;
use crate::history::{History, Recorded};
use crate::patterns::{self, Pattern};
use crate::render::PixelBuffers;
use crate::rules::RuleSet;
use crate::transition::Stepper;

/// The simulation core. Every operation after construction is infallible;
/// out-of-range edits and rewinding past the start are no-ops.
///
/// The random source is injected so tests can pin the sequence. It seeds the
/// first generation and feeds spontaneous births, and nothing else draws from it.
#[derive(Debug)]
pub struct Engine<R = StdRng> {
    config: LifeConfig,
    rules: RuleSet,
    stepper: Stepper,
    history: History,
    buffers: PixelBuffers,
    rng: R,
}

impl Engine<StdRng> {
    /// Validates `config` and seeds a [`StdRng`] from it (or from the clock).
    pub fn new(config: LifeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.resolved_seed();
        info!(seed, "seeding random source");
        Self::build(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Engine<R> {
    pub fn with_rng(config: LifeConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::build(config, rng)
    }

    /// `config` must already be validated.
    fn build(config: LifeConfig, mut rng: R) -> Result<Self, ConfigError> {
        let rules = RuleSet::from_config(&config);
        let stepper = Stepper::from_config(&config)?;

        let initial = Generation::random(config.width, config.height, config.density, &mut rng);
        let mut buffers = PixelBuffers::new(config.width, config.height);
        buffers.sync(&initial);

        info!(
            width = config.width,
            height = config.height,
            density = config.density,
            rule = %rules,
            row_tasks = config.row_tasks,
            population = initial.population(),
            "engine ready",
        );

        Ok(Self {
            history: History::new(initial, config.history_limit),
            config,
            rules,
            stepper,
            buffers,
            rng,
        })
    }

    pub fn config(&self) -> &LifeConfig {
        &self.config
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// The displayed generation.
    pub fn current(&self) -> &Generation {
        self.history.current()
    }

    pub fn width(&self) -> usize {
        self.config.width
    }

    pub fn height(&self) -> usize {
        self.config.height
    }

    /// The committed RGBA frame, `width * height * 4` bytes.
    pub fn pixels(&self) -> &[u8] {
        self.buffers.active()
    }

    /// Computes the successor of the displayed generation and shows it.
    pub fn advance(&mut self) -> Recorded {
        let next = self.stepper.step(&self.rules, self.history.current(), &mut self.rng);
        let recorded = self.history.record(next);
        self.buffers.sync(self.history.current());
        recorded
    }

    /// Shows the previous generation. `false` at the start of the ledger.
    pub fn step_back(&mut self) -> bool {
        let moved = self.history.step_back();
        if moved {
            self.buffers.sync(self.history.current());
        }
        moved
    }

    /// Shows the next stored generation without computing. `false` at the head.
    pub fn step_forward(&mut self) -> bool {
        let moved = self.history.step_forward();
        if moved {
            self.buffers.sync(self.history.current());
        }
        moved
    }

    /// Sets one cell of the newest generation and shows it right away.
    /// While rewound, the generations after the cursor are discarded first.
    /// Returns `false` without touching history when the cell is off-grid or
    /// already in that state.
    pub fn paint(&mut self, x: i64, y: i64, alive: bool) -> bool {
        let current = self.history.current();
        if !current.contains(x, y) || current.get(x, y) == alive {
            return false;
        }
        self.history.fork();
        let head = self.history.head_mut();
        head.set(x, y, alive);
        let index = head.index(x as usize, y as usize);
        self.buffers.write_cell(index, alive);
        self.buffers.commit();
        true
    }

    /// Stamps `pattern` with its corner at `(x, y)`. An off-grid anchor, or a
    /// pattern whose cells are all alive already, is ignored.
    pub fn stamp(&mut self, pattern: &Pattern, x: i64, y: i64) -> bool {
        let current = self.history.current();
        if !current.contains(x, y) {
            return false;
        }
        if pattern.cells.iter().all(|&(dx, dy)| current.get(x + dx, y + dy)) {
            return false;
        }
        self.history.fork();
        for index in patterns::stamp(self.history.head_mut(), pattern, x, y) {
            self.buffers.write_cell(index, true);
        }
        self.buffers.commit();
        true
    }

    /// Kills every cell of the newest generation. `false` when it is already empty.
    pub fn clear(&mut self) -> bool {
        if self.history.current().population() == 0 {
            return false;
        }
        self.history.fork();
        self.history.head_mut().clear();
        self.buffers.sync(self.history.current());
        true
    }
}
