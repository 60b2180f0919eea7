// transition.rs - Computes the next generation, sequentially or one tokio task per row

use std::sync::Arc;

use rand::Rng;

use crate::config::LifeConfig;
use crate::error::ConfigError;
use crate::grid::Generation;
use crate::rules::{RuleSet, Verdict};

/// Rule verdicts for row `y`, read from `prev` only.
pub fn row_verdicts(rules: &RuleSet, prev: &Generation, y: usize) -> Vec<Verdict> {
    (0..prev.width())
        .map(|x| {
            let alive = prev.is_alive(prev.index(x, y));
            rules.judge(alive, prev.live_neighbors(x, y))
        })
        .collect()
}

/// Applies the rules to every cell of `prev` into a fresh board.
pub fn step<R: Rng + ?Sized>(rules: &RuleSet, prev: &Generation, rng: &mut R) -> Generation {
    let verdicts = (0..prev.height()).flat_map(|y| row_verdicts(rules, prev, y));
    assemble(rules, prev, verdicts, rng)
}

/// Resolves verdicts in row-major order, so random draws happen in the same
/// sequence whichever strategy produced them.
fn assemble<R, I>(rules: &RuleSet, prev: &Generation, verdicts: I, rng: &mut R) -> Generation
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = Verdict>,
{
    let cells = verdicts.into_iter().map(|verdict| rules.resolve(verdict, &mut *rng)).collect();
    Generation::from_cells(prev.width(), prev.height(), cells)
}

/// How a tick is evaluated.
#[derive(Debug)]
pub enum Stepper {
    Sequential,
    RowTasks(RowTasks),
}

impl Stepper {
    pub fn from_config(config: &LifeConfig) -> Result<Self, ConfigError> {
        if config.row_tasks {
            Ok(Self::RowTasks(RowTasks::new()?))
        } else {
            Ok(Self::Sequential)
        }
    }

    pub fn step<R: Rng + ?Sized>(&self, rules: &RuleSet, prev: &Generation, rng: &mut R) -> Generation {
        match self {
            Self::Sequential => step(rules, prev, rng),
            Self::RowTasks(tasks) => tasks.step(rules, prev, rng),
        }
    }
}

/// Row coroutine strategy: every row is its own task reading a shared snapshot.
#[derive(Debug)]
pub struct RowTasks {
    runtime: tokio::runtime::Runtime,
}

/// Row coroutine that evaluates a single row of the snapshot
async fn process_row(row_index: usize, snapshot: Arc<Generation>, rules: Arc<RuleSet>) -> (usize, Vec<Verdict>) {
    let mut row = Vec::with_capacity(snapshot.width());
    for x in 0..snapshot.width() {
        let alive = snapshot.is_alive(snapshot.index(x, row_index));
        row.push(rules.judge(alive, snapshot.live_neighbors(x, row_index)));

        tokio::task::yield_now().await;
    }
    (row_index, row)
}

impl RowTasks {
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self { runtime: tokio::runtime::Runtime::new()? })
    }

    pub fn step<R: Rng + ?Sized>(&self, rules: &RuleSet, prev: &Generation, rng: &mut R) -> Generation {
        let snapshot = Arc::new(prev.clone());
        let shared_rules = Arc::new(rules.clone());

        let rows = self.runtime.block_on(async {
            let handles: Vec<_> = (0..snapshot.height())
                .map(|y| tokio::spawn(process_row(y, Arc::clone(&snapshot), Arc::clone(&shared_rules))))
                .collect();

            let mut rows = vec![Vec::new(); snapshot.height()];
            for (y, handle) in handles.into_iter().enumerate() {
                let (row_index, row) = match handle.await {
                    Ok(done) => done,
                    Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
                    Err(_) => (y, row_verdicts(&shared_rules, &snapshot, y)),
                };
                rows[row_index] = row;
            }
            rows
        });

        assemble(rules, prev, rows.into_iter().flatten(), rng)
    }
}
