// main.rs - Windowed Game of Life with rewind
// Flags build the engine config; ui.rs drives the simulation once per frame

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use eframe::egui;
use tracing::info;

use conway::{Engine, LifeConfig, RunState, Simulation};

mod ui;    // eframe::App for LifeApp

use ui::{LifeApp, STATUS_BAR_HEIGHT};

#[derive(Parser, Debug)]
#[command(
    name = "conway_coro",
    version,
    about = "Conway's Game of Life on a torus with pause, step and rewind"
)]
struct Cli {
    /// Grid width in cells.
    #[arg(long, default_value_t = conway::config::DEFAULT_WIDTH)]
    width: usize,
    /// Grid height in cells.
    #[arg(long, default_value_t = conway::config::DEFAULT_HEIGHT)]
    height: usize,
    /// Window pixels per cell.
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..))]
    scale: u32,
    /// Probability that a cell starts alive.
    #[arg(long, default_value_t = conway::config::DEFAULT_DENSITY)]
    density: f64,
    /// Also give birth to dead cells with six live neighbors (B36/S23).
    #[arg(long)]
    high_life: bool,
    /// Seed for the initial board and spontaneous births. Defaults to the clock.
    #[arg(long)]
    seed: Option<u64>,
    /// Generations per second while running.
    #[arg(long, default_value_t = conway::config::DEFAULT_TPS)]
    tps: u32,
    /// Chance that an unmatched dead cell is born anyway.
    #[arg(long)]
    spontaneous_birth: Option<f64>,
    /// Keep only this many generations for rewinding.
    #[arg(long)]
    history_limit: Option<usize>,
    /// Evaluate each row on its own tokio task.
    #[arg(long)]
    row_tasks: bool,
    /// Pause automatically when a recent generation repeats.
    #[arg(long)]
    pause_on_cycle: bool,
    /// Start paused.
    #[arg(long)]
    paused: bool,
}

impl Cli {
    fn life_config(&self) -> LifeConfig {
        LifeConfig {
            width: self.width,
            height: self.height,
            density: self.density,
            high_life: self.high_life,
            seed: self.seed,
            spontaneous_birth: self.spontaneous_birth,
            ticks_per_second: self.tps,
            history_limit: self.history_limit,
            row_tasks: self.row_tasks,
            pause_on_cycle: self.pause_on_cycle,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let engine = Engine::new(cli.life_config()).context("invalid simulation settings")?;
    let state = if cli.paused { RunState::Paused } else { RunState::Running };
    let simulation = Simulation::new(engine).with_state(state);
    info!("keys: space pause, n step, p rewind, c clear, 1-7 stamp, q quit; left/right mouse paints");

    let scale = cli.scale as f32;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([
                cli.width as f32 * scale,
                cli.height as f32 * scale + STATUS_BAR_HEIGHT,
            ]),
        ..Default::default()
    };

    eframe::run_native(
        "Game of Life",
        options,
        Box::new(move |_cc| Box::new(LifeApp::new(simulation, scale))),
    )
    .map_err(|err| anyhow!("window failed: {err}"))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
