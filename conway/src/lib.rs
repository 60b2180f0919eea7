// lib.rs - Conway's Game of Life on a torus, with rewind and live editing
//
// The engine keeps every generation it has computed, so the displayed board can
// be stepped backwards and forwards. Rendering glue reads the committed RGBA
// frame from `Engine::pixels` and feeds per-frame input into `Simulation::frame`.

pub mod config;      // Construction parameters
pub mod engine;      // History + rules + pixel buffers
pub mod error;       // ConfigError
pub mod grid;        // Generation
pub mod history;     // Rewindable ledger
pub mod patterns;    // Stampable patterns
pub mod render;      // Shadow/active RGBA buffers
pub mod rules;       // Ordered birth/survival rules
pub mod simulation;  // Frame loop state machine
pub mod transition;  // Next-generation computation

pub use config::LifeConfig;
pub use engine::Engine;
pub use error::ConfigError;
pub use grid::Generation;
pub use history::{History, Recorded};
pub use patterns::{PATTERNS, Pattern};
pub use render::PixelBuffers;
pub use rules::{Rule, RuleSet, Verdict};
pub use simulation::{FrameInput, FrameOutcome, RunState, Simulation, Status};
pub use transition::{RowTasks, Stepper};
