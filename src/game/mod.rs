//! Core chase logic
//!
//! Grid, pathfinding and the two controllers, with no I/O or rendering
//! dependencies. The scheduler drives it in real time; tests drive it tick
//! by tick.

pub mod action;
pub mod config;
pub mod engine;
pub mod evader;
pub mod grid;
pub mod layout;
pub mod pathfinder;
pub mod pursuit;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::{ConfigError, GameConfig, SpeedRampConfig};
pub use engine::{GameEngine, StepInfo, StepResult};
pub use evader::{EvaderController, EvaderStep};
pub use grid::{Grid, Terrain};
pub use layout::{BUILTIN_LAYOUT, Layout, LayoutError};
pub use pathfinder::{Pathfinder, find_path};
pub use pursuit::{Cadence, PursuitController};
pub use state::{Cell, Entity, Outcome, Role, Session};
