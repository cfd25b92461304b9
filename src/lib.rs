//! Grid Pursuit - a terminal cops-and-robbers chase
//!
//! This library provides:
//! - Core chase logic: grid, A* pathfinding, pursuer and evader controllers (game module)
//! - The fixed-rate tick driver (scheduler module)
//! - Keyboard input and TUI rendering adapters (input and render modules)
//! - The interactive terminal mode (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod scheduler;
