//! Core game logic module for Snake
//!
//! The engine, state and scheduler have no terminal or storage dependencies;
//! the app layer drives them from keyboard events and the tick timer.

pub mod action;
pub mod config;
pub mod engine;
pub mod scheduler;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::GameConfig;
pub use engine::{GameEngine, TickOutcome};
pub use scheduler::TickScheduler;
pub use state::{GameOverReason, GameState, Phase, Position, Snake};
