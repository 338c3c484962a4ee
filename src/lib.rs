//! Grid Snake - the classic Snake game in the terminal
//!
//! This library provides:
//! - Core game logic and the tick scheduler (game module)
//! - Board painting and screen layout (render module)
//! - Keyboard mapping (input module)
//! - The persistent high-score list (scores module)
//! - The interactive play loop (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod scores;
