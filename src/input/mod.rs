pub mod handler;

pub use handler::{InputHandler, KeyAction, PromptKey};
