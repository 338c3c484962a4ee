pub mod board;
pub mod canvas;
pub mod renderer;

pub use board::{BoardView, Palette, paint_board};
pub use canvas::{BufferSurface, Surface};
pub use renderer::{Renderer, ScreenView};
