use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use super::canvas::{BufferSurface, Surface, TILE_COLUMNS};
use crate::game::GameState;

/// Colors used to paint the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub food: Color,
    pub head: Color,
    pub body: Color,
    pub border: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::Rgb(0xff, 0xff, 0xff),
            food: Color::Rgb(0xff, 0x00, 0x00),
            head: Color::Rgb(0x2e, 0x8b, 0x57),
            body: Color::Rgb(0x32, 0xcd, 0x32),
            border: Color::Rgb(0xff, 0xff, 0xff),
        }
    }
}

/// Full repaint: background, then food, then every segment head first
pub fn paint_board<S: Surface>(surface: &mut S, state: &GameState, palette: &Palette) {
    surface.clear(palette.background);
    surface.fill_tile(state.food, palette.food);

    for (index, segment) in state.snake.body.iter().enumerate() {
        if !state.is_in_bounds(*segment) {
            continue;
        }
        let color = if index == 0 { palette.head } else { palette.body };
        surface.fill_tile(*segment, color);
        surface.stroke_tile(*segment, palette.border);
    }
}

/// Board size in terminal cells for a square board of `tile_count` tiles
pub fn board_extent(tile_count: usize) -> (u16, u16) {
    let tiles = u16::try_from(tile_count).unwrap_or(u16::MAX);
    (tiles.saturating_mul(TILE_COLUMNS), tiles)
}

pub struct BoardView<'a> {
    state: &'a GameState,
    palette: Palette,
}

impl<'a> BoardView<'a> {
    pub fn new(state: &'a GameState) -> Self {
        Self {
            state,
            palette: Palette::default(),
        }
    }
}

impl Widget for BoardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut surface = BufferSurface::new(buf, area);
        paint_board(&mut surface, self.state, &self.palette);
    }
}
