use ratatui::{buffer::Buffer, layout::Rect, style::Color};

use crate::game::Position;

/// Terminal columns used for one tile, which keeps tiles roughly square
pub const TILE_COLUMNS: u16 = 2;

/// A surface addressed in whole tiles
pub trait Surface {
    /// Paint every tile with `color`
    fn clear(&mut self, color: Color);
    fn fill_tile(&mut self, tile: Position, color: Color);
    /// Draw a border around the tile without touching its fill
    fn stroke_tile(&mut self, tile: Position, color: Color);
}

/// Surface over a region of a ratatui buffer
pub struct BufferSurface<'a> {
    buf: &'a mut Buffer,
    area: Rect,
}

impl<'a> BufferSurface<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect) -> Self {
        Self { buf, area }
    }

    /// Buffer coordinates of the tile's left column, if it is visible
    fn origin(&self, tile: Position) -> Option<(u16, u16)> {
        if tile.x < 0 || tile.y < 0 {
            return None;
        }
        let x = self.area.x as i32 + tile.x * TILE_COLUMNS as i32;
        let y = self.area.y as i32 + tile.y;
        if x + TILE_COLUMNS as i32 > self.area.right() as i32 || y >= self.area.bottom() as i32 {
            return None;
        }
        Some((x as u16, y as u16))
    }
}

impl Surface for BufferSurface<'_> {
    fn clear(&mut self, color: Color) {
        for y in self.area.top()..self.area.bottom() {
            for x in self.area.left()..self.area.right() {
                if let Some(cell) = self.buf.cell_mut((x, y)) {
                    cell.reset();
                    cell.set_bg(color);
                }
            }
        }
    }

    fn fill_tile(&mut self, tile: Position, color: Color) {
        let Some((x, y)) = self.origin(tile) else {
            return;
        };
        for dx in 0..TILE_COLUMNS {
            if let Some(cell) = self.buf.cell_mut((x + dx, y)) {
                cell.set_symbol(" ").set_bg(color);
            }
        }
    }

    fn stroke_tile(&mut self, tile: Position, color: Color) {
        let Some((x, y)) = self.origin(tile) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_symbol("▏").set_fg(color);
        }
        if let Some(cell) = self.buf.cell_mut((x + TILE_COLUMNS - 1, y)) {
            cell.set_symbol("▕").set_fg(color);
        }
    }
}
