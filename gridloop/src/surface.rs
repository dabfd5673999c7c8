// surface.rs - Drawing surface contract and the grid painter

use egui::{Color32, Painter, Pos2, Rect, Vec2};

use crate::config::{CELL_ALPHA, CELL_HEIGHT, CELL_PADDING, CELL_WIDTH};
use crate::grid::Grid;

/// Color used for cells that have not been revealed yet.
pub const ABSENT_RGB: [u8; 3] = [0, 0, 0];
pub const BACKGROUND_RGB: [u8; 3] = [255, 255, 255];

/// Axis-aligned rectangle in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Minimal 2D surface the grid is painted onto.
pub trait Surface {
    fn set_draw_color(&mut self, r: u8, g: u8, b: u8, a: u8);
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: CellRect);
    fn present(&mut self);
}

/// Where the cell at `(row, col)` is painted, inset by the padding on
/// every side.
pub fn cell_rect(row: usize, col: usize) -> CellRect {
    CellRect {
        x: col as f32 * CELL_WIDTH + CELL_PADDING,
        y: row as f32 * CELL_HEIGHT + CELL_PADDING,
        w: CELL_WIDTH - 2.0 * CELL_PADDING,
        h: CELL_HEIGHT - 2.0 * CELL_PADDING,
    }
}

/// Clear to white, fill every cell, present.
pub fn draw_grid<S: Surface + ?Sized>(grid: &Grid, surface: &mut S) {
    let [r, g, b] = BACKGROUND_RGB;
    surface.set_draw_color(r, g, b, 255);
    surface.clear();

    for (row, cells) in grid.rows().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            let [r, g, b] = cell.map_or(ABSENT_RGB, |cell| cell.color.to_rgb8());
            surface.set_draw_color(r, g, b, CELL_ALPHA);
            surface.fill_rect(cell_rect(row, col));
        }
    }

    surface.present();
}

/// Surface backed by an egui painter, anchored at `origin`.
pub struct EguiSurface<'a> {
    painter: &'a Painter,
    origin: Pos2,
    color: Color32,
}

impl<'a> EguiSurface<'a> {
    pub fn new(painter: &'a Painter, origin: Pos2) -> Self {
        Self { painter, origin, color: Color32::WHITE }
    }
}

impl Surface for EguiSurface<'_> {
    fn set_draw_color(&mut self, r: u8, g: u8, b: u8, a: u8) {
        self.color = Color32::from_rgba_unmultiplied(r, g, b, a);
    }

    fn clear(&mut self) {
        self.painter.rect_filled(self.painter.clip_rect(), 0.0, self.color);
    }

    fn fill_rect(&mut self, rect: CellRect) {
        let rect = Rect::from_min_size(self.origin + Vec2::new(rect.x, rect.y), Vec2::new(rect.w, rect.h));
        self.painter.rect_filled(rect, 0.0, self.color);
    }

    fn present(&mut self) {
        // egui hands the shapes to the backend when `update` returns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::grid::{Cell, Point};
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Color([u8; 4]),
        Clear,
        Fill(CellRect),
        Present,
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl Surface for Recorder {
        fn set_draw_color(&mut self, r: u8, g: u8, b: u8, a: u8) {
            self.ops.push(Op::Color([r, g, b, a]));
        }
        fn clear(&mut self) {
            self.ops.push(Op::Clear);
        }
        fn fill_rect(&mut self, rect: CellRect) {
            self.ops.push(Op::Fill(rect));
        }
        fn present(&mut self) {
            self.ops.push(Op::Present);
        }
    }

    #[test]
    fn test_cell_rect_geometry() {
        assert_eq!(cell_rect(0, 0), CellRect { x: 1.0, y: 1.0, w: 18.0, h: 18.0 });
        assert_eq!(cell_rect(2, 5), CellRect { x: 101.0, y: 41.0, w: 18.0, h: 18.0 });
        assert_eq!(cell_rect(19, 19), CellRect { x: 381.0, y: 381.0, w: 18.0, h: 18.0 });
    }

    #[test]
    fn test_draw_grid_sequence() {
        let mut grid = Grid::empty();
        let color = Color::hsv(0.0, 1.0, 1.0);
        grid.set(Point::new(1, 0), Cell::new(color));

        let mut recorder = Recorder::default();
        draw_grid(&grid, &mut recorder);
        let ops = &recorder.ops;

        assert_eq!(ops[0], Op::Color([255, 255, 255, 255]));
        assert_eq!(ops[1], Op::Clear);
        assert_eq!(ops.last(), Some(&Op::Present));
        assert_eq!(ops.iter().filter(|op| matches!(op, Op::Fill(_))).count(), 400);
        assert_eq!(ops.iter().filter(|op| **op == Op::Clear).count(), 1);

        // (row 0, col 0) is absent, (row 0, col 1) is red
        assert_eq!(ops[2], Op::Color([0, 0, 0, 255]));
        assert_eq!(ops[3], Op::Fill(cell_rect(0, 0)));
        assert_eq!(ops[4], Op::Color([255, 0, 0, 255]));
        assert_eq!(ops[5], Op::Fill(cell_rect(0, 1)));
    }
}
