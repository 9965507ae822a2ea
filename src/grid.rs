//! Pixel geometry shared by the snake, the food and the drawing surface.
//!
//! All positions are in pixel units and always sit on a multiple of the
//! cell size.

/// A pixel position on the playfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Moves by `(dx, dy)` cells of `cell_size` pixels each.
    pub fn offset_cells(&self, (dx, dy): (i32, i32), cell_size: i32) -> Self {
        Self {
            x: self.x + dx * cell_size,
            y: self.y + dy * cell_size,
        }
    }
}

/// A filled rectangle in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// One whole cell whose top-left corner is `pos`.
    pub fn cell(pos: Position, cell_size: i32) -> Self {
        Self::new(pos.x, pos.y, cell_size, cell_size)
    }
}

/// Grid dimensions. Built once from the validated config and never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridModel {
    cols: i32,
    rows: i32,
    cell_size: i32,
}

impl GridModel {
    pub(crate) fn new(cols: i32, rows: i32, cell_size: i32) -> Self {
        GridModel { cols, rows, cell_size }
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Pixel width of the playfield.
    pub fn width(&self) -> i32 {
        self.cols * self.cell_size
    }

    /// Pixel height of the playfield.
    pub fn height(&self) -> i32 {
        self.rows * self.cell_size
    }

    /// Pixel position of the top-left corner of cell `(col, row)`.
    pub fn cell_position(&self, col: i32, row: i32) -> Position {
        Position::new(col * self.cell_size, row * self.cell_size)
    }

    /// Cell coordinates of a pixel position.
    pub fn cell_of(&self, pos: Position) -> (i32, i32) {
        (pos.x.div_euclid(self.cell_size), pos.y.div_euclid(self.cell_size))
    }

    /// The cell the snake starts from.
    pub fn center(&self) -> (i32, i32) {
        (self.cols / 2, self.rows / 2)
    }
}
