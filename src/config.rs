use std::time::Duration;

use crate::error::{GameError, Result};
use crate::grid::GridModel;
use crate::snake::Direction;

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }
}

/// Startup constants. Built once and only ever read afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Frames (and snake steps) per second
    pub fps: u32,
    /// Playfield size in pixels
    pub screen_size: (i32, i32),
    /// Edge length of one cell in pixels
    pub cell_size: i32,
    pub background: Color,
    pub snake_color: Color,
    pub food_color: Color,
    pub initial_length: usize,
    pub initial_direction: Direction,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fps: 10,
            screen_size: (640, 480),
            cell_size: 20,
            background: Color::BLACK,
            snake_color: Color::GREEN,
            food_color: Color::RED,
            initial_length: 3,
            initial_direction: Direction::Right,
        }
    }
}

impl GameConfig {
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }

    /// Validates the constants and derives the grid from them.
    pub fn grid(&self) -> Result<GridModel> {
        let (width, height) = self.screen_size;

        if self.cell_size <= 0 {
            return Err(invalid(format!("cell size must be positive, got {}", self.cell_size)));
        }
        if self.fps == 0 {
            return Err(invalid("frame rate must be positive".to_string()));
        }
        if width <= 0 || height <= 0 {
            return Err(invalid(format!("screen size must be positive, got {}x{}", width, height)));
        }
        if width % self.cell_size != 0 || height % self.cell_size != 0 {
            return Err(invalid(format!(
                "screen size {}x{} is not a multiple of the cell size {}",
                width, height, self.cell_size
            )));
        }
        if self.initial_length == 0 {
            return Err(invalid("initial snake length must be at least 1".to_string()));
        }

        let grid = GridModel::new(width / self.cell_size, height / self.cell_size, self.cell_size);

        // The body extends backward from the center, so the tail must stay on the grid
        let (cx, cy) = grid.center();
        let (dx, dy) = self.initial_direction.delta();
        let does_not_fit = || {
            invalid(format!(
                "a snake of length {} heading {:?} does not fit on a {}x{} grid",
                self.initial_length,
                self.initial_direction,
                grid.cols(),
                grid.rows()
            ))
        };
        let back = i32::try_from(self.initial_length - 1).map_err(|_| does_not_fit())?;
        let tail_x = dx.checked_mul(back).and_then(|d| cx.checked_sub(d)).ok_or_else(does_not_fit)?;
        let tail_y = dy.checked_mul(back).and_then(|d| cy.checked_sub(d)).ok_or_else(does_not_fit)?;

        if tail_x < 0 || tail_x >= grid.cols() || tail_y < 0 || tail_y >= grid.rows() {
            return Err(does_not_fit());
        }

        Ok(grid)
    }
}

fn invalid(msg: String) -> GameError {
    GameError::InvalidConfig(msg)
}
