pub mod clock;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod snake;
pub mod surface;
pub mod term;

pub use config::{Color, GameConfig};
pub use error::{GameError, Result};
pub use game::{SnakeGame, TickOutcome};
pub use grid::{GridModel, Position, Rect};
pub use snake::{Direction, Snake};
