use rand::Rng;

use crate::config::Color;
use crate::grid::{GridModel, Position, Rect};
use crate::surface::Surface;

/// The thing the snake eats.
#[derive(Debug, Clone)]
pub struct Food {
    position: Position,
    color: Color,
    grid: GridModel,
}

impl Food {
    /// Starts at the origin; call `set_random_location` before the first tick.
    pub fn new(grid: GridModel, color: Color) -> Self {
        Food { position: Position::default(), color, grid }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Moves to a uniformly chosen cell. The snake's body is not avoided, so
    /// the food can land underneath it.
    pub fn set_random_location<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let col = rng.gen_range(0..self.grid.cols());
        let row = rng.gen_range(0..self.grid.rows());
        self.position = self.grid.cell_position(col, row);
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.fill_rect(Rect::cell(self.position, self.grid.cell_size()), self.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_new_food_starts_at_origin() {
        let food = Food::new(GridModel::new(32, 24, 20), Color::RED);
        assert_eq!(food.position(), Position::new(0, 0));
    }

    #[test]
    fn test_relocation_covers_the_corners() {
        let grid = GridModel::new(2, 2, 20);
        let mut food = Food::new(grid, Color::RED);
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();

        for _ in 0..200 {
            food.set_random_location(&mut rng);
            seen.insert(food.position());
        }

        assert_eq!(seen.len(), 4);
        assert!(seen.contains(&Position::new(20, 20)));
    }

    #[test]
    fn test_render_draws_one_cell() {
        let mut food = Food::new(GridModel::new(32, 24, 20), Color::RED);
        food.set_position(Position::new(60, 40));
        let mut surface = RecordingSurface::default();

        food.render(&mut surface);

        assert_eq!(surface.rects, vec![(Rect::new(60, 40, 20, 20), Color::RED)]);
    }

    proptest! {
        #[test]
        fn relocation_stays_on_grid_cells(seed in any::<u64>(), cols in 1i32..64, rows in 1i32..64, cell in 1i32..40) {
            let grid = GridModel::new(cols, rows, cell);
            let mut food = Food::new(grid, Color::RED);
            let mut rng = StdRng::seed_from_u64(seed);

            food.set_random_location(&mut rng);
            let pos = food.position();

            prop_assert!(pos.x >= 0 && pos.x <= (cols - 1) * cell);
            prop_assert!(pos.y >= 0 && pos.y <= (rows - 1) * cell);
            prop_assert_eq!(pos.x % cell, 0);
            prop_assert_eq!(pos.y % cell, 0);
        }
    }
}
