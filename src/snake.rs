use std::collections::VecDeque;

use crate::config::Color;
use crate::grid::{GridModel, Position, Rect};
use crate::surface::Surface;
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// Unit vector in cell units, y grows downwards.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }
}

/// The player's body. Segments are stored head first.
///
/// The snake does not check direction changes itself: refusing reversals is
/// the job of whoever drives it.
#[derive(Debug, Clone)]
pub struct Snake {
    segments: VecDeque<Position>,
    direction: Direction,
    color: Color,
    grid: GridModel,
}

impl Snake {
    /// Builds `length` segments from the grid's center cell backward, opposite
    /// to `direction`. The center cell holds the head.
    ///
    /// `length` must be at least 1; `GameConfig::grid` rejects anything else.
    pub fn new(grid: GridModel, direction: Direction, color: Color, length: usize) -> Self {
        let (cx, cy) = grid.center();
        let start = grid.cell_position(cx, cy);
        let back = direction.opposite().delta();

        let mut segments = VecDeque::with_capacity(length.max(1));
        let mut pos = start;
        segments.push_back(pos);
        for _ in 1..length {
            pos = pos.offset_cells(back, grid.cell_size());
            segments.push_back(pos);
        }

        Snake { segments, direction, color, grid }
    }

    /// A snake with explicit segments, head first. Returns `None` for an empty body.
    pub fn from_segments(
        grid: GridModel,
        segments: impl IntoIterator<Item = Position>,
        direction: Direction,
        color: Color,
    ) -> Option<Self> {
        let segments: VecDeque<Position> = segments.into_iter().collect();
        if segments.is_empty() {
            return None;
        }
        Some(Snake { segments, direction, color, grid })
    }

    pub fn segments(&self) -> impl ExactSizeIterator<Item = &Position> + '_ {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn head(&self) -> Position {
        self.segments[0]
    }

    pub fn tail(&self) -> Position {
        self.segments[self.segments.len() - 1]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Appends a segment one cell past the tail, in the direction of travel.
    pub fn grow(&mut self) {
        let tail = self.tail();
        self.segments.push_back(tail.offset_cells(self.direction.delta(), self.grid.cell_size()));
    }

    /// Moves one cell: a new head goes in front, the tail is dropped.
    pub fn advance(&mut self) {
        let new_head = self.head().offset_cells(self.direction.delta(), self.grid.cell_size());
        self.segments.pop_back();
        self.segments.push_front(new_head);
    }

    pub fn check_boundary_collision(&self) -> bool {
        // The far edges use exact equality: heads only ever land on cell multiples
        let head = self.head();
        head.x < 0 || head.x == self.grid.width() || head.y < 0 || head.y == self.grid.height()
    }

    pub fn check_self_collision(&self) -> bool {
        let head = self.head();
        self.segments.iter().skip(1).any(|seg| *seg == head)
    }

    pub fn check_collision(&self) -> bool {
        self.check_boundary_collision() || self.check_self_collision()
    }

    pub fn collides_with_food(&self, food: Position) -> bool {
        self.head() == food
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        for seg in &self.segments {
            surface.fill_rect(Rect::cell(*seg, self.grid.cell_size()), self.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    fn grid() -> GridModel {
        GridModel::new(32, 24, 20)
    }

    fn snake_at(cells: &[(i32, i32)], direction: Direction) -> Snake {
        let g = grid();
        Snake::from_segments(g, cells.iter().map(|&(c, r)| g.cell_position(c, r)), direction, Color::GREEN)
            .unwrap()
    }

    fn cells(snake: &Snake) -> Vec<(i32, i32)> {
        snake.segments().map(|p| grid().cell_of(*p)).collect()
    }

    #[test]
    fn test_opposite_directions() {
        assert!(Up.is_opposite(Down));
        assert!(Down.is_opposite(Up));
        assert!(Left.is_opposite(Right));
        assert!(Right.is_opposite(Left));

        assert!(!Up.is_opposite(Left));
        assert!(!Right.is_opposite(Right));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Up.delta(), (0, -1));
        assert_eq!(Down.delta(), (0, 1));
        assert_eq!(Left.delta(), (-1, 0));
        assert_eq!(Right.delta(), (1, 0));
    }

    #[test]
    fn test_new_extends_backward_from_center() {
        let snake = Snake::new(grid(), Right, Color::GREEN, 3);
        assert_eq!(cells(&snake), vec![(16, 12), (15, 12), (14, 12)]);

        let snake = Snake::new(grid(), Up, Color::GREEN, 3);
        assert_eq!(cells(&snake), vec![(16, 12), (16, 13), (16, 14)]);

        let snake = Snake::new(grid(), Left, Color::GREEN, 1);
        assert_eq!(cells(&snake), vec![(16, 12)]);
    }

    #[test]
    fn test_advance_moves_head_and_drops_tail() {
        let mut snake = Snake::new(grid(), Right, Color::GREEN, 3);
        let before: Vec<Position> = snake.segments().copied().collect();

        snake.advance();

        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(before[0].x + 20, before[0].y));
        let after: Vec<Position> = snake.segments().copied().collect();
        assert_eq!(&after[1..], &before[..2]);
        assert!(!after.contains(&before[2]));

        snake.set_direction(Down);
        snake.advance();
        assert_eq!(cells(&snake), vec![(17, 13), (17, 12), (16, 12)]);
    }

    #[test]
    fn test_grow_appends_past_tail_in_travel_direction() {
        let mut snake = snake_at(&[(5, 5), (4, 5), (3, 5)], Right);
        let before: Vec<Position> = snake.segments().copied().collect();

        snake.grow();

        assert_eq!(snake.len(), 4);
        let after: Vec<Position> = snake.segments().copied().collect();
        assert_eq!(&after[..3], &before[..]);
        assert_eq!(grid().cell_of(after[3]), (4, 5));
    }

    #[test]
    fn test_boundary_collision() {
        for (x, y) in [(-20, 240), (640, 240), (320, -20), (320, 480)] {
            let snake = Snake::from_segments(grid(), [Position::new(x, y)], Right, Color::GREEN).unwrap();
            assert!(snake.check_boundary_collision(), "({}, {}) should collide", x, y);
            assert!(snake.check_collision());
        }

        for (x, y) in [(620, 460), (0, 0), (620, 0), (0, 460)] {
            let snake = Snake::from_segments(grid(), [Position::new(x, y)], Right, Color::GREEN).unwrap();
            assert!(!snake.check_boundary_collision(), "({}, {}) is inside", x, y);
        }
    }

    #[test]
    fn test_self_collision() {
        let snake = snake_at(&[(5, 5), (5, 6), (4, 6), (4, 5), (5, 5)], Up);
        assert!(snake.check_self_collision());
        assert!(snake.check_collision());

        let snake = snake_at(&[(5, 5), (4, 5), (3, 5)], Right);
        assert!(!snake.check_self_collision());
        assert!(!snake.check_collision());
    }

    #[test]
    fn test_turning_into_body_collides() {
        let mut snake = snake_at(&[(5, 5), (4, 5), (3, 5), (2, 5), (1, 5)], Right);
        for dir in [Down, Left, Up] {
            snake.set_direction(dir);
            snake.advance();
        }
        // The head lands on the cell the tail still occupies
        assert_eq!(snake.head(), grid().cell_position(4, 5));
        assert_eq!(snake.tail(), grid().cell_position(4, 5));
        assert!(snake.check_self_collision());
    }

    #[test]
    fn test_collides_with_food() {
        let snake = snake_at(&[(5, 5), (4, 5)], Right);
        assert!(snake.collides_with_food(grid().cell_position(5, 5)));
        assert!(!snake.collides_with_food(grid().cell_position(4, 5)));
    }

    #[test]
    fn test_render_draws_every_segment() {
        let snake = snake_at(&[(5, 5), (4, 5), (3, 5)], Right);
        let mut surface = RecordingSurface::default();

        snake.render(&mut surface);

        assert_eq!(
            surface.rects,
            vec![
                (Rect::new(100, 100, 20, 20), Color::GREEN),
                (Rect::new(80, 100, 20, 20), Color::GREEN),
                (Rect::new(60, 100, 20, 20), Color::GREEN),
            ]
        );
    }

    #[test]
    fn test_from_segments_rejects_empty_body() {
        assert!(Snake::from_segments(grid(), std::iter::empty(), Right, Color::GREEN).is_none());
    }
}
