use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info};

use crate::clock::FrameClock;
use crate::config::GameConfig;
use crate::error::Result;
use crate::food::Food;
use crate::grid::GridModel;
use crate::snake::Snake;
use crate::surface::{InputEvent, InputSource, Surface};

/// What a single tick ended in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    GameOver { score: u32 },
    Quit,
}

impl TickOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TickOutcome::Continue)
    }

    /// The line shown once the terminal is back. Only a game over has one.
    pub fn summary(&self) -> Option<String> {
        match self {
            TickOutcome::GameOver { score } => Some(format!("Your score: {}", score)),
            TickOutcome::Quit | TickOutcome::Continue => None,
        }
    }
}

pub struct SnakeGame {
    config: GameConfig,
    grid: GridModel,
    snake: Snake,
    food: Food,
    score: u32,
    ticks: u64,
    rng: StdRng,
    finished: Option<TickOutcome>,
}

impl SnakeGame {
    /// Sets up a fresh game with the food already placed.
    pub fn new(config: GameConfig, mut rng: StdRng) -> Result<Self> {
        let grid = config.grid()?;

        let snake = Snake::new(grid, config.initial_direction, config.snake_color, config.initial_length);
        let mut food = Food::new(grid, config.food_color);
        food.set_random_location(&mut rng);

        info!(
            cols = grid.cols(),
            rows = grid.rows(),
            cell_size = grid.cell_size(),
            food = ?grid.cell_of(food.position()),
            "new game"
        );

        Ok(SnakeGame { config, grid, snake, food, score: 0, ticks: 0, rng, finished: None })
    }

    /// Seeded from `seed` when given, from the OS otherwise.
    pub fn with_seed(config: GameConfig, seed: Option<u64>) -> Result<Self> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(config, rng)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> GridModel {
        self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn food_mut(&mut self) -> &mut Food {
        &mut self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Runs one frame: input, movement, collisions, eating, drawing.
    ///
    /// Once a tick has returned `GameOver` or `Quit` every later call returns
    /// the same outcome and leaves the game untouched.
    pub fn tick<S, I>(&mut self, surface: &mut S, input: &mut I) -> Result<TickOutcome>
    where
        S: Surface + ?Sized,
        I: InputSource + ?Sized,
    {
        if let Some(outcome) = self.finished {
            return Ok(outcome);
        }

        // Turns are checked against the heading of the last move, so two quick
        // presses inside one frame cannot fold the snake back onto itself
        let heading = self.snake.direction();
        for event in input.poll_events()? {
            match event {
                InputEvent::Quit => {
                    info!(score = self.score, ticks = self.ticks, "quit");
                    return Ok(self.finish(TickOutcome::Quit));
                }
                InputEvent::Turn(dir) if dir.is_opposite(heading) => {
                    debug!(?dir, ?heading, "ignoring reversal");
                }
                InputEvent::Turn(dir) => {
                    if dir != self.snake.direction() {
                        debug!(?dir, "turn");
                    }
                    self.snake.set_direction(dir);
                }
            }
        }

        surface.fill(self.config.background);

        self.snake.advance();
        self.ticks += 1;

        if self.snake.check_collision() {
            info!(
                score = self.score,
                ticks = self.ticks,
                head = ?self.grid.cell_of(self.snake.head()),
                wall = self.snake.check_boundary_collision(),
                "game over"
            );
            return Ok(self.finish(TickOutcome::GameOver { score: self.score }));
        }

        if self.snake.collides_with_food(self.food.position()) {
            self.snake.grow();
            self.food.set_random_location(&mut self.rng);
            self.score += 1;
            debug!(
                score = self.score,
                length = self.snake.len(),
                food = ?self.grid.cell_of(self.food.position()),
                "food eaten"
            );
        }

        self.food.render(surface);
        self.snake.render(surface);
        surface.present()?;

        Ok(TickOutcome::Continue)
    }

    /// Ticks at the configured frame rate until the game ends.
    pub fn run<S, I>(&mut self, surface: &mut S, input: &mut I, clock: &mut FrameClock) -> Result<TickOutcome>
    where
        S: Surface + ?Sized,
        I: InputSource + ?Sized,
    {
        loop {
            let outcome = self.tick(surface, input)?;
            if outcome.is_terminal() {
                return Ok(outcome);
            }
            clock.tick();
        }
    }

    fn finish(&mut self, outcome: TickOutcome) -> TickOutcome {
        self.finished = Some(outcome);
        outcome
    }
}
