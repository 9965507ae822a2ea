//! The game's two outside collaborators: something to draw on and something
//! that produces key presses.

use std::collections::VecDeque;

use crate::config::Color;
use crate::error::Result;
use crate::grid::Rect;
use crate::snake::Direction;

pub trait Surface {
    /// Paints the whole playfield with `color`.
    fn fill(&mut self, color: Color);

    /// Paints `rect` (pixel units) with `color`.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Shows everything drawn since the last call.
    fn present(&mut self) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    Turn(Direction),
}

pub trait InputSource {
    /// Drains the events queued since the last poll. Never blocks.
    fn poll_events(&mut self) -> Result<Vec<InputEvent>>;
}

/// A surface that only remembers what was drawn on the current frame.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub background: Option<Color>,
    pub rects: Vec<(Rect, Color)>,
    pub frames_presented: usize,
}

impl Surface for RecordingSurface {
    fn fill(&mut self, color: Color) {
        self.background = Some(color);
        self.rects.clear();
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.rects.push((rect, color));
    }

    fn present(&mut self) -> Result<()> {
        self.frames_presented += 1;
        Ok(())
    }
}

/// Replays a fixed list of per-tick event batches, then reports nothing.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    ticks: VecDeque<Vec<InputEvent>>,
}

impl ScriptedInput {
    pub fn new(ticks: impl IntoIterator<Item = Vec<InputEvent>>) -> Self {
        ScriptedInput { ticks: ticks.into_iter().collect() }
    }
}

impl InputSource for ScriptedInput {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        Ok(self.ticks.pop_front().unwrap_or_default())
    }
}
