use std::io::{self, stdout, Stdout, Write};
use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{self, Print, ResetColor, SetBackgroundColor};
use crossterm::terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use tracing::{debug, warn};

use crate::config::Color;
use crate::error::{GameError, Result};
use crate::grid::{GridModel, Rect};
use crate::snake::Direction;
use crate::surface::{InputEvent, InputSource, Surface};

type TermInt = u16;
type Coords = (TermInt, TermInt);

/// Terminal columns used for one grid cell, so cells come out roughly square.
const CELL_WIDTH: TermInt = 2;

/// Draws the playfield with crossterm.
///
/// Every grid cell is painted as a background-colored block. Frames are built
/// in a back buffer and only cells that changed since the last `present` are
/// written out.
pub struct TermManager {
    stdout: Stdout,
    grid: GridModel,
    origin: Coords,
    back: Vec<Color>,
    front: Vec<Option<Color>>,
    active: bool,
}

impl TermManager {
    /// Fails when the terminal cannot fit the grid plus its border.
    pub fn new(grid: GridModel) -> Result<Self> {
        let needed = Self::needed_size(grid)?;
        let (width, height) = terminal::size()?;

        if width < needed.0 || height < needed.1 {
            return Err(GameError::TerminalTooSmall { needed, actual: (width, height) });
        }

        // Center the playfield, leaving room for the border
        let origin = ((width - needed.0) / 2 + 1, (height - needed.1) / 2 + 1);
        let cells = (grid.cols() * grid.rows()) as usize;

        Ok(TermManager {
            stdout: stdout(),
            grid,
            origin,
            back: vec![Color::BLACK; cells],
            front: vec![None; cells],
            active: false,
        })
    }

    /// Terminal size needed for `grid`, border included. Grids too large for
    /// any terminal are an `InvalidConfig`.
    pub fn needed_size(grid: GridModel) -> Result<Coords> {
        let too_big = || {
            GameError::InvalidConfig(format!("a {}x{} grid cannot fit in a terminal", grid.cols(), grid.rows()))
        };

        let cols = TermInt::try_from(grid.cols()).map_err(|_| too_big())?;
        let rows = TermInt::try_from(grid.rows()).map_err(|_| too_big())?;
        let width = cols.checked_mul(CELL_WIDTH).and_then(|w| w.checked_add(2)).ok_or_else(too_big)?;
        let height = rows.checked_add(2).ok_or_else(too_big)?;
        Ok((width, height))
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        self.active = true;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))?;
        self.draw_borders()?;
        debug!(origin = ?self.origin, "terminal ready");
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }

        // Stays active on failure so `Drop` tries again
        teardown(&mut self.stdout, terminal::disable_raw_mode)?;
        self.active = false;
        Ok(())
    }

    fn draw_borders(&mut self) -> Result<()> {
        let (left, top) = (self.origin.0 - 1, self.origin.1 - 1);
        let (needed_w, needed_h) = Self::needed_size(self.grid)?;
        let (right, bottom) = (left + needed_w - 1, top + needed_h - 1);

        for x in left..=right {
            let ch = if x == left || x == right { '+' } else { '-' };
            self.print_at((x, top), ch)?;
            self.print_at((x, bottom), ch)?;
        }

        for y in top + 1..bottom {
            self.print_at((left, y), '|')?;
            self.print_at((right, y), '|')?;
        }

        self.stdout.flush()?;
        Ok(())
    }

    fn print_at(&mut self, pos: Coords, ch: char) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), Print(ch))?;
        Ok(())
    }

    fn index(&self, col: i32, row: i32) -> usize {
        (row * self.grid.cols() + col) as usize
    }
}

impl Surface for TermManager {
    fn fill(&mut self, color: Color) {
        self.back.fill(color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some((cols, rows)) = cell_span(self.grid, rect) else {
            return;
        };

        for row in rows.0..=rows.1 {
            for col in cols.0..=cols.1 {
                let idx = self.index(col, row);
                self.back[idx] = color;
            }
        }
    }

    fn present(&mut self) -> Result<()> {
        let blank: String = " ".repeat(CELL_WIDTH as usize);

        for row in 0..self.grid.rows() {
            for col in 0..self.grid.cols() {
                let idx = self.index(col, row);
                let color = self.back[idx];
                if self.front[idx] == Some(color) {
                    continue;
                }

                let x = self.origin.0 + col as TermInt * CELL_WIDTH;
                let y = self.origin.1 + row as TermInt;
                queue!(
                    self.stdout,
                    cursor::MoveTo(x, y),
                    SetBackgroundColor(to_term_color(color)),
                    Print(&blank)
                )?;
                self.front[idx] = Some(color);
            }
        }

        queue!(self.stdout, ResetColor)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Non-blocking keyboard reader over crossterm's event queue. Needs the raw
/// mode `TermManager::setup` turns on.
#[derive(Debug, Default)]
pub struct Keyboard;

impl InputSource for Keyboard {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        let mut events = vec![];

        while poll(Duration::ZERO)? {
            if let Event::Key(ev) = read()? {
                if let Some(event) = map_key(&ev) {
                    events.push(event);
                }
            }
        }

        Ok(events)
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!(error = %e, "failed to restore terminal");
        }
    }
}

/// Translates a key press. Releases and unknown keys yield `None`.
pub fn map_key(ev: &KeyEvent) -> Option<InputEvent> {
    if ev.kind == KeyEventKind::Release {
        return None;
    }
    if is_ctrl_c(ev) {
        return Some(InputEvent::Quit);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(InputEvent::Turn(Direction::Up)),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(InputEvent::Turn(Direction::Left)),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(InputEvent::Turn(Direction::Down)),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(InputEvent::Turn(Direction::Right)),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(InputEvent::Quit),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

/// Runs every teardown step even when an earlier one fails, then reports the
/// first error.
fn teardown<W: Write>(out: &mut W, disable_raw_mode: impl FnOnce() -> io::Result<()>) -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(out, ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen);
    raw.and(screen)
}

fn to_term_color(color: Color) -> style::Color {
    style::Color::Rgb { r: color.r, g: color.g, b: color.b }
}

/// Inclusive column and row ranges covered by `rect`, clipped to the grid.
fn cell_span(grid: GridModel, rect: Rect) -> Option<((i32, i32), (i32, i32))> {
    if rect.w <= 0 || rect.h <= 0 {
        return None;
    }

    let cs = grid.cell_size();
    let col0 = rect.x.div_euclid(cs).max(0);
    let row0 = rect.y.div_euclid(cs).max(0);
    let col1 = (rect.x + rect.w - 1).div_euclid(cs).min(grid.cols() - 1);
    let row1 = (rect.y + rect.h - 1).div_euclid(cs).min(grid.rows() - 1);

    if col0 > col1 || row0 > row1 {
        return None;
    }
    Some(((col0, col1), (row0, row1)))
}
