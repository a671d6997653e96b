#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since board and shape dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow sign loss when going from signed to unsigned types since we validate values are non-negative before casting
    clippy::cast_sign_loss,
    // Allow potential wrapping when casting between types of same size as we validate values are in range
    clippy::cast_possible_wrap
)]

use std::fmt;

use bevy_ecs::prelude::*;

use crate::game::{BOARD_HEIGHT, BOARD_WIDTH, MAX_SHAPE_SIZE, SPAWN_COL, SPAWN_ROW};
use crate::playfield::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl TetrominoType {
    pub const ALL: [TetrominoType; 7] = [
        TetrominoType::I,
        TetrominoType::J,
        TetrominoType::L,
        TetrominoType::O,
        TetrominoType::S,
        TetrominoType::T,
        TetrominoType::Z,
    ];

    /// Independent uniform draw; no bag, so streaks are possible.
    #[must_use]
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        Self::ALL[rng.usize(..Self::ALL.len())]
    }

    /// Colour identifier in `1..=7`, the value stored in board cells.
    #[must_use]
    pub fn color_id(self) -> u8 {
        match self {
            TetrominoType::I => 1,
            TetrominoType::J => 2,
            TetrominoType::L => 3,
            TetrominoType::O => 4,
            TetrominoType::S => 5,
            TetrominoType::T => 6,
            TetrominoType::Z => 7,
        }
    }

    #[must_use]
    pub fn get_color(self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            TetrominoType::I => Color::Cyan,
            TetrominoType::J => Color::Blue,
            TetrominoType::L => Color::Rgb(255, 127, 0),
            TetrominoType::O => Color::Yellow,
            TetrominoType::S => Color::Green,
            TetrominoType::T => Color::Magenta,
            TetrominoType::Z => Color::Red,
        }
    }

    #[must_use]
    pub fn shape(self) -> Shape {
        match self {
            TetrominoType::I => Shape::from_rows(&["....", "XXXX", "....", "...."]),
            TetrominoType::J => Shape::from_rows(&["X..", "XXX", "..."]),
            TetrominoType::L => Shape::from_rows(&["..X", "XXX", "..."]),
            TetrominoType::O => Shape::from_rows(&[".XX", ".XX", "..."]),
            TetrominoType::S => Shape::from_rows(&[".XX", "XX.", "..."]),
            TetrominoType::T => Shape::from_rows(&[".X.", "XXX", "..."]),
            TetrominoType::Z => Shape::from_rows(&["XX.", ".XX", "..."]),
        }
    }
}

/// Square occupancy matrix of side `size`, stored in a fixed 4x4 buffer.
/// Cells outside `size` are always empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: usize,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Builds a shape from row strings where `X` marks an occupied cell.
    /// The row count sets the size.
    #[must_use]
    pub fn from_rows(rows: &[&str]) -> Self {
        let size = rows.len().min(MAX_SHAPE_SIZE);
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (r, row) in rows.iter().take(size).enumerate() {
            for (c, ch) in row.chars().take(size).enumerate() {
                cells[r][c] = ch == 'X';
            }
        }
        Self { size, cells }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size && self.cells[row][col]
    }

    /// Transpose, then reverse each row: a 90 degree clockwise turn.
    #[must_use]
    pub fn rotated(&self) -> Self {
        let n = self.size;
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (r, row) in cells.iter_mut().enumerate().take(n) {
            for (c, cell) in row.iter_mut().enumerate().take(n) {
                *cell = self.cells[c][r];
            }
            row[..n].reverse();
        }
        Self { size: n, cells }
    }

    /// Occupied cells as `(row, col)` offsets from the matrix origin.
    pub fn filled_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.size).flat_map(move |r| {
            (0..self.size)
                .filter(move |&c| self.cells[r][c])
                .map(move |c| (r as i32, c as i32))
        })
    }
}

/// Board-relative position of a shape matrix's origin. Rows may be negative
/// while a piece is still above the visible board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Anchor {
    pub col: i32,
    pub row: i32,
}

impl Anchor {
    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    #[must_use]
    pub const fn spawn() -> Self {
        Self::new(SPAWN_COL, SPAWN_ROW)
    }

    #[must_use]
    pub const fn offset(self, dcol: i32, drow: i32) -> Self {
        Self::new(self.col + dcol, self.row + drow)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: TetrominoType,
    pub shape: Shape,
    pub anchor: Anchor,
}

impl Piece {
    #[must_use]
    pub fn new(kind: TetrominoType) -> Self {
        Self {
            kind,
            shape: kind.shape(),
            anchor: Anchor::spawn(),
        }
    }

    #[must_use]
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        Self::new(TetrominoType::random(rng))
    }

    /// Absolute board cells as `(col, row)`.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells_at(self.anchor)
    }

    pub fn cells_at(&self, anchor: Anchor) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .filled_cells()
            .map(move |(r, c)| (anchor.col + c, anchor.row + r))
    }
}

pub type Cell = Option<TetrominoType>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [[Cell; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: [[None; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.rows = [[None; BOARD_WIDTH]; BOARD_HEIGHT];
    }

    #[must_use]
    pub fn get(&self, col: usize, row: usize) -> Cell {
        self.rows.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Out-of-range writes are ignored.
    pub fn set(&mut self, col: usize, row: usize, cell: Cell) {
        if let Some(slot) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *slot = cell;
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[[Cell; BOARD_WIDTH]; BOARD_HEIGHT] {
        &self.rows
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.iter().flatten().all(Option::is_none)
    }

    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        self.rows
            .get(row)
            .is_some_and(|r| r.iter().all(Option::is_some))
    }

    /// A placement is valid when every filled cell is inside the columns,
    /// above the floor, and (when on the board) not on an occupied cell.
    #[must_use]
    pub fn is_valid_position(&self, shape: &Shape, anchor: Anchor) -> bool {
        shape.filled_cells().all(|(r, c)| {
            let col = anchor.col + c;
            let row = anchor.row + r;
            if col < 0 || col >= BOARD_WIDTH as i32 || row >= BOARD_HEIGHT as i32 {
                return false;
            }
            row < 0 || self.rows[row as usize][col as usize].is_none()
        })
    }

    /// Writes the piece's cells; cells above the board are skipped.
    pub fn lock_piece(&mut self, piece: &Piece) {
        for (col, row) in piece.cells() {
            if row >= 0 && col >= 0 {
                self.set(col as usize, row as usize, Some(piece.kind));
            }
        }
    }

    /// Bottom-up scan removing full rows and inserting empty ones at the top.
    /// The scan stays on the same index after a removal so the row shifted
    /// into it is checked too. Returns the number of rows removed.
    pub fn clear_lines(&mut self) -> usize {
        let mut cleared = 0;
        let mut row = BOARD_HEIGHT;
        while row > 0 {
            if self.is_row_full(row - 1) {
                self.rows.copy_within(0..row - 1, 1);
                self.rows[0] = [None; BOARD_WIDTH];
                cleared += 1;
            } else {
                row -= 1;
            }
        }
        cleared
    }

    /// Clears completed lines and returns the number of lines cleared and
    /// their indices as they were before clearing.
    pub fn clear_lines_with_indices(&mut self) -> (usize, Vec<usize>) {
        let indices: Vec<usize> = (0..BOARD_HEIGHT).filter(|&r| self.is_row_full(r)).collect();
        let cleared = self.clear_lines();
        (cleared, indices)
    }
}

// One line per row: `.` for empty, the colour id for a locked cell
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.rows.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            for cell in row {
                match cell {
                    Some(kind) => write!(f, "{}", kind.color_id())?,
                    None => write!(f, ".")?,
                }
            }
        }
        Ok(())
    }
}

// Particle system for visual effects
#[derive(Debug, Clone, Component)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub velocity: (f32, f32),
    pub color: ratatui::style::Color,
    pub lifetime: f32,
    pub size: f32,
}

// Commands queued by the terminal event loop, drained by the input system
#[derive(Resource, Debug, Clone, Default)]
pub struct Input {
    pub pending: Vec<Command>,
}

impl Input {
    pub fn push(&mut self, command: Command) {
        self.pending.push(command);
    }

    pub fn take(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.pending)
    }
}
