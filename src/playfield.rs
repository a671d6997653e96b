#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to u32 since line counts never exceed the board height
    clippy::cast_possible_truncation,
    // Allow potential wrapping when casting between types of same size as board coordinates are small
    clippy::cast_possible_wrap
)]

//! The playfield engine: board, active and next piece, scoring, and the
//! gravity / lock / line-clear cycle.
//!
//! Every operation is total. Moves that would leave the board or overlap a
//! locked cell are rejected without changing state, and game over is a phase
//! rather than an error.

use std::fmt;
use std::time::Duration;

use bevy_ecs::prelude::*;
use log::{debug, info, trace};

use crate::components::{Anchor, Board, Cell, Piece, TetrominoType};
use crate::game::{
    BASE_DROP_INTERVAL, BOARD_HEIGHT, BOARD_WIDTH, DEFAULT_MIN_DROP_INTERVAL, DROP_INTERVAL_STEP,
    LINE_POINTS, POINTS_PER_LEVEL, STARTING_LEVEL,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Board empty, no pieces spawned yet.
    Ready,
    Running,
    /// Gravity suspended and every command except pause-toggle ignored.
    Paused,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    fn delta(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Discrete player commands, one per engine operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    TogglePause,
    Restart,
    Start,
}

/// Things that happened inside the engine since the last drain. The front end
/// turns these into sounds and particles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayfieldEvent {
    Started,
    Moved,
    Rotated,
    SoftDropped,
    HardDropped { distance: u32 },
    Locked { kind: TetrominoType, cells: Vec<(i32, i32)> },
    LinesCleared { rows: Vec<usize>, score: u32 },
    LevelUp { level: u32 },
    Paused,
    Resumed,
    GameOver { score: u32 },
}

/// Renderable view of the engine handed to the UI each frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayfieldSnapshot {
    pub board: [[Cell; BOARD_WIDTH]; BOARD_HEIGHT],
    pub current: Option<Piece>,
    pub next: Option<Piece>,
    pub ghost: Option<Anchor>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub phase: Phase,
    pub running: bool,
    pub paused: bool,
    pub game_over: bool,
}

impl PlayfieldSnapshot {
    /// Board cells with the current piece drawn over them.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn visible_cells(&self) -> [[Cell; BOARD_WIDTH]; BOARD_HEIGHT] {
        let mut cells = self.board;
        if let Some(piece) = &self.current {
            for (col, row) in piece.cells() {
                if (0..BOARD_WIDTH as i32).contains(&col) && (0..BOARD_HEIGHT as i32).contains(&row)
                {
                    cells[row as usize][col as usize] = Some(piece.kind);
                }
            }
        }
        cells
    }
}

/// Points for clearing `lines` rows in one lock at `level`.
#[must_use]
pub fn line_clear_award(lines: usize, level: u32) -> u32 {
    let base = LINE_POINTS
        .get(lines)
        .copied()
        .unwrap_or(LINE_POINTS[LINE_POINTS.len() - 1]);
    base.saturating_mul(level)
}

/// Level implied by a score: one level per full `POINTS_PER_LEVEL`.
#[must_use]
pub fn level_for_score(score: u32) -> u32 {
    score / POINTS_PER_LEVEL + STARTING_LEVEL
}

#[derive(Resource)]
pub struct Playfield {
    board: Board,
    current: Option<Piece>,
    next: Option<Piece>,
    score: u32,
    level: u32,
    lines: u32,
    phase: Phase,
    gravity_timer: Duration,
    min_drop_interval: Duration,
    rng: fastrand::Rng,
    events: Vec<PlayfieldEvent>,
}

impl fmt::Debug for Playfield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Playfield")
            .field("phase", &self.phase)
            .field("score", &self.score)
            .field("level", &self.level)
            .field("lines", &self.lines)
            .field("current", &self.current)
            .field("next", &self.next)
            .field("gravity_timer", &self.gravity_timer)
            .finish_non_exhaustive()
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new()
    }
}

impl Playfield {
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(fastrand::Rng::new())
    }

    /// Deterministic piece sequence for a given seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(fastrand::Rng::with_seed(seed))
    }

    fn with_rng(rng: fastrand::Rng) -> Self {
        Self {
            board: Board::new(),
            current: None,
            next: None,
            score: 0,
            level: STARTING_LEVEL,
            lines: 0,
            phase: Phase::Ready,
            gravity_timer: Duration::ZERO,
            min_drop_interval: DEFAULT_MIN_DROP_INTERVAL,
            rng,
            events: Vec::new(),
        }
    }

    /// Floor for the level-dependent gravity interval.
    #[must_use]
    pub fn with_min_drop_interval(mut self, floor: Duration) -> Self {
        self.min_drop_interval = floor;
        self
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn current(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn next(&self) -> Option<&Piece> {
        self.next.as_ref()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn lines(&self) -> u32 {
        self.lines
    }

    #[must_use]
    pub fn gravity_timer(&self) -> Duration {
        self.gravity_timer
    }

    /// `max(floor, 1000ms - level * 50ms)`.
    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        BASE_DROP_INTERVAL
            .saturating_sub(DROP_INTERVAL_STEP.saturating_mul(self.level))
            .max(self.min_drop_interval)
    }

    /// Takes every event emitted since the previous call.
    pub fn drain_events(&mut self) -> Vec<PlayfieldEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ready -> Running. Ignored in any other phase.
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Ready {
            return false;
        }
        info!("Starting new game");
        self.phase = Phase::Running;
        self.gravity_timer = Duration::ZERO;
        self.next = Some(Piece::random(&mut self.rng));
        self.events.push(PlayfieldEvent::Started);
        self.promote_next();
        true
    }

    /// GameOver -> Ready -> Running with a fresh board and session.
    pub fn restart(&mut self) -> bool {
        if self.phase != Phase::GameOver {
            return false;
        }
        self.reset();
        self.start()
    }

    /// Back to Ready from any phase. Pending events are kept.
    pub fn reset(&mut self) {
        debug!("Resetting playfield");
        self.board.clear();
        self.current = None;
        self.next = None;
        self.score = 0;
        self.level = STARTING_LEVEL;
        self.lines = 0;
        self.phase = Phase::Ready;
        self.gravity_timer = Duration::ZERO;
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Running => {
                self.phase = Phase::Paused;
                self.events.push(PlayfieldEvent::Paused);
                true
            }
            Phase::Paused => {
                self.phase = Phase::Running;
                self.events.push(PlayfieldEvent::Resumed);
                true
            }
            Phase::Ready | Phase::GameOver => false,
        }
    }

    /// Shifts the current piece one column if the new placement is valid.
    pub fn move_piece(&mut self, direction: Direction) -> bool {
        if !self.is_running() {
            return false;
        }
        let moved = self.try_shift(direction.delta(), 0);
        if moved {
            self.events.push(PlayfieldEvent::Moved);
        }
        moved
    }

    /// One row down if valid. A failed player soft drop leaves locking to
    /// gravity.
    pub fn soft_drop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let dropped = self.try_shift(0, 1);
        if dropped {
            self.events.push(PlayfieldEvent::SoftDropped);
        }
        dropped
    }

    /// Rotates clockwise with at most one corrective column shift toward the
    /// board centre. Reverts completely when both placements are invalid.
    pub fn rotate(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(piece) = self.current.as_mut() else {
            return false;
        };

        let rotated = piece.shape.rotated();
        let mut anchor = piece.anchor;
        if !self.board.is_valid_position(&rotated, anchor) {
            let kick = if anchor.col * 2 > BOARD_WIDTH as i32 {
                -1
            } else {
                1
            };
            anchor = anchor.offset(kick, 0);
            if !self.board.is_valid_position(&rotated, anchor) {
                trace!("Rotation rejected at ({}, {})", piece.anchor.col, piece.anchor.row);
                return false;
            }
        }

        piece.shape = rotated;
        piece.anchor = anchor;
        self.events.push(PlayfieldEvent::Rotated);
        true
    }

    /// Drops to the lowest valid row and locks in the same call.
    pub fn hard_drop(&mut self) -> bool {
        if !self.is_running() || self.current.is_none() {
            return false;
        }
        let mut distance = 0;
        while self.try_shift(0, 1) {
            distance += 1;
        }
        self.events.push(PlayfieldEvent::HardDropped { distance });
        self.lock_piece();
        true
    }

    /// Advances gravity by `elapsed`. Once the accumulated time exceeds the
    /// drop interval the piece steps down one row, or locks if it cannot.
    /// Returns whether a gravity step ran.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        if !self.is_running() {
            return false;
        }
        self.gravity_timer = self.gravity_timer.saturating_add(elapsed);
        if self.gravity_timer <= self.drop_interval() {
            return false;
        }

        trace!("Gravity step after {:?}", self.gravity_timer);
        if !self.try_shift(0, 1) {
            self.lock_piece();
        }
        self.gravity_timer = Duration::ZERO;
        true
    }

    /// Dispatches a command. Commands that are meaningless in the current
    /// phase are ignored.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_piece(Direction::Left),
            Command::MoveRight => self.move_piece(Direction::Right),
            Command::SoftDrop => self.soft_drop(),
            Command::Rotate => self.rotate(),
            Command::HardDrop => self.hard_drop(),
            Command::TogglePause => self.toggle_pause(),
            Command::Restart => self.restart(),
            Command::Start => self.start(),
        }
    }

    /// Anchor the current piece would land on if hard dropped.
    #[must_use]
    pub fn ghost_anchor(&self) -> Option<Anchor> {
        let piece = self.current.as_ref()?;
        let mut anchor = piece.anchor;
        while self.board.is_valid_position(&piece.shape, anchor.offset(0, 1)) {
            anchor = anchor.offset(0, 1);
        }
        Some(anchor)
    }

    #[must_use]
    pub fn snapshot(&self) -> PlayfieldSnapshot {
        PlayfieldSnapshot {
            board: *self.board.rows(),
            current: self.current,
            next: self.next,
            ghost: self.ghost_anchor(),
            score: self.score,
            level: self.level,
            lines: self.lines,
            phase: self.phase,
            running: self.is_running(),
            paused: self.is_paused(),
            game_over: self.is_game_over(),
        }
    }

    fn try_shift(&mut self, dcol: i32, drow: i32) -> bool {
        let Some(piece) = self.current.as_mut() else {
            return false;
        };
        let target = piece.anchor.offset(dcol, drow);
        if self.board.is_valid_position(&piece.shape, target) {
            piece.anchor = target;
            true
        } else {
            false
        }
    }

    fn lock_piece(&mut self) {
        let Some(piece) = self.current.take() else {
            return;
        };
        debug!(
            "Locking {:?} at ({}, {})",
            piece.kind, piece.anchor.col, piece.anchor.row
        );

        self.board.lock_piece(&piece);
        self.events.push(PlayfieldEvent::Locked {
            kind: piece.kind,
            cells: piece.cells().collect(),
        });

        let (cleared, rows) = self.board.clear_lines_with_indices();
        if cleared > 0 {
            info!("Cleared {cleared} lines");
            self.lines = self.lines.saturating_add(cleared as u32);
            self.add_score(cleared);
            self.events.push(PlayfieldEvent::LinesCleared {
                rows,
                score: self.score,
            });
        }

        self.promote_next();
        self.gravity_timer = Duration::ZERO;
    }

    fn add_score(&mut self, lines: usize) {
        self.score = self
            .score
            .saturating_add(line_clear_award(lines, self.level));
        let new_level = level_for_score(self.score);
        if new_level > self.level {
            info!("Level up: {} -> {new_level}", self.level);
            self.level = new_level;
            self.events.push(PlayfieldEvent::LevelUp { level: new_level });
        }
    }

    /// Next becomes current, a fresh next is drawn, and a blocked spawn ends
    /// the game. The blocked piece is not kept as current.
    fn promote_next(&mut self) {
        let piece = match self.next.take() {
            Some(piece) => piece,
            None => Piece::random(&mut self.rng),
        };
        self.next = Some(Piece::random(&mut self.rng));

        if self.board.is_valid_position(&piece.shape, piece.anchor) {
            self.current = Some(piece);
        } else {
            info!("Game over with score {}", self.score);
            debug!("Final board:\n{}", self.board);
            self.current = None;
            self.phase = Phase::GameOver;
            self.events.push(PlayfieldEvent::GameOver { score: self.score });
        }
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn set_current(&mut self, piece: Piece) {
        self.current = Some(piece);
    }

    #[cfg(test)]
    pub(crate) fn set_next(&mut self, kind: TetrominoType) {
        self.next = Some(Piece::new(kind));
    }

    #[cfg(test)]
    pub(crate) fn set_score(&mut self, score: u32, level: u32) {
        self.score = score;
        self.level = level;
    }
}
