#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Elapsed seconds of a single session fit comfortably in u32
    clippy::cast_possible_truncation
)]

//! Memory-card matching game: a 4x4 grid of face-down cards holding eight
//! pairs. Two flips make a move; a pair stays face up and scores, a mismatch
//! costs points and turns both cards back after a short delay.

use std::time::Duration;

use bevy_ecs::prelude::*;
use log::{debug, info, trace};

pub const GRID_COLS: usize = 4;
pub const GRID_ROWS: usize = 4;
pub const CARD_COUNT: usize = GRID_COLS * GRID_ROWS;

/// Card faces, each dealt twice.
pub const FACES: [&str; CARD_COUNT / 2] = ["🐶", "🐱", "🐭", "🐹", "🐰", "🦊", "🐻", "🐼"];

pub const MATCH_POINTS: u32 = 100;
pub const MISMATCH_PENALTY: u32 = 10;
/// How long a mismatched pair stays visible before turning back over.
pub const MISMATCH_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    Hidden,
    Revealed,
    Matched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    /// Index into `FACES`.
    pub face: usize,
    pub state: CardState,
}

impl Card {
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        FACES[self.face]
    }

    #[must_use]
    pub fn is_face_up(&self) -> bool {
        self.state != CardState::Hidden
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryPhase {
    Playing,
    /// Every pair found; the clock is stopped until the next deal.
    Won,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryCommand {
    Cursor(CursorMove),
    Flip,
    PlayAgain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryEvent {
    Dealt,
    Flipped { index: usize },
    Matched { pairs: usize, score: u32 },
    Mismatched { score: u32 },
    Hidden,
    Won { score: u32, moves: u32, seconds: u32 },
}

#[derive(Resource)]
pub struct MemoryGame {
    cards: Vec<Card>,
    first: Option<usize>,
    second: Option<usize>,
    // Remaining time before a mismatched pair turns back; the board is locked meanwhile
    unflip_in: Option<Duration>,
    cursor: usize,
    score: u32,
    moves: u32,
    matched_pairs: usize,
    elapsed: Duration,
    phase: MemoryPhase,
    rng: fastrand::Rng,
    events: Vec<MemoryEvent>,
}

impl Default for MemoryGame {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryGame {
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(fastrand::Rng::new())
    }

    /// Same seed, same deal.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(fastrand::Rng::with_seed(seed))
    }

    fn from_rng(rng: fastrand::Rng) -> Self {
        let mut game = Self {
            cards: Vec::with_capacity(CARD_COUNT),
            first: None,
            second: None,
            unflip_in: None,
            cursor: 0,
            score: 0,
            moves: 0,
            matched_pairs: 0,
            elapsed: Duration::ZERO,
            phase: MemoryPhase::Playing,
            rng,
            events: Vec::new(),
        };
        game.deal();
        game
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    #[must_use]
    pub fn phase(&self) -> MemoryPhase {
        self.phase
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.phase == MemoryPhase::Won
    }

    /// True while a mismatched pair is waiting to turn back.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.unflip_in.is_some()
    }

    /// Whole seconds on the clock.
    #[must_use]
    pub fn seconds(&self) -> u32 {
        self.elapsed.as_secs() as u32
    }

    /// Clock as `MM:SS`.
    #[must_use]
    pub fn time_label(&self) -> String {
        let seconds = self.seconds();
        format!("{:02}:{:02}", seconds / 60, seconds % 60)
    }

    pub fn drain_events(&mut self) -> Vec<MemoryEvent> {
        std::mem::take(&mut self.events)
    }

    /// Shuffles a fresh deck face down and restarts the clock and stats.
    pub fn deal(&mut self) {
        let mut faces: Vec<usize> = (0..FACES.len()).chain(0..FACES.len()).collect();
        self.rng.shuffle(&mut faces);
        self.cards = faces
            .into_iter()
            .map(|face| Card {
                face,
                state: CardState::Hidden,
            })
            .collect();

        self.first = None;
        self.second = None;
        self.unflip_in = None;
        self.cursor = 0;
        self.score = 0;
        self.moves = 0;
        self.matched_pairs = 0;
        self.elapsed = Duration::ZERO;
        self.phase = MemoryPhase::Playing;
        self.events.push(MemoryEvent::Dealt);
        debug!("Dealt {} cards", self.cards.len());
    }

    /// Moves the selection one card, wrapping within the row or column.
    pub fn move_cursor(&mut self, direction: CursorMove) {
        let row = self.cursor / GRID_COLS;
        let col = self.cursor % GRID_COLS;
        let (row, col) = match direction {
            CursorMove::Up => ((row + GRID_ROWS - 1) % GRID_ROWS, col),
            CursorMove::Down => ((row + 1) % GRID_ROWS, col),
            CursorMove::Left => (row, (col + GRID_COLS - 1) % GRID_COLS),
            CursorMove::Right => (row, (col + 1) % GRID_COLS),
        };
        self.cursor = row * GRID_COLS + col;
    }

    pub fn flip_selected(&mut self) -> bool {
        self.flip(self.cursor)
    }

    /// Turns a face-down card up. Ignored after a win, while a mismatch is
    /// showing, for face-up cards and for indices off the grid.
    pub fn flip(&mut self, index: usize) -> bool {
        if self.phase != MemoryPhase::Playing || self.is_locked() {
            return false;
        }
        let Some(card) = self.cards.get_mut(index) else {
            return false;
        };
        if card.state != CardState::Hidden {
            return false;
        }

        card.state = CardState::Revealed;
        trace!("Flipped card {index}");
        self.events.push(MemoryEvent::Flipped { index });

        match self.first {
            None => self.first = Some(index),
            Some(first) => {
                self.second = Some(index);
                self.moves = self.moves.saturating_add(1);
                self.check_for_match(first, index);
            }
        }
        true
    }

    /// Advances the clock while playing and turns a shown mismatch back once
    /// its delay has passed.
    pub fn tick(&mut self, elapsed: Duration) {
        if self.phase != MemoryPhase::Playing {
            return;
        }
        self.elapsed += elapsed;

        if let Some(remaining) = self.unflip_in {
            if elapsed >= remaining {
                self.unflip_cards();
            } else {
                self.unflip_in = Some(remaining - elapsed);
            }
        }
    }

    pub fn apply(&mut self, command: MemoryCommand) -> bool {
        match command {
            MemoryCommand::Cursor(direction) => {
                self.move_cursor(direction);
                true
            }
            MemoryCommand::Flip => self.flip_selected(),
            MemoryCommand::PlayAgain => {
                self.deal();
                true
            }
        }
    }

    fn check_for_match(&mut self, first: usize, second: usize) {
        if self.cards[first].face == self.cards[second].face {
            self.cards[first].state = CardState::Matched;
            self.cards[second].state = CardState::Matched;
            self.score = self.score.saturating_add(MATCH_POINTS);
            self.matched_pairs += 1;
            self.clear_selection();
            self.events.push(MemoryEvent::Matched {
                pairs: self.matched_pairs,
                score: self.score,
            });

            if self.matched_pairs == FACES.len() {
                self.end_game();
            }
        } else {
            self.score = self.score.saturating_sub(MISMATCH_PENALTY);
            self.unflip_in = Some(MISMATCH_DELAY);
            self.events.push(MemoryEvent::Mismatched { score: self.score });
        }
    }

    fn unflip_cards(&mut self) {
        for index in [self.first, self.second].into_iter().flatten() {
            if let Some(card) = self.cards.get_mut(index) {
                card.state = CardState::Hidden;
            }
        }
        self.clear_selection();
        self.events.push(MemoryEvent::Hidden);
    }

    fn clear_selection(&mut self) {
        self.first = None;
        self.second = None;
        self.unflip_in = None;
    }

    fn end_game(&mut self) {
        self.phase = MemoryPhase::Won;
        info!(
            "Memory game won: score {}, {} moves, {}",
            self.score,
            self.moves,
            self.time_label()
        );
        self.events.push(MemoryEvent::Won {
            score: self.score,
            moves: self.moves,
            seconds: self.seconds(),
        });
    }

    #[cfg(test)]
    pub(crate) fn set_faces(&mut self, faces: &[usize; CARD_COUNT]) {
        self.deal();
        self.drain_events();
        for (card, face) in self.cards.iter_mut().zip(faces) {
            card.face = *face;
        }
    }
}
