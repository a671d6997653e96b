#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Grid indices are below 16
    clippy::cast_possible_truncation
)]

use crate::app::App;
use crate::memory_card::{CARD_COUNT, Card, CardState, FACES, GRID_COLS, GRID_ROWS, MemoryGame};
use crate::ui::centered_rect;
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

const CARD_WIDTH: u16 = 8;
const CARD_HEIGHT: u16 = 4;
const GRID_AREA_WIDTH: u16 = GRID_COLS as u16 * CARD_WIDTH + 2;
const GRID_AREA_HEIGHT: u16 = GRID_ROWS as u16 * CARD_HEIGHT + 2;
const INFO_WIDTH: u16 = 24;

const MEMORY_CONTROLS: &str = "\
←↑↓→ wasd: Select
Enter/Space: Flip
R: Play again
Esc: Menu  Q: Quit";

/// Smallest terminal the memory-card screen fits in.
#[must_use]
pub fn minimum_size() -> (u16, u16) {
    (GRID_AREA_WIDTH + INFO_WIDTH, GRID_AREA_HEIGHT + 1)
}

/// Main rendering function for the memory-card game
pub fn render_memory_card(f: &mut Frame, app: &App) {
    let area = f.area();
    let (min_width, min_height) = minimum_size();
    if area.width < min_width || area.height < min_height {
        let warning = Paragraph::new(format!(
            "Terminal too small!\nPlease resize to at least {min_width}x{min_height}."
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Memory Cards"));
        f.render_widget(warning, centered_rect(60, 40, area));
        return;
    }

    let game = app.memory_game();
    let best = app.memory_high_score();

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(GRID_AREA_WIDTH),
            Constraint::Min(INFO_WIDTH),
        ])
        .split(area);

    let game_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(GRID_AREA_HEIGHT),
            Constraint::Fill(1),
        ])
        .split(main_layout[0]);

    let info_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Spacer matching the title row
            Constraint::Length(7), // Stats
            Constraint::Min(4),    // Controls
        ])
        .split(main_layout[1]);

    let title = Paragraph::new("FIND THE PAIRS")
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD));
    f.render_widget(title, game_layout[0]);

    render_grid(f, game, game_layout[1]);
    render_stats(f, game, best, info_layout[1]);

    let controls = Paragraph::new(MEMORY_CONTROLS)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::TOP).title("Controls"))
        .wrap(Wrap { trim: true });
    f.render_widget(controls, info_layout[2]);

    if game.is_won() {
        render_win_dialog(f, game, best, game_layout[1]);
    }
}

fn render_grid(f: &mut Frame, game: &MemoryGame, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    for (index, card) in game.cards().iter().enumerate().take(CARD_COUNT) {
        let col = (index % GRID_COLS) as u16;
        let row = (index / GRID_COLS) as u16;
        let card_area = Rect {
            x: inner_area.x + col * CARD_WIDTH,
            y: inner_area.y + row * CARD_HEIGHT,
            width: CARD_WIDTH,
            height: CARD_HEIGHT,
        }
        .intersection(inner_area);
        render_card(f, card, index == game.cursor(), card_area);
    }
}

fn render_card(f: &mut Frame, card: &Card, selected: bool, area: Rect) {
    let (text, color) = match card.state {
        CardState::Hidden => ("?", Color::Indexed(63)),
        CardState::Revealed => (card.symbol(), Color::Blue),
        CardState::Matched => (card.symbol(), Color::Green),
    };

    let mut block = Block::default().borders(Borders::ALL).border_style(Style::default().fg(color));
    if selected {
        block = block
            .border_type(BorderType::Thick)
            .border_style(Style::default().fg(Color::Yellow));
    }

    let face = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        .block(block);
    f.render_widget(face, area);
}

fn render_stats(f: &mut Frame, game: &MemoryGame, best: u32, area: Rect) {
    let stats = format!(
        "Score: {}\nBest:  {}\nMoves: {}\nTime:  {}\nPairs: {}/{}",
        game.score(),
        best,
        game.moves(),
        game.time_label(),
        game.matched_pairs(),
        FACES.len(),
    );
    let stats_info = Paragraph::new(stats)
        .block(Block::default().borders(Borders::ALL).title("Stats"))
        .wrap(Wrap { trim: true });
    f.render_widget(stats_info, area);
}

fn render_win_dialog(f: &mut Frame, game: &MemoryGame, best: u32, area: Rect) {
    let message = format!(
        "You completed the game!\nScore: {}\nHigh score: {}\nMoves: {}\nTime: {}\n\nR to play again",
        game.score(),
        best,
        game.moves(),
        game.time_label(),
    );
    let dialog = Paragraph::new(message)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Congratulations!")
                .style(Style::default().fg(Color::Green)),
        );

    let dialog_area = centered_rect(90, 60, area);
    f.render_widget(Clear, dialog_area);
    f.render_widget(dialog, dialog_area);
}
