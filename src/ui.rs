#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Board coordinates and particle positions are small and non-negative once bounds checked
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use crate::app::App;
use crate::components::{Particle, Piece};
use crate::game::{BOARD_HEIGHT, BOARD_WIDTH, MAX_SHAPE_SIZE};
use crate::highscore::HighScore;
use crate::menu;
use crate::menu_types::MenuState;
use crate::playfield::{Phase, Playfield, PlayfieldSnapshot};
use crate::sound::AudioState;
use crate::ui_memory_card;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const CELL_WIDTH: u16 = 2; // Each cell is 2 characters wide
const BOARD_AREA_WIDTH: u16 = BOARD_WIDTH as u16 * CELL_WIDTH + 2; // +2 for borders
const BOARD_AREA_HEIGHT: u16 = BOARD_HEIGHT as u16 + 2;
const INFO_WIDTH: u16 = 22;

const GAME_CONTROLS: &str = "\
←/→ a/d: Move
↑ w: Rotate
↓ s: Soft drop
Space: Hard drop
P: Pause
Esc: Menu  Q: Quit";

/// Smallest terminal the game screen fits in.
#[must_use]
pub fn minimum_size() -> (u16, u16) {
    (BOARD_AREA_WIDTH + INFO_WIDTH, BOARD_AREA_HEIGHT + 2)
}

pub fn render(f: &mut Frame, app: &mut App) {
    match app.menu.state {
        MenuState::Game => {}
        MenuState::MemoryCard => {
            ui_memory_card::render_memory_card(f, app);
            return;
        }
        MenuState::MainMenu | MenuState::Options => {
            let audio = app.world.resource::<AudioState>();
            let best = app.world.resource::<HighScore>().best();
            let memory_best = app.memory_high_score();
            menu::render_menu(f, &app.menu, audio, app.show_ghost, best, memory_best);
            return;
        }
    }

    let (min_width, min_height) = minimum_size();
    if f.area().width < min_width || f.area().height < min_height {
        let warning_text = Paragraph::new(
            "Terminal too small!\nPlease resize your terminal\nto continue playing.",
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Playfield"));

        let warning_area = centered_rect(60, 40, f.area());
        f.render_widget(warning_text, warning_area);
        return;
    }

    let snapshot = app.world.resource::<Playfield>().snapshot();
    let best = app.world.resource::<HighScore>().best();

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(BOARD_AREA_WIDTH),
            Constraint::Min(INFO_WIDTH),
        ])
        .split(f.area());

    let game_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                 // Title
            Constraint::Length(BOARD_AREA_HEIGHT), // Game board
            Constraint::Fill(1),
        ])
        .split(main_layout[0]);

    let info_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Spacer matching the title row
            Constraint::Length(6), // Next piece
            Constraint::Length(6), // Score
            Constraint::Min(4),    // Status and controls
        ])
        .split(main_layout[1]);

    let title = Paragraph::new("PLAYFIELD")
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD));
    f.render_widget(title, game_layout[0]);

    let board_area = game_layout[1];
    let inner_area = render_board(f, &snapshot, app.show_ghost, board_area);
    render_particles(f, app, inner_area);
    render_overlay(f, &snapshot, inner_area);

    render_next_piece(f, snapshot.next.as_ref(), info_layout[1]);

    let stats = format!(
        "Score: {}\nLevel: {}\nLines: {}\nBest:  {}",
        snapshot.score,
        snapshot.level,
        snapshot.lines,
        best.max(snapshot.score),
    );
    let stats_info = Paragraph::new(stats)
        .block(Block::default().borders(Borders::ALL).title("Stats"))
        .wrap(Wrap { trim: true });
    f.render_widget(stats_info, info_layout[2]);

    let controls = Paragraph::new(GAME_CONTROLS)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::TOP).title("Controls"))
        .wrap(Wrap { trim: true });
    f.render_widget(controls, info_layout[3]);
}

// Draws locked cells, the ghost and the falling piece; returns the inner area
fn render_board(f: &mut Frame, snapshot: &PlayfieldSnapshot, show_ghost: bool, area: Rect) -> Rect {
    let block = Block::default().borders(Borders::ALL);
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    for (row, cells) in snapshot.board.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            if let Some(kind) = cell {
                draw_cell(f, inner_area, col as i32, row as i32, "█", kind.get_color());
            }
        }
    }

    if let Some(piece) = snapshot.current.as_ref() {
        if show_ghost {
            if let Some(ghost) = snapshot.ghost.filter(|ghost| *ghost != piece.anchor) {
                for (col, row) in piece.cells_at(ghost) {
                    draw_cell(f, inner_area, col, row, "░", piece.kind.get_color());
                }
            }
        }
        for (col, row) in piece.cells() {
            draw_cell(f, inner_area, col, row, "█", piece.kind.get_color());
        }
    }

    inner_area
}

// One board cell, two characters wide. Rows above the board are skipped.
fn draw_cell(f: &mut Frame, area: Rect, col: i32, row: i32, symbol: &str, color: Color) {
    if col < 0 || row < 0 || col >= BOARD_WIDTH as i32 || row >= BOARD_HEIGHT as i32 {
        return;
    }
    let x = area.left() + col as u16 * CELL_WIDTH;
    let y = area.top() + row as u16;
    for dx in 0..CELL_WIDTH {
        if x + dx >= area.right() || y >= area.bottom() {
            continue;
        }
        if let Some(cell) = f.buffer_mut().cell_mut((x + dx, y)) {
            cell.set_symbol(symbol);
            cell.set_fg(color);
            cell.set_bg(Color::Black);
        }
    }
}

fn render_next_piece(f: &mut Frame, next: Option<&Piece>, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Next");
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let Some(piece) = next else {
        return;
    };
    let color = piece.kind.get_color();
    for (row, col) in piece.shape.filled_cells() {
        if row as usize >= MAX_SHAPE_SIZE || col as usize >= MAX_SHAPE_SIZE {
            continue;
        }
        let x = inner_area.left() + 1 + col as u16 * CELL_WIDTH;
        let y = inner_area.top() + row as u16;
        for dx in 0..CELL_WIDTH {
            if x + dx >= inner_area.right() || y >= inner_area.bottom() {
                continue;
            }
            if let Some(cell) = f.buffer_mut().cell_mut((x + dx, y)) {
                cell.set_symbol("█");
                cell.set_fg(color);
            }
        }
    }
}

// Ready, paused and game over messages drawn over the board
fn render_overlay(f: &mut Frame, snapshot: &PlayfieldSnapshot, area: Rect) {
    let (text, color) = match snapshot.phase {
        Phase::Running => return,
        Phase::Ready => ("Press Space\nto start".to_string(), Color::Cyan),
        Phase::Paused => ("PAUSED\nP to resume".to_string(), Color::Yellow),
        Phase::GameOver => (
            format!("GAME OVER\nScore {}\nR to restart", snapshot.score),
            Color::Red,
        ),
    };

    let height = text.lines().count() as u16;
    let overlay_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(height) / 2,
        width: area.width,
        height: height.min(area.height),
    };
    let overlay = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD));
    f.render_widget(Clear, overlay_area);
    f.render_widget(overlay, overlay_area);
}

// Particles live in board coordinates
fn render_particles(f: &mut Frame, app: &mut App, area: Rect) {
    let particles_data = app
        .world
        .query::<&Particle>()
        .iter(&app.world)
        .cloned()
        .collect::<Vec<_>>();

    for particle in particles_data {
        if particle.x < 0.0 || particle.y < 0.0 {
            continue;
        }
        let x = particle.x as u16;
        let y = particle.y as u16;
        if x >= BOARD_WIDTH as u16 || y >= BOARD_HEIGHT as u16 {
            continue;
        }

        let particle_x = area.left() + x * CELL_WIDTH;
        let particle_y = area.top() + y;
        if particle_x >= area.right() || particle_y >= area.bottom() {
            continue;
        }

        let symbol = if particle.size > 0.7 {
            "█"
        } else if particle.size > 0.4 {
            "▓"
        } else {
            "▒"
        };

        if let Some(cell) = f.buffer_mut().cell_mut((particle_x, particle_y)) {
            cell.set_symbol(symbol);
            cell.set_fg(particle.color);
        }
    }
}

/// Helper function to create a centered rect using up certain percentage of the available rect
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
