#![warn(clippy::all, clippy::pedantic)]

mod main_menu;
mod options_menu;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

pub use self::options_menu::option_label;
pub use crate::menu_types::{Menu, MenuOption, MenuState, OptionsOption};
use crate::sound::AudioState;

const TITLE: &str = "P L A Y F I E L D";

const CONTROLS: &str = "\
←/→ : Move
↑ : Rotate
↓ : Soft drop
Space : Hard drop
P : Pause/Resume
R : Restart after game over
Cards: arrows select, Enter flips
Esc : Menu    Q : Quit";

/// Draws the main or options menu, whichever `menu.state` selects.
pub fn render_menu(
    f: &mut Frame,
    menu: &Menu,
    audio: &AudioState,
    show_ghost: bool,
    high_score: u32,
    memory_high_score: u32,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title
            Constraint::Length(2),  // High score
            Constraint::Length(8),  // Options
            Constraint::Min(8),     // Controls
        ])
        .split(f.area());

    let title = Paragraph::new(TITLE)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, layout[0]);

    let best = Paragraph::new(format!(
        "High score: {high_score}    Memory best: {memory_high_score}"
    ))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow));
    f.render_widget(best, layout[1]);

    match menu.state {
        MenuState::Options => {
            options_menu::render_options_menu(f, layout[2], menu, audio, show_ghost);
        }
        MenuState::MainMenu | MenuState::Game | MenuState::MemoryCard => {
            main_menu::render_main_menu_options(f, layout[2], menu);
        }
    }

    let controls = Paragraph::new(CONTROLS)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::TOP).title("Controls"));
    f.render_widget(controls, layout[3]);
}
