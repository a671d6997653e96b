#![warn(clippy::all, clippy::pedantic)]

use crate::menu_types::{Menu, OptionsOption};
use crate::sound::AudioState;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
};

fn on_off(flag: bool) -> &'static str {
    if flag { "ON" } else { "OFF" }
}

/// Label shown for each options entry given the current settings
pub fn option_label(option: OptionsOption, audio: &AudioState, show_ghost: bool) -> String {
    match option {
        OptionsOption::MusicToggle => format!("Music: {}", on_off(audio.is_music_enabled())),
        OptionsOption::SoundToggle => format!("Sound: {}", on_off(audio.is_sound_enabled())),
        OptionsOption::VolumeUp => format!("Volume + ({:.1})", audio.get_volume()),
        OptionsOption::VolumeDown => format!("Volume - ({:.1})", audio.get_volume()),
        OptionsOption::GhostToggle => format!("Ghost piece: {}", on_off(show_ghost)),
        OptionsOption::Back => "Back".to_string(),
    }
}

/// Renders the options menu
pub fn render_options_menu(
    f: &mut Frame,
    area: Rect,
    menu: &Menu,
    audio: &AudioState,
    show_ghost: bool,
) {
    let lines: Vec<Line> = OptionsOption::ALL
        .iter()
        .map(|option| {
            let style = if *option == menu.options_selected {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            Line::from(vec![Span::styled(
                option_label(*option, audio, show_ghost),
                style,
            )])
        })
        .collect();

    let paragraph = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
