#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::menu::option_label;
    use crate::menu_types::{Menu, MenuOption, MenuState, OptionsOption};
    use crate::sound::AudioState;

    #[test]
    fn test_menu_starts_on_new_game() {
        let menu = Menu::new();
        assert_eq!(menu.state, MenuState::MainMenu);
        assert_eq!(menu.selected_option, MenuOption::NewGame);
        assert_eq!(menu.options_selected, OptionsOption::MusicToggle);
    }

    #[test]
    fn test_main_menu_navigation_wraps() {
        let mut menu = Menu::new();
        menu.next_option();
        assert_eq!(menu.selected_option, MenuOption::MemoryCards);
        menu.next_option();
        assert_eq!(menu.selected_option, MenuOption::Options);
        menu.next_option();
        assert_eq!(menu.selected_option, MenuOption::Quit);
        menu.next_option();
        assert_eq!(menu.selected_option, MenuOption::NewGame);

        menu.prev_option();
        assert_eq!(menu.selected_option, MenuOption::Quit);
    }

    #[test]
    fn test_options_navigation_wraps() {
        let mut menu = Menu::new();
        menu.state = MenuState::Options;

        menu.prev_option();
        assert_eq!(menu.options_selected, OptionsOption::Back);
        menu.next_option();
        assert_eq!(menu.options_selected, OptionsOption::MusicToggle);

        // Main menu selection is left alone
        assert_eq!(menu.selected_option, MenuOption::NewGame);
    }

    #[test]
    fn test_navigation_ignored_in_game() {
        for state in [MenuState::Game, MenuState::MemoryCard] {
            let mut menu = Menu::new();
            menu.state = state;
            menu.next_option();
            assert_eq!(menu.selected_option, MenuOption::NewGame);
            assert_eq!(menu.options_selected, OptionsOption::MusicToggle);
        }
    }

    #[test]
    fn test_main_menu_labels() {
        let labels: Vec<_> = MenuOption::ALL.iter().map(|option| option.label()).collect();
        assert_eq!(labels, ["New Game", "Memory Cards", "Options", "Quit"]);
    }

    #[test]
    fn test_option_labels_follow_settings() {
        let mut audio = AudioState::disabled();
        assert_eq!(
            option_label(OptionsOption::MusicToggle, &audio, true),
            "Music: OFF"
        );
        audio.toggle_sound();
        assert_eq!(
            option_label(OptionsOption::SoundToggle, &audio, true),
            "Sound: ON"
        );
        assert_eq!(
            option_label(OptionsOption::GhostToggle, &audio, false),
            "Ghost piece: OFF"
        );
        audio.set_volume(0.5);
        assert_eq!(
            option_label(OptionsOption::VolumeUp, &audio, true),
            "Volume + (0.5)"
        );
        assert_eq!(option_label(OptionsOption::Back, &audio, true), "Back");
    }
}
