// Screen the front end is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    MainMenu,
    Options,
    Game,
    MemoryCard,
}

// Main menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    NewGame,
    MemoryCards,
    Options,
    Quit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 4] = [
        MenuOption::NewGame,
        MenuOption::MemoryCards,
        MenuOption::Options,
        MenuOption::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuOption::NewGame => "New Game",
            MenuOption::MemoryCards => "Memory Cards",
            MenuOption::Options => "Options",
            MenuOption::Quit => "Quit",
        }
    }
}

// Options menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsOption {
    MusicToggle,
    SoundToggle,
    VolumeUp,
    VolumeDown,
    GhostToggle,
    Back,
}

impl OptionsOption {
    pub const ALL: [OptionsOption; 6] = [
        OptionsOption::MusicToggle,
        OptionsOption::SoundToggle,
        OptionsOption::VolumeUp,
        OptionsOption::VolumeDown,
        OptionsOption::GhostToggle,
        OptionsOption::Back,
    ];
}

#[derive(Debug, Clone)]
pub struct Menu {
    pub state: MenuState,
    pub selected_option: MenuOption,
    pub options_selected: OptionsOption,
}

impl Default for Menu {
    fn default() -> Self {
        Self {
            state: MenuState::MainMenu,
            selected_option: MenuOption::NewGame,
            options_selected: OptionsOption::MusicToggle,
        }
    }
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_option(&mut self) {
        match self.state {
            MenuState::MainMenu => {
                self.selected_option = cycle(&MenuOption::ALL, self.selected_option, 1);
            }
            MenuState::Options => {
                self.options_selected = cycle(&OptionsOption::ALL, self.options_selected, 1);
            }
            MenuState::Game | MenuState::MemoryCard => {}
        }
    }

    pub fn prev_option(&mut self) {
        match self.state {
            MenuState::MainMenu => {
                self.selected_option =
                    cycle(&MenuOption::ALL, self.selected_option, MenuOption::ALL.len() - 1);
            }
            MenuState::Options => {
                self.options_selected = cycle(
                    &OptionsOption::ALL,
                    self.options_selected,
                    OptionsOption::ALL.len() - 1,
                );
            }
            MenuState::Game | MenuState::MemoryCard => {}
        }
    }
}

// Step `by` entries forward through `items`, wrapping around
fn cycle<T: Copy + PartialEq>(items: &[T], current: T, by: usize) -> T {
    let index = items.iter().position(|item| *item == current).unwrap_or(0);
    items[(index + by) % items.len()]
}
