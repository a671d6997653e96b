#![warn(clippy::all, clippy::pedantic)]

use std::time::Duration;

use bevy_ecs::prelude::*;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use log::{debug, info, warn};

use crate::Time;
use crate::components::Input;
use crate::config::{Config, loader};
use crate::highscore::{HIGH_SCORE_FILE, HighScore, MEMORY_HIGH_SCORE_FILE, MemoryHighScore};
use crate::input::{command_for_key, memory_command_for_key};
use crate::memory_card::MemoryGame;
use crate::menu_types::{Menu, MenuOption, MenuState, OptionsOption};
use crate::particles;
use crate::playfield::{Command, Playfield};
use crate::sound::AudioState;
use crate::systems;

pub type AppResult<T> = anyhow::Result<T>;

const VOLUME_STEP: f32 = 0.1;

pub struct App {
    pub world: World,
    pub should_quit: bool,
    pub menu: Menu,
    pub show_ghost: bool,
    config: Config,
    persist_settings: bool,
}

impl App {
    /// Builds the app from the global configuration, with a real audio
    /// thread and the configured high score files.
    pub fn new() -> Self {
        let config = Config::current();
        let audio = AudioState::from_config(&config.audio);
        let high_score =
            HighScore::load_default(config.storage.high_score_path.as_deref(), HIGH_SCORE_FILE);
        let memory_high_score = HighScore::load_default(
            config.storage.memory_high_score_path.as_deref(),
            MEMORY_HIGH_SCORE_FILE,
        );
        let mut app = Self::with_resources(config, audio, high_score, memory_high_score);
        app.persist_settings = true;
        app
    }

    /// Builds the app around explicit collaborators. Settings changed in the
    /// options menu are kept in memory only.
    pub fn with_resources(
        config: Config,
        audio: AudioState,
        high_score: HighScore,
        memory_high_score: HighScore,
    ) -> Self {
        let (mut playfield, memory_game) = match config.gameplay.seed {
            Some(seed) => (Playfield::with_seed(seed), MemoryGame::with_seed(seed)),
            None => (Playfield::new(), MemoryGame::new()),
        };
        playfield = playfield.with_min_drop_interval(config.gameplay.min_drop_interval());

        let mut world = World::new();
        world.insert_resource(Time::new());
        world.insert_resource(Input::default());
        world.insert_resource(playfield);
        world.insert_resource(audio);
        world.insert_resource(high_score);
        world.insert_resource(memory_game);
        world.insert_resource(MemoryHighScore(memory_high_score));

        Self {
            world,
            should_quit: false,
            menu: Menu::new(),
            show_ghost: config.gameplay.show_ghost,
            config,
            persist_settings: false,
        }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn playfield(&self) -> &Playfield {
        self.world.resource::<Playfield>()
    }

    pub fn high_score(&self) -> u32 {
        self.world.resource::<HighScore>().best()
    }

    pub fn memory_game(&self) -> &MemoryGame {
        self.world.resource::<MemoryGame>()
    }

    pub fn memory_high_score(&self) -> u32 {
        self.world.resource::<MemoryHighScore>().0.best()
    }

    /// Leaves the menu with a fresh board and a running game.
    pub fn start_game(&mut self) {
        info!("New game from menu");
        self.menu.state = MenuState::Game;
        self.world.resource_mut::<Playfield>().reset();
        self.world.resource_mut::<Input>().push(Command::Start);
        self.run_frame(Duration::ZERO);
    }

    /// Deals a fresh memory-card grid and shows it.
    pub fn start_memory_game(&mut self) {
        info!("New memory game from menu");
        self.menu.state = MenuState::MemoryCard;
        self.world.resource_mut::<MemoryGame>().deal();
        self.run_frame(Duration::ZERO);
    }

    /// Abandons the current game and shows the main menu.
    pub fn return_to_menu(&mut self) {
        debug!("Returning to main menu");
        if self.menu.state == MenuState::MemoryCard {
            self.menu.state = MenuState::MainMenu;
            return;
        }
        self.world.resource_mut::<Playfield>().reset();
        self.world.resource_mut::<Input>().take();
        particles::clear_particles(&mut self.world);
        self.menu.state = MenuState::MainMenu;
    }

    /// Measures the time since the last frame and advances the game by it.
    pub fn tick(&mut self) {
        let elapsed = {
            let mut time = self.world.resource_mut::<Time>();
            time.update();
            time.delta()
        };
        self.run_frame(elapsed);
    }

    /// Runs one frame of the systems for the game on screen. Nothing
    /// advances in the menus.
    pub fn run_frame(&mut self, elapsed: Duration) {
        match self.menu.state {
            MenuState::Game => {
                systems::input_system(&mut self.world);
                systems::gravity_system(&mut self.world, elapsed);
                systems::event_system(&mut self.world);
                systems::particle_system(&mut self.world, elapsed);
            }
            MenuState::MemoryCard => systems::memory_card_system(&mut self.world, elapsed),
            MenuState::MainMenu | MenuState::Options => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        if key.code == KeyCode::Char('q') {
            self.should_quit = true;
            return;
        }

        match self.menu.state {
            MenuState::Game => self.handle_game_key(key.code),
            MenuState::MemoryCard => self.handle_memory_key(key.code),
            MenuState::MainMenu | MenuState::Options => self.handle_menu_key(key.code),
        }
    }

    fn handle_game_key(&mut self, code: KeyCode) {
        if code == KeyCode::Esc {
            self.return_to_menu();
            return;
        }
        let phase = self.playfield().phase();
        if let Some(command) = command_for_key(code, phase) {
            self.world.resource_mut::<Input>().push(command);
        }
    }

    fn handle_memory_key(&mut self, code: KeyCode) {
        if code == KeyCode::Esc {
            self.return_to_menu();
            return;
        }
        let phase = self.memory_game().phase();
        if let Some(command) = memory_command_for_key(code, phase) {
            self.world.resource_mut::<MemoryGame>().apply(command);
        }
    }

    fn handle_menu_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('w') => self.menu.prev_option(),
            KeyCode::Down | KeyCode::Char('s') => self.menu.next_option(),
            KeyCode::Enter | KeyCode::Char(' ') => self.select(),
            KeyCode::Esc => {
                if self.menu.state == MenuState::Options {
                    self.menu.state = MenuState::MainMenu;
                }
            }
            KeyCode::Left if self.in_options(OptionsOption::VolumeDown) => {
                self.adjust_volume(-VOLUME_STEP);
            }
            KeyCode::Right if self.in_options(OptionsOption::VolumeUp) => {
                self.adjust_volume(VOLUME_STEP);
            }
            _ => {}
        }
    }

    /// Activates the highlighted menu entry.
    pub fn select(&mut self) {
        match self.menu.state {
            MenuState::MainMenu => match self.menu.selected_option {
                MenuOption::NewGame => self.start_game(),
                MenuOption::MemoryCards => self.start_memory_game(),
                MenuOption::Options => self.menu.state = MenuState::Options,
                MenuOption::Quit => self.should_quit = true,
            },
            MenuState::Options => match self.menu.options_selected {
                OptionsOption::MusicToggle => {
                    self.world.resource_mut::<AudioState>().toggle_music();
                    self.save_settings();
                }
                OptionsOption::SoundToggle => {
                    self.world.resource_mut::<AudioState>().toggle_sound();
                    self.save_settings();
                }
                OptionsOption::VolumeUp => self.adjust_volume(VOLUME_STEP),
                OptionsOption::VolumeDown => self.adjust_volume(-VOLUME_STEP),
                OptionsOption::GhostToggle => {
                    self.show_ghost = !self.show_ghost;
                    self.save_settings();
                }
                OptionsOption::Back => self.menu.state = MenuState::MainMenu,
            },
            MenuState::Game | MenuState::MemoryCard => {}
        }
    }

    fn in_options(&self, option: OptionsOption) -> bool {
        self.menu.state == MenuState::Options && self.menu.options_selected == option
    }

    fn adjust_volume(&mut self, step: f32) {
        {
            let mut audio = self.world.resource_mut::<AudioState>();
            let volume = audio.get_volume();
            audio.set_volume(volume + step);
        }
        self.save_settings();
    }

    // Copy the live settings into the config and write them out
    fn save_settings(&mut self) {
        self.config.audio = self.world.resource::<AudioState>().to_config();
        self.config.gameplay.show_ghost = self.show_ghost;

        if !self.persist_settings {
            return;
        }
        Config::install(self.config.clone());
        if let Err(e) = loader::save_config_to_file(&self.config) {
            warn!("Failed to save settings: {e}");
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
