#![warn(clippy::all, clippy::pedantic)]

pub mod components_tests;
pub mod game_tests;
pub mod highscore_tests;
pub mod memory_card_tests;
pub mod menu_tests;
pub mod particles_tests;
pub mod ui_tests;
