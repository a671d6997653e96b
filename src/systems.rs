use std::time::Duration;

use bevy_ecs::prelude::*;
use log::{debug, info, trace};

use crate::components::Input;
use crate::highscore::{HighScore, MemoryHighScore};
use crate::memory_card::{MemoryEvent, MemoryGame};
use crate::particles;
use crate::playfield::{Playfield, PlayfieldEvent};
use crate::sound::{AudioState, SoundEffect};

/// Applies every queued command to the playfield, in arrival order.
pub fn input_system(world: &mut World) {
    let commands = world.resource_mut::<Input>().take();
    if commands.is_empty() {
        return;
    }

    let mut playfield = world.resource_mut::<Playfield>();
    for command in commands {
        let applied = playfield.apply(command);
        trace!("Command {command:?} applied: {applied}");
    }
}

/// Advances gravity by the measured frame time.
pub fn gravity_system(world: &mut World, elapsed: Duration) {
    let stepped = world.resource_mut::<Playfield>().tick(elapsed);
    if stepped {
        trace!("Gravity step");
    }
}

/// Turns engine events into sounds, particles and high score updates.
pub fn event_system(world: &mut World) {
    let events = world.resource_mut::<Playfield>().drain_events();
    if events.is_empty() {
        return;
    }

    for event in events {
        match event {
            PlayfieldEvent::Started => {
                particles::clear_particles(world);
            }
            PlayfieldEvent::Moved => play(world, SoundEffect::Move),
            PlayfieldEvent::Rotated => play(world, SoundEffect::Rotate),
            PlayfieldEvent::SoftDropped => play(world, SoundEffect::SoftDrop),
            PlayfieldEvent::HardDropped { distance } => {
                debug!("Hard drop of {distance} rows");
                play(world, SoundEffect::HardDrop);
            }
            PlayfieldEvent::Locked { kind, cells } => {
                play(world, SoundEffect::Lock);
                particles::spawn_lock_particles(world, kind, &cells);
            }
            PlayfieldEvent::LinesCleared { rows, score } => {
                let effect = if rows.len() >= 4 {
                    SoundEffect::FourLines
                } else {
                    SoundEffect::LineClear
                };
                play(world, effect);
                particles::spawn_line_clear_particles(world, &rows);
                submit_score(world, score);
            }
            PlayfieldEvent::LevelUp { level } => {
                info!("Reached level {level}");
                play(world, SoundEffect::LevelUp);
            }
            PlayfieldEvent::Paused | PlayfieldEvent::Resumed => {}
            PlayfieldEvent::GameOver { score } => {
                info!("Game over, final score {score}");
                play(world, SoundEffect::GameOver);
                submit_score(world, score);
            }
        }
    }
}

/// Ages and removes particles.
pub fn particle_system(world: &mut World, elapsed: Duration) {
    particles::update_particles(world, elapsed.as_secs_f32());
}

/// Runs the memory-card clock and turns its events into sounds and the
/// memory high score.
pub fn memory_card_system(world: &mut World, elapsed: Duration) {
    let events = {
        let mut game = world.resource_mut::<MemoryGame>();
        game.tick(elapsed);
        game.drain_events()
    };

    for event in events {
        match event {
            MemoryEvent::Dealt | MemoryEvent::Hidden => {}
            MemoryEvent::Flipped { .. } => play(world, SoundEffect::CardFlip),
            MemoryEvent::Matched { pairs, .. } => {
                debug!("Pair {pairs} found");
                play(world, SoundEffect::CardMatch);
            }
            MemoryEvent::Mismatched { .. } => play(world, SoundEffect::CardMismatch),
            MemoryEvent::Won { score, .. } => {
                play(world, SoundEffect::Win);
                if let Some(mut high_score) = world.get_resource_mut::<MemoryHighScore>() {
                    if high_score.0.submit(score) {
                        info!("New memory high score: {score}");
                    }
                }
            }
        }
    }
}

fn play(world: &World, effect: SoundEffect) {
    if let Some(audio) = world.get_resource::<AudioState>() {
        audio.play_sound(effect);
    }
}

fn submit_score(world: &mut World, score: u32) {
    if let Some(mut high_score) = world.get_resource_mut::<HighScore>() {
        if high_score.submit(score) {
            info!("New high score: {score}");
        }
    }
}
