#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow precision loss when casting between numeric types since exact precision isn't critical for particle effects
    clippy::cast_precision_loss,
    // Allow defining constants after statements in functions as it's clearer to define them near where they're used
    clippy::items_after_statements
)]

use bevy_ecs::prelude::*;
use log::{debug, trace};
use ratatui::style::Color;

use crate::components::{Particle, TetrominoType};
use crate::game::BOARD_WIDTH;

/// Burst from every cell of a piece that just locked. `cells` are `(col, row)`.
pub fn spawn_lock_particles(world: &mut World, kind: TetrominoType, cells: &[(i32, i32)]) {
    trace!("Spawning lock particles for {kind:?}");

    let color = kind.get_color();
    const PARTICLES_PER_BLOCK: usize = 4;

    for &(col, row) in cells {
        if row < 0 {
            continue;
        }
        for _ in 0..PARTICLES_PER_BLOCK {
            // Upward bias for the impact
            let vx = (fastrand::f32() - 0.5) * 4.0;
            let vy = (fastrand::f32() - 0.7) * 4.0;

            spawn_particle(
                world,
                (col as f32, row as f32),
                (vx, vy),
                color,
                fastrand::f32() * 0.4 + 0.2, // lifetime: 0.2 to 0.6 seconds
                fastrand::f32() * 0.8 + 0.2, // size: 0.2 to 1.0
            );
        }
    }
}

/// Spawns particles along each cleared row (indices from before the clear).
pub fn spawn_line_clear_particles(world: &mut World, rows: &[usize]) {
    debug!("Spawning line clear particles for {} lines", rows.len());

    let color = match rows.len() {
        2 => Color::LightBlue,
        3 => Color::LightGreen,
        4 => Color::LightYellow,
        _ => Color::White,
    };
    let particles_per_cell = 2 + rows.len();

    for &row in rows {
        for col in 0..BOARD_WIDTH {
            for _ in 0..particles_per_cell {
                // Mostly horizontal spread
                let vx = (fastrand::f32() - 0.5) * 8.0;
                let vy = (fastrand::f32() - 0.5) * 3.0;

                spawn_particle(
                    world,
                    (col as f32, row as f32),
                    (vx, vy),
                    color,
                    fastrand::f32() * 0.7 + 0.3, // lifetime: 0.3 to 1.0 seconds
                    fastrand::f32() * 0.6 + 0.3, // size: 0.3 to 0.9
                );
            }
        }
    }
}

pub fn update_particles(world: &mut World, delta_seconds: f32) {
    let mut entities_to_despawn = Vec::new();

    for (entity, mut particle) in world.query::<(Entity, &mut Particle)>().iter_mut(world) {
        particle.lifetime -= delta_seconds;
        if particle.lifetime <= 0.0 {
            entities_to_despawn.push(entity);
            continue;
        }

        particle.x += particle.velocity.0 * delta_seconds;
        particle.y += particle.velocity.1 * delta_seconds;

        // Friction, then a little gravity
        particle.velocity.0 *= 0.95;
        particle.velocity.1 *= 0.95;
        particle.velocity.1 += delta_seconds;

        particle.size *= 0.98;
    }

    for entity in entities_to_despawn {
        world.despawn(entity);
    }
}

pub fn clear_particles(world: &mut World) {
    let entities: Vec<Entity> = world
        .query_filtered::<Entity, With<Particle>>()
        .iter(world)
        .collect();
    for entity in entities {
        world.despawn(entity);
    }
}

fn spawn_particle(
    world: &mut World,
    position: (f32, f32),
    velocity: (f32, f32),
    color: Color,
    lifetime: f32,
    size: f32,
) {
    world.spawn(Particle {
        x: position.0,
        y: position.1,
        velocity,
        color,
        lifetime,
        size,
    });
}
