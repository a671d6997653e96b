#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use bevy_ecs::prelude::*;

    use crate::components::{Particle, TetrominoType};
    use crate::particles::{
        clear_particles, spawn_line_clear_particles, spawn_lock_particles, update_particles,
    };

    fn particle_count(world: &mut World) -> usize {
        world.query::<&Particle>().iter(world).count()
    }

    #[test]
    fn test_lock_particles_per_visible_cell() {
        let mut world = World::new();
        spawn_lock_particles(
            &mut world,
            TetrominoType::T,
            &[(4, -1), (3, 0), (4, 0), (5, 0)],
        );
        // Four particles for each of the three on-board cells
        assert_eq!(particle_count(&mut world), 12);

        let colors: Vec<_> = world
            .query::<&Particle>()
            .iter(&world)
            .map(|p| p.color)
            .collect();
        assert!(colors.iter().all(|c| *c == TetrominoType::T.get_color()));
    }

    #[test]
    fn test_line_clear_particles_scale_with_lines() {
        let mut world = World::new();
        spawn_line_clear_particles(&mut world, &[19]);
        let single = particle_count(&mut world);
        clear_particles(&mut world);

        spawn_line_clear_particles(&mut world, &[16, 17, 18, 19]);
        let four = particle_count(&mut world);

        assert_eq!(single, 10 * 3);
        assert_eq!(four, 4 * 10 * 6);
    }

    #[test]
    fn test_particles_expire() {
        let mut world = World::new();
        spawn_line_clear_particles(&mut world, &[10]);
        assert!(particle_count(&mut world) > 0);

        // Lifetimes never exceed one second
        update_particles(&mut world, 1.1);
        assert_eq!(particle_count(&mut world), 0);
    }

    #[test]
    fn test_particles_move() {
        let mut world = World::new();
        world.spawn(Particle {
            x: 2.0,
            y: 2.0,
            velocity: (1.0, -1.0),
            color: ratatui::style::Color::White,
            lifetime: 1.0,
            size: 1.0,
        });

        update_particles(&mut world, 0.5);

        let particle = world
            .query::<&Particle>()
            .iter(&world)
            .next()
            .expect("particle still alive")
            .clone();
        assert!((particle.x - 2.5).abs() < 1e-5);
        assert!((particle.y - 1.5).abs() < 1e-5);
        assert!((particle.lifetime - 0.5).abs() < 1e-5);
        assert!(particle.size < 1.0);
    }

    #[test]
    fn test_clear_particles() {
        let mut world = World::new();
        spawn_lock_particles(&mut world, TetrominoType::I, &[(0, 19)]);
        clear_particles(&mut world);
        assert_eq!(particle_count(&mut world), 0);
    }
}
