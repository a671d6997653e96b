#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::Duration;

    use tempfile::tempdir;

    use crate::highscore::MemoryHighScore;
    use crate::memory_card::{
        CARD_COUNT, CardState, CursorMove, FACES, MATCH_POINTS, MISMATCH_DELAY, MemoryCommand,
        MemoryEvent, MemoryGame, MemoryPhase,
    };
    use crate::systems::memory_card_system;
    use crate::tests::test_utils::{create_memory_world, paired_faces};

    fn paired_game() -> MemoryGame {
        let mut game = MemoryGame::with_seed(3);
        game.set_faces(&paired_faces());
        game
    }

    fn solve(game: &mut MemoryGame) {
        for index in (0..CARD_COUNT).step_by(2) {
            assert!(game.flip(index));
            assert!(game.flip(index + 1));
        }
    }

    #[test]
    fn test_deal_holds_every_face_twice() {
        let game = MemoryGame::with_seed(1);
        assert_eq!(game.cards().len(), CARD_COUNT);
        for face in 0..FACES.len() {
            let count = game.cards().iter().filter(|card| card.face == face).count();
            assert_eq!(count, 2, "face {face}");
        }
        assert!(game.cards().iter().all(|card| card.state == CardState::Hidden));
        assert_eq!(game.phase(), MemoryPhase::Playing);
        assert_eq!((game.score(), game.moves(), game.seconds()), (0, 0, 0));
    }

    #[test]
    fn test_same_seed_same_deal() {
        let first = MemoryGame::with_seed(42);
        let second = MemoryGame::with_seed(42);
        assert_eq!(first.cards(), second.cards());
    }

    #[test]
    fn test_matching_pair_scores_and_stays_up() {
        let mut game = paired_game();

        assert!(game.flip(0));
        assert_eq!(game.moves(), 0);
        assert!(game.flip(1));

        assert_eq!(game.moves(), 1);
        assert_eq!(game.score(), MATCH_POINTS);
        assert_eq!(game.matched_pairs(), 1);
        assert_eq!(game.cards()[0].state, CardState::Matched);
        assert_eq!(game.cards()[1].state, CardState::Matched);
        assert!(!game.is_locked());
        assert_eq!(
            game.drain_events(),
            vec![
                MemoryEvent::Flipped { index: 0 },
                MemoryEvent::Flipped { index: 1 },
                MemoryEvent::Matched {
                    pairs: 1,
                    score: MATCH_POINTS
                },
            ]
        );
    }

    #[test]
    fn test_mismatch_locks_then_turns_back() {
        let mut game = paired_game();
        assert!(game.flip(0));
        assert!(game.flip(2));

        // Score never goes below zero
        assert_eq!(game.score(), 0);
        assert_eq!(game.moves(), 1);
        assert!(game.is_locked());
        assert!(!game.flip(4));
        assert_eq!(game.cards()[4].state, CardState::Hidden);

        game.tick(MISMATCH_DELAY - Duration::from_millis(1));
        assert_eq!(game.cards()[0].state, CardState::Revealed);
        assert_eq!(game.cards()[2].state, CardState::Revealed);

        game.tick(Duration::from_millis(1));
        assert!(!game.is_locked());
        assert_eq!(game.cards()[0].state, CardState::Hidden);
        assert_eq!(game.cards()[2].state, CardState::Hidden);
        assert_eq!(game.drain_events().last(), Some(&MemoryEvent::Hidden));

        // Board is open again
        assert!(game.flip(4));
    }

    #[test]
    fn test_mismatch_costs_points() {
        let mut game = paired_game();
        game.flip(0);
        game.flip(1);
        game.flip(2);
        game.flip(4);
        assert_eq!(game.score(), 90);
        assert_eq!(game.moves(), 2);
    }

    #[test]
    fn test_face_up_and_unknown_cards_ignored() {
        let mut game = paired_game();
        assert!(game.flip(3));
        assert!(!game.flip(3));
        assert!(!game.flip(CARD_COUNT));
        assert_eq!(game.moves(), 0);

        assert!(game.flip(2));
        assert!(!game.flip(2));
        assert_eq!(game.moves(), 1);
    }

    #[test]
    fn test_last_pair_wins_and_stops_clock() {
        let mut game = paired_game();
        game.tick(Duration::from_secs(5));
        solve(&mut game);

        assert!(game.is_won());
        assert_eq!(game.score(), MATCH_POINTS * 8);
        assert_eq!(game.moves(), 8);
        assert_eq!(
            game.drain_events().last(),
            Some(&MemoryEvent::Won {
                score: 800,
                moves: 8,
                seconds: 5
            })
        );

        game.tick(Duration::from_secs(30));
        assert_eq!(game.seconds(), 5);
        assert!(!game.flip(0));
    }

    #[test]
    fn test_clock_label() {
        let mut game = paired_game();
        game.tick(Duration::from_millis(61_500));
        assert_eq!(game.seconds(), 61);
        assert_eq!(game.time_label(), "01:01");
    }

    #[test]
    fn test_cursor_wraps_within_grid() {
        let mut game = paired_game();
        assert_eq!(game.cursor(), 0);

        game.move_cursor(CursorMove::Left);
        assert_eq!(game.cursor(), 3);
        game.move_cursor(CursorMove::Up);
        assert_eq!(game.cursor(), 15);
        game.move_cursor(CursorMove::Right);
        assert_eq!(game.cursor(), 12);
        game.move_cursor(CursorMove::Down);
        assert_eq!(game.cursor(), 0);
    }

    #[test]
    fn test_commands_flip_selected_card() {
        let mut game = paired_game();
        assert!(game.apply(MemoryCommand::Flip));
        assert!(game.apply(MemoryCommand::Cursor(CursorMove::Right)));
        assert!(game.apply(MemoryCommand::Flip));
        assert_eq!(game.matched_pairs(), 1);
    }

    #[test]
    fn test_play_again_resets_session() {
        let mut game = paired_game();
        solve(&mut game);
        game.move_cursor(CursorMove::Down);

        assert!(game.apply(MemoryCommand::PlayAgain));
        assert_eq!(game.phase(), MemoryPhase::Playing);
        assert_eq!((game.score(), game.moves(), game.matched_pairs()), (0, 0, 0));
        assert_eq!(game.cursor(), 0);
        assert!(game.cards().iter().all(|card| !card.is_face_up()));
        assert!(game.drain_events().contains(&MemoryEvent::Dealt));
    }

    #[test]
    fn test_system_turns_mismatch_back() {
        let dir = tempdir().expect("Failed to create temp directory");
        let mut world = create_memory_world(&dir.path().join("memory.txt"));
        world.resource_mut::<MemoryGame>().flip(0);
        world.resource_mut::<MemoryGame>().flip(2);

        memory_card_system(&mut world, MISMATCH_DELAY);

        let game = world.resource::<MemoryGame>();
        assert!(!game.is_locked());
        assert_eq!(game.cards()[0].state, CardState::Hidden);
    }

    #[test]
    fn test_system_records_winning_score() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("memory.txt");
        let mut world = create_memory_world(&path);
        solve(&mut world.resource_mut::<MemoryGame>());

        memory_card_system(&mut world, Duration::ZERO);

        assert_eq!(world.resource::<MemoryHighScore>().0.best(), 800);
        let saved = fs::read_to_string(&path).expect("Failed to read high score");
        assert_eq!(saved.trim(), "800");
    }

    #[test]
    fn test_system_keeps_better_stored_score() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("memory.txt");
        fs::write(&path, "900").expect("Failed to seed high score");
        let mut world = create_memory_world(&path);
        solve(&mut world.resource_mut::<MemoryGame>());

        memory_card_system(&mut world, Duration::ZERO);

        assert_eq!(world.resource::<MemoryHighScore>().0.best(), 900);
        let saved = fs::read_to_string(&path).expect("Failed to read high score");
        assert_eq!(saved.trim(), "900");
    }
}
