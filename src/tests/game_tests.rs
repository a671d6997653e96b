#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::game::*;

    #[test]
    fn test_board_constants() {
        assert_eq!(BOARD_WIDTH, 10);
        assert_eq!(BOARD_HEIGHT, 20);
        assert_eq!(MAX_SHAPE_SIZE, 4);
    }

    #[test]
    fn test_spawn_is_left_of_centre() {
        assert_eq!(SPAWN_COL, 4);
        assert_eq!(SPAWN_ROW, 0);
    }

    #[test]
    fn test_scoring_table() {
        assert_eq!(LINE_POINTS, [0, 100, 300, 500, 800]);
        assert_eq!(STARTING_LEVEL, 1);
        assert_eq!(POINTS_PER_LEVEL, 1000);
    }

    #[test]
    fn test_gravity_timing() {
        assert_eq!(BASE_DROP_INTERVAL, Duration::from_millis(1000));
        assert_eq!(DROP_INTERVAL_STEP, Duration::from_millis(50));
        assert!(DEFAULT_MIN_DROP_INTERVAL < BASE_DROP_INTERVAL);
    }
}
