#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::components::*;
    use crate::game::{BOARD_HEIGHT, BOARD_WIDTH};
    use crate::playfield::Command;

    #[test]
    fn test_color_ids_cover_one_to_seven() {
        for (index, kind) in TetrominoType::ALL.iter().enumerate() {
            assert_eq!(usize::from(kind.color_id()), index + 1);
        }
    }

    #[test]
    fn test_every_shape_has_four_cells() {
        for kind in TetrominoType::ALL {
            let shape = kind.shape();
            assert_eq!(shape.filled_cells().count(), 4, "{kind:?}");
            let expected_size = if kind == TetrominoType::I { 4 } else { 3 };
            assert_eq!(shape.size(), expected_size, "{kind:?}");
        }
    }

    #[test]
    fn test_rotation_is_clockwise() {
        let t = TetrominoType::T.shape();
        let rotated = t.rotated();
        assert_eq!(rotated, Shape::from_rows(&[".X.", ".XX", ".X."]));

        let j = TetrominoType::J.shape();
        assert_eq!(j.rotated(), Shape::from_rows(&[".XX", ".X.", ".X."]));
    }

    #[test]
    fn test_is_filled_outside_size() {
        let shape = TetrominoType::O.shape();
        assert!(shape.is_filled(0, 1));
        assert!(!shape.is_filled(0, 0));
        assert!(!shape.is_filled(3, 3));
        assert!(!shape.is_filled(10, 0));
    }

    #[test]
    fn test_piece_cells_are_col_row() {
        let mut piece = Piece::new(TetrominoType::J);
        piece.anchor = Anchor::new(2, 5);
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(cells, vec![(2, 5), (2, 6), (3, 6), (4, 6)]);
    }

    #[test]
    fn test_spawn_anchor() {
        let piece = Piece::new(TetrominoType::T);
        assert_eq!(piece.anchor, Anchor::new(4, 0));
        assert_eq!(Anchor::spawn().offset(-1, 2), Anchor::new(3, 2));
    }

    #[test]
    fn test_board_dump_uses_color_ids() {
        let mut board = Board::new();
        board.set(0, BOARD_HEIGHT - 1, Some(TetrominoType::I));
        board.set(BOARD_WIDTH - 1, BOARD_HEIGHT - 1, Some(TetrominoType::Z));
        board.set(4, 0, Some(TetrominoType::T));

        let dump = board.to_string();
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), BOARD_HEIGHT);
        assert!(lines.iter().all(|line| line.len() == BOARD_WIDTH));
        assert_eq!(lines[0], "....6.....");
        assert_eq!(lines[1], "..........");
        assert_eq!(lines[BOARD_HEIGHT - 1], "1........7");
    }

    #[test]
    fn test_board_set_out_of_range_ignored() {
        let mut board = Board::new();
        board.set(BOARD_WIDTH, 0, Some(TetrominoType::I));
        board.set(0, BOARD_HEIGHT, Some(TetrominoType::I));
        assert!(board.is_empty());
        assert_eq!(board.get(BOARD_WIDTH, 0), None);

        board.set(3, 7, Some(TetrominoType::S));
        assert_eq!(board.get(3, 7), Some(TetrominoType::S));
        board.clear();
        assert!(board.is_empty());
    }

    #[test]
    fn test_valid_position_allows_rows_above_board() {
        let board = Board::new();
        // Vertical I, filling matrix column 2
        let shape = TetrominoType::I.shape().rotated();
        assert!(board.is_valid_position(&shape, Anchor::new(0, -3)));
        assert!(!board.is_valid_position(&shape, Anchor::new(-3, 0)));
        assert!(!board.is_valid_position(&shape, Anchor::new(0, 17)));
        assert!(board.is_valid_position(&shape, Anchor::new(0, 16)));
    }

    #[test]
    fn test_valid_position_rejects_overlap() {
        let mut board = Board::new();
        board.set(5, 10, Some(TetrominoType::Z));
        let shape = TetrominoType::O.shape();
        assert!(!board.is_valid_position(&shape, Anchor::new(4, 9)));
        assert!(board.is_valid_position(&shape, Anchor::new(5, 9)));
    }

    #[test]
    fn test_lock_piece_skips_hidden_rows() {
        let mut board = Board::new();
        let mut piece = Piece::new(TetrominoType::O);
        piece.anchor = Anchor::new(0, -1);
        board.lock_piece(&piece);

        assert_eq!(board.get(1, 0), Some(TetrominoType::O));
        assert_eq!(board.get(2, 0), Some(TetrominoType::O));
        assert_eq!(board.rows().iter().flatten().filter(|c| c.is_some()).count(), 2);
    }

    #[test]
    fn test_clear_lines_without_full_rows() {
        let mut board = Board::new();
        board.set(0, 19, Some(TetrominoType::L));
        let before = board.clone();
        assert_eq!(board.clear_lines_with_indices(), (0, Vec::new()));
        assert_eq!(board, before);
    }

    #[test]
    fn test_input_queue_drains_in_order() {
        let mut input = Input::default();
        input.push(Command::MoveLeft);
        input.push(Command::Rotate);
        assert_eq!(input.take(), vec![Command::MoveLeft, Command::Rotate]);
        assert!(input.take().is_empty());
    }
}
