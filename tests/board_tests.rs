//! Board tests - grid storage and line extraction

use tui_2048::core::{slide_line, Board, ConfigError};
use tui_2048::types::{Direction, Position, DEFAULT_BOARD_SIZE, EMPTY, MAX_BOARD_SIZE, MIN_BOARD_SIZE};

fn numbered(size: usize) -> Board {
    let rows: Vec<Vec<u32>> = (0..size)
        .map(|r| (0..size).map(|c| 1 << (r * size + c + 1)).collect())
        .collect();
    Board::from_rows(&rows).unwrap()
}

#[test]
fn test_board_new_empty() {
    let board = Board::default();
    assert_eq!(board.size(), DEFAULT_BOARD_SIZE);

    // All cells should be empty
    for row in 0..DEFAULT_BOARD_SIZE {
        for col in 0..DEFAULT_BOARD_SIZE {
            let pos = Position::new(row, col);
            assert!(board.is_empty_at(pos), "Cell ({}, {}) should be empty", row, col);
            assert_eq!(board.get(pos), Some(EMPTY));
        }
    }
    assert_eq!(board.count_empty(), 16);
    assert_eq!(board.highest_tile(), EMPTY);
}

#[test]
fn test_board_size_is_clamped() {
    assert_eq!(Board::new(0).size(), MIN_BOARD_SIZE);
    assert_eq!(Board::new(100).size(), MAX_BOARD_SIZE);
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new(4);
    assert_eq!(board.get(Position::new(4, 0)), None);
    assert_eq!(board.get(Position::new(0, 4)), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new(4);

    assert!(board.set(Position::new(1, 2), 8));
    assert_eq!(board.get(Position::new(1, 2)), Some(8));
    assert!(!board.is_empty_at(Position::new(1, 2)));

    // Clear a cell
    assert!(board.set(Position::new(1, 2), EMPTY));
    assert_eq!(board.get(Position::new(1, 2)), Some(EMPTY));

    // Should return false for out of bounds
    assert!(!board.set(Position::new(9, 0), 2));
}

#[test]
fn test_from_rows_validation() {
    assert!(matches!(
        Board::from_rows(&[vec![2, 0], vec![0]]),
        Err(ConfigError::RaggedRow { row: 1, len: 1, expected: 2 })
    ));
    assert!(matches!(
        Board::from_rows(&[vec![2, 3], vec![0, 0]]),
        Err(ConfigError::InvalidTile { value: 3, .. })
    ));
    assert!(matches!(
        Board::from_rows(&[vec![2]]),
        Err(ConfigError::BoardSize(1))
    ));
}

#[test]
fn test_lines_in_travel_order() {
    let board = numbered(3);
    // Row 0 holds 2, 4, 8; column 0 holds 2, 16, 128.
    assert_eq!(board.line(Direction::Left, 0), vec![2, 4, 8]);
    assert_eq!(board.line(Direction::Right, 0), vec![8, 4, 2]);
    assert_eq!(board.line(Direction::Up, 0), vec![2, 16, 128]);
    assert_eq!(board.line(Direction::Down, 0), vec![128, 16, 2]);
}

#[test]
fn test_write_line_round_trips_each_direction() {
    for dir in Direction::ALL {
        let mut board = numbered(4);
        for index in 0..4 {
            let line = board.line(dir, index);
            board.write_line(dir, index, &line);
        }
        assert_eq!(board, numbered(4), "direction {:?}", dir);
    }
}

#[test]
fn test_slide_through_board_lines() {
    let mut board = Board::from_rows(&[
        vec![0, 2, 0, 2],
        vec![0, 0, 0, 0],
        vec![0, 0, 0, 0],
        vec![0, 0, 0, 0],
    ])
    .unwrap();

    let slide = slide_line(&board.line(Direction::Right, 0), None);
    assert!(slide.changed);
    assert_eq!(slide.points, 4);
    board.write_line(Direction::Right, 0, &slide.values);
    assert_eq!(board.rows()[0], vec![0, 0, 0, 4]);
}

#[test]
fn test_terminal_detection() {
    let full_distinct = Board::from_rows(&[vec![2, 4], vec![8, 16]]).unwrap();
    assert!(full_distinct.is_terminal(None));

    let full_with_pair = Board::from_rows(&[vec![2, 2], vec![8, 16]]).unwrap();
    assert!(!full_with_pair.is_terminal(None));
    // The pair would exceed a cap of 2, so it cannot merge.
    assert!(full_with_pair.has_mergeable_neighbors(Some(4)));
    assert!(!full_with_pair.has_mergeable_neighbors(Some(2)));

    let with_gap = Board::from_rows(&[vec![2, 4], vec![8, 0]]).unwrap();
    assert!(!with_gap.is_terminal(None));
}

#[test]
fn test_board_clear_and_sum() {
    let mut board = numbered(2);
    assert_eq!(board.sum(), 2 + 4 + 8 + 16);
    assert_eq!(board.highest_tile(), 16);
    board.clear();
    assert_eq!(board.count_empty(), 4);
    assert_eq!(board.sum(), 0);
}
