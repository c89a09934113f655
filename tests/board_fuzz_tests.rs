// Seeded random place/remove sequences checked against a plain grid model.
//
// The packed store, its grid mirror and a naive reference board must agree
// after every operation, and no cell may ever be claimed by both colors.

use gobang::board::{Grid, DIRECTIONS, NEIGHBOURS};
use gobang::{Board, Pos, Stone, BOARD_SIZE, TOTAL_CELLS, WIN_LENGTH};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_pos(rng: &mut StdRng) -> Pos {
    Pos::new(
        rng.random_range(0..BOARD_SIZE as u8),
        rng.random_range(0..BOARD_SIZE as u8),
    )
}

fn naive_has_five(grid: &Grid, color: Stone) -> bool {
    for r in 0..BOARD_SIZE as i32 {
        for c in 0..BOARD_SIZE as i32 {
            for &(dr, dc) in &DIRECTIONS {
                let all = (0..WIN_LENGTH as i32).all(|k| {
                    let (rr, cc) = (r + dr * k, c + dc * k);
                    Pos::is_valid(rr, cc) && grid[rr as usize][cc as usize] == color
                });
                if all {
                    return true;
                }
            }
        }
    }
    false
}

fn naive_winner(grid: &Grid) -> Stone {
    if naive_has_five(grid, Stone::Black) {
        Stone::Black
    } else if naive_has_five(grid, Stone::White) {
        Stone::White
    } else {
        Stone::Empty
    }
}

fn assert_consistent(board: &Board, model: &Grid) {
    let black = board.packed().stones(Stone::Black).expect("black bits");
    let white = board.packed().stones(Stone::White).expect("white bits");
    let mut stones = 0;
    for r in 0..BOARD_SIZE {
        for c in 0..BOARD_SIZE {
            let pos = Pos::new(r as u8, c as u8);
            assert_eq!(board.get(pos), model[r][c], "store at {pos}");
            assert_eq!(board.grid()[r][c], model[r][c], "mirror at {pos}");
            assert!(!(black.get(pos) && white.get(pos)), "both colors at {pos}");
            if model[r][c] != Stone::Empty {
                stones += 1;
            }
        }
    }
    assert_eq!(board.stone_count(), stones);
    assert_eq!(board.is_full(), stones == TOTAL_CELLS as u32);
    assert_eq!(board.empty_positions().count(), TOTAL_CELLS - stones as usize);
}

#[test]
fn random_place_remove_matches_model() {
    for seed in 0..8u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut board = Board::new();
        let mut model: Grid = [[Stone::Empty; BOARD_SIZE]; BOARD_SIZE];

        for _ in 0..600 {
            let pos = random_pos(&mut rng);
            let cell = &mut model[pos.row as usize][pos.col as usize];
            if rng.random_bool(0.7) {
                let stone = if rng.random_bool(0.5) {
                    Stone::Black
                } else {
                    Stone::White
                };
                let placed = board.place(pos, stone);
                assert_eq!(placed, *cell == Stone::Empty, "place at {pos}");
                if placed {
                    *cell = stone;
                    assert_eq!(board.last_move(), Some(pos));
                }
            } else {
                board.remove(pos);
                *cell = Stone::Empty;
                assert_ne!(board.last_move(), Some(pos));
            }
            assert_consistent(&board, &model);
        }

        // A fresh load scans every stone, so it must agree with the naive scan
        let reloaded = Board::from_grid(&board.to_grid());
        assert_eq!(reloaded.check_winner(), naive_winner(&model), "seed {seed}");
    }
}

#[test]
fn winner_after_each_move_matches_naive_scan() {
    for seed in 100..110u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut board = Board::new();
        let mut turn = Stone::Black;

        while board.check_winner() == Stone::Empty && !board.is_full() {
            // Play near existing stones so fives actually happen
            let candidates = board.candidate_positions();
            let pos = candidates[rng.random_range(0..candidates.len())];
            assert!(board.place(pos, turn));
            assert_eq!(board.check_winner(), naive_winner(board.grid()));
            turn = turn.opponent();
        }

        let winner = board.check_winner();
        if winner != Stone::Empty {
            let line = board.winning_line().expect("line for the winner");
            assert!(line.iter().all(|&p| board.get(p) == winner));
            assert!(line.contains(&board.last_move().expect("last move")));
        }
    }
}

#[test]
fn candidates_are_empty_neighbours_in_row_major_order() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut board = Board::new();
    for _ in 0..40 {
        let pos = random_pos(&mut rng);
        board.place(pos, Stone::White);

        let candidates = board.candidate_positions();
        assert!(candidates.windows(2).all(|w| w[0] < w[1]));
        for &cand in &candidates {
            assert!(board.is_empty(cand));
            let touches_stone = NEIGHBOURS.iter().any(|&(dr, dc)| {
                cand.offset(dr, dc, 1)
                    .is_some_and(|n| board.get(n) != Stone::Empty)
            });
            assert!(touches_stone, "{cand} has no neighbour");
        }
    }
}

#[test]
fn clones_diverge_independently() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut original = Board::new();
    for _ in 0..30 {
        original.place(random_pos(&mut rng), Stone::Black);
    }
    let snapshot = original.to_grid();

    let mut copy = original.clone();
    for _ in 0..30 {
        let pos = random_pos(&mut rng);
        copy.remove(pos);
        copy.place(random_pos(&mut rng), Stone::White);
    }
    assert_eq!(original.to_grid(), snapshot);

    let copy_snapshot = copy.to_grid();
    for _ in 0..30 {
        original.place(random_pos(&mut rng), Stone::White);
    }
    assert_eq!(copy.to_grid(), copy_snapshot);
}

#[test]
fn fill_in_random_order_until_full() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut cells: Vec<Pos> = (0..TOTAL_CELLS).map(Pos::from_index).collect();
    // Fisher-Yates with the seeded generator
    for i in (1..cells.len()).rev() {
        let j = rng.random_range(0..=i);
        cells.swap(i, j);
    }

    let mut board = Board::new();
    for (n, &pos) in cells.iter().enumerate() {
        assert!(!board.is_full());
        assert_eq!(board.empty_positions().count(), TOTAL_CELLS - n);
        assert!(board.place(pos, Stone::Black));
    }
    assert!(board.is_full());
    assert_eq!(board.empty_positions().next(), None);
    assert!(board.candidate_positions().is_empty());
}
