use bitvec::prelude::*;
use itertools::iproduct;
use rand::Rng;
use std::num::NonZeroU8;

use super::board::{Board, BLOCK_SIZE, HEIGHT, MAX_VALUE, NUM_FIELDS, WIDTH};
use super::solver::{complete, SolverError};

/// Generates a random sudoku puzzle with `empty_cells` cells left blank.
/// `empty_cells` is clamped to the number of cells on the board, so counts
/// of 81 and above produce a completely empty board.
pub fn generate(empty_cells: usize) -> Result<Board, SolverError> {
    generate_with_rng(empty_cells, &mut rand::thread_rng())
}

/// Same as [generate] but draws all randomness from the given generator,
/// so a seeded rng yields a reproducible puzzle.
pub fn generate_with_rng(empty_cells: usize, rng: &mut impl Rng) -> Result<Board, SolverError> {
    let mut board = generate_solved_with_rng(rng)?;
    remove_digits(&mut board, rng, empty_cells);
    Ok(board)
}

/// Generates a random fully solved board, i.e. the grid a puzzle from
/// [generate] is punched out of.
pub fn generate_solved() -> Result<Board, SolverError> {
    generate_solved_with_rng(&mut rand::thread_rng())
}

/// Same as [generate_solved] but draws all randomness from the given generator.
pub fn generate_solved_with_rng(rng: &mut impl Rng) -> Result<Board, SolverError> {
    let mut board = Board::new_empty();
    fill_diagonal_blocks(&mut board, rng);
    complete(&mut board)?;
    Ok(board)
}

// The three diagonal blocks share no row, column or block with each other,
// so they can be filled independently without ever making the board
// uncompletable. All variety in the final grid comes from this seed, the
// solver itself tries digits in a fixed order.
fn fill_diagonal_blocks(board: &mut Board, rng: &mut impl Rng) {
    for start in (0..HEIGHT).step_by(BLOCK_SIZE) {
        fill_block(board, rng, start, start);
    }
}

// Fills an empty 3x3 block with a random permutation of 1..=9 by redrawing
// candidates until one is still unused within the block. Terminates because
// the block has exactly as many cells as there are digits.
fn fill_block(board: &mut Board, rng: &mut impl Rng, start_row: usize, start_col: usize) {
    let mut used = bitarr![0; 10];
    for (row_offset, col_offset) in iproduct!(0..BLOCK_SIZE, 0..BLOCK_SIZE) {
        let (row, col) = (start_row + row_offset, start_col + col_offset);
        assert!(board.get(row, col).is_none());
        let digit = loop {
            let candidate = rng.gen_range(1..=MAX_VALUE);
            if !used[candidate as usize] {
                break candidate;
            }
        };
        used.set(digit as usize, true);
        board.set(row, col, NonZeroU8::new(digit));
    }
}

// Punches holes into a board by repeatedly picking a uniformly random cell
// and clearing it if it still holds a digit. The count is clamped to the
// board size first. Without the clamp the loop could never finish once every
// cell is empty.
fn remove_digits(board: &mut Board, rng: &mut impl Rng, empty_cells: usize) {
    let mut remaining = empty_cells.min(NUM_FIELDS);
    while remaining > 0 {
        let cell_index = rng.gen_range(0..NUM_FIELDS);
        let (row, col) = (cell_index / WIDTH, cell_index % WIDTH);
        if board.get(row, col).is_some() {
            board.set(row, col, None);
            remaining -= 1;
        }
    }
}
