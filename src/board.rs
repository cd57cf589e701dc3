use bitvec::prelude::*;
use itertools::iproduct;
use std::fmt;
use std::num::NonZeroU8;

pub const WIDTH: usize = 9;
pub const HEIGHT: usize = 9;
pub const NUM_FIELDS: usize = WIDTH * HEIGHT;
pub const BLOCK_SIZE: usize = 3;
pub const MAX_VALUE: u8 = 9;

/// A [Board] is a 9x9 sudoku board.
/// Each cell either holds a digit in 1..=9 or is empty.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Board {
    // Cells are ordered by rows, first left-to-right, then top-to-bottom.
    // A zero byte means the cell is empty.
    cells: [u8; NUM_FIELDS],
}

impl Board {
    #[inline]
    pub fn new_empty() -> Self {
        Board {
            cells: [0; NUM_FIELDS],
        }
    }

    /// Parses a board from a string with one character per cell, row by row.
    /// Digits stand for themselves, `_` marks an empty cell and whitespace
    /// is ignored. Panics if the input doesn't describe exactly 81 cells.
    pub fn from_str(board_str: &str) -> Self {
        let mut board = Board::new_empty();
        let mut index = 0;
        for character in board_str.chars() {
            if character.is_whitespace() {
                continue;
            }
            let value = match character {
                '_' => 0,
                '1'..='9' => character as u8 - b'0',
                _ => panic!("Invalid character in board string: {character}"),
            };
            assert!(index < NUM_FIELDS, "Board string has too many cells");
            board.cells[index] = value;
            index += 1;
        }
        assert_eq!(NUM_FIELDS, index, "Board string has too few cells");
        board
    }

    fn index(row: usize, col: usize) -> usize {
        assert!(row < HEIGHT && col < WIDTH);
        row * WIDTH + col
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<NonZeroU8> {
        NonZeroU8::new(self.cells[Self::index(row, col)])
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: Option<NonZeroU8>) {
        let value = value.map_or(0, NonZeroU8::get);
        assert!(value <= MAX_VALUE);
        self.cells[Self::index(row, col)] = value;
    }

    pub fn num_empty(&self) -> usize {
        self.cells.iter().filter(|&&value| value == 0).count()
    }

    pub fn is_filled(&self) -> bool {
        self.cells.iter().all(|&value| value != 0)
    }

    /// Returns true if `digit` doesn't appear anywhere in the given row yet.
    pub fn row_allows(&self, row: usize, digit: NonZeroU8) -> bool {
        (0..WIDTH).all(|col| self.cells[Self::index(row, col)] != digit.get())
    }

    /// Returns true if `digit` doesn't appear anywhere in the given column yet.
    pub fn col_allows(&self, col: usize, digit: NonZeroU8) -> bool {
        (0..HEIGHT).all(|row| self.cells[Self::index(row, col)] != digit.get())
    }

    /// Returns true if `digit` doesn't appear in the 3x3 block with the given
    /// top-left corner yet. `start_row` and `start_col` must be block-aligned.
    pub fn block_allows(&self, start_row: usize, start_col: usize, digit: NonZeroU8) -> bool {
        assert!(start_row % BLOCK_SIZE == 0 && start_col % BLOCK_SIZE == 0);
        iproduct!(0..BLOCK_SIZE, 0..BLOCK_SIZE).all(|(row_offset, col_offset)| {
            self.cells[Self::index(start_row + row_offset, start_col + col_offset)] != digit.get()
        })
    }

    /// Returns true if placing `digit` at the given cell violates no row,
    /// column or block constraint.
    pub fn is_safe(&self, row: usize, col: usize, digit: NonZeroU8) -> bool {
        self.row_allows(row, digit)
            && self.col_allows(col, digit)
            && self.block_allows(row - row % BLOCK_SIZE, col - col % BLOCK_SIZE, digit)
    }

    /// Returns true if some row, column or block contains the same digit
    /// twice. Empty cells are ignored, so a partially punched out puzzle
    /// stays conflict-free.
    pub fn has_conflicts(&self) -> bool {
        for row in 0..HEIGHT {
            if Self::has_duplicates((0..WIDTH).map(|col| self.cells[Self::index(row, col)])) {
                return true;
            }
        }
        for col in 0..WIDTH {
            if Self::has_duplicates((0..HEIGHT).map(|row| self.cells[Self::index(row, col)])) {
                return true;
            }
        }
        for (start_row, start_col) in iproduct!(
            (0..HEIGHT).step_by(BLOCK_SIZE),
            (0..WIDTH).step_by(BLOCK_SIZE)
        ) {
            if Self::has_duplicates(
                iproduct!(0..BLOCK_SIZE, 0..BLOCK_SIZE).map(|(row_offset, col_offset)| {
                    self.cells[Self::index(start_row + row_offset, start_col + col_offset)]
                }),
            ) {
                return true;
            }
        }
        false
    }

    fn has_duplicates(values: impl Iterator<Item = u8>) -> bool {
        // One bit per digit. Bit 0 stays unused so digits can index directly.
        let mut seen = bitarr![0; 10];
        for value in values {
            if value == 0 {
                continue;
            }
            if seen[value as usize] {
                return true;
            }
            seen.set(value as usize, true);
        }
        false
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..HEIGHT {
            if row % BLOCK_SIZE == 0 {
                writeln!(f, "+-------+-------+-------+")?;
            }
            for col in 0..WIDTH {
                if col % BLOCK_SIZE == 0 {
                    write!(f, "| ")?;
                }
                match self.get(row, col) {
                    Some(digit) => write!(f, "{digit} ")?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f, "|")?;
        }
        write!(f, "+-------+-------+-------+")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
