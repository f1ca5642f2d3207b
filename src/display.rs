// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, bitmask, board, movegen};

// Letters of the move are uppercased, captured cells are bracketed.
#[inline(always)]
pub fn cell_label(board: &board::Board, mask: u32, captured: u32, idx: usize) -> String {
    let letter = alphabet::letter_of(board.tiles()[idx]);
    let bit = 1u32 << idx;
    if captured & bit != 0 {
        format!("[{}]", letter.to_ascii_uppercase())
    } else if mask & bit != 0 {
        format!(" {} ", letter.to_ascii_uppercase())
    } else {
        format!(" {} ", letter)
    }
}

pub fn fmt_board(board: &board::Board, mask: u32, captured: u32) -> String {
    let dim = board::BOARD_DIM;
    let mut s = String::new();
    s.push_str("   ");
    for c in 0..dim.cols {
        s.push_str(&format!(" {} ", c));
    }
    s.push('\n');
    for r in 0..dim.rows {
        s.push_str(&format!("{:2} ", r));
        for c in 0..dim.cols {
            s.push_str(&cell_label(board, mask, captured, dim.at_row_col(r, c)));
        }
        s.push('\n');
    }
    s
}

pub fn print_board(board: &board::Board) {
    print!("{}", fmt_board(board, 0, 0));
}

pub fn fmt_move(m: &movegen::Move) -> String {
    let positions = bitmask::positions_of_mask(m.mask)
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "{} [{}] captures {}",
        m.word,
        positions,
        bitmask::popcount(m.captured)
    )
}
