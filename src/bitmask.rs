// Copyright (C) 2020-2026 Andy Kurnia.

use super::board;

pub const FULL_BOARD_MASK: u32 = (1 << board::BOARD_SIZE) - 1;

#[inline(always)]
pub fn get_bit_mask_for_positions(positions: &[u8]) -> u32 {
    positions.iter().fold(0, |mask, &p| mask | (1 << p))
}

#[inline(always)]
pub fn popcount(mask: u32) -> u32 {
    mask.count_ones()
}

// ascending.
#[inline(always)]
pub fn positions_of_mask(mask: u32) -> impl Iterator<Item = u8> {
    let mut rest = mask;
    std::iter::from_fn(move || {
        if rest == 0 {
            None
        } else {
            let p = rest.trailing_zeros() as u8;
            rest &= rest - 1;
            Some(p)
        }
    })
}
