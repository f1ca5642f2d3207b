// Copyright (C) 2020-2026 Andy Kurnia.

use super::adjacency;

// Cells the move covers together with all of their neighbors. This only looks
// at the move itself, not at who already owns what on the board.
#[inline(always)]
pub fn evaluate(mask: u32, table: &adjacency::AdjacencyTable) -> u32 {
    table
        .rules()
        .iter()
        .filter(|rule| rule.cell & mask != 0 && mask & rule.required == rule.required)
        .fold(0, |captured, rule| captured | rule.cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmask::get_bit_mask_for_positions;

    static TABLE: &adjacency::AdjacencyTable = &adjacency::COMMON_ADJACENCY_TABLE;

    #[test]
    fn center_needs_all_four_neighbors() {
        let mask = get_bit_mask_for_positions(&[7, 11, 12, 13, 17]);
        assert_eq!(evaluate(mask, TABLE), 1 << 12);
        let mask = get_bit_mask_for_positions(&[7, 11, 12, 13]);
        assert_eq!(evaluate(mask, TABLE) & (1 << 12), 0);
    }

    #[test]
    fn neighbors_alone_do_not_capture_the_middle() {
        let mask = get_bit_mask_for_positions(&[7, 11, 13, 17]);
        assert_eq!(evaluate(mask, TABLE), 0);
    }

    #[test]
    fn corner_needs_two() {
        assert_eq!(evaluate(get_bit_mask_for_positions(&[0, 1, 5]), TABLE), 1);
        assert_eq!(evaluate(get_bit_mask_for_positions(&[0, 1]), TABLE), 0);
    }

    #[test]
    fn full_board_captures_everything() {
        assert_eq!(
            evaluate(crate::bitmask::FULL_BOARD_MASK, TABLE),
            crate::bitmask::FULL_BOARD_MASK
        );
        assert_eq!(evaluate(0, TABLE), 0);
    }

    #[test]
    fn row_captures_nothing() {
        // a full top row: each cell misses its neighbor below.
        assert_eq!(evaluate(0b11111, TABLE), 0);
    }
}
