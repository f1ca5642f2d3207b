// Copyright (C) 2020-2026 Andy Kurnia.

use super::{bitmask, board, error, matrix};

// A cell is surrounded by a move when the move covers the cell and every
// cell in required.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdjacencyRule {
    pub cell: u32,
    pub required: u32,
}

#[derive(Clone)]
pub enum AdjacencyTable {
    Static(&'static [AdjacencyRule]),
    Owned(Box<[AdjacencyRule]>),
}

impl AdjacencyTable {
    #[inline(always)]
    pub fn rules(&self) -> &[AdjacencyRule] {
        match self {
            AdjacencyTable::Static(x) => x,
            AdjacencyTable::Owned(x) => x,
        }
    }

    pub fn from_rules(rules: Vec<AdjacencyRule>) -> error::Returns<Self> {
        if rules.len() != board::BOARD_SIZE {
            return_error!(
                error::Stage::Board,
                format!(
                    "adjacency needs {} rules, found {}",
                    board::BOARD_SIZE,
                    rules.len()
                )
            );
        }
        let mut seen = 0u32;
        for (i, rule) in rules.iter().enumerate() {
            if rule.cell.count_ones() != 1 || rule.cell & !bitmask::FULL_BOARD_MASK != 0 {
                return_error!(
                    error::Stage::Board,
                    format!(
                        "adjacency rule {}: cell {:#x} is not one cell",
                        i, rule.cell
                    )
                );
            }
            if rule.required & !bitmask::FULL_BOARD_MASK != 0 {
                return_error!(
                    error::Stage::Board,
                    format!(
                        "adjacency rule {}: required {:#x} leaves the board",
                        i, rule.required
                    )
                );
            }
            if seen & rule.cell != 0 {
                return_error!(
                    error::Stage::Board,
                    format!(
                        "adjacency rule {}: cell {:#x} repeated",
                        i, rule.cell
                    )
                );
            }
            seen |= rule.cell;
        }
        Ok(AdjacencyTable::Owned(rules.into_boxed_slice()))
    }

    // orthogonal neighbors of each cell on a grid.
    pub fn from_dim(dim: &matrix::Dim) -> error::Returns<Self> {
        Self::from_rules(
            (0..dim.len())
                .map(|idx| AdjacencyRule {
                    cell: 1 << idx,
                    required: dim
                        .orthogonal_neighbors(idx)
                        .fold(0, |mask, n| mask | (1 << n)),
                })
                .collect(),
        )
    }
}

pub static COMMON_ADJACENCY_TABLE: AdjacencyTable = AdjacencyTable::Static(&[
    AdjacencyRule { cell: 1 << 0, required: 0x000_0022 },  // 1 5
    AdjacencyRule { cell: 1 << 1, required: 0x000_0045 },  // 0 2 6
    AdjacencyRule { cell: 1 << 2, required: 0x000_008a },  // 1 3 7
    AdjacencyRule { cell: 1 << 3, required: 0x000_0114 },  // 2 4 8
    AdjacencyRule { cell: 1 << 4, required: 0x000_0208 },  // 3 9
    AdjacencyRule { cell: 1 << 5, required: 0x000_0441 },  // 0 6 10
    AdjacencyRule { cell: 1 << 6, required: 0x000_08a2 },  // 1 5 7 11
    AdjacencyRule { cell: 1 << 7, required: 0x000_1144 },  // 2 6 8 12
    AdjacencyRule { cell: 1 << 8, required: 0x000_2288 },  // 3 7 9 13
    AdjacencyRule { cell: 1 << 9, required: 0x000_4110 },  // 4 8 14
    AdjacencyRule { cell: 1 << 10, required: 0x000_8820 }, // 5 11 15
    AdjacencyRule { cell: 1 << 11, required: 0x001_1440 }, // 6 10 12 16
    AdjacencyRule { cell: 1 << 12, required: 0x002_2880 }, // 7 11 13 17
    AdjacencyRule { cell: 1 << 13, required: 0x004_5100 }, // 8 12 14 18
    AdjacencyRule { cell: 1 << 14, required: 0x008_2200 }, // 9 13 19
    AdjacencyRule { cell: 1 << 15, required: 0x011_0400 }, // 10 16 20
    AdjacencyRule { cell: 1 << 16, required: 0x022_8800 }, // 11 15 17 21
    AdjacencyRule { cell: 1 << 17, required: 0x045_1000 }, // 12 16 18 22
    AdjacencyRule { cell: 1 << 18, required: 0x08a_2000 }, // 13 17 19 23
    AdjacencyRule { cell: 1 << 19, required: 0x104_4000 }, // 14 18 24
    AdjacencyRule { cell: 1 << 20, required: 0x020_8000 }, // 15 21
    AdjacencyRule { cell: 1 << 21, required: 0x051_0000 }, // 16 20 22
    AdjacencyRule { cell: 1 << 22, required: 0x0a2_0000 }, // 17 21 23
    AdjacencyRule { cell: 1 << 23, required: 0x144_0000 }, // 18 22 24
    AdjacencyRule { cell: 1 << 24, required: 0x088_0000 }, // 19 23
]);
