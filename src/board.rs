// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, error, matrix};

pub const BOARD_SIZE: usize = 25;

pub static BOARD_DIM: matrix::Dim = matrix::Dim { rows: 5, cols: 5 };

// Row-major, tile per cell. Hash and Eq are by content so boards can key
// the caches directly.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board([u8; BOARD_SIZE]);

impl Board {
    pub fn from_tiles(tiles: &[u8]) -> error::Returns<Self> {
        if tiles.len() != BOARD_SIZE {
            return_error!(
                error::Stage::Board,
                format!("need {} letters, found {}", BOARD_SIZE, tiles.len())
            );
        }
        let mut ret = [0u8; BOARD_SIZE];
        for (i, &tile) in tiles.iter().enumerate() {
            if tile as usize >= alphabet::NUM_LETTERS {
                return_error!(
                    error::Stage::Board,
                    format!("board index {}: invalid tile {}", i, tile)
                );
            }
            ret[i] = tile;
        }
        Ok(Board(ret))
    }

    #[inline(always)]
    pub fn tiles(&self) -> &[u8; BOARD_SIZE] {
        &self.0
    }

    #[inline(always)]
    pub fn tally(&self) -> alphabet::Tally {
        alphabet::tally_of_tiles(&self.0)
    }
}

impl std::str::FromStr for Board {
    type Err = error::BoxAnyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut v = Vec::with_capacity(BOARD_SIZE);
        if let Err(err) = alphabet::parse_tiles(s, &mut v) {
            return_error!(error::Stage::Board, err.to_string());
        }
        Self::from_tiles(&v)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for &tile in self.0.iter() {
            write!(f, "{}", alphabet::letter_of(tile))?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Board({:?})", self.to_string())
    }
}

// letter -> board indices holding it, ascending.
pub struct PositionIndex {
    buckets: [Vec<u8>; alphabet::NUM_LETTERS],
}

impl PositionIndex {
    pub fn new(board: &Board) -> Self {
        let mut buckets: [Vec<u8>; alphabet::NUM_LETTERS] = Default::default();
        for (idx, &tile) in (0u8..).zip(board.tiles().iter()) {
            buckets[tile as usize].push(idx);
        }
        Self { buckets }
    }

    #[inline(always)]
    pub fn positions(&self, tile: u8) -> &[u8] {
        &self.buckets[tile as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_prints() {
        let b = "abcdefghijklmnopqrstuvwxy".parse::<Board>().unwrap();
        assert_eq!(b.tiles()[0], 0);
        assert_eq!(b.tiles()[24], 24);
        assert_eq!(b.to_string(), "abcdefghijklmnopqrstuvwxy");
    }

    #[test]
    fn rejects_bad_boards() {
        assert!("abc".parse::<Board>().is_err());
        assert!("abcdefghijklmnopqrstuvwxyz".parse::<Board>().is_err());
        assert!("ABCDEFGHIJKLMNOPQRSTUVWXY".parse::<Board>().is_err());
        assert!(Board::from_tiles(&[26; BOARD_SIZE]).is_err());
        let err = "abc".parse::<Board>().unwrap_err();
        assert_eq!(error::stage_of(&err), Some(error::Stage::Board));
    }

    #[test]
    fn position_index_buckets_in_board_order() {
        let b = "abacabadabacabadabacabada".parse::<Board>().unwrap();
        let index = PositionIndex::new(&b);
        assert_eq!(index.positions(0), [0, 2, 4, 6, 8, 10, 12, 14, 16, 18, 20, 22, 24]);
        assert_eq!(index.positions(2), [3, 11, 19]);
        assert_eq!(index.positions(3), [7, 15, 23]);
        assert!(index.positions(25).is_empty());
        let total: usize = (0..26).map(|t| index.positions(t).len()).sum();
        assert_eq!(total, BOARD_SIZE);
    }
}
