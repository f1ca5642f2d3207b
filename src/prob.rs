// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board};

// Rows of Pascal's triangle, grown on demand.
#[derive(Clone)]
pub struct Pascal {
    raw: Vec<u64>,
    rows: usize,
}

impl Default for Pascal {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl Pascal {
    pub fn new() -> Self {
        Self {
            raw: vec![1],
            rows: 1,
        }
    }

    pub fn row(&mut self, row: usize) -> &[u64] {
        while self.rows <= row {
            let start = self.rows * (self.rows - 1) / 2;
            let mut v = 0;
            for i in start..(start + self.rows) {
                let x = self.raw[i];
                // here wrong answer is better than no answer
                self.raw.push(x.saturating_add(v));
                v = x;
            }
            self.raw.push(1);
            self.rows += 1;
        }
        let start = row * (row + 1) / 2;
        &self.raw[start..start + row + 1]
    }

    #[inline(always)]
    pub fn choose(&mut self, n: usize, k: usize) -> u64 {
        if k > n { 0 } else { self.row(n)[k] }
    }
}

// Number of placements of a word: product over its letters of
// C(occurrences on board, needed).
pub fn count_placements(
    pascal: &mut Pascal,
    word_tally: &alphabet::Tally,
    position_index: &board::PositionIndex,
) -> u64 {
    (0u8..)
        .zip(word_tally.iter())
        .filter(|&(_, &needed)| needed != 0)
        .map(|(tile, &needed)| {
            pascal.choose(position_index.positions(tile).len(), needed as usize)
        })
        .fold(1u64, |acc, ways| acc.saturating_mul(ways))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_rows() {
        let mut p = Pascal::new();
        assert_eq!(p.row(0), [1]);
        assert_eq!(p.row(4), [1, 4, 6, 4, 1]);
        assert_eq!(p.choose(25, 2), 300);
        assert_eq!(p.choose(25, 12), 5_200_300);
        assert_eq!(p.choose(3, 4), 0);
    }

    #[test]
    fn counts_multiply_across_letters() {
        let b = "aaaaabbbbbcccccdddddeeeee".parse::<board::Board>().unwrap();
        let index = board::PositionIndex::new(&b);
        let mut p = Pascal::new();
        assert_eq!(count_placements(&mut p, &alphabet::canonicalize("ab"), &index), 25);
        assert_eq!(count_placements(&mut p, &alphabet::canonicalize("aab"), &index), 50);
        assert_eq!(count_placements(&mut p, &alphabet::canonicalize("z"), &index), 0);
        assert_eq!(count_placements(&mut p, &alphabet::EMPTY_TALLY, &index), 1);
    }
}
