// Copyright (C) 2020-2026 Andy Kurnia.

// Tiles are 0-based: 'a' is 0, 'z' is 25. Unlike a rack game there is no
// blank and no reserved 0, every board cell holds a letter.

pub const NUM_LETTERS: usize = 26;

// CanonicalMultiset: count of each letter.
pub type Tally = [u8; NUM_LETTERS];

pub const EMPTY_TALLY: Tally = [0; NUM_LETTERS];

#[inline(always)]
pub fn tile_of(c: u8) -> Option<u8> {
    if c.is_ascii_lowercase() {
        Some(c - b'a')
    } else {
        None
    }
}

#[inline(always)]
pub fn letter_of(tile: u8) -> char {
    (tile + b'a') as char
}

// parses lowercase a-z only.
pub fn parse_tiles(s: &str, v: &mut Vec<u8>) -> super::error::Returns<()> {
    v.clear();
    v.reserve(s.len());
    for (i, &c) in s.as_bytes().iter().enumerate() {
        match tile_of(c) {
            Some(tile) => v.push(tile),
            None => {
                return_error!(format!(
                    "invalid letter {:?} at index {} in {:?}",
                    s[i..].chars().next().unwrap_or('?'),
                    i,
                    s
                ));
            }
        }
    }
    Ok(())
}

#[inline(always)]
pub fn tally_of_tiles(tiles: &[u8]) -> Tally {
    let mut tally = EMPTY_TALLY;
    tiles.iter().for_each(|&tile| tally[tile as usize] += 1);
    tally
}

// Characters outside a-z are ignored. Callers validate first.
pub fn canonicalize(s: &str) -> Tally {
    let mut tally = EMPTY_TALLY;
    s.bytes()
        .filter_map(tile_of)
        .for_each(|tile| tally[tile as usize] += 1);
    tally
}

// true iff every letter's count in a is <= its count in b.
#[inline(always)]
pub fn is_subset(a: &Tally, b: &Tally) -> bool {
    a.iter().zip(b.iter()).all(|(&x, &y)| x <= y)
}

#[inline(always)]
pub fn tally_len(tally: &Tally) -> usize {
    tally.iter().map(|&x| x as usize).sum()
}

pub fn fmt_tally(tally: &Tally) -> String {
    let mut s = String::with_capacity(tally_len(tally));
    for (tile, &count) in (0u8..).zip(tally.iter()) {
        for _ in 0..count {
            s.push(letter_of(tile));
        }
    }
    s
}
