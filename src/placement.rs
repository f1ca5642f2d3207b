// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board};

// Calls back once per way of putting the word's letters on distinct board
// cells, with the cells in ascending order. Letters are taken one group at a
// time (all the a's, then all the b's, ...); within a group the cells are
// chosen as a combination of that letter's occurrences, so no placement
// repeats and only one partial path is alive at any time.
//
// Assumes the word is playable on the board. A letter without enough
// occurrences yields nothing.
pub fn enumerate_placements<Callback: FnMut(&[u8])>(
    word_tally: &alphabet::Tally,
    position_index: &board::PositionIndex,
    callback: Callback,
) {
    struct Env<'a, Callback: FnMut(&[u8])> {
        position_index: &'a board::PositionIndex,
        needed: &'a [(u8, u8)],
        path: Vec<u8>,
        sorted: Vec<u8>,
        callback: Callback,
    }

    // group: which letter group is being filled.
    // start: lowest usable index into that letter's occurrences.
    // left: cells still to choose for this group.
    fn iter<Callback: FnMut(&[u8])>(
        env: &mut Env<'_, Callback>,
        group: usize,
        start: usize,
        left: u8,
    ) {
        if left == 0 {
            let next_group = group + 1;
            if next_group < env.needed.len() {
                let left = env.needed[next_group].1;
                iter(env, next_group, 0, left);
            } else {
                env.sorted.clone_from(&env.path);
                env.sorted.sort_unstable();
                (env.callback)(&env.sorted);
            }
            return;
        }
        let position_index = env.position_index;
        let pool = position_index.positions(env.needed[group].0);
        // leave room for the remaining picks.
        let end = (pool.len() + 1).saturating_sub(left as usize);
        for i in start..end {
            env.path.push(pool[i]);
            iter(env, group, i + 1, left - 1);
            env.path.pop();
        }
    }

    let needed = (0u8..)
        .zip(word_tally.iter())
        .filter(|&(_, &count)| count != 0)
        .map(|(tile, &count)| (tile, count))
        .collect::<Vec<_>>();
    if needed.is_empty() {
        return;
    }
    let word_len = alphabet::tally_len(word_tally);
    let mut env = Env {
        position_index,
        needed: &needed,
        path: Vec::with_capacity(word_len),
        sorted: Vec::with_capacity(word_len),
        callback,
    };
    let left = needed[0].1;
    iter(&mut env, 0, 0, left);
}

pub fn placements(
    word_tally: &alphabet::Tally,
    position_index: &board::PositionIndex,
) -> Vec<Box<[u8]>> {
    let mut ret = Vec::new();
    enumerate_placements(word_tally, position_index, |positions: &[u8]| {
        ret.push(positions.into())
    });
    ret
}
