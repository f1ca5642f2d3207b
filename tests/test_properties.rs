// Copyright (C) 2020-2026 Andy Kurnia.

use proptest::prelude::*;
use std::sync::Arc;

use letterpress::{
    adjacency, alphabet, bitmask, board, capture, engine_config, movegen, word_index,
};

// a small alphabet so random words are often playable.
fn board_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(&b"abcde"[..]), letterpress::BOARD_SIZE)
        .prop_map(|v| String::from_utf8(v).unwrap())
}

fn position_set_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::sample::subsequence((0..letterpress::BOARD_SIZE as u8).collect::<Vec<_>>(), 0..=25)
}

fn words_strategy() -> impl Strategy<Value = Vec<(String, u8)>> {
    prop::collection::btree_map("[a-e]{1,4}", 0..=letterpress::MAX_FREQUENCY, 1..12)
        .prop_map(|m| m.into_iter().collect())
}

fn make_generator(
    words: &[(String, u8)],
    config: engine_config::EngineConfig,
) -> movegen::MoveGenerator {
    let entries = words
        .iter()
        .map(|(w, f)| word_index::WordEntry::new(w, *f).unwrap())
        .collect();
    movegen::MoveGenerator::new(
        Arc::new(word_index::WordIndex::from_entries(entries).unwrap()),
        adjacency::COMMON_ADJACENCY_TABLE.clone(),
        config,
    )
}

proptest! {
    // every playable word at or above the threshold yields a move.
    #[test]
    fn playable_words_have_moves(
        b in board_strategy(),
        words in words_strategy(),
        min_frequency in 0..=letterpress::MAX_FREQUENCY,
    ) {
        let g = make_generator(&words, engine_config::make_default_engine_config());
        let board = b.parse::<board::Board>().unwrap();
        let moves = g.get_moves_for_board(&board, min_frequency);
        let board_tally = alphabet::canonicalize(&b);
        for (w, f) in &words {
            let expected = *f >= min_frequency
                && alphabet::is_subset(&alphabet::canonicalize(w), &board_tally);
            let found = moves.iter().any(|m| &*m.word == w.as_str());
            prop_assert_eq!(expected, found, "word={} f={}", w, f);
        }
    }

    // masks match the word's letters and captures stay on the board.
    #[test]
    fn moves_are_well_formed(b in board_strategy(), words in words_strategy()) {
        let g = make_generator(&words, engine_config::make_default_engine_config());
        let board = b.parse::<board::Board>().unwrap();
        for m in g.get_moves_for_board(&board, 0).iter() {
            prop_assert_eq!(bitmask::popcount(m.mask) as usize, m.word.len());
            prop_assert_eq!(m.captured & !bitmask::FULL_BOARD_MASK, 0);
            prop_assert_eq!(m.captured & !m.mask, 0);
            let mut spelled = bitmask::positions_of_mask(m.mask)
                .map(|p| alphabet::letter_of(board.tiles()[p as usize]))
                .collect::<Vec<_>>();
            let mut letters = m.word.chars().collect::<Vec<_>>();
            spelled.sort_unstable();
            letters.sort_unstable();
            prop_assert_eq!(spelled, letters);
        }
    }

    // ranking: capture count descending, then word length descending.
    #[test]
    fn moves_are_ranked(b in board_strategy(), words in words_strategy()) {
        let g = make_generator(&words, engine_config::make_default_engine_config());
        let board = b.parse::<board::Board>().unwrap();
        let moves = g.get_moves_for_board(&board, 0);
        for pair in moves.windows(2) {
            let key = |m: &movegen::Move| (bitmask::popcount(m.captured), m.word.len());
            prop_assert!(key(&pair[0]) >= key(&pair[1]));
        }
    }

    #[test]
    fn encoding_ignores_order(mut positions in position_set_strategy()) {
        let mask = bitmask::get_bit_mask_for_positions(&positions);
        positions.reverse();
        prop_assert_eq!(bitmask::get_bit_mask_for_positions(&positions), mask);
        prop_assert_eq!(bitmask::positions_of_mask(mask).count(), positions.len());
    }

    #[test]
    fn distinct_sets_distinct_masks(
        a in position_set_strategy(),
        b in position_set_strategy(),
    ) {
        if a != b {
            prop_assert_ne!(
                bitmask::get_bit_mask_for_positions(&a),
                bitmask::get_bit_mask_for_positions(&b)
            );
        }
    }

    #[test]
    fn capture_is_deterministic(mask in 0..=bitmask::FULL_BOARD_MASK) {
        let table = &adjacency::COMMON_ADJACENCY_TABLE;
        prop_assert_eq!(capture::evaluate(mask, table), capture::evaluate(mask, table));
    }

    // cached and uncached generators agree, and repeats share the result.
    #[test]
    fn caching_is_transparent(
        b in board_strategy(),
        words in words_strategy(),
        min_frequency in 0..=25u8,
    ) {
        let cached = make_generator(&words, engine_config::make_default_engine_config());
        let uncached = make_generator(&words, engine_config::make_uncached_engine_config());
        let board = b.parse::<board::Board>().unwrap();
        let first = cached.get_moves_for_board(&board, min_frequency);
        let again = cached.get_moves_for_board(&board, min_frequency);
        prop_assert!(Arc::ptr_eq(&first, &again));
        prop_assert_eq!(&*first, &*uncached.get_moves_for_board(&board, min_frequency));
    }
}
