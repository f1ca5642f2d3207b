// Copyright (C) 2020-2026 Andy Kurnia.

use super::{
    adjacency, alphabet, bitmask, board, cache, capture, engine_config, placement, prob,
    word_index,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Move {
    // cells used, bit i for board index i.
    pub mask: u32,
    pub word: std::sync::Arc<str>,
    // cells surrounded by this move alone.
    pub captured: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub len: usize,
    pub capacity: usize,
}

impl<K: Clone + Eq + std::hash::Hash, V: Clone> From<&cache::LruCache<K, V>> for CacheStats {
    fn from(c: &cache::LruCache<K, V>) -> Self {
        Self {
            hits: c.hits(),
            misses: c.misses(),
            len: c.len(),
            capacity: c.capacity(),
        }
    }
}

type BoardAndFrequency = (board::Board, u8);

pub struct MoveGenerator {
    word_index: std::sync::Arc<word_index::WordIndex>,
    adjacency_table: adjacency::AdjacencyTable,
    config: engine_config::EngineConfig,
    frequency_cache: cache::LruCache<u8, std::sync::Arc<[u32]>>,
    playable_cache: cache::LruCache<BoardAndFrequency, std::sync::Arc<[u32]>>,
    position_cache: cache::LruCache<board::Board, std::sync::Arc<board::PositionIndex>>,
    move_cache: cache::LruCache<BoardAndFrequency, std::sync::Arc<[Move]>>,
}

impl MoveGenerator {
    pub fn new(
        word_index: std::sync::Arc<word_index::WordIndex>,
        adjacency_table: adjacency::AdjacencyTable,
        config: engine_config::EngineConfig,
    ) -> Self {
        Self {
            word_index,
            adjacency_table,
            frequency_cache: cache::LruCache::new(config.frequency_cache_capacity()),
            playable_cache: cache::LruCache::new(config.playable_cache_capacity()),
            position_cache: cache::LruCache::new(config.position_cache_capacity()),
            move_cache: cache::LruCache::new(config.move_cache_capacity()),
            config,
        }
    }

    #[inline(always)]
    pub fn word_index(&self) -> &std::sync::Arc<word_index::WordIndex> {
        &self.word_index
    }

    #[inline(always)]
    pub fn adjacency_table(&self) -> &adjacency::AdjacencyTable {
        &self.adjacency_table
    }

    #[inline(always)]
    pub fn config(&self) -> &engine_config::EngineConfig {
        &self.config
    }

    // word ids with frequency >= min_frequency, in dictionary order.
    pub fn words_by_frequency(&self, min_frequency: u8) -> std::sync::Arc<[u32]> {
        self.frequency_cache.get_or_compute(&min_frequency, || {
            self.word_index.word_ids_by_frequency(min_frequency).into()
        })
    }

    // the subset of words_by_frequency the board has enough letters for.
    pub fn playable_words(
        &self,
        board: &board::Board,
        min_frequency: u8,
    ) -> std::sync::Arc<[u32]> {
        self.playable_cache.get_or_compute(&(*board, min_frequency), || {
            let board_tally = board.tally();
            self.words_by_frequency(min_frequency)
                .iter()
                .copied()
                .filter(|&word_id| {
                    alphabet::is_subset(self.word_index.get(word_id).tally(), &board_tally)
                })
                .collect()
        })
    }

    pub fn position_index(&self, board: &board::Board) -> std::sync::Arc<board::PositionIndex> {
        self.position_cache.get_or_compute(board, || {
            std::sync::Arc::new(board::PositionIndex::new(board))
        })
    }

    // Every placement of every playable word, best first.
    pub fn get_moves_for_board(
        &self,
        board: &board::Board,
        min_frequency: u8,
    ) -> std::sync::Arc<[Move]> {
        self.move_cache.get_or_compute(&(*board, min_frequency), || {
            let t0 = std::time::Instant::now();
            let playable = self.playable_words(board, min_frequency);
            let position_index = self.position_index(board);
            let mut moves = self.gen_moves(&playable, &position_index);
            self.config.ranking_rule().rank(&mut moves);
            tracing::debug!(
                %board,
                min_frequency,
                num_playable = playable.len(),
                num_moves = moves.len(),
                elapsed_us = t0.elapsed().as_micros() as u64,
                "generated moves"
            );
            moves.into()
        })
    }

    // moves for one word, unranked, in placement order.
    pub fn moves_for_word(
        &self,
        entry: &word_index::WordEntry,
        position_index: &board::PositionIndex,
        pascal: &mut prob::Pascal,
        moves: &mut Vec<Move>,
    ) {
        let expected = prob::count_placements(pascal, entry.tally(), position_index);
        moves.reserve(expected.min(1 << 20) as usize);
        placement::enumerate_placements(entry.tally(), position_index, |positions: &[u8]| {
            let mask = bitmask::get_bit_mask_for_positions(positions);
            moves.push(Move {
                mask,
                word: std::sync::Arc::clone(entry.word()),
                captured: capture::evaluate(mask, &self.adjacency_table),
            });
        });
    }

    fn gen_moves_serial(
        &self,
        word_ids: &[u32],
        position_index: &board::PositionIndex,
    ) -> Vec<Move> {
        let mut pascal = prob::Pascal::new();
        let mut moves = Vec::new();
        for &word_id in word_ids {
            self.moves_for_word(
                self.word_index.get(word_id),
                position_index,
                &mut pascal,
                &mut moves,
            );
        }
        moves
    }

    // Words are split into contiguous runs, one per thread, and the runs are
    // joined back in order, so the result does not depend on thread count.
    fn gen_moves(&self, word_ids: &[u32], position_index: &board::PositionIndex) -> Vec<Move> {
        let num_threads = self.config.num_threads().min(word_ids.len());
        if num_threads <= 1 || word_ids.len() < self.config.parallel_threshold() {
            return self.gen_moves_serial(word_ids, position_index);
        }
        let run_len = word_ids.len().div_ceil(num_threads);
        std::thread::scope(|s| {
            let handles = word_ids
                .chunks(run_len)
                .map(|run| s.spawn(move || self.gen_moves_serial(run, position_index)))
                .collect::<Vec<_>>();
            let mut moves = Vec::new();
            for handle in handles {
                match handle.join() {
                    Ok(part) => moves.extend(part),
                    Err(err) => std::panic::resume_unwind(err),
                }
            }
            moves
        })
    }

    pub fn frequency_cache_stats(&self) -> CacheStats {
        (&self.frequency_cache).into()
    }

    pub fn playable_cache_stats(&self) -> CacheStats {
        (&self.playable_cache).into()
    }

    pub fn position_cache_stats(&self) -> CacheStats {
        (&self.position_cache).into()
    }

    pub fn move_cache_stats(&self) -> CacheStats {
        (&self.move_cache).into()
    }

    pub fn clear_caches(&self) {
        self.frequency_cache.clear();
        self.playable_cache.clear();
        self.position_cache.clear();
        self.move_cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_generator(csv: &str, config: engine_config::EngineConfig) -> MoveGenerator {
        MoveGenerator::new(
            std::sync::Arc::new(word_index::WordIndex::from_csv_reader(csv.as_bytes()).unwrap()),
            adjacency::COMMON_ADJACENCY_TABLE.clone(),
            config,
        )
    }

    static WORDS: &str = "\
cab,20
abc,16
dab,12
bad,15
zap,24
aa,19
";

    #[test]
    fn playable_words_respect_board_and_threshold() {
        let g = make_generator(WORDS, engine_config::make_default_engine_config());
        let b = "abcdaaaaaaaaaaaaaaaaaaaaa".parse::<board::Board>().unwrap();
        assert_eq!(&g.playable_words(&b, 15)[..], [0, 1, 3, 5]);
        assert_eq!(&g.playable_words(&b, 0)[..], [0, 1, 2, 3, 5]);
        assert!(g.playable_words(&b, 24).is_empty());
        assert_eq!(&g.words_by_frequency(19)[..], [0, 4, 5]);
    }

    #[test]
    fn every_move_is_well_formed() {
        let g = make_generator(WORDS, engine_config::make_default_engine_config());
        let b = "abcdaaaaaaaaaaaaaaaaaaaaa".parse::<board::Board>().unwrap();
        let moves = g.get_moves_for_board(&b, 0);
        // cab/abc/bad/dab: 22 a's each; aa: C(22, 2).
        assert_eq!(moves.len(), 4 * 22 + 231);
        for m in moves.iter() {
            assert_eq!(bitmask::popcount(m.mask) as usize, m.word.len());
            assert_eq!(m.captured & !bitmask::FULL_BOARD_MASK, 0);
            assert_eq!(m.captured & !m.mask, 0);
            assert_eq!(m.captured, capture::evaluate(m.mask, g.adjacency_table()));
        }
        for w in moves.windows(2) {
            assert_ne!(
                g.config().ranking_rule().compare(&w[0], &w[1]),
                std::cmp::Ordering::Greater
            );
        }
    }

    #[test]
    fn results_are_cached_by_value() {
        let g = make_generator(WORDS, engine_config::make_default_engine_config());
        let b1 = "abcdaaaaaaaaaaaaaaaaaaaaa".parse::<board::Board>().unwrap();
        let b2 = "abcdaaaaaaaaaaaaaaaaaaaaa".parse::<board::Board>().unwrap();
        let m1 = g.get_moves_for_board(&b1, 15);
        let m2 = g.get_moves_for_board(&b2, 15);
        assert!(std::sync::Arc::ptr_eq(&m1, &m2));
        assert_eq!(g.move_cache_stats().misses, 1);
        assert_eq!(g.move_cache_stats().hits, 1);
        assert_eq!(g.move_cache_stats().len, 1);
        assert_eq!(
            g.move_cache_stats().capacity,
            g.config().move_cache_capacity()
        );
        g.clear_caches();
        let m3 = g.get_moves_for_board(&b1, 15);
        assert!(!std::sync::Arc::ptr_eq(&m1, &m3));
        assert_eq!(m1, m3);
    }

    #[test]
    fn thread_count_does_not_change_answer() {
        let mut config = engine_config::make_default_engine_config();
        config.set_num_threads(4);
        config.apply_kv("parallel-threshold=0").unwrap();
        let parallel = make_generator(WORDS, config);
        let serial = make_generator(WORDS, engine_config::make_uncached_engine_config());
        let b = "bacdzpaaaaaaaaaaaaaaaaaaa".parse::<board::Board>().unwrap();
        assert_eq!(
            parallel.get_moves_for_board(&b, 0),
            serial.get_moves_for_board(&b, 0)
        );
    }

    #[test]
    fn capture_ranks_first() {
        // a plus shape of a's in the middle, b's elsewhere.
        let g = make_generator(
            "aaaaa,10\nbb,20\n",
            engine_config::make_default_engine_config(),
        );
        let b = "bbbbbbbabbbaaabbbabbbbbbb".parse::<board::Board>().unwrap();
        let moves = g.get_moves_for_board(&b, 0);
        assert_eq!(moves.len(), 1 + 20 * 19 / 2);
        assert_eq!(&*moves[0].word, "aaaaa");
        assert_eq!(moves[0].captured, 1 << 12);
        assert!(moves[1..].iter().all(|m| m.captured == 0 && &*m.word == "bb"));
    }
}
