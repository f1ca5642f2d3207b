// Copyright (C) 2020-2026 Andy Kurnia.

use letterpress::{alphabet, bitmask, board, error, kibitzer, word_index};
use rand::prelude::*;

static USAGE: &str = "\
usage: loadgen [key=value...] [-v]
  count=N          number of requests (default 100)
  seed=N           fixed seed, otherwise from the os
  format=json|url  one JSON question or one query URL per line (default json).
                   json lines can be piped straight into serve; serve does
                   not speak HTTP, so urls are for an HTTP front end
  base=URL         URL prefix of that front end, required for format=url
  words=PATH       weight letters by their use in this dictionary
  band=NAME|N      minimum frequency, otherwise a random one per request
  owned=0|1        also fill p1_mask and p2_mask (default 0)";

enum Format {
    Json,
    Url,
}

struct LoadGen {
    rng: rand_chacha::ChaCha20Rng,
    letter_weights: Option<rand::distr::weighted::WeightedIndex<u64>>,
    min_frequency: Option<u8>,
    owned: bool,
}

impl LoadGen {
    fn random_board(&mut self) -> error::Returns<board::Board> {
        let mut tiles = [0u8; board::BOARD_SIZE];
        for tile in tiles.iter_mut() {
            *tile = match &self.letter_weights {
                Some(weights) => weights.sample(&mut self.rng) as u8,
                None => self.rng.random_range(0..alphabet::NUM_LETTERS as u8),
            };
        }
        board::Board::from_tiles(&tiles)
    }

    fn random_question(&mut self) -> error::Returns<kibitzer::Question> {
        let board = self.random_board()?;
        let min_frequency = match self.min_frequency {
            Some(x) => x,
            None => self.rng.random_range(0..=word_index::MAX_FREQUENCY),
        };
        let (p1_mask, p2_mask) = if self.owned {
            let p1_mask = self.rng.random::<u32>() & bitmask::FULL_BOARD_MASK;
            let p2_mask = self.rng.random::<u32>() & bitmask::FULL_BOARD_MASK & !p1_mask;
            (p1_mask, p2_mask)
        } else {
            (0, 0)
        };
        Ok(kibitzer::Question {
            board: board.to_string(),
            min_frequency: Some(min_frequency),
            band: None,
            p1_mask,
            p2_mask,
            count: 0,
        })
    }
}

// weights are letter occurrences over all dictionary words, plus one so
// every letter stays possible.
fn dictionary_letter_weights(path: &str) -> error::Returns<Vec<u64>> {
    let index = word_index::WordIndex::from_csv_path(path)?;
    let mut weights = vec![1u64; alphabet::NUM_LETTERS];
    for entry in index.entries() {
        for &tile in entry.tiles() {
            weights[tile as usize] += 1;
        }
    }
    Ok(weights)
}

fn question_url(base: &str, question: &kibitzer::Question) -> String {
    format!(
        "{}?board={}&min_frequency={}&p1_mask={}&p2_mask={}",
        base,
        question.board,
        question.min_frequency.unwrap_or(word_index::DEFAULT_FREQUENCY),
        question.p1_mask,
        question.p2_mask
    )
}

pub fn main() -> error::Returns<()> {
    let args = std::env::args().collect::<Vec<_>>();
    letterpress::init_logging(args.iter().any(|a| a == "-v"));

    let mut count = 100usize;
    let mut seed = None;
    let mut format = Format::Json;
    let mut base = None;
    let mut words = None;
    let mut min_frequency = None;
    let mut owned = false;
    for arg in args.iter().skip(1).filter(|a| *a != "-v") {
        let (key, value) = match arg.split_once('=') {
            Some(x) => x,
            None => {
                println!("{}", USAGE);
                return Err(format!("invalid argument {:?}", arg).into());
            }
        };
        match key {
            "count" => count = value.parse()?,
            "seed" => seed = Some(value.parse::<u64>()?),
            "format" => {
                format = match value {
                    "json" => Format::Json,
                    "url" => Format::Url,
                    _ => {
                        return Err(format!("invalid format {:?}", value).into());
                    }
                }
            }
            "base" => base = Some(value.to_string()),
            "words" => words = Some(value.to_string()),
            "band" => min_frequency = Some(word_index::parse_min_frequency(value)?),
            "owned" => owned = value.parse::<u8>()? != 0,
            _ => {
                println!("{}", USAGE);
                return Err(format!("invalid key {:?}", key).into());
            }
        }
    }

    if matches!(format, Format::Url) && base.is_none() {
        println!("{}", USAGE);
        return Err("format=url needs base=URL".into());
    }

    let letter_weights = match &words {
        Some(path) => Some(rand::distr::weighted::WeightedIndex::new(
            dictionary_letter_weights(path)?,
        )?),
        None => None,
    };
    let rng = match seed {
        Some(seed) => rand_chacha::ChaCha20Rng::seed_from_u64(seed),
        None => rand_chacha::ChaCha20Rng::from_os_rng(),
    };
    tracing::debug!(count, ?seed, weighted = letter_weights.is_some(), "generating");

    let mut loadgen = LoadGen {
        rng,
        letter_weights,
        min_frequency,
        owned,
    };
    for _ in 0..count {
        let question = loadgen.random_question()?;
        match format {
            Format::Json => println!("{}", serde_json::to_string(&question)?),
            Format::Url => {
                println!("{}", question_url(base.as_deref().unwrap_or_default(), &question))
            }
        }
    }

    Ok(())
}
