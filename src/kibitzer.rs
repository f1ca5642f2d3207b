// Copyright (C) 2020-2026 Andy Kurnia.

use super::{bitmask, board, error, movegen, word_index};

// board: 25 lowercase letters, row-major.
// min_frequency: 0..=24, or band: "basic" etc. (min_frequency wins if both).
// p1_mask, p2_mask: cells owned by each player. accepted and echoed, but the
//   capture rule only looks at the move itself.
// count: maximum number of moves returned, 0 for all.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Default)]
pub struct Question {
    pub board: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_frequency: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band: Option<String>,
    #[serde(default)]
    pub p1_mask: u32,
    #[serde(default)]
    pub p2_mask: u32,
    #[serde(default)]
    pub count: usize,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct JsonMove {
    pub word: String,
    pub mask: u32,
    pub positions: Box<[u8]>,
    pub captured: u32,
    pub num_captured: u32,
}

impl From<&movegen::Move> for JsonMove {
    #[inline(always)]
    fn from(m: &movegen::Move) -> Self {
        Self {
            word: m.word.to_string(),
            mask: m.mask,
            positions: bitmask::positions_of_mask(m.mask).collect(),
            captured: m.captured,
            num_captured: bitmask::popcount(m.captured),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub struct Answer {
    pub board: String,
    pub min_frequency: u8,
    pub p1_mask: u32,
    pub p2_mask: u32,
    // before truncation to count.
    pub total: usize,
    pub moves: Vec<JsonMove>,
}

// A question that passed validation.
pub struct Kibitzer {
    pub board: board::Board,
    pub min_frequency: u8,
    pub p1_mask: u32,
    pub p2_mask: u32,
    pub count: usize,
}

impl Kibitzer {
    pub fn prepare(question: &Question) -> error::Returns<Self> {
        let board = question.board.parse::<board::Board>()?;
        let min_frequency = match (question.min_frequency, &question.band) {
            (Some(x), _) => {
                if x > word_index::MAX_FREQUENCY {
                    return_error!(
                        error::Stage::Request,
                        format!(
                            "min_frequency: {} exceeds {}",
                            x,
                            word_index::MAX_FREQUENCY
                        )
                    );
                }
                x
            }
            (None, Some(band)) => band.parse::<word_index::FrequencyBand>()?.min_frequency(),
            (None, None) => word_index::DEFAULT_FREQUENCY,
        };
        for (name, mask) in [("p1_mask", question.p1_mask), ("p2_mask", question.p2_mask)] {
            if mask & !bitmask::FULL_BOARD_MASK != 0 {
                return_error!(
                    error::Stage::Request,
                    format!("{}: {:#x} has bits beyond the board", name, mask)
                );
            }
        }
        if question.p1_mask & question.p2_mask != 0 {
            return_error!(
                error::Stage::Request,
                format!(
                    "p1_mask and p2_mask overlap at {:#x}",
                    question.p1_mask & question.p2_mask
                )
            );
        }
        Ok(Self {
            board,
            min_frequency,
            p1_mask: question.p1_mask,
            p2_mask: question.p2_mask,
            count: question.count,
        })
    }

    pub fn answer(&self, move_generator: &movegen::MoveGenerator) -> Answer {
        let moves = move_generator.get_moves_for_board(&self.board, self.min_frequency);
        let take = if self.count == 0 {
            moves.len()
        } else {
            self.count.min(moves.len())
        };
        Answer {
            board: self.board.to_string(),
            min_frequency: self.min_frequency,
            p1_mask: self.p1_mask,
            p2_mask: self.p2_mask,
            total: moves.len(),
            moves: moves[..take].iter().map(JsonMove::from).collect(),
        }
    }
}

// parse, validate, answer.
pub fn answer_json(move_generator: &movegen::MoveGenerator, json: &str) -> error::Returns<Answer> {
    let question = serde_json::from_str::<Question>(json)?;
    Ok(Kibitzer::prepare(&question)?.answer(move_generator))
}
