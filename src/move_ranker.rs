// Copyright (C) 2020-2026 Andy Kurnia.

use super::{bitmask, movegen};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RankingRule {
    // more captured cells first, then longer words.
    #[default]
    CaptureCount,
    // captured mask compared as a plain integer, then longer words. This
    // favors high-numbered cells over more cells; kept for matching older
    // move lists.
    RawCapturedMask,
}

impl RankingRule {
    #[inline(always)]
    pub fn name(self) -> &'static str {
        match self {
            RankingRule::CaptureCount => "capture-count",
            RankingRule::RawCapturedMask => "raw-mask",
        }
    }

    #[inline(always)]
    fn primary_key(self, m: &movegen::Move) -> u32 {
        match self {
            RankingRule::CaptureCount => bitmask::popcount(m.captured),
            RankingRule::RawCapturedMask => m.captured,
        }
    }

    // best first.
    #[inline(always)]
    pub fn compare(self, a: &movegen::Move, b: &movegen::Move) -> std::cmp::Ordering {
        self.primary_key(b)
            .cmp(&self.primary_key(a))
            .then_with(|| b.word.len().cmp(&a.word.len()))
    }

    // stable, so equal moves keep generation order.
    pub fn rank(self, moves: &mut [movegen::Move]) {
        moves.sort_by(|a, b| self.compare(a, b));
    }
}

impl std::str::FromStr for RankingRule {
    type Err = super::error::BoxAnyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "capture-count" => Ok(RankingRule::CaptureCount),
            "raw-mask" => Ok(RankingRule::RawCapturedMask),
            _ => Err(super::error::at(
                super::error::Stage::Config,
                format!("invalid ranking rule {:?}", s),
            )
            .into()),
        }
    }
}
