// Copyright (C) 2020-2026 Andy Kurnia.

use super::{error, move_ranker};

#[derive(Clone, Debug)]
pub struct StaticEngineConfig {
    frequency_cache_capacity: usize,
    playable_cache_capacity: usize,
    position_cache_capacity: usize,
    move_cache_capacity: usize,
    num_threads: usize,
    // fewer playable words than this are done on the calling thread.
    parallel_threshold: usize,
    ranking_rule: move_ranker::RankingRule,
}

#[derive(Clone, Debug)]
pub enum EngineConfig {
    Static(StaticEngineConfig),
}

impl EngineConfig {
    #[inline(always)]
    pub fn frequency_cache_capacity(&self) -> usize {
        match self {
            EngineConfig::Static(x) => x.frequency_cache_capacity,
        }
    }

    #[inline(always)]
    pub fn playable_cache_capacity(&self) -> usize {
        match self {
            EngineConfig::Static(x) => x.playable_cache_capacity,
        }
    }

    #[inline(always)]
    pub fn position_cache_capacity(&self) -> usize {
        match self {
            EngineConfig::Static(x) => x.position_cache_capacity,
        }
    }

    #[inline(always)]
    pub fn move_cache_capacity(&self) -> usize {
        match self {
            EngineConfig::Static(x) => x.move_cache_capacity,
        }
    }

    #[inline(always)]
    pub fn num_threads(&self) -> usize {
        match self {
            EngineConfig::Static(x) => x.num_threads,
        }
    }

    #[inline(always)]
    pub fn parallel_threshold(&self) -> usize {
        match self {
            EngineConfig::Static(x) => x.parallel_threshold,
        }
    }

    #[inline(always)]
    pub fn ranking_rule(&self) -> move_ranker::RankingRule {
        match self {
            EngineConfig::Static(x) => x.ranking_rule,
        }
    }

    #[inline(always)]
    fn fields_mut(&mut self) -> &mut StaticEngineConfig {
        match self {
            EngineConfig::Static(x) => x,
        }
    }

    pub fn set_num_threads(&mut self, num_threads: usize) {
        self.fields_mut().num_threads = num_threads.max(1);
    }

    pub fn set_ranking_rule(&mut self, ranking_rule: move_ranker::RankingRule) {
        self.fields_mut().ranking_rule = ranking_rule;
    }

    // "key=value", as given on command lines.
    pub fn apply_kv(&mut self, kv: &str) -> error::Returns<()> {
        let (key, value) = match kv.split_once('=') {
            Some(x) => x,
            None => {
                return_error!(error::Stage::Config, format!("expected key=value, found {:?}", kv));
            }
        };
        let parse_usize = |value: &str| -> error::Returns<usize> {
            match value.parse::<usize>() {
                Ok(x) => Ok(x),
                Err(err) => Err(error::at(
                    error::Stage::Config,
                    format!("{}: {:?}: {}", key, value, err),
                )
                .into()),
            }
        };
        let fields = self.fields_mut();
        match key {
            "frequency-cache" => fields.frequency_cache_capacity = parse_usize(value)?,
            "playable-cache" => fields.playable_cache_capacity = parse_usize(value)?,
            "position-cache" => fields.position_cache_capacity = parse_usize(value)?,
            "move-cache" => fields.move_cache_capacity = parse_usize(value)?,
            "threads" => fields.num_threads = parse_usize(value)?.max(1),
            "parallel-threshold" => fields.parallel_threshold = parse_usize(value)?,
            "ranking" => fields.ranking_rule = value.parse()?,
            _ => {
                return_error!(error::Stage::Config, format!("unknown setting {:?}", key));
            }
        }
        Ok(())
    }
}

pub fn make_default_engine_config() -> EngineConfig {
    EngineConfig::Static(StaticEngineConfig {
        // thresholds are 0..=24, all fit.
        frequency_cache_capacity: 32,
        playable_cache_capacity: 1024,
        position_cache_capacity: 1024,
        move_cache_capacity: 256,
        num_threads: num_cpus::get(),
        parallel_threshold: 64,
        ranking_rule: move_ranker::RankingRule::CaptureCount,
    })
}

// no threads, no caches. for measuring and for checking cached answers.
pub fn make_uncached_engine_config() -> EngineConfig {
    EngineConfig::Static(StaticEngineConfig {
        frequency_cache_capacity: 0,
        playable_cache_capacity: 0,
        position_cache_capacity: 0,
        move_cache_capacity: 0,
        num_threads: 1,
        parallel_threshold: usize::MAX,
        ranking_rule: move_ranker::RankingRule::CaptureCount,
    })
}
