// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board, error, fash};

pub const MAX_FREQUENCY: u8 = 24;
pub const DEFAULT_FREQUENCY: u8 = 15;

pub struct WordEntry {
    word: std::sync::Arc<str>,
    tiles: Box<[u8]>,
    tally: alphabet::Tally,
    frequency: u8,
}

impl WordEntry {
    pub fn new(word: &str, frequency: u8) -> error::Returns<Self> {
        if word.is_empty() {
            return_error!("blank word".into());
        }
        if word.len() > board::BOARD_SIZE {
            return_error!(format!(
                "word {:?} is longer than the board ({} letters)",
                word,
                board::BOARD_SIZE
            ));
        }
        if frequency > MAX_FREQUENCY {
            return_error!(format!(
                "word {:?}: frequency {} exceeds {}",
                word, frequency, MAX_FREQUENCY
            ));
        }
        let mut tiles = Vec::with_capacity(word.len());
        alphabet::parse_tiles(word, &mut tiles)?;
        Ok(Self {
            word: word.into(),
            tally: alphabet::tally_of_tiles(&tiles),
            tiles: tiles.into_boxed_slice(),
            frequency,
        })
    }

    #[inline(always)]
    pub fn word(&self) -> &std::sync::Arc<str> {
        &self.word
    }

    #[inline(always)]
    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    #[inline(always)]
    pub fn tally(&self) -> &alphabet::Tally {
        &self.tally
    }

    #[inline(always)]
    pub fn frequency(&self) -> u8 {
        self.frequency
    }
}

// Dictionary in source order. Loaded once, never mutated.
pub struct WordIndex {
    entries: Box<[WordEntry]>,
}

impl WordIndex {
    pub fn from_entries(entries: Vec<WordEntry>) -> error::Returns<Self> {
        let mut seen = fash::MyHashMap::<&str, usize>::default();
        for (i, entry) in entries.iter().enumerate() {
            if let Some(previous) = seen.insert(&*entry.word, i) {
                return_error!(
                    error::Stage::Dictionary,
                    format!(
                        "word {:?} appears twice (entries {} and {})",
                        entry.word, previous, i
                    )
                );
            }
        }
        Ok(Self {
            entries: entries.into_boxed_slice(),
        })
    }

    // headerless "word,frequency" records.
    pub fn from_csv_reader<R: std::io::Read>(reader: R) -> error::Returns<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut entries = Vec::new();
        for (record_num, result) in (1..).zip(csv_reader.records()) {
            let record = result?;
            if record.len() != 2 {
                return_error!(
                    error::Stage::Dictionary,
                    format!(
                        "record {}: need 2 fields, found {}",
                        record_num,
                        record.len()
                    )
                );
            }
            let frequency = match record[1].parse::<u8>() {
                Ok(x) => x,
                Err(err) => {
                    return_error!(
                        error::Stage::Dictionary,
                        format!(
                            "record {}: bad frequency {:?}: {}",
                            record_num, &record[1], err
                        )
                    );
                }
            };
            match WordEntry::new(&record[0], frequency) {
                Ok(entry) => entries.push(entry),
                Err(err) => {
                    return_error!(
                        error::Stage::Dictionary,
                        format!("record {}: {}", record_num, err)
                    );
                }
            }
        }
        let ret = Self::from_entries(entries)?;
        tracing::debug!(num_words = ret.len(), "loaded word index");
        Ok(ret)
    }

    pub fn from_csv_path<P: AsRef<std::path::Path>>(path: P) -> error::Returns<Self> {
        let path = path.as_ref();
        let f = match std::fs::File::open(path) {
            Ok(f) => f,
            Err(err) => {
                return_error!(
                    error::Stage::Dictionary,
                    format!("cannot open {}: {}", path.display(), err)
                );
            }
        };
        let ret = Self::from_csv_reader(std::io::BufReader::new(f))?;
        tracing::info!(path = %path.display(), num_words = ret.len(), "word index ready");
        Ok(ret)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline(always)]
    pub fn get(&self, word_id: u32) -> &WordEntry {
        &self.entries[word_id as usize]
    }

    #[inline(always)]
    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn filter_by_frequency(&self, min_frequency: u8) -> Vec<&WordEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.frequency >= min_frequency)
            .collect()
    }

    // same selection as filter_by_frequency, as positions into entries().
    pub fn word_ids_by_frequency(&self, min_frequency: u8) -> Box<[u32]> {
        (0u32..)
            .zip(self.entries.iter())
            .filter(|(_, entry)| entry.frequency >= min_frequency)
            .map(|(word_id, _)| word_id)
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrequencyBand {
    Basic,
    Common,
    Highbrow,
    Obscure,
    Sesquipedalian,
}

impl FrequencyBand {
    pub const ALL: [FrequencyBand; 5] = [
        FrequencyBand::Basic,
        FrequencyBand::Common,
        FrequencyBand::Highbrow,
        FrequencyBand::Obscure,
        FrequencyBand::Sesquipedalian,
    ];

    #[inline(always)]
    pub fn min_frequency(self) -> u8 {
        match self {
            FrequencyBand::Basic => 18,
            FrequencyBand::Common => 15,
            FrequencyBand::Highbrow => 12,
            FrequencyBand::Obscure => 9,
            FrequencyBand::Sesquipedalian => 0,
        }
    }

    #[inline(always)]
    pub fn name(self) -> &'static str {
        match self {
            FrequencyBand::Basic => "basic",
            FrequencyBand::Common => "common",
            FrequencyBand::Highbrow => "highbrow",
            FrequencyBand::Obscure => "obscure",
            FrequencyBand::Sesquipedalian => "sesquipedalian",
        }
    }
}

impl std::str::FromStr for FrequencyBand {
    type Err = error::BoxAnyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match FrequencyBand::ALL.iter().find(|band| band.name() == s) {
            Some(&band) => Ok(band),
            None => Err(error::at(error::Stage::Request, format!("invalid band {:?}", s)).into()),
        }
    }
}

// a band name or a number in 0..=MAX_FREQUENCY.
pub fn parse_min_frequency(s: &str) -> error::Returns<u8> {
    if let Ok(band) = s.parse::<FrequencyBand>() {
        return Ok(band.min_frequency());
    }
    match s.parse::<u8>() {
        Ok(x) if x <= MAX_FREQUENCY => Ok(x),
        _ => {
            return_error!(
                error::Stage::Request,
                format!(
                    "invalid frequency {:?}, need 0..={} or a band name",
                    s, MAX_FREQUENCY
                )
            );
        }
    }
}
