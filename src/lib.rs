// Copyright (C) 2020-2026 Andy Kurnia.

#[macro_use]
pub mod error;

pub mod adjacency;
pub mod alphabet;
pub mod bitmask;
pub mod board;
pub mod cache;
pub mod capture;
pub mod display;
pub mod engine_config;
pub mod fash;
pub mod kibitzer;
pub mod matrix;
pub mod move_ranker;
pub mod movegen;
pub mod placement;
pub mod prob;
pub mod rlhelper;
pub mod word_index;

pub use board::BOARD_SIZE;
pub use word_index::{DEFAULT_FREQUENCY, MAX_FREQUENCY};

// Sets up stderr logging for the command-line tools. verbose raises the
// level from INFO to DEBUG.
pub fn init_logging(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .try_init();
}
