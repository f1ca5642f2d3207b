// Copyright (C) 2020-2026 Andy Kurnia.

use letterpress::{adjacency, engine_config, error, kibitzer, movegen, word_index};
use std::io::Read;

// usage: json <words.csv> [question.json] [key=value...] [-v]
// without a question file, the question is read from stdin.
// example question:
//   { "board": "abcdefghijklmnopqrstuvwxy", "band": "common", "count": 15 }
pub fn main() -> error::Returns<()> {
    let args = std::env::args().collect::<Vec<_>>();
    letterpress::init_logging(args.iter().any(|a| a == "-v"));
    let args = args.into_iter().filter(|a| a != "-v").collect::<Vec<_>>();
    if args.len() < 2 {
        return Err("usage: json <words.csv> [question.json] [key=value...] [-v]".into());
    }

    let mut config = engine_config::make_default_engine_config();
    let mut question_path = None;
    for arg in &args[2..] {
        if arg.contains('=') {
            config.apply_kv(arg)?;
        } else if question_path.is_none() {
            question_path = Some(arg.as_str());
        } else {
            return Err(format!("unexpected argument {:?}", arg).into());
        }
    }

    let data = match question_path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut s = String::new();
            std::io::stdin().read_to_string(&mut s)?;
            s
        }
    };

    let move_generator = movegen::MoveGenerator::new(
        std::sync::Arc::new(word_index::WordIndex::from_csv_path(&args[1])?),
        adjacency::COMMON_ADJACENCY_TABLE.clone(),
        config,
    );

    let t0 = std::time::Instant::now();
    let answer = kibitzer::answer_json(&move_generator, &data)?;
    tracing::info!(
        board = %answer.board,
        min_frequency = answer.min_frequency,
        total = answer.total,
        elapsed = ?t0.elapsed(),
        "answered"
    );
    println!("{}", serde_json::to_string(&answer)?);

    Ok(())
}
