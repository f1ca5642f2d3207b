// Copyright (C) 2020-2026 Andy Kurnia.

use letterpress::{
    adjacency, alphabet, bitmask, board, display, engine_config, error, movegen, placement,
    prob, return_error, rlhelper, word_index,
};

static HELP: &str = "\
board <25 letters>      set the board
freq [0-24]             show or set the minimum word frequency
band [name]             list bands, or set the minimum frequency by band
moves [n]               list the best n moves (default 20, 0 for all)
show <n>                draw move n of the last list on the board
placements <word>       placements of one word on the board
mask <positions...>     bit mask of board positions
set <key=value>         change an engine setting and clear caches
stats                   cache statistics
source <file>           run commands from a file
help                    this text
exit                    leave";

struct Shell {
    move_generator: movegen::MoveGenerator,
    board: Option<board::Board>,
    min_frequency: u8,
    last_moves: Option<std::sync::Arc<[movegen::Move]>>,
}

impl Shell {
    fn need_board(&self) -> error::Returns<board::Board> {
        match self.board {
            Some(b) => Ok(b),
            None => Err("no board yet, use: board <25 letters>".into()),
        }
    }

    fn run(&mut self, strings: &[String]) -> error::Returns<()> {
        match strings[0].as_str() {
            "board" => {
                if strings.len() < 2 {
                    return_error!("need 25 letters".into());
                }
                let b = strings[1].parse::<board::Board>()?;
                display::print_board(&b);
                self.board = Some(b);
                self.last_moves = None;
            }
            "freq" => {
                if strings.len() < 2 {
                    println!("min frequency: {}", self.min_frequency);
                } else {
                    self.min_frequency = word_index::parse_min_frequency(&strings[1])?;
                    self.last_moves = None;
                }
            }
            "band" => {
                if strings.len() < 2 {
                    for band in word_index::FrequencyBand::ALL {
                        println!("{:15} {}", band.name(), band.min_frequency());
                    }
                } else {
                    self.min_frequency = strings[1]
                        .parse::<word_index::FrequencyBand>()?
                        .min_frequency();
                    println!("min frequency: {}", self.min_frequency);
                    self.last_moves = None;
                }
            }
            "moves" => {
                let b = self.need_board()?;
                let n = if strings.len() > 1 {
                    strings[1].parse::<usize>()?
                } else {
                    20
                };
                let t0 = std::time::Instant::now();
                let moves = self
                    .move_generator
                    .get_moves_for_board(&b, self.min_frequency);
                println!(
                    "found {} moves for {} playable words in {:?}",
                    moves.len(),
                    self.move_generator
                        .playable_words(&b, self.min_frequency)
                        .len(),
                    t0.elapsed()
                );
                let n = if n == 0 { moves.len() } else { n.min(moves.len()) };
                for (i, m) in moves[..n].iter().enumerate() {
                    println!("{:4} {}", i, display::fmt_move(m));
                }
                self.last_moves = Some(moves);
            }
            "show" => {
                let b = self.need_board()?;
                let moves = match &self.last_moves {
                    Some(x) => x,
                    None => {
                        return_error!("no moves listed yet".into());
                    }
                };
                let i = match strings.get(1) {
                    Some(s) => s.parse::<usize>()?,
                    None => 0,
                };
                match moves.get(i) {
                    Some(m) => {
                        println!("{}", display::fmt_move(m));
                        print!("{}", display::fmt_board(&b, m.mask, m.captured));
                    }
                    None => {
                        return_error!(format!("only {} moves", moves.len()));
                    }
                }
            }
            "placements" => {
                let b = self.need_board()?;
                if strings.len() < 2 {
                    return_error!("need a word".into());
                }
                let mut tiles = Vec::new();
                alphabet::parse_tiles(&strings[1], &mut tiles)?;
                let tally = alphabet::tally_of_tiles(&tiles);
                if !alphabet::is_subset(&tally, &b.tally()) {
                    println!("{} is not playable on this board", strings[1]);
                    return Ok(());
                }
                let position_index = self.move_generator.position_index(&b);
                println!(
                    "{} ({}): {} placements",
                    strings[1],
                    alphabet::fmt_tally(&tally),
                    prob::count_placements(&mut prob::Pascal::new(), &tally, &position_index)
                );
                placement::enumerate_placements(&tally, &position_index, |positions: &[u8]| {
                    println!("{:?}", positions);
                });
            }
            "mask" => {
                let mut positions = Vec::with_capacity(strings.len() - 1);
                for s in &strings[1..] {
                    let p = s.parse::<u8>()?;
                    if p as usize >= board::BOARD_SIZE {
                        return_error!(format!("position {} is off the board", p));
                    }
                    positions.push(p);
                }
                let mask = bitmask::get_bit_mask_for_positions(&positions);
                println!("{} ({:#09x})", mask, mask);
            }
            "set" => {
                if strings.len() < 2 {
                    println!("{:?}", self.move_generator.config());
                    return Ok(());
                }
                let mut config = self.move_generator.config().clone();
                config.apply_kv(&strings[1])?;
                self.move_generator = movegen::MoveGenerator::new(
                    std::sync::Arc::clone(self.move_generator.word_index()),
                    self.move_generator.adjacency_table().clone(),
                    config,
                );
                self.last_moves = None;
            }
            "stats" => {
                let g = &self.move_generator;
                for (name, stats) in [
                    ("frequency", g.frequency_cache_stats()),
                    ("playable", g.playable_cache_stats()),
                    ("position", g.position_cache_stats()),
                    ("moves", g.move_cache_stats()),
                ] {
                    println!(
                        "{:10} {:5}/{:<5} hits {} misses {}",
                        name, stats.len, stats.capacity, stats.hits, stats.misses
                    );
                }
            }
            _ => {
                return_error!("invalid input, help for help".into());
            }
        }
        Ok(())
    }
}

pub fn main() -> error::Returns<()> {
    let args = std::env::args().collect::<Vec<_>>();
    let verbose = args.iter().any(|a| a == "-v");
    letterpress::init_logging(verbose);
    let args = args.into_iter().filter(|a| a != "-v").collect::<Vec<_>>();
    if args.len() < 2 {
        return Err("usage: shell <words.csv> [key=value...] [-v]".into());
    }
    let mut config = engine_config::make_default_engine_config();
    for kv in &args[2..] {
        config.apply_kv(kv)?;
    }
    let mut shell = Shell {
        move_generator: movegen::MoveGenerator::new(
            std::sync::Arc::new(word_index::WordIndex::from_csv_path(&args[1])?),
            adjacency::COMMON_ADJACENCY_TABLE.clone(),
            config,
        ),
        board: None,
        min_frequency: word_index::DEFAULT_FREQUENCY,
        last_moves: None,
    };

    let mut rl = rlhelper::new_rl_editor(">> ")?;
    let mut cmd_stack = Vec::<(String, Option<(String, usize)>)>::new();
    loop {
        if let Some((line, source)) = cmd_stack.pop() {
            if let Some((filename, line_num)) = source {
                println!("{}:{}> {}", filename, line_num, line);
            }
            match shell_words::split(&line) {
                Ok(strings) => {
                    if !strings.is_empty() {
                        match strings[0].as_str() {
                            "help" => {
                                println!("{}", HELP);
                            }
                            "exit" => {
                                break;
                            }
                            "source" => {
                                if strings.len() > 1 {
                                    match std::fs::read_to_string(&strings[1]) {
                                        Ok(whole_file) => {
                                            let v = cmd_stack.len();
                                            for (line_num, line) in whole_file.lines().enumerate() {
                                                cmd_stack.push((
                                                    line.to_string(),
                                                    Some((strings[1].clone(), line_num + 1)),
                                                ));
                                            }
                                            cmd_stack[v..].reverse();
                                        }
                                        Err(err) => {
                                            println!("cannot open file: {:?}", err);
                                        }
                                    }
                                } else {
                                    println!("need another arg");
                                }
                            }
                            _ => {
                                if let Err(err) = shell.run(&strings) {
                                    println!("{}", err);
                                }
                            }
                        }
                    }
                }
                Err(err) => {
                    println!("Bad quoting: {:?}", err);
                }
            }
        } else {
            match rl.readline(">> ") {
                Ok(line) => {
                    let _ = rl.add_history_entry(line.as_str());
                    cmd_stack.push((line, None));
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }
    }

    Ok(())
}
