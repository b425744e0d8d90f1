use std::io::{self, BufRead, Write};

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use catan_practice_rs::board::{decode_board, encode_board, generate_board, is_valid_board};
use catan_practice_rs::cli::board_display::{phase_info, render_board, render_hints, render_placements};
use catan_practice_rs::cli::auto_place;
use catan_practice_rs::game::{DraftConfig, DraftPhase, DraftState};

#[derive(Debug, Parser)]
#[command(name = "catan-practice")]
#[command(about = "Practice the Catan placement draft in the terminal")]
struct Args {
    /// Settlements only; skip every road placement
    #[arg(long)]
    skip_roads: bool,

    /// Seed for a reproducible board
    #[arg(long)]
    seed: Option<u64>,

    /// Start from a saved board string instead of generating one
    #[arg(long)]
    load: Option<String>,

    /// Print the starting board as JSON and exit
    #[arg(long)]
    dump: bool,
}

fn main() {
    let args = Args::parse();
    let config = DraftConfig {
        skip_roads: args.skip_roads,
    };

    let layout = match starting_layout(&args) {
        Ok(layout) => layout,
        Err(message) => {
            eprintln!("Error: {message}");
            std::process::exit(1);
        }
    };

    if args.dump {
        println!(
            "{}",
            serde_json::to_string_pretty(&layout).expect("layout serializes")
        );
        return;
    }

    let mut state = DraftState::with_layout(config, layout);

    println!("Catan Placement Practice");
    println!("Type 'help' for commands.\n");
    print!("{}", render_board(state.layout()));
    println!("\n{}", phase_info(&state));

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let Some(Ok(line)) = stdin.lock().lines().next() else {
            break;
        };
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };

        match command {
            "board" => {
                print!("{}", render_board(state.layout()));
                print!("{}", render_placements(&state));
            }
            "hints" => print_hints(&state),
            "s" => {
                let hints = state.legal_settlement_vertices();
                if let Some(vertex) = pick(words.next(), &hints) {
                    match state.place_settlement(&vertex) {
                        Ok(()) => println!("{}", phase_info(&state)),
                        Err(error) => println!("Rejected: {error}"),
                    }
                }
            }
            "r" => {
                let hints = state.legal_road_edges();
                if let Some(edge) = pick(words.next(), &hints) {
                    match state.place_road(&edge) {
                        Ok(()) => println!("{}", phase_info(&state)),
                        Err(error) => println!("Rejected: {error}"),
                    }
                }
            }
            "auto" => {
                let mut rng = rand::thread_rng();
                match auto_place(&mut state, &mut rng) {
                    Some(_) => println!("{}", phase_info(&state)),
                    None => println!("Setup Complete!"),
                }
            }
            "run" => {
                let mut rng = rand::thread_rng();
                while auto_place(&mut state, &mut rng).is_some() {}
                print!("{}", render_placements(&state));
                println!("{}", phase_info(&state));
            }
            "undo" => match state.undo() {
                Some(_) => println!("{}", phase_info(&state)),
                None => println!("Nothing to undo."),
            },
            "new" => {
                if !state.history().is_empty() && !confirm("This clears all placements.") {
                    continue;
                }
                match fresh_layout(None) {
                    Ok(layout) => {
                        state = DraftState::with_layout(config, layout);
                        print!("{}", render_board(state.layout()));
                        println!("\n{}", phase_info(&state));
                    }
                    Err(message) => println!("Error: {message}"),
                }
            }
            "save" => println!("{}", encode_board(state.layout())),
            "load" => match words.next() {
                Some(code) => match decode_board(code) {
                    Ok(layout) => {
                        if !state.history().is_empty() && !confirm("This clears all placements.") {
                            continue;
                        }
                        if !is_valid_board(&layout) {
                            println!("Warning: loaded board violates placement constraints.");
                        }
                        state = DraftState::with_layout(config, layout);
                        print!("{}", render_board(state.layout()));
                        println!("\n{}", phase_info(&state));
                    }
                    Err(error) => println!("Load failed: {error}"),
                },
                None => println!("Usage: load <board-string>"),
            },
            "help" => print_help(),
            "quit" | "exit" => break,
            other => println!("Unknown command {other:?}. Type 'help' for commands."),
        }
    }
}

fn starting_layout(args: &Args) -> Result<catan_practice_rs::board::HexLayout, String> {
    if let Some(code) = &args.load {
        let layout = decode_board(code).map_err(|error| error.to_string())?;
        if !is_valid_board(&layout) {
            eprintln!("Warning: loaded board violates placement constraints.");
        }
        return Ok(layout);
    }
    fresh_layout(args.seed)
}

fn fresh_layout(seed: Option<u64>) -> Result<catan_practice_rs::board::HexLayout, String> {
    let result = match seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            generate_board(&mut rng)
        }
        None => {
            let mut rng = rand::thread_rng();
            generate_board(&mut rng)
        }
    };
    result.map_err(|error| error.to_string())
}

fn print_hints(state: &DraftState) {
    match state.phase() {
        DraftPhase::PlacingSettlement { .. } => {
            print!("{}", render_hints(&state.legal_settlement_vertices()));
        }
        DraftPhase::PlacingRoad { .. } => {
            print!("{}", render_hints(&state.legal_road_edges()));
        }
        DraftPhase::Complete => println!("Setup Complete!"),
    }
}

fn pick<T: Clone>(word: Option<&str>, hints: &[T]) -> Option<T> {
    let Some(word) = word else {
        println!("Usage: s|r <hint-index>  (see 'hints')");
        return None;
    };
    let Ok(index) = word.parse::<usize>() else {
        println!("Not a hint index: {word}");
        return None;
    };
    let Some(item) = hints.get(index) else {
        println!("Hint index out of range: {index}");
        return None;
    };
    Some(item.clone())
}

fn confirm(message: &str) -> bool {
    print!("{message} Continue? [y/N] ");
    let _ = io::stdout().flush();
    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes")
}

fn print_help() {
    println!("Commands:");
    println!("  board        show the board and current placements");
    println!("  hints        list legal targets for the current phase");
    println!("  s <n>        place a settlement at hint n");
    println!("  r <n>        place a road at hint n");
    println!("  auto         let the current player place randomly");
    println!("  run          auto-place until the draft completes");
    println!("  undo         take back the last placement");
    println!("  new          regenerate the board (confirms if placements exist)");
    println!("  save         print the board save string");
    println!("  load <code>  replace the board from a save string");
    println!("  quit         leave");
}
