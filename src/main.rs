//! Command-line utilities for the kibitz engine: perft counting, one-shot
//! analysis, and live streaming analysis printed as JSON lines.

use anyhow::Result;
use clap::{Parser, Subcommand};
use futures_lite::future::block_on;
use kibitz_engine::constants::START_FEN;
use kibitz_engine::perft::{perft, perft_divide};
use kibitz_engine::{analyze, parse_fen, stream_search, SearchOptions};

#[derive(Parser)]
#[command(name = "kibitz", about = "Chess analysis engine utilities")]
struct Cli {
    /// Position to operate on.
    #[arg(long, default_value = START_FEN)]
    fen: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Count leaf nodes of the legal move tree.
    Perft {
        depth: u32,
        /// Print per-root-move counts.
        #[arg(long)]
        divide: bool,
    },
    /// Run a search and print the final report.
    Analyze {
        #[arg(long, default_value_t = 5)]
        depth: u32,
        #[arg(long = "time-ms", default_value_t = 3000)]
        time_ms: u64,
    },
    /// Run a search, printing every stream record as a JSON line.
    Stream {
        #[arg(long, default_value_t = 5)]
        depth: u32,
        #[arg(long = "time-ms", default_value_t = 3000)]
        time_ms: u64,
        /// Snapshot throttle in milliseconds.
        #[arg(long = "interval-ms")]
        interval_ms: Option<u64>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        None => {
            let board = parse_fen(&cli.fen)?;
            println!("{board}");
        }
        Some(Command::Perft { depth, divide }) => {
            let mut board = parse_fen(&cli.fen)?;
            if divide {
                for (mv, count) in perft_divide(&mut board, depth.max(1)) {
                    println!("{mv}: {count}");
                }
            } else {
                println!("{}", perft(&mut board, depth));
            }
        }
        Some(Command::Analyze { depth, time_ms }) => {
            let options = SearchOptions {
                max_depth: depth,
                time_limit_ms: time_ms,
                snapshot_interval_ms: None,
            };
            let report = analyze(&cli.fen, &options)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Some(Command::Stream {
            depth,
            time_ms,
            interval_ms,
        }) => {
            let options = SearchOptions {
                max_depth: depth,
                time_limit_ms: time_ms,
                snapshot_interval_ms: interval_ms,
            };
            let mut stream = stream_search(&cli.fen, &options)?;
            block_on(async {
                while let Some(record) = stream.next().await {
                    println!("{}", serde_json::to_string(&record)?);
                    if record.is_terminal() {
                        break;
                    }
                }
                Ok::<(), anyhow::Error>(())
            })?;
        }
    }

    Ok(())
}
