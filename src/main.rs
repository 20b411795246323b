use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Deserialize;
use tempo_core::Board;
use tempo_engine::{SearchLimits, SearchOutcome, Searcher};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Depth used when neither the flag nor the position file sets one.
const DEFAULT_DEPTH: u8 = 3;

#[derive(Parser, Debug)]
#[command(name = "tempo")]
#[command(about = "Find the best move in a chess position", long_about = None)]
struct Args {
    /// JSON file of the form {"fen": "...", "depth": 3}
    position: Option<PathBuf>,

    /// FEN of the position to search
    #[arg(long, conflicts_with = "position")]
    fen: Option<String>,

    /// Maximum search depth in plies (overrides the file)
    #[arg(short, long)]
    depth: Option<u8>,

    /// Time budget in milliseconds
    #[arg(short, long, default_value_t = 5_000)]
    time_ms: u64,

    /// Print the board to stderr before searching
    #[arg(long)]
    show_board: bool,
}

/// Contents of a position file.
#[derive(Debug, Deserialize)]
struct PositionFile {
    fen: String,
    #[serde(default)]
    depth: Option<u8>,
}

/// What to search, after merging flags and file.
#[derive(Debug, PartialEq, Eq)]
struct Request {
    fen: String,
    depth: u8,
}

fn read_position_file(path: &Path) -> Result<PositionFile> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn resolve(args: &Args) -> Result<Request> {
    let (fen, file_depth) = match (&args.fen, &args.position) {
        (Some(fen), _) => (fen.clone(), None),
        (None, Some(path)) => {
            let file = read_position_file(path)?;
            (file.fen, file.depth)
        }
        (None, None) => bail!("either --fen or a position file is required"),
    };
    let depth = args.depth.or(file_depth).unwrap_or(DEFAULT_DEPTH);
    Ok(Request { fen, depth })
}

/// Print the outcome as `key: value` lines.
fn write_outcome(out: &mut impl Write, outcome: &SearchOutcome) -> io::Result<()> {
    match outcome {
        SearchOutcome::GameOver => writeln!(out, "No legal moves (game over)."),
        SearchOutcome::OutOfTime { .. } => writeln!(out, "No move found within the time budget."),
        SearchOutcome::Found(result) => {
            writeln!(out, "best_move_uci: {}", result.uci)?;
            writeln!(out, "best_move_san: {}", result.san)?;
            writeln!(out, "score_estimate_cp: {}", result.score)?;
            writeln!(out, "search_nodes(root_moves_tried): {}", result.nodes)?;
            writeln!(out, "depth_used: {}", result.depth)?;
            writeln!(out, "elapsed_seconds: {:.3}", result.elapsed.as_secs_f64())
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let request = resolve(&args)?;

    let mut board: Board = request
        .fen
        .parse()
        .with_context(|| format!("invalid position \"{}\"", request.fen))?;
    if args.show_board {
        eprintln!("{}", board.pretty());
    }

    let limits = SearchLimits::new(request.depth, Duration::from_millis(args.time_ms));
    limits.validate()?;
    info!(fen = %request.fen, depth = limits.max_depth, time_ms = args.time_ms, "searching");

    let outcome = Searcher::new(limits).search_with(&mut board, |report| {
        info!(
            depth = report.depth,
            score = report.score,
            nodes = report.nodes,
            best = %report.best_move,
            "depth complete"
        );
    });

    write_outcome(&mut io::stdout().lock(), &outcome)?;
    Ok(())
}
