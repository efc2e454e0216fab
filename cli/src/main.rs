use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use clap_verbosity_flag::Verbosity;
use sweeper_core::*;

use crate::view::BoardView;

mod view;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity,

    /// Preset board, takes precedence over the explicit dimensions
    #[arg(short, long, value_enum)]
    difficulty: Option<Level>,

    #[arg(long, default_value_t = 9)]
    width: Coord,

    #[arg(long, default_value_t = 9)]
    height: Coord,

    #[arg(short, long, default_value_t = 10)]
    mines: CellCount,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// TOML file with game settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Play the whole game from deductions after a single first click
    #[arg(short, long)]
    autoplay: bool,

    /// First click for --autoplay as `x,y`, the board centre by default
    #[arg(long, value_parser = parse_position)]
    first: Option<Position>,

    /// Draw hidden mines
    #[arg(long)]
    show_mines: bool,

    /// Print the final status as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Level {
    Beginner,
    Intermediate,
    Expert,
}

impl From<Level> for Difficulty {
    fn from(level: Level) -> Self {
        match level {
            Level::Beginner => Difficulty::Beginner,
            Level::Intermediate => Difficulty::Intermediate,
            Level::Expert => Difficulty::Expert,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Command {
    Click(Position),
    Flag(Position),
    Hint,
    Step,
    Reset,
    Quit,
    Help,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["c" | "click", x, y] => Ok(Self::Click(parse_xy(x, y)?)),
            ["f" | "flag", x, y] => Ok(Self::Flag(parse_xy(x, y)?)),
            ["h" | "hint"] => Ok(Self::Hint),
            ["a" | "auto"] => Ok(Self::Step),
            ["r" | "reset"] => Ok(Self::Reset),
            ["q" | "quit"] => Ok(Self::Quit),
            ["?" | "help"] => Ok(Self::Help),
            _ => Err(format!("unknown command {:?}, type `help` for usage", line.trim())),
        }
    }
}

fn parse_xy(x: &str, y: &str) -> std::result::Result<Position, String> {
    let x: i64 = x
        .trim()
        .parse()
        .map_err(|_| format!("could not parse x coordinate {:?}", x))?;
    let y: i64 = y
        .trim()
        .parse()
        .map_err(|_| format!("could not parse y coordinate {:?}", y))?;
    Position::try_from((x, y)).map_err(|err| err.to_string())
}

fn parse_position(arg: &str) -> std::result::Result<Position, String> {
    let (x, y) = arg
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got {:?}", arg))?;
    parse_xy(x, y)
}

fn print_usage() {
    println!("USAGE:");
    println!("\tc, click x y\tClick a cell");
    println!("\tf, flag x y \tToggle a flag");
    println!("\th, hint     \tList certain moves");
    println!("\ta, auto     \tPlay one certain move");
    println!("\tr, reset    \tStart over with the same size");
    println!("\tq, quit     \tLeave the game");
    println!("\t?, help     \tPrints help information");
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    let source = fs::read_to_string(path)
        .with_context(|| format!("Could not read settings from {}", path.display()))?;
    Settings::from_toml_str(&source)
        .with_context(|| format!("Could not parse settings in {}", path.display()))
}

/// Runs deductions to exhaustion, pausing between moves.
fn autoplay(player: &AutoPlayer, board: &mut Board) -> sweeper_core::Result<usize> {
    let delay = Duration::from_millis(player.settings().autoplay.delay_ms);
    player.run(board, |_, inference| {
        println!("{}", inference);
        thread::sleep(delay);
    })
}

fn draw(board: &Board, settings: &Settings) {
    println!("{}", BoardView::new(board, settings.debug.show_mines));
    if settings.show_status {
        println!("{}", board.status());
    }
}

fn execute(player: &AutoPlayer, board: &mut Board, command: Command) -> sweeper_core::Result<()> {
    let changed = match command {
        Command::Click(pos) => board.click(pos)?.has_update(),
        Command::Flag(pos) => board.toggle_flag(pos)?.has_update(),
        Command::Hint => {
            let inferences = infer(&board.snapshot());
            if inferences.is_empty() {
                println!("No certain move");
            }
            for inference in inferences {
                println!("{}", inference);
            }
            false
        }
        Command::Step => match player.step(board)? {
            Some(inference) => {
                println!("{}", inference);
                true
            }
            None => {
                println!("No certain move");
                false
            }
        },
        Command::Reset => {
            board.reset();
            true
        }
        Command::Quit | Command::Help => false,
    };

    let follow_up = matches!(command, Command::Click(_) | Command::Flag(_));
    if changed && follow_up && player.settings().autoplay.enabled {
        autoplay(player, board)?;
    }
    Ok(())
}

fn interactive(player: &AutoPlayer, board: &mut Board) -> Result<()> {
    let settings = player.settings();
    let mut lines = io::stdin().lock().lines();

    loop {
        draw(board, settings);
        if board.is_finished() {
            return Ok(());
        }

        print!(">> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                eprintln!("error: {}", err);
                continue;
            }
        };
        match command {
            Command::Quit => return Ok(()),
            Command::Help => print_usage(),
            _ => match execute(player, board, command) {
                Ok(()) => {}
                Err(err) if err.kind() == ErrorKind::Configuration => return Err(err.into()),
                Err(err) => eprintln!("error: {}", err),
            },
        }

        for event in board.take_events() {
            log::debug!("{:?}", event);
        }
    }
}

fn report(board: &Board, json: bool) -> Result<()> {
    match board.state() {
        GameState::Won => println!("All mines found, you win!"),
        GameState::Lost => match board.triggered_mine() {
            Some(pos) => println!("Boom! Mine at {}.", pos),
            None => println!("Boom!"),
        },
        GameState::Playing => println!("Game left unfinished."),
    }
    if json {
        println!("{}", serde_json::to_string_pretty(&board.status())?);
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let mut settings = load_settings(args.config.as_deref())?;
    settings.debug.show_mines |= args.show_mines;

    let config = match args.difficulty {
        Some(level) => GameConfig::from(Difficulty::from(level)),
        None => GameConfig::new(args.width, args.height, args.mines)
            .context("Invalid board configuration")?,
    };
    log::debug!("config: {:?}, seed: {:?}", config, args.seed);

    let mut board = match args.seed {
        Some(seed) => Board::with_seed(config, seed),
        None => Board::with_generator(config, RandomMinefieldGenerator::from_entropy()),
    }
    .context("Invalid board configuration")?;
    let player = AutoPlayer::new(settings);

    if args.autoplay {
        let first = args
            .first
            .unwrap_or_else(|| Position::new(config.width / 2, config.height / 2));
        board
            .click(first)
            .with_context(|| format!("First click at {} failed", first))?;
        let moves = autoplay(&player, &mut board)?;
        log::info!("Autoplay made {} moves", moves);
        draw(&board, player.settings());
    } else {
        interactive(&player, &mut board)?;
    }

    report(&board, args.json)
}
