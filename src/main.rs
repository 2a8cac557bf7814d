use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gravity_four::config::AppConfig;
use gravity_four::game::{Game, GameEvent, GameStatus};
use gravity_four::ui::App;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

/// Connect Four where gravity does not always point down.
#[derive(Parser)]
#[command(name = "gravity-four", about = "Play Connect Four with shifting gravity")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "gravity-four.toml")]
    config: PathBuf,

    /// Seed for gravity changes (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Classic rules: gravity always points down
    #[arg(long)]
    classic: bool,

    /// Read moves from stdin instead of running the terminal UI
    #[arg(long)]
    headless: bool,

    /// In headless mode, print JSON state snapshots
    #[arg(long, requires = "headless")]
    json: bool,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml()?);
        return Ok(());
    }

    init_tracing(&cli)?;

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if cli.classic {
        config.rules.dynamic_gravity = false;
    }
    if let Some(seed) = cli.seed {
        config.rules.seed = Some(seed);
    }

    let schedule = config.rules.schedule();
    let game = match config.rules.seed {
        Some(seed) => Game::seeded(schedule, seed),
        None => Game::new(schedule),
    };
    tracing::info!(?schedule, seed = ?config.rules.seed, "starting game");

    if cli.headless {
        run_headless(game, cli.json)
    } else {
        run_tui(game, config).context("terminal UI failed")
    }
}

/// Logs go to stderr in headless mode and only to `--log-file` while the
/// terminal UI owns the screen.
fn init_tracing(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if cli.headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}

fn run_tui(game: Game, config: AppConfig) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(game, config.ui);
    let res = app.run(&mut terminal);

    // Restore terminal even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}

/// One command per line: a 1-based line number, `r` to reset, `q` to quit.
fn run_headless(mut game: Game, json: bool) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    print_state(&mut out, &game, json)?;
    for input in stdin.lock().lines() {
        let input = input.context("reading stdin")?;
        match input.trim() {
            "" => continue,
            "q" => break,
            "r" => {
                game.reset();
                writeln!(out, "new game")?;
            }
            command => match command.parse::<usize>() {
                Ok(line) if line > 0 => match game.drop_at(line - 1) {
                    Ok(events) => {
                        for event in events {
                            print_event(&mut out, &event)?;
                        }
                    }
                    Err(err) => writeln!(out, "rejected: {err}")?,
                },
                _ => writeln!(out, "unknown command: {command}")?,
            },
        }
        print_state(&mut out, &game, json)?;
    }
    Ok(())
}

fn print_event(out: &mut impl Write, event: &GameEvent) -> io::Result<()> {
    match event {
        GameEvent::PiecePlaced { .. } => Ok(()),
        GameEvent::GravityChanged(change) => writeln!(
            out,
            "gravity changed: {} -> {} (turn {})",
            change.from, change.to, change.turn
        ),
        GameEvent::Won(win) => writeln!(out, "{} wins!", win.player.name()),
        GameEvent::Drawn => writeln!(out, "It's a draw!"),
    }
}

fn print_state<R: rand::Rng>(out: &mut impl Write, game: &Game<R>, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer(&mut *out, game.state()).context("encoding state")?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "{}", game.board())?;
    let status = match game.status() {
        GameStatus::InProgress => format!("{} to move", game.current_player().name()),
        GameStatus::Won(win) => format!("won by {}", win.player.name()),
        GameStatus::Drawn => "drawn".to_string(),
    };
    writeln!(
        out,
        "turn {} | gravity {} {} | {}",
        game.turn(),
        game.gravity(),
        game.gravity().arrow(),
        status
    )?;
    Ok(())
}
