use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use othello_cli::ai::{play_series, Agent, GreedyAgent};
use othello_cli::config::{AppConfig, BotKind};
use othello_cli::game::{GameOutcome, Player};
use othello_cli::session::{Command, CommandError, Session, SessionEvent};
use othello_cli::ui::{snapshot, App};

/// Play Othello against a bot in the terminal.
#[derive(Parser)]
#[command(name = "othello", about = "Play Othello against a bot in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "othello.toml")]
    config: PathBuf,

    /// Read commands from stdin instead of running the full-screen UI
    #[arg(long)]
    headless: bool,

    /// Override the opponent
    #[arg(long, value_enum)]
    bot: Option<BotKind>,

    /// Override the pause before each bot move, in milliseconds
    #[arg(long)]
    think_ms: Option<u64>,

    /// Play as black or white
    #[arg(long, value_parser = parse_player)]
    human: Option<Player>,

    /// Override where the board snapshot is written
    #[arg(long, conflicts_with = "no_snapshot")]
    snapshot: Option<PathBuf>,

    /// Do not write a board snapshot
    #[arg(long)]
    no_snapshot: bool,

    /// Play N bot-vs-bot games (greedy against the configured bot) and exit
    #[arg(long, value_name = "GAMES")]
    self_play: Option<usize>,
}

fn parse_player(s: &str) -> Result<Player, String> {
    match s.to_ascii_lowercase().as_str() {
        "black" | "b" => Ok(Player::Black),
        "white" | "w" => Ok(Player::White),
        other => Err(format!("unknown color '{other}' (expected 'black' or 'white')")),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.headless || cli.self_play.is_some());

    // Load configuration
    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(kind) = cli.bot {
        app_config.bot.kind = kind;
    }
    if let Some(ms) = cli.think_ms {
        app_config.bot.think_delay_ms = ms;
    }
    if let Some(human) = cli.human {
        app_config.session.human = human;
    }
    if let Some(path) = cli.snapshot {
        app_config.session.snapshot_path = Some(path);
    }
    if cli.no_snapshot {
        app_config.session.snapshot_path = None;
    }
    app_config.validate().context("invalid settings")?;

    if let Some(games) = cli.self_play {
        run_self_play(&app_config, games);
        return Ok(());
    }

    let session = Session::new(
        app_config.session.human,
        app_config.bot.build(),
        app_config.bot.think_delay(),
    );
    let snapshot_path = app_config.session.snapshot_path.clone();

    if cli.headless {
        run_headless(session, snapshot_path.as_deref())
    } else {
        run_tui(session, snapshot_path)
    }
}

/// Logs go to stderr. The full-screen UI owns the terminal, so it stays
/// silent unless `RUST_LOG` asks otherwise.
fn init_logging(line_mode: bool) {
    let default = if line_mode { "warn" } else { "off" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_tui(session: Session, snapshot_path: Option<PathBuf>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(session, snapshot_path);
    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res.context("game session ended with an error")
}

fn run_headless(mut session: Session, snapshot_path: Option<&Path>) -> Result<()> {
    let mut out = io::stdout().lock();

    write_welcome(&mut out, session.human(), snapshot_path)?;

    let events = session.start();
    report(&mut out, &events)?;
    show_board(&mut out, &session, snapshot_path)?;
    write!(out, "> ")?;
    out.flush()?;

    for line in io::stdin().lock().lines() {
        let line = line.context("reading command")?;
        match Command::parse(&line) {
            Ok(command) => {
                let events = session.submit(command);
                report(&mut out, &events)?;
                if events.contains(&SessionEvent::Quit) {
                    return Ok(());
                }
                if session.bot_pending() {
                    while session.bot_pending() {
                        writeln!(out, "{} is thinking...", session.bot_name())?;
                        out.flush()?;
                        match session.play_bot_turn() {
                            Some(event @ SessionEvent::Rejected(_)) => {
                                report(&mut out, &[event])?;
                                break;
                            }
                            Some(event) => report(&mut out, &[event])?,
                            None => break,
                        }
                    }
                    report(&mut out, &[session.status()])?;
                }
                show_board(&mut out, &session, snapshot_path)?;
            }
            Err(CommandError::Empty) => {}
            Err(err) => writeln!(out, "{err}. Example: d3")?,
        }
        write!(out, "> ")?;
        out.flush()?;
    }

    Ok(())
}

fn write_welcome(out: &mut impl Write, human: Player, snapshot_path: Option<&Path>) -> io::Result<()> {
    writeln!(out, "Welcome to Othello! You play {}.", human.name())?;
    writeln!(out, "Commands:")?;
    writeln!(out, "  d3    place a disc on d3")?;
    writeln!(out, "  pass  skip your turn (only when you have no legal move)")?;
    writeln!(out, "  new   start a new game")?;
    writeln!(out, "  exit  quit")?;
    if let Some(path) = snapshot_path {
        writeln!(out, "The board is also written to {} after every move.", path.display())?;
    }
    Ok(())
}

fn report(out: &mut impl Write, events: &[SessionEvent]) -> io::Result<()> {
    for event in events {
        writeln!(out, "{event}")?;
    }
    Ok(())
}

fn show_board(out: &mut impl Write, session: &Session, snapshot_path: Option<&Path>) -> Result<()> {
    let state = session.state();
    write!(out, "\n{}\n", snapshot::render_text(state.board(), state.legal_moves()))?;
    if let Some(path) = snapshot_path {
        snapshot::write_snapshot(path, state.board(), state.legal_moves())?;
    }
    Ok(())
}

fn run_self_play(config: &AppConfig, games: usize) {
    let mut greedy_wins = 0;
    let mut opponent_wins = 0;
    let mut draws = 0;

    let mut greedy = GreedyAgent::new();
    let mut opponent = config.bot.build();
    let series = play_series(&mut greedy, opponent.as_mut(), games);

    for (game, (greedy_color, record)) in series.iter().enumerate() {
        let (black, white) = record.score();

        match record.outcome {
            GameOutcome::Winner(winner) if winner == *greedy_color => greedy_wins += 1,
            GameOutcome::Winner(_) => opponent_wins += 1,
            GameOutcome::Draw => draws += 1,
        }

        println!(
            "game {}: {} as {} vs {}  Black {black} - {white} White",
            game + 1,
            greedy.name(),
            greedy_color.name(),
            opponent.name(),
        );
        println!("  {}", record.transcript());
    }

    println!("Greedy {greedy_wins}  {} {opponent_wins}  draws {draws}", opponent.name());
}
