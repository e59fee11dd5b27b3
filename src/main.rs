use std::fs::File;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::config::{Config, GameOverRecovery, THEME};
use grid_snake::engine::TickOutcome;
use grid_snake::error::Result;
use grid_snake::game::Game;
use grid_snake::input::{GameInput, InputHandler, TouchZones};
use grid_snake::renderer;
use grid_snake::scheduler::TickTimer;
use grid_snake::terminal_runtime::{install_panic_hook, TerminalSession};
use log::{debug, info, LevelFilter};
use simplelog::WriteLogger;

/// Poll timeout while no tick is pending (paused or game over).
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Config file to load instead of the platform default.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    rows: Option<u16>,

    #[arg(long)]
    cols: Option<u16>,

    /// Milliseconds per tick at speed 1.
    #[arg(long = "base-speed-ms")]
    base_speed_ms: Option<u64>,

    /// Fixed seed for food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Start over on a fresh board when a game over is cleared.
    #[arg(long = "restart-on-game-over")]
    restart_on_game_over: bool,

    /// Log file; the terminal itself is taken by the game.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    #[arg(long = "log-level", default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("grid-snake.log"));
    WriteLogger::init(
        cli.log_level,
        simplelog::Config::default(),
        File::create(&log_path)?,
    )?;

    let config = load_config(&cli)?;
    info!(
        "starting {}x{} board at {} ms per tick",
        config.rows, config.cols, config.base_speed_ms
    );

    install_panic_hook();
    run(config)
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    if let Some(rows) = cli.rows {
        config.rows = rows;
    }
    if let Some(cols) = cli.cols {
        config.cols = cols;
    }
    if let Some(base_speed_ms) = cli.base_speed_ms {
        config.base_speed_ms = base_speed_ms;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.restart_on_game_over {
        config.game_over_recovery = GameOverRecovery::Restart;
    }

    config.validate()?;
    Ok(config)
}

fn run(config: Config) -> Result<()> {
    let mut session = TerminalSession::enter()?;
    let input = InputHandler::new(TouchZones {
        x_fraction: config.touch_zone_x,
        y_fraction: config.touch_zone_y,
    });
    let mut timer = TickTimer::new(config.base_interval());
    let mut game = Game::new(config, Instant::now());
    let mut needs_redraw = true;

    loop {
        if needs_redraw {
            let snapshot = game.snapshot(session.viewport()?)?;
            session
                .terminal_mut()
                .draw(|frame| renderer::render(frame, &snapshot, &THEME))?;
            needs_redraw = false;
        }

        if game.is_idle() {
            timer.disarm();
        } else {
            timer.sync(game.timer_deps());
        }

        let timeout = timer.delay(Instant::now()).unwrap_or(IDLE_POLL_INTERVAL);
        match input.poll_input(timeout)? {
            Some(GameInput::Quit) => break,
            Some(GameInput::Action(action)) => {
                debug!("input {action:?}");
                game = game.handle(action, Instant::now());
                needs_redraw = true;
            }
            Some(GameInput::Resize) => needs_redraw = true,
            None => {}
        }

        let now = Instant::now();
        if !game.is_idle() && timer.is_due(now) {
            let (next, outcome) = game.on_timer(now);
            game = next;
            needs_redraw = true;
            if outcome == TickOutcome::Ate {
                debug!(
                    "score {} speed {}",
                    game.state().score,
                    game.state().speed
                );
            }
        }
    }

    timer.disarm();
    info!("quit with score {}", game.state().score);
    Ok(())
}
