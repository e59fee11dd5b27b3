use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SnakeError};

const APP_DIR_NAME: &str = "grid-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Default board height in cells.
pub const DEFAULT_ROWS: u16 = 20;

/// Default board width in cells.
pub const DEFAULT_COLS: u16 = 20;

/// Milliseconds per tick at speed 1.
pub const DEFAULT_BASE_SPEED_MS: u64 = 500;

/// Fraction of the viewport width claimed by each of the left/right touch bands.
pub const DEFAULT_TOUCH_ZONE_X: f32 = 0.25;

/// Fraction of the viewport height claimed by each of the top/bottom touch bands.
pub const DEFAULT_TOUCH_ZONE_Y: f32 = 0.25;

/// Food items placed on a fresh board.
pub const DEFAULT_INITIAL_FOOD: usize = 5;

/// Food items placed after each meal.
pub const REPLACEMENT_FOOD: usize = 1;

/// Score needed per speed step.
pub const POINTS_PER_SPEED_LEVEL: u32 = 10;

/// Segments in a freshly created figure.
pub const INITIAL_FIGURE_LENGTH: usize = 3;

pub const MIN_BOARD_SIDE: u16 = 4;
pub const MAX_BOARD_SIDE: u16 = 200;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub rows: u16,
    pub cols: u16,
}

/// What clearing a game over with the pause toggle does.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverRecovery {
    /// Keep the frozen board and continue from it.
    #[default]
    Resume,
    /// Start over on a fresh board.
    Restart,
}

/// Constants loaded once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rows: u16,
    pub cols: u16,
    pub base_speed_ms: u64,
    pub touch_zone_x: f32,
    pub touch_zone_y: f32,
    pub initial_food: usize,
    pub game_over_recovery: GameOverRecovery,
    /// Fixed RNG seed for reproducible food placement.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            base_speed_ms: DEFAULT_BASE_SPEED_MS,
            touch_zone_x: DEFAULT_TOUCH_ZONE_X,
            touch_zone_y: DEFAULT_TOUCH_ZONE_Y,
            initial_food: DEFAULT_INITIAL_FOOD,
            game_over_recovery: GameOverRecovery::Resume,
            seed: None,
        }
    }
}

impl Config {
    /// Loads config from the platform config directory.
    ///
    /// Returns defaults when the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from_path(&config_path())
    }

    /// Loads and validates config from `path`, falling back to defaults when
    /// the file is missing.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };

        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks board and input constants against their allowed ranges.
    pub fn validate(&self) -> Result<()> {
        for (name, side) in [("rows", self.rows), ("cols", self.cols)] {
            if !(MIN_BOARD_SIDE..=MAX_BOARD_SIDE).contains(&side) {
                return Err(SnakeError::InvalidConfig(format!(
                    "{name} must be within {MIN_BOARD_SIDE}..={MAX_BOARD_SIDE}, got {side}"
                )));
            }
        }

        if self.base_speed_ms == 0 {
            return Err(SnakeError::InvalidConfig(
                "base_speed_ms must be greater than zero".to_owned(),
            ));
        }

        for (name, fraction) in [
            ("touch_zone_x", self.touch_zone_x),
            ("touch_zone_y", self.touch_zone_y),
        ] {
            if !(fraction > 0.0 && fraction <= 0.5) {
                return Err(SnakeError::InvalidConfig(format!(
                    "{name} must be within (0, 0.5], got {fraction}"
                )));
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        GridSize {
            rows: self.rows,
            cols: self.cols,
        }
    }

    #[must_use]
    pub fn base_interval(&self) -> Duration {
        Duration::from_millis(self.base_speed_ms)
    }
}

/// Returns the platform-correct config file path.
#[must_use]
pub fn config_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    base
}

/// Terminal colors for every visual element.
#[derive(Debug)]
pub struct Theme {
    pub head: Color,
    pub body: Color,
    pub food: Color,
    pub blank: Color,
    pub border_fg: Color,
    pub hud: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

pub const THEME: Theme = Theme {
    head: Color::White,
    body: Color::Green,
    food: Color::Red,
    blank: Color::Black,
    border_fg: Color::White,
    hud: Color::White,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};

/// Double-width glyph for one grid cell.
pub const GLYPH_CELL: &str = "██";
