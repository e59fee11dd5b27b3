use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use crossterm::terminal;

/// Discrete player intents.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Pause,
}

impl Action {
    /// Maps a browser-style key name to an action.
    #[must_use]
    pub fn from_key_name(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Self::MoveUp),
            "ArrowDown" => Some(Self::MoveDown),
            "ArrowLeft" => Some(Self::MoveLeft),
            "ArrowRight" => Some(Self::MoveRight),
            " " => Some(Self::Pause),
            _ => None,
        }
    }

    /// Returns the `(dx, dy)` step for a move, or `None` for `Pause`.
    #[must_use]
    pub fn delta(self) -> Option<(i32, i32)> {
        match self {
            Self::MoveUp => Some((0, -1)),
            Self::MoveDown => Some((0, 1)),
            Self::MoveLeft => Some((-1, 0)),
            Self::MoveRight => Some((1, 0)),
            Self::Pause => None,
        }
    }

    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::MoveLeft | Self::MoveRight)
    }

    #[must_use]
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::MoveUp | Self::MoveDown)
    }
}

/// Returns whether `next` turns across the axis of `current`.
#[must_use]
pub fn is_perpendicular(current: Action, next: Action) -> bool {
    (current.is_horizontal() && next.is_vertical())
        || (current.is_vertical() && next.is_horizontal())
}

/// The direction applied on the last tick and the one buffered for the next.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct PendingAction {
    pub current: Action,
    pub next: Action,
}

impl Default for PendingAction {
    fn default() -> Self {
        Self {
            current: Action::MoveLeft,
            next: Action::MoveLeft,
        }
    }
}

impl PendingAction {
    /// Buffers a move if it is perpendicular to the current direction.
    ///
    /// Returns whether the move was accepted. `Pause` is never buffered.
    pub fn buffer(&mut self, action: Action) -> bool {
        if !is_perpendicular(self.current, action) {
            return false;
        }

        self.next = action;
        true
    }

    /// Makes the buffered direction current and returns it.
    pub fn promote(&mut self) -> Action {
        self.current = self.next;
        self.current
    }
}

/// Viewport dimensions for touch mapping and the render snapshot.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

/// Screen bands that turn a touch into an action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchZones {
    pub x_fraction: f32,
    pub y_fraction: f32,
}

impl TouchZones {
    /// Maps a touch to an action.
    ///
    /// Bands are tested bottom, top, left, right; anything else is the center
    /// and toggles pause.
    #[must_use]
    pub fn action_at(self, x: f32, y: f32, viewport: Viewport) -> Action {
        let width = f32::from(viewport.width);
        let height = f32::from(viewport.height);

        if y > height * (1.0 - self.y_fraction) {
            Action::MoveDown
        } else if y < height * self.y_fraction {
            Action::MoveUp
        } else if x < width * self.x_fraction {
            Action::MoveLeft
        } else if x > width * (1.0 - self.x_fraction) {
            Action::MoveRight
        } else {
            Action::Pause
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Action(Action),
    /// The terminal changed size; only a redraw is needed.
    Resize,
    Quit,
}

/// Polls crossterm and maps keys and mouse presses to game input.
#[derive(Debug, Clone, Copy)]
pub struct InputHandler {
    zones: TouchZones,
}

impl InputHandler {
    #[must_use]
    pub fn new(zones: TouchZones) -> Self {
        Self { zones }
    }

    /// Waits up to `timeout` for one event and maps it.
    pub fn poll_input(&self, timeout: Duration) -> io::Result<Option<GameInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => Ok(map_key_event(key)),
            Event::Mouse(mouse) if is_touch(mouse) => {
                let (width, height) = terminal::size()?;
                Ok(self.map_mouse_event(mouse, Viewport { width, height }))
            }
            Event::Resize(..) => Ok(Some(GameInput::Resize)),
            _ => Ok(None),
        }
    }

    /// Treats a left mouse press as a touch at that terminal cell.
    #[must_use]
    pub fn map_mouse_event(&self, mouse: MouseEvent, viewport: Viewport) -> Option<GameInput> {
        if !is_touch(mouse) {
            return None;
        }

        let action = self.zones.action_at(
            f32::from(mouse.column),
            f32::from(mouse.row),
            viewport,
        );
        Some(GameInput::Action(action))
    }
}

fn is_touch(mouse: MouseEvent) -> bool {
    mouse.kind == MouseEventKind::Down(MouseButton::Left)
}

/// Maps a terminal key press to game input.
#[must_use]
pub fn map_key_event(key: KeyEvent) -> Option<GameInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    let action = match key.code {
        KeyCode::Up | KeyCode::Char('w') => Action::MoveUp,
        KeyCode::Down | KeyCode::Char('s') => Action::MoveDown,
        KeyCode::Left | KeyCode::Char('a') => Action::MoveLeft,
        KeyCode::Right | KeyCode::Char('d') => Action::MoveRight,
        KeyCode::Char(' ' | 'p') => Action::Pause,
        KeyCode::Esc | KeyCode::Char('q') => return Some(GameInput::Quit),
        _ => return None,
    };

    Some(GameInput::Action(action))
}

#[cfg(test)]
mod tests {
    use crossterm::event::{
        KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };

    use super::{
        is_perpendicular, is_touch, map_key_event, Action, GameInput, InputHandler,
        PendingAction, TouchZones, Viewport,
    };

    const ZONES: TouchZones = TouchZones {
        x_fraction: 0.25,
        y_fraction: 0.25,
    };
    const VIEWPORT: Viewport = Viewport {
        width: 100,
        height: 100,
    };

    #[test]
    fn key_names_map_to_actions() {
        assert_eq!(Action::from_key_name("ArrowUp"), Some(Action::MoveUp));
        assert_eq!(Action::from_key_name("ArrowDown"), Some(Action::MoveDown));
        assert_eq!(Action::from_key_name("ArrowLeft"), Some(Action::MoveLeft));
        assert_eq!(Action::from_key_name("ArrowRight"), Some(Action::MoveRight));
        assert_eq!(Action::from_key_name(" "), Some(Action::Pause));
        assert_eq!(Action::from_key_name("Enter"), None);
    }

    #[test]
    fn perpendicular_check_is_axis_based() {
        assert!(is_perpendicular(Action::MoveLeft, Action::MoveUp));
        assert!(is_perpendicular(Action::MoveDown, Action::MoveRight));
        assert!(!is_perpendicular(Action::MoveLeft, Action::MoveRight));
        assert!(!is_perpendicular(Action::MoveUp, Action::MoveUp));
        assert!(!is_perpendicular(Action::MoveUp, Action::Pause));
    }

    #[test]
    fn axis_lock_rejects_reversal() {
        let mut pending = PendingAction::default();

        assert!(!pending.buffer(Action::MoveRight));
        assert_eq!(pending.next, Action::MoveLeft);

        assert!(pending.buffer(Action::MoveUp));
        assert_eq!(pending.next, Action::MoveUp);

        assert!(pending.buffer(Action::MoveDown));
        assert_eq!(pending.next, Action::MoveDown);
    }

    #[test]
    fn axis_lock_follows_promoted_direction() {
        let mut pending = PendingAction::default();
        pending.buffer(Action::MoveUp);

        assert_eq!(pending.promote(), Action::MoveUp);
        assert!(!pending.buffer(Action::MoveDown));
        assert!(pending.buffer(Action::MoveRight));
    }

    #[test]
    fn touch_bands_map_to_directions() {
        assert_eq!(ZONES.action_at(50.0, 90.0, VIEWPORT), Action::MoveDown);
        assert_eq!(ZONES.action_at(50.0, 10.0, VIEWPORT), Action::MoveUp);
        assert_eq!(ZONES.action_at(10.0, 50.0, VIEWPORT), Action::MoveLeft);
        assert_eq!(ZONES.action_at(90.0, 50.0, VIEWPORT), Action::MoveRight);
        assert_eq!(ZONES.action_at(50.0, 50.0, VIEWPORT), Action::Pause);
    }

    #[test]
    fn vertical_bands_win_in_corners() {
        assert_eq!(ZONES.action_at(5.0, 95.0, VIEWPORT), Action::MoveDown);
        assert_eq!(ZONES.action_at(95.0, 5.0, VIEWPORT), Action::MoveUp);
    }

    #[test]
    fn keys_map_to_game_input() {
        let press = |code| KeyEvent::new(code, KeyModifiers::NONE);

        assert_eq!(
            map_key_event(press(KeyCode::Up)),
            Some(GameInput::Action(Action::MoveUp))
        );
        assert_eq!(
            map_key_event(press(KeyCode::Char('a'))),
            Some(GameInput::Action(Action::MoveLeft))
        );
        assert_eq!(
            map_key_event(press(KeyCode::Char(' '))),
            Some(GameInput::Action(Action::Pause))
        );
        assert_eq!(map_key_event(press(KeyCode::Esc)), Some(GameInput::Quit));
        assert_eq!(
            map_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(GameInput::Quit)
        );
        assert_eq!(map_key_event(press(KeyCode::Tab)), None);
    }

    #[test]
    fn left_click_acts_as_touch() {
        let handler = InputHandler::new(ZONES);
        let click = |kind| MouseEvent {
            kind,
            column: 50,
            row: 2,
            modifiers: KeyModifiers::NONE,
        };

        assert_eq!(
            handler.map_mouse_event(click(MouseEventKind::Down(MouseButton::Left)), VIEWPORT),
            Some(GameInput::Action(Action::MoveUp))
        );
        assert_eq!(
            handler.map_mouse_event(click(MouseEventKind::Moved), VIEWPORT),
            None
        );
    }

    #[test]
    fn only_left_presses_count_as_touches() {
        let event = |kind| MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };

        assert!(is_touch(event(MouseEventKind::Down(MouseButton::Left))));
        assert!(!is_touch(event(MouseEventKind::Moved)));
        assert!(!is_touch(event(MouseEventKind::Drag(MouseButton::Left))));
        assert!(!is_touch(event(MouseEventKind::Up(MouseButton::Left))));
        assert!(!is_touch(event(MouseEventKind::Down(MouseButton::Right))));
    }
}
