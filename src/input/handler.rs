use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

/// What a key press asks the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    TogglePause,
    Restart,
    /// Leave the title screen
    Start,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> Command {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Command::Quit;
        }

        match key.code {
            KeyCode::Up => Command::Steer(Direction::Up),
            KeyCode::Down => Command::Steer(Direction::Down),
            KeyCode::Left => Command::Steer(Direction::Left),
            KeyCode::Right => Command::Steer(Direction::Right),

            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'w' => Command::Steer(Direction::Up),
                's' => Command::Steer(Direction::Down),
                'a' => Command::Steer(Direction::Left),
                'd' => Command::Steer(Direction::Right),
                'p' | ' ' => Command::TogglePause,
                'r' => Command::Restart,
                'q' => Command::Quit,
                _ => Command::None,
            },

            KeyCode::Enter => Command::Start,
            KeyCode::Esc => Command::Quit,

            _ => Command::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Command {
        InputHandler::new().handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(press(KeyCode::Up), Command::Steer(Direction::Up));
        assert_eq!(press(KeyCode::Down), Command::Steer(Direction::Down));
        assert_eq!(press(KeyCode::Left), Command::Steer(Direction::Left));
        assert_eq!(press(KeyCode::Right), Command::Steer(Direction::Right));
    }

    #[test]
    fn test_wasd_keys() {
        assert_eq!(press(KeyCode::Char('w')), Command::Steer(Direction::Up));
        assert_eq!(press(KeyCode::Char('a')), Command::Steer(Direction::Left));
        assert_eq!(press(KeyCode::Char('s')), Command::Steer(Direction::Down));
        assert_eq!(press(KeyCode::Char('d')), Command::Steer(Direction::Right));

        let handler = InputHandler::new();
        let w_upper = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        assert_eq!(handler.handle_key_event(w_upper), Command::Steer(Direction::Up));
    }

    #[test]
    fn test_pause_keys() {
        assert_eq!(press(KeyCode::Char('p')), Command::TogglePause);
        assert_eq!(press(KeyCode::Char('P')), Command::TogglePause);
        assert_eq!(press(KeyCode::Char(' ')), Command::TogglePause);
    }

    #[test]
    fn test_restart_and_start_keys() {
        assert_eq!(press(KeyCode::Char('r')), Command::Restart);
        assert_eq!(press(KeyCode::Char('R')), Command::Restart);
        assert_eq!(press(KeyCode::Enter), Command::Start);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(press(KeyCode::Char('q')), Command::Quit);
        assert_eq!(press(KeyCode::Esc), Command::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(InputHandler::new().handle_key_event(ctrl_c), Command::Quit);
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(press(KeyCode::Char('x')), Command::None);
        assert_eq!(press(KeyCode::Tab), Command::None);
    }
}
