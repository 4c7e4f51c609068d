use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Direction, TickInput};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Direction),
    TogglePause,
    Confirm,
    Quit,
    None,
}

impl KeyAction {
    /// Fold this press into the input collected for the next tick
    pub fn apply_to(&self, input: &mut TickInput) {
        match self {
            KeyAction::Steer(direction) => input.push_direction(*direction),
            KeyAction::TogglePause => input.toggle_pause = !input.toggle_pause,
            KeyAction::Confirm => input.confirm = true,
            KeyAction::Quit | KeyAction::None => {}
        }
    }
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Steer(Direction::Up),
            KeyCode::Down => KeyAction::Steer(Direction::Down),
            KeyCode::Left => KeyAction::Steer(Direction::Left),
            KeyCode::Right => KeyAction::Steer(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Steer(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Steer(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Steer(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Steer(Direction::Right),

            // Controls
            KeyCode::Char('p') | KeyCode::Char('P') => KeyAction::TogglePause,
            KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Confirm,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
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

    fn press(handler: &InputHandler, code: KeyCode) -> KeyAction {
        handler.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::new();

        assert_eq!(press(&handler, KeyCode::Up), KeyAction::Steer(Direction::Up));
        assert_eq!(
            press(&handler, KeyCode::Down),
            KeyAction::Steer(Direction::Down)
        );
        assert_eq!(
            press(&handler, KeyCode::Left),
            KeyAction::Steer(Direction::Left)
        );
        assert_eq!(
            press(&handler, KeyCode::Right),
            KeyAction::Steer(Direction::Right)
        );
    }

    #[test]
    fn test_wasd_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            press(&handler, KeyCode::Char('w')),
            KeyAction::Steer(Direction::Up)
        );
        assert_eq!(
            press(&handler, KeyCode::Char('a')),
            KeyAction::Steer(Direction::Left)
        );
        assert_eq!(
            press(&handler, KeyCode::Char('s')),
            KeyAction::Steer(Direction::Down)
        );

        let d_upper = KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(d_upper),
            KeyAction::Steer(Direction::Right)
        );
    }

    #[test]
    fn test_session_keys() {
        let handler = InputHandler::new();

        assert_eq!(press(&handler, KeyCode::Char('p')), KeyAction::TogglePause);
        assert_eq!(press(&handler, KeyCode::Enter), KeyAction::Confirm);
        assert_eq!(press(&handler, KeyCode::Char('r')), KeyAction::Confirm);
        assert_eq!(press(&handler, KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(press(&handler, KeyCode::Esc), KeyAction::Quit);
        assert_eq!(press(&handler, KeyCode::Char('x')), KeyAction::None);
    }

    #[test]
    fn test_ctrl_c() {
        let handler = InputHandler::new();

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_presses_fold_into_tick_input() {
        let mut input = TickInput::none();

        KeyAction::Steer(Direction::Up).apply_to(&mut input);
        KeyAction::Steer(Direction::Left).apply_to(&mut input);
        KeyAction::Confirm.apply_to(&mut input);
        KeyAction::Quit.apply_to(&mut input);

        assert_eq!(input.directions, vec![Direction::Up, Direction::Left]);
        assert!(input.confirm);
        assert!(!input.toggle_pause);

        // Two pause presses in one frame cancel out
        KeyAction::TogglePause.apply_to(&mut input);
        KeyAction::TogglePause.apply_to(&mut input);
        assert!(!input.toggle_pause);
    }
}
