/// Direction the snake can be steered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns true for directions along the x axis
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Returns the unit delta (dx, dy) for this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Key presses collected since the previous tick.
///
/// Presses are edge-triggered: the engine only sees "pressed this frame",
/// never held state. Directions are kept in press order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub directions: Vec<Direction>,
    pub toggle_pause: bool,
    pub confirm: bool,
}

impl TickInput {
    /// An input with nothing pressed
    pub fn none() -> Self {
        Self::default()
    }

    pub fn steer(direction: Direction) -> Self {
        Self {
            directions: vec![direction],
            ..Self::default()
        }
    }

    pub fn pause() -> Self {
        Self {
            toggle_pause: true,
            ..Self::default()
        }
    }

    pub fn confirm() -> Self {
        Self {
            confirm: true,
            ..Self::default()
        }
    }

    pub fn push_direction(&mut self, direction: Direction) {
        self.directions.push(direction);
    }

    /// True when no key was pressed
    pub fn is_empty(&self) -> bool {
        self.directions.is_empty() && !self.toggle_pause && !self.confirm
    }

    /// Clear the presses, keeping the allocation for the next frame
    pub fn clear(&mut self) {
        self.directions.clear();
        self.toggle_pause = false;
        self.confirm = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Down.is_opposite(Direction::Up));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));

        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Right));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_horizontal_axis() {
        assert!(Direction::Left.is_horizontal());
        assert!(Direction::Right.is_horizontal());
        assert!(!Direction::Up.is_horizontal());
        assert!(!Direction::Down.is_horizontal());
    }

    #[test]
    fn test_tick_input_clear() {
        let mut input = TickInput::steer(Direction::Up);
        input.push_direction(Direction::Left);
        input.toggle_pause = true;
        assert!(!input.is_empty());
        assert_eq!(input.directions, vec![Direction::Up, Direction::Left]);

        input.clear();
        assert!(input.is_empty());
        assert_eq!(input, TickInput::none());
    }
}
