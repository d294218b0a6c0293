use serde::{Deserialize, Serialize};

/// Direction of travel, one of the four cardinal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    /// All headings in the fixed probe order used by the autopilot's
    /// fallback rule: up, down, left, right.
    pub const ALL: [Heading; 4] = [Heading::Up, Heading::Down, Heading::Left, Heading::Right];

    /// Returns true if turning from self to other would be a 180-degree turn.
    pub fn is_opposite(&self, other: Heading) -> bool {
        matches!(
            (self, other),
            (Heading::Up, Heading::Down)
                | (Heading::Down, Heading::Up)
                | (Heading::Left, Heading::Right)
                | (Heading::Right, Heading::Left)
        )
    }

    /// Returns the unit step (dx, dy) for this heading. Up decreases y.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Heading::Up => (0, -1),
            Heading::Down => (0, 1),
            Heading::Left => (-1, 0),
            Heading::Right => (1, 0),
        }
    }
}

/// Directional input consumed by the engine at the start of a tick.
///
/// The drivers buffer incoming headings "latest wins" and hand the result
/// over as a single `Steering` value, so a tick sees at most one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steering {
    /// Switch to the given heading before moving.
    Turn(Heading),
    /// Keep the current heading.
    Hold,
}

impl From<Heading> for Steering {
    fn from(heading: Heading) -> Self {
        Steering::Turn(heading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_headings() {
        assert!(Heading::Up.is_opposite(Heading::Down));
        assert!(Heading::Down.is_opposite(Heading::Up));
        assert!(Heading::Left.is_opposite(Heading::Right));
        assert!(Heading::Right.is_opposite(Heading::Left));

        assert!(!Heading::Up.is_opposite(Heading::Left));
        assert!(!Heading::Up.is_opposite(Heading::Up));
        assert!(!Heading::Right.is_opposite(Heading::Down));
    }

    #[test]
    fn test_heading_delta() {
        assert_eq!(Heading::Up.delta(), (0, -1));
        assert_eq!(Heading::Down.delta(), (0, 1));
        assert_eq!(Heading::Left.delta(), (-1, 0));
        assert_eq!(Heading::Right.delta(), (1, 0));
    }

    #[test]
    fn test_probe_order_is_up_down_left_right() {
        assert_eq!(
            Heading::ALL,
            [Heading::Up, Heading::Down, Heading::Left, Heading::Right]
        );
    }

    #[test]
    fn test_steering_from_heading() {
        assert_eq!(Steering::from(Heading::Left), Steering::Turn(Heading::Left));
    }
}
