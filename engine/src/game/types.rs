use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, heading: Heading) -> Self {
        let (dx, dy) = heading.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Direction of travel, one of the four grid unit vectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heading {
    Left,
    Right,
    Up,
    Down,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::Left, Heading::Right, Heading::Up, Heading::Down];

    /// Unit vector with y growing downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Heading::Left => (-1, 0),
            Heading::Right => (1, 0),
            Heading::Up => (0, -1),
            Heading::Down => (0, 1),
        }
    }

    /// True when `other` differs from `self` on both axes, i.e. it is a quarter turn.
    pub fn differs_on_both_axes(self, other: Heading) -> bool {
        let (x, y) = self.delta();
        let (ox, oy) = other.delta();
        x != ox && y != oy
    }
}

impl TryFrom<(i32, i32)> for Heading {
    type Error = String;

    fn try_from(vector: (i32, i32)) -> Result<Self, Self::Error> {
        match vector {
            (-1, 0) => Ok(Heading::Left),
            (1, 0) => Ok(Heading::Right),
            (0, -1) => Ok(Heading::Up),
            (0, 1) => Ok(Heading::Down),
            (dx, dy) => Err(format!("({}, {}) is not a unit grid vector", dx, dy)),
        }
    }
}

impl FromStr for Heading {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(Heading::Left),
            "right" | "r" => Ok(Heading::Right),
            "up" | "u" => Ok(Heading::Up),
            "down" | "d" => Ok(Heading::Down),
            other => Err(format!("Unknown heading '{}'", other)),
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Heading::Left => "left",
            Heading::Right => "right",
            Heading::Up => "up",
            Heading::Down => "down",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSize {
    pub width: i32,
    pub height: i32,
}

impl FieldSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    pub fn area(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }
}

/// What the prospective head ran into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollisionKind {
    Wall,
    SelfBite,
}

/// What happens once the snake collides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Respawn a fresh snake within the same tick.
    #[default]
    Respawn,
    /// Stop ticking until `GameState::restart` is called.
    Halt,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Over(CollisionKind),
    /// The snake covers every cell; the apple is stale until `GameState::restart`.
    Filled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    Ate { apple: Cell },
    /// Collided and respawned within the same tick.
    Reset { reason: CollisionKind },
    /// Collided under [`CollisionPolicy::Halt`]; the body stays where it was.
    Collided { reason: CollisionKind },
    /// The snake ate the last free cell. Respawned or halted as the policy says.
    BoardFilled,
    Halted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_matches_unit_vectors() {
        assert_eq!(Heading::Left.delta(), (-1, 0));
        assert_eq!(Heading::Right.delta(), (1, 0));
        assert_eq!(Heading::Up.delta(), (0, -1));
        assert_eq!(Heading::Down.delta(), (0, 1));
    }

    #[test]
    fn test_differs_on_both_axes_only_for_quarter_turns() {
        for current in Heading::ALL {
            for candidate in Heading::ALL {
                let (cx, cy) = current.delta();
                let (nx, ny) = candidate.delta();
                let perpendicular = cx * nx + cy * ny == 0;
                assert_eq!(current.differs_on_both_axes(candidate), perpendicular);
            }
        }
    }

    #[test]
    fn test_try_from_vector() {
        assert_eq!(Heading::try_from((0, 1)), Ok(Heading::Down));
        assert_eq!(Heading::try_from((-1, 0)), Ok(Heading::Left));
        assert!(Heading::try_from((1, 1)).is_err());
        assert!(Heading::try_from((0, 0)).is_err());
    }

    #[test]
    fn test_parse_heading() {
        assert_eq!("up".parse::<Heading>(), Ok(Heading::Up));
        assert_eq!(" Right ".parse::<Heading>(), Ok(Heading::Right));
        assert_eq!("d".parse::<Heading>(), Ok(Heading::Down));
        assert_eq!("L".parse::<Heading>(), Ok(Heading::Left));
        assert!("north".parse::<Heading>().is_err());
    }

    #[test]
    fn test_field_contains() {
        let field = FieldSize::new(40, 20);
        assert!(field.contains(Cell::new(0, 0)));
        assert!(field.contains(Cell::new(39, 19)));
        assert!(!field.contains(Cell::new(40, 5)));
        assert!(!field.contains(Cell::new(5, 20)));
        assert!(!field.contains(Cell::new(-1, 0)));
        assert!(!field.contains(Cell::new(0, -1)));
        assert_eq!(field.area(), 800);
    }

    #[test]
    fn test_cell_offset_and_display() {
        let cell = Cell::new(11, 3).offset(Heading::Right);
        assert_eq!(cell, Cell::new(12, 3));
        assert_eq!(cell.to_string(), "(12, 3)");
    }
}
