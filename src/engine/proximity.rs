/// Radius used by every proximity game, in board units (0-100 space).
pub const TOLERANCE_RADIUS: f64 = 15.0;

/// A point in the normalized board space. `x` grows to the right, `y` grows down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position
{
    pub x: f64,
    pub y: f64,
}

impl Position
{
    pub const fn new(x: f64, y: f64) -> Self
    {
        Self { x, y }
    }

    pub fn distance_to(self, other: Position) -> f64
    {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn clamped(self) -> Self
    {
        Self {
            x: self.x.clamp(0.0, 100.0),
            y: self.y.clamp(0.0, 100.0),
        }
    }
}

/// A candidate counts as a hit only when it lies strictly inside the radius.
pub fn is_hit(target: Position, candidate: Position, radius: f64) -> bool
{
    target.distance_to(candidate) < radius
}
