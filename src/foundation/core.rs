pub use kurbo::{Point, Vec2};

/// Side length of the square coordinate space every scene is built in.
pub const VIEWPORT_SIZE: f64 = 1000.0;

/// Center of the coordinate space.
pub const CENTER: Point = Point::new(VIEWPORT_SIZE / 2.0, VIEWPORT_SIZE / 2.0);

/// Fixed square viewport shared by the markup export and the live surface.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: VIEWPORT_SIZE,
            height: VIEWPORT_SIZE,
        }
    }
}

impl Viewport {
    pub fn view_box(self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}

/// A point in time or a duration on the animation clock, in milliseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Millis(pub f64);

impl Millis {
    pub const ZERO: Self = Self(0.0);

    /// Clock ticks are whole microseconds; negative and non-finite inputs clamp to zero.
    pub fn to_micros(self) -> u64 {
        if !self.0.is_finite() || self.0 <= 0.0 {
            return 0;
        }
        (self.0 * 1000.0).round() as u64
    }

    pub fn from_micros(us: u64) -> Self {
        Self(us as f64 / 1000.0)
    }

    pub fn since(self, earlier: Millis) -> Millis {
        Millis((self.0 - earlier.0).max(0.0))
    }
}

impl std::ops::Add for Millis {
    type Output = Millis;

    fn add(self, rhs: Millis) -> Millis {
        Millis(self.0 + rhs.0)
    }
}

/// Monotonic build generation. Only work tagged with the current generation may touch the surface.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Point at `radius` from [`CENTER`] along `angle` (radians, clockwise in screen space).
pub fn polar(radius: f64, angle: f64) -> Point {
    CENTER + Vec2::from_angle(angle) * radius
}
