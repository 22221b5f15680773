use strum::VariantArray;

use crate::location::Location;

/// One of the four sides of a square cell.
///
/// Variants are declared in openness-tuple order: left, top, right, bottom.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Side {
    /// The side facing column `col - 1`.
    Left,
    /// The side facing row `row - 1`.
    Top,
    /// The side facing column `col + 1`.
    Right,
    /// The side facing row `row + 1`.
    Bottom,
}

impl Side {
    /// Sides which, upon stepping across them, lead to a location later in row-major order.
    pub const FORWARD_VARIANTS: &'static [Self] = &[Self::Right, Self::Bottom];

    /// Attempt a step across this side from `location`.
    ///
    /// Steps off the top or left edge wrap around to a location no board contains, so bounds are left to the caller.
    pub fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Left => location.offset_by((0, -1)),
            Self::Top => location.offset_by((-1, 0)),
            Self::Right => location.offset_by((0, 1)),
            Self::Bottom => location.offset_by((1, 0)),
        }
    }

    /// The side a neighbor across `self` presents back.
    pub fn invert(&self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
        }
    }

    #[inline]
    pub(crate) fn index(&self) -> usize {
        match self {
            Self::Left => 0,
            Self::Top => 1,
            Self::Right => 2,
            Self::Bottom => 3,
        }
    }
}
