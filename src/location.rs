use std::fmt::{Display, Formatter};

use ndarray::Ix;

/// A row or column index.
pub type Coord = usize;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
/// A location `(row, col)` on a board. The top left corner is `Location(0, 0)`.
///
/// The derived ordering is row-major, which is also the order the heuristic solver places cells in.
pub struct Location(pub Coord, pub Coord);

impl Location {
    /// The row of this location.
    #[inline]
    pub fn row(&self) -> Coord {
        self.0
    }

    /// The column of this location.
    #[inline]
    pub fn col(&self) -> Coord {
        self.1
    }

    #[inline]
    pub(crate) fn as_index(&self) -> (Ix, Ix) {
        (self.0, self.1)
    }

    // wraps on underflow so that stepping off the top or left edge lands far out of bounds
    pub(crate) fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    /// The next location in row-major order on a board `cols` wide.
    pub(crate) fn next_in_row_major(self, cols: Coord) -> Self {
        if self.1 + 1 >= cols {
            Self(self.0 + 1, 0)
        } else {
            Self(self.0, self.1 + 1)
        }
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.0, value.1)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}
