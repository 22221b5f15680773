use serde::{Deserialize, Serialize};

use crate::location::{Coord, Location};

/// A record of `times` single left-rotations applied to the cell at `(row, col)`.
///
/// `times` counts from whatever orientation the cell held when the record was made, so a list of transforms
/// (a script) only makes sense replayed in order against the board it was produced from.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Transform {
    /// Row of the rotated cell.
    pub row: Coord,
    /// Column of the rotated cell.
    pub col: Coord,
    /// Number of left-rotations.
    pub times: u8,
}

impl Transform {
    /// Construct a transform rotating the cell at `location` `times` times.
    pub fn new(location: Location, times: u8) -> Self {
        Self {
            row: location.0,
            col: location.1,
            times,
        }
    }

    /// The location this transform applies to.
    #[inline]
    pub fn location(&self) -> Location {
        Location(self.row, self.col)
    }
}
