//! Pruning orientations that can never be part of a solution.

use strum::VariantArray;

use crate::board::Board;
use crate::location::Location;
use crate::side::Side;

/// How much of the board counts as settled when judging a cell.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    /// Only locked neighbors are settled.
    Preprocessing,
    /// Cells above and to the left are settled whether locked or not, since search places cells in row-major order.
    /// Cells below and to the right are settled only once locked.
    Search,
}

/// Whether the cell at `location` is in an orientation that can never be part of a solution.
///
/// A cell is hopeless if it opens onto the outside of the board, or if any settled neighbor (per `phase`) disagrees with it about their shared side.
pub fn is_hopeless(board: &Board, location: Location, phase: Phase) -> bool {
    let current = board[location].open_sides();

    Side::VARIANTS.iter().any(|side| {
        let open = current.is_open(*side);
        let Some(neighbor_location) = board.neighbor(location, *side) else {
            return open;
        };

        let neighbor = &board[neighbor_location];
        let settled = match side {
            Side::Left | Side::Top => phase == Phase::Search || neighbor.locked,
            Side::Right | Side::Bottom => neighbor.locked,
        };

        settled && neighbor.is_open(side.invert()) != open
    })
}
