//! Results shared by both solvers.

use std::fmt::{Debug, Display, Formatter};

use crate::location::Location;
use crate::transform::Transform;

/// A successful solve: a script which, replayed against the input board, connects every cell into one network.
#[derive(Clone, Debug)]
pub struct Solution<St> {
    /// The script to replay, in order.
    pub transforms: Vec<Transform>,
    /// Search statistics.
    pub statistics: St,
}

/// Preprocessing found a cell with no orientation consistent with the cells already locked around it.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Contradiction {
    /// The cell that could not be placed.
    pub location: Location,
}

/// Reasons a solver may fail.
#[derive(Clone, Debug)]
pub enum SolverFailure<St> {
    /// The iteration cap or timeout was reached, or the search ran out of candidates, before the board was fully connected.
    /// This is an ordinary outcome; `best` holds the script reaching the fewest components seen, if any.
    Unsolved {
        /// The best partial script found.
        best: Option<Vec<Transform>>,
        /// Search statistics up to the point the search stopped.
        statistics: St,
    },
    /// Preprocessing proved the board unsolvable.
    Contradiction {
        /// The cell that could not be placed.
        location: Location,
    },
}

impl<St> From<Contradiction> for SolverFailure<St> {
    fn from(value: Contradiction) -> Self {
        Self::Contradiction { location: value.location }
    }
}

impl<St> Display for SolverFailure<St> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unsolved { best: Some(best), .. } => write!(f, "search stopped unsolved; best partial script has {} transforms", best.len()),
            Self::Unsolved { best: None, .. } => write!(f, "search stopped unsolved with no partial script"),
            Self::Contradiction { location } => write!(f, "no orientation fits the cell at {location}"),
        }
    }
}

impl<St: Debug> std::error::Error for SolverFailure<St> {}
