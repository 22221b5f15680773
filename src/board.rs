use std::fmt::{Display, Formatter};
use std::ops::Index;

use itertools::Itertools;
use ndarray::Array2;

use crate::blind::{self, BlindStatistics};
use crate::builder::CellDescriptor;
use crate::connectivity;
use crate::heuristic::{self, HeuristicStatistics};
use crate::limits::SearchLimits;
use crate::location::{Coord, Location};
use crate::pipe::Pipe;
use crate::side::Side;
use crate::solver::{Solution, SolverFailure};
use crate::transform::Transform;

/// A rectangular grid of [`Pipe`]s, fixed in size for its lifetime.
///
/// [`Board`]s should be built using a [`BoardBuilder`](crate::builder::BoardBuilder).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Board {
    pub(crate) cells: Array2<Pipe>,
}

impl Board {
    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> Coord {
        self.cells.nrows()
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> Coord {
        self.cells.ncols()
    }

    /// The pipe at `location`, or [`None`] if it is off the board.
    #[inline]
    pub fn get(&self, location: Location) -> Option<&Pipe> {
        self.cells.get(location.as_index())
    }

    /// Every location in row-major order.
    pub fn locations(&self) -> impl Iterator<Item = Location> {
        (0..self.rows()).cartesian_product(0..self.cols()).map(Location::from)
    }

    /// The neighbor of `location` across `side`, if the board has one.
    #[inline]
    pub fn neighbor(&self, location: Location, side: Side) -> Option<Location> {
        let candidate = side.attempt_from(location);
        self.get(candidate).map(|_| candidate)
    }

    /// The location of the last cell in the bottom right corner.
    #[inline]
    pub(crate) fn max_loc(&self) -> Location {
        Location(self.rows() - 1, self.cols() - 1)
    }

    #[inline]
    pub(crate) fn pipe_mut(&mut self, location: Location) -> &mut Pipe {
        &mut self.cells[location.as_index()]
    }

    /// Rotate the pipe at `location` one step left.
    ///
    /// # Panics
    /// If the pipe is locked. Rotating a finalized cell is a solver defect.
    pub(crate) fn rotate_left(&mut self, location: Location) {
        let pipe = self.pipe_mut(location);
        assert!(!pipe.locked, "attempted to rotate locked pipe at {location}");
        pipe.rotate_left();
    }

    /// Rotate the pipe at `location` until `accept` holds, trying at most one full cycle.
    ///
    /// Returns the number of rotations applied, or [`None`] if no rotation satisfies `accept`, in which case the pipe is back where it started.
    pub(crate) fn rotate_until<F>(&mut self, location: Location, mut accept: F) -> Option<u8>
    where
        F: FnMut(&Self) -> bool,
    {
        let cycle = self[location].kind.cycle_len();
        for count in 0..cycle {
            if accept(&*self) {
                return Some(count);
            }
            self.rotate_left(location);
        }

        None
    }

    #[inline]
    pub(crate) fn lock(&mut self, location: Location) {
        self.pipe_mut(location).locked = true;
    }

    pub(crate) fn clear_visited(&mut self) {
        self.cells.map_inplace(|pipe| pipe.visited = false);
    }

    /// Locations locked here but not on `base`.
    pub(crate) fn locked_since(&self, base: &Board) -> Vec<Location> {
        self.locations()
            .filter(|location| self[*location].locked && !base[*location].locked)
            .collect_vec()
    }

    /// The full vector of rotation indices in row-major order, used as a canonical state key.
    pub fn rotation_state(&self) -> Vec<u8> {
        self.cells.iter().map(|pipe| pipe.rotation).collect_vec()
    }

    /// Apply one [`Transform`].
    ///
    /// # Panics
    /// If the transform is off the board, or rotates a locked pipe.
    pub fn apply(&mut self, transform: &Transform) {
        for _ in 0..transform.times {
            self.rotate_left(transform.location());
        }
    }

    /// Apply a script of [`Transform`]s in order.
    pub fn replay(&mut self, script: &[Transform]) {
        script.iter().for_each(|transform| self.apply(transform));
    }

    /// Number of connected components under the current rotations.
    pub fn connected_components(&self) -> usize {
        connectivity::connected_components(self)
    }

    /// Whether every cell belongs to one network.
    pub fn is_solved(&self) -> bool {
        self.connected_components() == 1
    }

    /// Export the current orientations in the same form the board was built from.
    pub fn to_descriptors(&self) -> Vec<Vec<CellDescriptor>> {
        self.cells.rows()
            .into_iter()
            .map(|row| row.iter().map(CellDescriptor::from).collect_vec())
            .collect_vec()
    }

    /// Search from the raw board by connected-component count, without preprocessing.
    ///
    /// Works on a copy; `self` is left untouched.
    /// Returns according to [`blind::solve`](crate::blind::solve).
    pub fn solve_blind(&self, limits: &SearchLimits) -> Result<Solution<BlindStatistics>, SolverFailure<BlindStatistics>> {
        blind::solve(self, limits)
    }

    /// Preprocess, then place undetermined cells one at a time in row-major order.
    ///
    /// Works on a copy; `self` is left untouched.
    /// Returns according to [`heuristic::solve`](crate::heuristic::solve).
    pub fn solve_heuristic(&self, limits: &SearchLimits) -> Result<Solution<HeuristicStatistics>, SolverFailure<HeuristicStatistics>> {
        heuristic::solve(self, limits)
    }
}

impl Index<Location> for Board {
    type Output = Pipe;

    fn index(&self, location: Location) -> &Self::Output {
        &self.cells[location.as_index()]
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let glyphs = self.cells.map(|pipe| pipe.open_sides().glyph());
        let mut out = String::with_capacity(glyphs.nrows() * (glyphs.ncols() + 1));

        for row in glyphs.rows() {
            for glyph in row {
                out.push(*glyph);
            }
            out.push('\n');
        }

        write!(f, "{}", out)
    }
}
