#![warn(missing_docs)]

//! # `pipeturn`
//!
//! A solver for pipe-rotation puzzles: a rectangular grid of pipe pieces, each turnable in 90° steps, must be turned so that every open end meets an open end and all cells form one network.
//! Begin by building a [`Board`] from rows of [`CellDescriptor`]s using a [`BoardBuilder`], then call [`solve_heuristic()`](Board::solve_heuristic) or [`solve_blind()`](Board::solve_blind).
//! Either yields a script of [`Transform`]s which, replayed against the board with [`Board::replay`], connects it.
//!
//! # Internals
//! A cell's kind fixes a small table of which sides (left, top, right, bottom) are open in each rotation.
//! Two neighbors are joined when both open onto their shared side, and the board is solved when the resulting graph has a single connected component.
//! The component count doubles as the search heuristic.
//!
//! Pruning rests on two observations:
//! 1. A cell may never open onto the outside of the board.
//! 2. A cell must agree with every neighbor whose orientation is settled; see [`is_hopeless`](feasibility::is_hopeless).
//!
//! The heuristic path first [preprocesses](preprocess::preprocess) the board: pieces in the grid corners and along its borders have only one legal orientation,
//! and fixing them forces their neighbors in turn (see [`lock_adjacent`](propagation::lock_adjacent)), so a wavefront of forced moves spreads inwards.
//! What remains is placed cell by cell in row-major order by best-first search.
//!
//! The blind path skips all of that and searches whole-board states from scratch, deduplicating by rotation vector.
//! It is exponential and only practical on small boards.
//!
//! Neither path guarantees the fewest rotations.

pub use board::Board;
pub use builder::{BoardBuilder, CellDescriptor, ValidationError};
pub use limits::SearchLimits;
pub use location::{Coord, Location};
pub use pipe::{Openings, Pipe, PipeKind};
pub use side::Side;
pub use solver::{Solution, SolverFailure};
pub use transform::Transform;

pub(crate) mod board;
mod tests;
pub(crate) mod location;
pub(crate) mod side;
pub(crate) mod pipe;
pub(crate) mod transform;
pub(crate) mod limits;
pub(crate) mod frontier;
pub mod builder;
pub mod connectivity;
pub mod feasibility;
pub mod propagation;
pub mod preprocess;
pub mod solver;
pub mod blind;
pub mod heuristic;
