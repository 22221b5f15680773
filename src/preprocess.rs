//! Border normalization and wavefront propagation, run before the heuristic search.

use std::collections::VecDeque;

use itertools::Itertools;
use log::{debug, trace};
use strum::VariantArray;

use crate::board::Board;
use crate::feasibility::{is_hopeless, Phase};
use crate::location::Location;
use crate::pipe::PipeKind;
use crate::propagation::lock_adjacent;
use crate::side::Side;
use crate::solver::Contradiction;
use crate::transform::Transform;

/// The result of [`preprocess`]: every forced rotation, plus statistics on the wavefront pass.
#[derive(Clone, Debug, Default)]
pub struct Preprocessed {
    /// Transforms applied, in order, across all phases.
    pub transforms: Vec<Transform>,
    /// Largest size the wavefront queue reached.
    pub max_frontier: usize,
    /// Number of entries drained from the wavefront queue.
    pub iterations: u64,
}

struct Preprocessor<'a> {
    board: &'a mut Board,
    transforms: Vec<Transform>,
    // cells whose neighbors may now be forced
    wavefront: VecDeque<Location>,
}

impl Preprocessor<'_> {
    /// Orient a corner piece sitting in a corner of the grid: it has exactly one orientation that opens only inwards.
    fn settle_grid_corner(&mut self, location: Location) -> Result<(), Contradiction> {
        if self.board[location].kind != PipeKind::Corner || self.board[location].locked {
            return Ok(());
        }

        let count = self.board
            .rotate_until(location, |b| !is_hopeless(b, location, Phase::Preprocessing))
            .ok_or(Contradiction { location })?;
        self.board.lock(location);
        if count != 0 {
            self.transforms.push(Transform::new(location, count));
            self.wavefront.push_back(location);
        }
        self.transforms.extend(lock_adjacent(self.board, location));

        Ok(())
    }

    /// Rotate an edge piece to `index`, which closes its outward side, then lock and propagate from it.
    fn settle_edge(&mut self, location: Location, index: u8) -> Result<(), Contradiction> {
        if self.board[location].locked {
            return match self.board[location].rotation == index {
                true => Ok(()),
                false => Err(Contradiction { location }),
            };
        }

        let count = self.board
            .rotate_until(location, |b| b[location].rotation == index)
            .ok_or(Contradiction { location })?;
        self.board.lock(location);
        if count != 0 {
            self.transforms.push(Transform::new(location, count));
            self.wavefront.push_back(location);
        }
        self.transforms.extend(lock_adjacent(self.board, location));

        Ok(())
    }

    /// The canonical index of a tee or straight on a border, for the border named by `side`.
    fn edge_index(kind: PipeKind, side: Side) -> Option<u8> {
        match (kind, side) {
            (PipeKind::Tee, Side::Top) => Some(3),
            (PipeKind::Straight, Side::Top) => Some(1),
            (PipeKind::Tee | PipeKind::Straight, Side::Bottom) => Some(1),
            (PipeKind::Tee | PipeKind::Straight, Side::Left) => Some(0),
            (PipeKind::Tee, Side::Right) => Some(2),
            (PipeKind::Straight, Side::Right) => Some(0),
            _ => None,
        }
    }

    fn settle_border(&mut self, location: Location, side: Side) -> Result<(), Contradiction> {
        match Self::edge_index(self.board[location].kind, side) {
            Some(index) => self.settle_edge(location, index),
            None => Ok(()),
        }
    }

    /// Drain the wavefront, locking any unlocked neighbor left with exactly one viable orientation.
    ///
    /// Marks `visited` on drained cells; the caller clears it.
    fn flood(&mut self) -> (usize, u64) {
        let mut max_frontier = 0;
        let mut iterations = 0;

        loop {
            max_frontier = max_frontier.max(self.wavefront.len());
            let Some(location) = self.wavefront.pop_front() else {
                break;
            };
            iterations += 1;

            if self.board[location].visited {
                continue;
            }
            self.board.pipe_mut(location).visited = true;

            for side in Side::VARIANTS {
                let Some(neighbor) = self.board.neighbor(location, *side) else {
                    continue;
                };
                if self.board[neighbor].locked {
                    self.wavefront.push_back(neighbor);
                    continue;
                }

                let cycle = self.board[neighbor].kind.cycle_len();
                let mut viable = 0;
                // a full cycle leaves the pipe where it started
                for _ in 0..cycle {
                    self.board.rotate_left(neighbor);
                    if !is_hopeless(self.board, neighbor, Phase::Preprocessing) {
                        viable += 1;
                    }
                }
                if viable != 1 {
                    continue;
                }

                let count = self.board
                    .rotate_until(neighbor, |b| !is_hopeless(b, neighbor, Phase::Preprocessing))
                    .unwrap_or(0);
                self.board.lock(neighbor);
                trace!("wavefront forced {neighbor} by {count} from {location}");
                if count != 0 {
                    self.transforms.push(Transform::new(neighbor, count));
                    self.wavefront.push_back(neighbor);
                }
            }
        }

        (max_frontier, iterations)
    }
}

/// Fix every orientation the board's borders force, then propagate inwards until nothing more is forced.
///
/// 1. Corner pieces in the four grid corners are turned to their only inward-facing orientation.
/// 2. Tee and straight pieces along each border (grid corners excluded) are turned so their outward side is closed.
/// 3. A wavefront seeded by every rotation above locks any neighbor left with a single viable orientation, until it runs dry.
///
/// Every cell fixed along the way is locked and propagated from with [`lock_adjacent`].
/// On return, no cell is left `visited`.
///
/// Fails with [`Contradiction`] if a grid corner admits no orientation, or a border piece is already locked facing outwards.
pub fn preprocess(board: &mut Board) -> Result<Preprocessed, Contradiction> {
    let last = board.max_loc();
    let mut preprocessor = Preprocessor {
        board,
        transforms: Vec::new(),
        wavefront: VecDeque::new(),
    };

    let corners = [Location(0, 0), Location(0, last.1), Location(last.0, 0), last];
    for corner in corners.into_iter().unique() {
        preprocessor.settle_grid_corner(corner)?;
    }
    debug!("grid corners settled with {} transforms", preprocessor.transforms.len());

    // grid corners are excluded
    for col in 1..last.1 {
        preprocessor.settle_border(Location(0, col), Side::Top)?;
        preprocessor.settle_border(Location(last.0, col), Side::Bottom)?;
    }
    for row in 1..last.0 {
        preprocessor.settle_border(Location(row, 0), Side::Left)?;
        preprocessor.settle_border(Location(row, last.1), Side::Right)?;
    }
    debug!(
        "borders settled with {} transforms, {} cells queued",
        preprocessor.transforms.len(),
        preprocessor.wavefront.len()
    );

    let (max_frontier, iterations) = preprocessor.flood();
    preprocessor.board.clear_visited();
    debug!(
        "wavefront done after {iterations} iterations (max frontier {max_frontier}), {} transforms in all, {} cells locked",
        preprocessor.transforms.len(),
        preprocessor.board.cells.iter().filter(|pipe| pipe.locked).count()
    );

    Ok(Preprocessed {
        transforms: preprocessor.transforms,
        max_frontier,
        iterations,
    })
}
