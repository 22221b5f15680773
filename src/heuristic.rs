//! Preprocessing followed by row-major best-first placement.

use std::time::{Duration, Instant};

use log::{debug, trace};

use crate::board::Board;
use crate::connectivity::connected_components;
use crate::feasibility::{is_hopeless, Phase};
use crate::frontier::Frontier;
use crate::limits::SearchLimits;
use crate::location::Location;
use crate::preprocess::preprocess;
use crate::propagation::lock_adjacent;
use crate::solver::{Solution, SolverFailure};
use crate::transform::Transform;

/// Statistics gathered by [`solve`], split between preprocessing and search.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct HeuristicStatistics {
    /// Largest size the preprocessing wavefront reached.
    pub pre_max_frontier: usize,
    /// Largest size the search frontier reached.
    pub max_frontier: usize,
    /// Number of preprocessing wavefront iterations.
    pub pre_iterations: u64,
    /// Number of search iterations; zero if preprocessing alone solved the board.
    pub iterations: u64,
    /// Wall-clock time spent, preprocessing included.
    pub elapsed: Duration,
}

struct Candidate {
    script: Vec<Transform>,
    // cells locked by propagation along this branch, restored after replay
    locked: Vec<Location>,
}

/// Upper bound on the number of distinct boards: 4^(rows·cols), saturating.
fn state_space(board: &Board) -> u64 {
    u32::try_from(board.rows() * board.cols())
        .ok()
        .and_then(|cells| 4u64.checked_pow(cells))
        .unwrap_or(u64::MAX)
}

/// Preprocess, then build a solution cell by cell in row-major order.
///
/// # Search
/// Each frontier entry is a script extending the preprocessed board.
/// The entry with the fewest connected components is replayed, and the next unlocked cell after its last placement is found;
/// locked cells passed over on the way are propagated from with [`lock_adjacent`].
/// That cell is then tried in each of its orientations which is not hopeless, and each is queued by the components it leaves.
/// A branch with no unlocked cell left is dropped.
///
/// Succeeds as soon as the best queued entry is fully connected, returning the preprocessing transforms followed by that entry's script.
///
/// # Bounds
/// Without an explicit cap in `limits`, iterations are capped at the state space size.
/// Reaching a bound or emptying the frontier yields [`SolverFailure::Unsolved`], carrying the best script seen.
/// A board preprocessing proves unsolvable yields [`SolverFailure::Contradiction`].
pub fn solve(board: &Board, limits: &SearchLimits) -> Result<Solution<HeuristicStatistics>, SolverFailure<HeuristicStatistics>> {
    debug!("heuristic search on {}x{} board with {limits:?}", board.rows(), board.cols());

    let start = Instant::now();
    let mut base = board.clone();
    let preprocessed = preprocess(&mut base).map_err(|contradiction| {
        debug!("preprocessing found no orientation for {}", contradiction.location);
        contradiction
    })?;

    let mut statistics = HeuristicStatistics {
        pre_max_frontier: preprocessed.max_frontier,
        pre_iterations: preprocessed.iterations,
        ..Default::default()
    };

    let base_components = connected_components(&base);
    if base_components == 1 {
        statistics.elapsed = start.elapsed();
        debug!("preprocessing alone solved the board: {statistics:?}");
        return Ok(Solution {
            transforms: preprocessed.transforms,
            statistics,
        });
    }

    let cap = state_space(board);
    let mut frontier = Frontier::new();
    let mut best = (base_components, Vec::new());
    frontier.push(usize::MAX, Candidate { script: Vec::new(), locked: Vec::new() });

    while !limits.exceeded(start, statistics.iterations, cap) {
        statistics.iterations += 1;
        statistics.max_frontier = statistics.max_frontier.max(frontier.len());

        let Some(entry) = frontier.pop() else {
            break;
        };
        let Candidate { script, locked } = entry.item;
        trace!("iteration {}: popped priority {} with {} transforms", statistics.iterations, entry.priority, script.len());

        let mut state = base.clone();
        state.replay(&script);
        locked.iter().for_each(|location| state.lock(*location));

        let mut next = script.last()
            .map_or(Location(0, 0), |last| last.location().next_in_row_major(board.cols()));
        let mut propagated = Vec::new();
        while next.0 < board.rows() && state[next].locked {
            propagated.extend(lock_adjacent(&mut state, next));
            next = next.next_in_row_major(board.cols());
        }
        if next.0 >= board.rows() {
            continue;
        }

        let locked = state.locked_since(&base);
        let cycle = state[next].kind.cycle_len();
        // times wraps to zero on the last pass, recording the orientation left in place
        for times in (1..=cycle).map(|times| times % cycle) {
            state.rotate_left(next);
            if is_hopeless(&state, next, Phase::Search) {
                continue;
            }

            let components = connected_components(&state);
            let mut child = Vec::with_capacity(script.len() + propagated.len() + 1);
            child.extend_from_slice(&script);
            child.extend_from_slice(&propagated);
            child.push(Transform::new(next, times));

            if components < best.0 {
                best = (components, child.clone());
            }
            frontier.push(components, Candidate { script: child, locked: locked.clone() });
        }

        if frontier.min_priority() == Some(1) {
            if let Some(entry) = frontier.pop() {
                statistics.elapsed = start.elapsed();
                debug!("heuristic search solved: {statistics:?}");

                let mut transforms = preprocessed.transforms;
                transforms.extend(entry.item.script);
                return Ok(Solution { transforms, statistics });
            }
        }
    }

    statistics.elapsed = start.elapsed();
    debug!("heuristic search stopped unsolved, best had {} components: {statistics:?}", best.0);

    let mut partial = preprocessed.transforms;
    partial.extend(best.1);
    Err(SolverFailure::Unsolved {
        best: Some(partial),
        statistics,
    })
}
