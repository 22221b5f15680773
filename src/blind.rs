//! Exhaustive best-first search without preprocessing.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use log::{debug, trace};

use crate::board::Board;
use crate::connectivity::connected_components;
use crate::feasibility::{is_hopeless, Phase};
use crate::frontier::Frontier;
use crate::limits::SearchLimits;
use crate::solver::{Solution, SolverFailure};
use crate::transform::Transform;

/// Statistics gathered by [`solve`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct BlindStatistics {
    /// Largest size the frontier reached.
    pub max_frontier: usize,
    /// Number of frontier entries popped.
    pub iterations: u64,
    /// Wall-clock time spent searching.
    pub elapsed: Duration,
}

/// Best-first search over whole-board states, starting from the board exactly as given.
///
/// Every popped script is replayed onto a fresh copy of `board`.
/// States already seen (by their full rotation vector) are skipped.
/// From each new state, every unlocked cell is tried in every other orientation that is not hopeless, and the resulting script is queued by the number of connected components it leaves.
///
/// Returns [`Ok`] as soon as a fully connected state is popped.
/// Otherwise, once `limits` are reached or the frontier runs dry, returns [`SolverFailure::Unsolved`] carrying the script with the fewest components seen.
///
/// There is no propagation here; this is exponential and meant for small boards.
pub fn solve(board: &Board, limits: &SearchLimits) -> Result<Solution<BlindStatistics>, SolverFailure<BlindStatistics>> {
    debug!("blind search on {}x{} board with {limits:?}", board.rows(), board.cols());

    let start = Instant::now();
    let mut statistics = BlindStatistics::default();
    let mut frontier: Frontier<Vec<Transform>> = Frontier::new();
    let mut seen: HashSet<Vec<u8>> = HashSet::new();
    let mut best: Option<(usize, Vec<Transform>)> = None;

    frontier.push(usize::MAX, Vec::new());

    while !frontier.is_empty() && !limits.exceeded(start, statistics.iterations, u64::MAX) {
        statistics.iterations += 1;
        statistics.max_frontier = statistics.max_frontier.max(frontier.len());

        let Some(entry) = frontier.pop() else {
            break;
        };
        let script = entry.item;
        trace!("iteration {}: popped priority {} with {} transforms", statistics.iterations, entry.priority, script.len());

        let mut state = board.clone();
        state.replay(&script);
        if !seen.insert(state.rotation_state()) {
            continue;
        }

        let components = connected_components(&state);
        if components == 1 {
            statistics.elapsed = start.elapsed();
            debug!("blind search solved with {} transforms: {statistics:?}", script.len());
            return Ok(Solution {
                transforms: script,
                statistics,
            });
        }

        if best.as_ref().map_or(true, |(fewest, _)| components < *fewest) {
            best = Some((components, script.clone()));
        }

        for location in board.locations() {
            if state[location].locked {
                continue;
            }

            let cycle = state[location].kind.cycle_len();
            for times in 1..cycle {
                state.rotate_left(location);
                if is_hopeless(&state, location, Phase::Search) {
                    continue;
                }

                let mut child = script.clone();
                child.push(Transform::new(location, times));
                frontier.push(connected_components(&state), child);
            }
            // complete the cycle to restore the original orientation
            state.rotate_left(location);
        }
    }

    statistics.elapsed = start.elapsed();
    debug!(
        "blind search stopped unsolved, best had {:?} components: {statistics:?}",
        best.as_ref().map(|(components, _)| *components)
    );

    Err(SolverFailure::Unsolved {
        best: best.map(|(_, script)| script),
        statistics,
    })
}
