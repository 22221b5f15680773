//! Forcing neighbors of a freshly locked cell.

use strum::VariantArray;

use crate::board::Board;
use crate::location::Location;
use crate::pipe::PipeKind;
use crate::side::Side;
use crate::transform::Transform;

/// The neighbor across `side`, provided the pipe at `location` opens onto it and it is not yet locked.
fn open_unlocked_neighbor(board: &Board, location: Location, side: Side) -> Option<(Location, PipeKind)> {
    if !board[location].is_open(side) {
        return None;
    }

    board.neighbor(location, side)
        .filter(|neighbor| !board[*neighbor].locked)
        .map(|neighbor| (neighbor, board[neighbor].kind))
}

/// Rotate `target` until `accept` holds, recording a transform if it moved.
fn force<F>(board: &mut Board, target: Location, accept: F, transforms: &mut Vec<Transform>)
where
    F: FnMut(&Board) -> bool,
{
    let count = board.rotate_until(target, accept).unwrap_or(0);
    if count != 0 {
        transforms.push(Transform::new(target, count));
    }
}

/// Rotate `target` until it opens back towards the cell across `side`, then lock it.
fn force_facing(board: &mut Board, target: Location, side: Side, transforms: &mut Vec<Transform>) {
    let facing = side.invert();
    force(board, target, |b| b[target].is_open(facing), transforms);
    board.lock(target);
}

/// Fix a corner beside a tee on the top or bottom row: it must open back towards the tee and away from the board's edge.
fn force_edge_corner(board: &mut Board, location: Location, target: Location, side: Side, transforms: &mut Vec<Transform>) {
    let facing = side.invert();
    let last_row = board.max_loc().0;
    let mut count = 0u8;

    if location.0 == 0 {
        count += board.rotate_until(target, |b| b[target].is_open(facing) && b[target].is_open(Side::Bottom)).unwrap_or(0);
    }
    if location.0 == last_row {
        count += board.rotate_until(target, |b| b[target].is_open(facing) && b[target].is_open(Side::Top)).unwrap_or(0);
    }
    // TODO: a corner beside a tee on an interior row is left as is; settle whether it should be constrained there too
    if location.0 == 0 || location.0 == last_row {
        board.lock(target);
    }

    let count = count % board[target].kind.cycle_len();
    if count != 0 {
        transforms.push(Transform::new(target, count));
    }
}

/// The rotation index a corner across `side` from `location` must take because of the board edge it sits on, if any.
///
/// Rules are tried in order; a later match overrides an earlier one, as on a single-row or single-column board.
fn edge_corner_targets(board: &Board, location: Location, side: Side) -> Vec<u8> {
    let last = board.max_loc();
    let (position, bound, (on_first, on_last)) = match side {
        Side::Left => (location.0, last.0, (3, 0)),
        Side::Right => (location.0, last.0, (2, 1)),
        Side::Top => (location.1, last.1, (3, 2)),
        Side::Bottom => (location.1, last.1, (0, 1)),
    };

    let mut targets = Vec::with_capacity(2);
    if position == 0 {
        targets.push(on_first);
    }
    if position == bound {
        targets.push(on_last);
    }

    targets
}

/// Given a cell just locked at `location`, force every neighbor whose orientation is now determined.
///
/// Only neighbors the locked cell opens onto, and which are not themselves locked, are considered.
/// Which neighbors are forced depends on the pair of kinds:
/// - a tee fixes an endpoint to its left or right, and an endpoint or straight above or below, then locks it;
/// - a tee on the top or bottom row fixes a corner to its left or right so that it also opens away from the edge, and locks it;
/// - a corner or straight fixes any endpoint or straight neighbor, then locks it;
/// - any cell fixes a corner neighbor lying along a board edge to the single rotation that edge allows, without locking it.
///
/// Returns the transforms applied, in the order they were applied.
pub fn lock_adjacent(board: &mut Board, location: Location) -> Vec<Transform> {
    let mut transforms = Vec::new();

    match board[location].kind {
        PipeKind::Tee => {
            for side in Side::VARIANTS {
                let Some((target, kind)) = open_unlocked_neighbor(board, location, *side) else {
                    continue;
                };

                match (side, kind) {
                    (Side::Left | Side::Right, PipeKind::Endpoint) => force_facing(board, target, *side, &mut transforms),
                    (Side::Left | Side::Right, PipeKind::Corner) => force_edge_corner(board, location, target, *side, &mut transforms),
                    (Side::Top | Side::Bottom, PipeKind::Endpoint | PipeKind::Straight) => force_facing(board, target, *side, &mut transforms),
                    _ => {}
                }
            }
        }
        PipeKind::Corner | PipeKind::Straight => {
            for side in Side::VARIANTS {
                if let Some((target, PipeKind::Endpoint | PipeKind::Straight)) = open_unlocked_neighbor(board, location, *side) {
                    force_facing(board, target, *side, &mut transforms);
                }
            }
        }
        PipeKind::Endpoint => {}
    }

    for side in Side::VARIANTS {
        let Some((target, PipeKind::Corner)) = open_unlocked_neighbor(board, location, *side) else {
            continue;
        };

        for index in edge_corner_targets(board, location, *side) {
            force(board, target, |b| b[target].rotation == index, &mut transforms);
        }
    }

    transforms
}
