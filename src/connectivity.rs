//! Component counting over the joints of a board.

use petgraph::algo;
use petgraph::graphmap::UnGraphMap;

use crate::board::Board;
use crate::location::Location;
use crate::side::Side;

/// Express the board as an undirected graph: one node per cell, and an edge wherever two neighbors both open onto their shared side.
///
/// Edges carry the side they cross, from the lower indexed endpoint.
pub(crate) fn joint_graph(board: &Board) -> UnGraphMap<Location, Side> {
    let mut graph = UnGraphMap::with_capacity(
        board.rows() * board.cols(),
        // "horizontal" joints
        (board.cols() - 1) * board.rows()
            // "vertical" joints
            + (board.rows() - 1) * board.cols(),
    );

    for location in board.locations() {
        graph.add_node(location);
    }

    for location in board.locations() {
        // add joints down and to the right, if possible
        for side in Side::FORWARD_VARIANTS {
            let Some(neighbor) = board.neighbor(location, *side) else {
                continue;
            };
            if board[location].is_open(*side) && board[neighbor].is_open(side.invert()) {
                graph.add_edge(location, neighbor, *side);
            }
        }
    }

    graph
}

/// Count the connected components of `board` under its current rotations. A solved board has exactly one.
///
/// This reads the board only; no per-cell flags are touched.
pub fn connected_components(board: &Board) -> usize {
    algo::connected_components(&joint_graph(board))
}
