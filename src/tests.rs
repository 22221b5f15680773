#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use serde_json::json;
    use strum::VariantArray;

    use crate::builder::{BoardBuilder, CellDescriptor, ValidationError};
    use crate::feasibility::{is_hopeless, Phase};
    use crate::location::Location;
    use crate::pipe::{Pipe, PipeKind};
    use crate::preprocess::preprocess;
    use crate::propagation::lock_adjacent;
    use crate::solver::SolverFailure;
    use crate::transform::Transform;
    use crate::{Board, SearchLimits};

    fn board(value: serde_json::Value) -> Board {
        let rows: Vec<Vec<CellDescriptor>> = serde_json::from_value(value).unwrap();
        Board::try_from(rows.as_slice()).unwrap()
    }

    fn no_cell_visited(board: &Board) -> bool {
        board.cells.iter().all(|pipe| !pipe.visited)
    }

    // 1x2, endpoints facing away from each other
    fn facing_away() -> Board {
        board(json!([[{"type": "E", "index": 1}, {"type": "E", "index": 0}]]))
    }

    // 2x2 of corners, all opening up and to the right
    fn scrambled_ring() -> Board {
        board(json!([
            [{"type": "L", "index": 0}, {"type": "L", "index": 0}],
            [{"type": "L", "index": 0}, {"type": "L", "index": 0}],
        ]))
    }

    fn scrambled_tees() -> Board {
        board(json!([
            [{"type": "E", "index": 0}, {"type": "T", "index": 0}, {"type": "E", "index": 0}],
            [{"type": "E", "index": 0}, {"type": "T", "index": 0}, {"type": "E", "index": 0}],
        ]))
    }

    // spanning tree on 3x4; preprocessing settles the borders and leaves four cells to search
    fn scrambled_tree() -> Board {
        board(json!([
            [{"type": "L", "index": 3}, {"type": "T", "index": 3}, {"type": "L", "index": 0}, {"type": "E", "index": 0}],
            [{"type": "I", "index": 1}, {"type": "I", "index": 1}, {"type": "E", "index": 0}, {"type": "I", "index": 1}],
            [{"type": "E", "index": 2}, {"type": "L", "index": 3}, {"type": "I", "index": 0}, {"type": "L", "index": 1}],
        ]))
    }

    #[test]
    fn rotation_closure() {
        for kind in PipeKind::VARIANTS {
            for start in 0..kind.cycle_len() {
                let mut pipe = Pipe::new(*kind, start).unwrap();
                for _ in 0..kind.cycle_len() {
                    pipe.rotate_left();
                }
                assert_eq!(pipe.rotation(), start, "{kind} from {start}");
            }
        }
    }

    #[test]
    fn rotate_right_inverts_rotate_left() {
        for kind in PipeKind::VARIANTS {
            for start in 0..kind.cycle_len() {
                let mut pipe = Pipe::new(*kind, start).unwrap();
                pipe.rotate_left();
                pipe.rotate_right();
                assert_eq!(pipe.rotation(), start, "{kind} from {start}");
            }
        }

        let mut left = Pipe::new(PipeKind::Straight, 0).unwrap();
        let mut right = left;
        left.rotate_left();
        right.rotate_right();
        assert_eq!(left, right);
    }

    #[test]
    fn rotation_out_of_range() {
        assert!(Pipe::new(PipeKind::Straight, 2).is_none());
        assert!(Pipe::new(PipeKind::Tee, 4).is_none());
        assert!(Pipe::new(PipeKind::Endpoint, 3).is_some());
    }

    #[test]
    fn kind_tags() {
        assert_eq!("L".parse::<PipeKind>().unwrap(), PipeKind::Corner);
        assert_eq!(PipeKind::Straight.to_string(), "I");
        assert!("X".parse::<PipeKind>().is_err());
    }

    #[test]
    fn build_and_print() {
        assert_eq!(format!("{}", facing_away()), "╻╸\n");
        assert_eq!(format!("{}", scrambled_tees()), "╸┣╸\n╸┣╸\n");
    }

    #[test]
    fn reject_unknown_kind() {
        let rows: Vec<Vec<CellDescriptor>> = serde_json::from_value(json!([
            [{"type": "E", "index": 0}, {"type": "X", "index": 0}],
        ])).unwrap();

        assert_eq!(
            Board::try_from(rows.as_slice()).unwrap_err(),
            vec![ValidationError::UnknownKind { location: Location(0, 1), tag: "X".to_string() }]
        );
    }

    #[test]
    fn reject_rotation_out_of_range() {
        let mut builder = BoardBuilder::new();
        builder.add_row(&[CellDescriptor::new(PipeKind::Tee, 0)])
            .add_row(&[CellDescriptor::new(PipeKind::Straight, 2)]);

        assert_eq!(
            builder.is_valid(),
            Some(&vec![ValidationError::RotationOutOfRange { location: Location(1, 0), kind: PipeKind::Straight, index: 2 }])
        );

        let negative = [CellDescriptor::new(PipeKind::Corner, -1)];
        assert!(BoardBuilder::new().add_row(&negative).build().is_err());
    }

    #[test]
    fn reject_ragged_and_empty() {
        let mut builder = BoardBuilder::new();
        builder.add_row(&[CellDescriptor::new(PipeKind::Tee, 0), CellDescriptor::new(PipeKind::Tee, 0)])
            .add_row(&[CellDescriptor::new(PipeKind::Tee, 0)])
            // ignored, the builder is already invalid
            .add_row(&[]);
        assert_eq!(builder.build().unwrap_err(), &vec![ValidationError::RaggedRow { row: 1, expected: 2, found: 1 }]);

        assert_eq!(BoardBuilder::new().build().unwrap_err(), &vec![ValidationError::Empty]);
        assert_eq!(BoardBuilder::new().add_row(&[]).build().unwrap_err(), &vec![ValidationError::Empty]);
    }

    #[test]
    fn descriptors_round_trip_through_json() {
        let board = facing_away();
        assert_eq!(
            serde_json::to_value(board.to_descriptors()).unwrap(),
            json!([[{"type": "E", "index": 1}, {"type": "E", "index": 0}]])
        );
        assert_eq!(serde_json::to_value(Transform::new(Location(2, 3), 1)).unwrap(), json!({"row": 2, "col": 3, "times": 1}));
    }

    #[test]
    fn count_components() {
        let mut board = facing_away();
        assert_eq!(board.connected_components(), 2);

        board.replay(&[Transform::new(Location(0, 0), 1)]);
        assert_eq!(format!("{}", board), "╺╸\n");
        assert_eq!(board.connected_components(), 1);
        assert!(board.is_solved());

        assert_eq!(scrambled_ring().connected_components(), 4);
        // both tees and the endpoint to the right of the top one
        assert_eq!(scrambled_tees().connected_components(), 3);
    }

    #[test]
    fn counting_components_leaves_no_trace() {
        let board = scrambled_tees();
        let before = board.clone();
        board.connected_components();
        assert_eq!(board, before);
        assert!(no_cell_visited(&board));
    }

    #[test]
    fn hopeless_off_board() {
        let board = board(json!([[{"type": "E", "index": 0}, {"type": "E", "index": 2}]]));
        assert!(is_hopeless(&board, Location(0, 0), Phase::Preprocessing));
        assert!(is_hopeless(&board, Location(0, 1), Phase::Search));
    }

    #[test]
    fn hopeless_left_neighbor_depends_on_phase() {
        // the right cell opens left onto a neighbor that is closed on that side
        let mut board = board(json!([[{"type": "E", "index": 1}, {"type": "E", "index": 0}]]));
        assert!(is_hopeless(&board, Location(0, 1), Phase::Search));
        assert!(!is_hopeless(&board, Location(0, 1), Phase::Preprocessing));

        board.lock(Location(0, 0));
        assert!(is_hopeless(&board, Location(0, 1), Phase::Preprocessing));
    }

    #[test]
    fn hopeless_right_neighbor_only_once_locked() {
        let mut board = board(json!([[{"type": "E", "index": 2}, {"type": "E", "index": 1}]]));
        assert!(!is_hopeless(&board, Location(0, 0), Phase::Search));

        board.lock(Location(0, 1));
        assert!(is_hopeless(&board, Location(0, 0), Phase::Search));
    }

    #[test]
    #[should_panic]
    fn rotating_locked_pipe_panics() {
        let mut board = facing_away();
        board.lock(Location(0, 0));
        board.apply(&Transform::new(Location(0, 0), 1));
    }

    #[test]
    fn tee_forces_endpoints() {
        let mut board = board(json!([
            [{"type": "E", "index": 3}, {"type": "T", "index": 3}, {"type": "E", "index": 1}],
            [{"type": "E", "index": 2}, {"type": "T", "index": 1}, {"type": "E", "index": 0}],
        ]));
        board.lock(Location(0, 1));

        let transforms = lock_adjacent(&mut board, Location(0, 1));
        assert_eq!(transforms, vec![Transform::new(Location(0, 0), 3), Transform::new(Location(0, 2), 3)]);
        assert_eq!(format!("{}", board), "╺┳╸\n╺┻╸\n");
        assert!(board[Location(0, 0)].is_locked());
        assert!(board[Location(0, 2)].is_locked());
        // tees are never forced
        assert!(!board[Location(1, 1)].is_locked());
    }

    #[test]
    fn tee_on_top_row_forces_corners() {
        let mut board = board(json!([
            [{"type": "L", "index": 0}, {"type": "T", "index": 3}, {"type": "L", "index": 0}],
            [{"type": "L", "index": 0}, {"type": "E", "index": 0}, {"type": "L", "index": 0}],
        ]));
        board.lock(Location(0, 1));

        let transforms = lock_adjacent(&mut board, Location(0, 1));
        assert_eq!(
            transforms,
            vec![
                Transform::new(Location(0, 0), 3),
                Transform::new(Location(0, 2), 2),
                Transform::new(Location(1, 1), 3),
            ]
        );
        assert_eq!(format!("{}", board), "┏┳┓\n┗╹┗\n");
        for location in [Location(0, 0), Location(0, 2), Location(1, 1)] {
            assert!(board[location].is_locked(), "{location}");
        }
    }

    #[test]
    fn tee_on_interior_row_leaves_corner() {
        let mut board = board(json!([
            [{"type": "L", "index": 0}, {"type": "L", "index": 0}, {"type": "L", "index": 0}],
            [{"type": "L", "index": 1}, {"type": "T", "index": 2}, {"type": "L", "index": 0}],
            [{"type": "L", "index": 0}, {"type": "L", "index": 0}, {"type": "L", "index": 0}],
        ]));
        board.lock(Location(1, 1));

        let transforms = lock_adjacent(&mut board, Location(1, 1));
        assert!(transforms.is_empty());
        assert_eq!(board[Location(1, 0)].rotation(), 1);
        assert!(!board[Location(1, 0)].is_locked());
    }

    #[test]
    fn preprocess_ring() {
        let mut board = scrambled_ring();
        let preprocessed = preprocess(&mut board).unwrap();

        assert_eq!(
            preprocessed.transforms,
            vec![
                Transform::new(Location(0, 0), 3),
                Transform::new(Location(0, 1), 2),
                Transform::new(Location(1, 1), 1),
            ]
        );
        assert_eq!(format!("{}", board), "┏┓\n┗┛\n");
        assert!(board.is_solved());
        assert!(no_cell_visited(&board));
        assert!(board.cells.iter().all(|pipe| pipe.is_locked()));
    }

    #[test]
    fn preprocess_borders() {
        let mut board = scrambled_tees();
        let preprocessed = preprocess(&mut board).unwrap();

        assert_eq!(
            preprocessed.transforms,
            vec![
                Transform::new(Location(0, 1), 3),
                Transform::new(Location(0, 0), 2),
                Transform::new(Location(1, 1), 1),
                Transform::new(Location(1, 0), 2),
            ]
        );
        assert_eq!(format!("{}", board), "╺┳╸\n╺┻╸\n");
        assert!(no_cell_visited(&board));
        assert!(preprocessed.iterations > 0);
    }

    #[test]
    fn preprocess_seeds_only_rotations() {
        let mut board = scrambled_tree();
        let preprocessed = preprocess(&mut board).unwrap();

        assert_eq!(
            preprocessed.transforms,
            vec![
                Transform::new(Location(1, 0), 1),
                Transform::new(Location(2, 2), 1),
                Transform::new(Location(1, 3), 1),
                Transform::new(Location(0, 2), 2),
                Transform::new(Location(1, 1), 1),
            ]
        );
        // every settled piece started in place, so the wavefront never ran
        assert_eq!(preprocessed.iterations, 0);
        assert_eq!(preprocessed.max_frontier, 0);
        for location in [Location(0, 3), Location(1, 2), Location(2, 0), Location(2, 1)] {
            assert!(!board[location].is_locked(), "{location}");
        }
        assert_eq!(board.connected_components(), 5);
    }

    #[test]
    fn preprocess_wavefront_reaches_interior() {
        let mut board = board(json!([
            [{"type": "L", "index": 0}, {"type": "I", "index": 0}, {"type": "L", "index": 0}],
            [{"type": "I", "index": 1}, {"type": "E", "index": 0}, {"type": "I", "index": 1}],
            [{"type": "L", "index": 2}, {"type": "T", "index": 0}, {"type": "L", "index": 0}],
        ]));
        let original = board.clone();
        let preprocessed = preprocess(&mut board).unwrap();

        assert_eq!(format!("{}", board), "┏━┓\n┃╻┃\n┗┻┛\n");
        assert!(board.is_solved());
        assert!(no_cell_visited(&board));

        let mut replayed = original;
        replayed.replay(&preprocessed.transforms);
        assert_eq!(replayed.rotation_state(), board.rotation_state());
    }

    #[test]
    fn preprocess_contradiction() {
        // a lone corner always opens off the board
        let mut lone = board(json!([[{"type": "L", "index": 0}]]));
        assert_eq!(preprocess(&mut lone).unwrap_err().location, Location(0, 0));

        // a tee on a single row must open up or down
        let single_row = board(json!([[{"type": "E", "index": 0}, {"type": "T", "index": 0}, {"type": "E", "index": 0}]]));
        match single_row.solve_heuristic(&SearchLimits::heuristic()) {
            Err(SolverFailure::Contradiction { location }) => assert_eq!(location, Location(0, 1)),
            other => panic!("expected contradiction, got {other:?}"),
        }
    }

    #[test]
    fn heuristic_endpoints_facing_away() {
        let board = facing_away();
        let solution = board.solve_heuristic(&SearchLimits::heuristic()).unwrap();
        assert_eq!(solution.transforms, vec![Transform::new(Location(0, 0), 1)]);
        assert_eq!(solution.statistics.iterations, 1);

        let mut solved = board.clone();
        solved.replay(&solution.transforms);
        assert_eq!(
            serde_json::to_value(solved.to_descriptors()).unwrap(),
            json!([[{"type": "E", "index": 2}, {"type": "E", "index": 0}]])
        );
        assert_eq!(solved.connected_components(), 1);
        // solving works on a copy
        assert_eq!(format!("{}", board), "╻╸\n");
    }

    #[test]
    fn heuristic_ring_in_few_rotations() {
        let board = scrambled_ring();
        let solution = board.solve_heuristic(&SearchLimits::heuristic()).unwrap();

        let rotations: u32 = solution.transforms.iter().map(|t| t.times as u32).sum();
        assert!(rotations < 16, "{rotations} rotations");
        // preprocessing alone was enough
        assert_eq!(solution.statistics.iterations, 0);

        let mut solved = board;
        solved.replay(&solution.transforms);
        assert_eq!(solved.connected_components(), 1);
    }

    #[test]
    fn heuristic_search_respects_locks() {
        let board = scrambled_tree();
        let mut preprocessed_board = board.clone();
        let preprocessed = preprocess(&mut preprocessed_board).unwrap();
        let pre_locked = preprocessed_board.locations()
            .filter(|location| preprocessed_board[*location].is_locked())
            .collect_vec();
        assert_eq!(pre_locked.len(), 8);

        let solution = board.solve_heuristic(&SearchLimits::heuristic()).unwrap();
        assert_eq!(solution.statistics.iterations, 2);
        assert_eq!(&solution.transforms[..preprocessed.transforms.len()], preprocessed.transforms.as_slice());

        let search = &solution.transforms[preprocessed.transforms.len()..];
        assert_eq!(
            search,
            &[
                // forced from the locked top-row corner before (0, 3) is placed
                Transform::new(Location(1, 2), 3),
                Transform::new(Location(0, 3), 1),
                // forced from the locked straight at (1, 0) on the next branch
                Transform::new(Location(2, 0), 1),
                Transform::new(Location(2, 1), 1),
            ]
        );
        for transform in search {
            assert!(!pre_locked.contains(&transform.location()), "{transform:?}");
        }
        // cells locked along a branch stay locked, so none is touched twice
        assert!(search.iter().map(Transform::location).all_unique());

        let mut solved = board;
        solved.replay(&solution.transforms);
        assert_eq!(format!("{}", solved), "┏┳┓╻\n┃┃╹┃\n╹┗━┛\n");
    }

    #[test]
    fn heuristic_is_deterministic() {
        let board = scrambled_tree();
        let first = board.solve_heuristic(&SearchLimits::heuristic()).unwrap();
        let second = board.solve_heuristic(&SearchLimits::heuristic()).unwrap();

        assert!(first.statistics.iterations > 1);
        assert_eq!(first.transforms, second.transforms);

        let mut solved = board;
        solved.replay(&first.transforms);
        assert_eq!(solved.connected_components(), 1);
    }

    #[test]
    fn heuristic_unsolvable_under_tight_cap() {
        // straights on a single row always open off the board
        let board = board(json!([[{"type": "I", "index": 0}, {"type": "I", "index": 0}]]));

        match board.solve_heuristic(&SearchLimits::heuristic().with_max_iterations(1)) {
            Err(SolverFailure::Unsolved { best, statistics }) => {
                assert_eq!(best, Some(vec![]));
                assert_eq!(statistics.iterations, 1);
            }
            other => panic!("expected unsolved, got {other:?}"),
        }

        assert!(matches!(board.solve_heuristic(&SearchLimits::heuristic()), Err(SolverFailure::Unsolved { .. })));
    }

    #[test]
    fn blind_endpoints_facing_away() {
        let board = facing_away();
        let solution = board.solve_blind(&SearchLimits::blind()).unwrap();
        assert_eq!(solution.transforms, vec![Transform::new(Location(0, 0), 1)]);
        assert_eq!(solution.statistics.iterations, 2);
    }

    #[test]
    fn blind_ring() {
        let board = scrambled_ring();
        let solution = board.solve_blind(&SearchLimits::blind()).unwrap();

        let mut solved = board.clone();
        solved.replay(&solution.transforms);
        assert!(solved.is_solved());

        let again = board.solve_blind(&SearchLimits::blind()).unwrap();
        assert_eq!(solution.transforms, again.transforms);
    }

    #[test]
    fn blind_tight_cap_returns_partial() {
        match facing_away().solve_blind(&SearchLimits::blind().with_max_iterations(1)) {
            Err(SolverFailure::Unsolved { best, statistics }) => {
                // only the starting board was examined
                assert_eq!(best, Some(vec![]));
                assert_eq!(statistics.iterations, 1);
            }
            other => panic!("expected unsolved, got {other:?}"),
        }

        let unsolvable = board(json!([[{"type": "I", "index": 0}, {"type": "I", "index": 0}]]));
        assert!(matches!(unsolvable.solve_blind(&SearchLimits::blind()), Err(SolverFailure::Unsolved { best: Some(_), .. })));
    }
}
