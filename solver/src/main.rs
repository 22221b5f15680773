use pipeturn::{Board, CellDescriptor, SearchLimits};

const PUZZLE: &str = r#"[
    [{"type": "L", "index": 3}, {"type": "T", "index": 3}, {"type": "L", "index": 0}, {"type": "E", "index": 0}],
    [{"type": "I", "index": 1}, {"type": "I", "index": 1}, {"type": "E", "index": 0}, {"type": "I", "index": 1}],
    [{"type": "E", "index": 2}, {"type": "L", "index": 3}, {"type": "I", "index": 0}, {"type": "L", "index": 1}]
]"#;

fn main() {
    let rows: Vec<Vec<CellDescriptor>> = serde_json::from_str(PUZZLE).unwrap();
    let board = Board::try_from(rows.as_slice()).unwrap();
    print!("{}", board);
    println!("{} components\n", board.connected_components());

    match board.solve_heuristic(&SearchLimits::heuristic()) {
        Ok(solution) => {
            let mut solved = board.clone();
            solved.replay(&solution.transforms);
            print!("{}", solved);
            println!("heuristic: {} transforms, {:?}", solution.transforms.len(), solution.statistics);
            println!("{}\n", serde_json::to_string(&solution.transforms).unwrap());
        }
        Err(failure) => println!("heuristic: {failure}\n"),
    }

    match board.solve_blind(&SearchLimits::blind()) {
        Ok(solution) => {
            let mut solved = board.clone();
            solved.replay(&solution.transforms);
            print!("{}", solved);
            println!("blind: {} transforms, {:?}", solution.transforms.len(), solution.statistics);
        }
        Err(failure) => println!("blind: {failure}"),
    }
}
