//! Count, and optionally print, the domino tilings of a 2 × n board.
//! Usage:
//!
//! ```bash
//! cargo run --release --example domino 10
//! cargo run --release --example domino 4 --print
//! ```

use dancing_matrix::{report, ExactCover, Solver};
use std::ops::ControlFlow;

type Cell = (usize, usize);

struct Board {
    placements: Vec<[Cell; 2]>,
    cells: Vec<Cell>,
}

impl Board {
    fn new(width: usize) -> Self {
        let vertical = (0..width).map(|column| [(0, column), (1, column)]);
        let horizontal =
            (0..2).flat_map(|row| (1..width).map(move |column| [(row, column - 1), (row, column)]));

        Board {
            placements: vertical.chain(horizontal).collect(),
            cells: (0..2)
                .flat_map(|row| (0..width).map(move |column| (row, column)))
                .collect(),
        }
    }
}

impl ExactCover for Board {
    type Constraint = Cell;
    type Possibility = [Cell; 2];

    fn satisfies(&self, poss: &Self::Possibility, cons: &Self::Constraint) -> bool {
        poss.contains(cons)
    }

    fn possibilities(&self) -> &[Self::Possibility] {
        &self.placements
    }

    fn constraints(&self) -> &[Self::Constraint] {
        &self.cells
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let width = match args.get(1).map(|arg| arg.parse::<usize>()) {
        Some(Ok(width)) if width > 0 => width,
        _ => {
            eprintln!("usage: domino <width> [--print]");
            std::process::exit(1);
        }
    };
    let print = args.iter().skip(2).any(|arg| arg == "--print");

    let board = Board::new(width);
    let mut matrix = match board.matrix() {
        Ok(matrix) => matrix,
        Err(error) => {
            eprintln!("failed to build matrix: {}", error);
            std::process::exit(1);
        }
    };

    let mut solver = Solver::new(&mut matrix);
    let total = if print {
        match solver.solve(|solution| {
            let result = report::print_solution(solution);
            println!();
            result
        }) {
            ControlFlow::Continue(total) => total,
            ControlFlow::Break(error) => {
                eprintln!("failed to print solution: {}", error);
                std::process::exit(1);
            }
        }
    } else {
        solver.count()
    };

    println!("2 x {} board: {} tilings", width, total);
}
