#![no_main]

use arbitrary::Arbitrary;
use dancing_matrix::{ColumnChoice, Matrix, Solver};
use libfuzzer_sys::fuzz_target;
use std::{convert::Infallible, ops::ControlFlow};

const MAX_COLUMNS: usize = 12;
const MAX_ROWS: usize = 24;

#[derive(Debug, Arbitrary)]
struct Input {
    num_columns: u8,
    rows: Vec<Vec<u8>>,
    first_column: bool,
    delete: Option<u8>,
}

fuzz_target!(|input: Input| {
    let num_columns = usize::from(input.num_columns) % MAX_COLUMNS;
    let rows: Vec<Vec<usize>> = input
        .rows
        .iter()
        .take(MAX_ROWS)
        .map(|row| {
            let mut columns: Vec<usize> = Vec::new();
            if num_columns > 0 {
                for &cell in row {
                    let column = usize::from(cell) % num_columns;
                    if !columns.contains(&column) {
                        columns.push(column);
                    }
                }
            }
            columns
        })
        .collect();

    let mut matrix = Matrix::builder(num_columns).capacity(1).build().unwrap();
    for row in &rows {
        matrix.add_row(row).unwrap();
    }
    if let Some(target) = input.delete {
        if let Some(row) = rows.get(usize::from(target)) {
            matrix.delete_row(row).unwrap();
        }
    }
    let before = matrix.clone();

    let choice = if input.first_column {
        ColumnChoice::First
    } else {
        ColumnChoice::MinimumSize
    };
    let _ = Solver::new(&mut matrix)
        .column_choice(choice)
        .solve::<Infallible, _>(|solution| {
            let mut hits = vec![0usize; num_columns];
            for &handle in solution.rows() {
                for column in solution.matrix().row_columns(handle) {
                    hits[column] += 1;
                }
            }
            assert!(hits.iter().all(|&count| count == 1), "not a cover: {:?}", hits);
            ControlFlow::Continue(1)
        });

    assert_eq!(matrix, before);
});
