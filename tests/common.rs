#![allow(dead_code)]

use dancing_matrix::{ExactCover, Matrix, NodeId, Solution};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::HashSet;

/// Route `log` output through `env_logger`, once per test binary.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A random exact cover instance, kept as plain column lists so it can be
/// checked by brute force.
#[derive(Debug, Clone)]
pub struct RandomInstance {
    pub num_columns: usize,
    pub rows: Vec<Vec<usize>>,
}

impl RandomInstance {
    /// Between 1 and 8 columns and up to 12 non-empty rows. Rows are biased
    /// towards short ones so that instances regularly have covers.
    pub fn generate(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let num_columns = rng.gen_range(1..=8);
        let num_rows = rng.gen_range(0..=12usize);

        let rows = (0..num_rows)
            .map(|_| {
                let len = rng.gen_range(1..=num_columns.min(3));
                let mut columns: Vec<usize> = Vec::with_capacity(len);
                while columns.len() < len {
                    let column = rng.gen_range(0..num_columns);
                    if !columns.contains(&column) {
                        columns.push(column);
                    }
                }
                columns
            })
            .collect();

        RandomInstance { num_columns, rows }
    }

    pub fn matrix(&self) -> Matrix {
        let mut matrix = Matrix::new(self.num_columns).unwrap();
        for row in &self.rows {
            matrix.add_row(row).unwrap();
        }
        matrix
    }

    pub fn dense(&self) -> Vec<Vec<u8>> {
        self.rows
            .iter()
            .map(|row| {
                let mut cells = vec![0; self.num_columns];
                for &column in row {
                    cells[column] = 1;
                }
                cells
            })
            .collect()
    }

    /// Every exact cover, found by trying all subsets of rows. Each cover is
    /// a sorted list of row indices.
    pub fn brute_force(&self) -> HashSet<Vec<usize>> {
        (0u32..1 << self.rows.len())
            .map(|mask| {
                (0..self.rows.len())
                    .filter(|row| mask & (1 << row) != 0)
                    .collect::<Vec<_>>()
            })
            .filter(|rows| is_exact_cover(self.num_columns, rows.iter().map(|&row| &self.rows[row])))
            .collect()
    }
}

/// Whether the given rows together contain every column exactly once.
pub fn is_exact_cover<'a>(
    num_columns: usize,
    rows: impl IntoIterator<Item = &'a Vec<usize>>,
) -> bool {
    let mut counts = vec![0usize; num_columns];
    for row in rows {
        for &column in row {
            counts[column] += 1;
        }
    }
    counts.iter().all(|&count| count == 1)
}

/// Rebuild the dense 0/1 rows a solution selects by walking each handle.
pub fn overlay(solution: &Solution<'_>) -> Vec<u8> {
    let matrix = solution.matrix();
    let mut cells = vec![0u8; matrix.num_columns()];
    for &handle in solution.rows() {
        for column in matrix.row_columns(handle) {
            cells[column] += 1;
        }
    }
    cells
}

/// Sorted row indices of a solution.
pub fn sorted_rows(solution: &Solution<'_>) -> Vec<usize> {
    let mut rows: Vec<_> = solution.row_indices().collect();
    rows.sort_unstable();
    rows
}

/// Walk every live column and row of a matrix through the public accessors
/// and check the counts line up.
pub fn assert_circular(matrix: &Matrix) {
    for column in matrix.live_columns() {
        let members: Vec<NodeId> = matrix.column_nodes(column).collect();
        assert_eq!(members.len(), matrix.column_size(column));

        for &member in &members {
            assert_eq!(matrix.node_column(member), column);
            let row: Vec<NodeId> = matrix.row_nodes(member).collect();
            assert_eq!(row[0], member);

            // Walking from any other member visits the same nodes, rotated.
            for (offset, &start) in row.iter().enumerate() {
                let rotated: Vec<NodeId> = matrix.row_nodes(start).collect();
                let mut expected = row[offset..].to_vec();
                expected.extend_from_slice(&row[..offset]);
                assert_eq!(rotated, expected);
                assert_eq!(matrix.row_index(start), matrix.row_index(member));
            }
        }
    }
}

/// An `n` × `n` Latin square with no cells filled in.
#[derive(Debug)]
pub struct LatinSquare {
    possibilities: Vec<(usize, usize, usize)>,
    constraints: Vec<LatinConstraint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatinConstraint {
    RowColumn { row: usize, column: usize },
    RowNumber { row: usize, value: usize },
    ColumnNumber { column: usize, value: usize },
}

impl LatinSquare {
    pub fn empty(side_length: usize) -> Self {
        let triples: Vec<_> = (0..side_length)
            .flat_map(|a| (0..side_length).flat_map(move |b| (0..side_length).map(move |c| (a, b, c))))
            .collect();

        let constraints = triples
            .iter()
            .filter(|&&(_, _, last)| last == 0)
            .flat_map(|&(a, b, _)| {
                [
                    LatinConstraint::RowColumn { row: a, column: b },
                    LatinConstraint::RowNumber { row: a, value: b },
                    LatinConstraint::ColumnNumber { column: a, value: b },
                ]
            })
            .collect();

        LatinSquare {
            possibilities: triples,
            constraints,
        }
    }
}

impl ExactCover for LatinSquare {
    type Constraint = LatinConstraint;
    type Possibility = (usize, usize, usize);

    fn satisfies(&self, &(row, column, value): &Self::Possibility, cons: &Self::Constraint) -> bool {
        match *cons {
            LatinConstraint::RowColumn { row: r, column: c } => row == r && column == c,
            LatinConstraint::RowNumber { row: r, value: v } => row == r && value == v,
            LatinConstraint::ColumnNumber { column: c, value: v } => column == c && value == v,
        }
    }

    fn possibilities(&self) -> &[Self::Possibility] {
        &self.possibilities
    }

    fn constraints(&self) -> &[Self::Constraint] {
        &self.constraints
    }
}

/// Domino tilings of a 2 × `width` board.
#[derive(Debug)]
pub struct DominoStrip {
    placements: Vec<[(usize, usize); 2]>,
    cells: Vec<(usize, usize)>,
}

impl DominoStrip {
    pub fn new(width: usize) -> Self {
        let vertical = (0..width).map(|column| [(0, column), (1, column)]);
        let horizontal = (0..2).flat_map(|row| {
            (1..width).map(move |column| [(row, column - 1), (row, column)])
        });

        DominoStrip {
            placements: vertical.chain(horizontal).collect(),
            cells: (0..2)
                .flat_map(|row| (0..width).map(move |column| (row, column)))
                .collect(),
        }
    }
}

impl ExactCover for DominoStrip {
    type Constraint = (usize, usize);
    type Possibility = [(usize, usize); 2];

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
