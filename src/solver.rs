use crate::matrix::{Matrix, NodeId};
use std::{convert::Infallible, ops::ControlFlow};

/// Policy for picking the column to branch on at each level of the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnChoice {
    /// Branch on the live column with the fewest live rows. A column with no
    /// rows left ends the branch without covering anything.
    #[default]
    MinimumSize,
    /// Branch on the first live column in header order.
    ///
    /// Finds the same solutions as [`ColumnChoice::MinimumSize`], usually
    /// far more slowly.
    First,
}

/// One exact cover, as handed to a search callback.
#[derive(Debug, Clone, Copy)]
pub struct Solution<'a> {
    matrix: &'a Matrix,
    rows: &'a [NodeId],
}

impl<'a> Solution<'a> {
    /// Number of rows in the cover.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the cover selects no rows, which only happens for a matrix
    /// with no columns.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// One handle per selected row, in the order the rows were chosen. Walk
    /// a row with [`Matrix::row_nodes`] or [`Matrix::row_columns`].
    pub fn rows(&self) -> &'a [NodeId] {
        self.rows
    }

    /// The matrix being searched.
    pub fn matrix(&self) -> &'a Matrix {
        self.matrix
    }

    /// Row index of each selected row, in selection order.
    pub fn row_indices(&self) -> impl Iterator<Item = usize> + 'a {
        let matrix = self.matrix;
        self.rows.iter().map(move |&node| matrix.row_index(node))
    }

    /// Column names of one selected row, starting from its handle.
    ///
    /// # Panics
    ///
    /// Panics if `row` is not below [`len`](Solution::len).
    pub fn row_names(&self, row: usize) -> impl Iterator<Item = &'a str> + 'a {
        let matrix = self.matrix;
        matrix
            .row_columns(self.rows[row])
            .map(move |column| matrix.column_name(column))
    }
}

/// Depth-first exact cover search over a [`Matrix`].
///
/// The search covers and uncovers columns of the matrix in place. Whenever it
/// returns, including after an early abort, the matrix is back in the exact
/// state it started in.
#[derive(Debug)]
pub struct Solver<'m> {
    matrix: &'m mut Matrix,
    choice: ColumnChoice,

    // Values used to track the state of solving
    partial_solution: Vec<NodeId>,
    stack: Vec<Frame>,
}

/// One level of the search: the column branched on and the row currently
/// selected from it. Both are arena indices.
#[derive(Debug)]
struct Frame {
    column: usize,
    row: usize,
}

impl<'m> Solver<'m> {
    /// Create a solver over `matrix` using [`ColumnChoice::MinimumSize`].
    pub fn new(matrix: &'m mut Matrix) -> Self {
        Solver {
            matrix,
            choice: ColumnChoice::default(),
            partial_solution: Vec::new(),
            stack: Vec::new(),
        }
    }

    /// Use a different column choice policy.
    pub fn column_choice(mut self, choice: ColumnChoice) -> Self {
        self.choice = choice;
        self
    }

    /// Enumerate every exact cover, calling `callback` once per solution.
    ///
    /// `ControlFlow::Continue(n)` from the callback adds `n` to the running
    /// total, which saturates at `u64::MAX` and is returned as
    /// `ControlFlow::Continue(total)` once the search space is exhausted. `ControlFlow::Break(value)` stops the whole
    /// search at once and is returned unchanged.
    pub fn solve<B, F>(&mut self, mut callback: F) -> ControlFlow<B, u64>
    where
        F: FnMut(&Solution<'_>) -> ControlFlow<B, u64>,
    {
        self.stack.clear();
        self.partial_solution.clear();
        log::debug!(
            "Starting search over [{}] columns and [{}] rows with {:?}.",
            self.matrix.num_columns(),
            self.matrix.num_rows(),
            self.choice
        );

        let mut total: u64 = 0;
        loop {
            if self.matrix.is_exhausted() {
                let solution = Solution {
                    matrix: &*self.matrix,
                    rows: &self.partial_solution,
                };
                log::trace!("Found solution {:?}.", solution.rows);

                match callback(&solution) {
                    ControlFlow::Continue(count) => total = total.saturating_add(count),
                    ControlFlow::Break(value) => {
                        self.unwind();
                        log::debug!("Search aborted by callback after total [{}].", total);
                        return ControlFlow::Break(value);
                    }
                }
            } else if let Some(column) = self.choose_column() {
                self.matrix.cover_head(column);

                let row = self.matrix.below(column);
                if row != column {
                    self.matrix.select_row(row);
                    self.stack.push(Frame { column, row });
                    self.partial_solution.push(NodeId(row));
                    continue;
                }

                self.matrix.uncover_head(column);
            }

            if !self.advance() {
                break;
            }
        }

        log::debug!("Search finished with total [{}].", total);
        ControlFlow::Continue(total)
    }

    /// Select a column to branch on.
    ///
    /// Returns `None` when some live column has no rows left, which means
    /// this branch holds no solutions.
    fn choose_column(&self) -> Option<usize> {
        match self.choice {
            ColumnChoice::First => Some(self.matrix.first_live_head()),
            ColumnChoice::MinimumSize => {
                let mut min_column = None;
                let mut min_size = usize::MAX;
                for head in self.matrix.live_heads() {
                    let size = self.matrix.head_size(head);
                    if size < min_size {
                        min_column = Some(head);
                        min_size = size;
                        if size <= 1 {
                            break;
                        }
                    }
                }

                if min_size == 0 {
                    None
                } else {
                    min_column
                }
            }
        }
    }

    /// Backtrack to the next untried row, uncovering every level that has run
    /// out of rows. Returns false once the whole search space is exhausted.
    fn advance(&mut self) -> bool {
        while let Some(frame) = self.stack.last_mut() {
            self.matrix.deselect_row(frame.row);

            let next = self.matrix.below(frame.row);
            if next == frame.column {
                let column = frame.column;
                self.matrix.uncover_head(column);
                self.stack.pop();
                self.partial_solution.pop();
            } else {
                frame.row = next;
                self.matrix.select_row(next);
                if let Some(last) = self.partial_solution.last_mut() {
                    *last = NodeId(next);
                }
                return true;
            }
        }

        false
    }

    /// Undo every level still on the stack, deepest first.
    fn unwind(&mut self) {
        while let Some(frame) = self.stack.pop() {
            self.matrix.deselect_row(frame.row);
            self.matrix.uncover_head(frame.column);
        }
        self.partial_solution.clear();
    }

    /// Count every solution.
    pub fn count(&mut self) -> u64 {
        match self.solve::<Infallible, _>(|_| ControlFlow::Continue(1)) {
            ControlFlow::Continue(total) => total,
            ControlFlow::Break(never) => match never {},
        }
    }

    /// Row indices of the first solution found, if any.
    pub fn first_solution(&mut self) -> Option<Vec<usize>> {
        match self.solve(|solution| ControlFlow::Break(solution.row_indices().collect::<Vec<_>>())) {
            ControlFlow::Break(rows) => Some(rows),
            ControlFlow::Continue(_) => None,
        }
    }

    /// Row indices of every solution.
    pub fn all_solutions(&mut self) -> Vec<Vec<usize>> {
        let mut solutions = Vec::new();
        match self.solve::<Infallible, _>(|solution| {
            solutions.push(solution.row_indices().collect());
            ControlFlow::Continue(1)
        }) {
            ControlFlow::Continue(_) => solutions,
            ControlFlow::Break(never) => match never {},
        }
    }
}
