#![deny(missing_docs)]

//! Implementation of [Dancing Links](https://en.wikipedia.org/wiki/Dancing_Links)
//! for enumerating the [exact covers](https://en.wikipedia.org/wiki/Exact_cover)
//! of a sparse 0/1 matrix.
//!
//! Build a [`Matrix`], then run a [`Solver`] over it with a callback that is
//! invoked once per solution:
//!
//! ```
//! use dancing_matrix::{Matrix, Solver};
//! use std::{convert::Infallible, ops::ControlFlow};
//!
//! let mut matrix = Matrix::new(4)?;
//! matrix.add_row(&[0, 1])?;
//! matrix.add_row(&[2, 3])?;
//! matrix.add_row(&[1, 2])?;
//!
//! let found = Solver::new(&mut matrix).solve::<Infallible, _>(|solution| {
//!     assert_eq!(solution.row_indices().collect::<Vec<_>>(), vec![0, 1]);
//!     ControlFlow::Continue(1)
//! });
//! assert_eq!(found, ControlFlow::Continue(1));
//! # Ok::<(), dancing_matrix::MatrixError>(())
//! ```

mod error;
pub mod matrix;
pub mod report;
pub(crate) mod solver;

pub use error::{MatrixError, Result};
pub use matrix::{Matrix, MatrixBuilder, NodeId};
pub use solver::{ColumnChoice, Solution, Solver};

/// An instance of an exact cover problem.
///
/// Each possibility becomes one row of a [`Matrix`] and each constraint one
/// column; a possibility has a 1 in every constraint it satisfies.
pub trait ExactCover {
    /// The type of values that are elements of a solution to the exact cover
    /// problem.
    type Possibility: core::fmt::Debug;

    /// The type of value that are constraints on a given instance of an exact
    /// cover problem.
    type Constraint: core::fmt::Debug;

    /// Return true if the given `Possibility` will satisfy the given
    /// `Constraint`.
    fn satisfies(&self, poss: &Self::Possibility, cons: &Self::Constraint) -> bool;

    /// Return a list of possibilities for this instance of the problem.
    fn possibilities(&self) -> &[Self::Possibility];

    /// Return a list of constraints that must be satisfied for this instance of
    /// the problem.
    fn constraints(&self) -> &[Self::Constraint];

    /// Build the matrix for this problem.
    ///
    /// Columns are named after the `Debug` output of their constraint, and
    /// row `i` is possibility `i`.
    ///
    /// # Errors
    ///
    /// Fails if two constraints print the same, or if node storage cannot be
    /// allocated.
    fn matrix(&self) -> Result<Matrix> {
        let constraints = self.constraints();
        let rows: Vec<Vec<usize>> = self
            .possibilities()
            .iter()
            .map(|poss| {
                constraints
                    .iter()
                    .enumerate()
                    .filter(|(_, cons)| self.satisfies(poss, cons))
                    .map(|(index, _)| index)
                    .collect()
            })
            .collect();

        let mut matrix = Matrix::builder(constraints.len())
            .names(constraints.iter().map(|cons| format!("{:?}", cons)))
            .capacity(rows.iter().map(Vec::len).sum())
            .build()?;
        for row in &rows {
            matrix.add_row(row)?;
        }

        Ok(matrix)
    }

    /// Return every solution, each as the possibilities it selects.
    ///
    /// # Errors
    ///
    /// Fails if the matrix cannot be built, see
    /// [`matrix`](ExactCover::matrix).
    fn solutions(&self) -> Result<Vec<Vec<&Self::Possibility>>> {
        let mut matrix = self.matrix()?;
        let possibilities = self.possibilities();

        Ok(Solver::new(&mut matrix)
            .all_solutions()
            .into_iter()
            .map(|rows| rows.into_iter().map(|row| &possibilities[row]).collect())
            .collect())
    }

    /// Count the solutions without collecting them.
    ///
    /// # Errors
    ///
    /// Fails if the matrix cannot be built, see
    /// [`matrix`](ExactCover::matrix).
    fn count_solutions(&self) -> Result<u64> {
        let mut matrix = self.matrix()?;
        Ok(Solver::new(&mut matrix).count())
    }
}

impl<E> ExactCover for &E
where
    E: ExactCover,
{
    type Constraint = E::Constraint;
    type Possibility = E::Possibility;

    fn satisfies(&self, poss: &Self::Possibility, cons: &Self::Constraint) -> bool {
        <E as ExactCover>::satisfies(self, poss, cons)
    }

    fn possibilities(&self) -> &[Self::Possibility] {
        <E as ExactCover>::possibilities(self)
    }

    fn constraints(&self) -> &[Self::Constraint] {
        <E as ExactCover>::constraints(self)
    }
}
