//! Bare-bones solution printing.
//!
//! Each solution is written as one line per selected row, listing the names
//! of the columns in that row:
//!
//! ```text
//! Row 0: A B
//! Row 1: C D
//! ```

use crate::solver::Solution;
use std::{
    io::{self, Write},
    ops::ControlFlow,
};

/// Write one solution to `out` in the format described in the
/// [module documentation](self).
pub fn write_solution<W: Write>(out: &mut W, solution: &Solution<'_>) -> io::Result<()> {
    for row in 0..solution.len() {
        write!(out, "Row {}:", row)?;
        for name in solution.row_names(row) {
            write!(out, " {}", name)?;
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Search callback that prints each solution to standard output and counts
/// it once.
///
/// A failed write aborts the search with the I/O error.
pub fn print_solution(solution: &Solution<'_>) -> ControlFlow<io::Error, u64> {
    Printer::new(io::stdout().lock()).visit(solution)
}

/// Search callback state that prints each solution to a writer.
#[derive(Debug)]
pub struct Printer<W> {
    out: W,
}

impl<W: Write> Printer<W> {
    /// Print to `out`.
    pub fn new(out: W) -> Self {
        Printer { out }
    }

    /// Print one solution and count it once; a failed write aborts the
    /// search with the I/O error.
    pub fn visit(&mut self, solution: &Solution<'_>) -> ControlFlow<io::Error, u64> {
        match write_solution(&mut self.out, solution) {
            Ok(()) => ControlFlow::Continue(1),
            Err(error) => ControlFlow::Break(error),
        }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}
