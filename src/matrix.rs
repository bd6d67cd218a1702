//! Sparse 0/1 matrix stored as a toroidal mesh of doubly linked nodes.
//!
//! Every "1" entry is a node linked to its neighbours along its row and
//! along its column, both circularly. Each column keeps a count of its live
//! nodes, and a header node threads every live column into one more circular
//! list. All nodes live in a single contiguous arena addressed by index, so
//! the matrix can grow without patching links and drops in one step.

mod arena;
mod node;

use self::{
    arena::Arena,
    node::{Direction, Walk, HEADER, NO_ROW},
};
use crate::error::{MatrixError, Result};
use std::{collections::HashMap, iter};

/// Opaque handle to one "1" entry of a [`Matrix`].
///
/// Handles stay valid for the lifetime of the matrix that produced them,
/// including across arena growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug, Clone, PartialEq, Eq)]
struct Column {
    name: String,
    size: usize,
    covered: bool,
}

/// A sparse 0/1 matrix prepared for exact cover search.
///
/// Columns are fixed when the matrix is built; rows can be appended with
/// [`add_row`](Matrix::add_row) and removed with
/// [`delete_row`](Matrix::delete_row). Columns are addressed by their
/// zero-based index or by name.
///
/// Two matrices compare equal when their meshes are identical link for
/// link, regardless of how much spare storage each holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    columns: Vec<Column>,
    names: HashMap<String, usize>,
    nodes: Arena,
    num_rows: usize,
}

/// Configures and builds a [`Matrix`].
#[derive(Debug, Clone)]
pub struct MatrixBuilder {
    num_columns: usize,
    names: Option<Vec<String>>,
    capacity: usize,
    dense: Vec<Vec<u8>>,
}

impl MatrixBuilder {
    /// Give the columns explicit names, in column order.
    ///
    /// Without this the columns are named `A` to `Z` when there are at most
    /// 26 of them, and `0`, `1`, `2`, ... otherwise.
    pub fn names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Estimate of the number of "1" entries the matrix will hold.
    ///
    /// A slight overestimate avoids every arena growth. Zero sizes the
    /// arena from the column count instead.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Initial rows as dense 0/1 data, one slice of cells per row. Any
    /// nonzero cell is a 1.
    pub fn dense<I, R>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[u8]>,
    {
        self.dense = rows.into_iter().map(|row| row.as_ref().to_vec()).collect();
        self
    }

    /// Build the matrix.
    ///
    /// # Errors
    ///
    /// Fails if the names are the wrong number or not unique, if a dense
    /// row has the wrong width, or if node storage cannot be allocated.
    pub fn build(self) -> Result<Matrix> {
        let names = match self.names {
            Some(names) if names.len() != self.num_columns => {
                return Err(MatrixError::ColumnNameCount {
                    expected: self.num_columns,
                    actual: names.len(),
                });
            }
            Some(names) => names,
            None => default_names(self.num_columns),
        };

        if let Some((row, cells)) = self
            .dense
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != self.num_columns)
        {
            return Err(MatrixError::DenseRowWidth {
                row,
                width: cells.len(),
                expected: self.num_columns,
            });
        }

        let capacity = arena::initial_capacity(self.capacity, self.num_columns);
        let mut matrix = Matrix::with_names(names, capacity)?;
        matrix.fill_dense(&self.dense)?;

        log::debug!(
            "Built matrix with [{}] columns, [{}] rows and [{}] nodes.",
            matrix.num_columns(),
            matrix.num_rows(),
            matrix.node_count()
        );

        Ok(matrix)
    }
}

fn default_names(num_columns: usize) -> Vec<String> {
    if num_columns <= 26 {
        (b'A'..=b'Z')
            .take(num_columns)
            .map(|letter| char::from(letter).to_string())
            .collect()
    } else {
        (0..num_columns).map(|index| index.to_string()).collect()
    }
}

impl Matrix {
    /// Create an empty matrix with `num_columns` default-named columns.
    pub fn new(num_columns: usize) -> Result<Self> {
        Self::builder(num_columns).build()
    }

    /// Start configuring a matrix with `num_columns` columns.
    pub fn builder(num_columns: usize) -> MatrixBuilder {
        MatrixBuilder {
            num_columns,
            names: None,
            capacity: arena::DEFAULT_CAPACITY,
            dense: Vec::new(),
        }
    }

    fn with_names(names: Vec<String>, capacity: usize) -> Result<Self> {
        let mut index = HashMap::with_capacity(names.len());
        for (column, name) in names.iter().enumerate() {
            if index.insert(name.clone(), column).is_some() {
                return Err(MatrixError::DuplicateColumnName(name.clone()));
            }
        }

        let heads = names.len() + 1;
        let mut nodes = Arena::new(heads, capacity)?;
        for head in 0..heads {
            nodes.push_self_ref(head, NO_ROW);
        }
        for head in 1..heads {
            node::insert_right(&mut nodes, head - 1, head);
        }

        let columns = names
            .into_iter()
            .map(|name| Column {
                name,
                size: 0,
                covered: false,
            })
            .collect();

        Ok(Matrix {
            columns,
            names: index,
            nodes,
            num_rows: 0,
        })
    }

    fn fill_dense(&mut self, rows: &[Vec<u8>]) -> Result<()> {
        let ones = rows.iter().flatten().filter(|&&cell| cell != 0).count();
        self.nodes.reserve(ones)?;

        // Insert column by column, top to bottom. The last node placed in a
        // row is always its nearest neighbour to the left.
        let first_row = self.num_rows;
        let mut row_tails: Vec<Option<usize>> = vec![None; rows.len()];
        for column in 0..self.num_columns() {
            for (offset, cells) in rows.iter().enumerate() {
                if cells[column] == 0 {
                    continue;
                }

                let index = self.push_node(column + 1, first_row + offset);
                if let Some(left) = row_tails[offset] {
                    node::insert_right(&mut self.nodes, left, index);
                }
                row_tails[offset] = Some(index);
            }
        }

        self.num_rows += rows.len();
        Ok(())
    }

    /// Append a node at the bottom of the column headed by `head`. Storage
    /// must already be reserved.
    fn push_node(&mut self, head: usize, row: usize) -> usize {
        let index = self.nodes.push_self_ref(head, row);
        node::insert_above(&mut self.nodes, head, index);
        self.columns[head - 1].size += 1;
        index
    }

    /// Validate a row's columns, returning them sorted.
    fn check_row(&self, columns: &[usize]) -> Result<Vec<usize>> {
        let num_columns = self.num_columns();
        if let Some(&index) = columns.iter().find(|&&index| index >= num_columns) {
            return Err(MatrixError::ColumnOutOfRange { index, num_columns });
        }

        let mut sorted = columns.to_vec();
        sorted.sort_unstable();
        if let Some(pair) = sorted.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(MatrixError::DuplicateColumn { index: pair[0] });
        }

        Ok(sorted)
    }

    fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<usize>> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.column_index(name)
                    .ok_or_else(|| MatrixError::UnknownColumn(name.to_owned()))
            })
            .collect()
    }

    /// Append a row with a 1 in each of the given columns.
    ///
    /// The order of `columns` becomes the left-to-right order of the row.
    /// Each new node goes to the bottom of its column. Returns the number of
    /// entries added. An empty row adds no nodes but still counts as a row.
    ///
    /// # Errors
    ///
    /// Fails without modifying the matrix if a column is out of range or
    /// repeated, or if node storage cannot grow.
    pub fn add_row(&mut self, columns: &[usize]) -> Result<usize> {
        self.check_row(columns)?;
        self.nodes.reserve(columns.len())?;

        let row = self.num_rows;
        let mut previous = None;
        for &column in columns {
            let index = self.push_node(column + 1, row);
            if let Some(left) = previous {
                node::insert_right(&mut self.nodes, left, index);
            }
            previous = Some(index);
        }
        self.num_rows += 1;

        log::trace!("Added row [{}] with columns {:?}.", row, columns);
        Ok(columns.len())
    }

    /// Append a row naming its columns instead of indexing them.
    ///
    /// # Errors
    ///
    /// Fails with [`MatrixError::UnknownColumn`] for an unrecognised name,
    /// otherwise as [`add_row`](Matrix::add_row).
    pub fn add_row_named<S: AsRef<str>>(&mut self, names: &[S]) -> Result<usize> {
        let columns = self.resolve(names)?;
        self.add_row(&columns)
    }

    /// Remove the live row whose set of columns is exactly `columns`.
    ///
    /// Order does not matter. Candidates are the rows in the first listed
    /// column; each is compared by its full sorted column set. This walks a
    /// good part of the matrix and is not meant to be called during a
    /// search. Returns the number of entries removed; an empty request
    /// removes nothing.
    ///
    /// # Errors
    ///
    /// Fails with [`MatrixError::RowNotFound`] if no row matches, leaving
    /// the matrix unchanged.
    pub fn delete_row(&mut self, columns: &[usize]) -> Result<usize> {
        let Some(&first) = columns.first() else {
            return Ok(0);
        };
        let wanted = self.check_row(columns)?;

        let found = Walk::new(&self.nodes, first + 1, Direction::Down)
            .find(|&candidate| {
                let mut actual: Vec<usize> = self.row_columns(NodeId(candidate)).collect();
                actual.sort_unstable();
                actual == wanted
            })
            .ok_or(MatrixError::RowNotFound)?;

        let members: Vec<usize> = iter::once(found)
            .chain(Walk::new(&self.nodes, found, Direction::Right))
            .collect();
        for &index in &members {
            node::unlink_horizontal(&mut self.nodes, index);
            node::unlink_vertical(&mut self.nodes, index);
            let head = self.nodes[index].column;
            self.columns[head - 1].size -= 1;
        }
        self.num_rows -= 1;

        log::trace!(
            "Deleted row [{}] with columns {:?}.",
            self.nodes[found].row,
            columns
        );
        Ok(members.len())
    }

    /// Remove a row naming its columns instead of indexing them.
    ///
    /// # Errors
    ///
    /// Fails with [`MatrixError::UnknownColumn`] for an unrecognised name,
    /// otherwise as [`delete_row`](Matrix::delete_row).
    pub fn delete_row_named<S: AsRef<str>>(&mut self, names: &[S]) -> Result<usize> {
        let columns = self.resolve(names)?;
        self.delete_row(&columns)
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows added and not deleted.
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of node slots used in the arena, including slots left behind
    /// by deleted rows.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of nodes the arena holds before it has to grow.
    pub fn node_capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Name of a column.
    ///
    /// # Panics
    ///
    /// Panics if `column` is out of range.
    pub fn column_name(&self, column: usize) -> &str {
        &self.columns[column].name
    }

    /// Index of the column with the given name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.names.get(name).copied()
    }

    /// Number of live nodes in a column.
    ///
    /// # Panics
    ///
    /// Panics if `column` is out of range.
    pub fn column_size(&self, column: usize) -> usize {
        self.columns[column].size
    }

    /// Whether a column is currently covered.
    ///
    /// # Panics
    ///
    /// Panics if `column` is out of range.
    pub fn is_covered(&self, column: usize) -> bool {
        self.columns[column].covered
    }

    /// True once every column has been covered, i.e. the header's column
    /// list is empty.
    pub fn is_exhausted(&self) -> bool {
        self.nodes[HEADER].right == HEADER
    }

    /// Indices of the live columns, in header order.
    pub fn live_columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.live_heads().map(|head| head - 1)
    }

    /// Live nodes of a column, top to bottom.
    ///
    /// # Panics
    ///
    /// Panics if `column` is out of range.
    pub fn column_nodes(&self, column: usize) -> impl Iterator<Item = NodeId> + '_ {
        Walk::new(&self.nodes, self.head(column), Direction::Down).map(NodeId)
    }

    /// Every node of the row containing `node`, starting with `node` and
    /// continuing rightwards.
    ///
    /// # Panics
    ///
    /// Panics if `node` does not belong to this matrix.
    pub fn row_nodes(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let index = self.data_index(node);
        iter::once(node).chain(Walk::new(&self.nodes, index, Direction::Right).map(NodeId))
    }

    /// Column indices of the row containing `node`, in the same order as
    /// [`row_nodes`](Matrix::row_nodes).
    ///
    /// # Panics
    ///
    /// Panics if `node` does not belong to this matrix.
    pub fn row_columns(&self, node: NodeId) -> impl Iterator<Item = usize> + '_ {
        self.row_nodes(node).map(move |member| self.node_column(member))
    }

    /// Column index of a node.
    ///
    /// # Panics
    ///
    /// Panics if `node` does not belong to this matrix.
    pub fn node_column(&self, node: NodeId) -> usize {
        self.nodes[self.data_index(node)].column - 1
    }

    /// Index of the row a node was added as. Dense rows come first, then
    /// rows from [`add_row`](Matrix::add_row) in call order.
    ///
    /// # Panics
    ///
    /// Panics if `node` does not belong to this matrix.
    pub fn row_index(&self, node: NodeId) -> usize {
        self.nodes[self.data_index(node)].row
    }

    /// Cover a column: unlink it from the live column list and unlink every
    /// row that has a 1 in it from all the other columns it touches.
    ///
    /// Row lists are left intact, so [`uncover`](Matrix::uncover) can restore
    /// the mesh exactly. Covers and uncovers must nest like parentheses.
    ///
    /// # Panics
    ///
    /// Panics if `column` is out of range or already covered.
    pub fn cover(&mut self, column: usize) {
        let head = self.head(column);
        assert!(
            !self.columns[column].covered,
            "column [{}] is already covered",
            column
        );
        self.cover_head(head);
    }

    /// Undo the most recent [`cover`](Matrix::cover) of `column`.
    ///
    /// # Panics
    ///
    /// Panics if `column` is out of range or not covered.
    pub fn uncover(&mut self, column: usize) {
        let head = self.head(column);
        assert!(
            self.columns[column].covered,
            "column [{}] is not covered",
            column
        );
        self.uncover_head(head);
    }

    fn head(&self, column: usize) -> usize {
        assert!(
            column < self.num_columns(),
            "column [{}] is out of range for [{}] columns",
            column,
            self.num_columns()
        );
        column + 1
    }

    fn data_index(&self, node: NodeId) -> usize {
        assert!(
            node.0 > self.num_columns() && node.0 < self.nodes[..].len(),
            "{:?} does not belong to this matrix",
            node
        );
        node.0
    }

    pub(crate) fn live_heads(&self) -> Walk<'_> {
        Walk::new(&self.nodes, HEADER, Direction::Right)
    }

    pub(crate) fn first_live_head(&self) -> usize {
        self.nodes[HEADER].right
    }

    pub(crate) fn head_size(&self, head: usize) -> usize {
        self.columns[head - 1].size
    }

    /// Next node down from `index`; wraps to the column head at the bottom.
    pub(crate) fn below(&self, index: usize) -> usize {
        self.nodes[index].down
    }

    pub(crate) fn cover_head(&mut self, head: usize) {
        debug_assert!(!self.columns[head - 1].covered);
        let nodes = &mut *self.nodes;
        node::unlink_horizontal(nodes, head);

        let mut row = nodes[head].down;
        while row != head {
            let mut index = nodes[row].right;
            while index != row {
                node::unlink_vertical(nodes, index);
                self.columns[nodes[index].column - 1].size -= 1;
                index = nodes[index].right;
            }
            row = nodes[row].down;
        }

        self.columns[head - 1].covered = true;
    }

    pub(crate) fn uncover_head(&mut self, head: usize) {
        debug_assert!(self.columns[head - 1].covered);
        let nodes = &mut *self.nodes;

        let mut row = nodes[head].up;
        while row != head {
            let mut index = nodes[row].left;
            while index != row {
                self.columns[nodes[index].column - 1].size += 1;
                node::relink_vertical(nodes, index);
                index = nodes[index].left;
            }
            row = nodes[row].up;
        }

        node::relink_horizontal(nodes, head);
        self.columns[head - 1].covered = false;
    }

    /// Cover the column of every other node in `row`, left to right.
    pub(crate) fn select_row(&mut self, row: usize) {
        let mut index = self.nodes[row].right;
        while index != row {
            let head = self.nodes[index].column;
            self.cover_head(head);
            index = self.nodes[index].right;
        }
    }

    /// Exact inverse of [`select_row`](Matrix::select_row), right to left.
    pub(crate) fn deselect_row(&mut self, row: usize) {
        let mut index = self.nodes[row].left;
        while index != row {
            let head = self.nodes[index].column;
            self.uncover_head(head);
            index = self.nodes[index].left;
        }
    }
}
