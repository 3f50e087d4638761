//! Algorithm X over a dancing-links matrix.
//!
//! The toroidal structure lives in a flat arena of nodes addressed by index:
//! - node 0 is the root of the horizontal list of active columns
//! - nodes `1..=num_columns` are the column headers, in column id order
//! - the remaining nodes are row cells, stored row by row
//!
//! Covering and uncovering only rewrite index fields, so backtracking never
//! allocates.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{Error, Result};

/// Index of the root node in the arena.
const ROOT: usize = 0;

/// A node in the toroidal lists: either a column header or a row cell.
#[derive(Clone, Copy, Debug)]
struct Node {
    left: usize,
    right: usize,
    up: usize,
    down: usize,
    /// Header node of the column this node belongs to.
    column: usize,
    /// Row this cell belongs to. Unused for headers.
    row: usize,
}

impl Node {
    /// A header that is alone in its vertical list.
    fn header(index: usize, left: usize, right: usize) -> Self {
        Self {
            left,
            right,
            up: index,
            down: index,
            column: index,
            row: usize::MAX,
        }
    }
}

/// Counters collected during a search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Number of times the search procedure was entered.
    pub nodes: u64,
    /// Number of branches abandoned without a solution.
    pub backtracks: u64,
}

/// Result of a completed search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Indices of the selected rows, in the order they were chosen, or `None`
    /// if no exact cover exists.
    pub solution: Option<Vec<usize>>,
    pub stats: SearchStats,
}

/// Finds the first exact cover of a 0/1 matrix.
///
/// A solver is built for one matrix and consumed by [`Solver::solve`].
pub struct Solver {
    nodes: Vec<Node>,
    /// Live row count per header node (index 0 is unused).
    sizes: Vec<usize>,
    cancel: Option<Arc<AtomicBool>>,
    stats: SearchStats,
}

impl Solver {
    /// Builds the dancing-links structure.
    ///
    /// Each row lists the column ids it covers, all below `num_columns`.
    /// Columns are linked into the header list in id order, which fixes the
    /// tie-break of the column choice heuristic.
    pub fn new<'r, I>(num_columns: usize, rows: I) -> Self
    where
        I: IntoIterator<Item = &'r [usize]>,
    {
        let mut nodes = Vec::with_capacity(num_columns + 1);
        nodes.push(Node::header(ROOT, num_columns, if num_columns == 0 { ROOT } else { 1 }));
        for column in 1..=num_columns {
            let right = if column == num_columns { ROOT } else { column + 1 };
            nodes.push(Node::header(column, column - 1, right));
        }

        let mut solver = Self {
            nodes,
            sizes: vec![0; num_columns + 1],
            cancel: None,
            stats: SearchStats::default(),
        };

        for (row, columns) in rows.into_iter().enumerate() {
            solver.append_row(row, columns);
        }

        solver
    }

    /// Installs a flag that stops the search when set.
    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Appends one row, linking a cell into each listed column.
    fn append_row(&mut self, row: usize, columns: &[usize]) {
        let mut first: Option<usize> = None;

        for &column in columns {
            debug_assert!(column + 1 < self.sizes.len(), "column {column} out of range");
            let header = column + 1;
            let index = self.nodes.len();
            let up = self.nodes[header].up;

            // vertical: insert above the header, i.e. at the bottom of the column
            self.nodes[up].down = index;
            self.nodes[header].up = index;
            self.sizes[header] += 1;

            // horizontal: insert left of the row's first cell, i.e. at its end
            let (left, right) = match first {
                None => {
                    first = Some(index);
                    (index, index)
                }
                Some(first) => {
                    let last = self.nodes[first].left;
                    self.nodes[last].right = index;
                    self.nodes[first].left = index;
                    (last, first)
                }
            };

            self.nodes.push(Node {
                left,
                right,
                up,
                down: header,
                column: header,
                row,
            });
        }
    }

    /// Removes a column from the header list and hides every row that
    /// intersects it from the other columns those rows touch.
    fn cover(&mut self, column: usize) {
        let Node { left, right, .. } = self.nodes[column];
        self.nodes[right].left = left;
        self.nodes[left].right = right;

        let mut i = self.nodes[column].down;
        while i != column {
            let mut j = self.nodes[i].right;
            while j != i {
                let Node { up, down, column: owner, .. } = self.nodes[j];
                self.nodes[down].up = up;
                self.nodes[up].down = down;
                self.sizes[owner] -= 1;
                j = self.nodes[j].right;
            }
            i = self.nodes[i].down;
        }
    }

    /// Undoes [`Self::cover`], visiting nodes in exactly the reverse order.
    fn uncover(&mut self, column: usize) {
        let mut i = self.nodes[column].up;
        while i != column {
            let mut j = self.nodes[i].left;
            while j != i {
                let Node { up, down, column: owner, .. } = self.nodes[j];
                self.sizes[owner] += 1;
                self.nodes[down].up = j;
                self.nodes[up].down = j;
                j = self.nodes[j].left;
            }
            i = self.nodes[i].up;
        }

        let Node { left, right, .. } = self.nodes[column];
        self.nodes[right].left = column;
        self.nodes[left].right = column;
    }

    /// Picks the active column with the fewest live rows; ties go to the
    /// leftmost column in the header list.
    ///
    /// Returns `None` if every column has been covered.
    fn choose_column(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        let mut column = self.nodes[ROOT].right;
        while column != ROOT {
            let size = self.sizes[column];
            if best.map_or(true, |best| size < self.sizes[best]) {
                if size == 0 {
                    return Some(column);
                }
                best = Some(column);
            }
            column = self.nodes[column].right;
        }
        best
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Extends the partial solution in `selected`; returns whether a complete
    /// cover was found, leaving it in `selected`.
    fn search(&mut self, selected: &mut Vec<usize>) -> Result<bool> {
        if self.is_cancelled() {
            return Err(Error::Cancelled);
        }
        self.stats.nodes += 1;

        let Some(column) = self.choose_column() else {
            return Ok(true);
        };
        if self.sizes[column] == 0 {
            self.stats.backtracks += 1;
            return Ok(false);
        }

        self.cover(column);

        let mut r = self.nodes[column].down;
        while r != column {
            selected.push(self.nodes[r].row);

            let mut j = self.nodes[r].right;
            while j != r {
                self.cover(self.nodes[j].column);
                j = self.nodes[j].right;
            }

            if self.search(selected)? {
                return Ok(true);
            }

            selected.pop();
            let mut j = self.nodes[r].left;
            while j != r {
                self.uncover(self.nodes[j].column);
                j = self.nodes[j].left;
            }

            r = self.nodes[r].down;
        }

        self.uncover(column);
        self.stats.backtracks += 1;
        Ok(false)
    }

    /// Runs the search until the first exact cover or until the space is
    /// exhausted.
    ///
    /// An uncoverable matrix is `Ok` with no solution; only cancellation
    /// produces an error.
    pub fn solve(mut self) -> Result<SearchOutcome> {
        let mut selected = Vec::new();
        let found = self.search(&mut selected)?;

        log::debug!(
            "search visited {} nodes with {} backtracks",
            self.stats.nodes,
            self.stats.backtracks
        );

        Ok(SearchOutcome {
            solution: found.then_some(selected),
            stats: self.stats,
        })
    }
}
