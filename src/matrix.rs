use smallvec::SmallVec;

use crate::error::Error;
use crate::indices::{ColumnIndex, NodeIndex, MASTER};

/// A record in the quadruple-linked arena of a [`Matrix`]: either a column
/// header or a "1" entry at the intersection of a row and a column.
///
/// Rows and columns form circular doubly linked lists. A node carries no row
/// identity; membership in a row is encoded entirely by the horizontal ring
/// the node belongs to. Crucially, removing a node from a ring updates only
/// its neighbors' links and leaves the node's own links intact, which is
/// what lets a later restoration put it back in exactly the right place.
/// This is the "dancing links" technique from Knuth's paper
/// [arXiv:cs/0011047][dl] \[cs.DS\] (2000).
///
/// [dl]: https://arxiv.org/pdf/cs/0011047.pdf
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Node {
    /// The previous node in this node's row, in cyclic order.
    ///
    /// This field corresponds to the `L` pointer in Knuth's data structure.
    left: NodeIndex,
    /// The next node in this node's row, in cyclic order.
    ///
    /// This field corresponds to the `R` pointer in Knuth's data structure.
    right: NodeIndex,
    /// The previous node in this node's column, in cyclic order. The vertical
    /// ring of a column runs through its header.
    ///
    /// This field corresponds to the `U` pointer in Knuth's data structure.
    up: NodeIndex,
    /// The next node in this node's column, in cyclic order.
    ///
    /// This field corresponds to the `D` pointer in Knuth's data structure.
    down: NodeIndex,
    /// The column whose vertical ring this node belongs to; a header refers
    /// to itself. This is a lookup relation, not ownership.
    ///
    /// This field corresponds to the `C` pointer in Knuth's data structure.
    column: ColumnIndex,
}

impl Node {
    /// Creates a header record, linked to itself in all four directions.
    fn header(column: ColumnIndex) -> Self {
        let ix = column.node();
        Self {
            left: ix,
            right: ix,
            up: ix,
            down: ix,
            column,
        }
    }
}

/// The in-place quadruple-linked matrix of a generalized exact cover problem.
///
/// The arena stores the master header at slot 0, the `columns` column headers
/// at slots `1..=columns`, and one node per "1" entry thereafter, in row
/// insertion order. The master's horizontal ring links exactly the uncovered
/// _primary_ columns; when it is empty, the rows chosen so far form an exact
/// cover. Secondary columns never enter the master ring: they may be covered
/// at most once through a chosen row, but are never branch-selectable and
/// never required for termination.
///
/// Nodes are allocated once by [`add_row`] and never freed during a search;
/// [`cover`] and [`uncover`] only manipulate ring membership. The structure
/// is exclusively owned by one in-flight search and must not be mutated
/// concurrently.
///
/// [`add_row`]: `Matrix::add_row`
/// [`cover`]: `Matrix::cover`
/// [`uncover`]: `Matrix::uncover`
pub(crate) struct Matrix {
    /// The headers and row nodes, quadruple-linked through their indices.
    nodes: Vec<Node>,
    /// The number of nodes currently linked into each column's vertical ring,
    /// indexed by column. Entry 0 belongs to the master header and stays 0.
    ///
    /// This table corresponds to the `S` member in Knuth's data structure.
    counts: Vec<usize>,
    /// The number of primary columns, occupying slots `1..=primary`.
    primary: usize,
    /// The number of secondary columns, occupying the slots after the
    /// primary ones.
    secondary: usize,
}

impl Matrix {
    // Setup routines.

    /// Creates an empty matrix with the given number of primary and
    /// secondary columns.
    ///
    /// To specify the rows of the matrix, use [`Self::add_row`].
    pub(crate) fn new(primary: usize, secondary: usize) -> Self {
        let mut matrix = Self {
            nodes: Vec::new(),
            counts: Vec::new(),
            primary,
            secondary,
        };
        matrix.reset(primary, secondary);
        matrix
    }

    /// Reinitializes the matrix in place, discarding all rows.
    ///
    /// The result is behaviorally identical to a fresh matrix constructed
    /// by [`Self::new`] with the same arguments: no nodes and no counts
    /// survive from the previous problem.
    pub(crate) fn reset(&mut self, primary: usize, secondary: usize) {
        let headers = primary + secondary + 1;
        self.primary = primary;
        self.secondary = secondary;
        self.nodes.clear();
        self.nodes.reserve(headers);
        self.nodes
            .extend((0..headers).map(|c| Node::header(ColumnIndex::new(c))));
        // Link the master header and the primary columns into one horizontal
        // ring, in index order. The secondary headers stay self-linked.
        for c in 1..=primary {
            self.nodes[c].left = NodeIndex::new(c - 1);
            self.nodes[c - 1].right = NodeIndex::new(c);
        }
        self.nodes[primary].right = MASTER.node();
        self.nodes[MASTER.get()].left = NodeIndex::new(primary);
        self.counts.clear();
        self.counts.resize(headers, 0);
    }

    /// Appends a row to the matrix, given the ascending 1-based identifiers
    /// of the columns it covers.
    ///
    /// The whole row is validated before any node is spliced into the rings,
    /// so a rejected row leaves the matrix untouched.
    pub(crate) fn add_row<I>(&mut self, columns: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = usize>,
    {
        let total = self.columns();
        let mut ids: SmallVec<[usize; 8]> = SmallVec::new();
        for id in columns {
            if id < 1 || id > total {
                return Err(Error::ColumnOutOfRange { id, columns: total });
            }
            match ids.last() {
                Some(&prev) if id == prev => return Err(Error::DuplicateColumn { id }),
                Some(&prev) if id < prev => return Err(Error::ColumnsOutOfOrder { id, prev }),
                _ => {}
            }
            ids.push(id);
        }
        if ids.is_empty() {
            return Err(Error::EmptyRow);
        }

        let first = NodeIndex::new(self.nodes.len());
        self.nodes.reserve(ids.len());
        for &id in &ids {
            let ix = NodeIndex::new(self.nodes.len());
            let column = ColumnIndex::new(id);
            let head = column.node();
            // Splice the new node in at the bottom of the column's vertical
            // ring, just above the header.
            let bottom = self.node(head).up;
            self.nodes.push(Node {
                left: ix,
                right: ix,
                up: bottom,
                down: head,
                column,
            });
            self.node_mut(bottom).down = ix;
            self.node_mut(head).up = ix;
            self.counts[id] += 1;
        }
        // Close the row's horizontal ring. The row nodes occupy consecutive
        // arena slots, so the links follow from their positions.
        let last = NodeIndex::new(self.nodes.len() - 1);
        for offset in 0..ids.len() {
            let ix = NodeIndex::new(first.get() + offset);
            let node = self.node_mut(ix);
            node.left = if ix == first {
                last
            } else {
                NodeIndex::new(ix.get() - 1)
            };
            node.right = if ix == last {
                first
            } else {
                NodeIndex::new(ix.get() + 1)
            };
        }
        Ok(())
    }

    // Cover and uncover, the reversible primitives of Algorithm X.

    /// Marks a column as covered: deletes its header from the master's
    /// horizontal ring, and deletes every row that intersects the column
    /// from the vertical rings of all _other_ columns that row touches.
    ///
    /// The net effect is that no remaining candidate row can cover the
    /// column a second time. Each unlink updates only the neighbors of
    /// the removed node, so a matching [`Self::uncover`] can restore the
    /// previous topology exactly.
    pub(crate) fn cover(&mut self, c: ColumnIndex) {
        let head = c.node();
        let (left, right) = {
            let header = self.node(head);
            (header.left, header.right)
        };
        self.node_mut(left).right = right;
        self.node_mut(right).left = left;
        // Walk the column top to bottom, and each row left to right.
        let mut i = self.node(head).down;
        while i != head {
            let mut j = self.node(i).right;
            while j != i {
                let (up, down, column) = {
                    let node = self.node(j);
                    (node.up, node.down, node.column)
                };
                self.node_mut(down).up = up;
                self.node_mut(up).down = down;
                self.counts[column.get()] -= 1;
                j = self.node(j).right;
            }
            i = self.node(i).down;
        }
    }

    /// Undoes the updates made by the matching [`Self::cover`] call:
    /// relinks every hidden row node into its column's vertical ring and
    /// puts the header back into the master's horizontal ring.
    ///
    /// The traversal runs bottom to top and right to left, the exact
    /// reverse of `cover`. Correctness depends on covers and uncovers
    /// nesting in strict LIFO order, which the search engine guarantees.
    pub(crate) fn uncover(&mut self, c: ColumnIndex) {
        let head = c.node();
        let mut i = self.node(head).up;
        while i != head {
            let mut j = self.node(i).left;
            while j != i {
                let (up, down, column) = {
                    let node = self.node(j);
                    (node.up, node.down, node.column)
                };
                self.counts[column.get()] += 1;
                self.node_mut(down).up = j;
                self.node_mut(up).down = j;
                j = self.node(j).left;
            }
            i = self.node(i).up;
        }
        let (left, right) = {
            let header = self.node(head);
            (header.left, header.right)
        };
        self.node_mut(left).right = head;
        self.node_mut(right).left = head;
    }

    /// Covers the columns of every node in `r`'s row other than `r` itself,
    /// cyclically from left to right.
    ///
    /// The search engine calls this after committing to row `r` as the way
    /// to cover `r`'s own column at the current depth.
    pub(crate) fn cover_siblings(&mut self, r: NodeIndex) {
        let mut j = self.node(r).right;
        while j != r {
            let column = self.node(j).column;
            self.cover(column);
            j = self.node(j).right;
        }
    }

    /// Undoes the updates made by the matching [`Self::cover_siblings`]
    /// call, traversing the row cyclically from right to left.
    pub(crate) fn uncover_siblings(&mut self, r: NodeIndex) {
        let mut j = self.node(r).left;
        while j != r {
            let column = self.node(j).column;
            self.uncover(column);
            j = self.node(j).left;
        }
    }

    /// Finds the uncovered primary column whose vertical ring is shortest,
    /// breaking ties by the first encountered while scanning the master's
    /// horizontal ring from left to right.
    ///
    /// Branching on a minimum-count column keeps the fan-out of the search
    /// tree small, and selects newly emptied columns immediately so that
    /// infeasible branches die at once.
    ///
    /// Returns [`None`] if every primary column has been covered.
    pub(crate) fn choose_column(&self) -> Option<ColumnIndex> {
        let master = MASTER.node();
        let mut best = None;
        let mut best_count = usize::MAX;
        let mut cur = self.node(master).right;
        while cur != master {
            let column = self.node(cur).column;
            let count = self.counts[column.get()];
            if count < best_count {
                // A column with no remaining rows is surely the result.
                if count == 0 {
                    return Some(column);
                }
                best_count = count;
                best = Some(column);
            }
            cur = self.node(cur).right;
        }
        best
    }

    // Accessor methods.

    /// Returns the total number of columns, primary and secondary.
    pub(crate) fn columns(&self) -> usize {
        self.primary + self.secondary
    }

    /// Returns the number of nodes currently linked into the given column's
    /// vertical ring.
    pub(crate) fn count(&self, c: ColumnIndex) -> usize {
        self.counts[c.get()]
    }

    /// Returns the next node below `ix` in its column's vertical ring.
    pub(crate) fn down(&self, ix: NodeIndex) -> NodeIndex {
        self.node(ix).down
    }

    /// Returns the column that owns the node at the given position.
    pub(crate) fn column_of(&self, ix: NodeIndex) -> ColumnIndex {
        self.node(ix).column
    }

    /// Places the 1-based identifiers of the columns covered by the row of
    /// node `r` into `result`, starting with `r`'s own column and proceeding
    /// cyclically from left to right.
    ///
    /// The resulting sequence replaces the previous contents of `result`.
    pub(crate) fn row_columns(&self, r: NodeIndex, result: &mut Vec<usize>) {
        result.clear();
        let mut j = r;
        loop {
            result.push(self.node(j).column.get());
            j = self.node(j).right;
            if j == r {
                break;
            }
        }
    }

    /// Returns a reference to the node at the given position.
    ///
    /// # Panics
    ///
    /// This function panics if the index is out of bounds.
    fn node(&self, ix: NodeIndex) -> &Node {
        &self.nodes[ix.get()]
    }

    /// Returns a mutable reference to the node at the given position.
    ///
    /// # Panics
    ///
    /// This function panics if the index is out of bounds.
    fn node_mut(&mut self, ix: NodeIndex) -> &mut Node {
        &mut self.nodes[ix.get()]
    }
}
