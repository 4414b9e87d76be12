/// The position of a column header in the arena of a [`Matrix`].
///
/// Position 0 always refers to the master header, which anchors the
/// horizontal list of uncovered primary columns; the positions `1..=n`
/// of the remaining headers double as the 1-based column identifiers
/// visible to callers.
///
/// [`Matrix`]: `crate::matrix::Matrix`
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
#[repr(transparent)]
pub struct ColumnIndex(usize);

impl ColumnIndex {
    /// Creates a new index.
    #[must_use]
    pub const fn new(ix: usize) -> Self {
        Self(ix)
    }

    /// Returns the index value as a primitive type.
    ///
    /// For a nonmaster header this is also the column's 1-based identifier.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Returns the arena slot occupied by this column's header node.
    ///
    /// Headers occupy the first `columns + 1` slots of the node arena,
    /// so the conversion is a plain reinterpretation of the index value.
    #[must_use]
    pub const fn node(self) -> NodeIndex {
        NodeIndex::new(self.0)
    }
}

/// The position of the master header in the arena of a [`Matrix`];
/// Knuth called this the _root_ in the paper "Dancing links",
/// [arXiv:cs/0011047][dl] \[cs.DS\] (2000).
///
/// [`Matrix`]: `crate::matrix::Matrix`
/// [dl]: https://arxiv.org/pdf/cs/0011047.pdf
pub const MASTER: ColumnIndex = ColumnIndex::new(0);

/// The position of a node in the arena of a [`Matrix`], be it a column
/// header or an interior node of some row.
///
/// In contrast to [`ColumnIndex`], a `NodeIndex` may refer to any record
/// in the arena. The two index spaces coincide on the header slots.
///
/// [`Matrix`]: `crate::matrix::Matrix`
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
#[repr(transparent)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// Creates a new index.
    #[must_use]
    pub const fn new(ix: usize) -> Self {
        Self(ix)
    }

    /// Returns the index value as a primitive type.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_get() {
        assert_eq!(ColumnIndex::new(0).get(), 0);
        assert_eq!(ColumnIndex::new(123).get(), 123);

        assert_eq!(NodeIndex::new(0).get(), 0);
        assert_eq!(NodeIndex::new(87935).get(), 87935);
    }

    #[test]
    fn column_to_node() {
        assert_eq!(MASTER.node(), NodeIndex::new(0));
        assert_eq!(ColumnIndex::new(7).node(), NodeIndex::new(7));
    }
}
