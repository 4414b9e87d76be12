// The following doc comment is kept in sync with the README.md file. Please
// run the `cargo sync-readme` command after modifying the comment contents.
//! This crate provides an implementation of D. E. Knuth's dancing links
//! technique for solving the generalized exact cover problem.
//!
//! Suppose we're given a 0–1 matrix whose columns fall into one of two
//! categories: _primary_ and _secondary_. The generalized exact cover
//! problem is to find all subsets of rows such that each primary column
//! contains a 1 in exactly one chosen row, and each secondary column in
//! at most one. Knuth proposed a method that achieves this goal in the
//! paper "Dancing Links", [arXiv:cs/0011047][dl] \[cs.DS\] (2000), whose
//! title refers to a clever yet simple technique for deleting and restoring
//! the nodes of a doubly linked list. His backtracking scheme, called
//! _Algorithm X_, employs this "waltzing" of links to visit all exact
//! covers in a recursive, depth-first manner; the combination of the two
//! is commonly known as _DLX_. [For further information, see Section
//! 7.2.2.1 of [_The Art of Computer Programming_ **4B** (2022)][taocp4b],
//! Part 2, 65–70.]
//!
//! The [`Solver`] structure is the crate's entry point. Each "1" entry of
//! the matrix becomes a node in a quadruple-linked arena: every node is a
//! member of a circular horizontal ring (its row) and a circular vertical
//! ring (its column, run through by that column's header). A header keeps
//! a live count of its vertical ring, and a reserved _master_ header links
//! together the columns that still need to be covered. Branching always
//! selects an uncovered primary column of minimum live count, which keeps
//! the fan-out of the search tree small. Removing a node from a ring only
//! rewrites its neighbors' links, so backtracking can restore the previous
//! state exactly, in time proportional to the work being undone.
//!
//! # Example
//!
//! Consider the toy problem that Knuth used to introduce the technique:
//! cover the primary columns $1,\ldots,7$ with some of the rows
//! $\\{1,4,7\\}$, $\\{1,4\\}$, $\\{4,5,7\\}$, $\\{3,5,6\\}$,
//! $\\{2,3,6,7\\}$ and $\\{2,7\\}$. The following program finds the unique
//! solution $\\{1,4\\}$, $\\{3,5,6\\}$, $\\{2,7\\}$:
//!
//! ```
//! use std::ops::ControlFlow;
//! use dlx_cover::Solver;
//!
//! let mut solver = Solver::new(7, 0);
//! solver.add_row([1, 4, 7])?;
//! solver.add_row([1, 4])?;
//! solver.add_row([4, 5, 7])?;
//! solver.add_row([3, 5, 6])?;
//! solver.add_row([2, 3, 6, 7])?;
//! solver.add_row([2, 7])?;
//!
//! // We use an auxiliary table to store the columns of a row. The chief
//! // purpose of this reserved storage is to reduce heap allocations when
//! // reporting the solutions to an exact cover problem.
//! let mut row = Vec::new();
//! let mut count = 0;
//! solver.solve(|mut solution| {
//!     assert_eq!(solution.row_count(), 3);
//!     let mut rows = Vec::new();
//!     while solution.next(&mut row) {
//!         let mut ids = row.clone();
//!         ids.sort_unstable();
//!         rows.push(ids);
//!     }
//!     rows.sort();
//!     assert_eq!(rows, [vec![1, 4], vec![2, 7], vec![3, 5, 6]]);
//!     count += 1;
//!     ControlFlow::Continue(())
//! });
//! assert_eq!(count, 1);
//! # Ok::<(), dlx_cover::Error>(())
//! ```
//!
//! Secondary columns need not be covered at all, which makes them a natural
//! fit for "at most once" constraints such as the diagonals of an n-queens
//! board; see the [`demos`] directory for complete programs.
//!
//! [dl]: https://arxiv.org/pdf/cs/0011047.pdf
//! [taocp4b]: https://www-cs-faculty.stanford.edu/~knuth/taocp.html#vol4
//! [`demos`]: https://github.com/kpfp/dlx-cover/tree/main/demos

mod error;
mod indices;
mod matrix;
mod search;

pub use error::Error;
pub use search::{Solution, Solver};
