//! The following program counts all ways to place $n$ nonattacking queens
//! on an $n\times n$ chessboard, by encoding the task as a generalized
//! exact cover problem in the manner of D. E. Knuth's "Dancing links"
//! paper, [arXiv:cs/0011047][dl] \[cs.DS\] (2000), Section 2.
//!
//! Each rank and each file must hold exactly one queen, so they become the
//! $2n$ primary columns. A diagonal, on the other hand, may hold at most
//! one queen but can also stay empty; the $2(2n-1)$ diagonals are therefore
//! secondary columns. Placing a queen on square $(r,f)$ is a row covering
//! its rank, its file and the two diagonals through the square.
//!
//! [dl]: https://arxiv.org/pdf/cs/0011047.pdf

use std::ops::ControlFlow;

use dlx_cover::Solver;

const N: usize = 8;

/// The column identifier of rank `r`, for `1 <= r <= N`.
fn rank(r: usize) -> usize {
    r
}

/// The column identifier of file `f`, for `1 <= f <= N`.
fn file(f: usize) -> usize {
    N + f
}

/// The column identifier of the upward diagonal through `(r, f)`.
fn diagonal(r: usize, f: usize) -> usize {
    2 * N + (r + f - 1)
}

/// The column identifier of the downward diagonal through `(r, f)`.
fn antidiagonal(r: usize, f: usize) -> usize {
    (4 * N - 1) + (r + N - f)
}

fn main() {
    let primary = 2 * N;
    let secondary = 2 * (2 * N - 1);
    let mut solver = Solver::new(primary, secondary);
    for r in 1..=N {
        for f in 1..=N {
            // The four identifiers are ascending by construction: ranks
            // come before files, files before diagonals.
            let row = [rank(r), file(f), diagonal(r, f), antidiagonal(r, f)];
            solver.add_row(row).expect("queen placement should be a valid row");
        }
    }

    let mut placements = Vec::new();
    let mut row = Vec::new();
    let mut count = 0usize;
    solver.solve(|mut solution| {
        assert_eq!(solution.row_count(), N);
        // Convert the chosen rows back into board squares. Each reported
        // row contains its rank and file identifiers, in some cyclic order.
        placements.clear();
        while solution.next(&mut row) {
            let r = row.iter().find(|&&id| id <= N).copied().unwrap();
            let f = row.iter().find(|&&id| id > N && id <= 2 * N).copied().unwrap() - N;
            placements.push((r, f));
        }
        placements.sort_unstable();
        count += 1;
        println!("{placements:?}");
        ControlFlow::Continue(())
    });
    // There are 92 solutions for the standard 8x8 board.
    println!("{count} placements of {N} queens");
}
