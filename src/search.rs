use std::ops::ControlFlow;

use log::{debug, trace};

use crate::error::Error;
use crate::indices::NodeIndex;
use crate::matrix::Matrix;

/// Visits all solutions to a generalized exact cover problem by means of
/// dancing links.
///
/// The solver owns a [matrix](`crate::matrix::Matrix`) whose rows mark the
/// columns they cover, and enumerates every subset of rows that covers each
/// primary column exactly once and each secondary column at most once. The
/// search is the depth-first branch-and-bound procedure Knuth called
/// Algorithm X in the paper "Dancing links", [arXiv:cs/0011047][dl]
/// \[cs.DS\] (2000): branch on an uncovered primary column of minimum live count,
/// commit to each of its rows in turn, and undo every link operation in
/// reverse order on backtracking.
///
/// See the [crate-level documentation](`crate`) for a worked example.
///
/// [dl]: https://arxiv.org/pdf/cs/0011047.pdf
pub struct Solver {
    /// The quadruple-linked problem matrix.
    matrix: Matrix,
    /// A stack of row nodes chosen at depths `0..k`, used for backtracking
    /// and for reporting solutions.
    choices: Vec<NodeIndex>,
}

impl Solver {
    /// Creates a solver for an exact cover problem with the given number of
    /// primary and secondary columns.
    ///
    /// Primary columns must be covered exactly once by any solution;
    /// secondary columns at most once. Columns are identified by their
    /// 1-based position, primaries first.
    ///
    /// To specify the rows of the problem, use [`Self::add_row`].
    #[must_use]
    pub fn new(primary: usize, secondary: usize) -> Self {
        Self {
            matrix: Matrix::new(primary, secondary),
            choices: Vec::new(),
        }
    }

    /// Appends a row to the problem, given the identifiers of the columns
    /// it covers in strictly ascending order.
    ///
    /// # Errors
    ///
    /// Fails if an identifier is out of range, repeated, or out of order,
    /// or if the row covers no columns; see [`Error`]. A rejected row
    /// leaves the problem unchanged.
    pub fn add_row<I>(&mut self, columns: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = usize>,
    {
        self.matrix.add_row(columns)
    }

    /// Reinitializes the solver for a new problem with the given dimensions,
    /// discarding all rows.
    ///
    /// The result behaves exactly like a freshly constructed solver: no
    /// nodes, counts or recorded choices survive from the previous problem.
    pub fn reset(&mut self, primary: usize, secondary: usize) {
        self.matrix.reset(primary, secondary);
        self.choices.clear();
    }

    /// Calls a closure on each solution to the exact cover problem, in
    /// depth-first discovery order.
    ///
    /// The enumeration continues until the closure returns
    /// [`ControlFlow::Break`] or all solutions have been visited, whichever
    /// occurs first. In both cases the matrix is restored to its pre-search
    /// state, so the solver may be run again or [reset](`Self::reset`).
    ///
    /// A problem with zero primary columns is degenerate but valid: the
    /// closure is called once with an empty solution.
    ///
    /// The recursion depth is bounded by the number of primary columns.
    /// For instances where that bound strains the call stack, use
    /// [`Self::solve_iterative`].
    pub fn solve<F>(&mut self, mut visit: F)
    where
        F: FnMut(Solution<'_>) -> ControlFlow<()>,
    {
        debug_assert!(self.choices.is_empty());
        let _ = self.branch(&mut visit);
        debug_assert!(self.choices.is_empty());
    }

    /// Performs the branch step of Algorithm X at one level of recursion.
    ///
    /// Covers the chosen column, tries each of its rows in turn with the
    /// sibling columns covered left to right, and undoes every operation
    /// in reverse order before returning. Propagates [`ControlFlow::Break`]
    /// from the visit closure while still unwinding the covers on the way
    /// out.
    fn branch<F>(&mut self, visit: &mut F) -> ControlFlow<()>
    where
        F: FnMut(Solution<'_>) -> ControlFlow<()>,
    {
        let c = match self.matrix.choose_column() {
            Some(c) => c,
            None => {
                // The master ring is empty: every primary column is covered
                // exactly once by the rows chosen so far.
                debug!("found an exact cover of {} rows", self.choices.len());
                return visit(Solution {
                    solver: self,
                    level: 0,
                });
            }
        };
        trace!(
            "branching on column {} ({} candidate rows)",
            c.get(),
            self.matrix.count(c)
        );
        self.matrix.cover(c);
        // If the column has no candidate rows, the loop body never runs and
        // the branch degenerates to an immediate uncover: a dead end.
        let head = c.node();
        let mut flow = ControlFlow::Continue(());
        let mut r = self.matrix.down(head);
        while r != head {
            self.choices.push(r);
            self.matrix.cover_siblings(r);
            flow = self.branch(visit);
            self.matrix.uncover_siblings(r);
            self.choices.pop();
            if flow.is_break() {
                break;
            }
            r = self.matrix.down(r);
        }
        self.matrix.uncover(c);
        flow
    }

    /// Like [`Self::solve`], but drives the search with an explicit stack
    /// of resume nodes instead of recursion.
    ///
    /// The enumeration order and the visit contract are identical; only
    /// the control structure differs. Prefer this entry point for instances
    /// whose primary-column count risks exhausting the call stack.
    pub fn solve_iterative<F>(&mut self, mut visit: F)
    where
        F: FnMut(Solution<'_>) -> ControlFlow<()>,
    {
        debug_assert!(self.choices.is_empty());
        'outer: loop {
            // Descend: keep covering columns until a dead end or a solution.
            loop {
                match self.matrix.choose_column() {
                    Some(c) => {
                        trace!(
                            "branching on column {} ({} candidate rows)",
                            c.get(),
                            self.matrix.count(c)
                        );
                        self.matrix.cover(c);
                        let head = c.node();
                        let r = self.matrix.down(head);
                        if r == head {
                            // The column has no candidate rows left.
                            self.matrix.uncover(c);
                            break;
                        }
                        self.choices.push(r);
                        self.matrix.cover_siblings(r);
                    }
                    None => {
                        debug!("found an exact cover of {} rows", self.choices.len());
                        let flow = visit(Solution {
                            solver: self,
                            level: 0,
                        });
                        if flow.is_break() {
                            // Unwind all covers in LIFO order so the solver
                            // can be reused.
                            while let Some(r) = self.choices.pop() {
                                self.matrix.uncover_siblings(r);
                                let column = self.matrix.column_of(r);
                                self.matrix.uncover(column);
                            }
                            return;
                        }
                        break;
                    }
                }
            }
            // Backtrack: advance the most recent choice to the next row in
            // its column, undoing covers until such a row exists.
            while let Some(r) = self.choices.pop() {
                self.matrix.uncover_siblings(r);
                let column = self.matrix.column_of(r);
                let next = self.matrix.down(r);
                if next != column.node() {
                    self.choices.push(next);
                    self.matrix.cover_siblings(next);
                    continue 'outer;
                }
                self.matrix.uncover(column);
            }
            // The entire search tree has been explored.
            return;
        }
    }
}

/// An iterator over the rows of one solution to an exact cover problem,
/// in the order the search chose them.
///
/// A value of this type is handed to the closure passed to
/// [`Solver::solve`]; it borrows the solver, so it cannot outlive the
/// closure call.
pub struct Solution<'s> {
    /// The solver that found the exact cover.
    solver: &'s Solver,
    /// The recursion depth of the next row to report; see [`Self::next`].
    level: usize,
}

impl<'s> Solution<'s> {
    /// Places the 1-based column identifiers covered by the next chosen row
    /// into `result`, starting with the column the row was chosen for and
    /// proceeding cyclically from left to right.
    ///
    /// Returns `false` and leaves the vector untouched if and only if all
    /// rows have already been enumerated.
    pub fn next(&mut self, result: &mut Vec<usize>) -> bool {
        if let Some(&r) = self.solver.choices.get(self.level) {
            self.level += 1;
            self.solver.matrix.row_columns(r, result);
            true
        } else {
            false
        }
    }

    /// Returns the number of rows in the solution.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.solver.choices.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Collects every solution as a sorted list of sorted rows, each row
    /// being the set of column identifiers it covers.
    fn collect(solver: &mut Solver, iterative: bool) -> Vec<Vec<Vec<usize>>> {
        let mut all = Vec::new();
        let visit = |mut solution: Solution<'_>| {
            let mut rows = Vec::new();
            let mut row = Vec::new();
            while solution.next(&mut row) {
                let mut ids = row.clone();
                ids.sort_unstable();
                rows.push(ids);
            }
            assert_eq!(rows.len(), solution.row_count());
            rows.sort();
            all.push(rows);
            ControlFlow::Continue(())
        };
        if iterative {
            solver.solve_iterative(visit);
        } else {
            solver.solve(visit);
        }
        all.sort();
        all
    }

    /// Counts the exact covers of a problem by checking every subset of rows.
    fn brute_force_count(primary: usize, secondary: usize, rows: &[Vec<usize>]) -> usize {
        let mut count = 0;
        for subset in 0..1u32 << rows.len() {
            let mut times = vec![0usize; primary + secondary + 1];
            for (i, row) in rows.iter().enumerate() {
                if subset & (1 << i) != 0 {
                    for &id in row {
                        times[id] += 1;
                    }
                }
            }
            let primary_ok = times[1..=primary].iter().all(|&t| t == 1);
            let secondary_ok = times[primary + 1..].iter().all(|&t| t <= 1);
            if primary_ok && secondary_ok {
                count += 1;
            }
        }
        count
    }

    fn scenario_a() -> Solver {
        let mut solver = Solver::new(7, 0);
        solver.add_row([1, 4, 7]).unwrap();
        solver.add_row([1, 4]).unwrap();
        solver.add_row([4, 5, 7]).unwrap();
        solver.add_row([3, 5, 6]).unwrap();
        solver.add_row([2, 3, 6, 7]).unwrap();
        solver.add_row([2, 7]).unwrap();
        solver
    }

    /// A small instance with more than one exact cover.
    fn multi_solution() -> (Solver, Vec<Vec<usize>>) {
        let rows = vec![
            vec![1],
            vec![2],
            vec![3],
            vec![1, 2],
            vec![2, 3],
            vec![1, 2, 3],
            vec![1, 3],
        ];
        let mut solver = Solver::new(3, 0);
        for row in &rows {
            solver.add_row(row.iter().copied()).unwrap();
        }
        (solver, rows)
    }

    #[test]
    fn scenario_a_has_unique_solution() {
        let expected = vec![vec![vec![1, 4], vec![2, 7], vec![3, 5, 6]]];
        let mut solver = scenario_a();
        assert_eq!(collect(&mut solver, false), expected);
        assert_eq!(collect(&mut solver, true), expected);
    }

    #[test]
    fn rows_are_reported_from_the_chosen_column() {
        // The search branches on column 1 first, then covers column 5 with
        // row {3,5,6} and column 2 with row {2,7}; each reported row starts
        // at the column it was chosen for and wraps around to the left.
        let mut solver = scenario_a();
        let mut count = 0;
        solver.solve(|mut solution| {
            let mut row = Vec::new();
            assert!(solution.next(&mut row));
            assert_eq!(row, [1, 4]);
            assert!(solution.next(&mut row));
            assert_eq!(row, [5, 6, 3]);
            assert!(solution.next(&mut row));
            assert_eq!(row, [2, 7]);
            assert!(!solution.next(&mut row));
            count += 1;
            ControlFlow::Continue(())
        });
        assert_eq!(count, 1);
    }

    #[test]
    fn secondary_column_may_stay_uncovered() {
        // Scenario B: primary {1, 2}, secondary {3}.
        let mut solver = Solver::new(2, 1);
        solver.add_row([1, 3]).unwrap();
        solver.add_row([2]).unwrap();
        let expected = vec![vec![vec![1, 3], vec![2]]];
        assert_eq!(collect(&mut solver, false), expected);
        assert_eq!(collect(&mut solver, true), expected);
    }

    #[test]
    fn secondary_column_is_never_covered_twice() {
        let mut solver = Solver::new(2, 1);
        solver.add_row([1, 3]).unwrap();
        solver.add_row([2, 3]).unwrap();
        solver.add_row([2]).unwrap();
        // {1,3} with {2,3} would cover column 3 twice, so the only exact
        // cover is {1,3} with {2}.
        let expected = vec![vec![vec![1, 3], vec![2]]];
        assert_eq!(collect(&mut solver, false), expected);
        assert_eq!(collect(&mut solver, true), expected);
    }

    #[test]
    fn infeasible_instance_reports_no_solutions() {
        // Scenario C: column 2 is never covered.
        let mut solver = Solver::new(2, 0);
        solver.add_row([1]).unwrap();
        solver.add_row([1]).unwrap();
        assert_eq!(collect(&mut solver, false), Vec::<Vec<Vec<usize>>>::new());
        assert_eq!(collect(&mut solver, true), Vec::<Vec<Vec<usize>>>::new());
    }

    #[test]
    fn zero_primary_columns_reports_one_empty_solution() {
        let mut solver = Solver::new(0, 2);
        solver.add_row([1]).unwrap();
        let mut count = 0;
        solver.solve(|solution| {
            assert_eq!(solution.row_count(), 0);
            count += 1;
            ControlFlow::Continue(())
        });
        assert_eq!(count, 1);

        count = 0;
        solver.solve_iterative(|mut solution| {
            let mut row = Vec::new();
            assert!(!solution.next(&mut row));
            count += 1;
            ControlFlow::Continue(())
        });
        assert_eq!(count, 1);
    }

    #[test]
    fn enumeration_is_exhaustive() {
        let (mut solver, rows) = multi_solution();
        let expected = brute_force_count(3, 0, &rows);
        assert_eq!(collect(&mut solver, false).len(), expected);
        assert_eq!(collect(&mut solver, true).len(), expected);
    }

    #[test]
    fn enumeration_is_exhaustive_with_secondary_columns() {
        let rows = vec![
            vec![1, 3],
            vec![2, 3],
            vec![1, 4],
            vec![2],
            vec![1, 2],
            vec![2, 3, 4],
        ];
        let mut solver = Solver::new(2, 2);
        for row in &rows {
            solver.add_row(row.iter().copied()).unwrap();
        }
        let expected = brute_force_count(2, 2, &rows);
        assert_eq!(collect(&mut solver, false).len(), expected);
        assert_eq!(collect(&mut solver, true).len(), expected);
    }

    #[test]
    fn recursive_and_iterative_agree() {
        let (mut solver, _) = multi_solution();
        let recursive = collect(&mut solver, false);
        let iterative = collect(&mut solver, true);
        assert!(!recursive.is_empty());
        assert_eq!(recursive, iterative);
    }

    #[test]
    fn break_cancels_the_enumeration() {
        let (mut solver, _) = multi_solution();
        let total = collect(&mut solver, false).len();
        assert!(total > 1);

        for iterative in [false, true] {
            let mut seen = 0;
            let visit = |_: Solution<'_>| {
                seen += 1;
                ControlFlow::Break(())
            };
            if iterative {
                solver.solve_iterative(visit);
            } else {
                solver.solve(visit);
            }
            assert_eq!(seen, 1);
            // The matrix was fully restored, so a second run still finds
            // every solution.
            assert_eq!(collect(&mut solver, iterative).len(), total);
        }
    }

    #[test]
    fn reset_gives_a_fresh_problem() {
        let mut solver = scenario_a();
        let first = collect(&mut solver, false);

        solver.reset(7, 0);
        let mut count = 0;
        solver.solve(|_| {
            count += 1;
            ControlFlow::Continue(())
        });
        // No rows yet, so no exact cover of the seven primary columns.
        assert_eq!(count, 0);

        solver.add_row([1, 4, 7]).unwrap();
        solver.add_row([1, 4]).unwrap();
        solver.add_row([4, 5, 7]).unwrap();
        solver.add_row([3, 5, 6]).unwrap();
        solver.add_row([2, 3, 6, 7]).unwrap();
        solver.add_row([2, 7]).unwrap();
        assert_eq!(collect(&mut solver, false), first);
    }

    #[test]
    fn solving_twice_is_idempotent() {
        let mut solver = scenario_a();
        let first = collect(&mut solver, false);
        let second = collect(&mut solver, false);
        assert_eq!(first, second);
    }
}
