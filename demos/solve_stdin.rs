//! A minimal text-based driver around [`dlx_cover::Solver`], compatible
//! with the classic input convention for exact cover programs: the first
//! two tokens give the number of columns and rows; each subsequent row
//! gives a count followed by that many ascending column indices, all
//! whitespace-separated. Every column is treated as primary.
//!
//! Each solution is printed on one line, with the columns of each chosen
//! row parenthesized. For example, Knuth's seven-column toy problem
//!
//! ```text
//! 7 6
//! 3 1 4 7
//! 2 1 4
//! 3 4 5 7
//! 3 3 5 6
//! 4 2 3 6 7
//! 2 2 7
//! ```
//!
//! produces the single line `(1 4) (5 6 3) (2 7)`.

use std::error::Error;
use std::io::{self, Read};
use std::ops::ControlFlow;

use dlx_cover::Solver;

fn main() -> Result<(), Box<dyn Error>> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    let mut tokens = input.split_whitespace();
    let mut next = || -> Result<usize, Box<dyn Error>> {
        let token = tokens.next().ok_or("unexpected end of input")?;
        Ok(token.parse()?)
    };

    let columns = next()?;
    let rows = next()?;
    let mut solver = Solver::new(columns, 0);
    for _ in 0..rows {
        let count = next()?;
        let ids: Vec<usize> = (0..count).map(|_| next()).collect::<Result<_, _>>()?;
        solver.add_row(ids)?;
    }

    let mut row = Vec::new();
    solver.solve(|mut solution| {
        let mut line = String::new();
        while solution.next(&mut row) {
            if !line.is_empty() {
                line.push(' ');
            }
            line.push('(');
            for (i, id) in row.iter().enumerate() {
                if i > 0 {
                    line.push(' ');
                }
                line.push_str(&id.to_string());
            }
            line.push(')');
        }
        println!("{line}");
        ControlFlow::Continue(())
    });
    Ok(())
}
