//! Reader for the whitespace-separated instance format.

use super::err::ProblemError;
use super::types::Problem;
use std::path::Path;

/// Reads and parses an instance file.
///
/// # Errors
///
/// Returns [`ProblemError::Io`] if the file cannot be read, or any
/// parse error reported by [`parse`].
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Problem, ProblemError> {
    let text = std::fs::read_to_string(path)?;
    parse(&text)
}

/// Parses an instance from text.
///
/// Tokens beyond the last capacity are ignored.
///
/// # Examples
///
/// ```
/// use mkp_metaheur::problem;
///
/// let p = problem::parse("4 1 20\n10 20 15 7\n5 8 6 3\n10\n").unwrap();
/// assert_eq!(p.n(), 4);
/// assert_eq!(p.best_known(), Some(20));
/// ```
pub fn parse(text: &str) -> Result<Problem, ProblemError> {
    let mut tokens = Tokens::new(text);

    let n = tokens.next_int(|| "item count".to_string())?;
    let m = tokens.next_int(|| "knapsack count".to_string())?;
    let best_known = tokens.next_int(|| "best known value".to_string())?;
    if n <= 0 || m <= 0 {
        return Err(ProblemError::EmptyInstance { n, m });
    }
    let (n, m) = (n as usize, m as usize);

    let profits = (0..n)
        .map(|j| tokens.next_int(|| format!("profit {j}")))
        .collect::<Result<Vec<_>, _>>()?;

    let constraints = (0..m)
        .map(|i| {
            (0..n)
                .map(|j| tokens.next_int(|| format!("constraint ({i}, {j})")))
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    let capacities = (0..m)
        .map(|i| tokens.next_int(|| format!("capacity {i}")))
        .collect::<Result<Vec<_>, _>>()?;

    Problem::new(profits, constraints, capacities, best_known)
}

struct Tokens<'a> {
    inner: std::str::SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_whitespace(),
        }
    }

    fn next_int<F: Fn() -> String>(&mut self, field: F) -> Result<i64, ProblemError> {
        let token = self
            .inner
            .next()
            .ok_or_else(|| ProblemError::MissingToken { field: field() })?;
        token
            .parse::<i64>()
            .map_err(|source| ProblemError::InvalidInteger {
                field: field(),
                token: token.to_string(),
                source,
            })
    }
}
