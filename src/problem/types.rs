//! The immutable instance type.

use super::err::ProblemError;

/// A 0/1 multidimensional knapsack instance.
///
/// Constraint coefficients are stored item-major, so the `m` coefficients
/// of one item are contiguous. Every incremental solution update touches
/// exactly one item's column, which keeps those updates in a single
/// cache line for typical `m`.
///
/// # Examples
///
/// ```
/// use mkp_metaheur::problem::Problem;
///
/// let problem = Problem::new(
///     vec![10, 20, 15, 7],
///     vec![vec![5, 8, 6, 3]],
///     vec![10],
///     0,
/// )
/// .unwrap();
/// assert_eq!(problem.n(), 4);
/// assert_eq!(problem.m(), 1);
/// assert_eq!(problem.weight(0, 1), 8);
/// assert_eq!(problem.best_known(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Problem {
    n: usize,
    m: usize,
    profits: Vec<i64>,
    /// `weights[item * m + dim]`.
    weights: Vec<i64>,
    capacities: Vec<i64>,
    best_known: i64,
}

impl Problem {
    /// Builds an instance from a profit vector, an `m × n` constraint
    /// matrix given row by row (one row per knapsack dimension), and a
    /// capacity vector.
    ///
    /// `best_known` is metadata only; `0` means unknown.
    ///
    /// # Errors
    ///
    /// Returns [`ProblemError`] when the instance is empty, when the
    /// matrix shape disagrees with the vectors, or when a coefficient or
    /// capacity is negative.
    pub fn new(
        profits: Vec<i64>,
        constraints: Vec<Vec<i64>>,
        capacities: Vec<i64>,
        best_known: i64,
    ) -> Result<Self, ProblemError> {
        let n = profits.len();
        let m = capacities.len();
        if n == 0 || m == 0 {
            return Err(ProblemError::EmptyInstance {
                n: n as i64,
                m: m as i64,
            });
        }
        if constraints.len() != m {
            return Err(ProblemError::DimensionMismatch {
                what: "constraint matrix",
                expected: m,
                found: constraints.len(),
            });
        }

        let mut weights = vec![0i64; n * m];
        for (dim, row) in constraints.iter().enumerate() {
            if row.len() != n {
                return Err(ProblemError::DimensionMismatch {
                    what: "constraint row",
                    expected: n,
                    found: row.len(),
                });
            }
            for (item, &w) in row.iter().enumerate() {
                if w < 0 {
                    return Err(ProblemError::NegativeWeight {
                        dimension: dim,
                        item,
                        value: w,
                    });
                }
                weights[item * m + dim] = w;
            }
        }
        if let Some((dim, &c)) = capacities.iter().enumerate().find(|(_, &c)| c < 0) {
            return Err(ProblemError::NegativeCapacity {
                dimension: dim,
                value: c,
            });
        }

        Ok(Self {
            n,
            m,
            profits,
            weights,
            capacities,
            best_known,
        })
    }

    /// Number of items.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of knapsack dimensions.
    #[inline]
    pub fn m(&self) -> usize {
        self.m
    }

    /// Profit of `item`.
    #[inline]
    pub fn profit(&self, item: usize) -> i64 {
        self.profits[item]
    }

    /// All item profits.
    pub fn profits(&self) -> &[i64] {
        &self.profits
    }

    /// Amount of dimension `dim` consumed by `item`.
    #[inline]
    pub fn weight(&self, dim: usize, item: usize) -> i64 {
        self.weights[item * self.m + dim]
    }

    /// The `m` coefficients of `item`, one per dimension.
    #[inline]
    pub fn item_weights(&self, item: usize) -> &[i64] {
        &self.weights[item * self.m..(item + 1) * self.m]
    }

    /// Capacity of dimension `dim`.
    #[inline]
    pub fn capacity(&self, dim: usize) -> i64 {
        self.capacities[dim]
    }

    /// All capacities.
    pub fn capacities(&self) -> &[i64] {
        &self.capacities
    }

    /// Best known objective value, if the instance records one.
    pub fn best_known(&self) -> Option<i64> {
        (self.best_known != 0).then_some(self.best_known)
    }

    /// Relative gap between `value` and the best known value,
    /// `(best - value) / best`. `None` when no best value is recorded.
    pub fn gap(&self, value: i64) -> Option<f64> {
        self.best_known()
            .map(|best| (best - value) as f64 / best as f64)
    }
}

impl std::fmt::Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Problem data:")?;
        write!(f, "{} objects, {} knapsacks", self.n, self.m)?;
        if let Some(best) = self.best_known() {
            write!(f, ", best known value: {best}")?;
        }
        writeln!(f)?;
        writeln!(f)?;

        writeln!(f, "Object profits:")?;
        for p in &self.profits {
            write!(f, "{p} ")?;
        }
        writeln!(f)?;
        writeln!(f)?;

        writeln!(f, "Constraint matrix:")?;
        for dim in 0..self.m {
            for item in 0..self.n - 1 {
                write!(f, "{} * x{} + ", self.weight(dim, item), item)?;
            }
            writeln!(
                f,
                "{} * x{} <= {}",
                self.weight(dim, self.n - 1),
                self.n - 1,
                self.capacities[dim]
            )?;
        }
        Ok(())
    }
}
