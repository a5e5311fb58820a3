//! Binomial asset and option trees.
//!
//! Both trees are stored as square `(periods + 1) × (periods + 1)` grids
//! indexed `[row][col]`, where `col` is the period and `row` the number of
//! down moves. Only the upper triangle `row <= col` is populated.

use std::fmt;

use super::error::LatticeError;
use crate::instruments::{ExerciseStyle, OptionRight};

/// Largest number of periods a tree may have; both grids are
/// `(periods + 1)²` values.
pub const MAX_PERIODS: usize = 5_000;

/// Inputs shared by the asset tree and every option priced on it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeParams {
    /// Spot price at the root
    pub spot: f64,
    /// Annualised volatility
    pub volatility: f64,
    /// Continuously compounded risk-free rate
    pub rate: f64,
    /// Continuous dividend yield
    pub dividend: f64,
    /// Time to expiry in years
    pub years: f64,
    /// Number of periods in the tree
    pub periods: usize,
}

impl TreeParams {
    /// Reject inputs that cannot produce a finite tree.
    pub fn validate(&self) -> Result<(), LatticeError> {
        if self.periods == 0 {
            return Err(LatticeError::ZeroPeriods);
        }
        if self.periods > MAX_PERIODS {
            return Err(LatticeError::TooManyPeriods {
                periods: self.periods,
                max: MAX_PERIODS,
            });
        }
        for (name, value) in [
            ("spot", self.spot),
            ("volatility", self.volatility),
            ("years", self.years),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(LatticeError::InvalidParameter { name, value });
            }
        }
        for (name, value) in [("rate", self.rate), ("dividend", self.dividend)] {
            if !value.is_finite() {
                return Err(LatticeError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }

    /// Length of one period, `years / periods`.
    #[inline]
    pub fn step(&self) -> f64 {
        self.years / self.periods as f64
    }
}

/// Recombining tree of asset prices.
#[derive(Debug, Clone, PartialEq)]
pub struct BinomialTree {
    params: TreeParams,
    up: f64,
    down: f64,
    probability: f64,
    nodes: Vec<Vec<f64>>,
}

impl BinomialTree {
    /// Build the asset tree.
    ///
    /// # Errors
    /// - `LatticeError::ZeroPeriods` / `TooManyPeriods` / `InvalidParameter`
    ///   from validation
    /// - `LatticeError::InvalidProbability` if p* is not in `[0, 1]`
    pub fn new(params: TreeParams) -> Result<Self, LatticeError> {
        params.validate()?;
        let h = params.step();
        let carry = (params.rate - params.dividend) * h;
        let spread = params.volatility * h.sqrt();
        let up = (carry + spread).exp();
        let down = (carry - spread).exp();
        let probability = (carry.exp() - down) / (up - down);
        if !(0.0..=1.0).contains(&probability) {
            return Err(LatticeError::InvalidProbability { probability });
        }

        let n = params.periods;
        let mut nodes = vec![vec![0.0; n + 1]; n + 1];
        for col in 0..=n {
            for row in 0..=col {
                nodes[row][col] =
                    params.spot * up.powi((col - row) as i32) * down.powi(row as i32);
            }
        }

        tracing::debug!(periods = n, up, down, probability, "built binomial tree");
        Ok(Self {
            params,
            up,
            down,
            probability,
            nodes,
        })
    }

    /// Tree inputs.
    #[inline]
    pub fn params(&self) -> &TreeParams {
        &self.params
    }

    /// Up factor `u`.
    #[inline]
    pub fn up(&self) -> f64 {
        self.up
    }

    /// Down factor `d`.
    #[inline]
    pub fn down(&self) -> f64 {
        self.down
    }

    /// Risk-neutral up probability `p*`.
    #[inline]
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Number of periods.
    #[inline]
    pub fn periods(&self) -> usize {
        self.params.periods
    }

    /// Asset price after `col` periods with `row` down moves, or `None`
    /// outside the populated triangle.
    pub fn node(&self, row: usize, col: usize) -> Option<f64> {
        (row <= col && col <= self.params.periods).then(|| self.nodes[row][col])
    }

    /// Full grid including the unused lower triangle.
    pub fn nodes(&self) -> &[Vec<f64>] {
        &self.nodes
    }
}

fn write_triangle(f: &mut fmt::Formatter<'_>, grid: &[Vec<f64>]) -> fmt::Result {
    for (row, values) in grid.iter().enumerate() {
        for (col, value) in values.iter().enumerate() {
            if col < row {
                write!(f, "{:8}", "")?;
            } else {
                write!(f, "{:8.2}", value)?;
            }
        }
        writeln!(f)?;
    }
    Ok(())
}

impl fmt::Display for BinomialTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.params;
        writeln!(
            f,
            "Binomial tree (s = {:.2}, sigma = {:.3}, rf = {:.3}, div = {}, t = {}, periods = {})",
            p.spot, p.volatility, p.rate, p.dividend, p.years, p.periods
        )?;
        write_triangle(f, &self.nodes)
    }
}

/// Option valued by backward induction over a [`BinomialTree`].
///
/// # Examples
/// ```
/// use pricer_models::instruments::{ExerciseStyle, OptionRight};
/// use pricer_models::lattice::{BinomialOption, TreeParams};
///
/// let params = TreeParams {
///     spot: 100.0, volatility: 0.2, rate: 0.05, dividend: 0.0,
///     years: 1.0, periods: 2,
/// };
/// let call = BinomialOption::new(params, 100.0, OptionRight::Call, ExerciseStyle::European).unwrap();
/// assert!((call.value() - 10.5389).abs() < 1e-4);
///
/// let deeper = call.with_periods(500).unwrap();
/// assert!((deeper.value() - 10.4506).abs() < 0.05);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BinomialOption {
    tree: BinomialTree,
    strike: f64,
    right: OptionRight,
    exercise: ExerciseStyle,
    values: Vec<Vec<f64>>,
}

impl BinomialOption {
    /// Build the asset tree and value the option on it.
    ///
    /// # Errors
    /// Any tree construction error, or `LatticeError::InvalidParameter`
    /// for a non-positive strike.
    pub fn new(
        params: TreeParams,
        strike: f64,
        right: OptionRight,
        exercise: ExerciseStyle,
    ) -> Result<Self, LatticeError> {
        if !(strike.is_finite() && strike > 0.0) {
            return Err(LatticeError::InvalidParameter {
                name: "strike",
                value: strike,
            });
        }
        let tree = BinomialTree::new(params)?;
        let values = backward_induction(&tree, strike, right, exercise);
        Ok(Self {
            tree,
            strike,
            right,
            exercise,
            values,
        })
    }

    /// Value at the root of the tree.
    #[inline]
    pub fn value(&self) -> f64 {
        self.values[0][0]
    }

    /// Per-node option values, same layout as [`BinomialTree::nodes`].
    pub fn option_tree(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// Underlying asset tree.
    pub fn tree(&self) -> &BinomialTree {
        &self.tree
    }

    /// Strike price.
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Call or put.
    pub fn right(&self) -> OptionRight {
        self.right
    }

    /// European or American.
    pub fn exercise(&self) -> ExerciseStyle {
        self.exercise
    }

    fn rebuild(&self, params: TreeParams, strike: f64) -> Result<Self, LatticeError> {
        Self::new(params, strike, self.right, self.exercise)
    }

    /// Same option on a tree with a different spot.
    pub fn with_spot(&self, spot: f64) -> Result<Self, LatticeError> {
        self.rebuild(TreeParams { spot, ..self.tree.params }, self.strike)
    }

    /// Same option on a tree with a different volatility.
    pub fn with_volatility(&self, volatility: f64) -> Result<Self, LatticeError> {
        self.rebuild(
            TreeParams {
                volatility,
                ..self.tree.params
            },
            self.strike,
        )
    }

    /// Same option on a tree with a different number of periods.
    pub fn with_periods(&self, periods: usize) -> Result<Self, LatticeError> {
        self.rebuild(
            TreeParams {
                periods,
                ..self.tree.params
            },
            self.strike,
        )
    }

    /// Same tree with a different strike.
    pub fn with_strike(&self, strike: f64) -> Result<Self, LatticeError> {
        self.rebuild(self.tree.params, strike)
    }
}

fn backward_induction(
    tree: &BinomialTree,
    strike: f64,
    right: OptionRight,
    exercise: ExerciseStyle,
) -> Vec<Vec<f64>> {
    let n = tree.periods();
    let discount = (-tree.params.rate * tree.params.step()).exp();
    let p = tree.probability;
    let early = exercise.allows_early_exercise();

    let mut values = vec![vec![0.0; n + 1]; n + 1];
    for row in 0..=n {
        values[row][n] = right.intrinsic(tree.nodes[row][n], strike);
    }
    for col in (0..n).rev() {
        for row in 0..=col {
            let continuation =
                discount * (p * values[row][col + 1] + (1.0 - p) * values[row + 1][col + 1]);
            values[row][col] = if early {
                continuation.max(right.intrinsic(tree.nodes[row][col], strike))
            } else {
                continuation
            };
        }
    }
    values
}

impl fmt::Display for BinomialOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {}, x = {:.2}, value = ${:.2}",
            self.exercise,
            self.right,
            self.strike,
            self.value()
        )?;
        write!(f, "{}", self.tree)?;
        writeln!(f, "Option values:")?;
        write_triangle(f, &self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference(periods: usize) -> TreeParams {
        TreeParams {
            spot: 100.0,
            volatility: 0.25,
            rate: 0.04,
            dividend: 0.02,
            years: 0.5,
            periods,
        }
    }

    fn option(periods: usize, right: OptionRight, exercise: ExerciseStyle) -> BinomialOption {
        BinomialOption::new(reference(periods), 100.0, right, exercise).unwrap()
    }

    // ================================================================
    // Tree construction
    // ================================================================

    #[test]
    fn test_tree_factors() {
        let tree = BinomialTree::new(reference(3)).unwrap();
        assert_relative_eq!(tree.up(), 1.1111498787779401, epsilon = 1e-13);
        assert_relative_eq!(tree.down(), 0.9059884337666413, epsilon = 1e-13);
        assert_relative_eq!(tree.probability(), 0.47450660768583064, epsilon = 1e-13);
    }

    #[test]
    fn test_tree_nodes() {
        let tree = BinomialTree::new(reference(3)).unwrap();
        let (u, d) = (tree.up(), tree.down());
        assert_eq!(tree.node(0, 0), Some(100.0));
        assert_relative_eq!(tree.node(0, 3).unwrap(), 100.0 * u.powi(3), epsilon = 1e-10);
        assert_relative_eq!(tree.node(1, 2).unwrap(), 100.0 * u * d, epsilon = 1e-10);
        assert_relative_eq!(tree.node(3, 3).unwrap(), 100.0 * d.powi(3), epsilon = 1e-10);
        assert_eq!(tree.node(2, 1), None);
        assert_eq!(tree.node(0, 4), None);
        // Padding stays zero
        assert_eq!(tree.nodes()[2][1], 0.0);
    }

    #[test]
    fn test_tree_validation() {
        assert_eq!(
            BinomialTree::new(reference(0)).unwrap_err(),
            LatticeError::ZeroPeriods
        );
        let bad = TreeParams {
            volatility: 0.0,
            ..reference(10)
        };
        assert!(matches!(
            BinomialTree::new(bad),
            Err(LatticeError::InvalidParameter { name: "volatility", .. })
        ));
        let bad = TreeParams {
            years: -1.0,
            ..reference(10)
        };
        assert!(matches!(
            BinomialTree::new(bad),
            Err(LatticeError::InvalidParameter { name: "years", .. })
        ));
        let bad = TreeParams {
            rate: f64::NAN,
            ..reference(10)
        };
        assert!(BinomialTree::new(bad).is_err());
    }

    #[test]
    fn test_period_limit() {
        assert!(reference(MAX_PERIODS).validate().is_ok());
        assert_eq!(
            reference(MAX_PERIODS + 1).validate().unwrap_err(),
            LatticeError::TooManyPeriods {
                periods: MAX_PERIODS + 1,
                max: MAX_PERIODS
            }
        );
        // Rejected before any grid is allocated
        assert!(matches!(
            BinomialTree::new(reference(usize::MAX)),
            Err(LatticeError::TooManyPeriods { .. })
        ));
    }

    // ================================================================
    // Valuation
    // ================================================================

    #[test]
    fn test_three_period_values() {
        use ExerciseStyle::*;
        use OptionRight::*;
        assert_relative_eq!(option(3, Call, European).value(), 8.020276936232452, epsilon = 1e-10);
        assert_relative_eq!(option(3, Put, European).value(), 7.035160891991201, epsilon = 1e-10);
        assert_relative_eq!(option(3, Put, American).value(), 7.141784560589828, epsilon = 1e-10);
    }

    #[test]
    fn test_converges_to_closed_form() {
        // Closed-form values for the same inputs
        let call = option(200, OptionRight::Call, ExerciseStyle::European).value();
        let put = option(200, OptionRight::Put, ExerciseStyle::European).value();
        assert!((call - 7.442052502810462).abs() / 7.442052502810462 < 0.01);
        assert!((put - 6.456936458569174).abs() / 6.456936458569174 < 0.01);
    }

    #[test]
    fn test_american_put_dominates_european() {
        for periods in [1, 5, 50, 200] {
            let eu = option(periods, OptionRight::Put, ExerciseStyle::European).value();
            let am = option(periods, OptionRight::Put, ExerciseStyle::American).value();
            assert!(am >= eu, "periods = {}: american {} < european {}", periods, am, eu);
        }
    }

    #[test]
    fn test_american_values_floor_at_intrinsic() {
        let am = option(20, OptionRight::Put, ExerciseStyle::American);
        let tree = am.tree();
        for col in 0..=20 {
            for row in 0..=col {
                let intrinsic = OptionRight::Put.intrinsic(tree.node(row, col).unwrap(), 100.0);
                assert!(am.option_tree()[row][col] >= intrinsic - 1e-12);
            }
        }
    }

    #[test]
    fn test_with_builders_rebuild() {
        let eu = option(3, OptionRight::Call, ExerciseStyle::European);
        let higher = eu.with_spot(110.0).unwrap();
        assert!(higher.value() > eu.value());
        assert_eq!(eu.tree().params().spot, 100.0);

        let wider = eu.with_volatility(0.4).unwrap();
        assert!(wider.value() > eu.value());

        let deeper = eu.with_periods(500).unwrap();
        assert_relative_eq!(deeper.value(), 7.445013061600037, epsilon = 1e-8);

        assert!(matches!(
            eu.with_strike(0.0),
            Err(LatticeError::InvalidParameter { name: "strike", .. })
        ));
    }

    #[test]
    fn test_display_uses_fixed_width() {
        let eu = option(2, OptionRight::Call, ExerciseStyle::European);
        let text = format!("{}", eu);
        assert!(text.starts_with("european call, x = 100.00"));
        assert!(text.contains("  100.00"));
        assert!(text.contains("Option values:"));
    }
}
