//! Option right (call or put) and its intrinsic payoff.

use num_traits::Float;

/// Right conferred by an option.
///
/// # Variants
/// - `Call`: Right to buy at the strike, payoff max(S - K, 0)
/// - `Put`: Right to sell at the strike, payoff max(K - S, 0)
///
/// # Examples
/// ```
/// use pricer_models::instruments::OptionRight;
///
/// assert_eq!(OptionRight::Call.intrinsic(110.0_f64, 100.0), 10.0);
/// assert_eq!(OptionRight::Put.intrinsic(110.0_f64, 100.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionRight {
    /// Call option: max(S - K, 0)
    Call,
    /// Put option: max(K - S, 0)
    Put,
}

impl OptionRight {
    /// Value of exercising immediately at `spot`.
    #[inline]
    pub fn intrinsic<T: Float>(&self, spot: T, strike: T) -> T {
        match self {
            OptionRight::Call => (spot - strike).max(T::zero()),
            OptionRight::Put => (strike - spot).max(T::zero()),
        }
    }

    /// Returns whether this is a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionRight::Call)
    }

    /// Returns whether this is a put.
    #[inline]
    pub fn is_put(&self) -> bool {
        matches!(self, OptionRight::Put)
    }

    /// Lower-case label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            OptionRight::Call => "call",
            OptionRight::Put => "put",
        }
    }
}

impl std::fmt::Display for OptionRight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for OptionRight {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionRight::Call),
            "put" | "p" => Ok(OptionRight::Put),
            other => Err(format!("unknown option right '{}', expected call or put", other)),
        }
    }
}
