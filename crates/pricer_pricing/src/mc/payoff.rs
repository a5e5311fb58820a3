//! Payoffs evaluated over a whole simulated price path.

use std::fmt;
use std::str::FromStr;

use pricer_models::instruments::OptionRight;

/// Option payoff computed from one simulated path.
///
/// | Variant | Observed value | Payoff |
/// |---------|----------------|--------|
/// | `EuropeanCall` / `EuropeanPut` | final price | max(S_T − X, 0) / max(X − S_T, 0) |
/// | `AsianCall` / `AsianPut` | arithmetic mean of the path, S₀ included | max(A − X, 0) / max(X − A, 0) |
/// | `LookbackCall` / `LookbackPut` | path maximum / path minimum | max(M − X, 0) / max(X − m, 0) |
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::PathPayoff;
///
/// let path = [100.0, 110.0, 95.0, 105.0];
/// assert_eq!(PathPayoff::EuropeanCall { strike: 100.0 }.evaluate(&path), 5.0);
/// assert_eq!(PathPayoff::AsianCall { strike: 100.0 }.evaluate(&path), 2.5);
/// assert_eq!(PathPayoff::LookbackCall { strike: 100.0 }.evaluate(&path), 10.0);
/// assert_eq!(PathPayoff::LookbackPut { strike: 100.0 }.evaluate(&path), 5.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "kebab-case"))]
pub enum PathPayoff {
    /// Call on the final price.
    EuropeanCall {
        /// Strike price.
        strike: f64,
    },
    /// Put on the final price.
    EuropeanPut {
        /// Strike price.
        strike: f64,
    },
    /// Call on the arithmetic average price.
    AsianCall {
        /// Strike price.
        strike: f64,
    },
    /// Put on the arithmetic average price.
    AsianPut {
        /// Strike price.
        strike: f64,
    },
    /// Call on the maximum price reached.
    LookbackCall {
        /// Strike price.
        strike: f64,
    },
    /// Put on the minimum price reached.
    LookbackPut {
        /// Strike price.
        strike: f64,
    },
}

/// Path statistic a [`PathPayoff`] is written on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PathStyle {
    /// Final price.
    European,
    /// Arithmetic average price.
    Asian,
    /// Extreme price in the option holder's favour.
    Lookback,
}

impl PathPayoff {
    /// Builds the payoff for a style, right and strike.
    pub fn new(style: PathStyle, right: OptionRight, strike: f64) -> Self {
        match (style, right) {
            (PathStyle::European, OptionRight::Call) => Self::EuropeanCall { strike },
            (PathStyle::European, OptionRight::Put) => Self::EuropeanPut { strike },
            (PathStyle::Asian, OptionRight::Call) => Self::AsianCall { strike },
            (PathStyle::Asian, OptionRight::Put) => Self::AsianPut { strike },
            (PathStyle::Lookback, OptionRight::Call) => Self::LookbackCall { strike },
            (PathStyle::Lookback, OptionRight::Put) => Self::LookbackPut { strike },
        }
    }

    /// Strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        match *self {
            Self::EuropeanCall { strike }
            | Self::EuropeanPut { strike }
            | Self::AsianCall { strike }
            | Self::AsianPut { strike }
            | Self::LookbackCall { strike }
            | Self::LookbackPut { strike } => strike,
        }
    }

    /// Call or put.
    #[inline]
    pub fn right(&self) -> OptionRight {
        match self {
            Self::EuropeanCall { .. } | Self::AsianCall { .. } | Self::LookbackCall { .. } => {
                OptionRight::Call
            }
            Self::EuropeanPut { .. } | Self::AsianPut { .. } | Self::LookbackPut { .. } => {
                OptionRight::Put
            }
        }
    }

    /// Path statistic observed.
    #[inline]
    pub fn style(&self) -> PathStyle {
        match self {
            Self::EuropeanCall { .. } | Self::EuropeanPut { .. } => PathStyle::European,
            Self::AsianCall { .. } | Self::AsianPut { .. } => PathStyle::Asian,
            Self::LookbackCall { .. } | Self::LookbackPut { .. } => PathStyle::Lookback,
        }
    }

    /// Undiscounted payoff of `path`. An empty path pays nothing.
    pub fn evaluate(&self, path: &[f64]) -> f64 {
        let Some(&last) = path.last() else {
            return 0.0;
        };
        let observed = match self {
            Self::EuropeanCall { .. } | Self::EuropeanPut { .. } => last,
            Self::AsianCall { .. } | Self::AsianPut { .. } => {
                path.iter().sum::<f64>() / path.len() as f64
            }
            Self::LookbackCall { .. } => path.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Self::LookbackPut { .. } => path.iter().copied().fold(f64::INFINITY, f64::min),
        };
        self.right().intrinsic(observed, self.strike())
    }

    /// Kebab-case name used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::EuropeanCall { .. } => "european-call",
            Self::EuropeanPut { .. } => "european-put",
            Self::AsianCall { .. } => "asian-call",
            Self::AsianPut { .. } => "asian-put",
            Self::LookbackCall { .. } => "lookback-call",
            Self::LookbackPut { .. } => "lookback-put",
        }
    }
}

impl fmt::Display for PathPayoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (x=${:.2})", self.label(), self.strike())
    }
}

impl FromStr for PathStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "european" | "euro" => Ok(Self::European),
            "asian" => Ok(Self::Asian),
            "lookback" => Ok(Self::Lookback),
            other => Err(format!(
                "unknown path style '{}': expected european, asian or lookback",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATH: [f64; 5] = [100.0, 104.0, 92.0, 99.0, 101.0];

    #[test]
    fn test_european_uses_last_value() {
        assert_eq!(PathPayoff::EuropeanCall { strike: 100.0 }.evaluate(&PATH), 1.0);
        assert_eq!(PathPayoff::EuropeanPut { strike: 100.0 }.evaluate(&PATH), 0.0);
        assert_eq!(PathPayoff::EuropeanPut { strike: 103.0 }.evaluate(&PATH), 2.0);
    }

    #[test]
    fn test_asian_average_includes_spot() {
        // (100 + 104 + 92 + 99 + 101) / 5 = 99.2
        let call = PathPayoff::AsianCall { strike: 98.0 }.evaluate(&PATH);
        assert!((call - 1.2).abs() < 1e-12);
        let put = PathPayoff::AsianPut { strike: 100.0 }.evaluate(&PATH);
        assert!((put - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_lookback_extremes() {
        assert_eq!(PathPayoff::LookbackCall { strike: 100.0 }.evaluate(&PATH), 4.0);
        assert_eq!(PathPayoff::LookbackPut { strike: 100.0 }.evaluate(&PATH), 8.0);
        assert_eq!(PathPayoff::LookbackCall { strike: 110.0 }.evaluate(&PATH), 0.0);
    }

    #[test]
    fn test_empty_path() {
        assert_eq!(PathPayoff::AsianPut { strike: 100.0 }.evaluate(&[]), 0.0);
    }

    #[test]
    fn test_new_round_trips_style_and_right() {
        for style in [PathStyle::European, PathStyle::Asian, PathStyle::Lookback] {
            for right in [OptionRight::Call, OptionRight::Put] {
                let payoff = PathPayoff::new(style, right, 95.0);
                assert_eq!(payoff.style(), style);
                assert_eq!(payoff.right(), right);
                assert_eq!(payoff.strike(), 95.0);
            }
        }
    }

    #[test]
    fn test_labels_and_parsing() {
        assert_eq!(
            PathPayoff::LookbackPut { strike: 90.0 }.to_string(),
            "lookback-put (x=$90.00)"
        );
        assert_eq!("Asian".parse::<PathStyle>(), Ok(PathStyle::Asian));
        assert!("barrier".parse::<PathStyle>().is_err());
    }
}
