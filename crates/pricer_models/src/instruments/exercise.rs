//! Option exercise style definitions.

/// Option exercise style.
///
/// # Variants
/// - `European`: Exercise only at expiry
/// - `American`: Exercise at any node up to and including expiry
///
/// # Examples
/// ```
/// use pricer_models::instruments::ExerciseStyle;
///
/// assert!(ExerciseStyle::American.allows_early_exercise());
/// assert!(!ExerciseStyle::default().allows_early_exercise());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ExerciseStyle {
    /// European style: exercise only at expiry.
    #[default]
    European,

    /// American style: exercise at any time before expiry.
    American,
}

impl ExerciseStyle {
    /// Returns whether value must be floored at intrinsic before expiry.
    #[inline]
    pub fn allows_early_exercise(&self) -> bool {
        matches!(self, ExerciseStyle::American)
    }

    /// Lower-case label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            ExerciseStyle::European => "european",
            ExerciseStyle::American => "american",
        }
    }
}

impl std::fmt::Display for ExerciseStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ExerciseStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "european" | "euro" | "e" => Ok(ExerciseStyle::European),
            "american" | "amer" | "a" => Ok(ExerciseStyle::American),
            other => Err(format!(
                "unknown exercise style '{}', expected european or american",
                other
            )),
        }
    }
}
