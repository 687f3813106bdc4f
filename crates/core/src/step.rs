use std::{fmt, num::ParseIntError, str::FromStr};

/// A signed simulation step identifier.
///
/// A positive step is a regular simulation increment whose magnitude grows
/// with simulation time. A negative step marks a remeshing event: the mesh was
/// regenerated at the absolute step `|step|`, and the negative snapshot holds
/// the new mesh at that same physical time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Step(i64);

impl Step {
    /// Creates a step from its signed identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the signed identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Returns true if this step marks a remeshing event.
    #[must_use]
    pub const fn is_remesh(self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute simulation step.
    #[must_use]
    pub const fn magnitude(self) -> u64 {
        self.0.unsigned_abs()
    }

    /// Returns the sign of the identifier.
    #[must_use]
    pub const fn sign(self) -> Sign {
        if self.is_remesh() {
            Sign::Negative
        } else {
            Sign::Positive
        }
    }
}

impl From<i64> for Step {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a step token is not a signed integer.
pub type ParseStepError = ParseIntError;

impl FromStr for Step {
    type Err = ParseStepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// The sign of a step identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Regular increment (zero counts as regular).
    Positive,
    /// Remeshing marker.
    Negative,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remesh_markers_are_negative() {
        assert!(Step::new(-15).is_remesh());
        assert!(!Step::new(15).is_remesh());
        assert!(!Step::new(0).is_remesh());
    }

    #[test]
    fn magnitude_drops_sign() {
        assert_eq!(Step::new(-223).magnitude(), 223);
        assert_eq!(Step::new(222).magnitude(), 222);
    }

    #[test]
    fn sign_follows_identifier() {
        assert_eq!(Step::new(-1).sign(), Sign::Negative);
        assert_eq!(Step::new(0).sign(), Sign::Positive);
        assert_eq!(Step::new(7).sign(), Sign::Positive);
    }

    #[test]
    fn display_and_parse_keep_sign() {
        let step: Step = "-17".parse().expect("valid step");
        assert_eq!(step, Step::new(-17));
        assert_eq!(step.to_string(), "-17");

        assert_eq!(" 42 ".parse::<Step>().expect("valid step"), Step::new(42));
    }

    #[test]
    fn parse_rejects_non_integers() {
        assert!("".parse::<Step>().is_err());
        assert!("12a".parse::<Step>().is_err());
        assert!("1.5".parse::<Step>().is_err());
    }
}
