use std::{fmt, str::FromStr};

use crate::support::dictionary::ConfigError;

/// Configuration name of a phase pair.
///
/// Ordered pairs are written `(dispersed in continuous)`, unordered pairs
/// `(phase1 and phase2)`.
///
/// ```
/// use twine_multiphase::support::phase::PairKey;
///
/// let key: PairKey = "(air in water)".parse().unwrap();
/// assert_eq!(key, PairKey::ordered("air", "water"));
/// assert_eq!(key.phases(), ("air", "water"));
/// assert!("air-water".parse::<PairKey>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PairKey {
    Ordered { dispersed: String, continuous: String },
    Unordered { phase1: String, phase2: String },
}

impl PairKey {
    #[must_use]
    pub fn ordered(dispersed: impl Into<String>, continuous: impl Into<String>) -> Self {
        Self::Ordered {
            dispersed: dispersed.into(),
            continuous: continuous.into(),
        }
    }

    #[must_use]
    pub fn unordered(phase1: impl Into<String>, phase2: impl Into<String>) -> Self {
        Self::Unordered {
            phase1: phase1.into(),
            phase2: phase2.into(),
        }
    }

    /// The two phase names in the order they are written.
    #[must_use]
    pub fn phases(&self) -> (&str, &str) {
        match self {
            Self::Ordered {
                dispersed,
                continuous,
            } => (dispersed, continuous),
            Self::Unordered { phase1, phase2 } => (phase1, phase2),
        }
    }

    /// Returns `true` if both keys name the same two phases, in any order.
    #[must_use]
    pub fn same_phases(&self, other: &PairKey) -> bool {
        let (a, b) = self.phases();
        let (c, d) = other.phases();
        (a == c && b == d) || (a == d && b == c)
    }

    /// Returns `true` if `phase` is one of the two phases.
    #[must_use]
    pub fn contains(&self, phase: &str) -> bool {
        let (a, b) = self.phases();
        a == phase || b == phase
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ordered {
                dispersed,
                continuous,
            } => write!(f, "({dispersed} in {continuous})"),
            Self::Unordered { phase1, phase2 } => write!(f, "({phase1} and {phase2})"),
        }
    }
}

impl FromStr for PairKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidPairKey { key: s.to_string() };

        let inner = s
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;

        let words: Vec<&str> = inner.split_whitespace().collect();
        match words.as_slice() {
            [a, "in", b] if a != b => Ok(Self::ordered(*a, *b)),
            [a, "and", b] if a != b => Ok(Self::unordered(*a, *b)),
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_round_trips() {
        for text in ["(air in water)", "(oil and water)"] {
            let key: PairKey = text.parse().unwrap();
            assert_eq!(key.to_string(), text);
        }
    }

    #[test]
    fn tolerates_extra_whitespace() {
        let key: PairKey = " ( air  and water ) ".parse().unwrap();
        assert_eq!(key, PairKey::unordered("air", "water"));
    }

    #[test]
    fn rejects_malformed_keys() {
        for text in ["air in water", "(air)", "(air on water)", "(air in air)", "()"] {
            assert_eq!(
                text.parse::<PairKey>(),
                Err(ConfigError::InvalidPairKey { key: text.into() }),
                "{text}"
            );
        }
    }

    #[test]
    fn phase_membership() {
        let ordered = PairKey::ordered("air", "water");
        let unordered = PairKey::unordered("water", "air");
        assert!(ordered.same_phases(&unordered));
        assert!(ordered.contains("water"));
        assert!(!ordered.contains("oil"));
    }
}
