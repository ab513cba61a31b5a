//! Bit-string individuals.
//!
//! An [`Individual`] is a complete variable assignment: bit `i` is the
//! value of variable `x(i+1)`. Individuals are immutable values; every
//! operator returns fresh individuals instead of editing its inputs.

use crate::error::MaxSatError;
use std::fmt;
use std::str::FromStr;

/// A candidate assignment in the population.
///
/// Displays and parses as a `'0'`/`'1'` string, most significant
/// variable last (`"10"` means `x1 = 1, x2 = 0`).
///
/// ```
/// use u_maxsat::ga::Individual;
///
/// let ind: Individual = "101".parse().unwrap();
/// assert_eq!(ind.bits(), &[true, false, true]);
/// assert_eq!(ind.to_string(), "101");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual {
    bits: Vec<bool>,
}

/// An ordered sequence of individuals (rank 0 first after ranking).
pub type Population = Vec<Individual>;

impl Individual {
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// The all-false assignment over `len` variables.
    pub fn zeros(len: usize) -> Self {
        Self {
            bits: vec![false; len],
        }
    }

    #[inline]
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Returns the underlying bit vector.
    pub fn into_bits(self) -> Vec<bool> {
        self.bits
    }
}

impl AsRef<[bool]> for Individual {
    fn as_ref(&self) -> &[bool] {
        &self.bits
    }
}

impl From<Vec<bool>> for Individual {
    fn from(bits: Vec<bool>) -> Self {
        Self::new(bits)
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Individual {
    type Err = MaxSatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(MaxSatError::InvalidOperatorInput(format!(
                    "`{other}` is not a bit in \"{s}\""
                ))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }
}
