//! Clause and clause-set representation.
//!
//! Literals use the DIMACS convention: a non-zero signed integer whose
//! magnitude is the 1-based variable index and whose sign is the polarity.

use crate::error::{MaxSatError, Result};
use std::fmt;

/// A signed variable reference (`3` means `x3`, `-3` means `¬x3`).
pub type Literal = i32;

/// Returns the 0-based variable index a literal refers to.
///
/// The literal must be non-zero, as every literal of a [`ClauseSet`] is.
/// Use [`checked_var_index`] for clauses that were never validated.
#[inline]
pub fn var_index(literal: Literal) -> usize {
    literal.unsigned_abs() as usize - 1
}

/// Like [`var_index`], returning `None` for the literal `0`.
#[inline]
pub fn checked_var_index(literal: Literal) -> Option<usize> {
    (literal.unsigned_abs() as usize).checked_sub(1)
}

/// Returns the bit value that makes `literal` true.
#[inline]
pub fn satisfying_value(literal: Literal) -> bool {
    literal > 0
}

/// A disjunction of literals with an optional weight.
///
/// Duplicate literals are kept as given. The weight is carried for
/// weighted reporting; the search itself counts clauses uniformly.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Clause {
    literals: Vec<Literal>,
    weight: f64,
}

impl Clause {
    /// Creates a clause with unit weight.
    pub fn new(literals: Vec<Literal>) -> Self {
        Self::weighted(literals, 1.0)
    }

    /// Creates a clause with an explicit weight.
    pub fn weighted(literals: Vec<Literal>, weight: f64) -> Self {
        Self { literals, weight }
    }

    /// The literals in their original order.
    #[inline]
    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, lit) in self.literals.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{lit}")?;
        }
        Ok(())
    }
}

/// An immutable collection of clauses over `num_variables` variables.
///
/// Construction validates that every clause is non-empty and that every
/// literal magnitude lies in `[1, num_variables]`, so evaluation code may
/// index assignments without re-checking individual literals.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClauseSet {
    clauses: Vec<Clause>,
    num_variables: usize,
    weighted: bool,
}

impl ClauseSet {
    /// Builds an unweighted clause set.
    ///
    /// # Errors
    /// [`MaxSatError::MalformedClause`] for an empty clause and
    /// [`MaxSatError::LiteralOutOfRange`] for a literal that is zero or
    /// exceeds `num_variables`.
    pub fn new(num_variables: usize, clauses: Vec<Clause>) -> Result<Self> {
        Self::with_weights(num_variables, clauses, false)
    }

    /// Builds a clause set, recording whether clause weights are meaningful.
    pub fn with_weights(num_variables: usize, clauses: Vec<Clause>, weighted: bool) -> Result<Self> {
        for (i, clause) in clauses.iter().enumerate() {
            if clause.is_empty() {
                return Err(MaxSatError::MalformedClause {
                    position: i + 1,
                    reason: "clause has no literals".into(),
                });
            }
            for &literal in clause.literals() {
                let magnitude = literal.unsigned_abs() as usize;
                if magnitude == 0 || magnitude > num_variables {
                    return Err(MaxSatError::LiteralOutOfRange {
                        literal,
                        num_variables,
                    });
                }
            }
        }

        Ok(Self {
            clauses,
            num_variables,
            weighted,
        })
    }

    /// Convenience constructor from raw literal vectors (unit weights).
    pub fn from_literals(num_variables: usize, clauses: Vec<Vec<Literal>>) -> Result<Self> {
        Self::new(num_variables, clauses.into_iter().map(Clause::new).collect())
    }

    #[inline]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    #[inline]
    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    #[inline]
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Whether clause weights should be applied by weighted reporting.
    #[inline]
    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// Sum of all clause weights (clause count when unweighted).
    pub fn total_weight(&self) -> f64 {
        if self.weighted {
            self.clauses.iter().map(Clause::weight).sum()
        } else {
            self.clauses.len() as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_index_and_polarity() {
        assert_eq!(var_index(1), 0);
        assert_eq!(var_index(-4), 3);
        assert_eq!(checked_var_index(-4), Some(3));
        assert_eq!(checked_var_index(0), None);
        assert!(satisfying_value(2));
        assert!(!satisfying_value(-2));
    }

    #[test]
    fn test_clause_display() {
        let clause = Clause::new(vec![1, -2, 3]);
        assert_eq!(clause.to_string(), "1 -2 3");
        assert_eq!(clause.len(), 3);
        assert!((clause.weight() - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_clause_set_keeps_duplicates() {
        let set = ClauseSet::from_literals(2, vec![vec![1, 1, -2]]).unwrap();
        assert_eq!(set.clauses()[0].literals(), &[1, 1, -2]);
        assert_eq!(set.num_clauses(), 1);
        assert_eq!(set.num_variables(), 2);
    }

    #[test]
    fn test_literal_out_of_range() {
        let err = ClauseSet::from_literals(2, vec![vec![1, 3]]).unwrap_err();
        assert_eq!(
            err,
            MaxSatError::LiteralOutOfRange {
                literal: 3,
                num_variables: 2
            }
        );
    }

    #[test]
    fn test_zero_literal_rejected() {
        let err = ClauseSet::from_literals(2, vec![vec![1, 0]]).unwrap_err();
        assert!(matches!(err, MaxSatError::LiteralOutOfRange { literal: 0, .. }));
    }

    #[test]
    fn test_empty_clause_rejected() {
        let err = ClauseSet::from_literals(2, vec![vec![1], vec![]]).unwrap_err();
        assert!(matches!(err, MaxSatError::MalformedClause { position: 2, .. }));
    }

    #[test]
    fn test_total_weight() {
        let clauses = vec![Clause::weighted(vec![1], 2.5), Clause::weighted(vec![-1], 1.5)];
        let weighted = ClauseSet::with_weights(1, clauses.clone(), true).unwrap();
        let unweighted = ClauseSet::with_weights(1, clauses, false).unwrap();
        assert!((weighted.total_weight() - 4.0).abs() < 1e-12);
        assert!((unweighted.total_weight() - 2.0).abs() < 1e-12);
    }
}
