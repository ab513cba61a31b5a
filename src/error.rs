//! Error type shared by every module of the crate.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MaxSatError>;

/// Errors raised by clause ingestion, evaluation and the evolutionary loop.
///
/// Nothing is retried internally: the driver propagates every variant to
/// its caller, except [`MaxSatError::DegenerateSizing`], which is only
/// produced when [`ShortfallPolicy::Reject`](crate::ga::ShortfallPolicy)
/// is configured.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MaxSatError {
    /// A clause is inconsistent with the declared header or syntax.
    ///
    /// `position` is the 1-based line number when parsing WCNF text, and
    /// the 1-based clause ordinal when building a clause set in memory.
    #[error("malformed clause at position {position}: {reason}")]
    MalformedClause { position: usize, reason: String },

    /// A literal references a variable outside `[1, num_variables]`.
    #[error("literal {literal} out of range for {num_variables} variables")]
    LiteralOutOfRange { literal: i32, num_variables: usize },

    /// An assignment is shorter than the number of variables it must cover.
    #[error("assignment has {actual} bits but {expected} are required")]
    AssignmentLengthMismatch { expected: usize, actual: usize },

    /// Crossover or mutation was handed empty or mismatched individuals.
    #[error("invalid operator input: {0}")]
    InvalidOperatorInput(String),

    /// Survivor selection could not fill the population from the offspring.
    #[error("survivor selection needs {needed} offspring but only {available} were produced")]
    DegenerateSizing { needed: usize, available: usize },

    /// A configuration parameter is out of its admissible range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An operation that needs at least one individual got none.
    #[error("population is empty")]
    EmptyPopulation,
}
