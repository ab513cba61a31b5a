//! Clause model and fitness oracle.
//!
//! - [`ClauseSet`]: validated, immutable collection of [`Clause`]s
//! - [`FitnessOracle`]: satisfied-clause count (fitness), unsatisfied-clause
//!   count (penalty), weighted satisfaction and per-clause reports
//! - [`parse_wcnf`]: in-memory WCNF / DIMACS ingestion

mod oracle;
mod types;
mod wcnf;

pub use oracle::{evaluate_against_clauses, satisfies, ClauseReport, FitnessOracle};
pub use types::{checked_var_index, satisfying_value, var_index, Clause, ClauseSet, Literal};
pub use wcnf::parse_wcnf;
