//! Heuristic population seeding.
//!
//! Each individual starts all-zero and is nudged towards partial
//! feasibility by a single pass over the clauses: a clause whose
//! variables are all still untouched gets one random literal made true,
//! and that literal's variable is then marked as covered. A clause that
//! shares any covered variable is skipped, even if it stays unsatisfied,
//! so this is a cheap bias rather than a coverage guarantee.

use super::types::{Individual, Population};
use crate::clause::{satisfying_value, var_index, ClauseSet};
use rand::Rng;

/// Builds one heuristic individual for `clauses`.
pub fn heuristic_individual<R: Rng>(clauses: &ClauseSet, rng: &mut R) -> Individual {
    let n = clauses.num_variables();
    let mut bits = vec![false; n];
    let mut covered = vec![false; n];

    for clause in clauses.clauses() {
        let literals = clause.literals();
        if literals.iter().any(|&lit| covered[var_index(lit)]) {
            continue;
        }
        let chosen = literals[rng.random_range(0..literals.len())];
        let idx = var_index(chosen);
        bits[idx] = satisfying_value(chosen);
        covered[idx] = true;
    }

    Individual::new(bits)
}

/// Builds `size` independent heuristic individuals.
pub fn initialize_population<R: Rng>(clauses: &ClauseSet, size: usize, rng: &mut R) -> Population {
    (0..size).map(|_| heuristic_individual(clauses, rng)).collect()
}
