//! Fitness oracle over a clause set.
//!
//! Fitness is the number of satisfied clauses; penalty is its complement.
//! MAX-SAT has no side constraints, so the count of unsatisfied clauses
//! doubles as the constraint-violation signal for stochastic ranking.

use super::types::{checked_var_index, satisfying_value, var_index, Clause, ClauseSet, Literal};
use crate::error::{MaxSatError, Result};
use std::fmt;

/// Tests whether `assignment` satisfies at least one literal of `clause`.
///
/// # Errors
/// [`MaxSatError::LiteralOutOfRange`] for the literal `0`, and
/// [`MaxSatError::AssignmentLengthMismatch`] when a literal refers to a
/// variable beyond the end of `assignment`. A short assignment is never
/// treated as silently unsatisfied.
pub fn satisfies(clause: &Clause, assignment: &[bool]) -> Result<bool> {
    let mut satisfied = false;
    for &literal in clause.literals() {
        let Some(idx) = checked_var_index(literal) else {
            return Err(MaxSatError::LiteralOutOfRange {
                literal,
                num_variables: assignment.len(),
            });
        };
        let Some(&value) = assignment.get(idx) else {
            return Err(MaxSatError::AssignmentLengthMismatch {
                expected: idx + 1,
                actual: assignment.len(),
            });
        };
        if value == satisfying_value(literal) {
            satisfied = true;
        }
    }
    Ok(satisfied)
}

/// Same as [`satisfies`], for callers that already checked the length.
#[inline]
fn satisfies_unchecked(clause: &Clause, assignment: &[bool]) -> bool {
    clause
        .literals()
        .iter()
        .any(|&lit| assignment[var_index(lit)] == satisfying_value(lit))
}

/// Per-clause diagnostic record produced by [`evaluate_against_clauses`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClauseReport {
    /// The clause's literals in their original order.
    pub literals: Vec<Literal>,

    /// The assignment bit for each literal's variable, `'X'` when the
    /// variable lies beyond the assignment.
    pub relevant_bits: String,

    pub satisfied: bool,
}

impl fmt::Display for ClauseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let literals: Vec<String> = self.literals.iter().map(|l| l.to_string()).collect();
        write!(
            f,
            "{}\t{}\t{}",
            literals.join(" "),
            self.relevant_bits,
            u8::from(self.satisfied)
        )
    }
}

/// Evaluates each clause against `assignment` for reporting.
///
/// This view is lenient: literals whose variable lies beyond the end of
/// the assignment, and the invalid literal `0`, are shown as `'X'` and
/// never count towards satisfaction. The search loop uses [`FitnessOracle`] instead, which
/// rejects short assignments.
pub fn evaluate_against_clauses(clauses: &[Clause], assignment: &[bool]) -> Vec<ClauseReport> {
    clauses
        .iter()
        .map(|clause| {
            let mut satisfied = false;
            let mut relevant_bits = String::with_capacity(clause.len());
            for &literal in clause.literals() {
                match checked_var_index(literal).and_then(|idx| assignment.get(idx)) {
                    Some(&value) => {
                        relevant_bits.push(if value { '1' } else { '0' });
                        if value == satisfying_value(literal) {
                            satisfied = true;
                        }
                    }
                    None => relevant_bits.push('X'),
                }
            }
            ClauseReport {
                literals: clause.literals().to_vec(),
                relevant_bits,
                satisfied,
            }
        })
        .collect()
}

/// Owns a [`ClauseSet`] and scores assignments against it.
///
/// Every other component borrows the oracle read-only.
#[derive(Debug, Clone)]
pub struct FitnessOracle {
    clauses: ClauseSet,
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    parallel: bool,
}

impl FitnessOracle {
    pub fn new(clauses: ClauseSet) -> Self {
        Self {
            clauses,
            parallel: false,
        }
    }

    /// Whether batch scoring fans out across threads.
    #[inline]
    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Enables or disables parallel batch scoring.
    ///
    /// Only effective with the `parallel` feature; batch scoring is pure,
    /// so results are identical either way.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    #[inline]
    pub fn clause_set(&self) -> &ClauseSet {
        &self.clauses
    }

    #[inline]
    pub fn num_variables(&self) -> usize {
        self.clauses.num_variables()
    }

    #[inline]
    pub fn num_clauses(&self) -> usize {
        self.clauses.num_clauses()
    }

    fn check_length(&self, assignment: &[bool]) -> Result<()> {
        if assignment.len() < self.clauses.num_variables() {
            return Err(MaxSatError::AssignmentLengthMismatch {
                expected: self.clauses.num_variables(),
                actual: assignment.len(),
            });
        }
        Ok(())
    }

    /// Number of clauses satisfied by `assignment`, in `[0, num_clauses]`.
    ///
    /// # Errors
    /// [`MaxSatError::AssignmentLengthMismatch`] if the assignment is
    /// shorter than `num_variables`.
    pub fn fitness(&self, assignment: &[bool]) -> Result<usize> {
        self.check_length(assignment)?;
        Ok(self
            .clauses
            .clauses()
            .iter()
            .filter(|clause| satisfies_unchecked(clause, assignment))
            .count())
    }

    /// Number of clauses left unsatisfied: `num_clauses - fitness`.
    pub fn penalty(&self, assignment: &[bool]) -> Result<usize> {
        Ok(self.num_clauses() - self.fitness(assignment)?)
    }

    /// Fitness and penalty in a single pass.
    pub fn score(&self, assignment: &[bool]) -> Result<(usize, usize)> {
        let fitness = self.fitness(assignment)?;
        Ok((fitness, self.num_clauses() - fitness))
    }

    /// Fitness and penalty for every assignment of a batch, in order.
    pub fn score_batch<A>(&self, batch: &[A]) -> Result<Vec<(usize, usize)>>
    where
        A: AsRef<[bool]> + Sync,
    {
        #[cfg(feature = "parallel")]
        if self.parallel {
            use rayon::prelude::*;
            return batch.par_iter().map(|a| self.score(a.as_ref())).collect();
        }

        batch.iter().map(|a| self.score(a.as_ref())).collect()
    }

    /// Total weight of satisfied clauses.
    ///
    /// Falls back to the satisfied count when the clause set is unweighted.
    pub fn satisfied_weight(&self, assignment: &[bool]) -> Result<f64> {
        self.check_length(assignment)?;
        let weighted = self.clauses.is_weighted();
        Ok(self
            .clauses
            .clauses()
            .iter()
            .filter(|clause| satisfies_unchecked(clause, assignment))
            .map(|clause| if weighted { clause.weight() } else { 1.0 })
            .sum())
    }

    /// Fraction of clauses satisfied, in `[0, 1]`. An empty set counts as fully satisfied.
    pub fn satisfaction_ratio(&self, assignment: &[bool]) -> Result<f64> {
        let fitness = self.fitness(assignment)?;
        if self.num_clauses() == 0 {
            return Ok(1.0);
        }
        Ok(fitness as f64 / self.num_clauses() as f64)
    }

    /// Per-clause report over the owned clause set.
    pub fn evaluate(&self, assignment: &[bool]) -> Vec<ClauseReport> {
        evaluate_against_clauses(self.clauses.clauses(), assignment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bits(s: &str) -> Vec<bool> {
        s.chars().map(|c| c == '1').collect()
    }

    /// `(x1 ∨ x2) ∧ (¬x1 ∨ x2)`
    fn two_clause_oracle() -> FitnessOracle {
        FitnessOracle::new(ClauseSet::from_literals(2, vec![vec![1, 2], vec![-1, 2]]).unwrap())
    }

    #[test]
    fn test_two_clause_scenario() {
        let oracle = two_clause_oracle();
        assert_eq!(oracle.fitness(&bits("11")).unwrap(), 2);
        assert_eq!(oracle.fitness(&bits("10")).unwrap(), 1);
        assert_eq!(oracle.fitness(&bits("00")).unwrap(), 1);
        assert_eq!(oracle.fitness(&bits("01")).unwrap(), 2);
        assert_eq!(oracle.penalty(&bits("10")).unwrap(), 1);
    }

    #[test]
    fn test_satisfies_polarity() {
        let clause = Clause::new(vec![-1, 3]);
        assert!(satisfies(&clause, &bits("000")).unwrap());
        assert!(satisfies(&clause, &bits("101")).unwrap());
        assert!(!satisfies(&clause, &bits("100")).unwrap());
    }

    #[test]
    fn test_satisfies_short_assignment_is_error() {
        let clause = Clause::new(vec![1, 3]);
        let err = satisfies(&clause, &bits("00")).unwrap_err();
        assert_eq!(
            err,
            MaxSatError::AssignmentLengthMismatch {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_satisfies_error_even_when_earlier_literal_matches() {
        // A malformed input is reported, not masked by an earlier match.
        let clause = Clause::new(vec![1, 5]);
        assert!(satisfies(&clause, &bits("1")).is_err());
    }

    #[test]
    fn test_satisfies_zero_literal_is_error() {
        let clause = Clause::new(vec![0]);
        assert_eq!(
            satisfies(&clause, &bits("10")).unwrap_err(),
            MaxSatError::LiteralOutOfRange {
                literal: 0,
                num_variables: 2
            }
        );
    }

    #[test]
    fn test_fitness_short_assignment_is_error() {
        let oracle = two_clause_oracle();
        assert!(matches!(
            oracle.fitness(&bits("1")),
            Err(MaxSatError::AssignmentLengthMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_score_batch() {
        let oracle = two_clause_oracle().with_parallel(true);
        let batch = vec![bits("11"), bits("10"), bits("00")];
        assert_eq!(oracle.score_batch(&batch).unwrap(), vec![(2, 0), (1, 1), (1, 1)]);
        assert!(oracle.score_batch(&[bits("1")]).is_err());
    }

    #[test]
    fn test_satisfied_weight() {
        let set = ClauseSet::with_weights(
            2,
            vec![
                Clause::weighted(vec![1], 3.0),
                Clause::weighted(vec![2], 5.0),
            ],
            true,
        )
        .unwrap();
        let oracle = FitnessOracle::new(set);
        assert!((oracle.satisfied_weight(&bits("10")).unwrap() - 3.0).abs() < 1e-12);
        assert!((oracle.satisfied_weight(&bits("11")).unwrap() - 8.0).abs() < 1e-12);
        // The search count is unaffected by weights.
        assert_eq!(oracle.fitness(&bits("01")).unwrap(), 1);
    }

    #[test]
    fn test_unweighted_ignores_weights() {
        let set = ClauseSet::with_weights(1, vec![Clause::weighted(vec![1], 9.0)], false).unwrap();
        let oracle = FitnessOracle::new(set);
        assert!((oracle.satisfied_weight(&bits("1")).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_satisfaction_ratio() {
        let oracle = two_clause_oracle();
        assert!((oracle.satisfaction_ratio(&bits("10")).unwrap() - 0.5).abs() < 1e-12);
        assert!((oracle.satisfaction_ratio(&bits("11")).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_evaluate_against_clauses() {
        let oracle = two_clause_oracle();
        let reports = oracle.evaluate(&bits("10"));
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].relevant_bits, "10");
        assert!(reports[0].satisfied);
        assert!(!reports[1].satisfied);
        assert_eq!(reports[1].to_string(), "-1 2\t10\t0");
    }

    #[test]
    fn test_evaluate_marks_missing_bits() {
        let clauses = vec![Clause::new(vec![1, 3])];
        let reports = evaluate_against_clauses(&clauses, &bits("0"));
        assert_eq!(reports[0].relevant_bits, "0X");
        assert!(!reports[0].satisfied);
    }

    #[test]
    fn test_evaluate_marks_zero_literal() {
        let clauses = vec![Clause::new(vec![0, -1])];
        let reports = evaluate_against_clauses(&clauses, &bits("0"));
        assert_eq!(reports[0].relevant_bits, "X0");
        assert!(reports[0].satisfied);
    }

    fn arb_instance() -> impl Strategy<Value = (ClauseSet, Vec<bool>)> {
        (1usize..12).prop_flat_map(|n| {
            let literal = (1..=n as i32, any::<bool>())
                .prop_map(|(v, neg)| if neg { -v } else { v });
            let clause = prop::collection::vec(literal, 1..5);
            (
                prop::collection::vec(clause, 0..20),
                prop::collection::vec(any::<bool>(), n),
            )
                .prop_map(move |(clauses, assignment)| {
                    (ClauseSet::from_literals(n, clauses).unwrap(), assignment)
                })
        })
    }

    proptest! {
        #[test]
        fn prop_fitness_bounded((set, assignment) in arb_instance()) {
            let oracle = FitnessOracle::new(set);
            let fitness = oracle.fitness(&assignment).unwrap();
            prop_assert!(fitness <= oracle.num_clauses());
        }

        #[test]
        fn prop_fitness_plus_penalty((set, assignment) in arb_instance()) {
            let oracle = FitnessOracle::new(set);
            let fitness = oracle.fitness(&assignment).unwrap();
            let penalty = oracle.penalty(&assignment).unwrap();
            prop_assert_eq!(fitness + penalty, oracle.num_clauses());
        }

        #[test]
        fn prop_report_agrees_with_fitness((set, assignment) in arb_instance()) {
            let oracle = FitnessOracle::new(set);
            let satisfied = oracle.evaluate(&assignment).iter().filter(|r| r.satisfied).count();
            prop_assert_eq!(satisfied, oracle.fitness(&assignment).unwrap());
        }
    }
}
