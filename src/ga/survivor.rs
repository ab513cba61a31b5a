//! Elitist survivor selection.

use super::config::ShortfallPolicy;
use super::types::{Individual, Population};
use crate::clause::FitnessOracle;
use crate::error::{MaxSatError, Result};
use tracing::warn;

/// Merges ranked parents and offspring into the next population.
///
/// The `elite_size` fittest parents (stable sort on fitness, descending)
/// survive unconditionally. The remaining `parents.len() - elite_size`
/// slots are filled with offspring in their given order; surplus
/// offspring are discarded. If there are too few offspring, `policy`
/// decides:
///
/// - [`ShortfallPolicy::PadWithParents`]: fill the gap with the next-best
///   parents after the elites, in fitness order
/// - [`ShortfallPolicy::Shrink`]: return a smaller population
/// - [`ShortfallPolicy::Reject`]: fail with [`MaxSatError::DegenerateSizing`]
///
/// `elite_size` larger than the parent count keeps every parent.
pub fn select_survivors(
    oracle: &FitnessOracle,
    parents: &[Individual],
    offspring: Vec<Individual>,
    elite_size: usize,
    policy: ShortfallPolicy,
) -> Result<Population> {
    let scores = oracle.score_batch(parents)?;
    let mut order: Vec<usize> = (0..parents.len()).collect();
    order.sort_by(|&a, &b| scores[b].0.cmp(&scores[a].0));

    let elite_count = elite_size.min(parents.len());
    let needed = parents.len() - elite_count;

    let mut next: Population = Vec::with_capacity(parents.len());
    next.extend(order[..elite_count].iter().map(|&i| parents[i].clone()));

    let available = offspring.len();
    next.extend(offspring.into_iter().take(needed));

    if available < needed {
        match policy {
            ShortfallPolicy::PadWithParents => {
                warn!(needed, available, "offspring shortfall, padding with parents");
                let gap = needed - available;
                next.extend(
                    order[elite_count..]
                        .iter()
                        .take(gap)
                        .map(|&i| parents[i].clone()),
                );
            }
            ShortfallPolicy::Shrink => {
                warn!(needed, available, "offspring shortfall, population shrinks");
            }
            ShortfallPolicy::Reject => {
                return Err(MaxSatError::DegenerateSizing { needed, available });
            }
        }
    }

    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::ClauseSet;

    /// Four unit clauses `x1 … x4`: fitness is the number of set bits.
    fn oracle() -> FitnessOracle {
        FitnessOracle::new(
            ClauseSet::from_literals(4, vec![vec![1], vec![2], vec![3], vec![4]]).unwrap(),
        )
    }

    fn ind(s: &str) -> Individual {
        s.parse().unwrap()
    }

    fn strings(pop: &[Individual]) -> Vec<String> {
        pop.iter().map(|i| i.to_string()).collect()
    }

    #[test]
    fn test_elites_then_offspring() {
        let parents = vec![ind("1000"), ind("1111"), ind("0000"), ind("1100")];
        let offspring = vec![ind("0001"), ind("0010"), ind("0100"), ind("0011")];
        let next =
            select_survivors(&oracle(), &parents, offspring, 2, ShortfallPolicy::Shrink).unwrap();
        assert_eq!(strings(&next), vec!["1111", "1100", "0001", "0010"]);
    }

    #[test]
    fn test_elites_survive_bad_offspring() {
        let parents = vec![ind("0000"), ind("1110"), ind("1111")];
        let offspring = vec![ind("0000"); 3];
        let next = select_survivors(
            &oracle(),
            &parents,
            offspring,
            2,
            ShortfallPolicy::PadWithParents,
        )
        .unwrap();
        assert_eq!(next.len(), 3);
        assert!(next.contains(&ind("1111")));
        assert!(next.contains(&ind("1110")));
    }

    #[test]
    fn test_elite_ties_keep_parent_order() {
        let parents = vec![ind("1000"), ind("0100"), ind("0010")];
        let next =
            select_survivors(&oracle(), &parents, vec![], 2, ShortfallPolicy::Shrink).unwrap();
        assert_eq!(strings(&next), vec!["1000", "0100"]);
    }

    #[test]
    fn test_shortfall_pad_with_parents() {
        let parents = vec![ind("0000"), ind("1111"), ind("1100"), ind("1000")];
        let offspring = vec![ind("0001")];
        let next = select_survivors(
            &oracle(),
            &parents,
            offspring,
            1,
            ShortfallPolicy::PadWithParents,
        )
        .unwrap();
        assert_eq!(strings(&next), vec!["1111", "0001", "1100", "1000"]);
    }

    #[test]
    fn test_shortfall_shrink() {
        let parents = vec![ind("0000"), ind("1111"), ind("1100")];
        let next = select_survivors(
            &oracle(),
            &parents,
            vec![ind("0001")],
            1,
            ShortfallPolicy::Shrink,
        )
        .unwrap();
        assert_eq!(next.len(), 2);
    }

    #[test]
    fn test_shortfall_reject() {
        let parents = vec![ind("0000"), ind("1111"), ind("1100")];
        let err = select_survivors(
            &oracle(),
            &parents,
            vec![ind("0001")],
            1,
            ShortfallPolicy::Reject,
        )
        .unwrap_err();
        assert_eq!(
            err,
            MaxSatError::DegenerateSizing {
                needed: 2,
                available: 1
            }
        );
    }

    #[test]
    fn test_oversized_elite() {
        let parents = vec![ind("0000"), ind("1111")];
        let next = select_survivors(
            &oracle(),
            &parents,
            vec![ind("0101")],
            5,
            ShortfallPolicy::Reject,
        )
        .unwrap();
        assert_eq!(strings(&next), vec!["1111", "0000"]);
    }
}
