//! Bit-string genetic operators.
//!
//! - [`one_point_crossover`]: exchange the suffixes of two parents past a
//!   random cut point
//! - [`bit_flip_mutation`]: flip every bit independently with a fixed
//!   probability
//!
//! Both take their inputs by reference and return new individuals.
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*

use super::types::Individual;
use crate::error::{MaxSatError, Result};
use rand::Rng;

/// Children of one crossover event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offspring {
    pub first: Individual,
    pub second: Individual,

    /// The cut point used, or `None` when crossover did not fire and the
    /// children are copies of the parents.
    pub cut_point: Option<usize>,
}

fn check_parents(parent1: &Individual, parent2: &Individual) -> Result<usize> {
    let n = parent1.len();
    if n != parent2.len() {
        return Err(MaxSatError::InvalidOperatorInput(format!(
            "parents have different lengths ({n} and {})",
            parent2.len()
        )));
    }
    if n < 2 {
        return Err(MaxSatError::InvalidOperatorInput(format!(
            "one-point crossover needs at least 2 bits, got {n}"
        )));
    }
    Ok(n)
}

/// Exchanges the suffixes of two parents starting at `point`.
///
/// `child1 = parent1[..point] + parent2[point..]` and vice versa.
/// Applying the same cut to the children restores the parents.
///
/// # Errors
/// [`MaxSatError::InvalidOperatorInput`] if the parents differ in length,
/// are shorter than 2 bits, or `point` lies outside `[1, len - 1]`.
pub fn crossover_at(
    parent1: &Individual,
    parent2: &Individual,
    point: usize,
) -> Result<(Individual, Individual)> {
    let n = check_parents(parent1, parent2)?;
    if point == 0 || point >= n {
        return Err(MaxSatError::InvalidOperatorInput(format!(
            "cut point {point} outside [1, {}]",
            n - 1
        )));
    }

    let (a, b) = (parent1.bits(), parent2.bits());
    let mut child1 = Vec::with_capacity(n);
    child1.extend_from_slice(&a[..point]);
    child1.extend_from_slice(&b[point..]);
    let mut child2 = Vec::with_capacity(n);
    child2.extend_from_slice(&b[..point]);
    child2.extend_from_slice(&a[point..]);

    Ok((Individual::new(child1), Individual::new(child2)))
}

/// One-point crossover applied with probability `rate`.
///
/// When it fires, the cut point is drawn uniformly from `[1, len - 1]`.
/// Otherwise the children are copies of the parents.
///
/// # Errors
/// [`MaxSatError::InvalidOperatorInput`] if the parents differ in length
/// or are shorter than 2 bits, whether or not crossover fires.
pub fn one_point_crossover<R: Rng>(
    parent1: &Individual,
    parent2: &Individual,
    rate: f64,
    rng: &mut R,
) -> Result<Offspring> {
    let n = check_parents(parent1, parent2)?;

    if rng.random::<f64>() < rate {
        let point = rng.random_range(1..n);
        let (first, second) = crossover_at(parent1, parent2, point)?;
        Ok(Offspring {
            first,
            second,
            cut_point: Some(point),
        })
    } else {
        Ok(Offspring {
            first: parent1.clone(),
            second: parent2.clone(),
            cut_point: None,
        })
    }
}

/// Flips each bit independently with probability `rate`.
///
/// `rate = 0` returns an identical copy; `rate = 1` inverts every bit.
///
/// # Errors
/// [`MaxSatError::InvalidOperatorInput`] for an empty individual.
pub fn bit_flip_mutation<R: Rng>(
    individual: &Individual,
    rate: f64,
    rng: &mut R,
) -> Result<Individual> {
    if individual.is_empty() {
        return Err(MaxSatError::InvalidOperatorInput(
            "cannot mutate an empty individual".into(),
        ));
    }

    let bits = individual
        .bits()
        .iter()
        .map(|&bit| if rng.random::<f64>() < rate { !bit } else { bit })
        .collect();
    Ok(Individual::new(bits))
}
