//! Lazy enumeration of candidate `X ->> Y` hypotheses

use crate::discovery::Algorithm;
use crate::model::Attribute;

/// k-combinations of `0..n` in lexicographic order.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            started: false,
            done: k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.indices.clone());
        }

        // Rightmost position that has not reached its final value.
        let k = self.indices.len();
        let mut i = k;
        loop {
            if i == 0 {
                self.done = true;
                return None;
            }
            i -= 1;
            if self.indices[i] < self.n - k + i {
                break;
            }
        }

        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        Some(self.indices.clone())
    }
}

/// All subsets of `0..n` with at least `min_size` elements, smallest first.
#[derive(Debug, Clone)]
struct Subsets {
    n: usize,
    size: usize,
    inner: Combinations,
}

impl Subsets {
    fn new(n: usize, min_size: usize) -> Self {
        Self {
            n,
            size: min_size,
            inner: Combinations::new(n, min_size),
        }
    }
}

impl Iterator for Subsets {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        loop {
            if let Some(subset) = self.inner.next() {
                return Some(subset);
            }
            if self.size >= self.n {
                return None;
            }
            self.size += 1;
            self.inner = Combinations::new(self.n, self.size);
        }
    }
}

/// One candidate dependency, with both sides in attribute-list order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hypothesis {
    pub determinant: Vec<Attribute>,
    pub dependent: Vec<Attribute>,
}

/// Candidate pairs over an ordered attribute list.
///
/// Determinants are the nonempty subsets in increasing size; for each one the
/// dependents range over subsets of the remaining attributes, also in
/// increasing size. Top-down includes the empty dependent, bottom-up does not.
#[derive(Debug, Clone)]
pub struct Hypotheses {
    attributes: Vec<Attribute>,
    policy: Algorithm,
    determinants: Subsets,
    current: Option<(Vec<usize>, Vec<usize>, Subsets)>,
}

impl Hypotheses {
    pub fn new(attributes: Vec<Attribute>, policy: Algorithm) -> Self {
        let determinants = Subsets::new(attributes.len(), 1);
        Self {
            attributes,
            policy,
            determinants,
            current: None,
        }
    }

    /// Rewind to the first candidate.
    pub fn restart(&mut self) {
        self.determinants = Subsets::new(self.attributes.len(), 1);
        self.current = None;
    }
}

impl Iterator for Hypotheses {
    type Item = Hypothesis;

    fn next(&mut self) -> Option<Hypothesis> {
        loop {
            if let Some((determinant, complement, dependents)) = &mut self.current {
                if let Some(chosen) = dependents.next() {
                    return Some(Hypothesis {
                        determinant: determinant
                            .iter()
                            .map(|&i| self.attributes[i].clone())
                            .collect(),
                        dependent: chosen
                            .iter()
                            .map(|&j| self.attributes[complement[j]].clone())
                            .collect(),
                    });
                }
            }

            let determinant = self.determinants.next()?;
            let complement: Vec<usize> = (0..self.attributes.len())
                .filter(|i| !determinant.contains(i))
                .collect();
            let dependents = Subsets::new(complement.len(), self.policy.min_dependent_size());
            self.current = Some((determinant, complement, dependents));
        }
    }
}

/// Number of candidates the enumeration yields for `n` attributes.
///
/// Top-down: `sum_{k=1..n} C(n,k) * 2^(n-k)`. Bottom-up drops the empty
/// dependent for every determinant.
pub fn candidate_count(n: usize, policy: Algorithm) -> u128 {
    (1..=n)
        .map(|k| {
            let dependents = 1u128 << (n - k);
            let dependents = match policy {
                Algorithm::TopDown => dependents,
                Algorithm::BottomUp => dependents - 1,
            };
            binomial(n, k) * dependents
        })
        .sum()
}

fn binomial(n: usize, k: usize) -> u128 {
    let k = k.min(n - k);
    (0..k).fold(1u128, |acc, i| acc * (n - i) as u128 / (i + 1) as u128)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attributes;
    use std::collections::HashSet;

    #[test]
    fn test_combinations_lexicographic() {
        let combos: Vec<_> = Combinations::new(4, 2).collect();
        assert_eq!(
            combos,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3]
            ]
        );
        assert_eq!(Combinations::new(3, 0).count(), 1);
        assert_eq!(Combinations::new(2, 3).count(), 0);
    }

    #[test]
    fn test_top_down_order_for_two_attributes() {
        let pairs: Vec<(String, String)> = Hypotheses::new(attributes(["A", "B"]), Algorithm::TopDown)
            .map(|h| {
                (
                    h.determinant.iter().map(|a| a.as_str()).collect(),
                    h.dependent.iter().map(|a| a.as_str()).collect(),
                )
            })
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("A".to_string(), "".to_string()),
                ("A".to_string(), "B".to_string()),
                ("B".to_string(), "".to_string()),
                ("B".to_string(), "A".to_string()),
                ("AB".to_string(), "".to_string()),
            ]
        );
    }

    #[test]
    fn test_counts_match_closed_form() {
        for n in 0..=7usize {
            let attrs: Vec<Attribute> = (0..n).map(|i| Attribute::new(format!("c{}", i))).collect();
            let top_down = Hypotheses::new(attrs.clone(), Algorithm::TopDown).count() as u128;
            let bottom_up = Hypotheses::new(attrs, Algorithm::BottomUp).count() as u128;

            let three = 3u128.pow(n as u32);
            let two = 2u128.pow(n as u32);
            assert_eq!(top_down, three - two);
            assert_eq!(top_down, candidate_count(n, Algorithm::TopDown));
            assert_eq!(bottom_up, candidate_count(n, Algorithm::BottomUp));
            assert_eq!(bottom_up + two - 1, top_down);
        }
    }

    #[test]
    fn test_no_overlap_and_no_duplicates() {
        let attrs = attributes(["A", "B", "C", "D", "E"]);
        let mut seen = HashSet::new();
        for h in Hypotheses::new(attrs, Algorithm::BottomUp) {
            assert!(!h.determinant.is_empty());
            assert!(!h.dependent.is_empty());
            assert!(h.dependent.iter().all(|a| !h.determinant.contains(a)));
            assert!(seen.insert((h.determinant, h.dependent)));
        }
    }

    #[test]
    fn test_restart_replays_sequence() {
        let mut hypotheses = Hypotheses::new(attributes(["A", "B", "C"]), Algorithm::TopDown);
        let first: Vec<_> = hypotheses.by_ref().collect();
        assert!(hypotheses.next().is_none());
        hypotheses.restart();
        let second: Vec<_> = hypotheses.collect();
        assert_eq!(first, second);
    }
}
