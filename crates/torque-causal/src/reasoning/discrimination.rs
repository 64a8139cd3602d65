//! Discriminating-test selection.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::graph::CausalGraph;

/// The test that most evenly splits a candidate set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscriminatingTest {
    pub test: String,
    /// `min(suggesting, not_suggesting)`; always at least 1.
    pub split_score: usize,
    /// Candidates listing this test, in input order.
    pub suggesting: Vec<String>,
    /// Candidates not listing it, in input order.
    pub not_suggesting: Vec<String>,
}

impl DiscriminatingTest {
    pub fn candidate_count(&self) -> usize {
        self.suggesting.len() + self.not_suggesting.len()
    }
}

impl CausalGraph {
    /// Pick the authored test maximizing `min(suggesting, not_suggesting)`
    /// over the candidates. Ties go to the lexicographically smallest test.
    ///
    /// Unknown and repeated ids are ignored. `None` when fewer than two
    /// known candidates remain or no test splits them.
    pub fn get_discriminating_test<S: AsRef<str>>(&self, candidate_failures: &[S]) -> Option<DiscriminatingTest> {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let candidates: Vec<_> = candidate_failures
            .iter()
            .filter_map(|id| self.failure(id.as_ref()))
            .filter(|f| seen.insert(f.id.as_str()))
            .collect();

        if candidates.len() < 2 {
            return None;
        }

        let mut pool: BTreeMap<&str, BTreeSet<usize>> = BTreeMap::new();
        for (position, failure) in candidates.iter().enumerate() {
            for test in &failure.source.discriminating_tests {
                let test = test.trim();
                if !test.is_empty() {
                    pool.entry(test).or_default().insert(position);
                }
            }
        }

        let total = candidates.len();
        let mut best: Option<(&str, &BTreeSet<usize>, usize)> = None;
        for (test, positions) in &pool {
            let score = positions.len().min(total - positions.len());
            if best.map_or(true, |(_, _, s)| score > s) {
                best = Some((*test, positions, score));
            }
        }

        let (test, positions, split_score) = best.filter(|(_, _, s)| *s > 0)?;
        let (suggesting, not_suggesting): (Vec<_>, Vec<_>) = candidates
            .iter()
            .enumerate()
            .partition(|(position, _)| positions.contains(position));

        Some(DiscriminatingTest {
            test: test.to_string(),
            split_score,
            suggesting: suggesting.into_iter().map(|(_, f)| f.id.clone()).collect(),
            not_suggesting: not_suggesting.into_iter().map(|(_, f)| f.id.clone()).collect(),
        })
    }
}
