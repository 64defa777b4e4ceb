//! Hypothesis enumeration, the satisfaction test, and the per-unit search
//! combining them.

pub mod enumerate;
pub mod satisfaction;

pub use enumerate::{candidate_count, Combinations, Hypotheses, Hypothesis};
pub use satisfaction::multidetermines;

use crate::dataset::DatasetView;
use crate::error::Result;
use crate::model::Attribute;
use crate::tree::DependencyTree;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Search policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    TopDown,
    BottomUp,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::TopDown => "top-down",
            Algorithm::BottomUp => "bottom-up",
        }
    }

    /// Smallest dependent set the enumeration offers.
    pub(crate) fn min_dependent_size(&self) -> usize {
        match self {
            Algorithm::TopDown => 0,
            Algorithm::BottomUp => 1,
        }
    }

    pub(crate) fn holds_for_empty_determinant(&self) -> bool {
        matches!(self, Algorithm::TopDown)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "top-down" | "top_down" | "topdown" => Ok(Algorithm::TopDown),
            "bottom-up" | "bottom_up" | "bottomup" => Ok(Algorithm::BottomUp),
            other => Err(format!("unknown algorithm `{}`", other)),
        }
    }
}

/// Run the full search over `attributes` of `view` and collect every
/// dependency that holds.
pub fn discover(
    view: &DatasetView,
    attributes: &[Attribute],
    algorithm: Algorithm,
) -> Result<DependencyTree> {
    let view = view.select(attributes)?;
    let mut tree = DependencyTree::new();

    // Bottom-up seeds one first-level node per attribute.
    if algorithm == Algorithm::BottomUp {
        for attribute in attributes {
            tree.root_mut().add_child(attribute.clone());
        }
    }

    let mut tested = 0usize;
    for hypothesis in Hypotheses::new(attributes.to_vec(), algorithm) {
        if hypothesis.dependent.is_empty() {
            continue;
        }
        tested += 1;
        if multidetermines(&view, &hypothesis.determinant, &hypothesis.dependent, algorithm)? {
            tree.insert_path(&hypothesis.determinant, &hypothesis.dependent);
        }
    }

    debug!(
        "{} search over {} rows x {} attributes: tested {}, kept {}",
        algorithm,
        view.height(),
        attributes.len(),
        tested,
        tree.dependency_count()
    );
    Ok(tree)
}
