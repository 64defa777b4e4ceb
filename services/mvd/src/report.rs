//! Text and JSON reports of discovered dependencies

use crate::discovery::Algorithm;
use crate::model::Attribute;
use crate::scheduler::{AnalysisOutcome, ExecutionMode};
use crate::tree::DependencyTree;
use serde::Serialize;
use std::time::Duration;

pub const TIMEOUT_NOTICE: &str = "Processing terminated due to timeout.";

/// Indented report: one `Node:` line per tree node, four spaces deeper per
/// level, with that node's dependencies listed under it.
pub fn render_tree(tree: &DependencyTree) -> String {
    let mut out = String::new();
    for (depth, node) in tree.walk() {
        let indent = " ".repeat(depth * 4);
        out.push_str(&format!("{}Node: {}\n", indent, node.label()));
        for dep in node.dependencies() {
            out.push_str(&format!("{}  Dependency: {}\n", indent, dep));
        }
    }
    out
}

/// Result of one algorithm variant.
#[derive(Debug, Clone, Serialize)]
pub struct VariantReport {
    pub algorithm: Algorithm,
    pub elapsed_secs: f64,
    pub mode: Option<ExecutionMode>,
    pub truncated: bool,
    pub units_completed: usize,
    pub units_failed: usize,
    pub dependency_count: usize,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<DependencyTree>,
}

impl VariantReport {
    pub fn from_outcome(algorithm: Algorithm, outcome: Option<AnalysisOutcome>, elapsed: Duration) -> Self {
        match outcome {
            Some(outcome) => {
                let mut text = render_tree(&outcome.tree);
                if outcome.truncated {
                    text.push_str("(partial result: time limit reached)\n");
                }
                Self {
                    algorithm,
                    elapsed_secs: elapsed.as_secs_f64(),
                    mode: Some(outcome.mode),
                    truncated: outcome.truncated,
                    units_completed: outcome.units_completed,
                    units_failed: outcome.units_failed,
                    dependency_count: outcome.tree.dependency_count(),
                    text,
                    tree: Some(outcome.tree),
                }
            }
            None => Self {
                algorithm,
                elapsed_secs: elapsed.as_secs_f64(),
                mode: None,
                truncated: true,
                units_completed: 0,
                units_failed: 0,
                dependency_count: 0,
                text: TIMEOUT_NOTICE.to_string(),
                tree: None,
            },
        }
    }
}

/// Every variant run over one dataset.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub dataset: String,
    pub rows: usize,
    pub attributes: Vec<Attribute>,
    pub variants: Vec<VariantReport>,
}

impl SessionReport {
    pub fn variant(&self, algorithm: Algorithm) -> Option<&VariantReport> {
        self.variants.iter().find(|v| v.algorithm == algorithm)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attributes;

    #[test]
    fn test_render_tree_layout() {
        let mut tree = DependencyTree::new();
        tree.insert_path(&attributes(["A"]), &attributes(["B"]));
        tree.insert_path(&attributes(["A", "B"]), &attributes(["C"]));

        let expected = "Node: Root\n    Node: A\n      Dependency: A ->> B\n        Node: B\n          Dependency: A, B ->> C\n";
        assert_eq!(render_tree(&tree), expected);
    }

    #[test]
    fn test_timeout_report() {
        let report = VariantReport::from_outcome(Algorithm::BottomUp, None, Duration::from_secs(2));
        assert_eq!(report.text, TIMEOUT_NOTICE);
        assert!(report.truncated);
        assert!(report.tree.is_none());
    }

    #[test]
    fn test_json_shape() {
        let mut tree = DependencyTree::new();
        tree.insert_path(&attributes(["A"]), &attributes(["B"]));
        let outcome = AnalysisOutcome {
            tree,
            mode: ExecutionMode::Direct,
            units_completed: 1,
            units_failed: 0,
            truncated: false,
            elapsed: Duration::from_millis(5),
        };
        let report = SessionReport {
            dataset: "toy.csv".to_string(),
            rows: 2,
            attributes: attributes(["A", "B"]),
            variants: vec![VariantReport::from_outcome(
                Algorithm::TopDown,
                Some(outcome),
                Duration::from_millis(5),
            )],
        };

        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["variants"][0]["algorithm"], "top_down");
        assert_eq!(value["variants"][0]["mode"], "direct");
        assert_eq!(value["variants"][0]["dependency_count"], 1);
        let root = &value["variants"][0]["tree"];
        assert_eq!(root["children"][0]["attribute"], "A");
        assert_eq!(root["children"][0]["dependencies"][0]["dependent"][0], "B");
    }
}
