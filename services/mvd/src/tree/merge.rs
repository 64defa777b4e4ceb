use super::node::{DependencyNode, DependencyTree};

/// What a merge changed in the receiving tree.
#[derive(Debug, Clone, Default)]
pub struct MergeSummary {
    pub dependencies_added: usize,
    pub subtrees_grafted: usize,
    pub trace: Vec<String>,
}

/// Fold `incoming` into `main`.
///
/// Dependencies missing from a node are appended. A child already present in
/// `main` is merged in turn; any other child is moved over with its whole
/// subtree. The walk uses an explicit stack so tree depth is unbounded.
pub fn merge(main: &mut DependencyTree, incoming: DependencyTree) -> MergeSummary {
    let mut summary = MergeSummary::default();
    let mut stack: Vec<(&mut DependencyNode, DependencyNode)> = vec![(&mut main.root, incoming.root)];

    while let Some((target, source)) = stack.pop() {
        let DependencyNode {
            dependencies: target_dependencies,
            children: target_children,
            ..
        } = target;

        for dep in source.dependencies {
            if !target_dependencies.contains(&dep) {
                summary.trace.push(format!("Dependency added: {}", dep));
                summary.dependencies_added += 1;
                target_dependencies.push(dep);
            }
        }

        let (mut matched, grafts): (Vec<DependencyNode>, Vec<DependencyNode>) = source
            .children
            .into_iter()
            .partition(|c| target_children.iter().any(|t| t.attribute == c.attribute));

        for graft in grafts {
            summary.trace.push(format!("New child added: {}", graft.label()));
            summary.subtrees_grafted += 1;
            target_children.push(graft);
        }

        for existing in target_children {
            if let Some(idx) = matched.iter().position(|c| c.attribute == existing.attribute) {
                summary
                    .trace
                    .push(format!("Merged existing child {}", existing.label()));
                stack.push((existing, matched.remove(idx)));
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attributes;

    /// Entries are `("A,B", "C")` for `A, B ->> C`.
    fn tree(entries: &[(&str, &str)]) -> DependencyTree {
        let mut t = DependencyTree::new();
        for (x, y) in entries {
            t.insert_path(&attributes(x.split(',')), &attributes(y.split(',')));
        }
        t
    }

    #[test]
    fn test_merge_adds_and_grafts() {
        let mut main = tree(&[("A", "B")]);
        let incoming = tree(&[("A", "C"), ("A", "B"), ("B,C", "A")]);

        let summary = merge(&mut main, incoming);
        assert_eq!(summary.dependencies_added, 1);
        assert_eq!(summary.subtrees_grafted, 1);
        assert_eq!(main.dependency_count(), 3);
        assert_eq!(main.node(&attributes(["A"])).unwrap().dependencies().len(), 2);
        assert!(main.node(&attributes(["B", "C"])).is_some());
    }

    #[test]
    fn test_merge_is_idempotent() {
        let base = tree(&[("A", "B"), ("A,B", "C")]);
        let mut main = base.clone();
        let summary = merge(&mut main, base.clone());
        assert_eq!(summary.dependencies_added, 0);
        assert_eq!(summary.subtrees_grafted, 0);
        assert_eq!(main.dependency_set(), base.dependency_set());
    }

    #[test]
    fn test_merge_order_and_grouping_do_not_matter() {
        let t1 = tree(&[("A", "B"), ("A,C", "B")]);
        let t2 = tree(&[("C", "A"), ("A", "C")]);
        let t3 = tree(&[("A,C", "D"), ("B", "A")]);

        // ((t1 + t2) + t3)
        let mut left = t1.clone();
        merge(&mut left, t2.clone());
        merge(&mut left, t3.clone());

        // (t3 + (t2 + t1))
        let mut inner = t2.clone();
        merge(&mut inner, t1.clone());
        let mut right = t3.clone();
        merge(&mut right, inner);

        assert_eq!(left.dependency_set(), right.dependency_set());
        assert_eq!(left.dependency_count(), 6);
    }

    #[test]
    fn test_merge_handles_deep_paths() {
        let attrs: Vec<String> = (0..2000).map(|i| format!("a{}", i)).collect();
        let mut deep = DependencyTree::new();
        deep.insert_path(&attributes(attrs.iter().cloned()), &attributes(["z"]));

        let mut main = DependencyTree::new();
        main.insert_path(&attributes(attrs[..1].iter().cloned()), &attributes(["z"]));
        merge(&mut main, deep.clone());
        assert_eq!(main.dependency_count(), 2);

        let mut again = deep.clone();
        merge(&mut again, deep);
        assert_eq!(again.dependency_count(), 1);
    }
}
