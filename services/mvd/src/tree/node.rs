use crate::model::{Attribute, Dependency};
use serde::Serialize;
use std::collections::BTreeSet;

const ROOT_LABEL: &str = "Root";

/// One determinant path from the root.
///
/// Children are kept in creation order. Every dependency stored here has a
/// determinant equal to the set of attributes on the path to this node.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DependencyNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) attribute: Option<Attribute>,
    pub(crate) dependencies: Vec<Dependency>,
    pub(crate) children: Vec<DependencyNode>,
}

impl DependencyNode {
    pub(crate) fn with_attribute(attribute: Attribute) -> Self {
        Self {
            attribute: Some(attribute),
            ..Self::default()
        }
    }

    /// Attribute on the edge leading here; `None` for the root.
    pub fn attribute(&self) -> Option<&Attribute> {
        self.attribute.as_ref()
    }

    pub fn label(&self) -> &str {
        self.attribute.as_ref().map_or(ROOT_LABEL, Attribute::as_str)
    }

    pub fn children(&self) -> &[DependencyNode] {
        &self.children
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    pub fn child(&self, attribute: &Attribute) -> Option<&DependencyNode> {
        self.children
            .iter()
            .find(|c| c.attribute.as_ref() == Some(attribute))
    }

    /// Child for `attribute`, created if it does not exist yet.
    pub fn add_child(&mut self, attribute: Attribute) -> &mut DependencyNode {
        let idx = match self
            .children
            .iter()
            .position(|c| c.attribute.as_ref() == Some(&attribute))
        {
            Some(idx) => idx,
            None => {
                self.children.push(Self::with_attribute(attribute));
                self.children.len() - 1
            }
        };
        &mut self.children[idx]
    }

    /// Store `determinant ->> dependent` unless an equal canonical pair is
    /// already here. Returns whether it was added.
    pub fn add_dependency(&mut self, determinant: &[Attribute], dependent: &[Attribute]) -> bool {
        let dependency = Dependency::new(determinant, dependent);
        if self.dependencies.contains(&dependency) {
            return false;
        }
        self.dependencies.push(dependency);
        true
    }
}

/// Discovered dependencies indexed by determinant path.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct DependencyTree {
    pub(crate) root: DependencyNode,
}

impl DependencyTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> &DependencyNode {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut DependencyNode {
        &mut self.root
    }

    /// Walk (creating as needed) the path `determinant` from the root and
    /// store the dependency at its end.
    pub fn insert_path(&mut self, determinant: &[Attribute], dependent: &[Attribute]) -> bool {
        let mut node = &mut self.root;
        for attribute in determinant {
            node = node.add_child(attribute.clone());
        }
        node.add_dependency(determinant, dependent)
    }

    /// Node at the end of `path`, if it exists.
    pub fn node(&self, path: &[Attribute]) -> Option<&DependencyNode> {
        path.iter().try_fold(&self.root, |node, a| node.child(a))
    }

    /// Pre-order traversal yielding each node with its depth.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(0, &self.root)],
        }
    }

    pub fn node_count(&self) -> usize {
        self.walk().count()
    }

    pub fn dependency_count(&self) -> usize {
        self.walk().map(|(_, n)| n.dependencies.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.dependency_count() == 0
    }

    /// Every stored dependency paired with the path of the node holding it.
    pub fn dependency_set(&self) -> BTreeSet<(Vec<Attribute>, Dependency)> {
        let mut out = BTreeSet::new();
        let mut stack: Vec<(Vec<Attribute>, &DependencyNode)> = vec![(Vec::new(), &self.root)];
        while let Some((path, node)) = stack.pop() {
            for dep in &node.dependencies {
                out.insert((path.clone(), dep.clone()));
            }
            for child in &node.children {
                let mut child_path = path.clone();
                if let Some(a) = &child.attribute {
                    child_path.push(a.clone());
                }
                stack.push((child_path, child));
            }
        }
        out
    }
}

pub struct Walk<'a> {
    stack: Vec<(usize, &'a DependencyNode)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a DependencyNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        for child in node.children.iter().rev() {
            self.stack.push((depth + 1, child));
        }
        Some((depth, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attributes;

    #[test]
    fn test_add_child_is_idempotent() {
        let mut root = DependencyNode::default();
        root.add_child(Attribute::from("A")).add_dependency(&attributes(["A"]), &attributes(["B"]));
        let again = root.add_child(Attribute::from("A"));
        assert_eq!(again.dependencies().len(), 1);
        assert_eq!(root.children().len(), 1);
    }

    #[test]
    fn test_add_dependency_dedups_any_order() {
        let mut node = DependencyNode::default();
        assert!(node.add_dependency(&attributes(["A", "B"]), &attributes(["C", "D"])));
        assert!(!node.add_dependency(&attributes(["B", "A"]), &attributes(["D", "C"])));
        assert_eq!(node.dependencies().len(), 1);
    }

    #[test]
    fn test_insert_path_and_lookup() {
        let mut tree = DependencyTree::new();
        tree.insert_path(&attributes(["A", "B"]), &attributes(["C"]));
        tree.insert_path(&attributes(["A"]), &attributes(["C"]));

        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.dependency_count(), 2);
        let ab = tree.node(&attributes(["A", "B"])).unwrap();
        assert_eq!(ab.dependencies()[0].to_string(), "A, B ->> C");
        assert!(tree.node(&attributes(["B"])).is_none());
    }

    #[test]
    fn test_walk_is_preorder_in_creation_order() {
        let mut tree = DependencyTree::new();
        tree.insert_path(&attributes(["B"]), &attributes(["A"]));
        tree.insert_path(&attributes(["A", "C"]), &attributes(["B"]));
        tree.insert_path(&attributes(["A"]), &attributes(["B"]));

        let visited: Vec<(usize, &str)> = tree.walk().map(|(d, n)| (d, n.label())).collect();
        assert_eq!(visited, vec![(0, "Root"), (1, "B"), (1, "A"), (2, "C")]);
    }

    #[test]
    fn test_dependency_set_carries_paths() {
        let mut tree = DependencyTree::new();
        tree.insert_path(&attributes(["A", "B"]), &attributes(["C"]));
        let set = tree.dependency_set();
        let (path, dep) = set.iter().next().unwrap();
        assert_eq!(path, &attributes(["A", "B"]));
        assert_eq!(dep.dependent(), &attributes(["C"])[..]);
    }
}
