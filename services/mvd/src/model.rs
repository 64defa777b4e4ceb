//! Attributes and canonical dependencies

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of one dataset column.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attribute(String);

impl Attribute {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Attribute {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for Attribute {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for Attribute {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Build an attribute list from column names, keeping their order.
pub fn attributes<I, S>(names: I) -> Vec<Attribute>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(|n| Attribute::new(n)).collect()
}

/// A multivalued dependency `X ->> Y` in canonical form.
///
/// Both sides are kept sorted and deduplicated, so two dependencies over the
/// same attribute sets compare equal whatever order they were built from.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Dependency {
    determinant: Vec<Attribute>,
    dependent: Vec<Attribute>,
}

impl Dependency {
    pub fn new(determinant: &[Attribute], dependent: &[Attribute]) -> Self {
        Self {
            determinant: canonical(determinant),
            dependent: canonical(dependent),
        }
    }

    /// Left-hand side `X`.
    pub fn determinant(&self) -> &[Attribute] {
        &self.determinant
    }

    /// Right-hand side `Y`.
    pub fn dependent(&self) -> &[Attribute] {
        &self.dependent
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ->> {}", join(&self.determinant), join(&self.dependent))
    }
}

fn canonical(attrs: &[Attribute]) -> Vec<Attribute> {
    let mut sorted = attrs.to_vec();
    sorted.sort();
    sorted.dedup();
    sorted
}

fn join(attrs: &[Attribute]) -> String {
    attrs
        .iter()
        .map(Attribute::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
