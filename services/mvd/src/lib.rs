//! Multivalued dependency discovery over tabular data.
//!
//! Pipeline:
//! 1. Load and clean a dataset into a [`dataset::DatasetView`]
//! 2. Enumerate candidate `X ->> Y` hypotheses
//! 3. Test each candidate against the view
//! 4. Collect the survivors in a [`tree::DependencyTree`]
//! 5. Split large inputs into row-block / attribute-group units and merge the
//!    per-unit trees under a wall-clock budget

pub mod config;
pub mod dataset;
pub mod discovery;
pub mod error;
pub mod journal;
pub mod model;
pub mod report;
pub mod scheduler;
pub mod session;
pub mod tree;

pub use error::{MvdError, Result};
pub use model::{Attribute, Dependency};
