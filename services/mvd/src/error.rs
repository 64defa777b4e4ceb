use crate::model::Attribute;
use polars::prelude::PolarsError;

/// Errors raised by the discovery core.
#[derive(Debug, thiserror::Error)]
pub enum MvdError {
    #[error("dataset error: {0}")]
    Dataset(#[from] PolarsError),

    #[error("unknown attribute `{0}`")]
    UnknownAttribute(Attribute),

    #[error("unit analysis panicked: {0}")]
    UnitPanicked(String),

    #[error("journal error: {0}")]
    Journal(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MvdError>;
