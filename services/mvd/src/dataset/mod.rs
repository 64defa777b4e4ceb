pub mod prepare;
pub mod view;

pub use prepare::{impute_missing, load_frame};
pub use view::DatasetView;
