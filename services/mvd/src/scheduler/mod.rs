pub mod clock;
pub mod plan;
pub mod scheduler;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use plan::{attribute_groups, row_blocks, ChunkPlan, ExecutionMode};
pub use scheduler::{AnalysisOutcome, ChunkScheduler, UnitAnalyzer};
