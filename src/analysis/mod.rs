pub mod collectors;
pub mod pipeline;
pub mod stats_calculator;
pub mod timeline;

pub use collectors::Collectors;
pub use pipeline::AggregationPipeline;
pub use stats_calculator::{ScoreWeights, StatsCalculator};
pub use timeline::TimelineBuilder;
