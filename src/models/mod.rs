// Domain models

mod point;
mod series;

pub use point::Point;
pub use series::{MetricKind, RawSample, Series, Statistic, Timestamp};
