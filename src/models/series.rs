// Raw metric series as returned by the metrics backend

use chrono::{DateTime, Utc};
use serde::Deserialize;

pub type Timestamp = DateTime<Utc>;

/// Backend aggregation applied to each period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    Sum,
    Average,
}

/// The three metrics a capacity estimate is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    RequestCount,
    HealthyHostCount,
    CpuUtilization,
}

impl MetricKind {
    pub const ALL: [MetricKind; 3] = [
        MetricKind::RequestCount,
        MetricKind::HealthyHostCount,
        MetricKind::CpuUtilization,
    ];

    /// Request count is summed per period; the other two are averaged.
    pub fn statistic(self) -> Statistic {
        match self {
            MetricKind::RequestCount => Statistic::Sum,
            MetricKind::HealthyHostCount | MetricKind::CpuUtilization => Statistic::Average,
        }
    }

    /// Metric name as known to the backend.
    pub fn metric_name(self) -> &'static str {
        match self {
            MetricKind::RequestCount => "RequestCount",
            MetricKind::HealthyHostCount => "HealthyHostCount",
            MetricKind::CpuUtilization => "CPUUtilization",
        }
    }
}

/// One reading of one metric at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSample {
    pub timestamp: Timestamp,
    pub value: f64,
}

impl RawSample {
    pub fn new(timestamp: Timestamp, value: f64) -> Self {
        Self { timestamp, value }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub metric: MetricKind,
    pub samples: Vec<RawSample>,
}

impl Series {
    pub fn new(metric: MetricKind, samples: Vec<RawSample>) -> Self {
        Self { metric, samples }
    }

    pub fn empty(metric: MetricKind) -> Self {
        Self::new(metric, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
