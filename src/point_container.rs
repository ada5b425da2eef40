// Three-way outer merge of the raw series into settled, chronologically ordered points.
// Keys are full-precision timestamps; samples merge only on exact equality.
// The trailing point is dropped after merge: the backend may still be aggregating it.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{EstimateError, EstimateResult};
use crate::models::{Point, Series, Timestamp};

/// Max number of finite CPU-per-request values in the smoothing window.
pub const RECENT_WINDOW: usize = 6;

#[derive(Debug, Clone)]
pub struct PointContainer {
    points: BTreeMap<Timestamp, Point>,
}

impl PointContainer {
    /// Merges the three series by exact timestamp. A timestamp present in only some
    /// series still yields a point; the missing fields stay 0.
    pub fn new(
        request_count: &Series,
        healthy_host_count: &Series,
        cpu_utilization: &Series,
    ) -> EstimateResult<Self> {
        let mut points: BTreeMap<Timestamp, Point> = BTreeMap::new();

        merge_into(&mut points, request_count, |p, v| p.request_count = v);
        merge_into(&mut points, healthy_host_count, |p, v| {
            p.healthy_host_count = v
        });
        merge_into(&mut points, cpu_utilization, |p, v| p.cpu_utilization = v);

        let Some((_, dismissed)) = points.pop_last() else {
            return Err(EstimateError::EmptySeries);
        };
        debug!(
            merged = points.len() + 1,
            dismissed = %dismissed.timestamp,
            "dismissed trailing datapoint"
        );

        Ok(Self { points })
    }

    /// Retained timestamps, strictly ascending.
    pub fn ordered_keys(&self) -> Vec<Timestamp> {
        self.points.keys().copied().collect()
    }

    pub fn get(&self, timestamp: &Timestamp) -> Option<&Point> {
        self.points.get(timestamp)
    }

    /// Retained points, oldest first.
    pub fn points(&self) -> impl DoubleEndedIterator<Item = &Point> {
        self.points.values()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn latest_point(&self) -> Option<&Point> {
        self.points.last_key_value().map(|(_, p)| p)
    }

    /// Mean CPU-per-request over the [`RECENT_WINDOW`] most recent points whose value
    /// is finite. Points with Inf/NaN do not take a slot. NaN when none qualify.
    pub fn recent_average_cpu_utilization_per_request(&self) -> f64 {
        let (total, count) = self
            .points
            .values()
            .rev()
            .map(Point::cpu_utilization_per_request)
            .filter(|v| v.is_finite())
            .take(RECENT_WINDOW)
            .fold((0.0, 0usize), |(total, count), v| (total + v, count + 1));

        total / count as f64
    }

    /// The recent average, or `None` when it is undefined.
    pub fn smoothed_cpu_utilization_per_request(&self) -> Option<f64> {
        Some(self.recent_average_cpu_utilization_per_request()).filter(|v| v.is_finite())
    }
}

fn merge_into(
    points: &mut BTreeMap<Timestamp, Point>,
    series: &Series,
    set: impl Fn(&mut Point, f64),
) {
    for sample in &series.samples {
        let point = points
            .entry(sample.timestamp)
            .or_insert_with(|| Point::new(sample.timestamp));
        set(point, sample.value);
    }
}
