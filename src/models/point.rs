// One timestamp-aligned record of the three metrics plus derived formulas.
// Division by zero is not an error here: results propagate as Inf/NaN.

use serde::Serialize;

use super::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    pub timestamp: Timestamp,
    /// Sum of requests over the period.
    pub request_count: f64,
    /// Average healthy hosts over the period; may be 0.
    pub healthy_host_count: f64,
    /// Average fleet CPU utilization, in percent.
    pub cpu_utilization: f64,
}

impl Point {
    /// Empty point at `timestamp`; fields are filled in as series are merged.
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            request_count: 0.0,
            healthy_host_count: 0.0,
            cpu_utilization: 0.0,
        }
    }

    pub fn cpu_utilization_per_request(&self) -> f64 {
        self.request_count / self.healthy_host_count / self.cpu_utilization
    }

    pub fn request_count_per_host(&self) -> f64 {
        self.request_count / self.healthy_host_count
    }

    /// Hosts needed to hold CPU at `ratio` (e.g. 0.5) using this point's own cost.
    pub fn required_host_count(&self, ratio: f64) -> f64 {
        self.request_count / self.cpu_utilization_per_request() / 100.0 / ratio
    }

    /// Like [`Point::required_host_count`] but with a smoothed CPU-per-request.
    pub fn estimated_required_host_count(&self, cpu_per_request: f64, ratio: f64) -> f64 {
        self.request_count / cpu_per_request / 100.0 / ratio
    }

    /// CPU reading expected from the smoothed cost at this point's load.
    pub fn estimated_current_cpu_utilization(&self, recent_average_cpu_per_request: f64) -> f64 {
        self.request_count / recent_average_cpu_per_request / self.healthy_host_count
    }
}
