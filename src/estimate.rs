// Per-point derived metrics and the final capacity summary.
// Non-finite values are reported as None; callers never see Inf/NaN.

use serde::Serialize;

use crate::error::{EstimateError, EstimateResult};
use crate::models::{Point, Timestamp};
use crate::point_container::PointContainer;

/// Target CPU utilization ratios (0..=1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Thresholds {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl Thresholds {
    /// Middle is the midpoint of upper and lower.
    pub fn new(upper: f64, lower: f64) -> Self {
        Self {
            upper,
            middle: (upper + lower) / 2.0,
            lower,
        }
    }
}

/// A value computed at each of the three thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostCounts {
    pub upper: Option<f64>,
    pub middle: Option<f64>,
    pub lower: Option<f64>,
}

impl HostCounts {
    fn at(thresholds: &Thresholds, f: impl Fn(f64) -> f64) -> Self {
        Self {
            upper: finite(f(thresholds.upper)),
            middle: finite(f(thresholds.middle)),
            lower: finite(f(thresholds.lower)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointReport {
    pub timestamp: Timestamp,
    pub request_count: f64,
    pub healthy_host_count: f64,
    pub cpu_utilization: f64,
    pub cpu_utilization_per_request: Option<f64>,
    pub request_count_per_host: Option<f64>,
    /// From this point's own CPU-per-request.
    pub required_host_count: HostCounts,
    /// From the smoothed CPU-per-request at the middle threshold.
    pub estimated_required_host_count: Option<f64>,
    pub estimated_cpu_utilization: Option<f64>,
}

impl PointReport {
    pub fn new(point: &Point, thresholds: &Thresholds, smoothed_cpu_per_request: f64) -> Self {
        Self {
            timestamp: point.timestamp,
            request_count: point.request_count,
            healthy_host_count: point.healthy_host_count,
            cpu_utilization: point.cpu_utilization,
            cpu_utilization_per_request: finite(point.cpu_utilization_per_request()),
            request_count_per_host: finite(point.request_count_per_host()),
            required_host_count: HostCounts::at(thresholds, |r| point.required_host_count(r)),
            estimated_required_host_count: finite(
                point.estimated_required_host_count(smoothed_cpu_per_request, thresholds.middle),
            ),
            estimated_cpu_utilization: finite(
                point.estimated_current_cpu_utilization(smoothed_cpu_per_request),
            ),
        }
    }
}

/// Estimates for the latest settled point, from the smoothed CPU-per-request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub timestamp: Timestamp,
    pub estimated_current_cpu_utilization: Option<f64>,
    pub estimated_required_host_count: HostCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    pub thresholds: Thresholds,
    pub recent_average_cpu_utilization_per_request: f64,
    pub points: Vec<PointReport>,
    pub summary: Summary,
}

impl Estimate {
    pub fn compute(container: &PointContainer, thresholds: &Thresholds) -> EstimateResult<Self> {
        let latest = container
            .latest_point()
            .ok_or(EstimateError::InsufficientData("no settled datapoint"))?;
        let smoothed = container.smoothed_cpu_utilization_per_request().ok_or(
            EstimateError::InsufficientData("no datapoint with finite cpu per request"),
        )?;

        let points = container
            .points()
            .map(|p| PointReport::new(p, thresholds, smoothed))
            .collect();

        let summary = Summary {
            timestamp: latest.timestamp,
            estimated_current_cpu_utilization: finite(
                latest.estimated_current_cpu_utilization(smoothed),
            ),
            estimated_required_host_count: HostCounts::at(thresholds, |r| {
                latest.estimated_required_host_count(smoothed, r)
            }),
        };

        Ok(Self {
            thresholds: *thresholds,
            recent_average_cpu_utilization_per_request: smoothed,
            points,
            summary,
        })
    }
}

fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}
