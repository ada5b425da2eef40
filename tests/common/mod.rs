// Shared test helpers

#![allow(dead_code)]

use capacity_estimator::models::*;
use chrono::{TimeZone, Utc};

/// Minute `m` after a fixed epoch.
pub fn ts(m: i64) -> Timestamp {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap() + chrono::Duration::minutes(m)
}

pub fn series(metric: MetricKind, samples: &[(i64, f64)]) -> Series {
    Series::new(
        metric,
        samples
            .iter()
            .map(|&(m, v)| RawSample::new(ts(m), v))
            .collect(),
    )
}

/// Three aligned series from (requests, hosts, cpu) rows at minutes 0, 1, 2, ...
pub fn aligned(rows: &[(f64, f64, f64)]) -> (Series, Series, Series) {
    let rc: Vec<_> = rows.iter().enumerate().map(|(i, r)| (i as i64, r.0)).collect();
    let hh: Vec<_> = rows.iter().enumerate().map(|(i, r)| (i as i64, r.1)).collect();
    let cu: Vec<_> = rows.iter().enumerate().map(|(i, r)| (i as i64, r.2)).collect();
    (
        series(MetricKind::RequestCount, &rc),
        series(MetricKind::HealthyHostCount, &hh),
        series(MetricKind::CpuUtilization, &cu),
    )
}
