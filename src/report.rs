// Presentation: log lines (local time) or JSON.

use tracing::info;

use crate::estimate::{Estimate, HostCounts};
use crate::models::Timestamp;

/// Undefined values print as "-".
fn fmt_opt(v: Option<f64>, precision: usize) -> String {
    match v {
        Some(v) => format!("{:.*}", precision, v),
        None => "-".to_string(),
    }
}

fn fmt_hosts(h: &HostCounts) -> String {
    format!(
        "{}, {}, {}",
        fmt_opt(h.upper, 0),
        fmt_opt(h.middle, 0),
        fmt_opt(h.lower, 0)
    )
}

fn local_time(ts: &Timestamp) -> String {
    ts.with_timezone(&chrono::Local)
        .format("%Y-%m-%dT%H:%M:%S%:z")
        .to_string()
}

pub fn log_estimate(estimate: &Estimate) {
    let avg = estimate.recent_average_cpu_utilization_per_request;
    for p in &estimate.points {
        info!(
            "[{}] ReqCount: {:.0}, HostCount: {:.0}, CPU: {:6.2}({}), ReqPerHost: {}, Required: {}; E-Host: {}; E-CPU: {}, RecentAvg: {:.2}",
            local_time(&p.timestamp),
            p.request_count,
            p.healthy_host_count,
            p.cpu_utilization,
            fmt_opt(p.cpu_utilization_per_request, 2),
            fmt_opt(p.request_count_per_host, 2),
            fmt_hosts(&p.required_host_count),
            fmt_opt(p.estimated_required_host_count, 2),
            fmt_opt(p.estimated_cpu_utilization, 2),
            avg,
        );
    }

    let s = &estimate.summary;
    let t = &estimate.thresholds;
    info!(
        "EstimatedCurrentCPUUtilization: {}",
        fmt_opt(s.estimated_current_cpu_utilization, 2)
    );
    for (ratio, hosts) in [
        (t.upper, s.estimated_required_host_count.upper),
        (t.middle, s.estimated_required_host_count.middle),
        (t.lower, s.estimated_required_host_count.lower),
    ] {
        info!(
            "EstimatedRequiredHostCount({:.0}%): {}",
            ratio * 100.0,
            fmt_opt(hosts, 0)
        );
    }
}

pub fn to_json(estimate: &Estimate) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(estimate)?)
}
