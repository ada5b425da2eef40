// Metrics backend seam: three range queries, fetched concurrently, merged only after all complete.

use std::future::Future;
use std::path::PathBuf;

use chrono::Duration;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::models::{MetricKind, RawSample, Series, Statistic, Timestamp};

/// One range query against the backend.
///
/// `statistic` and `period_secs` tell a live backend client how to aggregate.
/// [`JsonFileSource`] ignores both: its export is already aggregated.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricQuery {
    pub metric: MetricKind,
    pub statistic: Statistic,
    pub period_secs: u32,
    pub start: Timestamp,
    pub end: Timestamp,
}

impl MetricQuery {
    /// Query for the `window` ending at `end`.
    pub fn trailing(metric: MetricKind, period_secs: u32, window: Duration, end: Timestamp) -> Self {
        Self {
            metric,
            statistic: metric.statistic(),
            period_secs,
            start: end - window,
            end,
        }
    }

    pub fn contains(&self, ts: &Timestamp) -> bool {
        self.start <= *ts && *ts < self.end
    }
}

pub trait MetricsSource {
    fn fetch(&self, query: &MetricQuery) -> impl Future<Output = anyhow::Result<Series>> + Send;
}

/// The three series, in merge order.
#[derive(Debug, Clone)]
pub struct FetchedSeries {
    pub request_count: Series,
    pub healthy_host_count: Series,
    pub cpu_utilization: Series,
}

/// Issues the three queries concurrently; fails if any one fails.
#[instrument(skip(source, window), fields(window_secs = window.num_seconds()))]
pub async fn fetch_all<S: MetricsSource>(
    source: &S,
    period_secs: u32,
    window: Duration,
    end: Timestamp,
) -> anyhow::Result<FetchedSeries> {
    let [rc, hh, cu] =
        MetricKind::ALL.map(|m| MetricQuery::trailing(m, period_secs, window, end));

    let (request_count, healthy_host_count, cpu_utilization) =
        tokio::try_join!(source.fetch(&rc), source.fetch(&hh), source.fetch(&cu))?;

    debug!(
        request_count = request_count.samples.len(),
        healthy_host_count = healthy_host_count.samples.len(),
        cpu_utilization = cpu_utilization.samples.len(),
        "fetched series"
    );

    Ok(FetchedSeries {
        request_count,
        healthy_host_count,
        cpu_utilization,
    })
}

/// On-disk export of the three series.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeriesExport {
    #[serde(default)]
    request_count: Vec<RawSample>,
    #[serde(default)]
    healthy_host_count: Vec<RawSample>,
    #[serde(default)]
    cpu_utilization: Vec<RawSample>,
}

impl SeriesExport {
    fn take(self, metric: MetricKind) -> Vec<RawSample> {
        match metric {
            MetricKind::RequestCount => self.request_count,
            MetricKind::HealthyHostCount => self.healthy_host_count,
            MetricKind::CpuUtilization => self.cpu_utilization,
        }
    }
}

/// Reads series from a JSON export. Only `metric`, `start` and `end` of a query apply.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MetricsSource for JsonFileSource {
    async fn fetch(&self, query: &MetricQuery) -> anyhow::Result<Series> {
        let s = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| anyhow::anyhow!("read {}: {}", self.path.display(), e))?;
        let export: SeriesExport = serde_json::from_str(&s)?;
        let samples: Vec<RawSample> = export
            .take(query.metric)
            .into_iter()
            .filter(|s| query.contains(&s.timestamp))
            .collect();
        debug!(
            metric = query.metric.metric_name(),
            samples = samples.len(),
            "loaded series from file"
        );
        Ok(Series::new(query.metric, samples))
    }
}
