use anyhow::Result;
use capacity_estimator::config::{AppConfig, OutputFormat};
use capacity_estimator::estimate::Estimate;
use capacity_estimator::point_container::PointContainer;
use capacity_estimator::source::{JsonFileSource, fetch_all};
use capacity_estimator::{report, version};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let app_config = AppConfig::load()?;
    tracing::info!(
        name = version::NAME,
        version = version::VERSION,
        source = %app_config.source.path,
        period_secs = app_config.source.period_secs,
        "starting"
    );

    let source = JsonFileSource::new(&app_config.source.path);
    let window = app_config.source.window()?;
    let series = fetch_all(
        &source,
        app_config.source.period_secs,
        window,
        chrono::Utc::now(),
    )
    .await?;

    let container = PointContainer::new(
        &series.request_count,
        &series.healthy_host_count,
        &series.cpu_utilization,
    )?;
    let estimate = Estimate::compute(&container, &app_config.thresholds.thresholds())?;

    match app_config.output.format {
        OutputFormat::Log => report::log_estimate(&estimate),
        OutputFormat::Json => println!("{}", report::to_json(&estimate)?),
    }

    Ok(())
}
