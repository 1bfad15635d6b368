use crate::core::{Pipeline, RunSummary};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct SweepEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> SweepEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting ban sweep");

        // Extract
        let loaded = self.pipeline.extract().await?;
        tracing::info!(
            "Loaded {} ban(s), {} malformed line(s)",
            loaded.records.len(),
            loaded.warnings.len()
        );
        self.monitor.log_stats("Extract");

        // Transform
        let classified = self.pipeline.transform(loaded).await?;
        tracing::info!(
            "Classified {} expired and {} active ban(s)",
            classified.expired.len(),
            classified.active.len()
        );
        self.monitor.log_stats("Transform");

        // Load
        let summary = self.pipeline.load(classified).await?;
        if summary.write_failures > 0 {
            tracing::warn!("{} ban(s) could not be written", summary.write_failures);
        }
        tracing::debug!(
            "Wrote {} and {}",
            summary.expired_path.display(),
            summary.active_path.display()
        );
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(summary)
    }
}
