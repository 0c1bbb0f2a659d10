use crate::{
    config::MetricsNoiseConfig,
    error::DashResult,
    event::DashEvent,
    rng::StreamRng,
    seed::SeedData,
    types::Tick,
    updater::LiveUpdater,
};

/// Drifts the header metrics: revenue only ever grows, utilization
/// random-walks inside its configured band.
pub struct MetricsNoiseUpdater {
    config: MetricsNoiseConfig,
}

impl MetricsNoiseUpdater {
    pub fn new(config: MetricsNoiseConfig) -> Self {
        Self { config }
    }
}

impl LiveUpdater for MetricsNoiseUpdater {
    fn name(&self) -> &'static str { "metrics_noise" }

    fn update(
        &mut self,
        tick: Tick,
        _events_in: &[DashEvent],
        data: &mut SeedData,
        rng: &mut StreamRng,
    ) -> DashResult<Vec<DashEvent>> {
        let metrics = &mut data.metrics;

        metrics.total_revenue += rng.uniform(0.0, self.config.revenue_increment_max);
        metrics.facility_utilization = (metrics.facility_utilization
            + rng.centered(self.config.utilization_span))
        .clamp(self.config.utilization_min, self.config.utilization_max);

        log::debug!(
            "tick={tick} metrics_noise: revenue={:.0} utilization={:.1}",
            metrics.total_revenue,
            metrics.facility_utilization
        );

        Ok(vec![DashEvent::MetricsUpdated {
            tick,
            total_revenue: metrics.total_revenue,
            facility_utilization: metrics.facility_utilization,
        }])
    }

    fn as_any(&self) -> &dyn std::any::Any { self }
}
