use crate::{
    config::SponsorNoiseConfig,
    error::DashResult,
    event::DashEvent,
    rng::StreamRng,
    seed::SeedData,
    types::Tick,
    updater::LiveUpdater,
};

/// Jitters each sponsor's overall fulfillment and digital impressions.
///
/// Fulfillment is kept within [0, 100]. Sponsors without a fulfillment
/// or performance section are left alone.
pub struct SponsorNoiseUpdater {
    config: SponsorNoiseConfig,
}

impl SponsorNoiseUpdater {
    pub fn new(config: SponsorNoiseConfig) -> Self {
        Self { config }
    }
}

impl LiveUpdater for SponsorNoiseUpdater {
    fn name(&self) -> &'static str { "sponsor_noise" }

    fn update(
        &mut self,
        tick: Tick,
        _events_in: &[DashEvent],
        data: &mut SeedData,
        rng: &mut StreamRng,
    ) -> DashResult<Vec<DashEvent>> {
        let mut events = Vec::new();

        for sponsor in &mut data.sponsors {
            // Draw both variances up front so a sponsor's stream usage
            // does not depend on which sections it carries.
            let v_fulfillment = rng.centered(self.config.variance_span);
            let v_impressions = rng.centered(self.config.variance_span);

            if let Some(overall) = sponsor.fulfillment.as_mut().and_then(|f| f.overall.as_mut()) {
                let old_value = *overall;
                let new_value =
                    (old_value + v_fulfillment * self.config.fulfillment_scale).clamp(0.0, 100.0);
                *overall = new_value;
                events.push(DashEvent::SponsorFulfillmentUpdated {
                    tick,
                    sponsor_id: sponsor.id,
                    old_value,
                    new_value,
                });
            }

            if let Some(impressions) = sponsor
                .performance
                .as_mut()
                .and_then(|p| p.digital_impressions.as_mut())
            {
                let old_value = *impressions;
                let scaled =
                    old_value as f64 * (1.0 + v_impressions * self.config.impressions_scale);
                let new_value = scaled.floor().max(0.0) as u64;
                *impressions = new_value;
                events.push(DashEvent::SponsorImpressionsUpdated {
                    tick,
                    sponsor_id: sponsor.id,
                    old_value,
                    new_value,
                });
            }
        }

        log::debug!("tick={tick} sponsor_noise: {} changes", events.len());
        Ok(events)
    }

    fn as_any(&self) -> &dyn std::any::Any { self }
}
