use crate::narrator::ChatCompletionNarrator;
use coverage_gap::analysis::{
    CoverageAnalysisService, DisabledNarrator, NarrativeError, NarrativeRequest, Narrator,
};
use coverage_gap::config::NarrativeConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Narrator selected at startup from the environment.
pub(crate) enum ConfiguredNarrator {
    Remote(ChatCompletionNarrator),
    Disabled(DisabledNarrator),
}

impl Narrator for ConfiguredNarrator {
    async fn narrate(&self, request: NarrativeRequest) -> Result<String, NarrativeError> {
        match self {
            ConfiguredNarrator::Remote(narrator) => narrator.narrate(request).await,
            ConfiguredNarrator::Disabled(narrator) => narrator.narrate(request).await,
        }
    }
}

pub(crate) fn build_narrator(config: &NarrativeConfig) -> ConfiguredNarrator {
    if !config.is_enabled() {
        info!("GROQ_API_KEY not set; advisor narratives disabled");
        return ConfiguredNarrator::Disabled(DisabledNarrator);
    }

    match ChatCompletionNarrator::from_config(config) {
        Ok(narrator) => {
            info!(model = narrator.model(), "advisor narratives enabled");
            ConfiguredNarrator::Remote(narrator)
        }
        Err(err) => {
            warn!("advisor narratives disabled: {err}");
            ConfiguredNarrator::Disabled(DisabledNarrator)
        }
    }
}

pub(crate) fn analysis_service(
    config: &NarrativeConfig,
) -> Arc<CoverageAnalysisService<ConfiguredNarrator>> {
    let narrator = Arc::new(build_narrator(config));
    Arc::new(CoverageAnalysisService::new(narrator))
}
