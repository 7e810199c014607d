use credit_score::bureau::MockBureauProvider;
use credit_score::config::ScoringSource;
use credit_score::error::AppError;
use credit_score::scoring::{CreditScoringEngine, ScoringPolicy, ScoringService};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type LocalScoringService = ScoringService<MockBureauProvider>;

/// Standard policy unless `APP_SCORING_POLICY` points at a JSON override.
pub(crate) fn load_policy(source: &ScoringSource) -> Result<ScoringPolicy, AppError> {
    match &source.policy_path {
        Some(path) => {
            let policy = ScoringPolicy::from_path(path)?;
            info!(path = %path.display(), "loaded scoring policy override");
            Ok(policy)
        }
        None => Ok(ScoringPolicy::standard()),
    }
}

pub(crate) fn build_scoring_service(
    source: &ScoringSource,
) -> Result<Arc<LocalScoringService>, AppError> {
    let engine = CreditScoringEngine::new(load_policy(source)?);
    Ok(Arc::new(ScoringService::new(
        Arc::new(engine),
        Arc::new(MockBureauProvider::seeded()),
    )))
}
