use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::estimator::domain::{CategoryId, CategoryValuation, EstimatorConfig, Role};
use crate::estimator::session::EstimationSession;

pub(super) fn legal_and_travel() -> Arc<EstimatorConfig> {
    Arc::new(
        EstimatorConfig::new(vec![
            CategoryValuation::fixed("legal", "Legal Services", 300.0),
            CategoryValuation::by_role("crt", "Conference Travel", 400.0, 1500.0),
        ])
        .expect("unique ids"),
    )
}

pub(super) fn mixed_catalog() -> Arc<EstimatorConfig> {
    Arc::new(
        EstimatorConfig::new(vec![
            CategoryValuation::fixed("legal", "Legal Services", 300.0),
            CategoryValuation::range("healthcare", "Healthcare", 200.0, 800.0),
            CategoryValuation::by_role("crt", "Conference Travel", 400.0, 1500.0),
            CategoryValuation::range("academics", "Academic Support", 150.5, 600.0),
            CategoryValuation::fixed("recreation", "Recreation & Wellness", 450.0),
        ])
        .expect("unique ids"),
    )
}

pub(super) fn id(raw: &str) -> CategoryId {
    CategoryId::from(raw)
}

pub(super) fn session_with(
    config: Arc<EstimatorConfig>,
    selected: &[&str],
    role: Option<Role>,
) -> EstimationSession {
    let mut session = EstimationSession::new(config);
    for raw in selected {
        session.toggle_category(&id(raw), true);
    }
    session.set_role(role);
    session
}

/// Every non-empty subset of `ids`, each listed in the order of `ids`.
pub(super) fn non_empty_subsets<'a>(ids: &[&'a str]) -> Vec<Vec<&'a str>> {
    (1u32..(1 << ids.len()))
        .map(|mask| {
            ids.iter()
                .enumerate()
                .filter(|(index, _)| mask & (1 << index) != 0)
                .map(|(_, raw)| *raw)
                .collect()
        })
        .collect()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
