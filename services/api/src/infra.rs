use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use knightsource::assistant::{AnswerSource, AssistantService};
use knightsource::config::{AssistantConfig, DataConfig};
use knightsource::content::ContentLibrary;
use knightsource::estimator::{EstimatorConfig, EstimatorConfigError};
use tracing::{debug, info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Shared read-only collaborators handed to the routers.
pub(crate) struct Services {
    pub(crate) estimator: Arc<EstimatorConfig>,
    pub(crate) content: Arc<ContentLibrary>,
    pub(crate) assistant: Arc<AssistantService<Box<dyn AnswerSource>>>,
}

impl Services {
    pub(crate) fn from_config(
        data: &DataConfig,
        assistant: &AssistantConfig,
    ) -> Result<Self, EstimatorConfigError> {
        let content = ContentLibrary::open(data.content_dir.clone());

        let estimator = match &data.estimator_config_path {
            Some(path) => {
                let config = EstimatorConfig::from_path(path)?;
                info!(
                    path = %path.display(),
                    categories = config.categories().len(),
                    "estimator catalog loaded"
                );
                config
            }
            None => stats_catalog(&content).unwrap_or_else(|| {
                info!("using built-in estimator catalog");
                EstimatorConfig::campus_default()
            }),
        };

        match &assistant.endpoint {
            Some(endpoint) => info!(%endpoint, "assistant uses remote answer service"),
            None => info!("assistant answers from keywords only"),
        }

        Ok(Self {
            estimator: Arc::new(estimator),
            content: Arc::new(content),
            assistant: Arc::new(AssistantService::connect(assistant.endpoint.as_deref())),
        })
    }
}

/// Category catalog published in the site stats under `savingsEstimator`, if
/// that block is one.
fn stats_catalog(content: &ContentLibrary) -> Option<EstimatorConfig> {
    let stats = match content.stats() {
        Ok(stats) => stats,
        Err(err) if err.is_not_found() => {
            debug!("no site stats document, skipping stats estimator catalog");
            return None;
        }
        Err(err) => {
            warn!(error = %err, "site stats unreadable, skipping stats estimator catalog");
            return None;
        }
    };

    match EstimatorConfig::from_value(stats.savings_estimator?) {
        Ok(config) => {
            info!(
                categories = config.categories().len(),
                "estimator catalog loaded from site stats"
            );
            Some(config)
        }
        Err(err) => {
            info!(error = %err, "site stats estimator block is not a category catalog");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn content_fixture(name: &str, stats: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "knightsource-api-{name}-{}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).expect("create fixture dir");
        fs::write(dir.join("stats.json"), stats).expect("write stats");
        dir
    }

    fn data(content_dir: PathBuf) -> DataConfig {
        DataConfig {
            estimator_config_path: None,
            content_dir,
        }
    }

    #[test]
    fn falls_back_to_builtin_catalog() {
        let services = Services::from_config(
            &data(PathBuf::from("content")),
            &AssistantConfig::default(),
        )
        .expect("services build");
        assert_eq!(services.estimator.categories().len(), 6);
        assert_eq!(services.content.root(), PathBuf::from("content").as_path());
    }

    #[test]
    fn surfaces_missing_catalog_file() {
        let data = DataConfig {
            estimator_config_path: Some(PathBuf::from(
                "/nonexistent/knightsource/estimator.json",
            )),
            content_dir: PathBuf::from("content"),
        };
        assert!(matches!(
            Services::from_config(&data, &AssistantConfig::default()),
            Err(EstimatorConfigError::Io(_))
        ));
    }

    #[test]
    fn uses_catalog_published_in_site_stats() {
        let dir = content_fixture(
            "stats-catalog",
            r#"{
              "totalResources": 42,
              "avgSavingsPerStudent": 2400,
              "topCategories": 5,
              "timeToFirstWin": "2 days",
              "savingsEstimator": {"categories": [
                {"id": "legal", "label": "Legal Services", "kind": "fixed", "fixedAmount": 300},
                {"id": "gym", "label": "Recreation", "kind": "fixed", "fixedAmount": 450}
              ]}
            }"#,
        );

        let services = Services::from_config(&data(dir.clone()), &AssistantConfig::default())
            .expect("services build");
        let ids: Vec<&str> = services
            .estimator
            .categories()
            .iter()
            .map(|category| category.id.as_str())
            .collect();
        assert_eq!(ids, vec!["legal", "gym"]);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn class_year_stats_block_keeps_builtin_catalog() {
        let dir = content_fixture(
            "stats-class-year",
            r#"{
              "totalResources": 42,
              "avgSavingsPerStudent": 2400,
              "topCategories": 5,
              "timeToFirstWin": "2 days",
              "savingsEstimator": {"classYears": ["freshman", "senior"], "housing": {}}
            }"#,
        );

        let services = Services::from_config(&data(dir.clone()), &AssistantConfig::default())
            .expect("services build");
        assert_eq!(services.estimator.categories().len(), 6);

        let _ = fs::remove_dir_all(dir);
    }
}
