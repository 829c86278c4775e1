use std::fs;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use super::catalog::category_entry;

/// Accordion entry for a single program within a category page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    pub name: String,
    pub description_md: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub financial_value_md: String,
    #[serde(default)]
    pub exceptions_md: String,
    #[serde(default)]
    pub steps_md: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryContent {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
}

/// Headline figures shown on the landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteStats {
    pub total_resources: u32,
    pub avg_savings_per_student: u32,
    pub top_categories: u32,
    pub time_to_first_win: String,
    /// Raw estimator block. The service uses it as the category catalog when it
    /// has that shape and no catalog file is configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings_estimator: Option<serde_json::Value>,
}

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("unknown content category '{0}'")]
    UnknownCategory(String),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid content JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl ContentError {
    /// True when the requested content simply does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            ContentError::UnknownCategory(_) => true,
            ContentError::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            ContentError::Json { .. } => false,
        }
    }
}

/// Reads category and stats documents from a content directory on demand.
#[derive(Debug, Clone)]
pub struct ContentLibrary {
    root: PathBuf,
}

impl ContentLibrary {
    pub fn open<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Loads `categories/<slug>.json`. Only catalog slugs are accepted.
    pub fn category(&self, slug: &str) -> Result<CategoryContent, ContentError> {
        let entry =
            category_entry(slug).ok_or_else(|| ContentError::UnknownCategory(slug.to_string()))?;
        let path = self
            .root
            .join("categories")
            .join(format!("{}.json", entry.slug));
        read_json(&path)
    }

    pub fn stats(&self) -> Result<SiteStats, ContentError> {
        read_json(&self.root.join("stats.json"))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ContentError> {
    debug!(path = %path.display(), "loading content document");
    let raw = fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ContentError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    static FIXTURE_SEQUENCE: AtomicU32 = AtomicU32::new(0);

    fn fixture_dir() -> PathBuf {
        let id = FIXTURE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir().join(format!(
            "knightsource-content-{}-{id}",
            std::process::id()
        ));
        fs::create_dir_all(dir.join("categories")).expect("create fixture dir");
        dir
    }

    const LEGAL: &str = r#"{
      "title": "Legal",
      "description": "Free legal help for enrolled students.",
      "subcategories": [
        {
          "name": "Student Legal Services",
          "description_md": "Consultations with licensed attorneys.",
          "phone": "407-823-2538",
          "location": "Student Union 155",
          "financial_value_md": "Consults valued at **$300**.",
          "exceptions_md": "No student-vs-student disputes.",
          "steps_md": "1. Book online\n2. Bring documents"
        }
      ]
    }"#;

    #[test]
    fn loads_category_documents() {
        let dir = fixture_dir();
        fs::write(dir.join("categories/legal.json"), LEGAL).expect("write fixture");

        let content = ContentLibrary::open(&dir)
            .category("legal")
            .expect("legal content loads");
        assert_eq!(content.title, "Legal");
        assert_eq!(content.subcategories.len(), 1);
        assert_eq!(content.subcategories[0].location, "Student Union 155");

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn rejects_slugs_outside_catalog() {
        let dir = fixture_dir();
        let library = ContentLibrary::open(&dir);
        let err = library
            .category("../stats")
            .expect_err("traversal rejected");
        assert!(matches!(err, ContentError::UnknownCategory(_)));
        assert!(err.is_not_found());

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn missing_documents_are_not_found() {
        let dir = fixture_dir();
        let library = ContentLibrary::open(&dir);
        let err = library.category("recreation").expect_err("file missing");
        assert!(matches!(err, ContentError::Io { .. }));
        assert!(err.is_not_found());

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn invalid_json_is_reported_with_path() {
        let dir = fixture_dir();
        fs::write(dir.join("stats.json"), "{\"totalResources\": }").expect("write fixture");

        let err = ContentLibrary::open(&dir)
            .stats()
            .expect_err("invalid json rejected");
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("stats.json"));

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn stats_keep_estimator_block_opaque() {
        let dir = fixture_dir();
        fs::write(
            dir.join("stats.json"),
            r#"{
              "totalResources": 42,
              "avgSavingsPerStudent": 2400,
              "topCategories": 5,
              "timeToFirstWin": "2 minutes",
              "savingsEstimator": {"baseValue": 1200, "housingBonus": 300}
            }"#,
        )
        .expect("write fixture");

        let stats = ContentLibrary::open(&dir).stats().expect("stats load");
        assert_eq!(stats.total_resources, 42);
        assert_eq!(stats.time_to_first_win, "2 minutes");
        let estimator = stats.savings_estimator.expect("estimator block kept");
        assert_eq!(estimator["baseValue"], 1200);

        let _ = fs::remove_dir_all(dir);
    }
}
