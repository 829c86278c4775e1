use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::io::Read;
use std::path::Path;

/// Key identifying a benefit category inside an [`EstimatorConfig`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub String);

impl CategoryId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Standing of the student asking for an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Individual,
    /// Representing a registered student organization.
    Rso,
}

impl Role {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Rso => "rso",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Individual => "Individual",
            Self::Rso => "RSO / organization",
        }
    }

    /// Parses a role selection; blank input means "no role chosen".
    pub fn parse(raw: &str) -> Result<Option<Self>, UnknownRole> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "individual" => Ok(Some(Self::Individual)),
            "rso" => Ok(Some(Self::Rso)),
            _ => Err(UnknownRole(raw.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}', expected 'individual' or 'rso'")]
pub struct UnknownRole(pub String);

/// Estimation strategy used by a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValuationKind {
    #[serde(rename = "fixed")]
    Fixed,
    #[serde(rename = "range")]
    Range,
    #[serde(rename = "byRole")]
    ByRole,
}

/// One benefit category's estimation rule as supplied by content data.
///
/// The amount fields keep the raw JSON values and are only checked when the
/// category is resolved during an estimate, so a malformed entry does not
/// prevent the rest of the catalog from loading. `roleAmounts` is keyed by
/// role key; keys that are not a known role are never looked up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryValuation {
    pub id: CategoryId,
    pub label: String,
    pub kind: ValuationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_amount: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_min: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_max: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_amounts: Option<BTreeMap<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl CategoryValuation {
    pub fn fixed(id: &str, label: &str, amount: f64) -> Self {
        Self {
            fixed_amount: Some(Value::from(amount)),
            ..Self::bare(id, label, ValuationKind::Fixed)
        }
    }

    pub fn range(id: &str, label: &str, min: f64, max: f64) -> Self {
        Self {
            range_min: Some(Value::from(min)),
            range_max: Some(Value::from(max)),
            ..Self::bare(id, label, ValuationKind::Range)
        }
    }

    pub fn by_role(id: &str, label: &str, individual: f64, rso: f64) -> Self {
        let mut amounts = BTreeMap::new();
        amounts.insert(Role::Individual.key().to_string(), Value::from(individual));
        amounts.insert(Role::Rso.key().to_string(), Value::from(rso));
        Self {
            role_amounts: Some(amounts),
            ..Self::bare(id, label, ValuationKind::ByRole)
        }
    }

    pub fn with_display(mut self, emoji: &str, href: &str) -> Self {
        self.emoji = Some(emoji.to_string());
        self.href = Some(href.to_string());
        self
    }

    pub fn requires_role(&self) -> bool {
        self.kind == ValuationKind::ByRole
    }

    fn bare(id: &str, label: &str, kind: ValuationKind) -> Self {
        Self {
            id: CategoryId::from(id),
            label: label.to_string(),
            kind,
            fixed_amount: None,
            range_min: None,
            range_max: None,
            role_amounts: None,
            emoji: None,
            href: None,
        }
    }
}

/// Ordered, immutable catalog of category valuations with unique ids.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimatorConfig {
    categories: Vec<CategoryValuation>,
}

#[derive(Deserialize)]
struct EstimatorConfigDocument {
    categories: Vec<CategoryValuation>,
}

impl EstimatorConfig {
    pub fn new(categories: Vec<CategoryValuation>) -> Result<Self, EstimatorConfigError> {
        let mut seen = HashSet::new();
        for category in &categories {
            if !seen.insert(category.id.clone()) {
                return Err(EstimatorConfigError::DuplicateCategory(category.id.clone()));
            }
        }

        Ok(Self { categories })
    }

    pub fn from_json(raw: &str) -> Result<Self, EstimatorConfigError> {
        let document: EstimatorConfigDocument = serde_json::from_str(raw)?;
        Self::new(document.categories)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, EstimatorConfigError> {
        let document: EstimatorConfigDocument = serde_json::from_reader(reader)?;
        Self::new(document.categories)
    }

    /// Reads a catalog embedded in another document, such as the site stats.
    pub fn from_value(value: Value) -> Result<Self, EstimatorConfigError> {
        let document: EstimatorConfigDocument = serde_json::from_value(value)?;
        Self::new(document.categories)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, EstimatorConfigError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Catalog of the campus programs highlighted on the site.
    pub fn campus_default() -> Self {
        Self {
            categories: campus_categories(),
        }
    }

    pub fn categories(&self) -> &[CategoryValuation] {
        &self.categories
    }

    pub fn category(&self, id: &CategoryId) -> Option<&CategoryValuation> {
        self.categories.iter().find(|category| &category.id == id)
    }

    pub fn contains(&self, id: &CategoryId) -> bool {
        self.category(id).is_some()
    }
}

fn campus_categories() -> Vec<CategoryValuation> {
    vec![
        CategoryValuation::fixed("legal", "Legal Services", 300.0).with_display("⚖️", "/legal"),
        CategoryValuation::range("healthcare", "Healthcare", 200.0, 800.0)
            .with_display("🩺", "/healthcare"),
        CategoryValuation::by_role("crt", "Conference Travel", 400.0, 1500.0)
            .with_display("✈️", "/conferences"),
        CategoryValuation::range("academics", "Academic Support", 150.0, 600.0)
            .with_display("🎓", "/academics"),
        CategoryValuation::fixed("recreation", "Recreation & Wellness", 450.0)
            .with_display("🏋️", "/recreation"),
        CategoryValuation::range("discounts", "Ticket Center Discounts", 50.0, 250.0),
    ]
}

/// Failure to load an estimator catalog.
#[derive(Debug, thiserror::Error)]
pub enum EstimatorConfigError {
    #[error("failed to read estimator config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid estimator config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("category '{0}' is defined more than once")]
    DuplicateCategory(CategoryId),
}
