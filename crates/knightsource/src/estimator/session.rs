use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{CategoryId, EstimatorConfig, Role};
use super::valuation::{resolve, round_currency, ValuationError};

/// One row of the estimate breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: CategoryId,
    pub label: String,
    pub min: f64,
    pub max: f64,
}

/// Savings estimate derived from a selection. Totals are whole currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationResult {
    pub total_min: i64,
    pub total_max: i64,
    pub midpoint: i64,
    pub line_items: Vec<LineItem>,
}

/// Why an estimate cannot be produced from the current selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreconditionError {
    #[error("select at least one benefit category")]
    EmptySelection,
    #[error("category '{category}' requires choosing individual or rso")]
    RoleRequired { category: CategoryId },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EstimatorError {
    #[error(transparent)]
    Precondition(#[from] PreconditionError),
    #[error(transparent)]
    Valuation(#[from] ValuationError),
}

/// Mutable selection owned by a single estimation session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub chosen: BTreeSet<CategoryId>,
    pub role: Option<Role>,
}

/// Interactive estimator bound to one immutable category catalog.
#[derive(Debug, Clone)]
pub struct EstimationSession {
    config: Arc<EstimatorConfig>,
    selection: SelectionState,
    latest: Option<EstimationResult>,
}

impl EstimationSession {
    pub fn new(config: Arc<EstimatorConfig>) -> Self {
        Self {
            config,
            selection: SelectionState::default(),
            latest: None,
        }
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn role(&self) -> Option<Role> {
        self.selection.role
    }

    /// Adds or removes a category. Ids missing from the catalog are ignored.
    pub fn toggle_category(&mut self, id: &CategoryId, selected: bool) {
        if !self.config.contains(id) {
            debug!(category = %id, "ignoring toggle for unknown category");
            return;
        }

        if selected {
            self.selection.chosen.insert(id.clone());
        } else {
            self.selection.chosen.remove(id);
        }
    }

    pub fn set_role(&mut self, role: Option<Role>) {
        self.selection.role = role;
    }

    /// Whether any selected category is valued by role.
    pub fn requires_role(&self) -> bool {
        self.first_role_dependent().is_some()
    }

    pub fn can_estimate(&self) -> bool {
        self.check_preconditions().is_ok()
    }

    /// Computes the estimate for the current selection without touching session state.
    pub fn estimate(&self) -> Result<EstimationResult, EstimatorError> {
        self.check_preconditions()?;

        let role = self.selection.role;
        let mut total_min = 0.0;
        let mut total_max = 0.0;
        let mut line_items = Vec::new();

        for category in self.config.categories() {
            if !self.selection.chosen.contains(&category.id) {
                continue;
            }

            let Some(contribution) = resolve(category, role)? else {
                continue;
            };

            total_min += contribution.min;
            total_max += contribution.max;
            line_items.push(LineItem {
                id: category.id.clone(),
                label: category.label.clone(),
                min: contribution.min,
                max: contribution.max,
            });
        }

        Ok(EstimationResult {
            total_min: round_currency(total_min),
            total_max: round_currency(total_max),
            midpoint: round_currency((total_min + total_max) / 2.0),
            line_items,
        })
    }

    /// Estimates and keeps the result as the session's latest outcome.
    pub fn calculate(&mut self) -> Result<&EstimationResult, EstimatorError> {
        let result = self.estimate()?;
        debug!(
            total_min = result.total_min,
            total_max = result.total_max,
            items = result.line_items.len(),
            "savings estimate calculated"
        );
        Ok(&*self.latest.insert(result))
    }

    pub fn latest(&self) -> Option<&EstimationResult> {
        self.latest.as_ref()
    }

    pub fn reset(&mut self) {
        self.selection = SelectionState::default();
        self.latest = None;
    }

    fn check_preconditions(&self) -> Result<(), PreconditionError> {
        if self.selection.chosen.is_empty() {
            return Err(PreconditionError::EmptySelection);
        }

        if self.selection.role.is_none() {
            if let Some(category) = self.first_role_dependent() {
                return Err(PreconditionError::RoleRequired { category });
            }
        }

        Ok(())
    }

    fn first_role_dependent(&self) -> Option<CategoryId> {
        self.config
            .categories()
            .iter()
            .find(|category| {
                category.requires_role() && self.selection.chosen.contains(&category.id)
            })
            .map(|category| category.id.clone())
    }
}
