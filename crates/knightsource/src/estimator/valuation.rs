use serde_json::Value;

use super::domain::{CategoryId, CategoryValuation, Role, ValuationKind};

/// Data-integrity fault in a category record, detected when it is resolved.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValuationError {
    #[error("category '{0}' is fixed but has no fixedAmount")]
    MissingFixedAmount(CategoryId),
    #[error("category '{0}' is a range but is missing rangeMin or rangeMax")]
    MissingRangeBounds(CategoryId),
    #[error("category '{id}' has rangeMin {min} greater than rangeMax {max}")]
    InvertedRange { id: CategoryId, min: f64, max: f64 },
    #[error("category '{0}' is role-based but has no roleAmounts")]
    MissingRoleAmounts(CategoryId),
    #[error("category '{id}' has no amount for role '{role}'")]
    MissingRoleAmount { id: CategoryId, role: Role },
    #[error("category '{id}' has a non-numeric {field}")]
    InvalidAmount { id: CategoryId, field: String },
}

/// Unrounded contribution of a single category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Contribution {
    pub min: f64,
    pub max: f64,
}

/// Applies the category's strategy. `role` is only consulted for role-based categories.
pub(crate) fn resolve(
    category: &CategoryValuation,
    role: Option<Role>,
) -> Result<Option<Contribution>, ValuationError> {
    let id = &category.id;
    match category.kind {
        ValuationKind::Fixed => {
            let amount = read_amount(id, "fixedAmount", category.fixed_amount.as_ref())?
                .ok_or_else(|| ValuationError::MissingFixedAmount(id.clone()))?;
            Ok(Some(Contribution {
                min: amount,
                max: amount,
            }))
        }
        ValuationKind::Range => {
            let min = read_amount(id, "rangeMin", category.range_min.as_ref())?;
            let max = read_amount(id, "rangeMax", category.range_max.as_ref())?;
            let (Some(min), Some(max)) = (min, max) else {
                return Err(ValuationError::MissingRangeBounds(id.clone()));
            };
            if min > max {
                return Err(ValuationError::InvertedRange {
                    id: id.clone(),
                    min,
                    max,
                });
            }
            Ok(Some(Contribution { min, max }))
        }
        ValuationKind::ByRole => {
            let amounts = category
                .role_amounts
                .as_ref()
                .ok_or_else(|| ValuationError::MissingRoleAmounts(id.clone()))?;
            let Some(role) = role else {
                return Ok(None);
            };
            let field = format!("roleAmounts.{}", role.key());
            let amount = read_amount(id, &field, amounts.get(role.key()))?.ok_or_else(|| {
                ValuationError::MissingRoleAmount {
                    id: id.clone(),
                    role,
                }
            })?;
            Ok(Some(Contribution {
                min: amount,
                max: amount,
            }))
        }
    }
}

/// Reads a raw amount field. Absent and `null` mean "not set".
fn read_amount(
    id: &CategoryId,
    field: &str,
    raw: Option<&Value>,
) -> Result<Option<f64>, ValuationError> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| ValuationError::InvalidAmount {
                id: id.clone(),
                field: field.to_string(),
            }),
    }
}

/// Nearest whole currency unit, with halves rounded up.
pub fn round_currency(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_contributes_same_min_and_max() {
        let category = CategoryValuation::fixed("legal", "Legal Services", 300.0);
        let contribution = resolve(&category, None)
            .expect("fixed resolves")
            .expect("contribution present");
        assert_eq!(
            contribution,
            Contribution {
                min: 300.0,
                max: 300.0
            }
        );
    }

    #[test]
    fn range_requires_both_bounds() {
        let mut category = CategoryValuation::range("healthcare", "Healthcare", 200.0, 800.0);
        category.range_min = None;
        assert_eq!(
            resolve(&category, None),
            Err(ValuationError::MissingRangeBounds(CategoryId::from(
                "healthcare"
            )))
        );
    }

    #[test]
    fn range_rejects_inverted_bounds() {
        let category = CategoryValuation::range("healthcare", "Healthcare", 900.0, 800.0);
        assert!(matches!(
            resolve(&category, None),
            Err(ValuationError::InvertedRange { .. })
        ));
    }

    #[test]
    fn by_role_picks_the_selected_role() {
        let category = CategoryValuation::by_role("crt", "Conference Travel", 400.0, 1500.0);
        let individual = resolve(&category, Some(Role::Individual))
            .expect("resolves")
            .expect("present");
        let rso = resolve(&category, Some(Role::Rso))
            .expect("resolves")
            .expect("present");
        assert_eq!(individual.max, 400.0);
        assert_eq!(rso.min, 1500.0);
    }

    #[test]
    fn by_role_reports_missing_role_amount() {
        let mut category = CategoryValuation::by_role("crt", "Conference Travel", 400.0, 1500.0);
        if let Some(amounts) = category.role_amounts.as_mut() {
            amounts.remove("rso");
        }
        let err = resolve(&category, Some(Role::Rso)).expect_err("rso amount missing");
        assert_eq!(err.to_string(), "category 'crt' has no amount for role 'rso'");
    }

    #[test]
    fn fixed_without_amount_is_a_config_fault() {
        let mut category = CategoryValuation::fixed("legal", "Legal Services", 300.0);
        category.fixed_amount = None;
        assert!(matches!(
            resolve(&category, None),
            Err(ValuationError::MissingFixedAmount(_))
        ));
    }

    #[test]
    fn non_numeric_amounts_fail_on_resolve() {
        let mut range = CategoryValuation::range("healthcare", "Healthcare", 200.0, 800.0);
        range.range_min = Some(Value::from("200"));
        assert_eq!(
            resolve(&range, None),
            Err(ValuationError::InvalidAmount {
                id: CategoryId::from("healthcare"),
                field: "rangeMin".to_string(),
            })
        );

        let mut travel = CategoryValuation::by_role("crt", "Conference Travel", 400.0, 1500.0);
        if let Some(amounts) = travel.role_amounts.as_mut() {
            amounts.insert("rso".to_string(), Value::Bool(true));
        }
        let err = resolve(&travel, Some(Role::Rso)).expect_err("rso amount is not a number");
        assert_eq!(err.to_string(), "category 'crt' has a non-numeric roleAmounts.rso");
        assert!(resolve(&travel, Some(Role::Individual)).is_ok());
    }

    #[test]
    fn unknown_role_keys_are_never_consulted() {
        let mut travel = CategoryValuation::by_role("crt", "Conference Travel", 400.0, 1500.0);
        if let Some(amounts) = travel.role_amounts.as_mut() {
            amounts.insert("faculty".to_string(), Value::from("ten"));
        }
        let rso = resolve(&travel, Some(Role::Rso))
            .expect("resolves")
            .expect("present");
        assert_eq!(rso.max, 1500.0);
    }

    #[test]
    fn null_fixed_amount_counts_as_missing() {
        let mut category = CategoryValuation::fixed("legal", "Legal Services", 300.0);
        category.fixed_amount = Some(Value::Null);
        assert_eq!(
            resolve(&category, None),
            Err(ValuationError::MissingFixedAmount(CategoryId::from("legal")))
        );
    }

    #[test]
    fn currency_rounding_rounds_halves_up() {
        assert_eq!(round_currency(499.5), 500);
        assert_eq!(round_currency(499.49), 499);
        assert_eq!(round_currency(-0.5), 0);
        assert_eq!(round_currency(1800.0), 1800);
    }
}
