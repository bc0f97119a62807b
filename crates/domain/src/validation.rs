// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{LookupData, MaterialCategory};
use rust_decimal::Decimal;

/// Validates a name that must not be blank.
///
/// # Errors
///
/// Returns `EmptyName` if the name is empty after trimming.
pub fn validate_name(what: &'static str, name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::EmptyName(what));
    }
    Ok(())
}

/// Validates that a price, rate or quantity is not negative.
///
/// # Errors
///
/// Returns `NegativeAmount` if `amount` is below zero.
pub fn validate_non_negative(field: &str, amount: Decimal) -> Result<(), DomainError> {
    if amount < Decimal::ZERO {
        return Err(DomainError::NegativeAmount {
            field: field.to_string(),
            amount,
        });
    }
    Ok(())
}

/// Validates that lookup data fits the material's category.
///
/// Pipes may carry only pipe ranges and motors only horsepower ranges.
/// Other categories carry none. Ranges must not be inverted and no bound
/// may be negative.
///
/// # Errors
///
/// Returns `InvalidLookupData` describing the first problem found.
pub fn validate_lookup_data(
    material: &str,
    category: MaterialCategory,
    lookup_data: Option<&LookupData>,
) -> Result<(), DomainError> {
    let invalid = |reason: String| DomainError::InvalidLookupData {
        material: material.to_string(),
        reason,
    };

    match (category, lookup_data) {
        (_, None) => Ok(()),
        (
            MaterialCategory::Pipe,
            Some(LookupData::Pipe {
                gpm_min,
                gpm_max,
                friction_loss,
            }),
        ) => {
            if *gpm_min < Decimal::ZERO || *friction_loss < Decimal::ZERO {
                return Err(invalid(String::from("values must not be negative")));
            }
            if gpm_min > gpm_max {
                return Err(invalid(format!(
                    "gpmMin {gpm_min} is greater than gpmMax {gpm_max}"
                )));
            }
            Ok(())
        }
        (MaterialCategory::Motor, Some(LookupData::Motor { hp_min, hp_max })) => {
            if *hp_min < Decimal::ZERO {
                return Err(invalid(String::from("values must not be negative")));
            }
            if hp_min > hp_max {
                return Err(invalid(format!(
                    "hpMin {hp_min} is greater than hpMax {hp_max}"
                )));
            }
            Ok(())
        }
        (category, Some(_)) => Err(invalid(format!(
            "lookup data does not apply to category {category}"
        ))),
    }
}

/// Validates a sales tax rate given as a fraction.
///
/// # Errors
///
/// Returns `NegativeAmount` for a negative rate, `InvalidDecimal` for a
/// rate above 1.
pub fn validate_tax_rate(rate: Decimal) -> Result<(), DomainError> {
    validate_non_negative("default_sales_tax_rate", rate)?;
    if rate > Decimal::ONE {
        return Err(DomainError::InvalidDecimal {
            field: String::from("default_sales_tax_rate"),
            value: rate.to_string(),
        });
    }
    Ok(())
}
