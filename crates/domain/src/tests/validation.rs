// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::dec;
use crate::{
    DomainError, LookupData, MaterialCategory, validate_lookup_data, validate_name,
    validate_non_negative, validate_tax_rate,
};

#[test]
fn test_blank_name_is_rejected() {
    assert_eq!(
        validate_name("Material", "   "),
        Err(DomainError::EmptyName("Material"))
    );
    assert!(validate_name("Material", "Concrete Pad").is_ok());
}

#[test]
fn test_negative_amount_is_rejected() {
    assert_eq!(
        validate_non_negative("price", dec("-0.01")),
        Err(DomainError::NegativeAmount {
            field: String::from("price"),
            amount: dec("-0.01"),
        })
    );
    assert!(validate_non_negative("price", dec("0")).is_ok());
}

#[test]
fn test_lookup_data_must_match_category() {
    let motor_range: LookupData = LookupData::Motor {
        hp_min: dec("3.5"),
        hp_max: dec("5.5"),
    };

    assert!(validate_lookup_data("5 HP Motor", MaterialCategory::Motor, Some(&motor_range)).is_ok());
    assert!(matches!(
        validate_lookup_data("2\" Pipe", MaterialCategory::Pipe, Some(&motor_range)),
        Err(DomainError::InvalidLookupData { .. })
    ));
    assert!(matches!(
        validate_lookup_data("#10", MaterialCategory::Wire, Some(&motor_range)),
        Err(DomainError::InvalidLookupData { .. })
    ));
    assert!(validate_lookup_data("#10", MaterialCategory::Wire, None).is_ok());
}

#[test]
fn test_inverted_pipe_range_is_rejected() {
    let inverted: LookupData = LookupData::Pipe {
        gpm_min: dec("71"),
        gpm_max: dec("55"),
        friction_loss: dec("0.01"),
    };

    let err: DomainError =
        validate_lookup_data("2\" Pipe", MaterialCategory::Pipe, Some(&inverted)).unwrap_err();

    assert!(err.to_string().contains("gpmMin 71 is greater than gpmMax 55"));
}

#[test]
fn test_tax_rate_bounds() {
    assert!(validate_tax_rate(dec("0")).is_ok());
    assert!(validate_tax_rate(dec("0.0825")).is_ok());
    assert!(validate_tax_rate(dec("1")).is_ok());
    assert!(matches!(
        validate_tax_rate(dec("8.25")),
        Err(DomainError::InvalidDecimal { .. })
    ));
    assert!(matches!(
        validate_tax_rate(dec("-0.01")),
        Err(DomainError::NegativeAmount { .. })
    ));
}
