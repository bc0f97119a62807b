// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::dec;
use crate::{CalculationError, DomainError};

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::InvalidVoltage(String::from("120"));
    assert_eq!(format!("{err}"), "Invalid voltage '120': must be 240 or 480");

    let err: DomainError = DomainError::InvalidDischargePackage(String::from("D"));
    assert_eq!(
        format!("{err}"),
        "Invalid discharge package 'D': must be A, B, or C"
    );

    let err: DomainError = DomainError::InvalidDecimal {
        field: String::from("price"),
        value: String::from("abc"),
    };
    assert_eq!(format!("{err}"), "Invalid decimal value 'abc' for price");

    let err: DomainError = DomainError::EmptyName("Material");
    assert_eq!(format!("{err}"), "Material name must not be empty");
}

#[test]
fn test_calculation_error_display() {
    let err: CalculationError = CalculationError::NoPipeForGpm { gpm: dec("9999") };
    assert_eq!(format!("{err}"), "No active pipe material found for 9999 GPM");

    let err: CalculationError = CalculationError::NoMotorForHp {
        hp: dec("12.3456"),
    };
    assert_eq!(
        format!("{err}"),
        "No active motor material found for calculated HP 12.35"
    );

    let err: CalculationError = CalculationError::NoWireForSpec {
        motor_hp: Some(dec("5")),
        pump_setting: dec("300"),
        voltage: 240,
        gauge: Some("#10"),
    };
    assert_eq!(
        format!("{err}"),
        "No active wire material '#10' for 5 HP at 240V and 300 ft"
    );

    let err: CalculationError = CalculationError::InvalidNumericInput {
        field: String::from("gpm"),
        reason: String::from("must be greater than zero, got 0"),
    };
    assert_eq!(
        format!("{err}"),
        "Invalid numeric input for gpm: must be greater than zero, got 0"
    );
}
