// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::money::round_half_up;
use rust_decimal::Decimal;

/// Errors that can occur while validating or parsing domain values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Voltage is not one of the supported supply voltages.
    InvalidVoltage(String),
    /// Discharge package is not A, B, or C.
    InvalidDischargePackage(String),
    /// Material category is not recognized.
    InvalidMaterialCategory(String),
    /// Estimate status is not recognized.
    InvalidEstimateStatus(String),
    /// A decimal value could not be parsed.
    InvalidDecimal {
        /// The field being parsed.
        field: String,
        /// The rejected text.
        value: String,
    },
    /// Lookup data does not match the material category.
    InvalidLookupData {
        /// The material name.
        material: String,
        /// Description of the problem.
        reason: String,
    },
    /// A required name is empty.
    EmptyName(&'static str),
    /// A price or rate is negative.
    NegativeAmount {
        /// The field holding the amount.
        field: String,
        /// The rejected amount.
        amount: Decimal,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidVoltage(value) => {
                write!(f, "Invalid voltage '{value}': must be 240 or 480")
            }
            Self::InvalidDischargePackage(value) => {
                write!(f, "Invalid discharge package '{value}': must be A, B, or C")
            }
            Self::InvalidMaterialCategory(value) => {
                write!(f, "Invalid material category: {value}")
            }
            Self::InvalidEstimateStatus(value) => write!(f, "Invalid estimate status: {value}"),
            Self::InvalidDecimal { field, value } => {
                write!(f, "Invalid decimal value '{value}' for {field}")
            }
            Self::InvalidLookupData { material, reason } => {
                write!(f, "Invalid lookup data for material '{material}': {reason}")
            }
            Self::EmptyName(what) => write!(f, "{what} name must not be empty"),
            Self::NegativeAmount { field, amount } => {
                write!(f, "{field} must not be negative, got {amount}")
            }
        }
    }
}

impl std::error::Error for DomainError {}

/// Terminal failures of the estimate line-item calculator.
///
/// No line items are produced when any of these is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalculationError {
    /// No active pipe covers the requested flow rate.
    NoPipeForGpm {
        /// The requested flow rate.
        gpm: Decimal,
    },
    /// No active motor covers the computed horsepower.
    NoMotorForHp {
        /// The computed horsepower.
        hp: Decimal,
    },
    /// The wire chart or the wire catalog has no entry for the selected motor.
    NoWireForSpec {
        /// Horsepower parsed from the motor name, if any.
        motor_hp: Option<Decimal>,
        /// Pump setting in feet.
        pump_setting: Decimal,
        /// Supply voltage.
        voltage: u32,
        /// Gauge chosen from the chart, when the chart matched but the catalog did not.
        gauge: Option<&'static str>,
    },
    /// A numeric input or intermediate value is unusable.
    InvalidNumericInput {
        /// The offending field or intermediate.
        field: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl std::fmt::Display for CalculationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPipeForGpm { gpm } => {
                write!(f, "No active pipe material found for {gpm} GPM")
            }
            Self::NoMotorForHp { hp } => {
                write!(
                    f,
                    "No active motor material found for calculated HP {}",
                    round_half_up(*hp, 2)
                )
            }
            Self::NoWireForSpec {
                motor_hp,
                pump_setting,
                voltage,
                gauge,
            } => match (motor_hp, gauge) {
                (None, _) => write!(
                    f,
                    "Could not determine motor HP for wire sizing at {voltage}V, {pump_setting} ft"
                ),
                (Some(hp), None) => write!(
                    f,
                    "No wire size in chart for {hp} HP at {voltage}V and {pump_setting} ft"
                ),
                (Some(hp), Some(gauge)) => write!(
                    f,
                    "No active wire material '{gauge}' for {hp} HP at {voltage}V and {pump_setting} ft"
                ),
            },
            Self::InvalidNumericInput { field, reason } => {
                write!(f, "Invalid numeric input for {field}: {reason}")
            }
        }
    }
}

impl std::error::Error for CalculationError {}
