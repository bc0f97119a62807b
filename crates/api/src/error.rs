// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use pumpquote_domain::{CalculationError, DomainError};
use pumpquote_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent the
/// API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The calculator could not produce line items for the inputs.
    CalculationFailed {
        /// The sizing step that failed.
        rule: String,
        /// A human-readable description of the failure.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::CalculationFailed { rule, message } => {
                write!(f, "Calculation failed ({rule}): {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidVoltage(_) => ApiError::InvalidInput {
            field: String::from("voltage"),
            message,
        },
        DomainError::InvalidDischargePackage(_) => ApiError::InvalidInput {
            field: String::from("discharge_package"),
            message,
        },
        DomainError::InvalidMaterialCategory(_) => ApiError::InvalidInput {
            field: String::from("category"),
            message,
        },
        DomainError::InvalidEstimateStatus(_) => ApiError::InvalidInput {
            field: String::from("status"),
            message,
        },
        DomainError::InvalidDecimal { field, .. } | DomainError::NegativeAmount { field, .. } => {
            ApiError::InvalidInput { field, message }
        }
        DomainError::InvalidLookupData { .. } => ApiError::InvalidInput {
            field: String::from("lookup_data"),
            message,
        },
        DomainError::EmptyName(_) => ApiError::InvalidInput {
            field: String::from("name"),
            message,
        },
    }
}

/// Translates a calculator error into an API error.
#[must_use]
pub fn translate_calculation_error(err: CalculationError) -> ApiError {
    let message: String = err.to_string();
    match err {
        CalculationError::NoPipeForGpm { .. } => ApiError::CalculationFailed {
            rule: String::from("pipe_selection"),
            message,
        },
        CalculationError::NoMotorForHp { .. } => ApiError::CalculationFailed {
            rule: String::from("motor_selection"),
            message,
        },
        CalculationError::NoWireForSpec { .. } => ApiError::CalculationFailed {
            rule: String::from("wire_sizing"),
            message,
        },
        CalculationError::InvalidNumericInput { field, .. } => {
            ApiError::InvalidInput { field, message }
        }
    }
}

/// Translates a persistence error into an API error.
///
/// Missing rows and name conflicts are part of the contract; everything
/// else is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(what) => ApiError::ResourceNotFound {
            resource_type: resource_type_of(&what),
            message: format!("{what} does not exist"),
        },
        PersistenceError::DuplicateName { .. } => ApiError::DomainRuleViolation {
            rule: String::from("unique_name"),
            message: err.to_string(),
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}

/// Resource kind of a not-found description such as `"Labor rate 7"`.
fn resource_type_of(what: &str) -> String {
    what.rsplit_once(' ')
        .filter(|(_, id)| id.parse::<i64>().is_ok())
        .map_or("Resource", |(kind, _)| kind)
        .to_string()
}
