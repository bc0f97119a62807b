// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{CalculationError, DomainError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supply voltage for the pump motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Voltage {
    /// 240 volt supply.
    #[serde(rename = "240")]
    V240,
    /// 480 volt supply.
    #[serde(rename = "480")]
    V480,
}

impl Voltage {
    /// Returns the voltage in volts.
    #[must_use]
    pub const fn volts(&self) -> u32 {
        match self {
            Self::V240 => 240,
            Self::V480 => 480,
        }
    }

    /// Converts this voltage to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::V240 => "240",
            Self::V480 => "480",
        }
    }
}

impl FromStr for Voltage {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_end_matches(['V', 'v']) {
            "240" => Ok(Self::V240),
            "480" => Ok(Self::V480),
            _ => Err(DomainError::InvalidVoltage(s.to_string())),
        }
    }
}

impl TryFrom<u32> for Voltage {
    type Error = DomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            240 => Ok(Self::V240),
            480 => Ok(Self::V480),
            _ => Err(DomainError::InvalidVoltage(value.to_string())),
        }
    }
}

impl std::fmt::Display for Voltage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Discharge package: a bundled set of fittings priced as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DischargePackage {
    /// Sub discharge head.
    A,
    /// Well plate.
    B,
    /// Reuse discharge head.
    C,
}

impl DischargePackage {
    /// Converts this package to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }

    /// Catalog material name of the bundle for this package.
    #[must_use]
    pub fn bundle_material_name(&self) -> String {
        format!("Bundle {}", self.as_str())
    }
}

impl FromStr for DischargePackage {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(Self::A),
            "B" | "b" => Ok(Self::B),
            "C" | "c" => Ok(Self::C),
            _ => Err(DomainError::InvalidDischargePackage(s.to_string())),
        }
    }
}

impl std::fmt::Display for DischargePackage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Category of a catalog material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MaterialCategory {
    Pipe,
    Motor,
    Wire,
    Concrete,
    SoundingTube,
    Bundle,
}

impl MaterialCategory {
    /// All categories in catalog order.
    pub const ALL: [Self; 6] = [
        Self::Pipe,
        Self::Motor,
        Self::Wire,
        Self::Concrete,
        Self::SoundingTube,
        Self::Bundle,
    ];

    /// Converts this category to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pipe => "Pipe",
            Self::Motor => "Motor",
            Self::Wire => "Wire",
            Self::Concrete => "Concrete",
            Self::SoundingTube => "SoundingTube",
            Self::Bundle => "Bundle",
        }
    }
}

impl FromStr for MaterialCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| DomainError::InvalidMaterialCategory(s.to_string()))
    }
}

impl std::fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle status of a stored estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EstimateStatus {
    /// Being drafted. Line items may change freely.
    #[default]
    Draft,
    /// Approved by the customer.
    Approved,
    /// Pushed to the accounting system.
    Synced,
    /// Sent to the customer.
    Sent,
    /// No longer active.
    Archived,
}

impl EstimateStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Approved => "approved",
            Self::Synced => "synced",
            Self::Sent => "sent",
            Self::Archived => "archived",
        }
    }
}

impl FromStr for EstimateStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "approved" => Ok(Self::Approved),
            "synced" => Ok(Self::Synced),
            "sent" => Ok(Self::Sent),
            "archived" => Ok(Self::Archived),
            _ => Err(DomainError::InvalidEstimateStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for EstimateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Category-specific selection ranges attached to a material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LookupData {
    /// Flow range served by a pipe size and its friction loss per foot.
    Pipe {
        #[serde(rename = "gpmMin")]
        gpm_min: Decimal,
        #[serde(rename = "gpmMax")]
        gpm_max: Decimal,
        #[serde(rename = "frictionLoss")]
        friction_loss: Decimal,
    },
    /// Horsepower range served by a motor.
    Motor {
        #[serde(rename = "hpMin")]
        hp_min: Decimal,
        #[serde(rename = "hpMax")]
        hp_max: Decimal,
    },
}

/// A priced material row from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogMaterial {
    pub name: String,
    pub category: MaterialCategory,
    pub price: Decimal,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub lookup_data: Option<LookupData>,
}

impl CatalogMaterial {
    /// Creates a material with no description, unit, or lookup data.
    #[must_use]
    pub fn new(name: &str, category: MaterialCategory, price: Decimal) -> Self {
        Self {
            name: name.to_string(),
            category,
            price,
            description: None,
            unit: None,
            lookup_data: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Sets the lookup data.
    #[must_use]
    pub fn with_lookup_data(mut self, lookup_data: LookupData) -> Self {
        self.lookup_data = Some(lookup_data);
        self
    }

    /// Returns the pipe range if this material carries one.
    #[must_use]
    pub fn pipe_range(&self) -> Option<(Decimal, Decimal, Decimal)> {
        match self.lookup_data {
            Some(LookupData::Pipe {
                gpm_min,
                gpm_max,
                friction_loss,
            }) => Some((gpm_min, gpm_max, friction_loss)),
            _ => None,
        }
    }

    /// Returns the motor range if this material carries one.
    #[must_use]
    pub fn motor_range(&self) -> Option<(Decimal, Decimal)> {
        match self.lookup_data {
            Some(LookupData::Motor { hp_min, hp_max }) => Some((hp_min, hp_max)),
            _ => None,
        }
    }
}

/// An hourly labor rate from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogLaborRate {
    pub name: String,
    pub rate_per_hour: Decimal,
    pub description: Option<String>,
}

impl CatalogLaborRate {
    #[must_use]
    pub fn new(name: &str, rate_per_hour: Decimal) -> Self {
        Self {
            name: name.to_string(),
            rate_per_hour,
            description: None,
        }
    }
}

/// Hydraulic and electrical inputs for one estimate calculation.
///
/// Hydraulic values are strictly positive. Hour values are non-negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EstimateInput {
    gpm: Decimal,
    pump_setting: Decimal,
    pumping_water_level: Decimal,
    pressure_psi: Decimal,
    voltage: Voltage,
    prep_time_hours: Decimal,
    install_time_hours: Decimal,
    start_time_hours: Decimal,
    discharge_package: DischargePackage,
}

/// Hour values for the three labor line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LaborHours {
    pub prep: Decimal,
    pub install: Decimal,
    pub start: Decimal,
}

impl EstimateInput {
    /// Creates a validated estimate input.
    ///
    /// # Errors
    ///
    /// Returns `InvalidNumericInput` if a hydraulic value is not positive
    /// or an hour value is negative.
    pub fn new(
        gpm: Decimal,
        pump_setting: Decimal,
        pumping_water_level: Decimal,
        pressure_psi: Decimal,
        voltage: Voltage,
        hours: LaborHours,
        discharge_package: DischargePackage,
    ) -> Result<Self, CalculationError> {
        require_positive("gpm", gpm)?;
        require_positive("pump_setting", pump_setting)?;
        require_positive("pumping_water_level", pumping_water_level)?;
        require_positive("pressure_psi", pressure_psi)?;
        require_non_negative("prep_time_hours", hours.prep)?;
        require_non_negative("install_time_hours", hours.install)?;
        require_non_negative("start_time_hours", hours.start)?;

        Ok(Self {
            gpm,
            pump_setting,
            pumping_water_level,
            pressure_psi,
            voltage,
            prep_time_hours: hours.prep,
            install_time_hours: hours.install,
            start_time_hours: hours.start,
            discharge_package,
        })
    }

    #[must_use]
    pub const fn gpm(&self) -> Decimal {
        self.gpm
    }

    #[must_use]
    pub const fn pump_setting(&self) -> Decimal {
        self.pump_setting
    }

    #[must_use]
    pub const fn pumping_water_level(&self) -> Decimal {
        self.pumping_water_level
    }

    #[must_use]
    pub const fn pressure_psi(&self) -> Decimal {
        self.pressure_psi
    }

    #[must_use]
    pub const fn voltage(&self) -> Voltage {
        self.voltage
    }

    #[must_use]
    pub const fn hours(&self) -> LaborHours {
        LaborHours {
            prep: self.prep_time_hours,
            install: self.install_time_hours,
            start: self.start_time_hours,
        }
    }

    #[must_use]
    pub const fn discharge_package(&self) -> DischargePackage {
        self.discharge_package
    }
}

fn require_positive(field: &str, value: Decimal) -> Result<(), CalculationError> {
    if value > Decimal::ZERO {
        Ok(())
    } else {
        Err(CalculationError::InvalidNumericInput {
            field: field.to_string(),
            reason: format!("must be greater than zero, got {value}"),
        })
    }
}

fn require_non_negative(field: &str, value: Decimal) -> Result<(), CalculationError> {
    if value < Decimal::ZERO {
        Err(CalculationError::InvalidNumericInput {
            field: field.to_string(),
            reason: format!("must not be negative, got {value}"),
        })
    } else {
        Ok(())
    }
}

/// One priced line of an estimate.
///
/// `quantity`, `rate` and `total` are decimal strings so no precision is
/// lost on the way to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatedLineItem {
    pub sort_order: u32,
    pub description: String,
    pub quantity: String,
    pub rate: String,
    pub total: String,
    pub notes: Option<String>,
    pub is_taxable: bool,
}
