// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Default prices for fixed-price line items.
//!
//! These are only consulted when the catalog has no active row for the
//! item. Every substitution is logged at warn level so catalog drift is
//! visible to operators.

use crate::types::DischargePackage;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fixed-price items that have a fallback price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FallbackItem {
    ConcretePad,
    SoundingTube,
    PrepLabor,
    InstallLabor,
    StartupLabor,
    Bundle(DischargePackage),
}

impl FallbackItem {
    /// Name of the catalog row (material or labor rate) this item reads.
    #[must_use]
    pub fn catalog_name(&self) -> String {
        match self {
            Self::ConcretePad => String::from("Concrete Pad"),
            Self::SoundingTube => String::from("Sounding Tube"),
            Self::PrepLabor => String::from("Prep Job Labor"),
            Self::InstallLabor => String::from("Install Submersible Labor"),
            Self::StartupLabor => String::from("Ag Sub Pump Startup Labor"),
            Self::Bundle(package) => package.bundle_material_name(),
        }
    }
}

impl std::fmt::Display for FallbackItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.catalog_name())
    }
}

/// Fallback price and description for a discharge bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackBundle {
    pub price: Decimal,
    pub description: String,
}

/// The fallback price table.
///
/// Deserializing a partial document keeps the default for every key that
/// is not present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackPrices {
    pub concrete_pad: Decimal,
    pub sounding_tube: Decimal,
    pub prep_labor: Decimal,
    pub install_labor: Decimal,
    pub startup_labor: Decimal,
    pub bundle_a: FallbackBundle,
    pub bundle_b: FallbackBundle,
    pub bundle_c: FallbackBundle,
}

impl Default for FallbackPrices {
    fn default() -> Self {
        Self {
            concrete_pad: Decimal::new(90000, 2),
            sounding_tube: Decimal::new(100, 2),
            prep_labor: Decimal::new(17500, 2),
            install_labor: Decimal::new(39500, 2),
            startup_labor: Decimal::new(17500, 2),
            bundle_a: FallbackBundle {
                price: Decimal::new(170_000, 2),
                description: String::from(
                    "Submersible bundle A \u{2013} sub discharge head. Duct tape, electrical splice connections, tape kit, etc.",
                ),
            },
            bundle_b: FallbackBundle {
                price: Decimal::new(145_000, 2),
                description: String::from(
                    "Submersible bundle B \u{2013} well plate. Duct tape, electrical splice connections, tape kit, etc.",
                ),
            },
            bundle_c: FallbackBundle {
                price: Decimal::new(70000, 2),
                description: String::from(
                    "Submersible bundle C \u{2013} reuse discharge head. Duct tape, electrical splice connections, tape kit, etc.",
                ),
            },
        }
    }
}

impl FallbackPrices {
    /// Fallback price for an item.
    #[must_use]
    pub fn price(&self, item: FallbackItem) -> Decimal {
        match item {
            FallbackItem::ConcretePad => self.concrete_pad,
            FallbackItem::SoundingTube => self.sounding_tube,
            FallbackItem::PrepLabor => self.prep_labor,
            FallbackItem::InstallLabor => self.install_labor,
            FallbackItem::StartupLabor => self.startup_labor,
            FallbackItem::Bundle(package) => self.bundle(package).price,
        }
    }

    /// Fallback bundle for a discharge package.
    #[must_use]
    pub const fn bundle(&self, package: DischargePackage) -> &FallbackBundle {
        match package {
            DischargePackage::A => &self.bundle_a,
            DischargePackage::B => &self.bundle_b,
            DischargePackage::C => &self.bundle_c,
        }
    }
}
