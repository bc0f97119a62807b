// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row representations returned by and accepted by the persistence layer.

use pumpquote_domain::{
    CalculationError, CatalogLaborRate, CatalogMaterial, Decimal, DischargePackage,
    EstimateInput, EstimateStatus, LaborHours, LookupData, MaterialCategory, Voltage,
};
use serde::{Deserialize, Serialize};

/// A stored catalog material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialData {
    pub material_id: i64,
    pub name: String,
    pub category: MaterialCategory,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub price: Decimal,
    pub lookup_data: Option<LookupData>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl MaterialData {
    /// The calculator's view of this material.
    #[must_use]
    pub fn to_catalog_material(&self) -> CatalogMaterial {
        CatalogMaterial {
            name: self.name.clone(),
            category: self.category,
            price: self.price,
            description: self.description.clone(),
            unit: self.unit.clone(),
            lookup_data: self.lookup_data.clone(),
        }
    }
}

/// Values for creating or replacing a material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMaterial {
    pub name: String,
    pub category: MaterialCategory,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub price: Decimal,
    pub lookup_data: Option<LookupData>,
    pub is_active: bool,
}

/// A stored hourly labor rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborRateData {
    pub labor_rate_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub rate_per_hour: Decimal,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl LaborRateData {
    /// The calculator's view of this labor rate.
    #[must_use]
    pub fn to_catalog_labor_rate(&self) -> CatalogLaborRate {
        CatalogLaborRate {
            name: self.name.clone(),
            rate_per_hour: self.rate_per_hour,
            description: self.description.clone(),
        }
    }
}

/// Values for creating or replacing a labor rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLaborRate {
    pub name: String,
    pub description: Option<String>,
    pub rate_per_hour: Decimal,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientData {
    pub client_id: i64,
    pub name: String,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewClient {
    pub name: String,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteData {
    pub site_id: i64,
    pub client_id: i64,
    pub address: Option<String>,
    pub coordinates: Option<String>,
    pub intended_use: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewSite {
    pub address: Option<String>,
    pub coordinates: Option<String>,
    pub intended_use: Option<String>,
}

/// A stored estimate, including the inputs it was calculated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateData {
    pub estimate_id: i64,
    pub client_id: i64,
    pub site_id: i64,
    pub estimate_number: String,
    pub status: EstimateStatus,
    pub gpm: Decimal,
    pub pump_setting: Decimal,
    pub pumping_water_level: Decimal,
    pub pressure_psi: Decimal,
    pub voltage: Voltage,
    pub prep_time_hours: Decimal,
    pub install_time_hours: Decimal,
    pub start_time_hours: Decimal,
    pub discharge_package: DischargePackage,
    pub overall_notes: Option<String>,
    pub subtotal_amount: String,
    pub tax_rate: String,
    pub tax_amount: String,
    pub total_amount: String,
    pub approved_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl EstimateData {
    /// Rebuilds the calculator input from the stored values.
    ///
    /// # Errors
    ///
    /// Returns `InvalidNumericInput` if a stored value no longer validates.
    pub fn calculation_input(&self) -> Result<EstimateInput, CalculationError> {
        EstimateInput::new(
            self.gpm,
            self.pump_setting,
            self.pumping_water_level,
            self.pressure_psi,
            self.voltage,
            LaborHours {
                prep: self.prep_time_hours,
                install: self.install_time_hours,
                start: self.start_time_hours,
            },
            self.discharge_package,
        )
    }
}

/// A new estimate together with the site it is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEstimate {
    pub client_id: i64,
    pub site: NewSite,
    pub input: EstimateInput,
    pub overall_notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemData {
    pub line_item_id: i64,
    pub estimate_id: i64,
    pub sort_order: u32,
    pub description: String,
    pub quantity: String,
    pub rate: String,
    pub total: String,
    pub notes: Option<String>,
    pub is_taxable: bool,
}

/// An estimate with its client, site and ordered line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateDetail {
    pub estimate: EstimateData,
    pub client: ClientData,
    pub site: SiteData,
    pub line_items: Vec<LineItemData>,
}

/// One row of the estimate listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateSummary {
    pub estimate_id: i64,
    pub estimate_number: String,
    pub status: EstimateStatus,
    pub client_id: i64,
    pub client_name: String,
    pub total_amount: String,
    pub created_at: String,
}

/// A page of the estimate listing, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimatePage {
    pub estimates: Vec<EstimateSummary>,
    pub total_count: u64,
    pub page: u32,
    pub per_page: u32,
}

/// The application settings row. All fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsData {
    pub company_name: Option<String>,
    pub company_address: Option<String>,
    pub company_phone: Option<String>,
    pub company_email: Option<String>,
    pub company_logo_url: Option<String>,
    /// Fraction, so `0.0825` is 8.25%.
    pub default_sales_tax_rate: Option<Decimal>,
    pub email_from_name: Option<String>,
    pub email_from_address: Option<String>,
    pub updated_at: Option<String>,
}
