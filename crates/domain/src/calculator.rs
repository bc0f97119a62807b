// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Estimate line-item calculator.
//!
//! Turns the hydraulic and electrical inputs of a well into the eleven
//! priced line items of a submersible pump estimate:
//!
//! 1. Pipe selection by flow rate, friction loss over the pump setting
//! 2. Pressure converted to feet of head
//! 3. Total dynamic head
//! 4. Required horsepower, motor selection
//! 5. Drop-cable gauge from the wire chart
//! 6. Fixed-price items (concrete, sounding tube, labor, bundle)
//!
//! The calculation is pure. Missing fixed-price catalog rows fall back to
//! the configured defaults; everything else that cannot be resolved is a
//! terminal error.

use crate::catalog::Catalog;
use crate::error::CalculationError;
use crate::fallback::{FallbackItem, FallbackPrices};
use crate::money::{format_money, format_quantity, line_total, round_half_up};
use crate::types::{
    CalculatedLineItem, CatalogMaterial, EstimateInput, LaborHours, MaterialCategory,
};
use crate::wire_chart::{parse_motor_hp, wire_gauge_for};
use rust_decimal::Decimal;
use tracing::{debug, warn};

/// Number of line items every estimate has.
pub const LINE_ITEM_COUNT: usize = 11;

/// Feet of head per psi.
const FEET_PER_PSI: Decimal = Decimal::from_parts(23, 0, 0, false, 1);

/// Extra wire beyond the pump setting, in feet.
const WIRE_SERVICE_MARGIN_FEET: u32 = 20;

/// Watts-to-horsepower factor used in the water horsepower formula.
const KW_PER_HP: Decimal = Decimal::from_parts(746, 0, 0, false, 3);

/// Assumed wire-to-water pump efficiency.
const PUMP_EFFICIENCY: Decimal = Decimal::from_parts(70, 0, 0, false, 2);

/// GPM times feet of head per water horsepower.
const GPM_FEET_PER_HP: u32 = 3960;

/// Intermediate values of the sizing steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PumpSizing {
    pub pipe_name: String,
    pub total_friction_loss: Decimal,
    pub pressure_feet: Decimal,
    pub total_dynamic_head: Decimal,
    pub horsepower: Decimal,
    pub motor_name: String,
    pub wire_gauge: &'static str,
}

/// Sizing result with borrowed catalog rows, shared by [`calculate`] and [`size_pump`].
struct Sizing<'a> {
    pipe: &'a CatalogMaterial,
    motor: &'a CatalogMaterial,
    motor_hp: Option<Decimal>,
    total_friction_loss: Decimal,
    pressure_feet: Decimal,
    total_dynamic_head: Decimal,
    horsepower: Decimal,
    wire_gauge: &'static str,
}

fn size<'a>(input: &EstimateInput, catalog: &'a Catalog) -> Result<Sizing<'a>, CalculationError> {
    let gpm: Decimal = input.gpm();
    let pump_setting: Decimal = input.pump_setting();

    let (pipe, friction_loss) = select_pipe(catalog, gpm)?;
    let total_friction_loss: Decimal = round_half_up(
        checked_mul("total_friction_loss", friction_loss, pump_setting)?,
        0,
    );
    let pressure_feet: Decimal = round_half_up(
        checked_mul("pressure_feet", input.pressure_psi(), FEET_PER_PSI)?,
        0,
    );
    let total_dynamic_head: Decimal = input
        .pumping_water_level()
        .checked_add(total_friction_loss)
        .and_then(|sum| sum.checked_add(pressure_feet))
        .ok_or_else(|| overflow("total_dynamic_head"))?;

    let horsepower: Decimal = required_horsepower(gpm, total_dynamic_head)?;
    let motor: &CatalogMaterial = select_motor(catalog, horsepower)?;

    let motor_hp: Option<Decimal> = parse_motor_hp(&motor.name);
    let wire_gauge: &'static str = motor_hp
        .and_then(|hp| wire_gauge_for(input.voltage(), hp, pump_setting))
        .ok_or(CalculationError::NoWireForSpec {
            motor_hp,
            pump_setting,
            voltage: input.voltage().volts(),
            gauge: None,
        })?;

    Ok(Sizing {
        pipe,
        motor,
        motor_hp,
        total_friction_loss,
        pressure_feet,
        total_dynamic_head,
        horsepower,
        wire_gauge,
    })
}

/// Calculates the eleven line items of an estimate.
///
/// # Errors
///
/// Returns an error if no pipe covers the flow rate, no motor covers the
/// computed horsepower, the wire chart or catalog has no matching wire, or
/// an intermediate value overflows.
pub fn calculate(
    input: &EstimateInput,
    catalog: &Catalog,
    fallbacks: &FallbackPrices,
) -> Result<Vec<CalculatedLineItem>, CalculationError> {
    let sizing: Sizing<'_> = size(input, catalog)?;
    let gauge: &'static str = sizing.wire_gauge;
    let pump_setting: Decimal = input.pump_setting();

    let wire: &CatalogMaterial = catalog
        .find_material(MaterialCategory::Wire, gauge)
        .ok_or(CalculationError::NoWireForSpec {
            motor_hp: sizing.motor_hp,
            pump_setting,
            voltage: input.voltage().volts(),
            gauge: Some(gauge),
        })?;
    let wire_quantity: Decimal = pump_setting
        .checked_add(Decimal::from(WIRE_SERVICE_MARGIN_FEET))
        .ok_or_else(|| overflow("wire_quantity"))?;

    debug!(
        pipe = %sizing.pipe.name,
        total_dynamic_head = %sizing.total_dynamic_head,
        horsepower = %sizing.horsepower,
        motor = %sizing.motor.name,
        gauge,
        "Sized submersible pump"
    );

    let concrete_price: Decimal =
        material_price(catalog, fallbacks, MaterialCategory::Concrete, FallbackItem::ConcretePad);
    let sounding_tube_price: Decimal = material_price(
        catalog,
        fallbacks,
        MaterialCategory::SoundingTube,
        FallbackItem::SoundingTube,
    );
    let prep_rate: Decimal = labor_rate(catalog, fallbacks, FallbackItem::PrepLabor);
    let install_rate: Decimal = labor_rate(catalog, fallbacks, FallbackItem::InstallLabor);
    let startup_rate: Decimal = labor_rate(catalog, fallbacks, FallbackItem::StartupLabor);
    let (bundle_description, bundle_price) = bundle(catalog, fallbacks, input);

    let motor: &CatalogMaterial = sizing.motor;
    let pipe: &CatalogMaterial = sizing.pipe;
    let pump_name: String = motor.name.replace(" Motor", "");
    let wire_description: String = wire
        .description
        .clone()
        .unwrap_or_else(|| format!("{gauge} FJ wire"));
    let hours: LaborHours = input.hours();
    let one: Decimal = Decimal::ONE;

    let header: String = format!(
        "{pump_name} {}V submersible pump capable of {} GPM at {} psi, {} TDH set at {} ft",
        input.voltage().volts(),
        format_quantity(input.gpm()),
        format_quantity(input.pressure_psi()),
        format_quantity(round_half_up(sizing.total_dynamic_head, 0)),
        format_quantity(pump_setting),
    );

    let items: Vec<CalculatedLineItem> = vec![
        priced_item(1, header, one, Decimal::ZERO),
        priced_item(2, String::from("Concrete pad"), one, concrete_price),
        priced_item(3, String::from("Labor to prep job"), hours.prep, prep_rate),
        priced_item(
            4,
            String::from("Labor to install submersible pump"),
            hours.install,
            install_rate,
        ),
        priced_item(5, motor.name.clone(), one, motor.price),
        priced_item(6, format!("{pump_name} submersible pump"), one, Decimal::ZERO),
        priced_item(7, pipe.name.clone(), pump_setting, pipe.price),
        priced_item(8, wire_description, wire_quantity, wire.price),
        priced_item(9, String::from("Sounding tube"), pump_setting, sounding_tube_price),
        priced_item(10, bundle_description, one, bundle_price),
        priced_item(11, String::from("Ag sub pump startup"), hours.start, startup_rate),
    ];

    Ok(items)
}

/// Runs the sizing steps without pricing.
///
/// # Errors
///
/// Returns the same sizing errors as [`calculate`].
pub fn size_pump(input: &EstimateInput, catalog: &Catalog) -> Result<PumpSizing, CalculationError> {
    let sizing: Sizing<'_> = size(input, catalog)?;

    Ok(PumpSizing {
        pipe_name: sizing.pipe.name.clone(),
        total_friction_loss: sizing.total_friction_loss,
        pressure_feet: sizing.pressure_feet,
        total_dynamic_head: sizing.total_dynamic_head,
        horsepower: sizing.horsepower,
        motor_name: sizing.motor.name.clone(),
        wire_gauge: sizing.wire_gauge,
    })
}

/// `(gpm * tdh * 0.746) / (0.70 * 3960)` at full precision.
///
/// # Errors
///
/// Returns `InvalidNumericInput` if the product overflows or the divisor is zero.
pub fn required_horsepower(gpm: Decimal, tdh: Decimal) -> Result<Decimal, CalculationError> {
    let numerator: Decimal = gpm
        .checked_mul(tdh)
        .and_then(|v| v.checked_mul(KW_PER_HP))
        .ok_or_else(|| overflow("horsepower"))?;
    let denominator: Decimal = PUMP_EFFICIENCY
        .checked_mul(Decimal::from(GPM_FEET_PER_HP))
        .ok_or_else(|| overflow("horsepower"))?;

    numerator
        .checked_div(denominator)
        .ok_or_else(|| CalculationError::InvalidNumericInput {
            field: String::from("horsepower"),
            reason: String::from("division by zero"),
        })
}

/// First pipe whose inclusive GPM range contains `gpm`.
fn select_pipe(
    catalog: &Catalog,
    gpm: Decimal,
) -> Result<(&CatalogMaterial, Decimal), CalculationError> {
    catalog
        .materials(MaterialCategory::Pipe)
        .iter()
        .find_map(|pipe| match pipe.pipe_range() {
            Some((min, max, friction_loss)) if gpm >= min && gpm <= max => {
                Some((pipe, friction_loss))
            }
            _ => None,
        })
        .ok_or(CalculationError::NoPipeForGpm { gpm })
}

/// First motor whose range `(hp_min, hp_max]` contains `hp`.
fn select_motor(catalog: &Catalog, hp: Decimal) -> Result<&CatalogMaterial, CalculationError> {
    catalog
        .materials(MaterialCategory::Motor)
        .iter()
        .find(|motor| {
            motor
                .motor_range()
                .is_some_and(|(min, max)| hp > min && hp <= max)
        })
        .ok_or(CalculationError::NoMotorForHp { hp })
}

fn material_price(
    catalog: &Catalog,
    fallbacks: &FallbackPrices,
    category: MaterialCategory,
    item: FallbackItem,
) -> Decimal {
    catalog
        .find_material(category, &item.catalog_name())
        .map_or_else(|| fallback_price(fallbacks, item), |m| m.price)
}

fn labor_rate(catalog: &Catalog, fallbacks: &FallbackPrices, item: FallbackItem) -> Decimal {
    catalog
        .labor_rate(&item.catalog_name())
        .map_or_else(|| fallback_price(fallbacks, item), |r| r.rate_per_hour)
}

fn bundle(catalog: &Catalog, fallbacks: &FallbackPrices, input: &EstimateInput) -> (String, Decimal) {
    let item: FallbackItem = FallbackItem::Bundle(input.discharge_package());
    let name: String = item.catalog_name();

    match catalog.find_material(MaterialCategory::Bundle, &name) {
        Some(bundle) => (
            bundle.description.clone().unwrap_or(name),
            bundle.price,
        ),
        None => {
            let fallback = fallbacks.bundle(input.discharge_package());
            warn!(
                item = %name,
                price = %fallback.price,
                "Catalog row missing, using fallback bundle price and description"
            );
            (fallback.description.clone(), fallback.price)
        }
    }
}

fn fallback_price(fallbacks: &FallbackPrices, item: FallbackItem) -> Decimal {
    let price: Decimal = fallbacks.price(item);
    warn!(item = %item, %price, "Catalog row missing, using fallback price");
    price
}

/// Builds a line item. The total is computed from the two-decimal rate that
/// is stored, so `total == round(quantity * rate, 2)` holds on the strings.
fn priced_item(
    sort_order: u32,
    description: String,
    quantity: Decimal,
    rate: Decimal,
) -> CalculatedLineItem {
    let rate: Decimal = round_half_up(rate, 2);
    CalculatedLineItem {
        sort_order,
        description,
        quantity: format_quantity(quantity),
        rate: format_money(rate),
        total: format_money(line_total(quantity, rate)),
        notes: None,
        is_taxable: false,
    }
}

fn checked_mul(field: &str, a: Decimal, b: Decimal) -> Result<Decimal, CalculationError> {
    a.checked_mul(b).ok_or_else(|| overflow(field))
}

fn overflow(field: &str) -> CalculationError {
    CalculationError::InvalidNumericInput {
        field: field.to_string(),
        reason: String::from("value out of range"),
    }
}
