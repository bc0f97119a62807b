// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod error;
mod estimate;
mod validation;
mod wire_chart;

use crate::{
    Catalog, CatalogLaborRate, CatalogMaterial, Decimal, DischargePackage, EstimateInput,
    LaborHours, LookupData, MaterialCategory, Voltage,
};
use std::str::FromStr;

pub fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

pub fn create_test_pipe(name: &str, gpm_min: &str, gpm_max: &str, friction_loss: &str) -> CatalogMaterial {
    CatalogMaterial::new(name, MaterialCategory::Pipe, dec("11.08")).with_lookup_data(
        LookupData::Pipe {
            gpm_min: dec(gpm_min),
            gpm_max: dec(gpm_max),
            friction_loss: dec(friction_loss),
        },
    )
}

pub fn create_test_motor(name: &str, price: &str, hp_min: &str, hp_max: &str) -> CatalogMaterial {
    CatalogMaterial::new(name, MaterialCategory::Motor, dec(price)).with_lookup_data(
        LookupData::Motor {
            hp_min: dec(hp_min),
            hp_max: dec(hp_max),
        },
    )
}

pub fn create_test_wire(gauge: &str, price: &str) -> CatalogMaterial {
    CatalogMaterial::new(gauge, MaterialCategory::Wire, dec(price))
}

/// Pipes, motors and wires only. Every fixed-price item falls back.
pub fn create_sizing_only_materials() -> Vec<CatalogMaterial> {
    vec![
        create_test_pipe("2\" Pipe", "55", "70", "0.01"),
        create_test_pipe("2.5\" Pipe", "71", "110", "0.075"),
        create_test_motor("5 HP Motor", "2581.86", "3.5", "5.5"),
        create_test_motor("7.5 HP Motor", "3301.72", "5.51", "7.75"),
        create_test_wire("#14", "2.13"),
        create_test_wire("#12", "2.88"),
        create_test_wire("#10", "3.50"),
    ]
}

pub fn create_sizing_only_catalog() -> Catalog {
    Catalog::from_rows(create_sizing_only_materials(), Vec::new())
}

/// A catalog with every fixed-price row present at non-default prices.
pub fn create_full_catalog() -> Catalog {
    let mut materials: Vec<CatalogMaterial> = create_sizing_only_materials();
    materials.push(CatalogMaterial::new(
        "Concrete Pad",
        MaterialCategory::Concrete,
        dec("950.00"),
    ));
    materials.push(CatalogMaterial::new(
        "Sounding Tube",
        MaterialCategory::SoundingTube,
        dec("1.25"),
    ));
    materials.push(
        CatalogMaterial::new("Bundle A", MaterialCategory::Bundle, dec("1800.00"))
            .with_description("Bundle A with sub discharge head"),
    );
    materials.push(CatalogMaterial::new(
        "Bundle B",
        MaterialCategory::Bundle,
        dec("1500.00"),
    ));

    let labor_rates: Vec<CatalogLaborRate> = vec![
        CatalogLaborRate::new("Prep Job Labor", dec("200.00")),
        CatalogLaborRate::new("Install Submersible Labor", dec("400.00")),
        CatalogLaborRate::new("Ag Sub Pump Startup Labor", dec("180.00")),
    ];

    Catalog::from_rows(materials, labor_rates)
}

pub fn create_test_hours() -> LaborHours {
    LaborHours {
        prep: dec("2"),
        install: dec("8"),
        start: dec("1"),
    }
}

/// 60 GPM at 300 ft, 150 ft pumping level, 60 psi, 240V, package A.
pub fn create_test_input() -> EstimateInput {
    create_input("60", "300", Voltage::V240, DischargePackage::A)
}

pub fn create_input(
    gpm: &str,
    pump_setting: &str,
    voltage: Voltage,
    package: DischargePackage,
) -> EstimateInput {
    EstimateInput::new(
        dec(gpm),
        dec(pump_setting),
        dec("150"),
        dec("60"),
        voltage,
        create_test_hours(),
        package,
    )
    .unwrap()
}
