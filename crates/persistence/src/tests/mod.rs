// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod catalog_tests;
mod client_tests;
mod estimate_tests;
mod settings_tests;

use crate::{NewClient, NewEstimate, NewLaborRate, NewMaterial, NewSite, SqlitePersistence};
use pumpquote_domain::{
    CalculatedLineItem, Decimal, DischargePackage, EstimateInput, LaborHours, LookupData,
    MaterialCategory, Voltage, manual_line_item,
};
use std::str::FromStr;

pub fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

pub fn create_test_persistence() -> SqlitePersistence {
    SqlitePersistence::new_in_memory().unwrap()
}

pub fn new_material(name: &str, category: MaterialCategory, price: &str) -> NewMaterial {
    NewMaterial {
        name: name.to_string(),
        category,
        description: None,
        unit: None,
        price: dec(price),
        lookup_data: None,
        is_active: true,
    }
}

pub fn new_labor_rate(name: &str, rate: &str) -> NewLaborRate {
    NewLaborRate {
        name: name.to_string(),
        description: None,
        rate_per_hour: dec(rate),
        is_active: true,
    }
}

/// Inserts the catalog the calculator needs for a 60 GPM, 300 ft job.
pub fn seed_catalog(persistence: &mut SqlitePersistence) {
    let mut pipe: NewMaterial = new_material("2\" Pipe", MaterialCategory::Pipe, "11.08");
    pipe.lookup_data = Some(LookupData::Pipe {
        gpm_min: dec("0"),
        gpm_max: dec("70"),
        friction_loss: dec("0.27"),
    });
    let mut motor: NewMaterial = new_material("5 HP Motor", MaterialCategory::Motor, "2581.86");
    motor.lookup_data = Some(LookupData::Motor {
        hp_min: dec("3"),
        hp_max: dec("5"),
    });

    for material in [
        pipe,
        motor,
        new_material("#10", MaterialCategory::Wire, "3.50"),
        new_material("Concrete Pad", MaterialCategory::Concrete, "900.00"),
        new_material("Sounding Tube", MaterialCategory::SoundingTube, "1.00"),
    ] {
        persistence.create_material(&material).unwrap();
    }

    for (name, rate) in [
        ("Prep Job Labor", "175.00"),
        ("Install Submersible Labor", "395.00"),
        ("Ag Sub Pump Startup Labor", "175.00"),
    ] {
        persistence.create_labor_rate(&new_labor_rate(name, rate)).unwrap();
    }
}

pub fn create_test_client(persistence: &mut SqlitePersistence, name: &str) -> i64 {
    persistence
        .create_client(&NewClient {
            name: name.to_string(),
            contact_email: Some(String::from("office@example.com")),
            ..NewClient::default()
        })
        .unwrap()
        .client_id
}

pub fn create_test_input() -> EstimateInput {
    EstimateInput::new(
        dec("60"),
        dec("300"),
        dec("150"),
        dec("60"),
        Voltage::V240,
        LaborHours {
            prep: dec("2"),
            install: dec("8"),
            start: dec("1"),
        },
        DischargePackage::A,
    )
    .unwrap()
}

pub fn create_new_estimate(client_id: i64) -> NewEstimate {
    NewEstimate {
        client_id,
        site: NewSite {
            address: Some(String::from("4410 County Road 12")),
            coordinates: Some(String::from("40.5853,-105.0844")),
            intended_use: Some(String::from("agricultural")),
        },
        input: create_test_input(),
        overall_notes: None,
    }
}

pub fn create_test_items() -> Vec<CalculatedLineItem> {
    vec![
        manual_line_item(1, "Concrete pad", Some("1"), Some("900.00"), None, false),
        manual_line_item(2, "Labor to prep job", Some("2"), Some("175.00"), None, false),
        manual_line_item(3, "2\" Pipe", Some("300"), Some("11.08"), None, false),
    ]
}
