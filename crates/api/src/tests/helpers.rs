// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use pumpquote_domain::{Decimal, LookupData};
use pumpquote_persistence::{ClientData, SqlitePersistence};
use std::str::FromStr;

use crate::{
    ClientRequest, CreateEstimateRequest, EstimateInputRequest, LaborRateRequest,
    MaterialRequest, create_client, create_labor_rate, create_material,
};

pub fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

pub fn create_test_persistence() -> SqlitePersistence {
    SqlitePersistence::new_in_memory().unwrap()
}

pub fn material_request(name: &str, category: &str, price: &str) -> MaterialRequest {
    MaterialRequest {
        name: name.to_string(),
        category: category.to_string(),
        description: None,
        unit: None,
        price: price.to_string(),
        lookup_data: None,
        is_active: None,
    }
}

pub fn labor_rate_request(name: &str, rate: &str) -> LaborRateRequest {
    LaborRateRequest {
        name: name.to_string(),
        description: None,
        rate_per_hour: rate.to_string(),
        is_active: None,
    }
}

/// Pipe, motor, wire, concrete, sounding tube and labor rows. Bundles are
/// left out so the bundle line uses its fallback price.
pub fn seed_catalog(persistence: &mut SqlitePersistence) {
    let mut pipe: MaterialRequest = material_request("2\" Pipe", "Pipe", "11.08");
    pipe.lookup_data = Some(LookupData::Pipe {
        gpm_min: dec("55"),
        gpm_max: dec("70"),
        friction_loss: dec("0.01"),
    });
    let mut large_pipe: MaterialRequest = material_request("2.5\" Pipe", "Pipe", "14.50");
    large_pipe.lookup_data = Some(LookupData::Pipe {
        gpm_min: dec("71"),
        gpm_max: dec("110"),
        friction_loss: dec("0.075"),
    });
    let mut motor: MaterialRequest = material_request("5 HP Motor", "Motor", "2581.86");
    motor.lookup_data = Some(LookupData::Motor {
        hp_min: dec("3.5"),
        hp_max: dec("5.5"),
    });

    for request in [
        pipe,
        large_pipe,
        motor,
        material_request("#14", "Wire", "2.13"),
        material_request("#12", "Wire", "2.88"),
        material_request("#10", "Wire", "3.50"),
        material_request("Concrete Pad", "Concrete", "900.00"),
        material_request("Sounding Tube", "SoundingTube", "1.00"),
    ] {
        create_material(persistence, &request).unwrap();
    }

    for (name, rate) in [
        ("Prep Job Labor", "175.00"),
        ("Install Submersible Labor", "395.00"),
        ("Ag Sub Pump Startup Labor", "175.00"),
    ] {
        create_labor_rate(persistence, &labor_rate_request(name, rate)).unwrap();
    }
}

pub fn create_test_client(persistence: &mut SqlitePersistence) -> ClientData {
    create_client(
        persistence,
        &ClientRequest {
            name: String::from("Anderson Ranch"),
            contact_name: Some(String::from("Pat Anderson")),
            ..ClientRequest::default()
        },
    )
    .unwrap()
}

/// 60 GPM at 300 ft, 150 ft pumping level, 60 psi, 240V, package A.
pub fn create_test_input_request() -> EstimateInputRequest {
    EstimateInputRequest {
        gpm: String::from("60"),
        pump_setting: String::from("300"),
        pumping_water_level: String::from("150"),
        pressure_psi: String::from("60"),
        voltage: String::from("240"),
        prep_time_hours: Some(String::from("2")),
        install_time_hours: Some(String::from("8")),
        start_time_hours: Some(String::from("1")),
        discharge_package: String::from("A"),
    }
}

pub fn create_test_estimate_request(client_id: i64) -> CreateEstimateRequest {
    CreateEstimateRequest {
        client_id,
        site_address: Some(String::from("4410 County Road 12")),
        site_coordinates: None,
        intended_use: Some(String::from("agricultural")),
        overall_notes: None,
        input: create_test_input_request(),
    }
}
