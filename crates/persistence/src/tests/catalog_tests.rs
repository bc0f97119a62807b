// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_persistence, dec, new_labor_rate, new_material, seed_catalog};
use crate::error::PersistenceError;
use crate::queries::catalog::parse_lookup_data;
use crate::{LaborRateData, MaterialData, NewMaterial, SqlitePersistence};
use pumpquote_domain::{CatalogMaterial, LookupData, MaterialCategory};

#[test]
fn test_material_round_trip_keeps_lookup_data() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    seed_catalog(&mut persistence);

    let materials: Vec<MaterialData> = persistence.list_materials().unwrap();
    let pipe: &MaterialData = materials.iter().find(|m| m.name == "2\" Pipe").unwrap();

    assert_eq!(pipe.category, MaterialCategory::Pipe);
    assert_eq!(pipe.price, dec("11.08"));
    assert_eq!(
        pipe.lookup_data,
        Some(LookupData::Pipe {
            gpm_min: dec("0"),
            gpm_max: dec("70"),
            friction_loss: dec("0.27"),
        })
    );
    assert!(pipe.is_active);
}

#[test]
fn test_inactive_rows_are_hidden_from_the_calculator() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    seed_catalog(&mut persistence);

    let mut retired: NewMaterial = new_material("#14", MaterialCategory::Wire, "2.13");
    retired.is_active = false;
    persistence.create_material(&retired).unwrap();
    let mut retired_rate = new_labor_rate("Old Labor", "99.00");
    retired_rate.is_active = false;
    persistence.create_labor_rate(&retired_rate).unwrap();

    let active: Vec<CatalogMaterial> = persistence.list_active_materials().unwrap();
    assert!(active.iter().all(|m| m.name != "#14"));
    assert_eq!(active.len(), 5);
    assert_eq!(persistence.list_materials().unwrap().len(), 6);

    assert_eq!(persistence.list_active_labor_rates().unwrap().len(), 3);
    assert_eq!(persistence.list_labor_rates().unwrap().len(), 4);
}

#[test]
fn test_active_materials_keep_insertion_order() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    for name in ["#14", "#12", "#10"] {
        persistence
            .create_material(&new_material(name, MaterialCategory::Wire, "1.00"))
            .unwrap();
    }

    let names: Vec<String> = persistence
        .list_active_materials()
        .unwrap()
        .into_iter()
        .map(|m| m.name)
        .collect();
    assert_eq!(names, vec!["#14", "#12", "#10"]);
}

#[test]
fn test_duplicate_material_name_is_rejected() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    persistence
        .create_material(&new_material("Concrete Pad", MaterialCategory::Concrete, "900"))
        .unwrap();

    let result = persistence.create_material(&new_material(
        "Concrete Pad",
        MaterialCategory::Concrete,
        "950",
    ));

    assert_eq!(
        result,
        Err(PersistenceError::DuplicateName {
            resource_type: "material",
            name: String::from("Concrete Pad"),
        })
    );
}

#[test]
fn test_duplicate_labor_rate_name_is_rejected_on_rename() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    persistence
        .create_labor_rate(&new_labor_rate("Prep Job Labor", "175"))
        .unwrap();
    let other: LaborRateData = persistence
        .create_labor_rate(&new_labor_rate("Travel", "60"))
        .unwrap();

    let result = persistence.update_labor_rate(
        other.labor_rate_id,
        &new_labor_rate("Prep Job Labor", "60"),
    );

    assert!(matches!(result, Err(PersistenceError::DuplicateName { .. })));
}

#[test]
fn test_update_and_delete_material() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let created: MaterialData = persistence
        .create_material(&new_material("Sounding Tube", MaterialCategory::SoundingTube, "1.00"))
        .unwrap();

    let updated: MaterialData = persistence
        .update_material(
            created.material_id,
            &new_material("Sounding Tube", MaterialCategory::SoundingTube, "1.25"),
        )
        .unwrap();
    assert_eq!(updated.price, dec("1.25"));
    assert_eq!(updated.created_at, created.created_at);

    persistence.delete_material(created.material_id).unwrap();
    assert!(matches!(
        persistence.get_material(created.material_id),
        Err(PersistenceError::NotFound(_))
    ));
    assert!(matches!(
        persistence.delete_material(created.material_id),
        Err(PersistenceError::NotFound(_))
    ));
}

#[test]
fn test_update_missing_labor_rate_is_not_found() {
    let mut persistence: SqlitePersistence = create_test_persistence();

    let result = persistence.update_labor_rate(404, &new_labor_rate("Nobody", "1"));

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_parse_lookup_data_accepts_numbers_and_strings() {
    let lookup: Option<LookupData> = parse_lookup_data(
        "2\" Pipe",
        MaterialCategory::Pipe,
        r#"{"gpmMin": 0, "gpmMax": "70", "frictionLoss": 0.27}"#,
    )
    .unwrap();

    assert_eq!(
        lookup,
        Some(LookupData::Pipe {
            gpm_min: dec("0"),
            gpm_max: dec("70"),
            friction_loss: dec("0.27"),
        })
    );
}

#[test]
fn test_parse_lookup_data_defaults_missing_friction_loss() {
    let lookup: Option<LookupData> = parse_lookup_data(
        "3\" Pipe",
        MaterialCategory::Pipe,
        r#"{"gpmMin": 71, "gpmMax": 150}"#,
    )
    .unwrap();

    assert_eq!(
        lookup,
        Some(LookupData::Pipe {
            gpm_min: dec("71"),
            gpm_max: dec("150"),
            friction_loss: dec("0"),
        })
    );
}

#[test]
fn test_parse_lookup_data_without_full_range_is_ignored() {
    let pipe = parse_lookup_data("Pipe", MaterialCategory::Pipe, r#"{"gpmMin": 71}"#).unwrap();
    assert_eq!(pipe, None);

    let motor = parse_lookup_data("Motor", MaterialCategory::Motor, r#"{"hpMax": 5}"#).unwrap();
    assert_eq!(motor, None);

    let wire = parse_lookup_data("#10", MaterialCategory::Wire, r#"{"hpMin": 1, "hpMax": 5}"#)
        .unwrap();
    assert_eq!(wire, None);
}

#[test]
fn test_parse_lookup_data_rejects_non_numeric_values() {
    let result = parse_lookup_data(
        "Motor",
        MaterialCategory::Motor,
        r#"{"hpMin": true, "hpMax": 5}"#,
    );
    assert!(matches!(result, Err(PersistenceError::SerializationError(_))));

    let result = parse_lookup_data("Motor", MaterialCategory::Motor, "not json");
    assert!(matches!(result, Err(PersistenceError::SerializationError(_))));
}
