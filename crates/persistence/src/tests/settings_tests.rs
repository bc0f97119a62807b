// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_persistence, dec};
use crate::{SettingsData, SqlitePersistence};

#[test]
fn test_settings_are_empty_before_first_save() {
    let mut persistence: SqlitePersistence = create_test_persistence();

    assert_eq!(persistence.get_settings().unwrap(), SettingsData::default());
}

#[test]
fn test_save_settings_upserts_single_row() {
    let mut persistence: SqlitePersistence = create_test_persistence();

    let first: SettingsData = persistence
        .save_settings(&SettingsData {
            company_name: Some(String::from("High Plains Pump & Well")),
            default_sales_tax_rate: Some(dec("0.0825")),
            ..SettingsData::default()
        })
        .unwrap();
    assert_eq!(first.company_name.as_deref(), Some("High Plains Pump & Well"));
    assert_eq!(first.default_sales_tax_rate, Some(dec("0.0825")));
    assert!(first.updated_at.is_some());

    let second: SettingsData = persistence
        .save_settings(&SettingsData {
            company_name: Some(String::from("High Plains Pump")),
            email_from_address: Some(String::from("quotes@example.com")),
            ..SettingsData::default()
        })
        .unwrap();

    assert_eq!(second.company_name.as_deref(), Some("High Plains Pump"));
    assert_eq!(second.default_sales_tax_rate, None);
    assert_eq!(second.email_from_address.as_deref(), Some("quotes@example.com"));
}
