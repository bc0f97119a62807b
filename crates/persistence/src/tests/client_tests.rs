// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_new_estimate, create_test_client, create_test_items, create_test_persistence};
use crate::error::PersistenceError;
use crate::{ClientData, CreatedEstimate, NewClient, SiteData, SqlitePersistence};

#[test]
fn test_clients_are_listed_by_name() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    create_test_client(&mut persistence, "Zimmerman Farms");
    create_test_client(&mut persistence, "Anderson Ranch");

    let names: Vec<String> = persistence
        .list_clients()
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();

    assert_eq!(names, vec!["Anderson Ranch", "Zimmerman Farms"]);
}

#[test]
fn test_update_client_replaces_fields() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let client_id: i64 = create_test_client(&mut persistence, "Anderson Ranch");

    let updated: ClientData = persistence
        .update_client(
            client_id,
            &NewClient {
                name: String::from("Anderson Ranch LLC"),
                contact_name: Some(String::from("Pat Anderson")),
                ..NewClient::default()
            },
        )
        .unwrap();

    assert_eq!(updated.name, "Anderson Ranch LLC");
    assert_eq!(updated.contact_name.as_deref(), Some("Pat Anderson"));
    assert_eq!(updated.contact_email, None);
}

#[test]
fn test_missing_client_is_not_found() {
    let mut persistence: SqlitePersistence = create_test_persistence();

    assert!(matches!(
        persistence.get_client(99),
        Err(PersistenceError::NotFound(_))
    ));
    assert!(matches!(
        persistence.update_client(99, &NewClient::default()),
        Err(PersistenceError::NotFound(_))
    ));
    assert!(matches!(
        persistence.delete_client(99),
        Err(PersistenceError::NotFound(_))
    ));
    assert!(matches!(
        persistence.list_sites_for_client(99),
        Err(PersistenceError::NotFound(_))
    ));
}

#[test]
fn test_estimate_creates_a_site_for_the_client() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let client_id: i64 = create_test_client(&mut persistence, "Anderson Ranch");

    let created: CreatedEstimate = persistence
        .create_estimate(&create_new_estimate(client_id), &create_test_items())
        .unwrap();

    let sites: Vec<SiteData> = persistence.list_sites_for_client(client_id).unwrap();
    assert_eq!(sites.len(), 1);
    assert_eq!(sites[0].site_id, created.site_id);
    assert_eq!(sites[0].address.as_deref(), Some("4410 County Road 12"));
    assert_eq!(sites[0].intended_use.as_deref(), Some("agricultural"));
}

#[test]
fn test_deleting_client_cascades_to_sites_and_estimates() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let doomed: i64 = create_test_client(&mut persistence, "Anderson Ranch");
    let kept: i64 = create_test_client(&mut persistence, "Zimmerman Farms");

    let doomed_estimate: CreatedEstimate = persistence
        .create_estimate(&create_new_estimate(doomed), &create_test_items())
        .unwrap();
    persistence
        .create_estimate(&create_new_estimate(kept), &create_test_items())
        .unwrap();

    persistence.delete_client(doomed).unwrap();

    assert!(matches!(
        persistence.get_estimate(doomed_estimate.estimate_id),
        Err(PersistenceError::NotFound(_))
    ));
    assert_eq!(persistence.list_estimates(1, 20).unwrap().total_count, 1);
    assert_eq!(persistence.list_sites_for_client(kept).unwrap().len(), 1);
}
