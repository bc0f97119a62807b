// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{
    create_new_estimate, create_test_client, create_test_items, create_test_persistence, dec,
};
use crate::error::PersistenceError;
use crate::{
    CreatedEstimate, EstimateData, EstimateDetail, EstimatePage, SettingsData, SqlitePersistence,
};
use pumpquote_domain::{
    CalculatedLineItem, EstimateInput, EstimateStatus, EstimateTotals, manual_line_item,
};
use time::macros::datetime;

#[test]
fn test_create_estimate_stores_inputs_and_totals() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let client_id: i64 = create_test_client(&mut persistence, "Anderson Ranch");

    let created: CreatedEstimate = persistence
        .create_estimate(&create_new_estimate(client_id), &create_test_items())
        .unwrap();
    let estimate: EstimateData = persistence.get_estimate(created.estimate_id).unwrap();

    assert_eq!(estimate.status, EstimateStatus::Draft);
    assert_eq!(estimate.gpm, dec("60"));
    assert_eq!(estimate.pump_setting, dec("300"));
    assert_eq!(estimate.subtotal_amount, "4574.00");
    assert_eq!(estimate.tax_amount, "0.00");
    assert_eq!(estimate.total_amount, "4574.00");
    assert_eq!(estimate.approved_at, None);

    let input: EstimateInput = estimate.calculation_input().unwrap();
    assert_eq!(input, create_new_estimate(client_id).input);
}

#[test]
fn test_estimate_numbers_run_per_year() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let client_id: i64 = create_test_client(&mut persistence, "Anderson Ranch");
    let items: Vec<CalculatedLineItem> = create_test_items();

    let first: CreatedEstimate = persistence
        .create_estimate_at(
            &create_new_estimate(client_id),
            &items,
            datetime!(2026-03-01 09:00 UTC),
        )
        .unwrap();
    let second: CreatedEstimate = persistence
        .create_estimate_at(
            &create_new_estimate(client_id),
            &items,
            datetime!(2026-11-20 15:30 UTC),
        )
        .unwrap();
    let next_year: CreatedEstimate = persistence
        .create_estimate_at(
            &create_new_estimate(client_id),
            &items,
            datetime!(2027-01-02 08:00 UTC),
        )
        .unwrap();

    assert_eq!(first.estimate_number, "2026-0001");
    assert_eq!(second.estimate_number, "2026-0002");
    assert_eq!(next_year.estimate_number, "2027-0001");
}

#[test]
fn test_estimate_number_uses_utc_year() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let client_id: i64 = create_test_client(&mut persistence, "Anderson Ranch");

    let created: CreatedEstimate = persistence
        .create_estimate_at(
            &create_new_estimate(client_id),
            &create_test_items(),
            datetime!(2026-12-31 20:00 -06:00),
        )
        .unwrap();

    assert_eq!(created.estimate_number, "2027-0001");
}

#[test]
fn test_estimate_number_skips_numbers_taken_before_a_delete() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let client_id: i64 = create_test_client(&mut persistence, "Anderson Ranch");
    let items: Vec<CalculatedLineItem> = create_test_items();

    let first: CreatedEstimate = persistence
        .create_estimate_at(
            &create_new_estimate(client_id),
            &items,
            datetime!(2026-02-01 10:00 UTC),
        )
        .unwrap();
    persistence
        .create_estimate_at(
            &create_new_estimate(client_id),
            &items,
            datetime!(2026-02-02 10:00 UTC),
        )
        .unwrap();
    persistence.delete_estimate(first.estimate_id).unwrap();

    let third: CreatedEstimate = persistence
        .create_estimate_at(
            &create_new_estimate(client_id),
            &items,
            datetime!(2026-02-03 10:00 UTC),
        )
        .unwrap();

    assert_eq!(third.estimate_number, "2026-0003");
}

#[test]
fn test_create_estimate_for_missing_client_writes_nothing() {
    let mut persistence: SqlitePersistence = create_test_persistence();

    let result = persistence.create_estimate(&create_new_estimate(42), &create_test_items());

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
    assert_eq!(persistence.list_estimates(1, 20).unwrap().total_count, 0);
}

#[test]
fn test_failed_line_item_insert_rolls_back_site_and_estimate() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let client_id: i64 = create_test_client(&mut persistence, "Anderson Ranch");
    let mut items: Vec<CalculatedLineItem> = create_test_items();
    items.push(manual_line_item(u32::MAX, "Unstorable", None, None, None, false));

    let result = persistence.create_estimate(&create_new_estimate(client_id), &items);

    assert!(result.is_err());
    assert_eq!(persistence.list_estimates(1, 20).unwrap().total_count, 0);
    assert!(persistence.list_sites_for_client(client_id).unwrap().is_empty());
}

#[test]
fn test_tax_rate_comes_from_settings() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let client_id: i64 = create_test_client(&mut persistence, "Anderson Ranch");
    persistence
        .save_settings(&SettingsData {
            default_sales_tax_rate: Some(dec("0.0825")),
            ..SettingsData::default()
        })
        .unwrap();
    let items: Vec<CalculatedLineItem> = vec![
        manual_line_item(1, "Pressure tank", Some("1"), Some("100.00"), None, true),
        manual_line_item(2, "Labor", Some("2"), Some("50.00"), None, false),
    ];

    let created: CreatedEstimate = persistence
        .create_estimate(&create_new_estimate(client_id), &items)
        .unwrap();
    let estimate: EstimateData = persistence.get_estimate(created.estimate_id).unwrap();

    assert_eq!(estimate.tax_rate, "0.0825");
    assert_eq!(estimate.subtotal_amount, "200.00");
    assert_eq!(estimate.tax_amount, "8.25");
    assert_eq!(estimate.total_amount, "208.25");
}

#[test]
fn test_replace_line_items_recomputes_totals() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let client_id: i64 = create_test_client(&mut persistence, "Anderson Ranch");
    let created: CreatedEstimate = persistence
        .create_estimate(&create_new_estimate(client_id), &create_test_items())
        .unwrap();

    let totals: EstimateTotals = persistence
        .replace_line_items(
            created.estimate_id,
            &[manual_line_item(1, "Service call", None, Some("125.50"), None, false)],
        )
        .unwrap();

    assert_eq!(totals.subtotal_amount, "125.50");
    assert_eq!(totals.total_amount, "125.50");

    let detail: EstimateDetail = persistence.get_estimate_detail(created.estimate_id).unwrap();
    assert_eq!(detail.line_items.len(), 1);
    assert_eq!(detail.line_items[0].quantity, "1");
    assert_eq!(detail.line_items[0].total, "125.50");
    assert_eq!(detail.estimate.total_amount, "125.50");
}

#[test]
fn test_failed_replace_keeps_previous_line_items() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let client_id: i64 = create_test_client(&mut persistence, "Anderson Ranch");
    let created: CreatedEstimate = persistence
        .create_estimate(&create_new_estimate(client_id), &create_test_items())
        .unwrap();

    let result = persistence.replace_line_items(
        created.estimate_id,
        &[manual_line_item(u32::MAX, "Unstorable", None, None, None, false)],
    );

    assert!(result.is_err());
    let detail: EstimateDetail = persistence.get_estimate_detail(created.estimate_id).unwrap();
    assert_eq!(detail.line_items.len(), 3);
    assert_eq!(detail.estimate.total_amount, "4574.00");
}

#[test]
fn test_replace_line_items_for_missing_estimate() {
    let mut persistence: SqlitePersistence = create_test_persistence();

    let result = persistence.replace_line_items(7, &create_test_items());

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_detail_returns_line_items_in_sort_order() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let client_id: i64 = create_test_client(&mut persistence, "Anderson Ranch");
    let items: Vec<CalculatedLineItem> = vec![
        manual_line_item(3, "Third", None, Some("3.00"), None, false),
        manual_line_item(1, "First", None, Some("1.00"), Some(String::from("note")), true),
        manual_line_item(2, "Second", None, Some("2.00"), None, false),
    ];

    let created: CreatedEstimate = persistence
        .create_estimate(&create_new_estimate(client_id), &items)
        .unwrap();
    let detail: EstimateDetail = persistence.get_estimate_detail(created.estimate_id).unwrap();

    let descriptions: Vec<&str> = detail
        .line_items
        .iter()
        .map(|item| item.description.as_str())
        .collect();
    assert_eq!(descriptions, vec!["First", "Second", "Third"]);
    assert!(detail.line_items[0].is_taxable);
    assert_eq!(detail.line_items[0].notes.as_deref(), Some("note"));
    assert_eq!(detail.client.client_id, client_id);
    assert_eq!(detail.site.site_id, created.site_id);
}

#[test]
fn test_approving_records_approval_time() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let client_id: i64 = create_test_client(&mut persistence, "Anderson Ranch");
    let created: CreatedEstimate = persistence
        .create_estimate(&create_new_estimate(client_id), &create_test_items())
        .unwrap();

    persistence
        .update_estimate_status(created.estimate_id, EstimateStatus::Approved)
        .unwrap();
    let approved: EstimateData = persistence.get_estimate(created.estimate_id).unwrap();
    assert_eq!(approved.status, EstimateStatus::Approved);
    assert!(approved.approved_at.is_some());

    persistence
        .update_estimate_status(created.estimate_id, EstimateStatus::Sent)
        .unwrap();
    let sent: EstimateData = persistence.get_estimate(created.estimate_id).unwrap();
    assert_eq!(sent.status, EstimateStatus::Sent);
    assert_eq!(sent.approved_at, approved.approved_at);
}

#[test]
fn test_status_update_for_missing_estimate() {
    let mut persistence: SqlitePersistence = create_test_persistence();

    let result = persistence.update_estimate_status(5, EstimateStatus::Archived);

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_list_estimates_pages_newest_first() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let client_id: i64 = create_test_client(&mut persistence, "Anderson Ranch");
    let items: Vec<CalculatedLineItem> = create_test_items();
    for at in [
        datetime!(2026-01-10 08:00 UTC),
        datetime!(2026-01-11 08:00 UTC),
        datetime!(2026-01-12 08:00 UTC),
    ] {
        persistence
            .create_estimate_at(&create_new_estimate(client_id), &items, at)
            .unwrap();
    }

    let first_page: EstimatePage = persistence.list_estimates(1, 2).unwrap();
    assert_eq!(first_page.total_count, 3);
    assert_eq!(first_page.estimates.len(), 2);
    assert_eq!(first_page.estimates[0].estimate_number, "2026-0003");
    assert_eq!(first_page.estimates[1].estimate_number, "2026-0002");
    assert_eq!(first_page.estimates[0].client_name, "Anderson Ranch");

    let second_page: EstimatePage = persistence.list_estimates(2, 2).unwrap();
    assert_eq!(second_page.estimates.len(), 1);
    assert_eq!(second_page.estimates[0].estimate_number, "2026-0001");

    let past_end: EstimatePage = persistence.list_estimates(5, 2).unwrap();
    assert!(past_end.estimates.is_empty());
    assert_eq!(past_end.total_count, 3);
}

#[test]
fn test_page_zero_is_treated_as_first_page() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let client_id: i64 = create_test_client(&mut persistence, "Anderson Ranch");
    persistence
        .create_estimate(&create_new_estimate(client_id), &create_test_items())
        .unwrap();

    let page: EstimatePage = persistence.list_estimates(0, 20).unwrap();

    assert_eq!(page.page, 1);
    assert_eq!(page.estimates.len(), 1);
}

#[test]
fn test_delete_estimate_removes_line_items() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let client_id: i64 = create_test_client(&mut persistence, "Anderson Ranch");
    let created: CreatedEstimate = persistence
        .create_estimate(&create_new_estimate(client_id), &create_test_items())
        .unwrap();

    persistence.delete_estimate(created.estimate_id).unwrap();

    assert!(matches!(
        persistence.get_estimate_detail(created.estimate_id),
        Err(PersistenceError::NotFound(_))
    ));
    assert!(matches!(
        persistence.delete_estimate(created.estimate_id),
        Err(PersistenceError::NotFound(_))
    ));
}
