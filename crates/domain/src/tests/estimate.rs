// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_sizing_only_catalog, create_test_input, dec};
use crate::{
    CalculatedLineItem, EstimateTotals, FallbackPrices, calculate, compute_totals,
    format_estimate_number, manual_line_item, sum_line_item_totals,
};

fn line(sort_order: u32, total: &str, is_taxable: bool) -> CalculatedLineItem {
    CalculatedLineItem {
        sort_order,
        description: format!("Item {sort_order}"),
        quantity: String::from("1"),
        rate: total.to_string(),
        total: total.to_string(),
        notes: None,
        is_taxable,
    }
}

#[test]
fn test_format_estimate_number() {
    assert_eq!(format_estimate_number(2026, 0), "2026-0001");
    assert_eq!(format_estimate_number(2026, 41), "2026-0042");
    assert_eq!(format_estimate_number(2027, 9999), "2027-10000");
}

#[test]
fn test_sum_of_calculated_items() {
    let items: Vec<CalculatedLineItem> = calculate(
        &create_test_input(),
        &create_sizing_only_catalog(),
        &FallbackPrices::default(),
    )
    .unwrap();

    // 900 + 350 + 3160 + 2581.86 + 3324 + 1120 + 300 + 1700 + 175
    assert_eq!(sum_line_item_totals(&items), "13610.86");
}

#[test]
fn test_non_numeric_total_counts_as_zero() {
    let items: Vec<CalculatedLineItem> = vec![line(1, "10.50", false), line(2, "n/a", false)];

    assert_eq!(sum_line_item_totals(&items), "10.50");
}

#[test]
fn test_compute_totals_taxes_only_taxable_items() {
    let items: Vec<CalculatedLineItem> = vec![
        line(1, "100.00", false),
        line(2, "200.00", true),
        line(3, "0.05", true),
    ];

    let totals: EstimateTotals = compute_totals(&items, dec("0.0825"));

    assert_eq!(totals.subtotal_amount, "300.05");
    // 200.05 * 0.0825 = 16.504125
    assert_eq!(totals.tax_amount, "16.50");
    assert_eq!(totals.total_amount, "316.55");
}

#[test]
fn test_compute_totals_without_taxable_items_equals_sum() {
    let items: Vec<CalculatedLineItem> = vec![line(1, "1700.00", false), line(2, "175.00", false)];

    let totals: EstimateTotals = compute_totals(&items, dec("0.0825"));

    assert_eq!(totals.subtotal_amount, "1875.00");
    assert_eq!(totals.tax_amount, "0.00");
    assert_eq!(totals.total_amount, sum_line_item_totals(&items));
}

#[test]
fn test_manual_line_item_defaults_missing_quantity_and_rate() {
    let item: CalculatedLineItem = manual_line_item(3, "Extra fittings", None, Some("42.5"), None, true);
    assert_eq!(item.quantity, "1");
    assert_eq!(item.rate, "42.5");
    assert_eq!(item.total, "42.50");
    assert!(item.is_taxable);

    let item: CalculatedLineItem = manual_line_item(4, "Travel", Some("3"), None, None, false);
    assert_eq!(item.rate, "0.00");
    assert_eq!(item.total, "0.00");
}

#[test]
fn test_manual_line_item_recomputes_total() {
    let item: CalculatedLineItem = manual_line_item(
        7,
        "2\" Pipe",
        Some(" 250 "),
        Some("11.08"),
        Some(String::from("shorter run")),
        false,
    );
    assert_eq!(item.quantity, "250");
    assert_eq!(item.total, "2770.00");
    assert_eq!(item.notes.as_deref(), Some("shorter run"));
}
