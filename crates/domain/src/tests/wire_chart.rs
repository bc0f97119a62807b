// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::dec;
use crate::{Voltage, WIRE_CHART, parse_motor_hp, wire_gauge_for};

fn gauge(voltage: Voltage, hp: &str, feet: &str) -> Option<&'static str> {
    wire_gauge_for(voltage, dec(hp), dec(feet))
}

#[test]
fn test_480v_5hp_boundary() {
    assert_eq!(gauge(Voltage::V480, "5", "590"), Some("#14"));
    assert_eq!(gauge(Voltage::V480, "5", "591"), Some("#12"));
}

#[test]
fn test_480v_tiers() {
    assert_eq!(gauge(Voltage::V480, "7.5", "420"), Some("#14"));
    assert_eq!(gauge(Voltage::V480, "7.5", "421"), Some("#12"));
    assert_eq!(gauge(Voltage::V480, "7.5", "681"), Some("#10"));
    assert_eq!(gauge(Voltage::V480, "10", "500"), Some("#12"));
    assert_eq!(gauge(Voltage::V480, "15", "240"), Some("#10"));
    assert_eq!(gauge(Voltage::V480, "15", "241"), Some("#8"));
    assert_eq!(gauge(Voltage::V480, "20", "410"), Some("#10"));
    assert_eq!(gauge(Voltage::V480, "25", "531"), Some("#6"));
    assert_eq!(gauge(Voltage::V480, "30", "430"), Some("#8"));
    assert_eq!(gauge(Voltage::V480, "40", "790"), Some("#4"));
    assert_eq!(gauge(Voltage::V480, "50", "641"), Some("#2"));
    assert_eq!(gauge(Voltage::V480, "60", "100"), Some("#2"));
    assert_eq!(gauge(Voltage::V480, "75", "2000"), Some("#1"));
    assert_eq!(gauge(Voltage::V480, "100", "100"), None);
}

#[test]
fn test_240v_tiers() {
    assert_eq!(gauge(Voltage::V240, "5", "230"), Some("#12"));
    assert_eq!(gauge(Voltage::V240, "5", "370"), Some("#10"));
    assert_eq!(gauge(Voltage::V240, "5", "590"), Some("#8"));
    assert_eq!(gauge(Voltage::V240, "5", "591"), Some("#6"));
    assert_eq!(gauge(Voltage::V240, "7.5", "261"), Some("#8"));
    assert_eq!(gauge(Voltage::V240, "10", "761"), Some("#3"));
    assert_eq!(gauge(Voltage::V240, "15", "651"), Some("#2"));
    assert_eq!(gauge(Voltage::V240, "20", "450"), Some("#3"));
    assert_eq!(gauge(Voltage::V240, "25", "320"), Some("#4"));
    assert_eq!(gauge(Voltage::V240, "30", "411"), Some("#1"));
    assert_eq!(gauge(Voltage::V240, "40", "100"), None);
}

#[test]
fn test_horsepower_between_tiers_uses_next_tier() {
    // 6 HP is above the 5 HP tier and inside the 7.5 HP tier
    assert_eq!(gauge(Voltage::V480, "6", "421"), Some("#12"));
    assert_eq!(gauge(Voltage::V240, "5.5", "250"), Some("#10"));
}

#[test]
fn test_fractional_pump_setting_past_threshold() {
    assert_eq!(gauge(Voltage::V480, "5", "590.5"), Some("#12"));
}

#[test]
fn test_chart_steps_ascend_within_each_tier() {
    for tier in WIRE_CHART {
        let distances: Vec<u32> = tier.steps.iter().map(|(feet, _)| *feet).collect();
        let mut sorted: Vec<u32> = distances.clone();
        sorted.sort_unstable();
        assert_eq!(distances, sorted);
    }
}

#[test]
fn test_chart_tiers_ascend_per_voltage() {
    for voltage in [Voltage::V240, Voltage::V480] {
        let tiers: Vec<u32> = WIRE_CHART
            .iter()
            .filter(|t| t.voltage == voltage)
            .map(|t| t.max_hp_tenths)
            .collect();
        assert!(tiers.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn test_parse_motor_hp() {
    assert_eq!(parse_motor_hp("5 HP Motor"), Some(dec("5")));
    assert_eq!(parse_motor_hp("7.5 HP Motor"), Some(dec("7.5")));
    assert_eq!(parse_motor_hp("30HP Motor"), Some(dec("30")));
    assert_eq!(parse_motor_hp("Motor 5 HP"), None);
    assert_eq!(parse_motor_hp(""), None);
}
