// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Submersible drop-cable sizing chart.
//!
//! For each supply voltage and motor horsepower tier the chart lists pump
//! setting distances (feet) and the copper gauge that keeps voltage drop in
//! bounds up to that distance. Past the last distance the `beyond` gauge is
//! used. Tiers are checked in order; the first tier whose `max_hp_tenths`
//! covers the motor wins.

use crate::types::Voltage;
use rust_decimal::Decimal;

/// One horsepower tier of the wire chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireTier {
    pub voltage: Voltage,
    /// Inclusive upper bound of the tier, in tenths of a horsepower.
    pub max_hp_tenths: u32,
    /// `(max pump setting in feet, gauge)` pairs, ascending by distance.
    pub steps: &'static [(u32, &'static str)],
    /// Gauge for pump settings past the last step.
    pub beyond: &'static str,
}

impl WireTier {
    /// Inclusive upper bound of the tier in horsepower.
    #[must_use]
    pub fn max_hp(&self) -> Decimal {
        Decimal::new(i64::from(self.max_hp_tenths), 1)
    }

    /// Gauge for the given pump setting within this tier.
    #[must_use]
    pub fn gauge_for(&self, pump_setting: Decimal) -> &'static str {
        self.steps
            .iter()
            .find(|(max_feet, _)| pump_setting <= Decimal::from(*max_feet))
            .map_or(self.beyond, |&(_, gauge)| gauge)
    }
}

const fn tier(
    voltage: Voltage,
    max_hp_tenths: u32,
    steps: &'static [(u32, &'static str)],
    beyond: &'static str,
) -> WireTier {
    WireTier {
        voltage,
        max_hp_tenths,
        steps,
        beyond,
    }
}

/// The full chart, 480V tiers first.
pub const WIRE_CHART: &[WireTier] = &[
    tier(Voltage::V480, 50, &[(590, "#14")], "#12"),
    tier(Voltage::V480, 75, &[(420, "#14"), (680, "#12")], "#10"),
    tier(Voltage::V480, 100, &[(310, "#14"), (500, "#12")], "#10"),
    tier(Voltage::V480, 150, &[(240, "#10")], "#8"),
    tier(Voltage::V480, 200, &[(410, "#10")], "#8"),
    tier(Voltage::V480, 250, &[(530, "#8")], "#6"),
    tier(Voltage::V480, 300, &[(430, "#8")], "#6"),
    tier(Voltage::V480, 400, &[(790, "#4")], "#2"),
    tier(Voltage::V480, 500, &[(640, "#4")], "#2"),
    tier(Voltage::V480, 600, &[], "#2"),
    tier(Voltage::V480, 750, &[], "#1"),
    tier(Voltage::V240, 50, &[(230, "#12"), (370, "#10"), (590, "#8")], "#6"),
    tier(Voltage::V240, 75, &[(260, "#10"), (420, "#8")], "#6"),
    tier(Voltage::V240, 100, &[(310, "#8"), (490, "#6"), (760, "#4")], "#3"),
    tier(Voltage::V240, 150, &[(330, "#6"), (520, "#4"), (650, "#3")], "#2"),
    tier(Voltage::V240, 200, &[(400, "#4"), (500, "#3")], "#2"),
    tier(Voltage::V240, 250, &[(320, "#4"), (400, "#3")], "#2"),
    tier(Voltage::V240, 300, &[(330, "#3"), (410, "#2")], "#1"),
];

/// Looks up the wire gauge for a motor.
///
/// Returns `None` when the horsepower is above every tier for the voltage.
#[must_use]
pub fn wire_gauge_for(
    voltage: Voltage,
    motor_hp: Decimal,
    pump_setting: Decimal,
) -> Option<&'static str> {
    WIRE_CHART
        .iter()
        .filter(|t| t.voltage == voltage)
        .find(|t| motor_hp <= t.max_hp())
        .map(|t| t.gauge_for(pump_setting))
}

/// Parses the horsepower from the leading token of a motor name.
///
/// `"7.5 HP Motor"` gives 7.5. Returns `None` if the name does not start
/// with a number.
#[must_use]
pub fn parse_motor_hp(motor_name: &str) -> Option<Decimal> {
    let first: &str = motor_name.split_whitespace().next()?;
    let numeric: &str = first
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map_or(first, |(idx, _)| &first[..idx]);
    numeric.parse::<Decimal>().ok()
}
