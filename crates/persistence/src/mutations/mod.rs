// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! ## Module Organization
//!
//! - `catalog`: Material and labor rate administration
//! - `clients`: Clients and sites
//! - `estimates`: Atomic estimate creation, line item replacement, status
//! - `settings`: Settings upsert
//!
//! Timestamps are stored as RFC 3339 strings in UTC.

pub mod catalog;
pub mod clients;
pub mod estimates;
pub mod settings;

use num_traits::ToPrimitive;
use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};

use crate::error::PersistenceError;

/// Formats a timestamp for storage.
///
/// # Errors
///
/// Returns `SerializationError` if the timestamp cannot be formatted.
pub fn format_timestamp(at: OffsetDateTime) -> Result<String, PersistenceError> {
    at.to_offset(UtcOffset::UTC)
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Converts a flag to its stored integer form.
pub(crate) const fn flag(value: bool) -> i32 {
    if value { 1 } else { 0 }
}

/// Converts a line item sort order to its stored form.
pub(crate) fn stored_sort_order(sort_order: u32) -> Result<i32, PersistenceError> {
    sort_order.to_i32().ok_or_else(|| {
        PersistenceError::SerializationError(format!("Sort order {sort_order} is out of range"))
    })
}
