// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! ## Module Organization
//!
//! - `catalog`: Materials and labor rates
//! - `clients`: Clients and their sites
//! - `estimates`: Estimates, line items and the estimate listing
//! - `settings`: The settings row

pub mod catalog;
pub mod clients;
pub mod estimates;
pub mod settings;
