// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Startup configuration.

use pumpquote_domain::FallbackPrices;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors raised while turning command-line arguments into a running
/// configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The bind address is not an IP address.
    #[error("Invalid bind address '{address}': {source}")]
    InvalidBindAddress {
        address: String,
        source: std::net::AddrParseError,
    },

    /// The fallback price file could not be read.
    #[error("Failed to read fallback prices from {}: {source}", path.display())]
    FallbackPricesUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The fallback price file is not a valid price table.
    #[error("Invalid fallback prices in {}: {source}", path.display())]
    FallbackPricesInvalid {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Combines the bind address and port into a socket address.
///
/// # Errors
///
/// Returns `InvalidBindAddress` if `bind` is not an IP address.
pub fn socket_addr(bind: &str, port: u16) -> Result<SocketAddr, ConfigError> {
    let ip: IpAddr = bind
        .trim()
        .parse()
        .map_err(|source| ConfigError::InvalidBindAddress {
            address: bind.to_string(),
            source,
        })?;
    Ok(SocketAddr::new(ip, port))
}

/// Parses a fallback price table. Keys left out keep their defaults.
///
/// # Errors
///
/// Returns `FallbackPricesInvalid` if the JSON does not describe a price
/// table.
pub fn parse_fallback_prices(path: &Path, json: &str) -> Result<FallbackPrices, ConfigError> {
    serde_json::from_str(json).map_err(|source| ConfigError::FallbackPricesInvalid {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the fallback price table, or the defaults when no file is given.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_fallback_prices(path: Option<&Path>) -> Result<FallbackPrices, ConfigError> {
    let Some(path) = path else {
        return Ok(FallbackPrices::default());
    };

    let json: String =
        std::fs::read_to_string(path).map_err(|source| ConfigError::FallbackPricesUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
    let prices: FallbackPrices = parse_fallback_prices(path, &json)?;

    info!(path = %path.display(), "Loaded fallback prices");
    Ok(prices)
}
