//! IP geolocation lookups resolved to geohashes.
//!
//! The provider (ipinfo-compatible) answers `GET {base}/{ip}?token=...` with a
//! JSON document whose `loc` field holds `"<lat>,<lng>"`. Private and reserved
//! addresses come back without `loc`; that is a lookup miss, not a transport
//! failure.

use std::net::IpAddr;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::endpoint::endpoint;
use crate::error::{Error, Result};
use crate::geohash;

/// Geohash length sent upstream as `geoPoint`.
pub const GEOHASH_PRECISION: usize = 9;

/// Default geolocation provider endpoint.
pub const DEFAULT_IPINFO_BASE_URL: &str = "https://ipinfo.io";

const SERVICE: &str = "ipinfo";

#[derive(Debug, Deserialize)]
struct IpInfoResponse {
    #[serde(default)]
    loc: Option<String>,
}

/// Resolves IP addresses to fixed-precision geohashes.
#[derive(Debug, Clone)]
pub struct GeocodeResolver {
    client: Client,
    base_url: String,
    token: String,
}

impl GeocodeResolver {
    pub fn new(client: Client, base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Look up `ip` and return its location as `(lat, lng)`.
    ///
    /// Input that is not an IPv4 or IPv6 address is a lookup miss and never
    /// reaches the provider.
    pub async fn locate(&self, ip: &str) -> Result<(f64, f64)> {
        if ip.parse::<IpAddr>().is_err() {
            debug!(ip, "not an IP address; skipping geolocation");
            return Err(Error::LookupFailed { ip: ip.to_string() });
        }

        let url = endpoint(&self.base_url, &[ip])?;
        let response = self
            .client
            .get(url)
            .query(&[("token", self.token.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(ip, status = status.as_u16(), "geolocation lookup rejected");
            return Err(Error::UpstreamStatus {
                service: SERVICE,
                status: status.as_u16(),
            });
        }

        let body: IpInfoResponse = response.json().await?;
        let loc = body.loc.ok_or_else(|| Error::LookupFailed { ip: ip.to_string() })?;

        parse_location(&loc).ok_or_else(|| {
            debug!(ip, loc = %loc, "geolocation returned unparseable location");
            Error::LookupFailed { ip: ip.to_string() }
        })
    }

    /// Look up `ip` and encode its location as a geohash of
    /// [`GEOHASH_PRECISION`] characters.
    pub async fn resolve(&self, ip: &str) -> Result<String> {
        let (lat, lng) = self.locate(ip).await?;
        let hash = geohash::encode(lat, lng, GEOHASH_PRECISION).map_err(|_| Error::LookupFailed {
            ip: ip.to_string(),
        })?;
        debug!(ip, lat, lng, geohash = %hash, "resolved IP to geohash");
        Ok(hash)
    }
}

/// Parse a `"<lat>,<lng>"` string. Whitespace around either component is ignored.
pub fn parse_location(loc: &str) -> Option<(f64, f64)> {
    let (lat, lng) = loc.split_once(',')?;
    let lat = lat.trim().parse::<f64>().ok()?;
    let lng = lng.trim().parse::<f64>().ok()?;
    Some((lat, lng))
}
