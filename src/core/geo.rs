//! Geolocation provider: approximate location of the network egress point

use std::future::Future;
use std::time::Duration;

use serde::Deserialize;

use crate::types::{GeoError, GeoLocation};

/// Placeholder for city/state/country the service did not report
pub const UNKNOWN_PLACE: &str = "unknown";

/// Resolves where this machine appears to be
pub trait GeoLocator: Send + Sync {
    fn locate(&self) -> impl Future<Output = Result<GeoLocation, GeoError>> + Send;
}

/// Response body of an ipinfo-compatible service
#[derive(Debug, Deserialize)]
struct IpInfoResponse {
    /// `"lat,lon"`
    loc: Option<String>,
    city: Option<String>,
    region: Option<String>,
    country: Option<String>,
}

/// Lookup against `https://ipinfo.io/json` or a compatible endpoint
#[derive(Debug, Clone)]
pub struct IpInfoLocator {
    client: reqwest::Client,
    url: String,
}

impl IpInfoLocator {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, GeoError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GeoError::Request(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl GeoLocator for IpInfoLocator {
    async fn locate(&self) -> Result<GeoLocation, GeoError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| GeoError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeoError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GeoError::Request(e.to_string()))?;
        parse_ipinfo(&body)
    }
}

/// Turn an ipinfo JSON document into a location; `loc` is mandatory
pub fn parse_ipinfo(body: &str) -> Result<GeoLocation, GeoError> {
    let info: IpInfoResponse =
        serde_json::from_str(body).map_err(|e| GeoError::Malformed(e.to_string()))?;

    let loc = info
        .loc
        .ok_or_else(|| GeoError::Malformed("missing loc".to_string()))?;
    let (lat, lon) = loc
        .split_once(',')
        .ok_or_else(|| GeoError::Malformed(format!("bad loc {:?}", loc)))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|_| GeoError::Malformed(format!("bad loc {:?}", loc)))
    };

    let known = |v: Option<String>| v.filter(|s| !s.is_empty()).unwrap_or_else(|| UNKNOWN_PLACE.to_string());

    Ok(GeoLocation {
        latitude: parse(lat)?,
        longitude: parse(lon)?,
        city: known(info.city),
        state: known(info.region),
        country: known(info.country),
    })
}
