use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::app::{NewsdeskError, Result};
use crate::config::GeoConfig;
use crate::domain::UserLocation;
use crate::fetcher::GeoLocator;

/// The provider returns many more fields; only these are kept.
#[derive(Debug, Deserialize)]
struct GeoResponse {
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    country_name: Option<String>,
    #[serde(default)]
    country_code: Option<String>,
    #[serde(default)]
    error: bool,
    #[serde(default)]
    reason: Option<String>,
}

pub struct HttpGeoLocator {
    client: Client,
    endpoint: Url,
}

impl HttpGeoLocator {
    pub fn new(config: &GeoConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("newsdesk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let mut base = Url::parse(&config.provider_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base.join("json/")?;

        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl GeoLocator for HttpGeoLocator {
    async fn locate(&self) -> Result<UserLocation> {
        let response = self.client.get(self.endpoint.clone()).send().await?;
        if let Err(e) = response.error_for_status_ref() {
            tracing::error!("Geolocation lookup failed with status {}", response.status());
            return Err(e.into());
        }

        let body: GeoResponse = response.json().await?;
        if body.error {
            let reason = body.reason.unwrap_or_else(|| "unknown".to_string());
            tracing::error!("Geolocation lookup rejected: {}", reason);
            return Err(NewsdeskError::Other(format!(
                "Geolocation lookup failed: {}",
                reason
            )));
        }

        Ok(UserLocation {
            city: body.city.unwrap_or_default(),
            region: body.region.unwrap_or_default(),
            country_name: body.country_name.unwrap_or_default(),
            country_code: body.country_code.unwrap_or_default(),
        })
    }
}
