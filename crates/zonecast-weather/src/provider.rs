//! api.weather.gov client: zone directory and zone forecasts.

use reqwest::header::ACCEPT;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::types::{ForecastPeriod, ForecastResponse, WeatherError, Zone, ZoneCollection};

pub const NWS_API_BASE: &str = "https://api.weather.gov";
pub const DEFAULT_USER_AGENT: &str = concat!(
    "zonecast/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/zonecast/zonecast)"
);
const REQUEST_TIMEOUT_SECS: u64 = 10;
const GEO_JSON: &str = "application/geo+json";
/// Only land zones carry public forecasts.
const ZONE_TYPE: &str = "land";

/// Connection settings for [`WeatherProvider`].
#[derive(Debug, Clone)]
pub struct ProviderOptions {
    pub base_url: String,
    /// NWS rejects requests without an identifying User-Agent.
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for ProviderOptions {
    fn default() -> Self {
        Self {
            base_url: NWS_API_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    base_url: String,
}

impl WeatherProvider {
    pub fn new() -> Result<Self, WeatherError> {
        Self::with_options(ProviderOptions::default())
    }

    pub fn with_options(options: ProviderOptions) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: options.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List the land forecast zones of a state or area code (e.g. "WA").
    ///
    /// Transport failures and non-success statuses are errors. A body that
    /// is not a zone collection yields an empty list.
    #[instrument(skip(self), level = "info")]
    pub async fn list_zones(&self, area: &str) -> Result<Vec<Zone>, WeatherError> {
        let url = format!(
            "{}/zones?area={}&type={}",
            self.base_url,
            urlencoding::encode(area),
            ZONE_TYPE
        );

        let response = self.client.get(&url).header(ACCEPT, GEO_JSON).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(WeatherError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let body = response.text().await?;
        match serde_json::from_str::<ZoneCollection>(&body) {
            Ok(collection) => {
                let zones = collection.into_zones();
                tracing::debug!("Listed {} zones for area {}", zones.len(), area);
                Ok(zones)
            }
            Err(e) => {
                tracing::warn!("Zone listing for {} was not a zone collection: {}", area, e);
                Ok(Vec::new())
            }
        }
    }

    /// Fetch and normalize a zone forecast, reporting every failure.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_forecast(&self, zone_id: &str) -> Result<Vec<ForecastPeriod>, WeatherError> {
        let url = format!(
            "{}/zones/{}/{}/forecast",
            self.base_url,
            ZONE_TYPE,
            urlencoding::encode(zone_id)
        );

        let response = self.client.get(&url).header(ACCEPT, GEO_JSON).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(WeatherError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let body = response.text().await?;
        let forecast: ForecastResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::Parse(e.to_string()))?;
        Ok(forecast.into_periods())
    }

    /// Zone forecast for display. Any failure degrades to an empty list.
    pub async fn get_forecast(&self, zone_id: &str) -> Vec<ForecastPeriod> {
        match self.fetch_forecast(zone_id).await {
            Ok(periods) => {
                tracing::info!("Fetched {} forecast periods for {}", periods.len(), zone_id);
                periods
            }
            Err(e) => {
                tracing::warn!("No forecast for {}: {}", zone_id, e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> WeatherProvider {
        WeatherProvider::with_options(ProviderOptions {
            base_url: format!("{}/", server.uri()),
            ..ProviderOptions::default()
        })
        .unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let provider = WeatherProvider::with_options(ProviderOptions {
            base_url: "https://example.test/".to_string(),
            ..ProviderOptions::default()
        })
        .unwrap();
        assert_eq!(provider.base_url(), "https://example.test");
    }

    #[tokio::test]
    async fn test_list_zones_sends_area_type_and_headers() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/zones"))
            .and(query_param("area", "WA"))
            .and(query_param("type", "land"))
            .and(header("Accept", GEO_JSON))
            .and(header("User-Agent", DEFAULT_USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "features": [
                    {"properties": {"name": "Seattle and Vicinity", "id": "WAZ558"}}
                ]
            })))
            .mount(&mock_server)
            .await;

        let zones = provider_for(&mock_server).list_zones("WA").await.unwrap();

        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].id, "WAZ558");
    }

    #[tokio::test]
    async fn test_fetch_forecast_parse_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/zones/land/WAZ558/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server);
        let result = provider.fetch_forecast("WAZ558").await;
        assert!(matches!(result, Err(WeatherError::Parse(_))));

        assert!(provider.get_forecast("WAZ558").await.is_empty());
    }
}
