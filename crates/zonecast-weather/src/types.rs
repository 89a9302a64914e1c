use serde::{Deserialize, Serialize};

use crate::extract::extract_temperatures;

/// A named forecast region, as listed by the NWS zone directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub name: String,
    /// Opaque NWS zone id (e.g. "WAZ558"), used to request forecasts.
    pub id: String,
}

/// One named segment of a zone forecast ("Tonight", "Monday", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastPeriod {
    pub sequence_number: u32,
    pub label: String,
    pub narrative: String,
    /// High temperature as written in the narrative ("75", "70s", "70 to 75"), or empty.
    pub high: String,
    /// Low temperature as written in the narrative, or empty.
    pub low: String,
}

impl ForecastPeriod {
    /// Build a period and derive its high/low from the narrative text.
    pub fn from_narrative(
        sequence_number: u32,
        label: impl Into<String>,
        narrative: impl Into<String>,
    ) -> Self {
        let narrative = narrative.into();
        let temps = extract_temperatures(&narrative);
        Self {
            sequence_number,
            label: label.into(),
            narrative,
            high: temps.high,
            low: temps.low,
        }
    }

    /// True when the period reports one steady temperature rather than a high/low pair.
    pub fn is_steady(&self) -> bool {
        !self.high.is_empty() && self.high == self.low
    }
}

/// Case-insensitive substring filter over zone names and ids, keeping service order.
pub fn filter_zones<'a>(zones: &'a [Zone], query: &str) -> Vec<&'a Zone> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return zones.iter().collect();
    }
    zones
        .iter()
        .filter(|z| {
            z.name.to_lowercase().contains(&query) || z.id.to_lowercase().contains(&query)
        })
        .collect()
}

// Wire types for api.weather.gov GeoJSON responses

#[derive(Debug, Deserialize)]
pub(crate) struct ZoneCollection {
    #[serde(default)]
    features: Vec<ZoneFeature>,
}

#[derive(Debug, Deserialize)]
struct ZoneFeature {
    #[serde(default)]
    properties: Option<ZoneProperties>,
}

#[derive(Debug, Deserialize)]
struct ZoneProperties {
    name: Option<String>,
    id: Option<String>,
}

impl ZoneCollection {
    pub(crate) fn into_zones(self) -> Vec<Zone> {
        self.features
            .into_iter()
            .filter_map(|feature| {
                let props = feature.properties?;
                match (props.name, props.id) {
                    (Some(name), Some(id)) => Some(Zone { name, id }),
                    (name, id) => {
                        tracing::debug!(?name, ?id, "Skipping zone feature without name or id");
                        None
                    }
                }
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    #[serde(default)]
    properties: Option<ForecastProperties>,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
    #[serde(default)]
    periods: Vec<ApiPeriod>,
}

#[derive(Debug, Deserialize)]
struct ApiPeriod {
    #[serde(default)]
    number: u32,
    #[serde(default)]
    name: String,
    #[serde(rename = "detailedForecast", default)]
    detailed_forecast: String,
}

impl ForecastResponse {
    pub(crate) fn into_periods(self) -> Vec<ForecastPeriod> {
        self.properties
            .map(|p| p.periods)
            .unwrap_or_default()
            .into_iter()
            .map(|p| ForecastPeriod::from_narrative(p.number, p.name, p.detailed_forecast))
            .collect()
    }
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Parse error: {0}")]
    Parse(String),
}
