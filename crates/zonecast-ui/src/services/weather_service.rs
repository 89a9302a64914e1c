//! Weather backend: async zone listing and forecast fetching.
//! Network work runs on the tokio runtime; results are sent back over a channel.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use zonecast_weather::{ForecastPeriod, WeatherProvider, Zone};

/// Error type for weather operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeatherError {
    Network(String),
    Api { status: u16, message: String },
    NotInitialized,
}

impl std::fmt::Display for WeatherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeatherError::Network(s) => write!(f, "Weather error: {}", s),
            WeatherError::Api { status, message } => {
                write!(f, "Weather API error: {} - {}", status, message)
            }
            WeatherError::NotInitialized => write!(f, "Weather service not initialized"),
        }
    }
}

impl std::error::Error for WeatherError {}

impl From<zonecast_weather::WeatherError> for WeatherError {
    fn from(e: zonecast_weather::WeatherError) -> Self {
        match e {
            zonecast_weather::WeatherError::Api { status, message } => {
                WeatherError::Api { status, message }
            }
            other => WeatherError::Network(other.to_string()),
        }
    }
}

/// Messages sent from async operations back to the controller
#[derive(Debug)]
pub enum WeatherServiceMessage {
    /// Result of listing the zones of `area`
    ZonesDone {
        area: String,
        result: Result<Vec<Zone>, WeatherError>,
    },
    /// Forecast for the selection identified by `generation`; empty on failure
    ForecastDone {
        generation: u64,
        periods: Vec<ForecastPeriod>,
    },
}

/// Request the zone list of an area.
/// Sends `ZonesDone` on the channel when complete.
pub fn request_zones(
    tx: &UnboundedSender<WeatherServiceMessage>,
    provider: Arc<WeatherProvider>,
    area: String,
) {
    let tx = tx.clone();
    let runtime = match tokio::runtime::Handle::try_current() {
        Ok(r) => r,
        Err(_) => {
            let _ = tx.send(WeatherServiceMessage::ZonesDone {
                area,
                result: Err(WeatherError::NotInitialized),
            });
            return;
        }
    };

    runtime.spawn(async move {
        let result = provider.list_zones(&area).await.map_err(|e| {
            tracing::error!("Failed to list zones for {}: {}", area, e);
            WeatherError::from(e)
        });
        let _ = tx.send(WeatherServiceMessage::ZonesDone { area, result });
    });
}

/// Request the forecast of a zone for the selection `generation`.
/// Sends `ForecastDone` on the channel when complete; failures arrive as an empty list.
pub fn request_forecast(
    tx: &UnboundedSender<WeatherServiceMessage>,
    provider: Arc<WeatherProvider>,
    zone_id: String,
    generation: u64,
) {
    let tx = tx.clone();
    let runtime = match tokio::runtime::Handle::try_current() {
        Ok(r) => r,
        Err(_) => {
            tracing::error!("No runtime to fetch forecast for {}", zone_id);
            let _ = tx.send(WeatherServiceMessage::ForecastDone {
                generation,
                periods: Vec::new(),
            });
            return;
        }
    };

    runtime.spawn(async move {
        let periods = provider.get_forecast(&zone_id).await;
        let _ = tx.send(WeatherServiceMessage::ForecastDone {
            generation,
            periods,
        });
    });
}
