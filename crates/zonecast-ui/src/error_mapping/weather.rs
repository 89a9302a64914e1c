use crate::services::weather_service::WeatherError as UiWeatherError;
use zonecast_core::{AppError, NetworkError, ReqwestErrorExt, WeatherError};

impl From<UiWeatherError> for AppError {
    fn from(e: UiWeatherError) -> Self {
        match e {
            UiWeatherError::Network(s) => AppError::Network(NetworkError::ConnectionFailed(s)),
            UiWeatherError::Api { status, message } if status >= 500 => {
                AppError::Network(NetworkError::ServerError { status, message })
            }
            UiWeatherError::Api { status, message } => {
                AppError::Weather(WeatherError::ApiError(format!("{}: {}", status, message)))
            }
            UiWeatherError::NotInitialized => AppError::Weather(WeatherError::ServiceUnavailable),
        }
    }
}

/// Map an error from `zonecast_weather::WeatherProvider` directly.
pub fn from_provider_error(e: zonecast_weather::WeatherError) -> AppError {
    match e {
        zonecast_weather::WeatherError::Network(err) => AppError::Network(err.into_network_error()),
        zonecast_weather::WeatherError::Parse(msg) => {
            AppError::Network(NetworkError::InvalidResponse(msg))
        }
        api @ zonecast_weather::WeatherError::Api { .. } => UiWeatherError::from(api).into(),
    }
}
