pub mod weather_service;

pub use weather_service::{request_forecast, request_zones, WeatherError, WeatherServiceMessage};
