//! Weather data for zonecast
//!
//! Lists NWS forecast zones, fetches zone forecasts from api.weather.gov and
//! derives high/low temperatures from the forecast narratives.

pub mod extract;
pub mod provider;
pub mod states;
pub mod types;

pub use extract::{extract_temperatures, Matcher, TemperatureMatch, Temperatures};
pub use provider::{ProviderOptions, WeatherProvider};
pub use states::{find_state, search_states, State, US_STATES};
pub use types::*;
