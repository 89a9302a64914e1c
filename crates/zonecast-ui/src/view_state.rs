//! Location picker and forecast screen state.
//!
//! The controller owns the only `ViewState`; every change goes through
//! [`reduce`], a pure `(state, event) -> state` function.

use serde::{Deserialize, Serialize};
use zonecast_weather::{ForecastPeriod, Zone};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    #[default]
    LocationPicker,
    Forecast,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub screen: Screen,
    /// Area (state) code chosen in the first picker
    pub area: Option<String>,
    pub zones: Vec<Zone>,
    pub zones_loading: bool,
    /// User-facing message when the zone listing failed
    pub zone_error: Option<String>,
    /// Zone chosen in the zone picker, not yet confirmed
    pub pending_zone: Option<Zone>,
    /// Zone whose forecast is displayed
    pub zone: Option<Zone>,
    pub forecast: Vec<ForecastPeriod>,
    /// One flag per forecast period
    pub expanded: Vec<bool>,
    pub forecast_loading: bool,
    /// Bumped whenever the displayed zone changes or is cleared.
    /// Forecast requests carry the generation they were started for.
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    AreaSelected(Option<String>),
    ZonesLoaded {
        area: String,
        result: Result<Vec<Zone>, String>,
    },
    ZonePicked(Option<Zone>),
    /// The user confirmed a zone ("get weather").
    ZoneSelected(Zone),
    /// A refresh for `generation` was started.
    ForecastRequested { generation: u64 },
    ForecastLoaded {
        generation: u64,
        periods: Vec<ForecastPeriod>,
    },
    ToggleExpanded(usize),
    ChangeLocation,
}

impl ViewState {
    /// Zone and generation that should be refreshing, if any.
    pub fn active_zone(&self) -> Option<(&Zone, u64)> {
        match (self.screen, &self.zone) {
            (Screen::Forecast, Some(zone)) => Some((zone, self.generation)),
            _ => None,
        }
    }

    pub fn zone_picker_enabled(&self) -> bool {
        self.area.is_some() && !self.zones_loading && !self.zones.is_empty()
    }

    pub fn get_weather_enabled(&self) -> bool {
        self.pending_zone.is_some()
    }

    /// True when the forecast screen should show "No weather data available".
    pub fn shows_no_data(&self) -> bool {
        self.screen == Screen::Forecast && !self.forecast_loading && self.forecast.is_empty()
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.get(index).copied().unwrap_or(false)
    }
}

pub fn reduce(state: ViewState, event: ViewEvent) -> ViewState {
    let mut state = state;
    match event {
        ViewEvent::AreaSelected(area) => {
            let area = area.filter(|a| !a.trim().is_empty());
            state.zones_loading = area.is_some();
            state.area = area;
            state.zones.clear();
            state.zone_error = None;
            state.pending_zone = None;
        }
        ViewEvent::ZonesLoaded { area, result } => {
            if state.area.as_deref() != Some(area.as_str()) {
                tracing::debug!("Dropping zone list for {} (area changed)", area);
                return state;
            }
            state.zones_loading = false;
            match result {
                Ok(zones) => {
                    state.zones = zones;
                    state.zone_error = None;
                }
                Err(message) => {
                    state.zones.clear();
                    state.zone_error = Some(message);
                }
            }
        }
        ViewEvent::ZonePicked(zone) => {
            state.pending_zone = zone;
        }
        ViewEvent::ZoneSelected(zone) => {
            state.screen = Screen::Forecast;
            state.zone = Some(zone);
            state.generation += 1;
            state.forecast.clear();
            state.expanded.clear();
            state.forecast_loading = true;
        }
        ViewEvent::ForecastRequested { generation } => {
            if state.active_zone().is_some() && generation == state.generation {
                state.forecast_loading = true;
            }
        }
        ViewEvent::ForecastLoaded {
            generation,
            periods,
        } => {
            if state.active_zone().is_none() || generation != state.generation {
                tracing::debug!(
                    "Dropping stale forecast (generation {}, current {})",
                    generation,
                    state.generation
                );
                return state;
            }
            state.expanded = vec![false; periods.len()];
            state.forecast = periods;
            state.forecast_loading = false;
        }
        ViewEvent::ToggleExpanded(index) => {
            if let Some(flag) = state.expanded.get_mut(index) {
                *flag = !*flag;
            }
        }
        ViewEvent::ChangeLocation => {
            state.screen = Screen::LocationPicker;
            state.zone = None;
            state.pending_zone = None;
            state.generation += 1;
            state.forecast.clear();
            state.expanded.clear();
            state.forecast_loading = false;
        }
    }
    state
}
