//! Plain-text rendering of the picker and forecast screens.

use std::fmt::Write;

use zonecast_weather::{find_state, ForecastPeriod};

use crate::view_state::{Screen, ViewState};

pub const NO_DATA: &str = "No weather data available";

const UP: char = '↑';
const DOWN: char = '↓';

pub fn render(state: &ViewState) -> String {
    match state.screen {
        Screen::LocationPicker => render_picker(state),
        Screen::Forecast => render_forecast(state),
    }
}

fn render_picker(state: &ViewState) -> String {
    let mut out = String::from("Weather\n");

    let area = match &state.area {
        Some(code) => match find_state(code) {
            Some(s) => format!("{} ({})", s.name, s.abbreviation),
            None => code.clone(),
        },
        None => "(none)".to_string(),
    };
    let _ = writeln!(out, "State: {}", area);

    if state.zones_loading {
        out.push_str("Zone: loading...\n");
    } else if let Some(err) = &state.zone_error {
        let _ = writeln!(out, "Zone: unavailable ({})", err);
    } else if !state.zone_picker_enabled() {
        out.push_str("Zone: (disabled)\n");
    } else {
        out.push_str("Zone:\n");
        for (i, zone) in state.zones.iter().enumerate() {
            let marker = if state.pending_zone.as_ref() == Some(zone) { '*' } else { ' ' };
            let _ = writeln!(out, "{} {:>3}. {} ({})", marker, i + 1, zone.name, zone.id);
        }
    }

    let action = if state.get_weather_enabled() { "enabled" } else { "disabled" };
    let _ = writeln!(out, "[Get Weather: {}]", action);
    out
}

fn render_forecast(state: &ViewState) -> String {
    let mut out = String::from("Weather\n");
    let name = state.zone.as_ref().map(|z| z.name.as_str()).unwrap_or_default();
    let _ = writeln!(out, "Location: {}", name);

    if state.forecast_loading && state.forecast.is_empty() {
        out.push_str("Loading...\n");
        return out;
    }
    if state.shows_no_data() {
        let _ = writeln!(out, "{}", NO_DATA);
        return out;
    }

    for (i, period) in state.forecast.iter().enumerate() {
        out.push_str(&render_card(i, period, state.is_expanded(i)));
    }
    out
}

/// One forecast card. The low's number is left out when it equals the high.
pub fn render_card(index: usize, period: &ForecastPeriod, expanded: bool) -> String {
    let mut line = format!("{:>2}. {}", index + 1, period.label);
    if !period.high.is_empty() {
        let _ = write!(line, "  {}{}", UP, period.high);
    }
    if !period.low.is_empty() {
        if period.is_steady() {
            let _ = write!(line, "  {}", DOWN);
        } else {
            let _ = write!(line, "  {}{}", DOWN, period.low);
        }
    }
    line.push_str(if expanded { "  [-]\n" } else { "  [+]\n" });
    if expanded {
        let _ = writeln!(line, "    {}", period.narrative);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view_state::{reduce, ViewEvent};
    use zonecast_weather::Zone;

    fn seattle() -> Zone {
        Zone {
            name: "Seattle".into(),
            id: "WAZ558".into(),
        }
    }

    #[test]
    fn test_card_shows_high_and_low() {
        let period = ForecastPeriod::from_narrative(1, "Today", "High near 75 and low around 50.");
        let card = render_card(0, &period, false);
        assert_eq!(card, " 1. Today  ↑75  ↓50  [+]\n");
    }

    #[test]
    fn test_steady_card_omits_low_number() {
        let period = ForecastPeriod::from_narrative(2, "Tonight", "Temperature steady around 32.");
        let card = render_card(1, &period, false);
        assert_eq!(card, " 2. Tonight  ↑32  ↓  [+]\n");
    }

    #[test]
    fn test_equal_high_and_low_share_one_number() {
        let period =
            ForecastPeriod::from_narrative(3, "Monday", "Cloudy, high near 45. Low around 45.");
        assert!(period.is_steady());
        let card = render_card(2, &period, false);
        assert_eq!(card, " 3. Monday  ↑45  ↓  [+]\n");
    }

    #[test]
    fn test_card_without_temperatures_has_no_markers() {
        let period = ForecastPeriod::from_narrative(1, "Today", "Cloudy.");
        let card = render_card(0, &period, false);
        assert!(!card.contains(UP));
        assert!(!card.contains(DOWN));
    }

    #[test]
    fn test_expanded_card_shows_narrative() {
        let period = ForecastPeriod::from_narrative(1, "Today", "Rain likely. High near 60.");
        let card = render_card(0, &period, true);
        assert!(card.contains("[-]"));
        assert!(card.contains("    Rain likely. High near 60."));
    }

    #[test]
    fn test_picker_reflects_enablement() {
        let state = ViewState::default();
        let text = render(&state);
        assert!(text.contains("State: (none)"));
        assert!(text.contains("Zone: (disabled)"));
        assert!(text.contains("[Get Weather: disabled]"));

        let state = reduce(state, ViewEvent::AreaSelected(Some("WA".into())));
        let state = reduce(
            state,
            ViewEvent::ZonesLoaded {
                area: "WA".into(),
                result: Ok(vec![seattle()]),
            },
        );
        let state = reduce(state, ViewEvent::ZonePicked(Some(seattle())));
        let text = render(&state);
        assert!(text.contains("State: Washington (WA)"));
        assert!(text.contains("*   1. Seattle (WAZ558)"));
        assert!(text.contains("[Get Weather: enabled]"));
    }

    #[test]
    fn test_empty_forecast_renders_no_data() {
        let state = reduce(ViewState::default(), ViewEvent::ZoneSelected(seattle()));
        assert!(render(&state).contains("Loading..."));

        let generation = state.generation;
        let state = reduce(
            state,
            ViewEvent::ForecastLoaded {
                generation,
                periods: Vec::new(),
            },
        );
        let text = render(&state);
        assert!(text.contains("Location: Seattle"));
        assert!(text.contains(NO_DATA));
    }
}
