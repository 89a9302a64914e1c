mod cli;
mod watch;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use zonecast_core::{App, AppError, ConfigError, WeatherError};
use zonecast_ui::{from_provider_error, reduce, render, ForecastController, ViewEvent, ViewState};
use zonecast_weather::{
    filter_zones, find_state, search_states, ProviderOptions, WeatherProvider, Zone, US_STATES,
};

use cli::{Cli, Command};

fn build_provider(app: &App) -> Result<Arc<WeatherProvider>> {
    let weather = &app.config().weather;
    let provider = WeatherProvider::with_options(ProviderOptions {
        base_url: weather.api_base_url.clone(),
        user_agent: weather.user_agent.clone(),
        timeout: app.request_timeout(),
    })
    .map_err(from_provider_error)
    .context("Failed to create weather client")?;
    Ok(Arc::new(provider))
}

/// Lift config failures into `AppError` so they carry a user-facing message.
fn startup_error(e: anyhow::Error) -> anyhow::Error {
    match e.downcast::<ConfigError>() {
        Ok(config_err) => {
            let err = AppError::from(config_err);
            tracing::error!("{} ({})", err.user_message(), err);
            err.into()
        }
        Err(other) => other,
    }
}

/// Accept a state code or name and return its two-letter code.
fn resolve_area(query: &str) -> Result<String, AppError> {
    find_state(query)
        .map(|s| s.abbreviation.to_string())
        .ok_or_else(|| WeatherError::UnknownArea(query.to_string()).into())
}

fn list_states(query: Option<&str>) {
    let states = match query {
        Some(q) => match find_state(q) {
            Some(state) => vec![state],
            None => search_states(q),
        },
        None => US_STATES.iter().collect(),
    };
    for state in states {
        println!("{}  {}", state.abbreviation, state.name);
    }
}

async fn list_zones(provider: &WeatherProvider, area: &str, filter: Option<&str>) -> Result<()> {
    let code = resolve_area(area)?;
    let zones = provider.list_zones(&code).await.map_err(from_provider_error)?;
    if zones.is_empty() {
        println!("No zones found for {}", code);
        return Ok(());
    }
    for zone in filter_zones(&zones, filter.unwrap_or_default()) {
        println!("{}\t{}", zone.id, zone.name);
    }
    Ok(())
}

async fn show_forecast(provider: &WeatherProvider, zone_id: &str, expand: bool) -> Result<()> {
    let zone = Zone {
        name: zone_id.to_string(),
        id: zone_id.to_string(),
    };
    let state = reduce(ViewState::default(), ViewEvent::ZoneSelected(zone));
    let generation = state.generation;
    let periods = provider.get_forecast(zone_id).await;
    let count = periods.len();

    let mut state = reduce(
        state,
        ViewEvent::ForecastLoaded {
            generation,
            periods,
        },
    );
    if expand {
        for i in 0..count {
            state = reduce(state, ViewEvent::ToggleExpanded(i));
        }
    }
    print!("{}", render(&state));
    Ok(())
}

async fn watch(
    app: &App,
    provider: Arc<WeatherProvider>,
    area: Option<String>,
    zone: Option<String>,
) -> Result<()> {
    let area = match area.or_else(|| app.config().ui.default_area.clone()) {
        Some(a) => Some(resolve_area(&a)?),
        None => None,
    };
    let mut controller = ForecastController::new(provider, app.refresh_interval(), area);
    if let Some(id) = zone {
        controller.on_zone_selected(Zone {
            name: id.clone(),
            id,
        });
    }
    watch::run(controller).await
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    zonecast_core::init()?;

    let mut app = App::new().map_err(startup_error)?;
    app.initialize()?;

    let result = match cli.command {
        Command::States { query } => {
            list_states(query.as_deref());
            Ok(())
        }
        Command::Zones { area, filter } => {
            let provider = build_provider(&app)?;
            list_zones(&provider, &area, filter.as_deref()).await
        }
        Command::Forecast { zone_id, expand } => {
            let provider = build_provider(&app)?;
            show_forecast(&provider, &zone_id, expand).await
        }
        Command::Watch { area, zone } => {
            let provider = build_provider(&app)?;
            watch(&app, provider, area, zone).await
        }
    };

    app.shutdown()?;
    result
}
