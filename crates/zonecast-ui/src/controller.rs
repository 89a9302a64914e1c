//! Forecast controller: owns the view state and runs its side effects.
//!
//! User actions and async completions become [`ViewEvent`]s fed through
//! [`reduce`]. After every transition the controller issues the requests the
//! transition implies and reconciles the refresh timer with the active zone.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use zonecast_core::AppError;
use zonecast_weather::{WeatherProvider, Zone};

use crate::refresh::{RefreshTick, RefreshTimer};
use crate::services::{request_forecast, request_zones, WeatherServiceMessage};
use crate::view_state::{reduce, ViewEvent, ViewState};

pub struct ForecastController {
    state: ViewState,
    provider: Arc<WeatherProvider>,
    refresh_period: Duration,
    timer: Option<RefreshTimer>,
    service_tx: UnboundedSender<WeatherServiceMessage>,
    service_rx: UnboundedReceiver<WeatherServiceMessage>,
    tick_tx: UnboundedSender<RefreshTick>,
    tick_rx: UnboundedReceiver<RefreshTick>,
}

impl ForecastController {
    /// Create a controller, preselecting `default_area` when given.
    pub fn new(
        provider: Arc<WeatherProvider>,
        refresh_period: Duration,
        default_area: Option<String>,
    ) -> Self {
        let (service_tx, service_rx) = unbounded_channel();
        let (tick_tx, tick_rx) = unbounded_channel();
        let mut controller = Self {
            state: ViewState::default(),
            provider,
            refresh_period,
            timer: None,
            service_tx,
            service_rx,
            tick_tx,
            tick_rx,
        };
        if default_area.is_some() {
            controller.dispatch(ViewEvent::AreaSelected(default_area));
        }
        controller
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Generation the refresh timer is ticking for, if one is running.
    pub fn refresh_generation(&self) -> Option<u64> {
        self.timer.as_ref().map(RefreshTimer::generation)
    }

    pub fn select_area(&mut self, area: Option<String>) {
        self.dispatch(ViewEvent::AreaSelected(area));
    }

    pub fn pick_zone(&mut self, zone: Option<Zone>) {
        self.dispatch(ViewEvent::ZonePicked(zone));
    }

    /// "Get weather": show the picked zone. Returns false when none is picked.
    pub fn confirm_zone(&mut self) -> bool {
        match self.state.pending_zone.clone() {
            Some(zone) => {
                self.on_zone_selected(zone);
                true
            }
            None => false,
        }
    }

    /// Switch the forecast view to `zone` and fetch it immediately.
    pub fn on_zone_selected(&mut self, zone: Zone) {
        self.dispatch(ViewEvent::ZoneSelected(zone));
    }

    pub fn toggle_expanded(&mut self, index: usize) {
        self.dispatch(ViewEvent::ToggleExpanded(index));
    }

    pub fn change_location(&mut self) {
        self.dispatch(ViewEvent::ChangeLocation);
    }

    /// Wait for the next async completion or refresh tick and apply it.
    /// Returns true if the view state changed.
    pub async fn process_next(&mut self) -> bool {
        let before = self.state.clone();
        tokio::select! {
            Some(msg) = self.service_rx.recv() => self.handle_service_message(msg),
            Some(tick) = self.tick_rx.recv() => self.handle_tick(tick),
            else => return false,
        }
        self.state != before
    }

    /// Apply any completions that have already arrived, without waiting.
    pub fn poll_channel(&mut self) -> bool {
        let before = self.state.clone();
        while let Ok(msg) = self.service_rx.try_recv() {
            self.handle_service_message(msg);
        }
        while let Ok(tick) = self.tick_rx.try_recv() {
            self.handle_tick(tick);
        }
        self.state != before
    }

    fn handle_service_message(&mut self, msg: WeatherServiceMessage) {
        match msg {
            WeatherServiceMessage::ZonesDone { area, result } => {
                let result = result.map_err(|e| AppError::from(e).user_message().to_string());
                if let Ok(zones) = &result {
                    tracing::info!("Loaded {} zones for {}", zones.len(), area);
                }
                self.dispatch(ViewEvent::ZonesLoaded { area, result });
            }
            WeatherServiceMessage::ForecastDone {
                generation,
                periods,
            } => {
                self.dispatch(ViewEvent::ForecastLoaded {
                    generation,
                    periods,
                });
            }
        }
    }

    pub(crate) fn handle_tick(&mut self, tick: RefreshTick) {
        let zone_id = match self.state.active_zone() {
            Some((zone, generation)) if generation == tick.generation => zone.id.clone(),
            _ => {
                tracing::debug!("Ignoring refresh tick for generation {}", tick.generation);
                return;
            }
        };
        tracing::debug!("Refreshing forecast for {}", zone_id);
        self.dispatch(ViewEvent::ForecastRequested {
            generation: tick.generation,
        });
        request_forecast(
            &self.service_tx,
            self.provider.clone(),
            zone_id,
            tick.generation,
        );
    }

    fn dispatch(&mut self, event: ViewEvent) {
        let previous = std::mem::take(&mut self.state);
        let generation_before = previous.generation;
        let area_event = matches!(event, ViewEvent::AreaSelected(_));

        self.state = reduce(previous, event);

        // Every area selection reloads, including a repeat of the current one.
        if area_event && self.state.zones_loading {
            if let Some(area) = self.state.area.clone() {
                request_zones(&self.service_tx, self.provider.clone(), area);
            }
        }

        if self.state.generation != generation_before {
            if let Some((zone, generation)) = self.state.active_zone() {
                tracing::info!("Fetching forecast for {} ({})", zone.name, zone.id);
                request_forecast(
                    &self.service_tx,
                    self.provider.clone(),
                    zone.id.clone(),
                    generation,
                );
            }
        }

        self.sync_timer();
    }

    /// Keep exactly one timer alive for the active zone, and none otherwise.
    fn sync_timer(&mut self) {
        let wanted = self.state.active_zone().map(|(_, generation)| generation);
        if self.refresh_generation() == wanted {
            return;
        }

        // Dropping the old timer cancels it.
        self.timer = None;

        if let Some(generation) = wanted {
            if tokio::runtime::Handle::try_current().is_err() {
                tracing::warn!("No runtime available; forecast will not refresh");
                return;
            }
            self.timer = Some(RefreshTimer::start(
                generation,
                self.refresh_period,
                self.tick_tx.clone(),
            ));
        }
    }
}
