use clap::{Parser, Subcommand};

/// National Weather Service zone forecasts in the terminal.
#[derive(Parser)]
#[command(name = "zonecast", version, about = "NWS zone forecasts with high/low extraction")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List states and territories, optionally filtered by name or code prefix.
    States {
        query: Option<String>,
    },
    /// List the forecast zones of a state.
    Zones {
        /// State code or name (e.g. "WA" or "Washington").
        area: String,

        /// Only show zones whose name or id contains this text.
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Print the forecast of one zone.
    Forecast {
        /// NWS zone id (e.g. "WAZ558").
        zone_id: String,

        /// Show the full narrative of every period.
        #[arg(short, long)]
        expand: bool,
    },
    /// Interactive picker and forecast view with periodic refresh.
    Watch {
        /// Preselect a state; defaults to `ui.default_area` from the config.
        #[arg(short, long)]
        area: Option<String>,

        /// Open this zone's forecast right away.
        #[arg(short, long)]
        zone: Option<String>,
    },
}
