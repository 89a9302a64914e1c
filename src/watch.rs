//! Interactive session: stdin commands drive the forecast controller.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use zonecast_core::{AppError, WeatherError};
use zonecast_ui::{render, ForecastController, Screen};
use zonecast_weather::{filter_zones, find_state, Zone};

const HELP: &str = "\
Commands:
  area [STATE]    choose a state (no argument clears it)
  zones [FILTER]  list the zones of the chosen state
  zone N|ID       pick a zone by number or id
  go              show the picked zone's forecast
  toggle N        expand or collapse forecast card N
  change          back to the location picker
  help            show this help
  quit            exit";

#[derive(Debug, PartialEq, Eq)]
enum WatchCommand {
    Area(Option<String>),
    Zones(Option<String>),
    Zone(String),
    Go,
    Toggle(usize),
    Change,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

fn parse_command(line: &str) -> WatchCommand {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let arg = (!rest.is_empty()).then(|| rest.to_string());

    match word.to_lowercase().as_str() {
        "" => WatchCommand::Empty,
        "area" | "state" => WatchCommand::Area(arg),
        "zones" | "ls" => WatchCommand::Zones(arg),
        "zone" | "pick" => match arg {
            Some(a) => WatchCommand::Zone(a),
            None => WatchCommand::Unknown(line.to_string()),
        },
        "go" | "get" => WatchCommand::Go,
        "toggle" | "t" => match rest.parse::<usize>() {
            Ok(n) if n > 0 => WatchCommand::Toggle(n - 1),
            _ => WatchCommand::Unknown(line.to_string()),
        },
        "change" => WatchCommand::Change,
        "help" | "?" => WatchCommand::Help,
        "quit" | "exit" | "q" => WatchCommand::Quit,
        _ => WatchCommand::Unknown(line.to_string()),
    }
}

/// Resolve "N" (1-based) or a zone id against the loaded zone list.
fn lookup_zone(zones: &[Zone], key: &str) -> Option<Zone> {
    if let Ok(n) = key.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| zones.get(i)).cloned();
    }
    zones.iter().find(|z| z.id.eq_ignore_ascii_case(key)).cloned()
}

/// Returns false when the session should end.
fn apply(controller: &mut ForecastController, command: WatchCommand) -> bool {
    match command {
        WatchCommand::Area(None) => controller.select_area(None),
        WatchCommand::Area(Some(query)) => match find_state(&query) {
            Some(state) => controller.select_area(Some(state.abbreviation.to_string())),
            None => {
                println!("Unknown state: {}", query);
                return true;
            }
        },
        WatchCommand::Zones(filter) => {
            let zones = &controller.state().zones;
            for zone in filter_zones(zones, filter.as_deref().unwrap_or_default()) {
                let n = zones.iter().position(|z| z == zone).map_or(0, |i| i + 1);
                println!("{:>4}. {} ({})", n, zone.name, zone.id);
            }
            return true;
        }
        WatchCommand::Zone(key) => match lookup_zone(&controller.state().zones, &key) {
            Some(zone) => controller.pick_zone(Some(zone)),
            None => {
                println!("No zone {}", key);
                return true;
            }
        },
        WatchCommand::Go => {
            if !controller.confirm_zone() {
                println!("{}", AppError::from(WeatherError::NoZoneSelected).user_message());
                return true;
            }
        }
        WatchCommand::Toggle(i) => {
            if controller.state().screen != Screen::Forecast {
                println!("No forecast shown");
                return true;
            }
            controller.toggle_expanded(i);
        }
        WatchCommand::Change => controller.change_location(),
        WatchCommand::Help => {
            println!("{}", HELP);
            return true;
        }
        WatchCommand::Quit => return false,
        WatchCommand::Empty => {}
        WatchCommand::Unknown(line) => {
            println!("Unrecognized command: {} (try \"help\")", line);
            return true;
        }
    }
    print!("{}", render(controller.state()));
    true
}

pub async fn run(mut controller: ForecastController) -> Result<()> {
    println!("{}\n", HELP);
    print!("{}", render(controller.state()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        if !apply(&mut controller, parse_command(&line)) {
                            break;
                        }
                    }
                    None => break,
                }
            }
            changed = controller.process_next() => {
                if changed {
                    print!("{}", render(controller.state()));
                }
            }
        }
    }
    Ok(())
}
