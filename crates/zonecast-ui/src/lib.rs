pub mod controller;
pub mod error_mapping;
pub mod refresh;
pub mod render;
pub mod services;
pub mod view_state;

pub use controller::ForecastController;
pub use error_mapping::from_provider_error;
pub use refresh::{RefreshTick, RefreshTimer};
pub use render::{render, render_card, NO_DATA};
pub use view_state::{reduce, Screen, ViewEvent, ViewState};
