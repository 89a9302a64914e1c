//! Maps UI service and provider errors to zonecast_core::AppError for consistent user-facing messages.

mod weather;

pub use weather::from_provider_error;
