//! Weather lookup by coordinate over the AMap web API.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The AMap source (reverse geocoding + weather endpoints)
//! - The lookup adapter and its text rendering
//! - Tool declarations for agent frameworks
//!
//! It is used by `amap-weather-cli`, but can also be embedded in any agent host.

pub mod adapter;
pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod provider;
pub mod tool;

#[cfg(test)]
mod test_support;

pub use adapter::WeatherAdapter;
pub use config::Config;
pub use error::WeatherError;
pub use model::{AreaCode, Coordinate, CurrentConditions, ForecastDay, ForecastSet, GeocodeLookup};
pub use provider::{AmapSource, WeatherSource};
pub use tool::{ToolDeclaration, ToolName, declarations};
