//! Agent-facing tool surface: names, descriptions, input schema and dispatch.
//!
//! Registering these with a particular agent framework is left to the host;
//! [`declarations`] gives it everything it needs and
//! [`WeatherAdapter::call_tool`] runs a call by name.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::convert::TryFrom;

use crate::{
    adapter::WeatherAdapter,
    error::{Result, WeatherError},
    provider::WeatherSource,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    CurrentWeather,
    Forecast,
}

impl ToolName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::CurrentWeather => "get_current_weather",
            ToolName::Forecast => "get_forecast",
        }
    }

    pub const fn all() -> &'static [ToolName] {
        &[ToolName::CurrentWeather, ToolName::Forecast]
    }

    pub fn description(&self) -> &'static str {
        match self {
            ToolName::CurrentWeather => {
                "Get the live weather at a location. Takes the latitude and longitude the user \
                 gave and reports current conditions for the surrounding region (China only)."
            }
            ToolName::Forecast => {
                "Get the weather forecast for the coming days at a location. Takes the latitude \
                 and longitude the user gave and reports day and night conditions per day \
                 (China only)."
            }
        }
    }

    pub fn declaration(&self) -> ToolDeclaration {
        let schema = schemars::schema_for!(CoordinateArgs);
        ToolDeclaration {
            name: self.as_str().to_string(),
            description: self.description().to_string(),
            parameters: serde_json::to_value(schema).unwrap_or_default(),
        }
    }
}

impl std::fmt::Display for ToolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ToolName {
    type Error = WeatherError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "get_current_weather" => Ok(ToolName::CurrentWeather),
            "get_forecast" => Ok(ToolName::Forecast),
            _ => Err(WeatherError::UnknownTool(value.to_string())),
        }
    }
}

/// Arguments shared by both tools.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, JsonSchema)]
pub struct CoordinateArgs {
    /// Latitude in decimal degrees, e.g. 34.247311
    pub latitude: f64,
    /// Longitude in decimal degrees, e.g. 108.948303
    pub longitude: f64,
}

/// What a host framework needs to register a tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDeclaration {
    pub name: String,
    pub description: String,
    /// JSON schema of the arguments object.
    pub parameters: Value,
}

pub fn declarations() -> Vec<ToolDeclaration> {
    ToolName::all().iter().map(ToolName::declaration).collect()
}

impl<S: WeatherSource> WeatherAdapter<S> {
    /// Run a tool by name with JSON arguments, as a host framework would.
    pub async fn call_tool(&self, name: &str, args: Value) -> Result<String> {
        let tool = ToolName::try_from(name)?;
        let CoordinateArgs { latitude, longitude } =
            serde_json::from_value(args).map_err(WeatherError::InvalidArguments)?;

        match tool {
            ToolName::CurrentWeather => self.get_current_weather(latitude, longitude).await,
            ToolName::Forecast => self.get_forecast(latitude, longitude).await,
        }
    }
}
